//! 캔들 시퀀스 통합 분석.
//!
//! 피보나치와 이동평균은 서로 독립적인 순수 계산이므로 같은 슬라이스를
//! 빌려 차례로 실행합니다.

use chrono_tz::Tz;
use markets_core::Candle;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::indicators::{
    FibonacciEngine, FibonacciLevels, FibonacciOutcome, FibonacciPath, MovingAverageSet,
};

/// 단일 심볼 분석 결과.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketAnalysis {
    pub fibonacci: FibonacciLevels,
    pub moving_averages: MovingAverageSet,
}

/// 시장 분석기.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarketAnalyzer {
    fibonacci: FibonacciEngine,
}

impl MarketAnalyzer {
    /// 스윙 날짜 표시 타임존을 지정해 생성합니다.
    pub fn new(timezone: Tz) -> Self {
        Self {
            fibonacci: FibonacciEngine::new(timezone),
        }
    }

    /// 피보나치 엔진.
    pub fn fibonacci_engine(&self) -> &FibonacciEngine {
        &self.fibonacci
    }

    /// 피보나치 레벨과 이동평균을 모두 계산합니다.
    pub fn analyze(&self, candles: &[Candle]) -> MarketAnalysis {
        self.analyze_with_path(candles).0
    }

    /// 분석 결과와 피보나치 앵커 경로를 함께 반환합니다.
    pub fn analyze_with_path(&self, candles: &[Candle]) -> (MarketAnalysis, FibonacciPath) {
        let FibonacciOutcome { levels, path } = self.fibonacci.evaluate(candles);
        let moving_averages = MovingAverageSet::compute(candles);

        debug!(
            candles = candles.len(),
            path = path.as_str(),
            trend = ?levels.trend,
            "Market analysis computed"
        );

        (
            MarketAnalysis {
                fibonacci: levels,
                moving_averages,
            },
            path,
        )
    }
}
