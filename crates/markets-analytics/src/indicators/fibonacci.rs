//! 피보나치 되돌림/확장 레벨 (FibonacciEngine).
//!
//! 스윙 포인트로 최근 추세의 고점/저점 앵커를 고르고 레벨을 계산합니다.
//!
//! # 앵커 선택
//!
//! - 캔들 20개 미만: 빈 결과 (`high = low = 0`, 상승 추세)
//! - 스윙 고점 또는 저점이 없음: 전체 구간 최고가/최저가, 상승 추세
//! - 마지막 스윙 고점이 마지막 스윙 저점보다 뒤: 상승 추세,
//!   저점 앵커는 그 고점 이전의 가장 최근 스윙 저점 (없으면 0번 캔들)
//! - 그 외: 하락 추세, 고점 앵커는 마지막 스윙 저점 이전의 가장 최근 스윙 고점
//!
//! # 가격 공식
//!
//! - 되돌림: `round2(high - (high - low) * r)`
//! - 확장: `round2(low + (high - low) * r)` (추세와 무관하게 저점에서 위로)

use chrono::DateTime;
use chrono_tz::Tz;
use markets_core::{round_price, round_to, Candle};
use serde::{Deserialize, Serialize};
use tracing::trace;

use super::swing::{adaptive_lookback, detect_swing_points};

/// 되돌림 비율.
pub const RETRACEMENT_RATIOS: [f64; 7] = [0.0, 0.236, 0.382, 0.5, 0.618, 0.786, 1.0];

/// 확장 비율.
pub const EXTENSION_RATIOS: [f64; 5] = [1.272, 1.414, 1.618, 2.0, 2.618];

/// 피보나치 계산에 필요한 최소 캔들 수.
pub const MIN_FIBONACCI_CANDLES: usize = 20;

/// 추세 방향.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    #[default]
    Up,
    Down,
}

/// 단일 피보나치 레벨.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FibLevel {
    /// 비율 표기 (예: "61.8%")
    pub ratio_label: String,
    /// 레벨 가격 (센트 단위 반올림)
    pub price: f64,
    /// 비율 (%)
    pub ratio_percent: f64,
}

impl FibLevel {
    fn new(ratio: f64, price: f64) -> Self {
        let percent = ratio * 100.0;
        Self {
            ratio_label: format!("{:.1}%", percent),
            price: round_price(price),
            ratio_percent: round_to(percent, 1),
        }
    }
}

/// 하나의 캔들 시퀀스에 대한 피보나치 계산 결과.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FibonacciLevels {
    /// 고점 앵커 가격
    pub high: f64,
    /// 저점 앵커 가격
    pub low: f64,
    /// 추세 방향
    pub trend: Trend,
    /// 되돌림 레벨 (0% → 100%)
    pub retracements: Vec<FibLevel>,
    /// 확장 레벨
    pub extensions: Vec<FibLevel>,
    /// 고점 앵커 캔들 날짜 (표시용)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub swing_high_date: Option<String>,
    /// 저점 앵커 캔들 날짜 (표시용)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub swing_low_date: Option<String>,
}

impl FibonacciLevels {
    /// 앵커 가격으로 레벨 표를 만듭니다.
    ///
    /// `high < low`여도 앵커를 바꾸지 않고 같은 공식을 적용합니다.
    pub fn from_anchors(high: f64, low: f64, trend: Trend) -> Self {
        let range = high - low;

        Self {
            high,
            low,
            trend,
            retracements: RETRACEMENT_RATIOS
                .iter()
                .map(|&r| FibLevel::new(r, high - range * r))
                .collect(),
            extensions: EXTENSION_RATIOS
                .iter()
                .map(|&r| FibLevel::new(r, low + range * r))
                .collect(),
            swing_high_date: None,
            swing_low_date: None,
        }
    }

    /// 데이터 부족 시의 빈 결과.
    pub fn degenerate() -> Self {
        Self {
            high: 0.0,
            low: 0.0,
            trend: Trend::Up,
            retracements: Vec::new(),
            extensions: Vec::new(),
            swing_high_date: None,
            swing_low_date: None,
        }
    }

    fn with_dates(mut self, high_date: Option<String>, low_date: Option<String>) -> Self {
        self.swing_high_date = high_date;
        self.swing_low_date = low_date;
        self
    }
}

/// 앵커를 고른 경로. 메트릭 라벨로 사용합니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FibonacciPath {
    /// 캔들 부족
    Insufficient,
    /// 스윙 포인트 부족으로 전체 최고/최저가 사용
    Fallback,
    /// 스윙 포인트 기반
    Swing,
}

impl FibonacciPath {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Insufficient => "insufficient",
            Self::Fallback => "fallback",
            Self::Swing => "swing",
        }
    }
}

/// 계산 결과와 경로.
#[derive(Debug, Clone, PartialEq)]
pub struct FibonacciOutcome {
    pub levels: FibonacciLevels,
    pub path: FibonacciPath,
}

/// 피보나치 레벨 계산기.
///
/// 앵커 날짜 표시에 사용할 타임존만 상태로 가집니다.
#[derive(Debug, Clone, Copy)]
pub struct FibonacciEngine {
    timezone: Tz,
}

impl Default for FibonacciEngine {
    fn default() -> Self {
        Self { timezone: Tz::UTC }
    }
}

impl FibonacciEngine {
    /// 표시용 타임존을 지정해 생성합니다.
    pub fn new(timezone: Tz) -> Self {
        Self { timezone }
    }

    /// 피보나치 레벨을 계산합니다.
    pub fn compute(&self, candles: &[Candle]) -> FibonacciLevels {
        self.evaluate(candles).levels
    }

    /// 피보나치 레벨을 계산하고 어떤 경로로 앵커를 골랐는지 함께 반환합니다.
    pub fn evaluate(&self, candles: &[Candle]) -> FibonacciOutcome {
        if candles.len() < MIN_FIBONACCI_CANDLES {
            return FibonacciOutcome {
                levels: FibonacciLevels::degenerate(),
                path: FibonacciPath::Insufficient,
            };
        }

        let lookback = adaptive_lookback(candles.len());
        let swings = detect_swing_points(candles, lookback);

        trace!(
            lookback,
            highs = swings.highs.len(),
            lows = swings.lows.len(),
            "Swing points detected"
        );

        let (high_idx, low_idx, trend, path) = match (swings.highs.last(), swings.lows.last()) {
            (Some(&last_high), Some(&last_low)) if last_high > last_low => {
                let low_idx = most_recent_before(&swings.lows, last_high);
                (last_high, low_idx, Trend::Up, FibonacciPath::Swing)
            }
            (Some(_), Some(&last_low)) => {
                let high_idx = most_recent_before(&swings.highs, last_low);
                (high_idx, last_low, Trend::Down, FibonacciPath::Swing)
            }
            _ => {
                let (high_idx, low_idx) = global_extremes(candles);
                (high_idx, low_idx, Trend::Up, FibonacciPath::Fallback)
            }
        };

        let high = &candles[high_idx];
        let low = &candles[low_idx];

        let levels = FibonacciLevels::from_anchors(high.high, low.low, trend)
            .with_dates(self.format_date(high.time), self.format_date(low.time));

        FibonacciOutcome { levels, path }
    }

    /// Unix 초를 "Jan 5, 2025" 형식으로 표시합니다.
    pub fn format_date(&self, time: i64) -> Option<String> {
        DateTime::from_timestamp(time, 0).map(|dt| {
            dt.with_timezone(&self.timezone)
                .format("%b %-d, %Y")
                .to_string()
        })
    }
}

/// `before`보다 앞선 가장 최근 인덱스. 없으면 0.
fn most_recent_before(indices: &[usize], before: usize) -> usize {
    indices
        .iter()
        .rev()
        .find(|&&i| i < before)
        .copied()
        .unwrap_or(0)
}

/// 최고 고가와 최저 저가의 첫 인덱스.
fn global_extremes(candles: &[Candle]) -> (usize, usize) {
    let mut high_idx = 0;
    let mut low_idx = 0;

    for (i, candle) in candles.iter().enumerate() {
        if candle.high > candles[high_idx].high {
            high_idx = i;
        }
        if candle.low < candles[low_idx].low {
            low_idx = i;
        }
    }

    (high_idx, low_idx)
}
