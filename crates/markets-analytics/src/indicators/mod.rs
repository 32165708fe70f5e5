//! 기술적 지표 모듈.
//!
//! 정규화된 캔들 시퀀스 위에서 동작하는 순수 계산 모듈입니다.
//!
//! # 지원 지표
//!
//! - **Swing Point**: 대칭 lookback 윈도우 기반 국소 고점/저점 탐지
//! - **Fibonacci**: 스윙 앵커 기반 되돌림/확장 레벨
//! - **SMA**: 단순 이동평균 (5/20/50/100)
//!
//! # 사용 예시
//!
//! ```ignore
//! use markets_analytics::indicators::{FibonacciEngine, MovingAverageSet};
//!
//! let fibonacci = FibonacciEngine::default().compute(&candles);
//! let averages = MovingAverageSet::compute(&candles);
//! ```

pub mod fibonacci;
pub mod moving_average;
pub mod swing;

use thiserror::Error;

pub use fibonacci::{
    FibLevel, FibonacciEngine, FibonacciLevels, FibonacciOutcome, FibonacciPath, Trend,
    EXTENSION_RATIOS, MIN_FIBONACCI_CANDLES, RETRACEMENT_RATIOS,
};
pub use moving_average::{
    sma, MovingAverageParams, MovingAverageResult, MovingAverageSet, DEFAULT_MA_PERIODS,
};
pub use swing::{adaptive_lookback, detect_swing_points, SwingPoints};

/// 지표 계산 오류.
#[derive(Debug, Error)]
pub enum IndicatorError {
    /// 잘못된 파라미터
    #[error("잘못된 파라미터: {0}")]
    InvalidParameter(String),
}

/// 지표 계산 결과 타입.
pub type IndicatorResult<T> = Result<T, IndicatorError>;
