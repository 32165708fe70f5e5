//! # Markets Analytics
//!
//! 시세 캔들에 대한 기술적 분석을 제공합니다.
//!
//! - [`normalizer`]: 원시 바 검증 및 4시간봉 합성
//! - [`indicators`]: 스윙 포인트, 피보나치 레벨, 단순 이동평균
//! - [`analyzer`]: 위 지표를 묶어 한 번에 계산
//!
//! 모든 계산은 순수 함수이며 요청 단위로 새로 수행됩니다.

pub mod analyzer;
pub mod indicators;
pub mod normalizer;

pub use analyzer::{MarketAnalysis, MarketAnalyzer};
pub use indicators::*;
pub use normalizer::{aggregate_candles, normalize};
