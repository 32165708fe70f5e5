//! # Markets Data
//!
//! 외부 시세 제공자와의 통신을 담당합니다.
//!
//! - [`provider::MarketDataProvider`]: 현재가/과거 시세 조회 트레이트
//! - [`provider::YahooChartProvider`]: Yahoo 차트 API 구현체
//! - [`error::DataError`]: 제공자 오류 분류

pub mod error;
pub mod provider;

pub use error::{DataError, Result};
pub use provider::{MarketDataProvider, YahooChartProvider};
