//! # Markets Core
//!
//! 시장 분석 서비스의 핵심 타입을 제공합니다.
//!
//! 이 크레이트는 서비스 전반에서 사용되는 기본 타입을 제공합니다:
//! - 캔들(OHLCV) 및 원시 시세 데이터 구조체
//! - 현재가 스냅샷
//! - 조회 기간/캔들 간격 해석 (TimeframeResolver)
//! - 설정 관리
//! - 로깅 인프라

pub mod config;
pub mod domain;
pub mod logging;
pub mod types;

pub use self::config::*;
pub use domain::*;
pub use logging::*;
pub use types::*;
