//! API 라우트.
//!
//! # 라우트 구조
//!
//! - `/health` - 헬스 체크 (liveness)
//! - `/health/ready` - 상세 헬스 체크 (readiness)
//! - `/markets` - 시장 분석 (단일 심볼 / 관심 종목 개요)

pub mod health;
pub mod markets;

pub use health::{health_router, HealthResponse};
pub use markets::{markets_router, MarketsQuery, MarketsResponse};

use axum::Router;
use std::sync::Arc;

use crate::state::AppState;

/// 전체 API 라우터 생성.
pub fn create_api_router() -> Router<Arc<AppState>> {
    Router::new()
        // 헬스 체크 엔드포인트
        .nest("/health", health_router())
        // 시장 분석 엔드포인트
        .merge(markets_router())
}
