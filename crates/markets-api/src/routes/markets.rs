//! 시장 분석 endpoint.
//!
//! `GET /markets?symbol=&range=&interval=`
//!
//! - `symbol` 지정: 단일 심볼의 현재가, 캔들, 피보나치, 이동평균
//! - `symbol` 생략: 관심 종목 전체의 현재가 + 피보나치 개요
//!
//! `range`/`interval`은 알 수 없는 값이면 기본값(`3mo`/`1d`)으로 해석합니다.

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use markets_core::TimeframeResolution;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info};
use utoipa::{IntoParams, ToSchema};

use crate::error::{provider_error, ApiErrorResponse, ApiResult};
use crate::services::{OverviewResponse, SymbolAnalysisResponse};
use crate::state::AppState;

/// 시장 조회 쿼리.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct MarketsQuery {
    /// 심볼 (예: SPY). 생략하면 개요 모드
    pub symbol: Option<String>,
    /// 조회 기간 (1d, 5d, 1mo, 3mo, 6mo, 1y, 3y, 5y, 10y)
    pub range: Option<String>,
    /// 캔들 간격 (30m, 1h, 4h, 1d, 1w)
    pub interval: Option<String>,
}

/// `/markets` 응답.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum MarketsResponse {
    /// 단일 심볼 분석
    Symbol(Box<SymbolAnalysisResponse>),
    /// 관심 종목 개요
    Overview(OverviewResponse),
}

/// 심볼 입력을 정규화합니다. 공백이면 `None`.
pub fn normalize_symbol(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_uppercase)
}

/// 시장 분석 조회.
#[utoipa::path(
    get,
    path = "/markets",
    params(MarketsQuery),
    responses(
        (status = 200, description = "분석 결과 (단일 심볼 또는 개요)", body = MarketsResponse),
        (status = 404, description = "알 수 없는 심볼", body = ApiErrorResponse),
        (status = 500, description = "시세 제공자 오류", body = ApiErrorResponse)
    ),
    tag = "markets"
)]
pub async fn get_markets(
    State(state): State<Arc<AppState>>,
    Query(query): Query<MarketsQuery>,
) -> ApiResult<Json<MarketsResponse>> {
    let Some(symbol) = normalize_symbol(query.symbol.as_deref()) else {
        let overview = state.assembler.overview().await;
        return Ok(Json(MarketsResponse::Overview(overview)));
    };

    let resolution = TimeframeResolution::resolve(
        query.range.as_deref().unwrap_or_default(),
        query.interval.as_deref().unwrap_or_default(),
    );

    info!(
        symbol = %symbol,
        range = %resolution.range,
        interval = %resolution.interval,
        "Market analysis requested"
    );

    state
        .assembler
        .single(&symbol, resolution)
        .await
        .map(|analysis| Json(MarketsResponse::Symbol(Box::new(analysis))))
        .map_err(|e| {
            if !e.is_not_found() {
                error!(symbol = %symbol, error = %e, "Market data provider failed");
            }
            provider_error(&symbol, &e)
        })
}

/// 시장 라우터 생성.
pub fn markets_router() -> Router<Arc<AppState>> {
    Router::new().route("/markets", get(get_markets))
}
