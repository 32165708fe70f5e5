//! 통합 API 에러 응답 타입.
//!
//! 모든 API 엔드포인트에서 일관된 에러 형식을 제공합니다.

use axum::{http::StatusCode, Json};
use markets_data::DataError;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 통합 API 에러 응답.
///
/// # 예시
///
/// ```json
/// {
///   "code": "SYMBOL_NOT_FOUND",
///   "error": "Unknown symbol: NOPE",
///   "timestamp": 1738300800
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiErrorResponse {
    /// 에러 코드 (예: "SYMBOL_NOT_FOUND", "PROVIDER_ERROR")
    pub code: String,
    /// 사람이 읽을 수 있는 에러 메시지
    #[serde(rename = "error")]
    pub message: String,
    /// 에러 발생 타임스탬프 (Unix timestamp, 선택적)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,
}

impl ApiErrorResponse {
    /// 기본 에러 생성 (타임스탬프 포함).
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            timestamp: Some(chrono::Utc::now().timestamp()),
        }
    }
}

impl std::fmt::Display for ApiErrorResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiErrorResponse {}

/// API 핸들러 Result 타입 별칭.
pub type ApiResult<T> = Result<T, (StatusCode, Json<ApiErrorResponse>)>;

/// 제공자 오류를 HTTP 응답으로 변환합니다.
///
/// 알 수 없는 심볼만 404로 노출하고, 나머지는 상세 내용 없이 500으로 응답합니다.
pub fn provider_error(symbol: &str, err: &DataError) -> (StatusCode, Json<ApiErrorResponse>) {
    match err {
        DataError::SymbolNotFound(_) => (
            StatusCode::NOT_FOUND,
            Json(ApiErrorResponse::new(
                "SYMBOL_NOT_FOUND",
                format!("Unknown symbol: {}", symbol),
            )),
        ),
        _ => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiErrorResponse::new(
                "PROVIDER_ERROR",
                "Failed to fetch market data",
            )),
        ),
    }
}
