//! OpenAPI 문서화 설정.
//!
//! utoipa를 사용하여 REST API의 OpenAPI 3.0 스펙을 생성합니다.
//! Swagger UI는 `/swagger-ui` 경로에서 사용 가능합니다.
//!
//! # 외부 타입 처리
//!
//! 분석 크레이트의 타입(`Quote`, `FibonacciLevels` 등)은 응답 구조체 필드에
//! `#[schema(value_type = Object)]`를 지정하여 JSON 객체로 처리합니다.

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::error::ApiErrorResponse;
use crate::routes::{HealthResponse, MarketsResponse};
use crate::services::{OverviewResponse, SymbolAnalysisResponse, SymbolOverview};

/// Markets API 문서.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Markets Analysis API",
        version = "0.1.0",
        description = r#"
# 시장 기술적 분석 REST API

심볼의 현재가와 함께 스윙 포인트 기반 피보나치 레벨, 단순 이동평균을 제공합니다.

## 조회 모드

- **단일 심볼**: `GET /markets?symbol=SPY&range=1y&interval=1d`
- **관심 종목 개요**: `GET /markets`

## 기간/간격

- 기간: `1d, 5d, 1mo, 3mo, 6mo, 1y, 3y, 5y, 10y` (기본 `3mo`)
- 간격: `30m, 1h, 4h, 1d, 1w` (기본 `1d`)
- 분봉(30m/1h/4h)에서 6개월 이상 기간은 60일로 제한됩니다.
"#,
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:3000", description = "로컬 개발 서버"),
    ),
    tags(
        (name = "health", description = "헬스 체크 - 서버 상태 확인"),
        (name = "markets", description = "시장 - 피보나치/이동평균 분석")
    ),
    components(
        schemas(
            // ===== Health =====
            HealthResponse,

            // ===== Common =====
            ApiErrorResponse,

            // ===== Markets =====
            MarketsResponse,
            SymbolAnalysisResponse,
            OverviewResponse,
            SymbolOverview,
        )
    ),
    paths(
        // ===== Health =====
        crate::routes::health::health_check,
        crate::routes::health::health_ready,

        // ===== Markets =====
        crate::routes::markets::get_markets,
    )
)]
pub struct ApiDoc;

/// Swagger UI 라우터 생성.
///
/// 다음 경로에 문서 UI를 마운트합니다:
/// - `/swagger-ui` - Swagger UI 대화형 문서
/// - `/api-docs/openapi.json` - OpenAPI JSON 스펙
pub fn swagger_ui_router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    SwaggerUi::new("/swagger-ui")
        .url("/api-docs/openapi.json", ApiDoc::openapi())
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_spec_valid() {
        let spec = ApiDoc::openapi();
        let json = serde_json::to_string_pretty(&spec).unwrap();

        assert!(json.contains("Markets Analysis API"));
        assert!(json.contains("/health/ready"));
        assert!(json.contains("/markets"));
        assert!(json.contains("\"symbol\""));
    }

    #[test]
    fn test_swagger_ui_router_creates() {
        let _router: Router<()> = swagger_ui_router();
    }

    #[test]
    fn test_openapi_contains_schemas() {
        let json = serde_json::to_string(&ApiDoc::openapi()).unwrap();

        assert!(json.contains("SymbolAnalysisResponse"));
        assert!(json.contains("OverviewResponse"));
        assert!(json.contains("ApiErrorResponse"));
    }
}
