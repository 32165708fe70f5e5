//! Prometheus 메트릭 설정 및 유틸리티.
//!
//! HTTP 요청 메트릭, 비즈니스 메트릭을 수집하고 `/metrics` 엔드포인트로 노출합니다.

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{BuildError, Matcher, PrometheusBuilder, PrometheusHandle};

/// 라우트에 매칭되지 않은 요청의 경로 라벨.
pub const UNMATCHED_PATH: &str = "unmatched";

/// Prometheus 메트릭 레코더를 설정하고 핸들을 반환합니다.
///
/// # 반환값
///
/// `/metrics` 엔드포인트에서 메트릭을 렌더링하기 위한 `PrometheusHandle`
///
/// # 에러
///
/// 레코더가 이미 설치되어 있으면 에러를 반환합니다.
pub fn setup_metrics_recorder() -> Result<PrometheusHandle, BuildError> {
    PrometheusBuilder::new()
        // HTTP 요청 지속 시간 히스토그램 버킷 설정
        .set_buckets_for_metric(
            Matcher::Full("http_request_duration_seconds".to_string()),
            &[0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0],
        )?
        .install_recorder()
}

// ============================================================================
// HTTP 메트릭 헬퍼 함수
// ============================================================================

/// HTTP 요청 카운터 증가.
pub fn record_http_request(method: &str, path: &str) {
    counter!("http_requests_total", "method" => method.to_string(), "path" => path.to_string())
        .increment(1);
}

/// HTTP 응답 카운터 증가.
pub fn record_http_response(method: &str, path: &str, status: u16) {
    counter!(
        "http_responses_total",
        "method" => method.to_string(),
        "path" => path.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
}

/// HTTP 요청 지속 시간 기록.
pub fn record_http_duration(method: &str, path: &str, duration_secs: f64) {
    histogram!(
        "http_request_duration_seconds",
        "method" => method.to_string(),
        "path" => path.to_string()
    )
    .record(duration_secs);
}

// ============================================================================
// 비즈니스 메트릭 헬퍼 함수
// ============================================================================

/// 시세 제공자 실패 카운터 증가.
pub fn record_provider_failure(kind: &str) {
    counter!("market_provider_failures_total", "kind" => kind.to_string()).increment(1);
}

/// 피보나치 앵커 경로 카운터 증가.
pub fn record_fibonacci_path(path: &str) {
    counter!("market_fibonacci_total", "path" => path.to_string()).increment(1);
}

// ============================================================================
// 경로 라벨 유틸리티
// ============================================================================

/// 메트릭 라벨로 쓸 경로를 결정합니다.
///
/// 라우트 패턴이 있으면 그대로 쓰고, 없으면 임의 경로로 라벨이
/// 늘어나지 않도록 [`UNMATCHED_PATH`]로 묶습니다.
pub fn path_label(matched: Option<&str>) -> String {
    matched.unwrap_or(UNMATCHED_PATH).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_label_matched() {
        assert_eq!(path_label(Some("/markets")), "/markets");
    }

    #[test]
    fn test_path_label_unmatched() {
        assert_eq!(path_label(None), UNMATCHED_PATH);
    }
}
