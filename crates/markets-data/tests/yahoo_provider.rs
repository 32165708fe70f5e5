//! Yahoo 차트 클라이언트 통합 테스트
//!
//! mockito 서버로 응답을 흉내 내어 요청 형식과 오류 매핑을 확인합니다.

use markets_core::ProviderConfig;
use markets_data::{DataError, MarketDataProvider, YahooChartProvider};
use mockito::Matcher;

const CHART_PATH: &str = "/v8/finance/chart/SPY";

fn provider_for(base_url: String) -> YahooChartProvider {
    YahooChartProvider::new(&ProviderConfig {
        base_url,
        timeout_secs: 5,
        ..Default::default()
    })
    .unwrap()
}

fn query(range: &str, interval: &str) -> Matcher {
    Matcher::AllOf(vec![
        Matcher::UrlEncoded("range".into(), range.into()),
        Matcher::UrlEncoded("interval".into(), interval.into()),
    ])
}

const CHART_BODY: &str = r#"{
  "chart": {
    "result": [{
      "meta": {
        "symbol": "SPY",
        "currency": "USD",
        "longName": "SPDR S&P 500 ETF Trust",
        "regularMarketPrice": 510.25,
        "chartPreviousClose": 500.0,
        "regularMarketDayHigh": 512.0,
        "regularMarketDayLow": 505.5,
        "fiftyTwoWeekHigh": 520.0,
        "fiftyTwoWeekLow": 410.0,
        "regularMarketVolume": 75000000,
        "regularMarketTime": 1735851600
      },
      "timestamp": [1735689600, 1735776000, 1735862400],
      "indicators": {
        "quote": [{
          "open":   [500.0, null, 506.0],
          "high":   [505.0, 507.0, 512.0],
          "low":    [498.0, 501.0, 505.5],
          "close":  [504.0, 506.0, 510.25],
          "volume": [1000, 1100, null]
        }]
      }
    }],
    "error": null
  }
}"#;

#[tokio::test]
async fn test_quote_from_meta() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", CHART_PATH)
        .match_query(query("1d", "1d"))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(CHART_BODY)
        .create_async()
        .await;

    let quote = provider_for(server.url()).quote("SPY").await.unwrap();

    mock.assert_async().await;
    assert_eq!(quote.symbol, "SPY");
    assert_eq!(quote.price, 510.25);
    assert_eq!(quote.previous_close, Some(500.0));
    assert_eq!(quote.change, Some(10.25));
    assert_eq!(quote.change_percent, Some(2.05));
    assert_eq!(quote.fifty_two_week_high, Some(520.0));
    assert_eq!(quote.market_time, Some(1735851600));
}

#[tokio::test]
async fn test_history_columns() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", CHART_PATH)
        .match_query(query("60d", "1h"))
        .with_status(200)
        .with_body(CHART_BODY)
        .create_async()
        .await;

    let bars = provider_for(server.url())
        .history("SPY", "60d", "1h")
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(bars.len(), 3);
    assert_eq!(bars.open[1], None);
    assert_eq!(bars.close[2], Some(510.25));
    assert_eq!(bars.volume[2], None);
}

#[tokio::test]
async fn test_http_404_is_symbol_not_found() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/v8/finance/chart/NOPE")
        .match_query(Matcher::Any)
        .with_status(404)
        .with_body(
            r#"{"chart":{"result":null,"error":{"code":"Not Found","description":"No data found, symbol may be delisted"}}}"#,
        )
        .create_async()
        .await;

    let err = provider_for(server.url()).quote("NOPE").await.unwrap_err();
    assert!(matches!(err, DataError::SymbolNotFound(ref s) if s == "NOPE"));
}

#[tokio::test]
async fn test_chart_error_body_is_symbol_not_found() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", CHART_PATH)
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"chart":{"result":null,"error":{"code":"Not Found","description":"delisted"}}}"#)
        .create_async()
        .await;

    let err = provider_for(server.url())
        .history("SPY", "3mo", "1d")
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_empty_result_is_symbol_not_found() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", CHART_PATH)
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"chart":{"result":[],"error":null}}"#)
        .create_async()
        .await;

    let err = provider_for(server.url()).quote("SPY").await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_server_error_is_http() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", CHART_PATH)
        .match_query(Matcher::Any)
        .with_status(502)
        .with_body("upstream unavailable")
        .create_async()
        .await;

    let err = provider_for(server.url()).quote("SPY").await.unwrap_err();
    match err {
        DataError::Http { status, message } => {
            assert_eq!(status, 502);
            assert_eq!(message, "upstream unavailable");
        }
        other => panic!("expected Http error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_body_is_parse_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", CHART_PATH)
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("<html>rate limited</html>")
        .create_async()
        .await;

    let err = provider_for(server.url()).quote("SPY").await.unwrap_err();
    assert!(matches!(err, DataError::Parse(_)));
}

#[tokio::test]
async fn test_connection_refused_is_network_error() {
    // 포트 1은 일반적으로 열려 있지 않음
    let err = provider_for("http://127.0.0.1:1".to_string())
        .quote("SPY")
        .await
        .unwrap_err();
    assert!(matches!(err, DataError::Network(_)));
    assert_eq!(err.kind(), "network");
}
