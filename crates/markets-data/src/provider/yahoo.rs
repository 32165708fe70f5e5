//! Yahoo 차트 API 클라이언트.
//!
//! 하나의 엔드포인트로 현재가와 과거 시세를 모두 가져옵니다.
//!
//! ```text
//! GET {base}/v8/finance/chart/{symbol}?range=3mo&interval=1d
//! ```
//!
//! # 응답 매핑
//!
//! | 응답                                   | 결과                         |
//! |----------------------------------------|------------------------------|
//! | HTTP 404                               | `DataError::SymbolNotFound`  |
//! | `chart.error.code == "Not Found"`      | `DataError::SymbolNotFound`  |
//! | 빈 `chart.result`                      | `DataError::SymbolNotFound`  |
//! | 그 외 2xx 이외 상태                    | `DataError::Http`            |
//! | 본문 파싱 실패                         | `DataError::Parse`           |
//! | 연결 실패/타임아웃                     | `DataError::Network`         |
//!
//! # 참고
//!
//! Yahoo는 분봉 데이터를 약 60일까지만 제공합니다. 기간 제한은
//! [`markets_core::TimeframeResolution`]이 요청 전에 적용합니다.

use std::time::Duration;

use async_trait::async_trait;
use markets_core::{ProviderConfig, Quote, RawBars};
use reqwest::{StatusCode, Url};
use serde::Deserialize;
use tracing::debug;

use super::MarketDataProvider;
use crate::error::{DataError, Result};

/// 현재가 조회에 사용하는 기간/간격.
const QUOTE_RANGE: &str = "1d";
const QUOTE_INTERVAL: &str = "1d";

/// 오류 메시지에 포함할 응답 본문 최대 길이.
const MAX_ERROR_BODY: usize = 200;

/// Yahoo 차트 API 클라이언트.
#[derive(Debug, Clone)]
pub struct YahooChartProvider {
    client: reqwest::Client,
    base_url: Url,
}

impl YahooChartProvider {
    /// 설정으로 클라이언트를 생성합니다.
    pub fn new(config: &ProviderConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url).map_err(|e| {
            DataError::ConfigError(format!("invalid base_url '{}': {}", config.base_url, e))
        })?;

        if base_url.cannot_be_a_base() {
            return Err(DataError::ConfigError(format!(
                "base_url cannot be a base: {}",
                config.base_url
            )));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| DataError::ConfigError(format!("HTTP client build failed: {}", e)))?;

        Ok(Self { client, base_url })
    }

    fn chart_url(&self, symbol: &str) -> Url {
        let mut url = self.base_url.clone();
        // new()에서 cannot_be_a_base를 이미 걸렀음
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["v8", "finance", "chart", symbol]);
        }
        url
    }

    /// 차트 API를 호출하고 첫 번째 결과를 반환합니다.
    async fn fetch_chart(&self, symbol: &str, range: &str, interval: &str) -> Result<ChartResult> {
        let url = self.chart_url(symbol);

        debug!(symbol, range, interval, url = %url, "Yahoo chart request");

        let response = self
            .client
            .get(url)
            .query(&[("range", range), ("interval", interval)])
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if status == StatusCode::NOT_FOUND {
            return Err(DataError::SymbolNotFound(symbol.to_string()));
        }

        if !status.is_success() {
            return Err(DataError::Http {
                status: status.as_u16(),
                message: truncate(&body, MAX_ERROR_BODY),
            });
        }

        let envelope: ChartEnvelope = serde_json::from_str(&body)?;

        if let Some(error) = envelope.chart.error {
            return Err(if error.code == "Not Found" {
                DataError::SymbolNotFound(symbol.to_string())
            } else {
                DataError::InvalidData(format!(
                    "{}: {}",
                    error.code,
                    error.description.unwrap_or_default()
                ))
            });
        }

        envelope
            .chart
            .result
            .and_then(|results| results.into_iter().next())
            .ok_or_else(|| DataError::SymbolNotFound(symbol.to_string()))
    }
}

#[async_trait]
impl MarketDataProvider for YahooChartProvider {
    fn name(&self) -> &str {
        "yahoo"
    }

    async fn quote(&self, symbol: &str) -> Result<Quote> {
        let chart = self.fetch_chart(symbol, QUOTE_RANGE, QUOTE_INTERVAL).await?;
        chart.meta.into_quote(symbol)
    }

    async fn history(
        &self,
        symbol: &str,
        provider_range: &str,
        provider_interval: &str,
    ) -> Result<RawBars> {
        let chart = self
            .fetch_chart(symbol, provider_range, provider_interval)
            .await?;
        let bars = chart.into_raw_bars();

        debug!(symbol, bars = bars.len(), "Yahoo chart history loaded");
        Ok(bars)
    }
}

fn truncate(body: &str, max: usize) -> String {
    match body.char_indices().nth(max) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

// ==================== 응답 구조체 ====================

#[derive(Debug, Deserialize)]
struct ChartEnvelope {
    chart: ChartBody,
}

#[derive(Debug, Deserialize)]
struct ChartBody {
    #[serde(default)]
    result: Option<Vec<ChartResult>>,
    #[serde(default)]
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    meta: ChartMeta,
    #[serde(default)]
    timestamp: Option<Vec<i64>>,
    #[serde(default)]
    indicators: Option<ChartIndicators>,
}

impl ChartResult {
    fn into_raw_bars(self) -> RawBars {
        let timestamps = self.timestamp.unwrap_or_default();
        let columns = self
            .indicators
            .and_then(|i| i.quote.into_iter().next())
            .unwrap_or_default();

        RawBars {
            timestamps,
            open: columns.open,
            high: columns.high,
            low: columns.low,
            close: columns.close,
            volume: columns.volume,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChartIndicators {
    #[serde(default)]
    quote: Vec<QuoteColumns>,
}

#[derive(Debug, Default, Deserialize)]
struct QuoteColumns {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<f64>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChartMeta {
    symbol: Option<String>,
    currency: Option<String>,
    long_name: Option<String>,
    short_name: Option<String>,
    regular_market_price: Option<f64>,
    previous_close: Option<f64>,
    chart_previous_close: Option<f64>,
    regular_market_day_high: Option<f64>,
    regular_market_day_low: Option<f64>,
    fifty_two_week_high: Option<f64>,
    fifty_two_week_low: Option<f64>,
    regular_market_volume: Option<f64>,
    regular_market_time: Option<i64>,
}

impl ChartMeta {
    fn into_quote(self, requested: &str) -> Result<Quote> {
        let price = self.regular_market_price.ok_or_else(|| {
            DataError::InvalidData(format!("{}: regularMarketPrice missing", requested))
        })?;

        Ok(Quote {
            symbol: self.symbol.unwrap_or_else(|| requested.to_string()),
            name: self.long_name.or(self.short_name),
            currency: self.currency,
            price,
            previous_close: self.previous_close.or(self.chart_previous_close),
            change: None,
            change_percent: None,
            day_high: self.regular_market_day_high,
            day_low: self.regular_market_day_low,
            fifty_two_week_high: self.fifty_two_week_high,
            fifty_two_week_low: self.fifty_two_week_low,
            volume: self.regular_market_volume,
            market_time: self.regular_market_time,
        }
        .with_change())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider(base_url: &str) -> YahooChartProvider {
        YahooChartProvider::new(&ProviderConfig {
            base_url: base_url.to_string(),
            ..Default::default()
        })
        .unwrap()
    }

    #[test]
    fn test_chart_url_encodes_symbol_segment() {
        let p = provider("https://query1.finance.yahoo.com");
        assert_eq!(
            p.chart_url("SPY").as_str(),
            "https://query1.finance.yahoo.com/v8/finance/chart/SPY"
        );

        let nested = provider("http://localhost:8080/proxy/");
        assert_eq!(
            nested.chart_url("BTC-USD").as_str(),
            "http://localhost:8080/proxy/v8/finance/chart/BTC-USD"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let result = YahooChartProvider::new(&ProviderConfig {
            base_url: "not a url".to_string(),
            ..Default::default()
        });
        assert!(matches!(result, Err(DataError::ConfigError(_))));
    }

    #[test]
    fn test_meta_into_quote() {
        let meta: ChartMeta = serde_json::from_str(
            r#"{"symbol":"SPY","currency":"USD","shortName":"SPDR S&P 500",
                "regularMarketPrice":505.0,"chartPreviousClose":500.0,
                "regularMarketVolume":1000}"#,
        )
        .unwrap();

        let quote = meta.into_quote("SPY").unwrap();
        assert_eq!(quote.name.as_deref(), Some("SPDR S&P 500"));
        assert_eq!(quote.previous_close, Some(500.0));
        assert_eq!(quote.change, Some(5.0));
        assert_eq!(quote.change_percent, Some(1.0));
        assert_eq!(quote.volume, Some(1000.0));
    }

    #[test]
    fn test_meta_without_price() {
        let meta: ChartMeta = serde_json::from_str(r#"{"symbol":"SPY"}"#).unwrap();
        assert!(matches!(
            meta.into_quote("SPY"),
            Err(DataError::InvalidData(_))
        ));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdef", 3), "abc...");
    }
}
