//! 시세 조회와 분석 결과 병합 (QuoteAssembler).
//!
//! # 단일 심볼 모드
//!
//! 현재가와 과거 시세를 동시에 조회(`tokio::join!`)한 뒤 캔들을 정규화하고
//! 피보나치/이동평균을 계산합니다. 어느 한쪽이라도 실패하면 요청 전체가 실패합니다.
//!
//! # 개요 모드
//!
//! 관심 종목마다 독립적인 조회를 `join_all`로 동시에 실행합니다.
//! 한 심볼의 실패는 다른 심볼에 영향을 주지 않습니다:
//! - 현재가 조회 실패: 해당 심볼 생략
//! - 과거 시세 조회 실패: 빈 캔들로 계산 (피보나치는 빈 결과)

use std::sync::Arc;

use chrono::{DateTime, Utc};
use futures::future::join_all;
use markets_analytics::{normalize, FibonacciLevels, MarketAnalyzer, MovingAverageSet};
use markets_core::{
    market_span, Candle, ChartInterval, MarketsConfig, Quote, TimeRange, TimeframeResolution,
};
use markets_data::{DataError, MarketDataProvider};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn, Instrument};
use utoipa::ToSchema;

use crate::metrics::{record_fibonacci_path, record_provider_failure};

/// 단일 심볼 분석 응답.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SymbolAnalysisResponse {
    /// 현재가 스냅샷
    #[schema(value_type = Object)]
    pub quote: Quote,
    /// 분석에 사용한 정규화 캔들
    #[schema(value_type = Vec<Object>)]
    pub candles: Vec<Candle>,
    /// 피보나치 레벨
    #[schema(value_type = Object)]
    pub fibonacci: FibonacciLevels,
    /// 5/20/50/100 이동평균
    #[schema(value_type = Object)]
    pub moving_averages: MovingAverageSet,
    /// 조회 기간 (예: "3mo")
    #[schema(value_type = String, example = "3mo")]
    pub range: TimeRange,
    /// 캔들 간격 (예: "1d")
    #[schema(value_type = String, example = "1d")]
    pub interval: ChartInterval,
    /// 응답 생성 시각
    pub updated_at: DateTime<Utc>,
}

/// 개요 모드의 심볼별 항목.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SymbolOverview {
    /// 심볼
    pub symbol: String,
    /// 현재가 스냅샷
    #[schema(value_type = Object)]
    pub quote: Quote,
    /// 피보나치 레벨
    #[schema(value_type = Object)]
    pub fibonacci: FibonacciLevels,
}

/// 시장 개요 응답.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OverviewResponse {
    /// 관심 종목 순서대로 정렬된 심볼 목록 (실패한 심볼 제외)
    pub symbols: Vec<SymbolOverview>,
    /// 응답 생성 시각
    pub updated_at: DateTime<Utc>,
}

/// 시세 조회와 분석을 조합하는 서비스.
pub struct QuoteAssembler {
    provider: Arc<dyn MarketDataProvider>,
    analyzer: MarketAnalyzer,
    markets: MarketsConfig,
}

impl QuoteAssembler {
    /// 새 QuoteAssembler 생성.
    ///
    /// 스윙 날짜 표시 타임존은 `markets.display_timezone`을 따릅니다.
    pub fn new(provider: Arc<dyn MarketDataProvider>, markets: MarketsConfig) -> Self {
        let analyzer = MarketAnalyzer::new(markets.timezone());
        Self {
            provider,
            analyzer,
            markets,
        }
    }

    /// 제공자 이름.
    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// 관심 종목 목록.
    pub fn watch_list(&self) -> &[String] {
        &self.markets.watch_list
    }

    /// 단일 심볼을 조회하고 분석합니다.
    pub async fn single(
        &self,
        symbol: &str,
        resolution: TimeframeResolution,
    ) -> Result<SymbolAnalysisResponse, DataError> {
        let span = market_span!("single_symbol", symbol, resolution.interval);

        async {
            let (quote, bars) = tokio::join!(
                self.provider.quote(symbol),
                self.provider.history(
                    symbol,
                    resolution.provider_range,
                    resolution.provider_interval
                ),
            );

            let quote = quote.inspect_err(|e| record_provider_failure(e.kind()))?;
            let bars = bars.inspect_err(|e| record_provider_failure(e.kind()))?;

            let candles = normalize(&bars, resolution.interval);
            let (analysis, path) = self.analyzer.analyze_with_path(&candles);
            record_fibonacci_path(path.as_str());

            debug!(
                provider_range = resolution.provider_range,
                provider_interval = resolution.provider_interval,
                candles = candles.len(),
                "Symbol analysis assembled"
            );

            Ok(SymbolAnalysisResponse {
                quote,
                candles,
                fibonacci: analysis.fibonacci,
                moving_averages: analysis.moving_averages,
                range: resolution.range,
                interval: resolution.interval,
                updated_at: Utc::now(),
            })
        }
        .instrument(span)
        .await
    }

    /// 관심 종목 전체의 개요를 조회합니다.
    pub async fn overview(&self) -> OverviewResponse {
        let resolution = TimeframeResolution::resolve(
            &self.markets.overview_range,
            &self.markets.overview_interval,
        );

        let results = join_all(
            self.markets
                .watch_list
                .iter()
                .map(|symbol| self.overview_entry(symbol, resolution)),
        )
        .await;

        let total = results.len();
        let symbols: Vec<SymbolOverview> = results
            .into_iter()
            .zip(&self.markets.watch_list)
            .filter_map(|(result, symbol)| match result {
                Ok(entry) => Some(entry),
                Err(e) => {
                    warn!(symbol = %symbol, error = %e, "Overview symbol omitted");
                    None
                }
            })
            .collect();

        debug!(total, returned = symbols.len(), "Market overview assembled");

        OverviewResponse {
            symbols,
            updated_at: Utc::now(),
        }
    }

    /// 개요 모드의 심볼 하나를 조회합니다.
    async fn overview_entry(
        &self,
        symbol: &str,
        resolution: TimeframeResolution,
    ) -> Result<SymbolOverview, DataError> {
        let (quote, bars) = tokio::join!(
            self.provider.quote(symbol),
            self.provider.history(
                symbol,
                resolution.provider_range,
                resolution.provider_interval
            ),
        );

        let quote = quote.inspect_err(|e| record_provider_failure(e.kind()))?;

        let candles = match bars {
            Ok(bars) => normalize(&bars, resolution.interval),
            Err(e) => {
                record_provider_failure(e.kind());
                warn!(symbol, error = %e, "History unavailable, using empty candles");
                Vec::new()
            }
        };

        let outcome = self.analyzer.fibonacci_engine().evaluate(&candles);
        record_fibonacci_path(outcome.path.as_str());

        Ok(SymbolOverview {
            symbol: symbol.to_string(),
            quote,
            fibonacci: outcome.levels,
        })
    }
}
