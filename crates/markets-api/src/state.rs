//! 모든 핸들러에서 공유되는 애플리케이션 상태.
//!
//! AppState는 Arc로 래핑되어 여러 요청 간에 안전하게 공유됩니다.
//! 분석 계산은 요청마다 새로 수행되므로 요청 간 가변 상태는 없습니다.

use std::sync::Arc;

use markets_core::MarketsConfig;
use markets_data::MarketDataProvider;

use crate::services::QuoteAssembler;

/// 애플리케이션 공유 상태.
#[derive(Clone)]
pub struct AppState {
    /// 시세 조회 + 분석 서비스
    pub assembler: Arc<QuoteAssembler>,

    /// 서버 시작 시간
    pub started_at: chrono::DateTime<chrono::Utc>,

    /// API 버전
    pub version: String,
}

impl AppState {
    /// 새로운 AppState 생성.
    ///
    /// # 인자
    /// * `provider` - 시세 데이터 제공자
    /// * `markets` - 관심 종목 및 표시 설정
    pub fn new(provider: Arc<dyn MarketDataProvider>, markets: MarketsConfig) -> Self {
        Self {
            assembler: Arc::new(QuoteAssembler::new(provider, markets)),
            started_at: chrono::Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// 서버 업타임(초).
    pub fn uptime_secs(&self) -> i64 {
        chrono::Utc::now()
            .signed_duration_since(self.started_at)
            .num_seconds()
    }
}

#[cfg(any(test, feature = "test-utils"))]
pub use mock::{create_test_state, create_test_state_with, MockProvider};

#[cfg(any(test, feature = "test-utils"))]
mod mock {
    use std::collections::{HashMap, HashSet};
    use std::sync::Arc;

    use async_trait::async_trait;
    use markets_core::{MarketsConfig, Quote, RawBars};
    use markets_data::{DataError, MarketDataProvider};

    use super::AppState;

    /// 테스트용 메모리 제공자.
    ///
    /// 등록되지 않은 심볼은 `SymbolNotFound`, 실패로 표시한 심볼은
    /// `Network` 오류를 돌려줍니다.
    #[derive(Debug, Default)]
    pub struct MockProvider {
        quotes: HashMap<String, Quote>,
        history: HashMap<String, RawBars>,
        failing: HashSet<String>,
        failing_history: HashSet<String>,
    }

    impl MockProvider {
        pub fn new() -> Self {
            Self::default()
        }

        /// 현재가와 과거 시세를 등록합니다.
        pub fn with_symbol(mut self, quote: Quote, bars: RawBars) -> Self {
            self.history.insert(quote.symbol.clone(), bars);
            self.quotes.insert(quote.symbol.clone(), quote);
            self
        }

        /// 모든 조회가 네트워크 오류로 실패하는 심볼을 등록합니다.
        pub fn with_failure(mut self, symbol: &str) -> Self {
            self.failing.insert(symbol.to_string());
            self
        }

        /// 과거 시세 조회만 실패하는 심볼을 등록합니다.
        pub fn with_history_failure(mut self, symbol: &str) -> Self {
            self.failing_history.insert(symbol.to_string());
            self
        }

        fn check(&self, symbol: &str) -> Result<(), DataError> {
            if self.failing.contains(symbol) {
                return Err(DataError::Network(format!("{}: connection reset", symbol)));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl MarketDataProvider for MockProvider {
        fn name(&self) -> &str {
            "mock"
        }

        async fn quote(&self, symbol: &str) -> Result<Quote, DataError> {
            self.check(symbol)?;
            self.quotes
                .get(symbol)
                .cloned()
                .ok_or_else(|| DataError::SymbolNotFound(symbol.to_string()))
        }

        async fn history(
            &self,
            symbol: &str,
            _provider_range: &str,
            _provider_interval: &str,
        ) -> Result<RawBars, DataError> {
            self.check(symbol)?;
            if self.failing_history.contains(symbol) {
                return Err(DataError::Http {
                    status: 503,
                    message: "unavailable".to_string(),
                });
            }
            self.history
                .get(symbol)
                .cloned()
                .ok_or_else(|| DataError::SymbolNotFound(symbol.to_string()))
        }
    }

    /// 빈 제공자를 사용하는 테스트용 AppState.
    pub fn create_test_state() -> AppState {
        create_test_state_with(MockProvider::new(), MarketsConfig::default())
    }

    /// 지정한 제공자와 설정으로 테스트용 AppState를 생성합니다.
    pub fn create_test_state_with(provider: MockProvider, markets: MarketsConfig) -> AppState {
        AppState::new(Arc::new(provider), markets)
    }
}
