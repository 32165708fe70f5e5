//! 데이터 Provider 모듈.
//!
//! 현재가 스냅샷과 과거 시세(원시 바)를 가져오는 외부 협력자를 정의합니다.
//!
//! ## Yahoo 차트 API
//! - `YahooChartProvider`: `/v8/finance/chart/{symbol}` 엔드포인트 클라이언트
//! - `meta` 블록에서 현재가, `indicators.quote[0]`에서 OHLCV 컬럼

pub mod yahoo;

use async_trait::async_trait;
use markets_core::{Quote, RawBars};

use crate::error::Result;

pub use yahoo::YahooChartProvider;

/// 시세 데이터 제공자.
///
/// 구현체는 여러 심볼 조회에서 동시에 공유되므로 `Send + Sync`여야 합니다.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// 제공자 이름 (로그용).
    fn name(&self) -> &str;

    /// 현재가 스냅샷을 조회합니다.
    async fn quote(&self, symbol: &str) -> Result<Quote>;

    /// 과거 시세를 제공자 기준 기간/간격으로 조회합니다.
    ///
    /// # 인자
    /// * `symbol` - 심볼 (예: "SPY")
    /// * `provider_range` - 제공자 기간 문자열 (예: "3mo", "60d")
    /// * `provider_interval` - 제공자 간격 문자열 (예: "1d", "1wk")
    async fn history(
        &self,
        symbol: &str,
        provider_range: &str,
        provider_interval: &str,
    ) -> Result<RawBars>;
}
