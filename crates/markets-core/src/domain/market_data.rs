//! 시장 데이터 구조체.
//!
//! - [`Candle`]: 정규화된 OHLCV 캔들 (요청마다 새로 생성, 이후 불변)
//! - [`RawBars`]: 데이터 제공자가 돌려주는 인덱스 정렬 컬럼 데이터
//! - [`Quote`]: 현재가 스냅샷

use serde::{Deserialize, Serialize};

use crate::types::{round_price, round_to};

/// 하나의 OHLCV 관측값.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    /// 캔들 시작 시각 (Unix 초)
    pub time: i64,
    /// 시가
    pub open: f64,
    /// 고가
    pub high: f64,
    /// 저가
    pub low: f64,
    /// 종가
    pub close: f64,
    /// 거래량
    pub volume: f64,
}

impl Candle {
    /// 새 캔들을 생성합니다.
    pub fn new(time: i64, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Self {
        Self {
            time,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// OHLC 불변식을 만족하는지 확인합니다.
    ///
    /// `high ≥ max(open, close)`, `low ≤ min(open, close)`, 모든 가격이 유한값,
    /// 거래량은 0 이상이어야 합니다.
    pub fn is_consistent(&self) -> bool {
        let finite = [self.open, self.high, self.low, self.close, self.volume]
            .iter()
            .all(|v| v.is_finite());

        finite
            && self.high >= self.open.max(self.close)
            && self.low <= self.open.min(self.close)
            && self.volume >= 0.0
    }
}

/// 제공자의 과거 시세 응답 (인덱스 정렬 컬럼).
///
/// 각 컬럼의 `i`번째 값은 `timestamps[i]` 시점의 값입니다.
/// 제공자는 거래가 없던 구간을 `null`로 채우므로 모든 값이 `Option`입니다.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawBars {
    /// 캔들 시작 시각 (Unix 초)
    pub timestamps: Vec<i64>,
    /// 시가
    pub open: Vec<Option<f64>>,
    /// 고가
    pub high: Vec<Option<f64>>,
    /// 저가
    pub low: Vec<Option<f64>>,
    /// 종가
    pub close: Vec<Option<f64>>,
    /// 거래량
    pub volume: Vec<Option<f64>>,
}

impl RawBars {
    /// 타임스탬프 개수.
    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    /// 데이터가 없는지 확인합니다.
    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// `i`번째 바의 컬럼 값을 읽습니다.
    ///
    /// 컬럼 길이가 짧으면 해당 값은 `None`입니다.
    pub fn bar(&self, i: usize) -> Option<RawBar> {
        let time = *self.timestamps.get(i)?;
        let column = |c: &Vec<Option<f64>>| c.get(i).copied().flatten();

        Some(RawBar {
            time,
            open: column(&self.open),
            high: column(&self.high),
            low: column(&self.low),
            close: column(&self.close),
            volume: column(&self.volume),
        })
    }

    /// 모든 바를 순서대로 순회합니다.
    pub fn iter(&self) -> impl Iterator<Item = RawBar> + '_ {
        (0..self.len()).filter_map(move |i| self.bar(i))
    }
}

/// 검증 전 단일 바.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawBar {
    pub time: i64,
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub close: Option<f64>,
    pub volume: Option<f64>,
}

/// 현재가 스냅샷.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    /// 심볼
    pub symbol: String,
    /// 종목명
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// 통화
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    /// 현재가
    pub price: f64,
    /// 전일 종가
    pub previous_close: Option<f64>,
    /// 전일 대비
    pub change: Option<f64>,
    /// 전일 대비 (%)
    pub change_percent: Option<f64>,
    /// 당일 고가
    pub day_high: Option<f64>,
    /// 당일 저가
    pub day_low: Option<f64>,
    /// 52주 최고가
    pub fifty_two_week_high: Option<f64>,
    /// 52주 최저가
    pub fifty_two_week_low: Option<f64>,
    /// 당일 거래량
    pub volume: Option<f64>,
    /// 시세 시각 (Unix 초)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub market_time: Option<i64>,
}

impl Quote {
    /// 현재가와 전일 종가로 등락폭과 등락률을 채웁니다.
    ///
    /// 전일 종가가 없거나 0이면 등락 값은 `None`으로 남습니다.
    #[must_use]
    pub fn with_change(mut self) -> Self {
        match self.previous_close {
            Some(prev) if prev != 0.0 && prev.is_finite() => {
                let change = self.price - prev;
                self.change = Some(round_price(change));
                self.change_percent = Some(round_to(change / prev * 100.0, 2));
            }
            _ => {
                self.change = None;
                self.change_percent = None;
            }
        }
        self
    }
}
