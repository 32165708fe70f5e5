//! 조회 기간(range)과 캔들 간격(interval) 정의.
//!
//! 사용자가 요청한 `(range, interval)` 쌍을 데이터 제공자가 이해하는
//! `(range, interval)` 쌍으로 변환합니다.
//!
//! # 변환 규칙
//!
//! - 간격: `30m→30m`, `1h→1h`, `4h→1h` (합성), `1d→1d`, `1w→1wk`
//! - 기간: 지원 목록은 그대로 전달, 알 수 없는 값은 `3mo`
//! - 분봉/시간봉 제한: 제공자 간격이 `30m`/`1h`이고 기간이
//!   `6mo` 이상이면 제공자 기간을 `60d`로 고정
//!
//! 모든 입력은 어떤 출력으로든 매핑되며 에러가 발생하지 않습니다.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 분봉/시간봉 데이터의 제공자 보관 한도.
pub const INTRADAY_RANGE_CAP: &str = "60d";

/// 사용자 조회 기간.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeRange {
    /// 1일
    #[serde(rename = "1d")]
    D1,
    /// 5일
    #[serde(rename = "5d")]
    D5,
    /// 1개월
    #[serde(rename = "1mo")]
    Mo1,
    /// 3개월
    #[serde(rename = "3mo")]
    Mo3,
    /// 6개월
    #[serde(rename = "6mo")]
    Mo6,
    /// 1년
    #[serde(rename = "1y")]
    Y1,
    /// 3년
    #[serde(rename = "3y")]
    Y3,
    /// 5년
    #[serde(rename = "5y")]
    Y5,
    /// 10년
    #[serde(rename = "10y")]
    Y10,
}

impl Default for TimeRange {
    fn default() -> Self {
        TimeRange::Mo3
    }
}

impl TimeRange {
    /// 문자열 표현을 반환합니다.
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeRange::D1 => "1d",
            TimeRange::D5 => "5d",
            TimeRange::Mo1 => "1mo",
            TimeRange::Mo3 => "3mo",
            TimeRange::Mo6 => "6mo",
            TimeRange::Y1 => "1y",
            TimeRange::Y3 => "3y",
            TimeRange::Y5 => "5y",
            TimeRange::Y10 => "10y",
        }
    }

    /// 정확히 일치하는 문자열만 파싱합니다.
    pub fn from_range_str(s: &str) -> Option<Self> {
        match s {
            "1d" => Some(TimeRange::D1),
            "5d" => Some(TimeRange::D5),
            "1mo" => Some(TimeRange::Mo1),
            "3mo" => Some(TimeRange::Mo3),
            "6mo" => Some(TimeRange::Mo6),
            "1y" => Some(TimeRange::Y1),
            "3y" => Some(TimeRange::Y3),
            "5y" => Some(TimeRange::Y5),
            "10y" => Some(TimeRange::Y10),
            _ => None,
        }
    }

    /// 문자열을 파싱하며, 알 수 없는 값은 기본값(`3mo`)으로 대체합니다.
    pub fn parse(s: &str) -> Self {
        Self::from_range_str(s.trim()).unwrap_or_default()
    }

    /// 분봉/시간봉 보관 한도를 넘는 장기 기간인지 확인합니다.
    pub fn exceeds_intraday_history(&self) -> bool {
        matches!(
            self,
            TimeRange::Mo6 | TimeRange::Y1 | TimeRange::Y3 | TimeRange::Y5 | TimeRange::Y10
        )
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_range_str(s).ok_or_else(|| format!("Invalid range: {}", s))
    }
}

/// 사용자 캔들 간격.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChartInterval {
    /// 30분봉
    #[serde(rename = "30m")]
    M30,
    /// 1시간봉
    #[serde(rename = "1h")]
    H1,
    /// 4시간봉 (1시간봉 합성)
    #[serde(rename = "4h")]
    H4,
    /// 일봉
    #[serde(rename = "1d")]
    D1,
    /// 주봉
    #[serde(rename = "1w")]
    W1,
}

impl Default for ChartInterval {
    fn default() -> Self {
        ChartInterval::D1
    }
}

impl ChartInterval {
    /// 문자열 표현을 반환합니다.
    pub fn as_str(&self) -> &'static str {
        match self {
            ChartInterval::M30 => "30m",
            ChartInterval::H1 => "1h",
            ChartInterval::H4 => "4h",
            ChartInterval::D1 => "1d",
            ChartInterval::W1 => "1w",
        }
    }

    /// 정확히 일치하는 문자열만 파싱합니다.
    pub fn from_interval_str(s: &str) -> Option<Self> {
        match s {
            "30m" => Some(ChartInterval::M30),
            "1h" => Some(ChartInterval::H1),
            "4h" => Some(ChartInterval::H4),
            "1d" => Some(ChartInterval::D1),
            "1w" => Some(ChartInterval::W1),
            _ => None,
        }
    }

    /// 문자열을 파싱하며, 알 수 없는 값은 기본값(`1d`)으로 대체합니다.
    pub fn parse(s: &str) -> Self {
        Self::from_interval_str(s.trim()).unwrap_or_default()
    }

    /// 데이터 제공자 간격 문자열로 변환합니다.
    ///
    /// 제공자는 4시간봉이 없으므로 1시간봉을 받아 합성합니다.
    pub fn provider_interval(&self) -> &'static str {
        match self {
            ChartInterval::M30 => "30m",
            ChartInterval::H1 => "1h",
            ChartInterval::H4 => "1h",
            ChartInterval::D1 => "1d",
            ChartInterval::W1 => "1wk",
        }
    }

    /// 제공자 캔들을 묶어 합성해야 하는 간격인지 확인합니다.
    pub fn is_synthetic(&self) -> bool {
        matches!(self, ChartInterval::H4)
    }

    /// 합성 시 하나의 캔들로 묶을 제공자 캔들 수.
    pub fn bucket_size(&self) -> usize {
        match self {
            ChartInterval::H4 => 4,
            _ => 1,
        }
    }

    /// 제공자 간격이 분봉/시간봉인지 확인합니다.
    pub fn is_intraday(&self) -> bool {
        matches!(self.provider_interval(), "30m" | "1h")
    }
}

impl fmt::Display for ChartInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChartInterval {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_interval_str(s).ok_or_else(|| format!("Invalid interval: {}", s))
    }
}

/// 사용자 요청과 그에 대응하는 제공자 요청.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeframeResolution {
    /// 해석된 사용자 조회 기간
    pub range: TimeRange,
    /// 해석된 사용자 캔들 간격
    pub interval: ChartInterval,
    /// 제공자에 전달할 기간
    pub provider_range: &'static str,
    /// 제공자에 전달할 간격
    pub provider_interval: &'static str,
}

impl TimeframeResolution {
    /// 사용자 문자열 쌍을 해석합니다.
    ///
    /// 알 수 없는 기간은 `3mo`, 알 수 없는 간격은 `1d`로 대체됩니다.
    pub fn resolve(range: &str, interval: &str) -> Self {
        Self::from_parts(TimeRange::parse(range), ChartInterval::parse(interval))
    }

    /// 이미 해석된 enum 쌍에서 제공자 요청을 계산합니다.
    pub fn from_parts(range: TimeRange, interval: ChartInterval) -> Self {
        // 간격을 먼저 해석한 뒤 분봉 제한이 기간 테이블을 덮어씀
        let provider_range = if interval.is_intraday() && range.exceeds_intraday_history() {
            INTRADAY_RANGE_CAP
        } else {
            range.as_str()
        };

        Self {
            range,
            interval,
            provider_range,
            provider_interval: interval.provider_interval(),
        }
    }

    /// 제공자 캔들을 합성해야 하는지 확인합니다.
    pub fn is_synthetic(&self) -> bool {
        self.interval.is_synthetic()
    }
}
