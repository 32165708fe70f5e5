//! 단순 이동평균 (MovingAverageEngine).
//!
//! SMA = (C1 + C2 + ... + Cn) / n
//!
//! 윈도우가 채워지기 전 구간은 `None`으로 남기며, 결과 시퀀스 길이는
//! 항상 입력 캔들 수와 같습니다.

use markets_core::Candle;
use serde::{Deserialize, Serialize};

use super::{IndicatorError, IndicatorResult};

/// 기본 이동평균 기간.
pub const DEFAULT_MA_PERIODS: [usize; 4] = [5, 20, 50, 100];

/// 이동평균 파라미터.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MovingAverageParams {
    /// 이동평균 기간.
    pub period: usize,
}

impl Default for MovingAverageParams {
    fn default() -> Self {
        Self { period: 20 }
    }
}

/// 종가 시퀀스의 단순 이동평균을 계산합니다.
///
/// # 인자
/// * `closes` - 종가 데이터
/// * `params` - 이동평균 파라미터
///
/// # 반환
/// 각 시점의 SMA 값 (처음 period-1개는 None)
pub fn sma(closes: &[f64], params: MovingAverageParams) -> IndicatorResult<Vec<Option<f64>>> {
    let period = params.period;

    if period == 0 {
        return Err(IndicatorError::InvalidParameter(
            "기간은 0보다 커야 합니다".to_string(),
        ));
    }

    let mut result = Vec::with_capacity(closes.len());
    let period_f = period as f64;

    for i in 0..closes.len() {
        if i + 1 < period {
            result.push(None);
        } else {
            let sum: f64 = closes[i + 1 - period..=i].iter().sum();
            result.push(Some(sum / period_f));
        }
    }

    Ok(result)
}

/// 단일 기간의 이동평균 결과.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovingAverageResult {
    /// 기간
    pub period: usize,
    /// 가장 최근 값 (캔들 수가 기간보다 적으면 null)
    pub latest: Option<f64>,
    /// 캔들별 값
    pub series: Vec<Option<f64>>,
}

impl MovingAverageResult {
    /// 캔들 종가로 계산합니다.
    pub fn compute(candles: &[Candle], period: usize) -> IndicatorResult<Self> {
        let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
        let series = sma(&closes, MovingAverageParams { period })?;

        Ok(Self {
            period,
            latest: series.last().copied().flatten(),
            series,
        })
    }
}

/// 5/20/50/100 기간 이동평균 묶음.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovingAverageSet {
    pub ma5: MovingAverageResult,
    pub ma20: MovingAverageResult,
    pub ma50: MovingAverageResult,
    pub ma100: MovingAverageResult,
}

impl MovingAverageSet {
    /// 기본 기간으로 모든 이동평균을 계산합니다.
    pub fn compute(candles: &[Candle]) -> Self {
        let [ma5, ma20, ma50, ma100] = DEFAULT_MA_PERIODS.map(|period| {
            MovingAverageResult::compute(candles, period).unwrap_or_else(|_| {
                // 기본 기간은 모두 0보다 큼
                MovingAverageResult {
                    period,
                    latest: None,
                    series: vec![None; candles.len()],
                }
            })
        });

        Self {
            ma5,
            ma20,
            ma50,
            ma100,
        }
    }

    /// 기간 순서대로 순회합니다.
    pub fn iter(&self) -> impl Iterator<Item = &MovingAverageResult> {
        [&self.ma5, &self.ma20, &self.ma50, &self.ma100].into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candles(closes: &[f64]) -> Vec<Candle> {
        closes
            .iter()
            .enumerate()
            .map(|(i, &c)| Candle::new(i as i64, c, c, c, c, 0.0))
            .collect()
    }

    #[test]
    fn test_sma_calculation() {
        let closes = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let result = sma(&closes, MovingAverageParams { period: 3 }).unwrap();

        assert_eq!(result.len(), 6);
        assert_eq!(result[0], None);
        assert_eq!(result[1], None);
        assert_eq!(result[2], Some(2.0));
        assert_eq!(result[5], Some(5.0));
    }

    #[test]
    fn test_sma_zero_period() {
        let result = sma(&[1.0, 2.0], MovingAverageParams { period: 0 });
        assert!(matches!(result, Err(IndicatorError::InvalidParameter(_))));
    }

    #[test]
    fn test_short_input_has_null_latest() {
        let result = MovingAverageResult::compute(&candles(&[1.0, 2.0, 3.0]), 5).unwrap();
        assert_eq!(result.series, vec![None, None, None]);
        assert_eq!(result.latest, None);
    }

    #[test]
    fn test_default_set() {
        let closes: Vec<f64> = (1..=30).map(|v| v as f64).collect();
        let set = MovingAverageSet::compute(&candles(&closes));

        assert_eq!(set.ma5.latest, Some(28.0));
        assert_eq!(set.ma20.latest, Some(20.5));
        assert_eq!(set.ma50.latest, None);
        assert_eq!(set.ma100.series.len(), 30);

        let periods: Vec<usize> = set.iter().map(|r| r.period).collect();
        assert_eq!(periods, DEFAULT_MA_PERIODS.to_vec());
    }

    #[test]
    fn test_empty_input() {
        let set = MovingAverageSet::compute(&[]);
        assert!(set.iter().all(|r| r.series.is_empty() && r.latest.is_none()));
    }
}
