//! 캔들 정규화 (CandleNormalizer).
//!
//! 제공자의 원시 컬럼 데이터를 검증해 시간순 [`Candle`] 시퀀스로 변환하고,
//! 제공자가 직접 지원하지 않는 간격(4시간봉)은 더 짧은 간격을 묶어 합성합니다.
//!
//! # 검증 규칙
//!
//! 다음 바는 보정 없이 버립니다:
//! - OHLC 중 하나라도 없는 바
//! - 유한하지 않은 값이 있는 바
//! - `high ≥ max(open, close)`, `low ≤ min(open, close)`를 어긴 바
//! - 거래량이 음수인 바
//! - 직전에 채택된 바보다 시각이 늦지 않은 바 (중복/역순)
//!
//! 거래량이 없으면 0으로 읽습니다.
//!
//! # 합성 규칙
//!
//! - **Open**: 묶음 첫 캔들의 시가
//! - **High**: 묶음 최고가
//! - **Low**: 묶음 최저가
//! - **Close**: 묶음 마지막 캔들의 종가
//! - **Volume**: 묶음 거래량 합계
//! - **Time**: 묶음 첫 캔들의 시각
//!
//! 마지막 묶음은 개수가 모자라도 버리지 않습니다.

use markets_core::{Candle, ChartInterval, RawBar, RawBars};
use tracing::debug;

/// 원시 바를 검증하고 요청 간격에 맞게 정규화합니다.
///
/// # 인자
/// * `raw` - 제공자 응답 (제공자 간격 기준)
/// * `interval` - 사용자가 요청한 간격
///
/// # 반환
/// 시간 오름차순 캔들 목록 (입력 순서 유지, 재정렬 없음)
pub fn normalize(raw: &RawBars, interval: ChartInterval) -> Vec<Candle> {
    let mut candles: Vec<Candle> = Vec::with_capacity(raw.len());
    let mut dropped = 0usize;

    for bar in raw.iter() {
        let Some(candle) = to_candle(&bar) else {
            dropped += 1;
            continue;
        };

        if let Some(prev) = candles.last() {
            if candle.time <= prev.time {
                dropped += 1;
                continue;
            }
        }

        candles.push(candle);
    }

    if dropped > 0 {
        debug!(
            total = raw.len(),
            dropped,
            kept = candles.len(),
            "Dropped malformed provider bars"
        );
    }

    if interval.is_synthetic() {
        aggregate_candles(&candles, interval.bucket_size())
    } else {
        candles
    }
}

/// 원시 바 하나를 캔들로 변환합니다. 형식이 잘못되었으면 `None`.
fn to_candle(bar: &RawBar) -> Option<Candle> {
    let candle = Candle::new(
        bar.time,
        bar.open?,
        bar.high?,
        bar.low?,
        bar.close?,
        bar.volume.unwrap_or(0.0),
    );

    candle.is_consistent().then_some(candle)
}

/// 연속된 캔들을 `bucket`개씩 묶어 합성 캔들을 만듭니다.
///
/// `bucket`이 0 또는 1이면 입력을 그대로 반환합니다.
pub fn aggregate_candles(candles: &[Candle], bucket: usize) -> Vec<Candle> {
    if bucket <= 1 {
        return candles.to_vec();
    }

    candles.chunks(bucket).filter_map(merge_chunk).collect()
}

/// 하나의 묶음을 합성 캔들로 병합합니다.
fn merge_chunk(chunk: &[Candle]) -> Option<Candle> {
    let first = chunk.first()?;
    let last = chunk.last()?;

    let high = chunk.iter().map(|c| c.high).fold(f64::MIN, f64::max);
    let low = chunk.iter().map(|c| c.low).fold(f64::MAX, f64::min);
    let volume: f64 = chunk.iter().map(|c| c.volume).sum();

    Some(Candle {
        time: first.time,
        open: first.open,
        high,
        low,
        close: last.close,
        volume,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_from(rows: &[(i64, Option<f64>, Option<f64>, Option<f64>, Option<f64>, Option<f64>)]) -> RawBars {
        RawBars {
            timestamps: rows.iter().map(|r| r.0).collect(),
            open: rows.iter().map(|r| r.1).collect(),
            high: rows.iter().map(|r| r.2).collect(),
            low: rows.iter().map(|r| r.3).collect(),
            close: rows.iter().map(|r| r.4).collect(),
            volume: rows.iter().map(|r| r.5).collect(),
        }
    }

    fn hourly(count: usize) -> Vec<Candle> {
        (0..count)
            .map(|i| {
                let base = 100.0 + i as f64;
                Candle::new(i as i64 * 3600, base, base + 2.0, base - 1.0, base + 1.0, 10.0)
            })
            .collect()
    }

    #[test]
    fn test_drops_bars_missing_ohlc() {
        let raw = raw_from(&[
            (1, Some(10.0), Some(11.0), Some(9.0), Some(10.5), Some(100.0)),
            (2, None, Some(11.0), Some(9.0), Some(10.5), Some(100.0)),
            (3, Some(10.0), Some(11.0), Some(9.0), None, Some(100.0)),
            (4, Some(10.0), Some(12.0), Some(9.5), Some(11.0), None),
        ]);

        let candles = normalize(&raw, ChartInterval::D1);
        assert_eq!(candles.len(), 2);
        assert_eq!(candles[0].time, 1);
        assert_eq!(candles[1].time, 4);
        // 거래량 누락은 0으로 읽음
        assert_eq!(candles[1].volume, 0.0);
    }

    #[test]
    fn test_drops_inconsistent_and_duplicate_bars() {
        let raw = raw_from(&[
            (1, Some(10.0), Some(11.0), Some(9.0), Some(10.5), Some(1.0)),
            // 고가 < 종가
            (2, Some(10.0), Some(10.1), Some(9.0), Some(10.5), Some(1.0)),
            // 중복 시각
            (1, Some(10.0), Some(11.0), Some(9.0), Some(10.5), Some(1.0)),
            (3, Some(10.0), Some(11.0), Some(9.0), Some(10.5), Some(1.0)),
        ]);

        let times: Vec<i64> = normalize(&raw, ChartInterval::H1)
            .iter()
            .map(|c| c.time)
            .collect();
        assert_eq!(times, vec![1, 3]);
    }

    #[test]
    fn test_synthetic_four_hour_buckets() {
        let candles = hourly(10);
        let merged = aggregate_candles(&candles, 4);

        // 4 + 4 + 2 (마지막 묶음도 유지)
        assert_eq!(merged.len(), 3);

        let first = merged[0];
        assert_eq!(first.time, 0);
        assert_eq!(first.open, candles[0].open);
        assert_eq!(first.close, candles[3].close);
        assert_eq!(first.high, candles[3].high);
        assert_eq!(first.low, candles[0].low);
        assert_eq!(first.volume, 40.0);

        let tail = merged[2];
        assert_eq!(tail.time, candles[8].time);
        assert_eq!(tail.close, candles[9].close);
        assert_eq!(tail.volume, 20.0);
    }

    #[test]
    fn test_normalize_4h_aggregates_hourly_input() {
        let rows: Vec<_> = hourly(8)
            .iter()
            .map(|c| (c.time, Some(c.open), Some(c.high), Some(c.low), Some(c.close), Some(c.volume)))
            .collect();
        let raw = raw_from(&rows);

        assert_eq!(normalize(&raw, ChartInterval::H4).len(), 2);
        assert_eq!(normalize(&raw, ChartInterval::H1).len(), 8);
    }

    #[test]
    fn test_aggregate_passthrough_and_empty() {
        let candles = hourly(3);
        assert_eq!(aggregate_candles(&candles, 1), candles);
        assert_eq!(aggregate_candles(&candles, 0), candles);
        assert!(aggregate_candles(&[], 4).is_empty());
    }
}
