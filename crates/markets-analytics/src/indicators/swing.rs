//! 스윙 포인트 탐지 (SwingPointDetector).
//!
//! 양쪽 `lookback`개 캔들보다 엄격하게 높은 고가를 스윙 고점,
//! 엄격하게 낮은 저가를 스윙 저점으로 분류합니다.
//! 이웃과 값이 같으면 스윙 포인트가 아닙니다.

use markets_core::Candle;
use serde::Serialize;

/// 스윙 포인트 인덱스 목록 (오름차순).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SwingPoints {
    /// 스윙 고점 인덱스
    pub highs: Vec<usize>,
    /// 스윙 저점 인덱스
    pub lows: Vec<usize>,
}

/// 캔들 개수에 맞는 lookback을 계산합니다.
///
/// `max(2, min(5, count / 10))`. 짧은 시퀀스일수록 윈도우가 작아집니다.
pub fn adaptive_lookback(count: usize) -> usize {
    (count / 10).clamp(2, 5)
}

/// 캔들 시퀀스에서 스윙 고점/저점을 찾습니다.
///
/// 양쪽에 `lookback`개 이상의 캔들이 있는 인덱스만 후보가 됩니다.
/// `lookback`이 0이면 빈 결과를 반환합니다.
pub fn detect_swing_points(candles: &[Candle], lookback: usize) -> SwingPoints {
    let mut points = SwingPoints::default();

    if lookback == 0 || candles.len() <= lookback.saturating_mul(2) {
        return points;
    }

    for i in lookback..candles.len() - lookback {
        let current = &candles[i];
        let neighbors = candles[i - lookback..i]
            .iter()
            .chain(&candles[i + 1..=i + lookback]);

        let (mut is_high, mut is_low) = (true, true);
        for other in neighbors {
            is_high &= current.high > other.high;
            is_low &= current.low < other.low;
            if !is_high && !is_low {
                break;
            }
        }

        if is_high {
            points.highs.push(i);
        }
        if is_low {
            points.lows.push(i);
        }
    }

    points
}
