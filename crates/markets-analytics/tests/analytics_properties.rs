//! 분석 엔진 속성 테스트
//!
//! 임의의 캔들 입력에 대해 합성, 피보나치, 이동평균 불변식을 확인합니다.

use markets_analytics::{
    aggregate_candles, detect_swing_points, FibonacciEngine, FibonacciLevels, MovingAverageResult,
    Trend,
};
use markets_core::{round_price, Candle};
use proptest::prelude::*;

/// OHLC 불변식을 만족하는 임의 캔들 시퀀스.
fn candle_strategy() -> impl Strategy<Value = Candle> {
    (1.0f64..1000.0, 0.0f64..50.0, 0.0f64..1.0, 0.0f64..1.0, 0.0f64..1e6).prop_map(
        |(low, spread, o, c, volume)| {
            let high = low + spread;
            Candle::new(0, low + spread * o, high, low, low + spread * c, volume)
        },
    )
}

fn candles_strategy(max: usize) -> impl Strategy<Value = Vec<Candle>> {
    prop::collection::vec(candle_strategy(), 0..max).prop_map(|mut candles| {
        for (i, candle) in candles.iter_mut().enumerate() {
            candle.time = i as i64 * 3600;
        }
        candles
    })
}

proptest! {
    #[test]
    fn prop_aggregation_preserves_volume(candles in candles_strategy(64)) {
        let merged = aggregate_candles(&candles, 4);
        let before: f64 = candles.iter().map(|c| c.volume).sum();
        let after: f64 = merged.iter().map(|c| c.volume).sum();

        prop_assert!((before - after).abs() <= 1e-6 * before.max(1.0));
        prop_assert_eq!(merged.len(), candles.len().div_ceil(4));
    }

    #[test]
    fn prop_aggregation_keeps_ohlc_invariant(candles in candles_strategy(64)) {
        for candle in aggregate_candles(&candles, 4) {
            prop_assert!(candle.high >= candle.open.max(candle.close));
            prop_assert!(candle.low <= candle.open.min(candle.close));
        }
    }

    #[test]
    fn prop_retracement_boundaries(low in 0.0f64..10_000.0, range in 0.01f64..5_000.0) {
        let high = low + range;
        let levels = FibonacciLevels::from_anchors(high, low, Trend::Up);

        let first = &levels.retracements[0];
        let last = &levels.retracements[levels.retracements.len() - 1];
        prop_assert_eq!(first.ratio_label.as_str(), "0.0%");
        prop_assert_eq!(first.price, round_price(high));
        prop_assert_eq!(last.ratio_label.as_str(), "100.0%");
        prop_assert_eq!(last.price, round_price(low));
    }

    #[test]
    fn prop_extensions_increase(low in 0.0f64..10_000.0, range in 1.0f64..5_000.0) {
        let levels = FibonacciLevels::from_anchors(low + range, low, Trend::Down);

        for pair in levels.extensions.windows(2) {
            prop_assert!(pair[1].price > pair[0].price);
        }
    }

    #[test]
    fn prop_moving_average_shape(candles in candles_strategy(120), period in 1usize..=100) {
        let result = MovingAverageResult::compute(&candles, period).unwrap();
        prop_assert_eq!(result.series.len(), candles.len());

        for (i, value) in result.series.iter().enumerate() {
            prop_assert_eq!(value.is_none(), i + 1 < period);
        }
    }

    #[test]
    fn prop_short_input_is_degenerate(candles in candles_strategy(20)) {
        let levels = FibonacciEngine::default().compute(&candles);
        prop_assert_eq!(levels, FibonacciLevels::degenerate());
    }
}

#[test]
fn test_tent_path_single_swing_high() {
    for lookback in 1..=5 {
        let peak = 10;
        let candles: Vec<Candle> = (0..=peak * 2)
            .map(|i| {
                let level = (if i <= peak { i } else { peak * 2 - i }) as f64;
                Candle::new(i as i64, 100.0 + level, 101.0 + level, 99.0 + level, 100.5 + level, 1.0)
            })
            .collect();

        let points = detect_swing_points(&candles, lookback);
        assert_eq!(points.highs, vec![peak], "lookback {lookback}");
        assert!(points.lows.is_empty(), "lookback {lookback}");
    }
}

#[test]
fn test_swing_up_scenario() {
    let mut bars = vec![(10.0, 9.0), (9.5, 8.5)];
    bars.extend((2..=14).map(|i| {
        let high = 9.0 + 0.5 * (i - 2) as f64;
        (high, high - 1.0)
    }));
    bars.extend((15..20).map(|i| {
        let high = 15.0 - 0.5 * (i - 14) as f64;
        (high, high - 1.0)
    }));

    let candles: Vec<Candle> = bars
        .iter()
        .enumerate()
        .map(|(i, &(high, low))| Candle::new(i as i64 * 86_400, low + 0.25, high, low, high - 0.25, 1.0))
        .collect();

    let swings = detect_swing_points(&candles, 2);
    assert_eq!(swings.highs, vec![14]);
    assert_eq!(swings.lows, vec![2]);

    let levels = FibonacciEngine::default().compute(&candles);
    assert_eq!(levels.trend, Trend::Up);
    assert_eq!(levels.low, 8.0);
    assert_eq!(levels.high, 15.0);

    let golden = levels
        .retracements
        .iter()
        .find(|l| l.ratio_label == "61.8%")
        .unwrap();
    assert_eq!(golden.price, 10.67);
    assert_eq!(golden.price, round_price(15.0 - (15.0 - 8.0) * 0.618));
}
