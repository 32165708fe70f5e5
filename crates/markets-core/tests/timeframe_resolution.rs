//! TimeframeResolution 통합 테스트
//!
//! 임의의 사용자 입력이 항상 유효한 제공자 요청으로 해석되는지 확인합니다.

use markets_core::{ChartInterval, TimeRange, TimeframeResolution};
use proptest::prelude::*;

const PROVIDER_RANGES: &[&str] = &[
    "1d", "5d", "1mo", "3mo", "6mo", "1y", "3y", "5y", "10y", "60d",
];
const PROVIDER_INTERVALS: &[&str] = &["30m", "1h", "1d", "1wk"];

#[test]
fn test_scenario_one_year_hourly() {
    let resolved = TimeframeResolution::resolve("1y", "1h");
    assert_eq!(resolved.provider_range, "60d");
    assert_eq!(resolved.provider_interval, "1h");
}

#[test]
fn test_cap_only_for_long_ranges() {
    for range in ["1d", "5d", "1mo", "3mo"] {
        let resolved = TimeframeResolution::resolve(range, "30m");
        assert_eq!(resolved.provider_range, range);
    }
    for range in ["6mo", "1y", "3y", "5y", "10y"] {
        let resolved = TimeframeResolution::resolve(range, "30m");
        assert_eq!(resolved.provider_range, "60d");
    }
}

proptest! {
    #[test]
    fn prop_any_input_resolves(range in ".{0,8}", interval in ".{0,8}") {
        let resolved = TimeframeResolution::resolve(&range, &interval);
        prop_assert!(PROVIDER_RANGES.contains(&resolved.provider_range));
        prop_assert!(PROVIDER_INTERVALS.contains(&resolved.provider_interval));
    }

    #[test]
    fn prop_unknown_interval_is_daily(interval in "[a-z]{3,6}") {
        let resolved = TimeframeResolution::resolve("1y", &interval);
        prop_assert_eq!(resolved.interval, ChartInterval::D1);
        prop_assert_eq!(resolved.provider_range, "1y");
    }

    #[test]
    fn prop_unknown_range_is_three_months(range in "[A-Z]{2,5}") {
        let resolved = TimeframeResolution::resolve(&range, "1d");
        prop_assert_eq!(resolved.range, TimeRange::Mo3);
    }
}
