//! 가격 반올림 유틸리티.
//!
//! 부동소수점 가격을 `rust_decimal`로 변환해 자릿수 반올림을 수행합니다.
//! 반올림 방식은 0에서 먼 쪽(half away from zero)입니다.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// 지정된 소수점 자릿수로 반올림합니다.
///
/// 결과는 문자열 표현을 거쳐 `f64`로 되돌리므로 리터럴 `10.67`과 정확히
/// 같은 값이 됩니다. 변환할 수 없는 값(NaN, 무한대)은 그대로 반환합니다.
pub fn round_to(value: f64, dp: u32) -> f64 {
    Decimal::from_f64(value)
        .map(|d| d.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|d| d.to_string().parse().ok())
        .unwrap_or(value)
}

/// 센트 단위(소수점 2자리)로 반올림합니다.
pub fn round_price(value: f64) -> f64 {
    round_to(value, 2)
}
