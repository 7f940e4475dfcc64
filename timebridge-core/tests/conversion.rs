//! Minute conversion table.

use rstest::rstest;
use timebridge_core::{millis_to_minutes, ConversionError};

#[rstest]
#[case(0, 0)]
#[case(59_999, 1)]
#[case(60_000, 1)]
#[case(89_999, 1)]
#[case(90_000, 2)]
#[case(3_600_000, 60)]
#[case(27_000_000, 450)]
fn rounds_to_nearest_minute(#[case] ms: i64, #[case] minutes: u32) {
    assert_eq!(millis_to_minutes(ms).unwrap(), minutes);
}

#[rstest]
#[case(0)]
#[case(60_000)]
#[case(90_000)]
#[case(3_599_999)]
fn reapplying_rounding_is_stable(#[case] ms: i64) {
    let minutes = millis_to_minutes(ms).unwrap();
    let again = millis_to_minutes(i64::from(minutes) * 60_000).unwrap();
    assert_eq!(minutes, again);
}

#[rstest]
#[case(-1)]
#[case(-90_000)]
fn negative_durations_are_rejected(#[case] ms: i64) {
    assert_eq!(millis_to_minutes(ms), Err(ConversionError::Negative(ms)));
}
