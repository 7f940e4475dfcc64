//! Millisecond → minute conversion.

use crate::error::ConversionError;

const MILLIS_PER_MINUTE: i64 = 60_000;

/// Convert a millisecond duration to whole minutes, rounding half away from
/// zero (90 000 ms → 2, 89 999 ms → 1).
pub fn millis_to_minutes(ms: i64) -> Result<u32, ConversionError> {
    if ms < 0 {
        return Err(ConversionError::Negative(ms));
    }
    let whole = ms / MILLIS_PER_MINUTE;
    let rounded = if ms % MILLIS_PER_MINUTE >= MILLIS_PER_MINUTE / 2 {
        whole + 1
    } else {
        whole
    };
    u32::try_from(rounded).map_err(|_| ConversionError::OutOfRange(ms))
}
