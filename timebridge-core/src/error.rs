//! Error types for timebridge-core.

use thiserror::Error;

use crate::types::ForeignId;

/// Failures turning a reported duration into whole minutes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    /// Durations are never negative; Toggl sent something we cannot post.
    #[error("negative duration: {0} ms")]
    Negative(i64),

    /// The rounded minute count does not fit the record field.
    #[error("duration out of range: {0} ms")]
    OutOfRange(i64),

    /// The totals array has no weekly-total slot.
    #[error("totals for user {uid} have {len} slots, expected at least 8")]
    MissingTotal { uid: ForeignId, len: usize },
}
