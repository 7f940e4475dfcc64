//! timebridge core library: report and directory types, reference matching,
//! and duration conversion. No I/O lives here.
//!
//! - [`types`]: Toggl report and Runn directory/actual structs
//! - [`matcher`]: [`find_by_reference`]
//! - [`duration`]: [`millis_to_minutes`]
//! - [`error`]: [`ConversionError`]

pub mod duration;
pub mod error;
pub mod matcher;
pub mod types;

pub use duration::millis_to_minutes;
pub use error::ConversionError;
pub use matcher::{find_by_reference, Referenced, DEFAULT_REFERENCE_KEY};
pub use types::{
    ActualRecord, EntityId, ForeignId, PersonEntry, ProjectTitle, Reference, References,
    ReportEntry, Role, TargetPerson, TargetProject, UserTitle, WeeklyReport, WEEKLY_TOTAL_INDEX,
};
