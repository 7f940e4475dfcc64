//! # timebridge-sync
//!
//! Toggl and Runn HTTP clients plus the sync pipeline.
//!
//! Build a [`TogglClient`] and a [`RunnClient`], then call [`pipeline::run`]
//! with [`SyncOptions`] to post one Runn actual per matched report pair.

pub mod error;
mod http;
pub mod pipeline;
pub mod runn;
pub mod toggl;

pub use error::{Service, SyncError};
pub use pipeline::{
    plan, submit_all, today_utc, Plan, PlannedActual, Skip, SkipKind, SubmissionFailure,
    SyncOptions, SyncReport,
};
pub use runn::{RunnClient, RunnConfig, DEFAULT_RUNN_BASE_URL};
pub use toggl::{TogglClient, TogglConfig, DEFAULT_TOGGL_BASE_URL};
