//! Domain types for the Toggl → Runn sync.
//!
//! Report types mirror the Toggl weekly report payload; directory types mirror
//! the Runn `v0` API. Everything is a read-only snapshot fetched per run.

use std::collections::HashMap;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ConversionError;

/// Slot in [`PersonEntry::totals`] that holds the whole-window total.
///
/// Slots 0..=6 are the days of the week; slot 7 is their sum.
pub const WEEKLY_TOTAL_INDEX: usize = 7;

// ---------------------------------------------------------------------------
// Identifiers
// ---------------------------------------------------------------------------

/// An identifier that only means something inside Toggl (`pid`, `uid`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ForeignId(pub u64);

impl fmt::Display for ForeignId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<u64> for ForeignId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// A Runn identifier. Runn hands out integers, but string ids are accepted
/// and echoed back in the shape they were received.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EntityId {
    Number(u64),
    Text(String),
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityId::Number(n) => n.fmt(f),
            EntityId::Text(s) => s.fmt(f),
        }
    }
}

impl From<u64> for EntityId {
    fn from(id: u64) -> Self {
        Self::Number(id)
    }
}

impl From<&str> for EntityId {
    fn from(id: &str) -> Self {
        Self::Text(id.to_owned())
    }
}

// ---------------------------------------------------------------------------
// Toggl weekly report
// ---------------------------------------------------------------------------

/// Aggregated per-project, per-person totals for a date window.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WeeklyReport {
    #[serde(default)]
    pub data: Vec<ReportEntry>,
}

impl WeeklyReport {
    /// Number of (project, person) pairs in the report.
    pub fn pair_count(&self) -> usize {
        self.data.iter().map(|entry| entry.details.len()).sum()
    }
}

/// One project row. `pid` is `null` for time tracked without a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportEntry {
    pub pid: Option<ForeignId>,
    #[serde(default)]
    pub title: ProjectTitle,
    #[serde(default)]
    pub details: Vec<PersonEntry>,
}

impl ReportEntry {
    pub fn project_title(&self) -> &str {
        self.title.project.as_deref().unwrap_or("(no project)")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProjectTitle {
    pub project: Option<String>,
}

/// One person's totals under a project row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonEntry {
    pub uid: ForeignId,
    #[serde(default)]
    pub title: UserTitle,
    /// Milliseconds per slot; Toggl sends `null` for empty slots.
    #[serde(default)]
    pub totals: Vec<Option<i64>>,
}

impl PersonEntry {
    pub fn user_title(&self) -> &str {
        self.title.user.as_deref().unwrap_or("(unknown user)")
    }

    /// Milliseconds in the weekly total slot. An empty slot counts as zero.
    pub fn weekly_total(&self) -> Result<i64, ConversionError> {
        match self.totals.get(WEEKLY_TOTAL_INDEX) {
            Some(total) => Ok(total.unwrap_or(0)),
            None => Err(ConversionError::MissingTotal {
                uid: self.uid,
                len: self.totals.len(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UserTitle {
    pub user: Option<String>,
}

// ---------------------------------------------------------------------------
// Runn directories
// ---------------------------------------------------------------------------

/// A custom-field reference linking a Runn entity to a foreign system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    pub external_id: String,
}

/// Named references on a Runn entity, keyed by custom-field name.
pub type References = HashMap<String, Reference>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetProject {
    pub id: EntityId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub references: References,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetPerson {
    pub id: EntityId,
    #[serde(default)]
    pub name: String,
    pub role_id: EntityId,
    #[serde(default)]
    pub role: Option<Role>,
    #[serde(default)]
    pub references: References,
}

impl TargetPerson {
    pub fn role_name(&self) -> &str {
        self.role
            .as_ref()
            .map(|r| r.name.as_str())
            .unwrap_or("unknown role")
    }
}

// ---------------------------------------------------------------------------
// Runn actuals
// ---------------------------------------------------------------------------

/// Time actually worked, as posted to `v0/actuals`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActualRecord {
    /// Serialized as `YYYY-MM-DD`.
    pub date: NaiveDate,
    pub project_id: EntityId,
    pub person_id: EntityId,
    pub role_id: EntityId,
    pub billable_minutes: u32,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
