//! Cross-reference lookup between Toggl ids and Runn entities.
//!
//! A Runn entity is linked to Toggl through a custom field (the *reference
//! key*) whose `external_id` holds the Toggl id in decimal form.

use std::fmt::Display;

use crate::types::{References, TargetPerson, TargetProject};

/// Custom field Runn uses for the Toggl id unless configured otherwise.
pub const DEFAULT_REFERENCE_KEY: &str = "Custom1";

/// Anything carrying a reference map.
pub trait Referenced {
    fn references(&self) -> &References;

    /// `external_id` stored under `key`, if the entity has one.
    fn external_id(&self, key: &str) -> Option<&str> {
        self.references().get(key).map(|r| r.external_id.as_str())
    }
}

impl Referenced for TargetProject {
    fn references(&self) -> &References {
        &self.references
    }
}

impl Referenced for TargetPerson {
    fn references(&self) -> &References {
        &self.references
    }
}

/// First entity in `items` whose `key` reference equals `foreign`.
///
/// Entities without `key` are passed over. Returns `None` when nothing
/// matches; a miss is an expected outcome, not an error.
pub fn find_by_reference<'a, T: Referenced>(
    items: &'a [T],
    key: &str,
    foreign: &impl Display,
) -> Option<&'a T> {
    let wanted = foreign.to_string();
    items
        .iter()
        .find(|item| item.external_id(key) == Some(wanted.as_str()))
}
