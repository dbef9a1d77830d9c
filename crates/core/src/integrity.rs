//! Cross-reference between the department roles and the minister roster.
//!
//! Purely diagnostic: mismatches are reported, never enforced.

use std::collections::BTreeSet;

use serde::Serialize;
use tracing::warn;

use crate::model::{Department, Roster};

/// Outcome of `check_referential_integrity`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IntegrityReport {
    /// Distinct names referenced by any departmental role.
    pub referenced: usize,
    /// Referenced names with no roster entry, sorted.
    pub missing: BTreeSet<String>,
    pub roster_size: usize,
    /// Roster entries with a non-empty external identifier.
    pub with_identifier: usize,
    /// `with_identifier / roster_size`, or 0 for an empty roster.
    pub coverage: f64,
}

impl IntegrityReport {
    pub fn is_clean(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Check that every role holder appears in the roster and measure how much of
/// the roster carries an external identifier.
pub fn check_referential_integrity(roster: &Roster, departments: &[Department]) -> IntegrityReport {
    let referenced: BTreeSet<&str> =
        departments.iter().flat_map(|dept| dept.role_holders()).collect();

    let missing: BTreeSet<String> = referenced
        .iter()
        .filter(|name| !roster.contains_key(**name))
        .map(|name| name.to_string())
        .collect();

    let with_identifier = roster.values().filter(|entry| entry.has_identifier()).count();
    let coverage =
        if roster.is_empty() { 0.0 } else { with_identifier as f64 / roster.len() as f64 };

    if !missing.is_empty() {
        warn!("{} ministers referenced by departments are not in the roster", missing.len());
        for name in &missing {
            warn!(minister = %name, "referenced by a department but missing from roster");
        }
    }

    IntegrityReport {
        referenced: referenced.len(),
        missing,
        roster_size: roster.len(),
        with_identifier,
        coverage,
    }
}
