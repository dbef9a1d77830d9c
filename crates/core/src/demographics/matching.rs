//! Name reconciliation between the demographics records and the roster.
//!
//! Two tiers, kept apart on purpose:
//! - [`link_ministers`] attaches ministers using an exact match after
//!   [`normalize_name`]. This is the only linkage that reaches published data.
//! - [`fuzzy_match`] / [`validate_against_roster`] score near-misses for a
//!   human to review. Their results are reported, never applied.

use std::collections::BTreeSet;

use indexmap::{IndexMap, IndexSet};
use serde::Serialize;
use similar::{Algorithm, DiffTag, TextDiff};
use tracing::warn;

use super::ConstituencyRecord;
use crate::model::Roster;

pub const DEFAULT_FUZZY_THRESHOLD: f64 = 0.80;

/// Fold typographic quotes to their ASCII forms. Join key only.
pub fn normalize_name(raw: &str) -> String {
    raw.chars()
        .map(|ch| match ch {
            '\u{2018}' | '\u{2019}' => '\'',
            '\u{201C}' | '\u{201D}' => '"',
            other => other,
        })
        .collect()
}

/// Comparison form for fuzzy scoring: lowercase, `&` spelled out, commas
/// dropped, outer whitespace trimmed.
pub fn fuzzy_key(raw: &str) -> String {
    raw.to_lowercase().replace('&', "and").replace(',', "").trim().to_string()
}

/// Similarity ratio in `[0, 1]`: twice the number of matched characters over
/// the combined length, with matches taken from a character-level diff.
/// Two empty strings are identical.
pub fn similarity(a: &str, b: &str) -> f64 {
    let total = a.chars().count() + b.chars().count();
    if total == 0 {
        return 1.0;
    }
    let diff = TextDiff::configure().algorithm(Algorithm::Myers).diff_chars(a, b);
    let matched: usize = diff
        .ops()
        .iter()
        .filter_map(|op| match op.as_tag_tuple() {
            (DiffTag::Equal, old, _) => Some(old.len()),
            _ => None,
        })
        .sum();
    2.0 * matched as f64 / total as f64
}

/// Best candidate for `target`, if it reaches `threshold`.
///
/// The best score is returned even when nothing qualifies so misses can be
/// reported with context. Ties keep the earliest candidate; a candidate
/// sharing nothing with the target is never returned.
pub fn fuzzy_match<'c, I>(target: &str, candidates: I, threshold: f64) -> (Option<&'c str>, f64)
where
    I: IntoIterator<Item = &'c str>,
{
    let key = fuzzy_key(target);
    let mut best: Option<&'c str> = None;
    let mut best_score = 0.0;
    for candidate in candidates {
        let score = similarity(&key, &fuzzy_key(candidate));
        if score > best_score {
            best = Some(candidate);
            best_score = score;
        }
    }
    match best {
        Some(candidate) if best_score >= threshold => (Some(candidate), best_score),
        _ => (None, best_score),
    }
}

/// Normalized constituency name → roster names holding it, in roster order.
pub fn minister_index(roster: &Roster) -> IndexMap<String, Vec<String>> {
    let mut index: IndexMap<String, Vec<String>> = IndexMap::new();
    for (name, entry) in roster {
        if let Some(con) = entry.constituency.as_deref().filter(|c| !c.is_empty()) {
            index.entry(normalize_name(con)).or_default().push(name.clone());
        }
    }
    index
}

/// Attach the roster names sitting for each constituency.
///
/// Matching is exact after [`normalize_name`]; a record with no match keeps an
/// empty minister list, which is the common case.
pub fn link_ministers(
    mut constituencies: Vec<ConstituencyRecord>,
    roster: &Roster,
) -> Vec<ConstituencyRecord> {
    let index = minister_index(roster);
    for record in &mut constituencies {
        if let Some(names) = index.get(&normalize_name(&record.name)) {
            record.ministers = names.clone();
        }
    }
    constituencies
}

/// A roster constituency that only matched fuzzily.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FuzzyLink {
    pub roster_name: String,
    pub candidate: String,
    pub score: f64,
}

/// A roster constituency with no acceptable demographics counterpart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FuzzyMiss {
    pub roster_name: String,
    pub best_score: f64,
}

/// Pre-publish cross-check of demographics names against the roster.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidationReport {
    pub roster_constituencies: usize,
    pub demographics_entries: usize,
    pub exact: BTreeSet<String>,
    pub fuzzy: Vec<FuzzyLink>,
    pub missing: Vec<FuzzyMiss>,
}

impl ValidationReport {
    pub fn unmatched(&self) -> usize {
        self.fuzzy.len() + self.missing.len()
    }
}

/// Compare every constituency named in the roster with the demographics
/// names: exact hits first, then fuzzy candidates for the rest.
pub fn validate_against_roster(
    constituencies: &[ConstituencyRecord],
    roster: &Roster,
    threshold: f64,
) -> ValidationReport {
    let roster_cons: BTreeSet<&str> = roster
        .values()
        .filter_map(|entry| entry.constituency.as_deref())
        .filter(|con| !con.is_empty())
        .collect();
    let demo_names: IndexSet<&str> = constituencies.iter().map(|c| c.name.as_str()).collect();

    let mut report = ValidationReport {
        roster_constituencies: roster_cons.len(),
        demographics_entries: demo_names.len(),
        ..ValidationReport::default()
    };

    for con in roster_cons {
        if demo_names.contains(con) {
            report.exact.insert(con.to_string());
            continue;
        }
        match fuzzy_match(con, demo_names.iter().copied(), threshold) {
            (Some(candidate), score) => {
                warn!(constituency = %con, candidate = %candidate, score, "fuzzy match only");
                report.fuzzy.push(FuzzyLink {
                    roster_name: con.to_string(),
                    candidate: candidate.to_string(),
                    score,
                });
            }
            (None, best_score) => {
                warn!(constituency = %con, best_score, "no demographics entry");
                report.missing.push(FuzzyMiss { roster_name: con.to_string(), best_score });
            }
        }
    }
    report
}
