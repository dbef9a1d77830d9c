use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::demographics::{DemographicsProfile, DEFAULT_FUZZY_THRESHOLD};
use crate::extract::LiteralTarget;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("config must list at least one literal target")]
    NoTargets,
    #[error("literal '{0}' is used as {1} but is not in the target list")]
    UnknownLiteral(String, &'static str),
    #[error("fuzzy_threshold must be within 0..=1, got {0}")]
    Threshold(f64),
    #[error("last_updated must be a YYYY-MM-DD date, got '{0}'")]
    LastUpdated(String),
}

fn default_source_document() -> String {
    "original-index.html".to_string()
}

fn default_roster_literal() -> String {
    "MP_INFO".to_string()
}

fn default_departments_literal() -> String {
    "DEPARTMENTS".to_string()
}

fn default_threshold() -> f64 {
    DEFAULT_FUZZY_THRESHOLD
}

/// Literals published by a default build, with their historical file names.
pub fn default_targets() -> Vec<LiteralTarget> {
    vec![
        LiteralTarget::new("DEPARTMENTS"),
        LiteralTarget::new("CROSS_CUTTING"),
        LiteralTarget::new("LORDS_WHIPS"),
        LiteralTarget::new("CHANGELOG"),
        LiteralTarget::new("WEALTH_EST").with_file("wealth-estimates.json"),
        LiteralTarget::new("MP_INFO"),
        LiteralTarget::new("DEPT_BUDGET").with_file("dept-budgets.json"),
        LiteralTarget::new("WPT").with_file("wealth-percentile-thresholds.json"),
    ]
}

/// Serializable build configuration.
///
/// Read from `powermap.json` or `powermap.yaml` in the project root; every
/// field has a default, so the file is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildConfig {
    /// Monolithic document the literals are extracted from (relative to root).
    #[serde(default = "default_source_document")]
    pub source_document: String,
    /// Literals to extract, in order.
    #[serde(default = "default_targets")]
    pub literals: Vec<LiteralTarget>,
    /// Which literal holds the minister roster.
    #[serde(default = "default_roster_literal")]
    pub roster_literal: String,
    /// Which literal holds the department role structure.
    #[serde(default = "default_departments_literal")]
    pub departments_literal: String,
    /// Minimum similarity for a fuzzy match to be reported as a candidate.
    #[serde(default = "default_threshold")]
    pub fuzzy_threshold: f64,
    #[serde(default)]
    pub demographics: DemographicsProfile,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            source_document: default_source_document(),
            literals: default_targets(),
            roster_literal: default_roster_literal(),
            departments_literal: default_departments_literal(),
            fuzzy_threshold: default_threshold(),
            demographics: DemographicsProfile::default(),
        }
    }
}

impl BuildConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.literals.is_empty() {
            return Err(ConfigError::NoTargets);
        }
        for (literal, role) in
            [(&self.roster_literal, "roster"), (&self.departments_literal, "departments")]
        {
            if !self.literals.iter().any(|t| &t.name == literal) {
                return Err(ConfigError::UnknownLiteral(literal.clone(), role));
            }
        }
        if !(0.0..=1.0).contains(&self.fuzzy_threshold) {
            return Err(ConfigError::Threshold(self.fuzzy_threshold));
        }
        let date = &self.demographics.last_updated;
        if NaiveDate::parse_from_str(date, "%Y-%m-%d").is_err() {
            return Err(ConfigError::LastUpdated(date.clone()));
        }
        Ok(())
    }

    /// Target entry for a literal name.
    pub fn target(&self, name: &str) -> Option<&LiteralTarget> {
        self.literals.iter().find(|t| t.name == name)
    }

    pub fn roster_target(&self) -> Option<&LiteralTarget> {
        self.target(&self.roster_literal)
    }

    pub fn departments_target(&self) -> Option<&LiteralTarget> {
        self.target(&self.departments_literal)
    }
}
