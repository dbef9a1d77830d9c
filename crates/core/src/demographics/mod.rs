//! Constituency demographics: load ethnicity statistics, link them to the
//! minister roster, and assemble the published document.

pub mod manual;
pub mod matching;
pub mod output;
pub mod sources;
pub mod tabular;

use serde::{Deserialize, Serialize};

pub use matching::{
    fuzzy_key, fuzzy_match, link_ministers, minister_index, normalize_name, similarity,
    validate_against_roster, FuzzyLink, FuzzyMiss, ValidationReport, DEFAULT_FUZZY_THRESHOLD,
};
pub use output::{
    build_output, ConstituencyEntry, DemographicsDocument, DemographicsProfile, DemographicsSummary,
    Metadata, UkAverage,
};
pub use sources::{
    load_source, ConstituencyProvider, ManualProvider, SourceError, SourceSelection,
    TabularProvider,
};

/// Ethnicity breakdown for one constituency.
///
/// `name` keeps the source spelling; matching goes through
/// [`normalize_name`] and never rewrites it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConstituencyRecord {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gss_code: Option<String>,
    pub white_pct: Option<f64>,
    pub asian_pct: Option<f64>,
    pub black_pct: Option<f64>,
    pub mixed_pct: Option<f64>,
    pub other_pct: Option<f64>,
    pub nonwhite_pct: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ministers: Vec<String>,
}

impl ConstituencyRecord {
    /// Build a record from the five broad categories, deriving `nonwhite_pct`.
    pub fn from_percentages(
        name: impl Into<String>,
        white: Option<f64>,
        asian: Option<f64>,
        black: Option<f64>,
        mixed: Option<f64>,
        other: Option<f64>,
    ) -> Self {
        let mut record = Self {
            name: name.into(),
            white_pct: white,
            asian_pct: asian,
            black_pct: black,
            mixed_pct: mixed,
            other_pct: other,
            ..Self::default()
        };
        record.nonwhite_pct = derive_nonwhite(&record);
        record
    }

    pub fn with_gss_code(mut self, code: impl Into<String>) -> Self {
        self.gss_code = Some(code.into());
        self
    }
}

/// Round to one decimal place.
///
/// Goes through decimal formatting so the result is correctly rounded from
/// the exact binary value, with exact halves going to the even digit
/// (`12.25` → `12.2`, `0.35` → `0.3`).
pub fn round1(value: f64) -> f64 {
    format!("{value:.1}").parse().unwrap_or(value)
}

/// Non-white share: `100 - white` when white is known, otherwise the sum of
/// the four minority categories when all four are known, otherwise absent.
pub fn derive_nonwhite(record: &ConstituencyRecord) -> Option<f64> {
    if let Some(white) = record.white_pct {
        return Some(round1(100.0 - white));
    }
    match (record.asian_pct, record.black_pct, record.mixed_pct, record.other_pct) {
        (Some(asian), Some(black), Some(mixed), Some(other)) => {
            Some(round1(asian + black + mixed + other))
        }
        _ => None,
    }
}
