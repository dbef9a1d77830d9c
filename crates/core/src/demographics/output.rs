//! Assembly of the published `constituency-demographics.json` document.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::matching::link_ministers;
use super::ConstituencyRecord;
use crate::model::Roster;

/// Fixed UK-wide baseline published next to the per-constituency figures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UkAverage {
    pub white_pct: f64,
    pub asian_pct: f64,
    pub black_pct: f64,
    pub mixed_pct: f64,
    pub other_pct: f64,
    pub nonwhite_pct: f64,
    pub source: String,
}

impl Default for UkAverage {
    fn default() -> Self {
        Self {
            white_pct: 81.7,
            asian_pct: 9.3,
            black_pct: 4.0,
            mixed_pct: 2.9,
            other_pct: 2.1,
            nonwhite_pct: 18.3,
            source: "Census 2021 England & Wales (England & Wales only; UK-wide including \
                     Scotland ~16% non-White)"
                .to_string(),
        }
    }
}

/// Static descriptive content of the published document.
///
/// Injected into [`build_output`] so the assembly step stays a pure function
/// of its arguments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemographicsProfile {
    pub description: String,
    pub source: String,
    pub categories: IndexMap<String, String>,
    pub last_updated: String,
    pub notes: Vec<String>,
    pub uk_average: UkAverage,
}

impl Default for DemographicsProfile {
    fn default() -> Self {
        let categories = [
            (
                "white_pct",
                "White (includes White British, White Irish, Gypsy/Traveller, Other White)",
            ),
            (
                "asian_pct",
                "Asian or Asian British (Indian, Pakistani, Bangladeshi, Chinese, Other Asian)",
            ),
            ("black_pct", "Black, Black British, Caribbean or African"),
            ("mixed_pct", "Mixed or Multiple ethnic groups"),
            ("other_pct", "Other ethnic group (Arab, Other)"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        Self {
            description: "Constituency demographics from Census 2021 (England, Wales, NI) and \
                          Census 2022 (Scotland), mapped to 2024 parliamentary constituency \
                          boundaries"
                .to_string(),
            source: "ONS Census 2021 table TS021, NRS Census 2022 table UV201, NISRA Census \
                     2021 table MS-B01, via House of Commons Library"
                .to_string(),
            categories,
            last_updated: "2026-02-10".to_string(),
            notes: vec![
                "Percentages are from Census 2021/2022, re-mapped to 2024 constituency \
                 boundaries by House of Commons Library"
                    .to_string(),
                "Scotland census was conducted in 2022 (one year later than rest of UK)"
                    .to_string(),
                "Northern Ireland uses different census categories, aggregated to match E&W \
                 broad groups"
                    .to_string(),
                "Minor rounding means percentages may not sum to exactly 100%".to_string(),
            ],
            uk_average: UkAverage::default(),
        }
    }
}

/// `_metadata` block of the published document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    pub description: String,
    pub source: String,
    pub categories: IndexMap<String, String>,
    pub last_updated: String,
    pub coverage: String,
    pub notes: Vec<String>,
}

/// One constituency in the published map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstituencyEntry {
    pub white_pct: Option<f64>,
    pub asian_pct: Option<f64>,
    pub black_pct: Option<f64>,
    pub mixed_pct: Option<f64>,
    pub other_pct: Option<f64>,
    pub nonwhite_pct: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gss_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ministers: Option<Vec<String>>,
}

impl From<ConstituencyRecord> for ConstituencyEntry {
    fn from(record: ConstituencyRecord) -> Self {
        Self {
            white_pct: record.white_pct,
            asian_pct: record.asian_pct,
            black_pct: record.black_pct,
            mixed_pct: record.mixed_pct,
            other_pct: record.other_pct,
            nonwhite_pct: record.nonwhite_pct,
            gss_code: record.gss_code.filter(|code| !code.is_empty()),
            ministers: (!record.ministers.is_empty()).then_some(record.ministers),
        }
    }
}

/// The consolidated demographics document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemographicsDocument {
    #[serde(rename = "_metadata")]
    pub metadata: Metadata,
    pub uk_average: UkAverage,
    pub constituencies: IndexMap<String, ConstituencyEntry>,
}

/// Link ministers and assemble the published document.
///
/// Keys follow input order. A repeated constituency name overwrites the
/// earlier record in place (the later figures win, the first position stays).
pub fn build_output(
    constituencies: Vec<ConstituencyRecord>,
    roster: &Roster,
    profile: &DemographicsProfile,
) -> DemographicsDocument {
    let coverage = format!("{} constituencies", constituencies.len());
    let linked = link_ministers(constituencies, roster);

    let mut map = IndexMap::with_capacity(linked.len());
    for record in linked {
        let name = record.name.clone();
        map.insert(name, ConstituencyEntry::from(record));
    }

    DemographicsDocument {
        metadata: Metadata {
            description: profile.description.clone(),
            source: profile.source.clone(),
            categories: profile.categories.clone(),
            last_updated: profile.last_updated.clone(),
            coverage,
            notes: profile.notes.clone(),
        },
        uk_average: profile.uk_average.clone(),
        constituencies: map,
    }
}

/// Headline figures printed after a build.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DemographicsSummary {
    pub constituencies: usize,
    pub with_ministers: usize,
    /// Mean non-white share, counting absent values as zero.
    pub average_nonwhite: f64,
    pub most_diverse: Option<(String, f64)>,
    pub least_diverse: Option<(String, f64)>,
}

impl DemographicsSummary {
    pub fn from_document(doc: &DemographicsDocument) -> Self {
        let cons = &doc.constituencies;
        let with_ministers = cons
            .values()
            .filter(|entry| entry.ministers.as_ref().is_some_and(|m| !m.is_empty()))
            .count();
        let share = |entry: &ConstituencyEntry| entry.nonwhite_pct.unwrap_or(0.0);
        let average_nonwhite = if cons.is_empty() {
            0.0
        } else {
            cons.values().map(share).sum::<f64>() / cons.len() as f64
        };

        // First of equal maxima / minima wins, matching source order.
        let mut most: Option<(&String, f64)> = None;
        let mut least: Option<(&String, f64)> = None;
        for (name, entry) in cons {
            let value = share(entry);
            if most.map_or(true, |(_, best)| value > best) {
                most = Some((name, value));
            }
            if least.map_or(true, |(_, best)| value < best) {
                least = Some((name, value));
            }
        }

        Self {
            constituencies: cons.len(),
            with_ministers,
            average_nonwhite,
            most_diverse: most.map(|(n, v)| (n.clone(), v)),
            least_diverse: least.map(|(n, v)| (n.clone(), v)),
        }
    }
}
