//! Typed shapes for the extracted documents the pipeline consumes.
//!
//! Extraction itself is shape-agnostic (`serde_json::Value`); once a document
//! is known to be the roster or the department list it is converted into the
//! records below. Fields the pipeline does not use are kept in `extra` so a
//! typed round-trip does not drop data.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Minister/MP roster keyed by personal name, in source order.
pub type Roster = IndexMap<String, RosterEntry>;

/// One roster record (an entry of `MP_INFO`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RosterEntry {
    /// Constituency held, if the person sits in the Commons. Published as
    /// `con`; the long `constituency` key is accepted on input.
    #[serde(
        rename = "con",
        alias = "constituency",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub constituency: Option<String>,
    /// Parliament member id; may be published as a string or a number.
    #[serde(rename = "parlId", default, skip_serializing_if = "Option::is_none")]
    pub parl_id: Option<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RosterEntry {
    pub fn with_constituency(mut self, constituency: impl Into<String>) -> Self {
        self.constituency = Some(constituency.into());
        self
    }

    pub fn with_parl_id(mut self, parl_id: impl Into<Value>) -> Self {
        self.parl_id = Some(parl_id.into());
        self
    }

    /// Whether the entry carries a usable external identifier.
    ///
    /// Blank strings, zero, `false` and `null` all count as missing.
    pub fn has_identifier(&self) -> bool {
        match &self.parl_id {
            None | Some(Value::Null) => false,
            Some(Value::String(s)) => !s.trim().is_empty(),
            Some(Value::Number(n)) => n.as_f64().is_some_and(|v| v != 0.0),
            Some(Value::Bool(b)) => *b,
            Some(Value::Array(items)) => !items.is_empty(),
            Some(Value::Object(map)) => !map.is_empty(),
        }
    }
}

/// Someone holding a departmental role.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleHolder {
    pub name: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RoleHolder {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), extra: Map::new() }
    }
}

/// One department from `DEPARTMENTS`: a single secretary of state plus
/// ministers of state (`mos`) and parliamentary under-secretaries (`puss`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Department {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub secretary: RoleHolder,
    #[serde(default)]
    pub mos: Vec<RoleHolder>,
    #[serde(default)]
    pub puss: Vec<RoleHolder>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Department {
    pub fn new(name: impl Into<String>, secretary: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            secretary: RoleHolder::new(secretary),
            mos: Vec::new(),
            puss: Vec::new(),
            extra: Map::new(),
        }
    }

    pub fn with_mos(mut self, name: impl Into<String>) -> Self {
        self.mos.push(RoleHolder::new(name));
        self
    }

    pub fn with_puss(mut self, name: impl Into<String>) -> Self {
        self.puss.push(RoleHolder::new(name));
        self
    }

    /// Every name referenced by this department's roles, top role first.
    pub fn role_holders(&self) -> impl Iterator<Item = &str> {
        std::iter::once(&self.secretary)
            .chain(self.mos.iter())
            .chain(self.puss.iter())
            .map(|holder| holder.name.as_str())
    }
}

/// Convert an extracted `MP_INFO` document into a typed roster.
pub fn roster_from_value(value: Value) -> serde_json::Result<Roster> {
    serde_json::from_value(value)
}

/// Convert an extracted `DEPARTMENTS` document into typed departments.
pub fn departments_from_value(value: Value) -> serde_json::Result<Vec<Department>> {
    serde_json::from_value(value)
}
