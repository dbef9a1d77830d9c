//! Literal extraction: pulls named JS-style data literals out of a source
//! document and republishes each one as a strict JSON file.
//!
//! The pipeline per literal is locate → repair → parse → write. A failure on
//! one literal never stops the batch; it is logged, recorded as `None` in the
//! returned map, and (for parse failures) the repaired text is kept on disk as
//! a `_debug_` artifact for manual inspection.

mod repair;
mod scan;

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{info, warn};

pub use repair::repair_to_json;
pub use scan::{locate_literal, script_body};

/// Prefix for artifacts holding repaired-but-unparseable literal text.
pub const DEBUG_PREFIX: &str = "_debug_";

/// Failure of a single literal's extraction.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("no assignment for '{name}' found in source")]
    NotFound { name: String },

    #[error("malformed literal for '{name}': {reason}")]
    MalformedLiteral { name: String, reason: String },

    /// Repaired text is still not strict JSON. Non-fatal for the batch.
    #[error("repaired literal for '{name}' is not valid JSON: {source}")]
    Parse {
        name: String,
        #[source]
        source: serde_json::Error,
    },
}

/// A named literal to extract and the file it is published to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiteralTarget {
    /// Variable name as it appears in the source (e.g. `MP_INFO`).
    pub name: String,
    /// Output file name; defaults to the kebab-cased name plus `.json`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl LiteralTarget {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), file: None }
    }

    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }

    /// File name the extracted document is written to.
    pub fn file_name(&self) -> String {
        match &self.file {
            Some(file) => file.clone(),
            None => format!("{}.json", kebab_case(&self.name)),
        }
    }

    /// File name of the debug artifact written when parsing fails.
    pub fn debug_file_name(&self) -> String {
        format!("{DEBUG_PREFIX}{}", self.file_name())
    }
}

/// `MP_INFO` → `mp-info`, `crossCutting` → `cross-cutting`.
pub fn kebab_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    let mut prev_lower = false;
    for ch in name.chars() {
        if ch == '_' || ch == '-' || ch.is_whitespace() {
            if !out.is_empty() && !out.ends_with('-') {
                out.push('-');
            }
            prev_lower = false;
        } else if ch.is_uppercase() {
            if prev_lower && !out.ends_with('-') {
                out.push('-');
            }
            out.extend(ch.to_lowercase());
            prev_lower = false;
        } else {
            out.push(ch);
            prev_lower = ch.is_lowercase() || ch.is_ascii_digit();
        }
    }
    out.trim_end_matches('-').to_string()
}

/// Locate, repair and parse one literal without touching the filesystem.
///
/// On a parse failure the repaired text is handed back alongside the error so
/// the caller can persist it.
pub fn extract_literal(name: &str, source: &str) -> Result<Value, (ExtractError, Option<String>)> {
    let raw = locate_literal(name, source).map_err(|err| (err, None))?;
    let repaired = repair_to_json(raw);
    match serde_json::from_str::<Value>(&repaired) {
        Ok(value) => Ok(value),
        Err(err) => {
            Err((ExtractError::Parse { name: name.to_string(), source: err }, Some(repaired)))
        }
    }
}

/// Human-readable size of an extracted document.
pub fn describe_document(value: &Value) -> String {
    match value {
        Value::Array(items) => format!("{} items", items.len()),
        Value::Object(map) => format!("{} keys", map.len()),
        _ => "scalar".to_string(),
    }
}

/// Write a JSON value with two-space indentation; non-ASCII stays literal.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)
        .with_context(|| format!("Failed to serialize JSON for {}", path.display()))?;
    fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

/// Result of an `extract_all` batch.
#[derive(Debug, Default)]
pub struct ExtractionBatch {
    /// Every requested name, in request order; `None` marks a failure.
    pub documents: IndexMap<String, Option<Value>>,
    /// Files written for successful literals.
    pub written: Vec<PathBuf>,
    /// Debug artifacts written for parse failures.
    pub debug_artifacts: Vec<PathBuf>,
    /// Per-literal failures, in request order.
    pub failures: Vec<ExtractError>,
}

impl ExtractionBatch {
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.documents.get(name).and_then(|doc| doc.as_ref())
    }

    pub fn succeeded(&self) -> usize {
        self.documents.values().filter(|doc| doc.is_some()).count()
    }
}

/// Extract every target from `source` into `output_dir`.
///
/// Single-literal failures are isolated. Only I/O failures on the output
/// directory itself are returned as errors.
pub fn extract_all(
    targets: &[LiteralTarget],
    source: &str,
    output_dir: &Path,
) -> Result<ExtractionBatch> {
    fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create output dir: {}", output_dir.display()))?;

    let mut batch = ExtractionBatch::default();
    for target in targets {
        match extract_literal(&target.name, source) {
            Ok(value) => {
                let path = output_dir.join(target.file_name());
                write_json(&path, &value)?;
                info!(
                    literal = %target.name,
                    file = %path.display(),
                    "extracted {}",
                    describe_document(&value)
                );
                batch.written.push(path);
                batch.documents.insert(target.name.clone(), Some(value));
            }
            Err((err, repaired)) => {
                if let Some(text) = repaired {
                    let debug_path = output_dir.join(target.debug_file_name());
                    fs::write(&debug_path, text).with_context(|| {
                        format!("Failed to write debug artifact {}", debug_path.display())
                    })?;
                    warn!(
                        literal = %target.name,
                        debug = %debug_path.display(),
                        "{err}; repaired text saved for inspection"
                    );
                    batch.debug_artifacts.push(debug_path);
                } else {
                    warn!(literal = %target.name, "{err}");
                }
                batch.documents.insert(target.name.clone(), None);
                batch.failures.push(err);
            }
        }
    }
    Ok(batch)
}
