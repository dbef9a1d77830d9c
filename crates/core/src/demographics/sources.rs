use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{info, warn};

use super::manual::manual_records;
use super::tabular::{load_workbook, open_workbook};
use super::ConstituencyRecord;

#[derive(Debug, Error)]
pub enum SourceError {
    /// No header looked like a constituency name column. Callers fall back to
    /// the manual provider or abort.
    #[error("no constituency name column in sheet '{sheet}' (headers: {headers:?})")]
    Schema { sheet: String, headers: Vec<String> },

    #[error("sheet not found: {sheet}")]
    MissingSheet { sheet: String },

    #[error("failed to read workbook {path}: {message}")]
    Workbook { path: PathBuf, message: String },

    #[error("unsupported workbook format: {path}")]
    UnsupportedFormat { path: PathBuf },

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Provider of raw constituency records.
pub trait ConstituencyProvider {
    fn load(&self) -> Result<Vec<ConstituencyRecord>, SourceError>;
    fn name(&self) -> &'static str;
}

/// Reads an external workbook (spreadsheet or JSON export).
#[derive(Debug, Clone)]
pub struct TabularProvider {
    pub path: PathBuf,
}

impl TabularProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ConstituencyProvider for TabularProvider {
    fn load(&self) -> Result<Vec<ConstituencyRecord>, SourceError> {
        info!(path = %self.path.display(), "reading workbook");
        let mut workbook = open_workbook(&self.path)?;
        load_workbook(workbook.as_mut())
    }

    fn name(&self) -> &'static str {
        "tabular"
    }
}

/// The compiled-in ministerial constituency table.
#[derive(Debug, Clone, Copy, Default)]
pub struct ManualProvider;

impl ConstituencyProvider for ManualProvider {
    fn load(&self) -> Result<Vec<ConstituencyRecord>, SourceError> {
        Ok(manual_records())
    }

    fn name(&self) -> &'static str {
        "manual"
    }
}

/// Which provider a run uses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceSelection {
    /// Workbook at `path`; `auto_detected` is set when the path was not
    /// given explicitly but found at the default location.
    Tabular { path: PathBuf, auto_detected: bool },
    Manual,
}

impl SourceSelection {
    /// Explicit tabular path > explicit manual flag > default workbook if it
    /// exists > manual.
    pub fn resolve(explicit: Option<&Path>, manual: bool, default_path: &Path) -> Self {
        if let Some(path) = explicit {
            return SourceSelection::Tabular { path: path.to_path_buf(), auto_detected: false };
        }
        if manual {
            return SourceSelection::Manual;
        }
        if default_path.is_file() {
            return SourceSelection::Tabular {
                path: default_path.to_path_buf(),
                auto_detected: true,
            };
        }
        SourceSelection::Manual
    }

    pub fn provider(&self) -> Box<dyn ConstituencyProvider> {
        match self {
            SourceSelection::Tabular { path, .. } => Box::new(TabularProvider::new(path)),
            SourceSelection::Manual => Box::new(ManualProvider),
        }
    }
}

/// Load records for a selection.
///
/// An auto-detected workbook that cannot be read falls back to the manual
/// table with a warning; an explicitly requested one propagates its error.
pub fn load_source(selection: &SourceSelection) -> Result<Vec<ConstituencyRecord>, SourceError> {
    match (selection.provider().load(), selection) {
        (Ok(records), _) => Ok(records),
        (Err(err), SourceSelection::Tabular { auto_detected: true, path }) => {
            warn!(path = %path.display(), "{err}; falling back to manual constituency data");
            ManualProvider.load()
        }
        (Err(err), _) => Err(err),
    }
}
