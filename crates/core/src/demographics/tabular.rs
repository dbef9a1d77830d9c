//! Spreadsheet-shaped demographics sources.
//!
//! Columns are located by keyword heuristics on the header row rather than by
//! position, since the published workbooks rename and reorder columns between
//! releases.

use std::path::Path;

use indexmap::IndexMap;
use serde::Deserialize;
use tracing::{debug, info};

use super::sources::SourceError;
use super::{derive_nonwhite, round1, ConstituencyRecord};

/// A single spreadsheet cell.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Number(f64),
    Text(String),
    Empty,
}

impl Cell {
    /// Trimmed text content; `None` for empty or blank cells and for a
    /// numeric zero. Other numbers keep their decimal point (`1.0`).
    pub fn as_text(&self) -> Option<String> {
        match self {
            Cell::Text(s) => {
                let trimmed = s.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            }
            Cell::Number(n) if *n == 0.0 => None,
            Cell::Number(n) => Some(format!("{n:?}")),
            Cell::Empty => None,
        }
    }

    /// Numeric value rounded to one decimal; text is parsed, and anything
    /// unparseable is treated as absent.
    pub fn as_percentage(&self) -> Option<f64> {
        match self {
            Cell::Number(n) if n.is_finite() => Some(round1(*n)),
            Cell::Text(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()).map(round1),
            _ => None,
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Number(value)
    }
}

/// A named sheet: the first row is the header.
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    pub name: String,
    pub rows: Vec<Vec<Cell>>,
}

impl Sheet {
    pub fn new(name: impl Into<String>, rows: Vec<Vec<Cell>>) -> Self {
        Self { name: name.into(), rows }
    }

    pub fn headers(&self) -> Vec<String> {
        self.rows
            .first()
            .map(|row| row.iter().map(|c| c.as_text().unwrap_or_default()).collect())
            .unwrap_or_default()
    }
}

/// Anything that can hand out named sheets of cells.
pub trait Workbook {
    fn sheet_names(&self) -> Vec<String>;
    fn sheet(&mut self, name: &str) -> Result<Sheet, SourceError>;
}

/// In-memory workbook; also the shape of a `.json` workbook export
/// (`{"<sheet>": [[header, ...], [cell, ...]]}`).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct MemoryWorkbook {
    sheets: IndexMap<String, Vec<Vec<Cell>>>,
}

impl MemoryWorkbook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sheet(mut self, name: impl Into<String>, rows: Vec<Vec<Cell>>) -> Self {
        self.sheets.insert(name.into(), rows);
        self
    }

    pub fn from_json_file(path: &Path) -> Result<Self, SourceError> {
        let body = std::fs::read_to_string(path)
            .map_err(|source| SourceError::Io { path: path.to_path_buf(), source })?;
        serde_json::from_str(&body).map_err(|err| SourceError::Workbook {
            path: path.to_path_buf(),
            message: err.to_string(),
        })
    }
}

impl Workbook for MemoryWorkbook {
    fn sheet_names(&self) -> Vec<String> {
        self.sheets.keys().cloned().collect()
    }

    fn sheet(&mut self, name: &str) -> Result<Sheet, SourceError> {
        self.sheets
            .get(name)
            .map(|rows| Sheet::new(name, rows.clone()))
            .ok_or_else(|| SourceError::MissingSheet { sheet: name.to_string() })
    }
}

#[cfg(feature = "xlsx")]
pub use self::xlsx::SpreadsheetWorkbook;

#[cfg(feature = "xlsx")]
mod xlsx {
    use std::fs::File;
    use std::io::BufReader;
    use std::path::{Path, PathBuf};

    use calamine::{open_workbook_auto, Data, Reader, Sheets};

    use super::{Cell, Sheet, Workbook};
    use crate::demographics::sources::SourceError;

    /// `.xlsx` / `.xls` / `.ods` workbook read through calamine.
    pub struct SpreadsheetWorkbook {
        path: PathBuf,
        inner: Sheets<BufReader<File>>,
    }

    impl SpreadsheetWorkbook {
        pub fn open(path: &Path) -> Result<Self, SourceError> {
            let inner = open_workbook_auto(path).map_err(|err| SourceError::Workbook {
                path: path.to_path_buf(),
                message: err.to_string(),
            })?;
            Ok(Self { path: path.to_path_buf(), inner })
        }
    }

    fn to_cell(data: &Data) -> Cell {
        match data {
            Data::Empty => Cell::Empty,
            Data::String(s) => Cell::Text(s.clone()),
            Data::Float(f) => Cell::Number(*f),
            Data::Int(i) => Cell::Number(*i as f64),
            other => Cell::Text(other.to_string()),
        }
    }

    impl Workbook for SpreadsheetWorkbook {
        fn sheet_names(&self) -> Vec<String> {
            self.inner.sheet_names()
        }

        fn sheet(&mut self, name: &str) -> Result<Sheet, SourceError> {
            let range = self.inner.worksheet_range(name).map_err(|err| SourceError::Workbook {
                path: self.path.clone(),
                message: format!("sheet '{name}': {err}"),
            })?;
            let rows = range.rows().map(|row| row.iter().map(to_cell).collect()).collect();
            Ok(Sheet::new(name, rows))
        }
    }
}

/// Open a workbook by extension: `.json` exports always, spreadsheet formats
/// when built with the `xlsx` feature.
pub fn open_workbook(path: &Path) -> Result<Box<dyn Workbook>, SourceError> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or_default().to_ascii_lowercase();
    match ext.as_str() {
        "json" => Ok(Box::new(MemoryWorkbook::from_json_file(path)?)),
        #[cfg(feature = "xlsx")]
        "xlsx" | "xlsm" | "xls" | "xlsb" | "ods" => {
            Ok(Box::new(SpreadsheetWorkbook::open(path)?))
        }
        _ => Err(SourceError::UnsupportedFormat { path: path.to_path_buf() }),
    }
}

/// Prefer a sheet whose name mentions broad groups, ethnicity or data.
pub fn pick_sheet(names: &[String]) -> Option<&str> {
    names
        .iter()
        .find(|name| {
            let lower = name.to_lowercase();
            ["broad", "ethnic", "data"].iter().any(|k| lower.contains(k))
        })
        .or_else(|| names.first())
        .map(String::as_str)
}

/// Column indices located from the header row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnMap {
    pub name: Option<usize>,
    pub gss_code: Option<usize>,
    pub white_pct: Option<usize>,
    pub asian_pct: Option<usize>,
    pub black_pct: Option<usize>,
    pub mixed_pct: Option<usize>,
    pub other_pct: Option<usize>,
}

/// Map headers to fields. Each header is assigned to at most one field (the
/// first rule it satisfies); when several headers satisfy the same field the
/// rightmost one wins.
pub fn map_columns(headers: &[String]) -> ColumnMap {
    let mut map = ColumnMap::default();
    for (i, header) in headers.iter().enumerate() {
        let h = header.trim().to_lowercase();
        if h.is_empty() {
            continue;
        }
        let pct = h.contains('%');
        if ["constituency", "pcon24nm", "pcon name"].iter().any(|k| h.contains(k)) {
            map.name = Some(i);
        } else if ["pcon24cd", "gss", "code"].iter().any(|k| h.contains(k)) {
            map.gss_code = Some(i);
        } else if pct && h.contains("white") {
            map.white_pct = Some(i);
        } else if pct && h.contains("asian") {
            map.asian_pct = Some(i);
        } else if pct && h.contains("black") {
            map.black_pct = Some(i);
        } else if pct && h.contains("mixed") {
            map.mixed_pct = Some(i);
        } else if pct && h.contains("other") && !h.contains("ethnic") {
            map.other_pct = Some(i);
        }
    }
    map
}

/// Read constituency records out of a sheet.
///
/// Fails with `SourceError::Schema` when no name column can be found; rows
/// with an empty name are skipped.
pub fn records_from_sheet(sheet: &Sheet) -> Result<Vec<ConstituencyRecord>, SourceError> {
    let headers = sheet.headers();
    let columns = map_columns(&headers);
    debug!(sheet = %sheet.name, ?columns, "column mapping");

    let Some(name_col) = columns.name else {
        return Err(SourceError::Schema { sheet: sheet.name.clone(), headers });
    };

    let pct = |row: &[Cell], col: Option<usize>| {
        col.and_then(|c| row.get(c)).and_then(Cell::as_percentage)
    };

    let mut records = Vec::new();
    for row in sheet.rows.iter().skip(1) {
        let Some(name) = row.get(name_col).and_then(Cell::as_text) else {
            continue;
        };
        let mut record = ConstituencyRecord {
            name,
            gss_code: columns.gss_code.and_then(|c| row.get(c)).and_then(Cell::as_text),
            white_pct: pct(row, columns.white_pct),
            asian_pct: pct(row, columns.asian_pct),
            black_pct: pct(row, columns.black_pct),
            mixed_pct: pct(row, columns.mixed_pct),
            other_pct: pct(row, columns.other_pct),
            ..ConstituencyRecord::default()
        };
        record.nonwhite_pct = derive_nonwhite(&record);
        records.push(record);
    }

    info!(sheet = %sheet.name, "loaded {} constituencies", records.len());
    Ok(records)
}

/// Choose a sheet from the workbook and read it.
pub fn load_workbook(workbook: &mut dyn Workbook) -> Result<Vec<ConstituencyRecord>, SourceError> {
    let names = workbook.sheet_names();
    debug!(?names, "sheets found");
    let chosen = pick_sheet(&names)
        .map(str::to_string)
        .ok_or_else(|| SourceError::MissingSheet { sheet: "(workbook has no sheets)".into() })?;
    info!(sheet = %chosen, "using sheet");
    let sheet = workbook.sheet(&chosen)?;
    records_from_sheet(&sheet)
}
