//! XLSX workbook loader.

use std::fs::File;
use std::io::{Cursor, Read};
use std::path::{Path, PathBuf};

use calamine::{DataType, Reader, Xlsx};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::sheet::Sheet;
use crate::error::{PharmaQueryError, Result};

/// Provenance metadata about the loaded workbook file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkbookMeta {
    /// File name without path.
    pub file: String,
    /// Full path to the file.
    pub path: PathBuf,
    /// SHA-256 hash of the file contents.
    pub hash: String,
    /// File size in bytes.
    pub size_bytes: u64,
    /// Number of sheets loaded.
    pub sheet_count: usize,
    /// When the workbook was loaded.
    pub loaded_at: DateTime<Utc>,
}

/// The source workbook: an ordered mapping from sheet name to [`Sheet`].
///
/// Loaded once, immutable thereafter. Sheet order matches workbook order.
#[derive(Debug, Clone)]
pub struct Workbook {
    /// Provenance metadata for the source file.
    pub meta: WorkbookMeta,
    sheets: IndexMap<String, Sheet>,
}

impl Workbook {
    /// Open an XLSX file and parse every sheet into a [`Sheet`].
    ///
    /// Fails with a load error (missing file, malformed workbook, no sheets);
    /// callers treat that as a non-fatal "no data" state.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let mut file = File::open(path).map_err(|e| PharmaQueryError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let mut contents = Vec::new();
        file.read_to_end(&mut contents)
            .map_err(|e| PharmaQueryError::Io {
                path: path.to_path_buf(),
                source: e,
            })?;
        let size_bytes = contents.len() as u64;

        let mut hasher = Sha256::new();
        hasher.update(&contents);
        let hash = format!("sha256:{:x}", hasher.finalize());

        let mut xlsx: Xlsx<_> =
            Xlsx::new(Cursor::new(contents)).map_err(|e| PharmaQueryError::Workbook {
                path: path.to_path_buf(),
                source: e,
            })?;

        let names: Vec<String> = xlsx.sheet_names().to_owned();
        if names.is_empty() {
            return Err(PharmaQueryError::EmptyData(format!(
                "workbook '{}' has no sheets",
                path.display()
            )));
        }

        let mut sheets = IndexMap::with_capacity(names.len());
        for name in names {
            // Non-worksheet entries (e.g. chart sheets) have no range.
            let Some(range_result) = xlsx.worksheet_range(&name) else {
                continue;
            };
            let range = range_result.map_err(|e| PharmaQueryError::Workbook {
                path: path.to_path_buf(),
                source: e,
            })?;
            sheets.insert(name.clone(), sheet_from_range(name, &range));
        }

        if sheets.is_empty() {
            return Err(PharmaQueryError::EmptyData(format!(
                "workbook '{}' has no readable worksheets",
                path.display()
            )));
        }

        let meta = WorkbookMeta {
            file: path
                .file_name()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default(),
            path: path.to_path_buf(),
            hash,
            size_bytes,
            sheet_count: sheets.len(),
            loaded_at: Utc::now(),
        };

        Ok(Self { meta, sheets })
    }

    /// Build a workbook from already-parsed sheets (no backing file).
    pub fn from_sheets(sheets: Vec<Sheet>) -> Self {
        let meta = WorkbookMeta {
            file: "in-memory".to_string(),
            path: PathBuf::from("in-memory"),
            hash: String::new(),
            size_bytes: 0,
            sheet_count: sheets.len(),
            loaded_at: Utc::now(),
        };
        let sheets = sheets.into_iter().map(|s| (s.name.clone(), s)).collect();
        Self { meta, sheets }
    }

    /// Sheet names in workbook order.
    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.keys().map(String::as_str).collect()
    }

    /// Look up a sheet by name, exact match first, then case-insensitive.
    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.get(name).or_else(|| {
            self.sheets
                .values()
                .find(|s| s.name.trim().eq_ignore_ascii_case(name.trim()))
        })
    }

    /// Look up a sheet by zero-based position in load order.
    pub fn sheet_at(&self, index: usize) -> Option<&Sheet> {
        self.sheets.get_index(index).map(|(_, sheet)| sheet)
    }

    /// First sheet whose name contains `keyword` (case-insensitive).
    pub fn sheet_containing(&self, keyword: &str) -> Option<&Sheet> {
        let keyword = keyword.to_lowercase();
        self.sheets
            .values()
            .find(|s| s.name.to_lowercase().contains(&keyword))
    }

    /// Number of loaded sheets.
    pub fn len(&self) -> usize {
        self.sheets.len()
    }

    /// Whether the workbook holds no sheets.
    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }

    /// Iterate over the sheets in workbook order.
    pub fn iter(&self) -> impl Iterator<Item = &Sheet> {
        self.sheets.values()
    }
}

fn sheet_from_range(name: String, range: &calamine::Range<DataType>) -> Sheet {
    let mut rows_iter = range.rows();
    let headers: Vec<String> = rows_iter
        .next()
        .map(|row| row.iter().map(cell_to_string).collect())
        .unwrap_or_default();
    let width = headers.len();

    let rows: Vec<Vec<String>> = rows_iter
        .map(|row| {
            let mut cells: Vec<String> = row.iter().map(cell_to_string).collect();
            if cells.len() < width {
                cells.resize(width, String::new());
            }
            cells
        })
        .collect();

    Sheet::new(name, headers, rows)
}

fn cell_to_string(cell: &DataType) -> String {
    match cell {
        DataType::String(value) => value.clone(),
        DataType::Float(value) => value.to_string(),
        DataType::Int(value) => value.to_string(),
        DataType::Bool(value) => value.to_string(),
        DataType::Empty => String::new(),
        other => other.to_string(),
    }
}
