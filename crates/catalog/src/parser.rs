//! Parser for the movie catalog CSV.
//!
//! Format: one header row, then one movie per row. The header must name at
//! least `title`, `genres`, `director`, `keywords` and `rating`; any other
//! column is carried through untouched.
//!
//! Cells are typed per column, not per cell: a column is `Integer` if every
//! present cell parses as an integer, `Float` if every one parses as a
//! number, `Bool` if every one is `true`/`false`, and `Text` otherwise. Empty
//! cells and the usual missing-value markers (`NA`, `N/A`, `null`, `nan`, ...)
//! are `Null` and take no part in the choice, so one `N/A` rating leaves the
//! column numeric. The engine's text columns are never coerced, so a movie
//! titled "1917" stays a string and a director named "NA" stays "NA".

use crate::error::{CatalogError, Result};
use crate::types::*;
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

/// Cell values read as missing, matching what pandas' `read_csv` treats as NaN
const NA_VALUES: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

fn is_missing(cell: &str) -> bool {
    let trimmed = cell.trim();
    trimmed.is_empty() || NA_VALUES.contains(&trimmed)
}

/// Type chosen for a whole column after looking at every cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnKind {
    Integer,
    Float,
    Bool,
    Text,
    /// The engine's text columns: only an empty cell is missing
    Verbatim,
}

impl ColumnKind {
    fn convert(self, cell: &str) -> FieldValue {
        if self == ColumnKind::Verbatim {
            return if cell.is_empty() {
                FieldValue::Null
            } else {
                FieldValue::from(cell)
            };
        }
        if is_missing(cell) {
            return FieldValue::Null;
        }
        let trimmed = cell.trim();
        match self {
            ColumnKind::Integer => trimmed
                .parse()
                .map(FieldValue::Integer)
                .unwrap_or_else(|_| FieldValue::from(cell)),
            ColumnKind::Float => trimmed
                .parse()
                .map(FieldValue::Float)
                .unwrap_or_else(|_| FieldValue::from(cell)),
            ColumnKind::Bool => parse_bool(trimmed)
                .map(FieldValue::Bool)
                .unwrap_or_else(|| FieldValue::from(cell)),
            ColumnKind::Text | ColumnKind::Verbatim => FieldValue::from(cell),
        }
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    if s.eq_ignore_ascii_case("true") {
        Some(true)
    } else if s.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

/// Pick the narrowest kind that fits every present cell of a column
fn infer_column_kind<'a>(name: &str, cells: impl Iterator<Item = &'a str> + Clone) -> ColumnKind {
    if TEXT_COLUMNS.contains(&name) {
        return ColumnKind::Verbatim;
    }

    let mut present = cells.filter(|cell| !is_missing(cell)).map(str::trim);
    if present.clone().all(|cell| cell.parse::<i64>().is_ok()) {
        ColumnKind::Integer
    } else if present.clone().all(|cell| cell.parse::<f64>().is_ok()) {
        ColumnKind::Float
    } else if present.all(|cell| parse_bool(cell).is_some()) {
        ColumnKind::Bool
    } else {
        ColumnKind::Text
    }
}

/// Parse the catalog file at `path`
pub fn parse_catalog(path: &Path) -> Result<Vec<MovieRecord>> {
    let file = File::open(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => CatalogError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => CatalogError::IoError(e),
    })?;
    parse_reader(file)
}

/// Parse catalog CSV from any reader
pub fn parse_reader<R: Read>(source: R) -> Result<Vec<MovieRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(source);

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(CatalogError::MissingColumn {
                column: column.to_string(),
            });
        }
    }

    // Collect raw rows first; column kinds need to see every cell
    let mut rows: Vec<csv::StringRecord> = Vec::new();
    for result in reader.records() {
        let row = result?;
        if row.len() > headers.len() {
            let line = row.position().map(|p| p.line()).unwrap_or(0);
            return Err(CatalogError::ParseError {
                line,
                reason: format!(
                    "Expected {} fields but found {}",
                    headers.len(),
                    row.len()
                ),
            });
        }
        rows.push(row);
    }

    let kinds: Vec<ColumnKind> = headers
        .iter()
        .enumerate()
        .map(|(col, name)| {
            infer_column_kind(name, rows.iter().map(move |row| row.get(col).unwrap_or("")))
        })
        .collect();

    let movies: Vec<MovieRecord> = rows
        .iter()
        .map(|row| {
            headers
                .iter()
                .zip(&kinds)
                .enumerate()
                .map(|(col, (name, kind))| {
                    // Short rows are padded with nulls
                    (name.clone(), kind.convert(row.get(col).unwrap_or("")))
                })
                .collect::<MovieRecord>()
        })
        .collect();

    Ok(movies)
}
