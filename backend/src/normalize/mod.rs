//! CSV normalizer: raw rows to a table of records.
//!
//! The pass is pure and runs in a fixed order:
//!
//! 1. Drop rows whose cells are all empty or whitespace-only.
//! 2. Pick the first row holding a cell that is neither empty nor the
//!    `"—"` sentinel as the header row. Rows before it are skipped.
//! 3. Build unique labels from it (see [`labels`]).
//! 4. Zip every later row against the labels. Placeholder cells become
//!    `None`, others keep their trimmed text.
//! 5. Keep only columns where some record has a value.
//! 6. Project records down to those columns and drop records left
//!    without any value.
//!
//! # Example
//!
//! ```
//! use daylight::normalize::normalize;
//!
//! let rows = vec![
//!     vec!["Name".to_string(), "Age".to_string()],
//!     vec!["Ann".to_string(), "—".to_string()],
//! ];
//! let table = normalize(&rows).unwrap();
//! assert_eq!(table.headers(), ["Name"]);
//! assert_eq!(table.get(0, "Name"), Some("Ann"));
//! ```

pub mod labels;
pub mod table;

pub use labels::{build_header_set, HeaderLabels, FALLBACK_PREFIX};
pub use table::{Record, Table};

use crate::error::{NormalizeError, NormalizeResult};

/// Marker the source files use for a missing value.
pub const SENTINEL: &str = "—";

/// One tokenized line before header interpretation.
pub type RawRow = Vec<String>;

/// True if the cell means "missing": blank after trimming, or the sentinel.
pub fn is_placeholder(cell: &str) -> bool {
    let trimmed = cell.trim();
    trimmed.is_empty() || trimmed == SENTINEL
}

fn is_blank_row(row: &[String]) -> bool {
    row.iter().all(|cell| cell.trim().is_empty())
}

fn has_real_cell(row: &[String]) -> bool {
    row.iter().any(|cell| !is_placeholder(cell))
}

fn to_value(cell: Option<&String>) -> Option<String> {
    match cell {
        Some(c) if !is_placeholder(c) => Some(c.trim().to_string()),
        _ => None,
    }
}

/// Normalize tokenized rows into a [`Table`].
pub fn normalize(rows: &[RawRow]) -> NormalizeResult<Table> {
    let non_empty: Vec<&RawRow> = rows.iter().filter(|row| !is_blank_row(row)).collect();
    if non_empty.is_empty() {
        return Err(NormalizeError::EmptyInput);
    }

    let header_index = non_empty
        .iter()
        .position(|row| has_real_cell(row))
        .ok_or(NormalizeError::NoHeaderFound)?;

    let headers = build_header_set(non_empty[header_index]);

    let records: Vec<Record> = non_empty[header_index + 1..]
        .iter()
        .map(|row| Record((0..headers.len()).map(|i| to_value(row.get(i))).collect()))
        .collect();

    let (kept, dropped): (Vec<usize>, Vec<usize>) = (0..headers.len())
        .partition(|&i| records.iter().any(|r| r.cell(i).is_some()));

    let projected = records
        .iter()
        .map(|r| r.project(&kept))
        .filter(Record::has_values)
        .collect();

    Ok(Table::new(
        kept.iter().map(|&i| headers[i].clone()).collect(),
        projected,
        dropped.iter().map(|&i| headers[i].clone()).collect(),
    ))
}
