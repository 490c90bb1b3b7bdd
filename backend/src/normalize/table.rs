//! Normalized table: column labels plus records aligned to them.

use serde::{Deserialize, Serialize};

use super::{RawRow, SENTINEL};

/// One normalized data row. Cells are aligned with [`Table::headers`];
/// `None` marks a missing value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(pub Vec<Option<String>>);

impl Record {
    pub fn cells(&self) -> &[Option<String>] {
        &self.0
    }

    pub fn cell(&self, index: usize) -> Option<&str> {
        self.0.get(index).and_then(|c| c.as_deref())
    }

    /// True if at least one cell holds a value.
    pub fn has_values(&self) -> bool {
        self.0.iter().any(Option::is_some)
    }

    /// Keep only the cells at `indices`, in that order.
    pub(crate) fn project(&self, indices: &[usize]) -> Record {
        Record(indices.iter().map(|&i| self.0.get(i).cloned().flatten()).collect())
    }
}

/// Result of a normalization pass.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    headers: Vec<String>,
    records: Vec<Record>,
    /// Header labels removed because no record had a value for them.
    #[serde(default)]
    dropped_columns: Vec<String>,
}

impl Table {
    pub(crate) fn new(headers: Vec<String>, records: Vec<Record>, dropped_columns: Vec<String>) -> Self {
        Self {
            headers,
            records,
            dropped_columns,
        }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn dropped_columns(&self) -> &[String] {
        &self.dropped_columns
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn column_index(&self, label: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == label)
    }

    /// Value of `label` in record `row`, `None` if absent or out of range.
    pub fn get(&self, row: usize, label: &str) -> Option<&str> {
        let col = self.column_index(label)?;
        self.records.get(row)?.cell(col)
    }

    /// Records as `(label, value)` pairs, in column order.
    pub fn iter_labeled(&self) -> impl Iterator<Item = Vec<(&str, Option<&str>)>> + '_ {
        self.records.iter().map(move |record| {
            self.headers
                .iter()
                .enumerate()
                .map(|(i, h)| (h.as_str(), record.cell(i)))
                .collect()
        })
    }

    /// Back to raw rows: header row first, absent cells as the sentinel.
    ///
    /// Normalizing the result gives back the same headers and records.
    /// `dropped_columns` is not carried, so it comes back empty. A table
    /// with no columns yields a single empty header row, which normalizes
    /// to [`NormalizeError::EmptyInput`](crate::error::NormalizeError::EmptyInput).
    pub fn to_raw_rows(&self) -> Vec<RawRow> {
        let mut rows = Vec::with_capacity(self.records.len() + 1);
        rows.push(self.headers.clone());
        for record in &self.records {
            rows.push(
                record
                    .cells()
                    .iter()
                    .map(|c| c.clone().unwrap_or_else(|| SENTINEL.to_string()))
                    .collect(),
            );
        }
        rows
    }

    /// Serialize as CSV text (comma-delimited, header row first).
    pub fn to_csv(&self) -> Result<String, csv::Error> {
        let mut writer = csv::WriterBuilder::new().from_writer(Vec::new());
        for row in self.to_raw_rows() {
            writer.write_record(&row)?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| csv::Error::from(e.into_error()))?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}
