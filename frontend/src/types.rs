//! Common types used across the frontend application.
//!
//! # Categories
//!
//! - **View State** - what the page currently shows
//! - **API Types** - backend response structures
//! - **Error Types** - frontend error handling

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::{CSV_EXTENSION, MAX_FILE_SIZE};

// =============================================================================
// View State
// =============================================================================

/// Everything the page renders from, replaced as a whole on every
/// upload attempt.
///
/// A failed attempt keeps the previously loaded table and only sets the
/// error, so the last good data stays on screen.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ViewState {
    /// Column labels, in file order
    pub headers: Vec<String>,
    /// Rows aligned with `headers`, `None` for a missing value
    pub rows: Vec<Vec<Option<String>>>,
    /// Message of the last failed attempt
    pub error: Option<String>,
}

impl ViewState {
    /// Fresh table, no error.
    pub fn loaded(headers: Vec<String>, rows: Vec<Vec<Option<String>>>) -> Self {
        Self {
            headers,
            rows,
            error: None,
        }
    }

    /// Same data, with an error message.
    pub fn failed(&self, message: impl Into<String>) -> Self {
        Self {
            headers: self.headers.clone(),
            rows: self.rows.clone(),
            error: Some(message.into()),
        }
    }

    /// Same data, error cleared.
    pub fn cleared(&self) -> Self {
        Self {
            headers: self.headers.clone(),
            rows: self.rows.clone(),
            error: None,
        }
    }

    /// State after a file pick, and whether the file should be uploaded.
    ///
    /// Any pick starts a new attempt, so the old error is cleared even
    /// when the dialog was cancelled (`None`) or the file is rejected.
    pub fn picked(&self, file: Option<(&str, f64)>) -> (Self, bool) {
        let next = self.cleared();
        match file.map(|(name, size)| check_file(name, size)) {
            None => (next, false),
            Some(Ok(())) => (next, true),
            Some(Err(e)) => (next.failed(e.to_string()), false),
        }
    }

    /// The table is only shown once there is at least one row.
    pub fn has_data(&self) -> bool {
        !self.rows.is_empty()
    }

    /// Cell at `row`/`col`, `None` when missing.
    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row)?.get(col)?.as_deref()
    }
}

impl From<UploadResponse> for ViewState {
    fn from(response: UploadResponse) -> Self {
        ViewState::loaded(response.headers, response.rows)
    }
}

// =============================================================================
// API Response Types
// =============================================================================

/// Response from the backend upload endpoint.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    /// Unique job identifier
    pub job_id: String,
    /// "ready" on success
    pub status: String,
    /// Columns with data
    pub headers: Vec<String>,
    /// Rows aligned with `headers`
    pub rows: Vec<Vec<Option<String>>>,
    pub metadata: ResponseMetadata,
}

/// Metadata about the intake.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseMetadata {
    pub file_name: String,
    pub encoding: String,
    pub delimiter: String,
    pub raw_row_count: usize,
    pub record_count: usize,
    #[serde(default)]
    pub dropped_columns: Vec<String>,
}

/// Error body returned by the backend.
#[derive(Clone, Debug, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

// =============================================================================
// Error Types
// =============================================================================

/// Frontend application errors.
#[derive(Clone, Debug, PartialEq)]
pub enum AppError {
    /// File was refused; the message is shown as-is.
    Rejected(String),
    /// Network/HTTP error.
    Network(String),
    /// Unexpected response from the backend.
    Response(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Rejected(msg) => write!(f, "{}", msg),
            AppError::Network(msg) => write!(f, "Network error: {}", msg),
            AppError::Response(msg) => write!(f, "Invalid server response: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

/// Result type alias for frontend operations.
pub type AppResult<T> = Result<T, AppError>;

/// Check a picked file before it is uploaded.
///
/// Extension check only, the content is not sniffed.
pub fn check_file(name: &str, size: f64) -> AppResult<()> {
    if !name.ends_with(CSV_EXTENSION) {
        return Err(AppError::Rejected("Please upload a valid .csv file.".to_string()));
    }
    if size > MAX_FILE_SIZE {
        return Err(AppError::Rejected(format!(
            "File is too large ({:.1} MB).",
            size / (1024.0 * 1024.0)
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded() -> ViewState {
        ViewState::loaded(
            vec!["Name".into(), "Ward".into()],
            vec![vec![Some("Ann".into()), None]],
        )
    }

    #[test]
    fn test_failed_keeps_previous_table() {
        let state = loaded();
        let failed = state.failed("Could not find valid headers in CSV.");

        assert_eq!(failed.headers, state.headers);
        assert_eq!(failed.rows, state.rows);
        assert_eq!(failed.error.as_deref(), Some("Could not find valid headers in CSV."));
        assert_eq!(failed.cleared(), state);
    }

    #[test]
    fn test_loaded_replaces_everything() {
        let state = loaded().failed("old error");
        let next = ViewState::loaded(vec!["A".into()], vec![vec![Some("1".into())]]);

        assert_ne!(next, state);
        assert!(next.error.is_none());
        assert_eq!(next.headers, vec!["A"]);
    }

    #[test]
    fn test_has_data_and_cells() {
        assert!(!ViewState::default().has_data());

        let state = loaded();
        assert!(state.has_data());
        assert_eq!(state.cell(0, 0), Some("Ann"));
        assert_eq!(state.cell(0, 1), None);
        assert_eq!(state.cell(3, 0), None);
    }

    #[test]
    fn test_cancelled_pick_clears_error() {
        let state = loaded().failed("Please upload a valid .csv file.");
        let (next, upload) = state.picked(None);

        assert!(!upload);
        assert_eq!(next, loaded());
    }

    #[test]
    fn test_pick_outcomes() {
        let state = loaded().failed("old error");

        let (next, upload) = state.picked(Some(("visits.csv", 10.0)));
        assert!(upload);
        assert_eq!(next, loaded());

        let (next, upload) = state.picked(Some(("visits.txt", 10.0)));
        assert!(!upload);
        assert_eq!(next.rows, state.rows);
        assert_eq!(next.error.as_deref(), Some("Please upload a valid .csv file."));
    }

    #[test]
    fn test_check_file() {
        assert!(check_file("visits.csv", 10.0).is_ok());
        assert_eq!(
            check_file("visits.xlsx", 10.0).unwrap_err().to_string(),
            "Please upload a valid .csv file."
        );
        assert!(check_file("big.csv", MAX_FILE_SIZE + 1.0).is_err());
    }
}
