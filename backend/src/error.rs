//! Error types for the Daylight intake pipeline.
//!
//! - [`CsvError`] - tokenizer errors (bytes to raw rows)
//! - [`NormalizeError`] - header detection and shaping errors
//! - [`IntakeError`] - top-level intake errors, shown to the user verbatim
//! - [`ServerError`] - HTTP layer errors
//! - [`ConfigError`] - invalid environment configuration
//!
//! Conversion is automatic via `From` implementations, so `?` works
//! across the boundaries. The `Display` output of [`IntakeError`] is the
//! exact message the page shows.

use thiserror::Error;

// =============================================================================
// Tokenizer Errors
// =============================================================================

/// Errors while turning file bytes into raw rows.
#[derive(Debug, Error)]
pub enum CsvError {
    /// Failed to read file.
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    /// The tokenizer produced nothing usable (binary content).
    #[error("Could not parse CSV file.")]
    TokenizerFailure,

    /// The tokenizer rejected the input.
    #[error("CSV parsing failed: {0}")]
    ParseFailed(String),
}

impl From<csv::Error> for CsvError {
    fn from(err: csv::Error) -> Self {
        CsvError::ParseFailed(err.to_string())
    }
}

// =============================================================================
// Normalization Errors
// =============================================================================

/// Errors while shaping raw rows into a table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizeError {
    /// Every row was empty or whitespace-only.
    #[error("CSV file contains no valid data.")]
    EmptyInput,

    /// No row holds a cell that is neither empty nor the "—" sentinel.
    #[error("Could not find valid headers in CSV.")]
    NoHeaderFound,
}

// =============================================================================
// Intake Errors (top-level)
// =============================================================================

/// Errors of a single upload attempt.
///
/// All variants are terminal for the attempt. The message is meant for
/// the end user and is rendered as-is.
#[derive(Debug, Error)]
pub enum IntakeError {
    /// File name does not end with `.csv`.
    #[error("Please upload a valid .csv file.")]
    InvalidExtension,

    /// Tokenizer error.
    #[error(transparent)]
    Csv(#[from] CsvError),

    /// Normalization error.
    #[error(transparent)]
    Normalize(#[from] NormalizeError),
}

// =============================================================================
// Server Errors
// =============================================================================

/// HTTP server errors.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Malformed request.
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Upload exceeds the configured size limit.
    #[error("File too large (limit {limit} bytes)")]
    PayloadTooLarge { limit: usize },

    /// Intake failed; the message is user-facing.
    #[error(transparent)]
    Intake(#[from] IntakeError),
}

// =============================================================================
// Configuration Errors
// =============================================================================

/// Invalid configuration values.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An environment variable could not be parsed.
    #[error("Invalid value for {key}: '{value}'")]
    InvalidValue { key: String, value: String },
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for tokenizer operations.
pub type CsvResult<T> = Result<T, CsvError>;

/// Result type for normalization.
pub type NormalizeResult<T> = Result<T, NormalizeError>;

/// Result type for intake operations.
pub type IntakeResult<T> = Result<T, IntakeError>;

/// Result type for server operations.
pub type ServerResult<T> = Result<T, ServerError>;
