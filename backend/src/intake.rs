//! Upload intake: extension check, tokenize, normalize.
//!
//! This is the one entry point used by both the HTTP handler and the CLI.
//! Every step reports to the log broadcaster so connected clients can
//! follow progress.
//!
//! ```rust,ignore
//! use daylight::intake::{intake_bytes, IntakeOptions};
//!
//! let result = intake_bytes("patients.csv", &bytes, &IntakeOptions::default())?;
//! println!("{} rows, {} columns", result.table.len(), result.table.headers().len());
//! ```

use serde::Serialize;
use std::path::Path;

use crate::api::logs::{log_info, log_success, log_warning};
use crate::error::{IntakeError, IntakeResult};
use crate::normalize::{normalize, Table};
use crate::parser::{format_delimiter, tokenize_bytes, Tokenized};

/// Accepted file name suffix.
pub const CSV_EXTENSION: &str = ".csv";

/// Options for an intake run.
#[derive(Debug, Clone, Default)]
pub struct IntakeOptions {
    /// Force a delimiter instead of detecting it
    pub delimiter: Option<char>,
}

/// Where the table came from.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceInfo {
    pub file_name: String,
    pub encoding: String,
    pub delimiter: char,
    /// Rows produced by the tokenizer, before normalization
    pub raw_row_count: usize,
}

/// Successful intake.
#[derive(Debug, Clone)]
pub struct IntakeOutput {
    pub table: Table,
    pub source: SourceInfo,
}

/// Extension check only, the content is not sniffed.
pub fn has_csv_extension(file_name: &str) -> bool {
    file_name.ends_with(CSV_EXTENSION)
}

/// Run the intake on uploaded bytes.
pub fn intake_bytes(
    file_name: &str,
    bytes: &[u8],
    options: &IntakeOptions,
) -> IntakeResult<IntakeOutput> {
    if !has_csv_extension(file_name) {
        log_warning(format!("Rejected '{}': not a .csv file", file_name));
        return Err(IntakeError::InvalidExtension);
    }

    log_info(format!("📖 Reading {} ({} bytes)...", file_name, bytes.len()));
    let tokenized = tokenize_bytes(bytes, options.delimiter)?;
    log_success(format!("Detected encoding: {}", tokenized.encoding));
    log_success(format!(
        "Detected separator: '{}'",
        format_delimiter(tokenized.delimiter)
    ));
    log_success(format!("Read {} rows", tokenized.rows.len()));

    finish(file_name, tokenized)
}

/// Run the intake on a file on disk.
pub fn intake_file(path: &Path, options: &IntakeOptions) -> IntakeResult<IntakeOutput> {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    if !has_csv_extension(&file_name) {
        return Err(IntakeError::InvalidExtension);
    }

    let bytes = std::fs::read(path).map_err(crate::error::CsvError::from)?;
    intake_bytes(&file_name, &bytes, options)
}

fn finish(file_name: &str, tokenized: Tokenized) -> IntakeResult<IntakeOutput> {
    let table = normalize(&tokenized.rows)?;

    log_success(format!(
        "Normalized {} records across {} columns",
        table.len(),
        table.headers().len()
    ));
    if !table.dropped_columns().is_empty() {
        log_warning(format!(
            "Dropped empty columns: {}",
            table.dropped_columns().join(", ")
        ));
    }

    Ok(IntakeOutput {
        source: SourceInfo {
            file_name: file_name.to_string(),
            encoding: tokenized.encoding,
            delimiter: tokenized.delimiter,
            raw_row_count: tokenized.rows.len(),
        },
        table,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CsvError, NormalizeError};
    use std::io::Write;

    #[test]
    fn test_extension_check() {
        assert!(has_csv_extension("data.csv"));
        assert!(!has_csv_extension("data.CSV"));
        assert!(!has_csv_extension("data.csv.txt"));
        assert!(!has_csv_extension("csv"));
    }

    #[test]
    fn test_wrong_extension_rejected_before_parsing() {
        let err = intake_bytes("data.xlsx", b"\0\0", &IntakeOptions::default()).unwrap_err();
        assert!(matches!(err, IntakeError::InvalidExtension));
        assert_eq!(err.to_string(), "Please upload a valid .csv file.");
    }

    #[test]
    fn test_intake_bytes() {
        let csv = "Name,Age,Notes\nAnn,34,—\nBob,,\n";
        let result = intake_bytes("people.csv", csv.as_bytes(), &IntakeOptions::default()).unwrap();

        assert_eq!(result.table.headers(), ["Name", "Age"]);
        assert_eq!(result.table.len(), 2);
        assert_eq!(result.source.delimiter, ',');
        assert_eq!(result.source.raw_row_count, 3);
        assert_eq!(result.source.file_name, "people.csv");
    }

    #[test]
    fn test_forced_delimiter() {
        let options = IntakeOptions { delimiter: Some(';') };
        let result = intake_bytes("x.csv", b"a,b;c\n1,2;3\n", &options).unwrap();
        assert_eq!(result.table.headers(), ["a,b", "c"]);
    }

    #[test]
    fn test_errors_surface_user_messages() {
        let options = IntakeOptions::default();

        let err = intake_bytes("e.csv", b",,\n , \n", &options).unwrap_err();
        assert!(matches!(err, IntakeError::Normalize(NormalizeError::EmptyInput)));

        let err = intake_bytes("e.csv", "—,—\n,—\n".as_bytes(), &options).unwrap_err();
        assert_eq!(err.to_string(), "Could not find valid headers in CSV.");

        let err = intake_bytes("e.csv", b"a,b\n\0", &options).unwrap_err();
        assert!(matches!(err, IntakeError::Csv(CsvError::TokenizerFailure)));
    }

    #[test]
    fn test_empty_file_is_empty_input() {
        let err = intake_bytes("e.csv", b"", &IntakeOptions::default()).unwrap_err();
        assert_eq!(err.to_string(), "CSV file contains no valid data.");
    }

    #[test]
    fn test_intake_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("visits.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "Patient;Ward").unwrap();
        writeln!(file, "P-1;East").unwrap();

        let result = intake_file(&path, &IntakeOptions::default()).unwrap();
        assert_eq!(result.table.get(0, "Ward"), Some("East"));
        assert_eq!(result.source.delimiter, ';');

        let other = dir.path().join("visits.txt");
        std::fs::write(&other, "a,b").unwrap();
        assert!(matches!(
            intake_file(&other, &IntakeOptions::default()),
            Err(IntakeError::InvalidExtension)
        ));
    }
}
