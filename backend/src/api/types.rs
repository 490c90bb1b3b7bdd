//! REST API types for the frontend.
//!
//! Rows are sent as arrays aligned with `headers`, `null` for a missing
//! value, so column order survives JSON.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::intake::IntakeOutput;

/// Response sent after a successful upload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    /// Unique job identifier
    pub job_id: String,

    /// Always "ready" on success
    pub status: String,

    /// Columns with data, in file order
    pub headers: Vec<String>,

    /// One entry per record, aligned with `headers`
    pub rows: Vec<Vec<Option<String>>>,

    pub metadata: ResponseMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseMetadata {
    pub file_name: String,
    pub encoding: String,
    pub delimiter: String,
    /// Rows seen by the tokenizer
    pub raw_row_count: usize,
    pub record_count: usize,
    /// Columns removed because every value was missing
    pub dropped_columns: Vec<String>,
}

impl From<IntakeOutput> for UploadResponse {
    fn from(output: IntakeOutput) -> Self {
        let IntakeOutput { table, source } = output;

        UploadResponse {
            job_id: Uuid::new_v4().to_string(),
            status: "ready".to_string(),
            headers: table.headers().to_vec(),
            rows: table.records().iter().map(|r| r.cells().to_vec()).collect(),
            metadata: ResponseMetadata {
                file_name: source.file_name,
                encoding: source.encoding,
                delimiter: source.delimiter.to_string(),
                raw_row_count: source.raw_row_count,
                record_count: table.len(),
                dropped_columns: table.dropped_columns().to_vec(),
            },
        }
    }
}

/// Create an error response carrying a user-facing message.
pub fn error_response(error: &str) -> Value {
    json!({
        "jobId": Uuid::new_v4().to_string(),
        "status": "error",
        "error": error,
        "headers": [],
        "rows": [],
    })
}
