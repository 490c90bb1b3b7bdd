//! # Daylight - CSV upload and table viewer
//!
//! Takes an uploaded CSV file, finds its header row, drops empty rows and
//! columns, and returns a table where missing values are explicit.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   CSV File  │────▶│  Tokenizer  │────▶│ Normalizer  │────▶│ Table / HTML│
//! │ (.csv name) │     │ (auto-enc)  │     │ (headers)   │     │   / JSON    │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use daylight::{intake_file, IntakeOptions};
//!
//! let result = intake_file("visits.csv".as_ref(), &IntakeOptions::default())?;
//! println!("{} records", result.table.len());
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Hierarchical error types
//! - [`parser`] - Tokenizer with encoding and delimiter detection
//! - [`normalize`] - Header detection and table shaping
//! - [`intake`] - Extension check plus tokenize and normalize
//! - [`render`] - HTML output
//! - [`config`] - Environment configuration
//! - [`api`] - HTTP API server

pub mod error;
pub mod config;

// Parsing
pub mod parser;
pub mod normalize;
pub mod intake;

// Output
pub mod render;

// HTTP API
pub mod api;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{ConfigError, CsvError, IntakeError, NormalizeError, ServerError};

pub use config::Config;

pub use parser::{
    decode_content, detect_delimiter, detect_encoding, tokenize_bytes, tokenize_file,
    tokenize_str, Tokenized,
};

pub use normalize::{is_placeholder, normalize, RawRow, Record, Table, SENTINEL};

pub use intake::{intake_bytes, intake_file, IntakeOptions, IntakeOutput, SourceInfo};

pub use render::{render_page, render_table};

pub use api::types::{error_response, ResponseMetadata, UploadResponse};

// Server
pub mod server {
    pub use crate::api::server::{router, start_server};
}
