//! Application configuration.
//!
//! Compile-time constants for the Daylight frontend.

/// Backend API base URL.
pub const BACKEND_URL: &str = "http://localhost:3000";

/// Page heading.
pub const APP_TITLE: &str = "Daylight Healthcare";

/// Maximum file size accepted before upload (in bytes).
///
/// Matches the backend default of 10 MB.
pub const MAX_FILE_SIZE: f64 = 10.0 * 1024.0 * 1024.0;

/// Accepted file name suffix.
pub const CSV_EXTENSION: &str = ".csv";

/// Glyph shown in place of a missing value.
pub const PLACEHOLDER: &str = "—";

/// Tooltip on missing values.
pub const UNAVAILABLE_TOOLTIP: &str = "Information unavailable!";
