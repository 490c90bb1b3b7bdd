//! UI Components for the Daylight viewer.
//!
//! - [`Hero`] - Page title
//! - [`UploadSection`] - CSV file picker
//! - [`ErrorBanner`] - Last failed attempt
//! - [`DataTable`] - Normalized table with placeholders

mod hero;
mod upload;
mod error_banner;
mod table;

pub use hero::*;
pub use upload::*;
pub use error_banner::*;
pub use table::*;
