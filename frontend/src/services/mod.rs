//! Backend services.
//!
//! - [`upload`] - CSV upload to the Daylight backend

pub mod upload;

pub use upload::*;
