//! HTTP API module.
//!
//! Server, response types and the log stream used by the intake.

pub mod logs;
pub mod server;
pub mod types;

pub use logs::*;
pub use server::{process_upload, router, start_server};
pub use types::*;
