//! Dashboard backend access
//!
//! Provides sources for debug payloads and the namespace list endpoints:
//! - The dashboard HTTP backend (most common)
//! - Local JSON files (offline inspection and testing)

mod error;
mod file;
mod http;
mod source;

pub use error::FetchError;
pub use file::{FileDebugSource, read_payload};
pub use http::{HttpDashboardClient, parse_duration};
pub use source::DebugSource;
