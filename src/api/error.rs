//! Fetch errors

use std::path::PathBuf;

/// Errors while retrieving data from the dashboard backend or a local file
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Invalid endpoint '{endpoint}': {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },

    #[error("Failed to fetch from: {url}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("HTTP request failed: {url} (status: {status}){detail}")]
    Status {
        url: String,
        status: u16,
        /// Backend error message prefixed with ": ", or empty
        detail: String,
    },

    #[error("Failed to parse JSON response from: {origin}")]
    Decode {
        origin: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to read file: {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Resource not found: {0}")]
    NotFound(String),
}

impl FetchError {
    /// HTTP status code, when the backend answered
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, FetchError::NotFound(_)) || self.status() == Some(404)
    }
}
