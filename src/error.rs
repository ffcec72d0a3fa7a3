//! Error types for the country fetch

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    /// Endpoint answered with a non-success status
    #[error("Failed to fetch countries")]
    Status { status: u16 },
    #[error("Connection failed: {0}")]
    Connect(#[source] reqwest::Error),
    #[error("Request timed out")]
    Timeout,
    #[error("Request failed: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("Invalid country data: {0}")]
    Decode(#[source] serde_json::Error),
}

impl FetchError {
    pub fn status_code(&self) -> Option<u16> {
        match self {
            FetchError::Status { status } => Some(*status),
            _ => None,
        }
    }
}
