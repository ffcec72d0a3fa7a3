//! Network messages - communication between App and Network layers

use crate::models::Country;

/// Commands sent from App layer to Network layer
#[derive(Debug, Clone)]
pub enum NetworkCommand {
    /// Fetch the full country list
    FetchCountries {
        id: u64,
        url: String,
    },
    /// Shutdown the network actor
    Shutdown,
}

/// Responses sent from Network layer to App layer.
///
/// Each fetch produces exactly one of these.
#[derive(Debug, Clone)]
pub enum NetworkResponse {
    CountriesLoaded {
        id: u64,
        countries: Vec<Country>,
        time_ms: u64,
    },
    FetchFailed {
        id: u64,
        message: String,
        time_ms: u64,
    },
}

impl NetworkResponse {
    /// Get the request ID from the response
    pub fn id(&self) -> u64 {
        match self {
            NetworkResponse::CountriesLoaded { id, .. } => *id,
            NetworkResponse::FetchFailed { id, .. } => *id,
        }
    }

    pub fn time_ms(&self) -> u64 {
        match self {
            NetworkResponse::CountriesLoaded { time_ms, .. } => *time_ms,
            NetworkResponse::FetchFailed { time_ms, .. } => *time_ms,
        }
    }
}
