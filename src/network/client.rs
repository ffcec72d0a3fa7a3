//! HTTP client wrapper - fetches and decodes the country list

use std::time::Duration;

use crate::error::FetchError;
use crate::models::Country;

/// Fetch the full country list in one request
pub async fn fetch_countries(
    client: &reqwest::Client,
    url: &str,
) -> Result<Vec<Country>, FetchError> {
    let resp = client.get(url).send().await.map_err(map_transport_error)?;

    let status = resp.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            status: status.as_u16(),
        });
    }

    let body = resp.text().await.map_err(map_transport_error)?;
    serde_json::from_str::<Vec<Country>>(&body).map_err(FetchError::Decode)
}

fn map_transport_error(e: reqwest::Error) -> FetchError {
    if e.is_timeout() {
        FetchError::Timeout
    } else if e.is_connect() {
        FetchError::Connect(e)
    } else {
        FetchError::Transport(e)
    }
}

/// Create an HTTP client with the given request timeout
pub fn create_client(timeout: Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}
