///! Position API client for the ISS tracking feed
use anyhow::{Context, Result};
use std::time::Duration;

use super::types::{Coordinate, PositionResponse};

const POSITION_API_URL: &str = "http://api.open-notify.org/iss-now.json";
const REQUEST_TIMEOUT_SECONDS: u64 = 10;

/// Build the HTTP client shared by both API fetchers.
pub fn build_client() -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECONDS))
        .build()
        .context("Failed to build HTTP client")
}

/// Fetch the satellite's current position.
///
/// Transport failures and malformed responses surface as errors; the
/// caller treats either as "no data this tick".
pub async fn fetch_position(client: &reqwest::Client) -> Result<Coordinate> {
    let response = client
        .get(POSITION_API_URL)
        .send()
        .await
        .context("Failed to send position request")?;

    if !response.status().is_success() {
        anyhow::bail!("HTTP error {} from position API", response.status());
    }

    let data: PositionResponse = response
        .json()
        .await
        .context("Failed to parse position response")?;

    data.into_coordinate()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    #[ignore] // Requires network connection
    async fn test_fetch_position() {
        let client = build_client().unwrap();
        let result = fetch_position(&client).await;
        if let Ok(coordinate) = result {
            assert!(coordinate.latitude.abs() <= 90.0);
            assert!(coordinate.longitude.abs() <= 180.0);
        }
    }
}
