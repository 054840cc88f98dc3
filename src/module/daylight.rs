///! Sunrise/sunset API client for the observer's daylight window
use anyhow::{Context, Result};
use chrono::{DateTime, Timelike};
use serde::Deserialize;

use crate::module::sat::Coordinate;

const DAYLIGHT_API_URL: &str = "https://api.sunrise-sunset.org/json";

/// UTC sunrise/sunset hours for one day at one location.
///
/// The pair may wrap past midnight depending on the observer's
/// longitude. Hour granularity only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DaylightWindow {
    pub sunrise_hour_utc: u32,
    pub sunset_hour_utc: u32,
}

/// Raw payload of the sunrise/sunset API.
#[derive(Debug, Clone, Deserialize)]
pub struct DaylightResponse {
    pub status: String,
    pub results: DaylightResults,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DaylightResults {
    pub sunrise: String,
    pub sunset: String,
}

impl DaylightResponse {
    /// Extract the hour components from the ISO 8601 timestamps.
    pub fn into_window(self) -> Result<DaylightWindow> {
        if self.status != "OK" {
            anyhow::bail!("Daylight API reported status {:?}", self.status);
        }

        Ok(DaylightWindow {
            sunrise_hour_utc: hour_of(&self.results.sunrise)?,
            sunset_hour_utc: hour_of(&self.results.sunset)?,
        })
    }
}

fn hour_of(timestamp: &str) -> Result<u32> {
    let parsed = DateTime::parse_from_rfc3339(timestamp)
        .with_context(|| format!("Invalid timestamp {:?}", timestamp))?;
    Ok(parsed.hour())
}

/// Fetch today's daylight window for the observer.
///
/// `formatted=0` asks the API for unformatted ISO 8601 UTC timestamps
/// instead of its default 12-hour local strings.
pub async fn fetch_window(
    client: &reqwest::Client,
    observer: Coordinate,
) -> Result<DaylightWindow> {
    let response = client
        .get(DAYLIGHT_API_URL)
        .query(&[
            ("lat", observer.latitude.to_string()),
            ("lng", observer.longitude.to_string()),
            ("formatted", "0".to_string()),
        ])
        .send()
        .await
        .context("Failed to send daylight request")?;

    if !response.status().is_success() {
        anyhow::bail!("HTTP error {} from daylight API", response.status());
    }

    let data: DaylightResponse = response
        .json()
        .await
        .context("Failed to parse daylight response")?;

    data.into_window()
}
