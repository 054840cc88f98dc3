use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Geographic position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Raw payload of the position API.
///
/// The feed reports coordinates as nested strings, not numbers.
#[derive(Debug, Clone, Deserialize)]
pub struct PositionResponse {
    pub message: String,
    #[serde(default)]
    pub timestamp: Option<i64>,
    pub iss_position: RawPosition,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawPosition {
    pub latitude: String,
    pub longitude: String,
}

impl PositionResponse {
    /// Validate the envelope and parse the string coordinates.
    pub fn into_coordinate(self) -> Result<Coordinate> {
        if self.message != "success" {
            anyhow::bail!("Position API reported message {:?}", self.message);
        }

        let latitude = self
            .iss_position
            .latitude
            .parse::<f64>()
            .with_context(|| format!("Invalid latitude {:?}", self.iss_position.latitude))?;
        let longitude = self
            .iss_position
            .longitude
            .parse::<f64>()
            .with_context(|| format!("Invalid longitude {:?}", self.iss_position.longitude))?;

        Ok(Coordinate::new(latitude, longitude))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(message: &str, lat: &str, lon: &str) -> PositionResponse {
        let json = format!(
            r#"{{
                "message": "{message}",
                "timestamp": 1754500000,
                "iss_position": {{ "latitude": "{lat}", "longitude": "{lon}" }}
            }}"#
        );
        serde_json::from_str(&json).unwrap()
    }

    #[test]
    fn test_parse_nested_string_coordinates() {
        let response = sample("success", "26.5458", "-77.0197");
        let coordinate = response.into_coordinate().unwrap();
        assert_eq!(coordinate.latitude, 26.5458);
        assert_eq!(coordinate.longitude, -77.0197);
    }

    #[test]
    fn test_malformed_latitude_is_an_error() {
        let response = sample("success", "not-a-number", "0.0");
        assert!(response.into_coordinate().is_err());
    }

    #[test]
    fn test_non_success_message_is_an_error() {
        let response = sample("failure", "0.0", "0.0");
        assert!(response.into_coordinate().is_err());
    }

    #[test]
    fn test_timestamp_field_is_optional() {
        let json = r#"{
            "message": "success",
            "iss_position": { "latitude": "0.0", "longitude": "0.0" }
        }"#;
        let response: PositionResponse = serde_json::from_str(json).unwrap();
        assert!(response.timestamp.is_none());
        assert!(response.into_coordinate().is_ok());
    }
}
