// src/lesson/location.rs

use serde::{Deserialize, Serialize};

/// Persisted in place of coordinates when no position was available.
pub const LOCATION_NOT_AVAILABLE: &str = "Not available";

/// Result of the one-shot geolocation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationReading {
    Position { lat: f64, lon: f64 },
    Unavailable(String),
}

impl LocationReading {
    /// Coordinates rounded to two decimals, for display only.
    pub fn display_text(&self) -> Option<String> {
        match self {
            LocationReading::Position { lat, lon } => Some(format!(
                "{:.2}, {:.2}",
                round_to_cents(*lat),
                round_to_cents(*lon)
            )),
            LocationReading::Unavailable(_) => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            LocationReading::Position { .. } => None,
            LocationReading::Unavailable(msg) => Some(msg),
        }
    }
}

/// Location text stored with a progress record. Coordinates are written unrounded.
pub fn persisted_location_text(reading: Option<&LocationReading>) -> String {
    match reading {
        Some(LocationReading::Position { lat, lon }) => {
            format!("{}, {}", positive_zero(*lat), positive_zero(*lon))
        }
        _ => LOCATION_NOT_AVAILABLE.to_string(),
    }
}

/// `-0.0` prints as "-0"; coordinates never carry a signed zero.
fn positive_zero(value: f64) -> f64 {
    if value == 0.0 { 0.0 } else { value }
}

/// Two decimals with ties rounded away from zero (`{:.2}` alone rounds ties to even).
fn round_to_cents(value: f64) -> f64 {
    (positive_zero(value) * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_rounds_to_two_decimals() {
        let reading = LocationReading::Position {
            lat: 37.774929,
            lon: -122.419416,
        };
        assert_eq!(reading.display_text().as_deref(), Some("37.77, -122.42"));
    }

    #[test]
    fn display_rounds_ties_away_from_zero() {
        let reading = LocationReading::Position {
            lat: 37.125,
            lon: -122.125,
        };
        assert_eq!(reading.display_text().as_deref(), Some("37.13, -122.13"));
    }

    #[test]
    fn negative_zero_is_written_unsigned() {
        let reading = LocationReading::Position { lat: 37.125, lon: -0.0 };
        assert_eq!(reading.display_text().as_deref(), Some("37.13, 0.00"));
        assert_eq!(persisted_location_text(Some(&reading)), "37.125, 0");

        // A small negative value keeps its sign, as the browser does.
        let near_zero = LocationReading::Position { lat: -0.001, lon: 0.0 };
        assert_eq!(near_zero.display_text().as_deref(), Some("-0.00, 0.00"));
    }

    #[test]
    fn persisted_text_keeps_raw_values() {
        let reading = LocationReading::Position {
            lat: 37.774929,
            lon: -122.419416,
        };
        assert_eq!(
            persisted_location_text(Some(&reading)),
            "37.774929, -122.419416"
        );

        let short = LocationReading::Position {
            lat: 37.77,
            lon: -122.42,
        };
        assert_eq!(persisted_location_text(Some(&short)), "37.77, -122.42");
    }

    #[test]
    fn missing_or_failed_reading_is_not_available() {
        assert_eq!(persisted_location_text(None), "Not available");
        let denied = LocationReading::Unavailable("User denied Geolocation".to_string());
        assert_eq!(persisted_location_text(Some(&denied)), "Not available");
        assert_eq!(denied.display_text(), None);
        assert_eq!(denied.error(), Some("User denied Geolocation"));
    }
}
