/// Error types for the RegObs library
use thiserror::Error;

/// Main error type for RegObs operations
#[derive(Error, Debug)]
pub enum RegObsError {
    /// Coordinates outside the valid latitude/longitude ranges
    #[error("Latitude must be in the range -90--90, longitude -180--180 (got {lat}, {lon})")]
    Spatial { lat: f64, lon: f64 },

    /// Elevation out of range or combined with the wrong format
    #[error("Invalid elevation: {0}")]
    Elevation(String),

    /// Percentage outside 0--100
    #[error("Percentage must be within the range 0--100 (got {0})")]
    Percent(i32),

    /// An observation (or registration) without any informative field
    #[error("No observation: {0}")]
    NoObservation(String),

    /// A measurement that is not a finite number
    #[error("Invalid measurement: {0}")]
    Measurement(String),

    /// A timeframe token other than 0-6, 6-12, 12-18 or 18-24
    #[error("Unknown timeframe '{0}'")]
    UnknownTimeframe(String),

    /// Mutually exclusive attributes were given together
    #[error("Incompatible attributes: {0}")]
    IncompatibleAttributes(String),

    /// A local time could not be placed in the civil timezone
    #[error("Time {0} does not exist in Europe/Oslo")]
    Timezone(String),

    /// The credential exchange was rejected
    #[error("Authentication failed ({status}): {message}")]
    Auth { status: u16, message: String },

    /// Any other non-success response from the API
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// HTTP request failed
    #[cfg(feature = "api")]
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Failed to encode or decode JSON
    #[error("Failed to process JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Failed to write CSV data
    #[error("Failed to write CSV: {0}")]
    Csv(#[from] csv::Error),

    /// File I/O failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Missing or malformed configuration
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl RegObsError {
    /// True for errors raised while validating values or observations,
    /// before anything touches the network.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            RegObsError::Spatial { .. }
                | RegObsError::Elevation(_)
                | RegObsError::Percent(_)
                | RegObsError::Measurement(_)
                | RegObsError::UnknownTimeframe(_)
                | RegObsError::NoObservation(_)
                | RegObsError::IncompatibleAttributes(_)
                | RegObsError::Timezone(_)
        )
    }
}

/// Type alias for Results using RegObsError
pub type Result<T> = std::result::Result<T, RegObsError>;

#[cfg(test)]
mod tests {
    use super::RegObsError;

    #[test]
    fn test_validation_classification() {
        assert!(RegObsError::Percent(101).is_validation());
        assert!(RegObsError::NoObservation("empty".into()).is_validation());
        assert!(RegObsError::Measurement("wind speed".into()).is_validation());
        assert!(!RegObsError::Api {
            status: 500,
            message: String::new()
        }
        .is_validation());
        assert!(!RegObsError::Config("missing".into()).is_validation());
    }

    #[test]
    fn test_display_includes_status() {
        let err = RegObsError::Auth {
            status: 401,
            message: "bad credentials".into(),
        };
        assert_eq!(err.to_string(), "Authentication failed (401): bad credentials");
    }
}
