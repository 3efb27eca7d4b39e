use crate::error::{RegObsError, Result};
use serde::Serialize;

/// A geographic position in decimal degrees (WGS84).
#[derive(Debug, PartialEq, Clone, Copy, Serialize)]
pub struct Position {
    lat: f64,
    lon: f64,
}

impl Position {
    /// Create a position, rejecting latitudes outside -90..=90 and
    /// longitudes outside -180..=180.
    pub fn new(lat: f64, lon: f64) -> Result<Position> {
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
            return Err(RegObsError::Spatial { lat, lon });
        }
        Ok(Position { lat, lon })
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn lon(&self) -> f64 {
        self.lon
    }
}
