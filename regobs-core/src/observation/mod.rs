//! Observation records attached to a [`SnowRegistration`](crate::registration::SnowRegistration).
//!
//! Each category validates its inputs at construction and serializes to the
//! sparse JSON object expected by the RegObs v5 API: absent fields are left
//! out, present fields (including zeros) are kept.

pub mod avalanche;
pub mod avalanche_activity;
pub mod danger_sign;
pub mod incident;
pub mod note;
pub mod snow_cover;
pub mod weather;

pub use avalanche::AvalancheObs;
pub use avalanche_activity::{AvalancheActivity, Timeframe};
pub use danger_sign::{DangerSign, Sign};
pub use incident::Incident;
pub use note::Note;
pub use snow_cover::SnowCover;
pub use weather::Weather;

use crate::{
    error::{RegObsError, Result},
    tid::tid_enum,
};
use serde::Serialize;

tid_enum! {
    /// Destructive size of an avalanche (EAWS scale).
    DestructiveSize {
        D1 = 1,
        D2 = 2,
        D3 = 3,
        D4 = 4,
        D5 = 5,
        Unknown = 9,
    }
}

/// A web link attached to an incident or a note.
#[derive(Debug, PartialEq, Eq, Clone, Serialize)]
pub struct Url {
    #[serde(rename = "UrlDescription")]
    description: String,
    #[serde(rename = "UrlLine")]
    url: String,
}

impl Url {
    pub fn new(url: impl Into<String>, description: impl Into<String>) -> Url {
        Url {
            url: url.into(),
            description: description.into(),
        }
    }
}

/// Fail with [`RegObsError::NoObservation`] unless at least one field is present.
fn ensure_any(category: &str, present: &[bool]) -> Result<()> {
    if present.iter().any(|&p| p) {
        Ok(())
    } else {
        Err(RegObsError::NoObservation(format!(
            "no argument passed to {} observation",
            category
        )))
    }
}

/// Fail with [`RegObsError::Measurement`] if a given value is NaN or infinite.
fn ensure_finite(measurements: &[(&str, Option<f64>)]) -> Result<()> {
    match measurements
        .iter()
        .find(|(_, value)| value.is_some_and(|v| !v.is_finite()))
    {
        Some((name, value)) => Err(RegObsError::Measurement(format!(
            "{} must be a finite number (got {:?})",
            name,
            value.unwrap_or_default()
        ))),
        None => Ok(()),
    }
}
