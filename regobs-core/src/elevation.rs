use crate::{
    error::{RegObsError, Result},
    tid::tid_enum,
};
use serde::Serialize;

/// Highest elevation (m.a.s.l.) accepted by RegObs.
pub const MAX_ELEVATION: i32 = 2500;

tid_enum! {
    /// How the one or two elevations of an [`Elevation`] are combined.
    ElevationFormat {
        /// Above the given elevation
        Above = 1,
        /// Below the given elevation
        Below = 2,
        /// Above the upper and below the lower elevation
        Sandwich = 3,
        /// Between the two elevations
        Middle = 4,
    }
}

impl ElevationFormat {
    fn uses_secondary(self) -> bool {
        matches!(self, ElevationFormat::Sandwich | ElevationFormat::Middle)
    }
}

/// An elevation band as reported for avalanche activity.
///
/// Two-value formats are rounded to the nearest hundred meters. Serializes
/// to the flat `ExposedHeight*` fields of the owning observation.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize)]
pub struct Elevation {
    #[serde(rename = "ExposedHeightComboTID")]
    format: ElevationFormat,
    #[serde(rename = "ExposedHeight1")]
    max: i32,
    #[serde(rename = "ExposedHeight2", skip_serializing_if = "Option::is_none")]
    min: Option<i32>,
}

impl Elevation {
    /// Validate and build an elevation.
    ///
    /// `Above` and `Below` take a single elevation, `Sandwich` and `Middle`
    /// require `secondary`. All values must lie within 0..=2500.
    pub fn new(format: ElevationFormat, elevation: i32, secondary: Option<i32>) -> Result<Elevation> {
        let in_range = |e: i32| (0..=MAX_ELEVATION).contains(&e);
        if !in_range(elevation) || secondary.is_some_and(|e| !in_range(e)) {
            return Err(RegObsError::Elevation(format!(
                "elevations must be in the range 0--{} m.a.s.l.",
                MAX_ELEVATION
            )));
        }
        match (format.uses_secondary(), secondary) {
            (false, Some(_)) => Err(RegObsError::Elevation(
                "ABOVE and BELOW formats do not use a secondary elevation".to_string(),
            )),
            (true, None) => Err(RegObsError::Elevation(
                "SANDWICH and MIDDLE formats require a secondary elevation".to_string(),
            )),
            (false, None) => Ok(Elevation {
                format,
                max: elevation,
                min: None,
            }),
            (true, Some(secondary)) => {
                let mut max = round_to_hundred(elevation.max(secondary));
                let mut min = round_to_hundred(elevation.min(secondary));
                if max == min {
                    if min >= 100 {
                        min -= 100;
                    } else {
                        max += 100;
                    }
                }
                Ok(Elevation {
                    format,
                    max,
                    min: Some(min),
                })
            }
        }
    }

    pub fn format(&self) -> ElevationFormat {
        self.format
    }

    pub fn max(&self) -> i32 {
        self.max
    }

    pub fn min(&self) -> Option<i32> {
        self.min
    }
}

/// Round a non-negative value to the nearest hundred, ties to even.
fn round_to_hundred(value: i32) -> i32 {
    let lower = value.div_euclid(100) * 100;
    let remainder = value - lower;
    if remainder > 50 || (remainder == 50 && (lower / 100) % 2 == 1) {
        lower + 100
    } else {
        lower
    }
}

#[cfg(test)]
mod tests {
    use super::{round_to_hundred, Elevation, ElevationFormat};
    use proptest::prelude::*;

    #[test]
    fn test_single_elevation_is_kept_as_is() {
        let elevation = Elevation::new(ElevationFormat::Above, 537, None).unwrap();
        assert_eq!(elevation.max(), 537);
        assert_eq!(elevation.min(), None);
        let json = serde_json::to_value(elevation).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"ExposedHeightComboTID": 1, "ExposedHeight1": 537})
        );
    }

    #[test]
    fn test_band_is_rounded_and_ordered() {
        let elevation = Elevation::new(ElevationFormat::Middle, 420, Some(1190)).unwrap();
        assert_eq!(elevation.max(), 1200);
        assert_eq!(elevation.min(), Some(400));
    }

    #[test]
    fn test_collapsed_band_is_separated() {
        let elevation = Elevation::new(ElevationFormat::Sandwich, 1010, Some(990)).unwrap();
        assert_eq!(elevation.max(), 1000);
        assert_eq!(elevation.min(), Some(900));

        let low = Elevation::new(ElevationFormat::Sandwich, 10, Some(20)).unwrap();
        assert_eq!(low.max(), 100);
        assert_eq!(low.min(), Some(0));
    }

    #[test]
    fn test_round_half_to_even() {
        assert_eq!(round_to_hundred(250), 200);
        assert_eq!(round_to_hundred(350), 400);
        assert_eq!(round_to_hundred(349), 300);
        assert_eq!(round_to_hundred(0), 0);
    }

    #[test]
    fn test_secondary_rules() {
        assert!(Elevation::new(ElevationFormat::Above, 500, Some(700)).is_err());
        assert!(Elevation::new(ElevationFormat::Below, 500, Some(700)).is_err());
        assert!(Elevation::new(ElevationFormat::Sandwich, 500, None).is_err());
        assert!(Elevation::new(ElevationFormat::Middle, 500, None).is_err());
    }

    proptest! {
        #[test]
        fn out_of_range_elevations_fail(elevation in prop_oneof![-5000i32..0, 2501i32..10000]) {
            prop_assert!(Elevation::new(ElevationFormat::Below, elevation, None).is_err());
            prop_assert!(Elevation::new(ElevationFormat::Middle, 1000, Some(elevation)).is_err());
        }

        #[test]
        fn bands_stay_ordered(a in 0i32..=2500, b in 0i32..=2500) {
            let elevation = Elevation::new(ElevationFormat::Middle, a, Some(b)).unwrap();
            prop_assert!(elevation.min().unwrap() < elevation.max());
        }
    }
}
