use super::{ensure_any, ensure_finite};
use crate::{
    error::{RegObsError, Result},
    exposition::Direction,
    tid::tid_enum,
};
use serde::Serialize;

tid_enum! {
    Precipitation {
        NoPrecipitation = 1,
        Drizzle = 2,
        Rain = 3,
        Sleet = 4,
        Snow = 5,
        Hail = 6,
        FreezingRain = 8,
    }
}

#[derive(Debug, PartialEq, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Weather {
    #[serde(skip_serializing_if = "Option::is_none")]
    air_temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    cloud_cover: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    comment: Option<String>,
    #[serde(rename = "PrecipitationTID", skip_serializing_if = "Option::is_none")]
    precipitation: Option<Precipitation>,
    /// Degrees, derived from the compass octant.
    #[serde(skip_serializing_if = "Option::is_none")]
    wind_direction: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    wind_speed: Option<f64>,
}

impl Weather {
    pub fn builder() -> WeatherBuilder {
        WeatherBuilder::default()
    }
}

#[derive(Debug, Clone, Default)]
pub struct WeatherBuilder {
    precipitation: Option<Precipitation>,
    wind_direction: Option<Direction>,
    air_temperature: Option<f64>,
    wind_speed: Option<f64>,
    cloud_cover: Option<i32>,
    comment: Option<String>,
}

impl WeatherBuilder {
    pub fn precipitation(mut self, precipitation: Precipitation) -> Self {
        self.precipitation = Some(precipitation);
        self
    }

    pub fn wind_direction(mut self, direction: Direction) -> Self {
        self.wind_direction = Some(direction);
        self
    }

    /// Air temperature in degrees Celsius.
    pub fn air_temperature(mut self, celsius: f64) -> Self {
        self.air_temperature = Some(celsius);
        self
    }

    /// Wind speed in m/s.
    pub fn wind_speed(mut self, speed: f64) -> Self {
        self.wind_speed = Some(speed);
        self
    }

    /// Cloud cover in percent.
    pub fn cloud_cover(mut self, percent: i32) -> Self {
        self.cloud_cover = Some(percent);
        self
    }

    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn build(self) -> Result<Weather> {
        ensure_finite(&[
            ("air temperature", self.air_temperature),
            ("wind speed", self.wind_speed),
        ])?;
        ensure_any(
            "weather",
            &[
                self.precipitation.is_some(),
                self.air_temperature.is_some(),
                self.wind_speed.is_some(),
                self.cloud_cover.is_some(),
                self.wind_direction.is_some(),
                self.comment.is_some(),
            ],
        )?;
        if let Some(percent) = self.cloud_cover {
            if !(0..=100).contains(&percent) {
                return Err(RegObsError::Percent(percent));
            }
        }
        Ok(Weather {
            air_temperature: self.air_temperature,
            cloud_cover: self.cloud_cover,
            comment: self.comment,
            precipitation: self.precipitation,
            wind_direction: self.wind_direction.map(Direction::degrees),
            wind_speed: self.wind_speed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{Precipitation, Weather};
    use crate::{error::RegObsError, exposition::Direction};
    use serde_json::json;

    #[test]
    fn test_empty_weather_fails() {
        let err = Weather::builder().build().unwrap_err();
        assert!(matches!(err, RegObsError::NoObservation(_)));
    }

    #[test]
    fn test_non_finite_measurements_fail() {
        let err = Weather::builder().wind_speed(f64::NAN).build().unwrap_err();
        assert!(matches!(err, RegObsError::Measurement(_)));
        assert!(err.is_validation());
        assert!(matches!(
            Weather::builder()
                .precipitation(Precipitation::Snow)
                .air_temperature(f64::INFINITY)
                .build(),
            Err(RegObsError::Measurement(_))
        ));
    }

    #[test]
    fn test_cloud_cover_range() {
        assert!(matches!(
            Weather::builder().cloud_cover(101).build(),
            Err(RegObsError::Percent(101))
        ));
        assert!(Weather::builder().cloud_cover(-1).build().is_err());
        assert!(Weather::builder().cloud_cover(100).build().is_ok());
    }

    #[test]
    fn test_weather_payload() {
        let weather = Weather::builder()
            .precipitation(Precipitation::Drizzle)
            .wind_direction(Direction::NE)
            .wind_speed(2.2)
            .cloud_cover(15)
            .build()
            .unwrap();
        assert_eq!(
            serde_json::to_value(weather).unwrap(),
            json!({
                "CloudCover": 15,
                "PrecipitationTID": 2,
                "WindDirection": 45,
                "WindSpeed": 2.2,
            })
        );
    }

    #[test]
    fn test_zero_values_are_kept() {
        let weather = Weather::builder()
            .wind_speed(0.0)
            .cloud_cover(0)
            .wind_direction(Direction::N)
            .build()
            .unwrap();
        let value = serde_json::to_value(weather).unwrap();
        assert_eq!(value["CloudCover"], json!(0));
        assert_eq!(value["WindDirection"], json!(0));
        assert_eq!(value["WindSpeed"], json!(0.0));
    }
}
