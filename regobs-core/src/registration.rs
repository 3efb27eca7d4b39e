use crate::{
    error::Result,
    observation::{
        AvalancheActivity, AvalancheObs, DangerSign, Incident, Note, SnowCover, Weather,
    },
    position::Position,
    tid::tid_enum,
};
use chrono::{DateTime, FixedOffset, TimeZone};
use serde::Serialize;

/// `GeoHazardTID` for snow registrations.
pub const GEO_HAZARD_SNOW: i32 = 10;

tid_enum! {
    /// How the observer learned about what is reported.
    Source {
        Seen = 10,
        Told = 20,
        News = 21,
        Picture = 22,
        Assumed = 23,
    }
}

tid_enum! {
    /// Uncertainty radius of the reported position.
    SpatialPrecision {
        Exact = 0,
        OneHundred = 100,
        FiveHundred = 500,
        OneKm = 1000,
        OverKm = -1,
    }
}

#[derive(Debug, PartialEq, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
struct ObsLocation {
    latitude: f64,
    longitude: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    uncertainty: Option<SpatialPrecision>,
}

/// A snow registration: header metadata plus the attached observations.
///
/// Danger signs and avalanche activity are repeatable, every other category
/// holds at most one observation (setting it again replaces the previous one).
/// Serializes to the RegObs v5 `Registration` payload; empty categories are
/// left out.
#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct SnowRegistration {
    #[serde(rename = "AvalancheActivityObs2", skip_serializing_if = "Vec::is_empty")]
    avalanche_activity: Vec<AvalancheActivity>,
    #[serde(rename = "AvalancheObs", skip_serializing_if = "Option::is_none")]
    avalanche_obs: Option<AvalancheObs>,
    #[serde(rename = "DangerObs", skip_serializing_if = "Vec::is_empty")]
    danger_signs: Vec<DangerSign>,
    #[serde(rename = "DtObsTime")]
    obs_time: DateTime<FixedOffset>,
    #[serde(rename = "GeneralObservation", skip_serializing_if = "Option::is_none")]
    note: Option<Note>,
    #[serde(rename = "GeoHazardTID")]
    geo_hazard: i32,
    #[serde(rename = "Incident", skip_serializing_if = "Option::is_none")]
    incident: Option<Incident>,
    #[serde(rename = "ObsLocation")]
    location: ObsLocation,
    #[serde(rename = "SourceTID", skip_serializing_if = "Option::is_none")]
    source: Option<Source>,
    #[serde(rename = "SnowSurfaceObservation", skip_serializing_if = "Option::is_none")]
    snow_cover: Option<SnowCover>,
    #[serde(rename = "WeatherObservation", skip_serializing_if = "Option::is_none")]
    weather: Option<Weather>,
}

impl SnowRegistration {
    pub fn new<Tz: TimeZone>(
        obs_time: DateTime<Tz>,
        position: Position,
        spatial_precision: Option<SpatialPrecision>,
        source: Option<Source>,
    ) -> SnowRegistration {
        SnowRegistration {
            avalanche_activity: Vec::new(),
            avalanche_obs: None,
            danger_signs: Vec::new(),
            obs_time: obs_time.fixed_offset(),
            note: None,
            geo_hazard: GEO_HAZARD_SNOW,
            incident: None,
            location: ObsLocation {
                latitude: position.lat(),
                longitude: position.lon(),
                uncertainty: spatial_precision,
            },
            source,
            snow_cover: None,
            weather: None,
        }
    }

    pub fn add_danger_sign(&mut self, danger_sign: DangerSign) -> &mut Self {
        self.danger_signs.push(danger_sign);
        self
    }

    pub fn set_avalanche_obs(&mut self, avalanche_obs: AvalancheObs) -> &mut Self {
        self.avalanche_obs = Some(avalanche_obs);
        self
    }

    pub fn add_avalanche_activity(&mut self, avalanche_activity: AvalancheActivity) -> &mut Self {
        self.avalanche_activity.push(avalanche_activity);
        self
    }

    pub fn set_weather(&mut self, weather: Weather) -> &mut Self {
        self.weather = Some(weather);
        self
    }

    pub fn set_snow_cover(&mut self, snow_cover: SnowCover) -> &mut Self {
        self.snow_cover = Some(snow_cover);
        self
    }

    pub fn set_incident(&mut self, incident: Incident) -> &mut Self {
        self.incident = Some(incident);
        self
    }

    pub fn set_note(&mut self, note: Note) -> &mut Self {
        self.note = Some(note);
        self
    }

    /// True once at least one observation of any category is attached.
    pub fn has_observation(&self) -> bool {
        !self.danger_signs.is_empty()
            || !self.avalanche_activity.is_empty()
            || self.avalanche_obs.is_some()
            || self.weather.is_some()
            || self.snow_cover.is_some()
            || self.incident.is_some()
            || self.note.is_some()
    }

    pub fn danger_signs(&self) -> &[DangerSign] {
        &self.danger_signs
    }

    pub fn avalanche_activity(&self) -> &[AvalancheActivity] {
        &self.avalanche_activity
    }

    pub fn obs_time(&self) -> DateTime<FixedOffset> {
        self.obs_time
    }

    /// The JSON body sent to the `Registration` endpoint.
    pub fn payload(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }
}
