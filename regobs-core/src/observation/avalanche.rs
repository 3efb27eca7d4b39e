use super::{ensure_any, DestructiveSize};
use crate::{
    error::Result,
    exposition::{Direction, Expositions},
    position::Position,
    tid::tid_enum,
};
use chrono::{DateTime, FixedOffset, TimeZone};
use serde::Serialize;

tid_enum! {
    AvalancheType {
        DryLoose = 12,
        WetLoose = 11,
        DrySlab = 22,
        WetSlab = 21,
        Glide = 27,
        SlushFlow = 30,
        Cornice = 40,
        Unknown = 99,
    }
}

tid_enum! {
    Trigger {
        Natural = 10,
        Human = 26,
        Snowmobile = 27,
        Remote = 22,
        TestSlope = 23,
        Explosives = 25,
        Unknown = 99,
    }
}

tid_enum! {
    Terrain {
        SteepSlope = 10,
        LeeSide = 20,
        CloseToRidge = 30,
        Gully = 40,
        Slab = 50,
        Bowl = 60,
        Forest = 70,
        LoggingArea = 75,
        Everywhere = 95,
        Unknown = 99,
    }
}

tid_enum! {
    /// Weak layer the avalanche released on.
    WeakLayer {
        /// Buried new snow
        Pp = 10,
        /// Buried surface hoar
        Sh = 11,
        FcNearSurface = 13,
        BondingAboveMfcr = 14,
        Df = 15,
        Dh = 16,
        FcAboveMfcr = 18,
        FcBelowMfcr = 19,
        GroundMelt = 20,
        WaterInSnow = 22,
        LooseSnow = 24,
    }
}

/// A single observed avalanche.
#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct AvalancheObs {
    #[serde(rename = "AvalCauseTID", skip_serializing_if = "Option::is_none")]
    weak_layer: Option<WeakLayer>,
    #[serde(rename = "AvalancheTID", skip_serializing_if = "Option::is_none")]
    avalanche_type: Option<AvalancheType>,
    #[serde(rename = "AvalancheTriggerTID", skip_serializing_if = "Option::is_none")]
    trigger: Option<Trigger>,
    #[serde(rename = "Comment", skip_serializing_if = "Option::is_none")]
    comment: Option<String>,
    #[serde(rename = "DestructiveSizeTID", skip_serializing_if = "Option::is_none")]
    size: Option<DestructiveSize>,
    #[serde(rename = "DtAvalancheTime")]
    release_time: DateTime<FixedOffset>,
    /// Centimeters, as entered.
    #[serde(rename = "FractureHeight", skip_serializing_if = "Option::is_none")]
    fracture_height_cm: Option<i32>,
    #[serde(rename = "FractureWidth", skip_serializing_if = "Option::is_none")]
    fracture_width: Option<i32>,
    #[serde(rename = "StartLat", skip_serializing_if = "Option::is_none")]
    start_lat: Option<f64>,
    #[serde(rename = "StartLong", skip_serializing_if = "Option::is_none")]
    start_lon: Option<f64>,
    #[serde(rename = "StopLat", skip_serializing_if = "Option::is_none")]
    stop_lat: Option<f64>,
    #[serde(rename = "StopLong", skip_serializing_if = "Option::is_none")]
    stop_lon: Option<f64>,
    #[serde(rename = "TerrainStartZoneTID", skip_serializing_if = "Option::is_none")]
    terrain: Option<Terrain>,
    #[serde(rename = "Trajectory", skip_serializing_if = "Option::is_none")]
    path_name: Option<String>,
    #[serde(rename = "ValidExposition", skip_serializing_if = "Option::is_none")]
    exposition: Option<Expositions>,
}

impl AvalancheObs {
    pub fn builder<Tz: TimeZone>(release_time: DateTime<Tz>) -> AvalancheObsBuilder {
        AvalancheObsBuilder {
            release_time: release_time.fixed_offset(),
            start: None,
            stop: None,
            exposition: None,
            size: None,
            avalanche_type: None,
            trigger: None,
            terrain: None,
            weak_layer: None,
            fracture_height_cm: None,
            fracture_width: None,
            path_name: None,
            comment: None,
        }
    }

    pub fn release_time(&self) -> DateTime<FixedOffset> {
        self.release_time
    }
}

#[derive(Debug, Clone)]
pub struct AvalancheObsBuilder {
    release_time: DateTime<FixedOffset>,
    start: Option<Position>,
    stop: Option<Position>,
    exposition: Option<Direction>,
    size: Option<DestructiveSize>,
    avalanche_type: Option<AvalancheType>,
    trigger: Option<Trigger>,
    terrain: Option<Terrain>,
    weak_layer: Option<WeakLayer>,
    fracture_height_cm: Option<i32>,
    fracture_width: Option<i32>,
    path_name: Option<String>,
    comment: Option<String>,
}

impl AvalancheObsBuilder {
    pub fn start(mut self, start: Position) -> Self {
        self.start = Some(start);
        self
    }

    pub fn stop(mut self, stop: Position) -> Self {
        self.stop = Some(stop);
        self
    }

    pub fn exposition(mut self, exposition: Direction) -> Self {
        self.exposition = Some(exposition);
        self
    }

    pub fn size(mut self, size: DestructiveSize) -> Self {
        self.size = Some(size);
        self
    }

    pub fn avalanche_type(mut self, avalanche_type: AvalancheType) -> Self {
        self.avalanche_type = Some(avalanche_type);
        self
    }

    pub fn trigger(mut self, trigger: Trigger) -> Self {
        self.trigger = Some(trigger);
        self
    }

    pub fn terrain(mut self, terrain: Terrain) -> Self {
        self.terrain = Some(terrain);
        self
    }

    pub fn weak_layer(mut self, weak_layer: WeakLayer) -> Self {
        self.weak_layer = Some(weak_layer);
        self
    }

    pub fn fracture_height_cm(mut self, height: i32) -> Self {
        self.fracture_height_cm = Some(height);
        self
    }

    pub fn fracture_width(mut self, width: i32) -> Self {
        self.fracture_width = Some(width);
        self
    }

    pub fn path_name(mut self, path_name: impl Into<String>) -> Self {
        self.path_name = Some(path_name.into());
        self
    }

    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn build(self) -> Result<AvalancheObs> {
        ensure_any(
            "avalanche",
            &[
                self.start.is_some(),
                self.stop.is_some(),
                self.exposition.is_some(),
                self.size.is_some(),
                self.avalanche_type.is_some(),
                self.trigger.is_some(),
                self.terrain.is_some(),
                self.weak_layer.is_some(),
                self.fracture_height_cm.is_some(),
                self.fracture_width.is_some(),
                self.path_name.is_some(),
                self.comment.is_some(),
            ],
        )?;
        Ok(AvalancheObs {
            weak_layer: self.weak_layer,
            avalanche_type: self.avalanche_type,
            trigger: self.trigger,
            comment: self.comment,
            size: self.size,
            release_time: self.release_time,
            fracture_height_cm: self.fracture_height_cm,
            fracture_width: self.fracture_width,
            start_lat: self.start.map(|p| p.lat()),
            start_lon: self.start.map(|p| p.lon()),
            stop_lat: self.stop.map(|p| p.lat()),
            stop_lon: self.stop.map(|p| p.lon()),
            terrain: self.terrain,
            path_name: self.path_name,
            exposition: self.exposition.map(Expositions::from),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{AvalancheObs, AvalancheType, Terrain, Trigger, WeakLayer};
    use crate::{exposition::Direction, observation::DestructiveSize, position::Position};
    use chrono::TimeZone;
    use chrono_tz::Europe::Oslo;
    use serde_json::json;

    #[test]
    fn test_release_time_alone_is_not_an_observation() {
        let release = Oslo.with_ymd_and_hms(2021, 3, 21, 16, 5, 0).unwrap();
        let err = AvalancheObs::builder(release).build().unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_full_avalanche() {
        let release = Oslo.with_ymd_and_hms(2021, 3, 21, 16, 5, 0).unwrap();
        let avalanche = AvalancheObs::builder(release)
            .start(Position::new(61.1955, 10.3711).unwrap())
            .stop(Position::new(60.8071, 7.9102).unwrap())
            .exposition(Direction::NE)
            .size(DestructiveSize::D3)
            .avalanche_type(AvalancheType::DrySlab)
            .trigger(Trigger::Natural)
            .terrain(Terrain::CloseToRidge)
            .weak_layer(WeakLayer::GroundMelt)
            .fracture_height_cm(225)
            .fracture_width(700)
            .path_name("Path A")
            .comment("Extremely long path.")
            .build()
            .unwrap();
        let value = serde_json::to_value(&avalanche).unwrap();
        assert_eq!(value["DtAvalancheTime"], json!("2021-03-21T16:05:00+01:00"));
        assert_eq!(value["ValidExposition"], json!("01000000"));
        assert_eq!(value["AvalancheTID"], json!(22));
        assert_eq!(value["AvalCauseTID"], json!(20));
        assert_eq!(value["StartLat"], json!(61.1955));
        assert_eq!(value["StopLong"], json!(7.9102));
        assert_eq!(value["FractureHeight"], json!(225));
        assert_eq!(value["Trajectory"], json!("Path A"));
    }

    #[test]
    fn test_absent_fields_are_omitted() {
        let release = Oslo.with_ymd_and_hms(2021, 3, 21, 16, 5, 0).unwrap();
        let avalanche = AvalancheObs::builder(release)
            .trigger(Trigger::Human)
            .build()
            .unwrap();
        let value = serde_json::to_value(&avalanche).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 2);
        assert!(object.contains_key("AvalancheTriggerTID"));
        assert!(!object.contains_key("StartLat"));
    }
}
