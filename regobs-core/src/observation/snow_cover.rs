use super::{ensure_any, ensure_finite};
use crate::{error::Result, tid::tid_enum};
use serde::Serialize;

tid_enum! {
    Drift {
        NoDrift = 1,
        SomeDrift = 2,
        Moderate = 3,
        Heavy = 4,
    }
}

tid_enum! {
    Surface {
        LooseOver30Cm = 101,
        Loose10To30Cm = 102,
        Loose1To10Cm = 103,
        SurfaceHoarHard = 61,
        SurfaceHoarSoft = 62,
        NewSurfaceFacets = 50,
        Crust = 107,
        WindSlabHard = 105,
        StormSlabSoft = 106,
        WetLoose = 104,
        Other = 108,
    }
}

tid_enum! {
    Moisture {
        NoSnow = 1,
        Dry = 2,
        Moist = 3,
        Wet = 4,
        VeryWet = 5,
        Slush = 6,
    }
}

/// Snow surface and snow cover observation. Depths are sent in meters.
#[derive(Debug, PartialEq, Clone, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct SnowCover {
    #[serde(skip_serializing_if = "Option::is_none")]
    comment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    height_limit_layered_snow: Option<f64>,
    #[serde(rename = "NewSnowDepth24", skip_serializing_if = "Option::is_none")]
    new_snow_depth_24: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    new_snow_line: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    snow_depth: Option<f64>,
    #[serde(rename = "SnowDriftTID", skip_serializing_if = "Option::is_none")]
    drift: Option<Drift>,
    #[serde(skip_serializing_if = "Option::is_none")]
    snow_line: Option<i32>,
    #[serde(rename = "SnowSurfaceTID", skip_serializing_if = "Option::is_none")]
    surface: Option<Surface>,
    #[serde(rename = "SurfaceWaterContentTID", skip_serializing_if = "Option::is_none")]
    moisture: Option<Moisture>,
}

impl SnowCover {
    pub fn builder() -> SnowCoverBuilder {
        SnowCoverBuilder::default()
    }
}

#[derive(Debug, Clone, Default)]
pub struct SnowCoverBuilder {
    drift: Option<Drift>,
    surface: Option<Surface>,
    moisture: Option<Moisture>,
    hn24_cm: Option<f64>,
    new_snow_line: Option<i32>,
    hs_cm: Option<f64>,
    snow_line: Option<i32>,
    layered_snow_line: Option<f64>,
    comment: Option<String>,
}

impl SnowCoverBuilder {
    pub fn drift(mut self, drift: Drift) -> Self {
        self.drift = Some(drift);
        self
    }

    pub fn surface(mut self, surface: Surface) -> Self {
        self.surface = Some(surface);
        self
    }

    pub fn moisture(mut self, moisture: Moisture) -> Self {
        self.moisture = Some(moisture);
        self
    }

    /// New snow over the last 24 hours, in centimeters.
    pub fn hn24_cm(mut self, cm: f64) -> Self {
        self.hn24_cm = Some(cm);
        self
    }

    pub fn new_snow_line(mut self, masl: i32) -> Self {
        self.new_snow_line = Some(masl);
        self
    }

    /// Total snow depth, in centimeters.
    pub fn hs_cm(mut self, cm: f64) -> Self {
        self.hs_cm = Some(cm);
        self
    }

    pub fn snow_line(mut self, masl: i32) -> Self {
        self.snow_line = Some(masl);
        self
    }

    pub fn layered_snow_line(mut self, masl: f64) -> Self {
        self.layered_snow_line = Some(masl);
        self
    }

    pub fn comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn build(self) -> Result<SnowCover> {
        ensure_finite(&[
            ("new snow depth", self.hn24_cm),
            ("snow depth", self.hs_cm),
            ("layered snow line", self.layered_snow_line),
        ])?;
        ensure_any(
            "snow cover",
            &[
                self.drift.is_some(),
                self.surface.is_some(),
                self.moisture.is_some(),
                self.hn24_cm.is_some(),
                self.new_snow_line.is_some(),
                self.hs_cm.is_some(),
                self.snow_line.is_some(),
                self.layered_snow_line.is_some(),
                self.comment.is_some(),
            ],
        )?;
        Ok(SnowCover {
            comment: self.comment,
            height_limit_layered_snow: self.layered_snow_line,
            new_snow_depth_24: self.hn24_cm.map(cm_to_m),
            new_snow_line: self.new_snow_line,
            snow_depth: self.hs_cm.map(cm_to_m),
            drift: self.drift,
            snow_line: self.snow_line,
            surface: self.surface,
            moisture: self.moisture,
        })
    }
}

fn cm_to_m(cm: f64) -> f64 {
    cm / 100.0
}
