//! Stability test report with the stratigraphy around each fracture.
//!
//! Reads field observations as returned by the RegObs API, picks the
//! compression and extended column tests from competent observers, and writes
//! one semicolon separated row per test with the fractured layer and its
//! neighbours.

use crate::{config::ReportConfig, error::Result, TIMEZONE};
use csv::WriterBuilder;
use log::{debug, info};
use regobs_utils::{dates::unix_time_to_datetime, text::make_str};
use serde::Deserialize;
use std::{
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

pub const HEADER: [&str; 22] = [
    "Result",
    "Test",
    "PNX",
    "Depth",
    "Taps",
    "Fracture",
    "Layer thick",
    "Layer grain",
    "Layer grain Ø",
    "Layer hardness",
    "Above thick",
    "Above grain",
    "Above grain Ø",
    "Above hardness",
    "Below thick",
    "Below grain",
    "Below grain Ø",
    "Below hardness",
    "Region",
    "Region ID",
    "Obs time",
    "URL",
];

/// A registration with its column tests and snow profile.
#[derive(Debug, PartialEq, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FieldObservation {
    pub reg_id: i64,
    /// RFC 3339 or OData `/Date(ms)/`.
    pub dt_obs_time: String,
    #[serde(default)]
    pub forecast_region_name: Option<String>,
    #[serde(rename = "ForecastRegionTID", default)]
    pub forecast_region_tid: Option<i32>,
    #[serde(rename = "CompetenceLevelTID", default)]
    pub competence_level_tid: i32,
    #[serde(default)]
    pub column_tests: Vec<ColumnTest>,
    #[serde(default)]
    pub snow_profile: Option<SnowProfile>,
}

#[derive(Debug, PartialEq, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ColumnTest {
    /// Result code such as `ECTP12` or `CTN`.
    pub propagation_name: Option<String>,
    /// Centimeters below the surface. Only given when something fractured.
    pub fracture_depth: Option<f64>,
    pub taps_fracture: Option<i32>,
    pub compr_test_fracture_name: Option<String>,
    pub include_in_snow_profile: bool,
}

#[derive(Debug, PartialEq, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct SnowProfile {
    /// Layers from the surface down.
    pub strat_profile: Vec<StratLayer>,
}

#[derive(Debug, PartialEq, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct StratLayer {
    pub depth_top: Option<f64>,
    pub thickness: Option<f64>,
    pub grain_form_primary_name: Option<String>,
    pub grain_size_avg: Option<f64>,
    pub hardness_name: Option<String>,
    /// Lower is softer.
    #[serde(rename = "HardnessTID")]
    pub hardness_tid: Option<i32>,
}

/// The part of a layer that goes into the report.
#[derive(Debug, PartialEq, Clone, Default)]
pub struct LayerInfo {
    pub thickness: Option<f64>,
    pub grain_form: Option<String>,
    pub grain_size: Option<f64>,
    pub hardness: Option<String>,
}

impl From<&StratLayer> for LayerInfo {
    fn from(layer: &StratLayer) -> Self {
        LayerInfo {
            thickness: layer.thickness,
            grain_form: layer.grain_form_primary_name.clone(),
            grain_size: layer.grain_size_avg,
            hardness: layer.hardness_name.clone(),
        }
    }
}

/// One column test with the stratigraphy around its fracture.
#[derive(Debug, PartialEq, Clone, Default)]
pub struct TestRow {
    pub result: String,
    pub test: Option<&'static str>,
    pub pnx: Option<&'static str>,
    pub depth: Option<f64>,
    pub taps: Option<i32>,
    pub fracture: Option<String>,
    pub layer: LayerInfo,
    pub above: LayerInfo,
    pub below: LayerInfo,
    pub region: Option<String>,
    pub region_id: Option<i32>,
    pub obs_time: String,
    pub url: String,
}

impl TestRow {
    pub fn new(
        observation: &FieldObservation,
        test: &ColumnTest,
        profile: Option<&SnowProfile>,
        config: &ReportConfig,
    ) -> TestRow {
        let result = test.propagation_name.clone().unwrap_or_default();
        let mut row = TestRow {
            test: test_kind(&result),
            pnx: propagation_class(&result),
            result,
            depth: test.fracture_depth,
            taps: test.taps_fracture,
            fracture: test.compr_test_fracture_name.clone(),
            region: observation.forecast_region_name.clone(),
            region_id: observation.forecast_region_tid,
            obs_time: display_time(&observation.dt_obs_time),
            url: format!("{}{}", config.registration_url, observation.reg_id),
            ..TestRow::default()
        };

        if let (Some(depth), Some(profile)) = (test.fracture_depth, profile) {
            if depth != 0.0 {
                row.set_layers(&profile.strat_profile, depth);
            }
        }
        row
    }

    fn set_layers(&mut self, layers: &[StratLayer], depth: f64) {
        let Some(index) = fractured_layer(layers, depth) else {
            debug!("No layer at {} cm in {}", depth, self.url);
            return;
        };
        self.layer = LayerInfo::from(&layers[index]);
        if index > 0 {
            self.above = LayerInfo::from(&layers[index - 1]);
        }
        if let Some(below) = layers.get(index + 1) {
            self.below = LayerInfo::from(below);
        }
    }

    pub fn to_record(&self) -> [String; 22] {
        let layer = |info: &LayerInfo| {
            [
                make_str(info.thickness),
                make_str(info.grain_form.as_deref()),
                make_str(info.grain_size),
                make_str(info.hardness.as_deref()),
            ]
        };
        let [lt, lg, ls, lh] = layer(&self.layer);
        let [at, ag, as_, ah] = layer(&self.above);
        let [bt, bg, bs, bh] = layer(&self.below);
        [
            make_str(Some(&self.result)),
            make_str(self.test),
            make_str(self.pnx),
            make_str(self.depth),
            make_str(self.taps),
            make_str(self.fracture.as_deref()),
            lt,
            lg,
            ls,
            lh,
            at,
            ag,
            as_,
            ah,
            bt,
            bg,
            bs,
            bh,
            make_str(self.region.as_deref()),
            make_str(self.region_id),
            make_str(Some(&self.obs_time)),
            make_str(Some(&self.url)),
        ]
    }
}

/// `ECT` or `CT`, read from the result code.
pub fn test_kind(result: &str) -> Option<&'static str> {
    if result.contains("ECT") {
        Some("ECT")
    } else if result.contains("CT") {
        Some("CT")
    } else {
        None
    }
}

/// Propagation class: `X` for no fracture, `P` and `N` for extended column
/// tests that did or did not propagate.
pub fn propagation_class(result: &str) -> Option<&'static str> {
    if result == "ECTX" || result == "CTN" {
        Some("X")
    } else if result.contains("ECTP") {
        Some("P")
    } else if result.contains("ECTN") {
        Some("N")
    } else {
        None
    }
}

/// Index of the layer a fracture at `depth` belongs to.
///
/// A fracture on a layer boundary goes to the softer of the two layers
/// meeting there. A boundary at the very top of the profile is skipped.
pub fn fractured_layer(layers: &[StratLayer], depth: f64) -> Option<usize> {
    for (i, layer) in layers.iter().enumerate() {
        let Some(top) = layer.depth_top else {
            continue;
        };
        if top == depth {
            if i == 0 {
                continue;
            }
            let above = &layers[i - 1];
            return match (layer.hardness_tid, above.hardness_tid) {
                (Some(here), Some(up)) if here > up => Some(i - 1),
                _ => Some(i),
            };
        }
        if let Some(thickness) = layer.thickness {
            if top < depth && depth < top + thickness {
                return Some(i);
            }
        }
    }
    None
}

/// Whether a test goes into the report.
pub fn is_selected(observation: &FieldObservation, test: &ColumnTest, config: &ReportConfig) -> bool {
    observation.competence_level_tid >= config.min_competence
        && test
            .propagation_name
            .as_deref()
            .is_some_and(|name| !name.contains("Ikke gitt"))
}

/// Rows for every selected test, in input order.
pub fn collect_tests(observations: &[FieldObservation], config: &ReportConfig) -> Vec<TestRow> {
    let rows: Vec<TestRow> = observations
        .iter()
        .flat_map(|observation| {
            observation
                .column_tests
                .iter()
                .filter(move |test| is_selected(observation, test, config))
                .map(move |test| {
                    let profile = if test.include_in_snow_profile {
                        observation.snow_profile.as_ref()
                    } else {
                        None
                    };
                    TestRow::new(observation, test, profile, config)
                })
        })
        .collect();
    info!(
        "Selected {} tests from {} observations",
        rows.len(),
        observations.len()
    );
    rows
}

/// Read a JSON array of field observations.
pub fn read_observations(path: &Path) -> Result<Vec<FieldObservation>> {
    let file = File::open(path)?;
    Ok(serde_json::from_reader(BufReader::new(file))?)
}

/// Write the header and one row per test, separated by `;`.
pub fn write_report<W: Write>(rows: &[TestRow], writer: W) -> Result<()> {
    let mut wtr = WriterBuilder::new().delimiter(b';').from_writer(writer);
    wtr.write_record(HEADER)?;
    for row in rows {
        wtr.write_record(row.to_record())?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_report_file(rows: &[TestRow], path: &Path) -> Result<()> {
    write_report(rows, File::create(path)?)?;
    info!("Wrote {} rows to {}", rows.len(), path.display());
    Ok(())
}

fn display_time(raw: &str) -> String {
    if raw.trim_start().starts_with("/Date(") {
        if let Ok(utc) = unix_time_to_datetime(raw) {
            return utc.with_timezone(&TIMEZONE).to_rfc3339();
        }
    }
    raw.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn layer(top: f64, thickness: f64, grain: &str, hardness: &str, tid: i32) -> StratLayer {
        StratLayer {
            depth_top: Some(top),
            thickness: Some(thickness),
            grain_form_primary_name: Some(grain.to_string()),
            grain_size_avg: Some(1.0),
            hardness_name: Some(hardness.to_string()),
            hardness_tid: Some(tid),
        }
    }

    fn profile() -> Vec<StratLayer> {
        vec![
            layer(0.0, 20.0, "Nysnø", "Knyttneve", 2),
            layer(20.0, 15.0, "Vindpakket", "Blyant", 8),
            layer(35.0, 5.0, "Kantkorn", "4 fingre", 3),
            layer(40.0, 60.0, "Smelteomvandlet", "Kniv", 11),
        ]
    }

    fn observation(competence: i32, tests: Vec<ColumnTest>) -> FieldObservation {
        FieldObservation {
            reg_id: 250123,
            dt_obs_time: "2020-02-05T10:00:00+01:00".to_string(),
            forecast_region_name: Some("Lyngen".to_string()),
            forecast_region_tid: Some(3010),
            competence_level_tid: competence,
            column_tests: tests,
            snow_profile: Some(SnowProfile {
                strat_profile: profile(),
            }),
        }
    }

    fn test(result: &str, depth: Option<f64>) -> ColumnTest {
        ColumnTest {
            propagation_name: Some(result.to_string()),
            fracture_depth: depth,
            taps_fracture: Some(12),
            compr_test_fracture_name: Some("Q2".to_string()),
            include_in_snow_profile: true,
        }
    }

    #[test]
    fn test_kind_and_class() {
        assert_eq!(test_kind("ECTP12"), Some("ECT"));
        assert_eq!(test_kind("CTV"), Some("CT"));
        assert_eq!(test_kind("RB3"), None);
        assert_eq!(propagation_class("ECTX"), Some("X"));
        assert_eq!(propagation_class("CTN"), Some("X"));
        assert_eq!(propagation_class("ECTP12"), Some("P"));
        assert_eq!(propagation_class("ECTN20"), Some("N"));
        assert_eq!(propagation_class("CTM14"), None);
    }

    #[test]
    fn test_fracture_inside_layer() {
        assert_eq!(fractured_layer(&profile(), 37.0), Some(2));
        assert_eq!(fractured_layer(&profile(), 150.0), None);
    }

    #[test]
    fn test_fracture_on_boundary_picks_softer_layer() {
        // 35 cm: facets (3) below harder wind slab (8)
        assert_eq!(fractured_layer(&profile(), 35.0), Some(2));
        // 20 cm: wind slab (8) below softer new snow (2)
        assert_eq!(fractured_layer(&profile(), 20.0), Some(0));
        // 40 cm: knife hard (11) below facets (3)
        assert_eq!(fractured_layer(&profile(), 40.0), Some(2));
    }

    #[test]
    fn test_boundary_at_surface_is_skipped() {
        let layers = vec![layer(0.0, 10.0, "Nysnø", "Knyttneve", 2)];
        assert_eq!(fractured_layer(&layers, 0.0), None);
    }

    #[test]
    fn test_row_with_neighbours() {
        let obs = observation(150, vec![test("ECTP12", Some(37.0))]);
        let rows = collect_tests(&[obs], &ReportConfig::default());
        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.test, Some("ECT"));
        assert_eq!(row.pnx, Some("P"));
        assert_eq!(row.layer.grain_form.as_deref(), Some("Kantkorn"));
        assert_eq!(row.above.grain_form.as_deref(), Some("Vindpakket"));
        assert_eq!(row.below.grain_form.as_deref(), Some("Smelteomvandlet"));
        assert_eq!(row.url, "https://www.regobs.no/Registration/250123");

        let record = row.to_record();
        assert_eq!(record[0], "ECTP12");
        assert_eq!(record[3], "37");
        assert_eq!(record[6], "5");
        assert_eq!(record[19], "3010");
    }

    #[test]
    fn test_selection() {
        let config = ReportConfig::default();
        let tests = vec![
            test("ECTP12", Some(37.0)),
            test("Ikke gitt", None),
            ColumnTest::default(),
        ];
        assert_eq!(collect_tests(&[observation(120, tests.clone())], &config).len(), 1);
        assert!(collect_tests(&[observation(110, tests)], &config).is_empty());
    }

    #[test]
    fn test_layers_need_depth_and_profile() {
        let config = ReportConfig::default();
        let no_fracture = collect_tests(&[observation(150, vec![test("ECTX", None)])], &config);
        assert_eq!(no_fracture[0].layer, LayerInfo::default());

        let mut outside = test("ECTN20", Some(37.0));
        outside.include_in_snow_profile = false;
        let rows = collect_tests(&[observation(150, vec![outside])], &config);
        assert_eq!(rows[0].layer, LayerInfo::default());
        assert_eq!(rows[0].pnx, Some("N"));
    }

    #[test]
    fn test_odata_time_is_localized() {
        let mut obs = observation(150, vec![test("CTN", None)]);
        obs.dt_obs_time = "/Date(1580893200000)/".to_string();
        let rows = collect_tests(&[obs], &ReportConfig::default());
        assert_eq!(rows[0].obs_time, "2020-02-05T10:00:00+01:00");
    }

    #[test]
    fn test_deserialize_api_shape() {
        let value = json!([{
            "RegId": 1,
            "DtObsTime": "2020-02-05T10:00:00",
            "CompetenceLevelTID": 130,
            "ColumnTests": [{"PropagationName": "ECTN20", "FractureDepth": 20.0, "IncludeInSnowProfile": true}],
            "SnowProfile": {"StratProfile": [{"DepthTop": 0.0, "Thickness": 20.0, "HardnessTID": 2}]}
        }]);
        let observations: Vec<FieldObservation> = serde_json::from_value(value).unwrap();
        assert_eq!(observations[0].column_tests[0].fracture_depth, Some(20.0));
        assert_eq!(observations[0].snow_profile.as_ref().unwrap().strat_profile.len(), 1);
    }

    #[test]
    fn test_write_report_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tests.csv");
        let rows = collect_tests(
            &[observation(150, vec![test("ECTP12", Some(37.0)), test("Ikke gitt", None)])],
            &ReportConfig::default(),
        );
        write_report_file(&rows, &path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = written.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("Result;Test;PNX;Depth;Taps;Fracture;Layer thick"));
        assert!(lines[1].starts_with("ECTP12;ECT;P;37;12;Q2;5;Kantkorn;1;4 fingre;15;Vindpakket"));
        assert!(lines[1].ends_with(";Lyngen;3010;2020-02-05T10:00:00+01:00;https://www.regobs.no/Registration/250123"));
    }
}
