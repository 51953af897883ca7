//! Export plate results to CSV or JSON.
//!
//! The exports are meant to be easy to consume in spreadsheets or downstream
//! plotting/report scripts. A `NaN` start (no growth) is written as an empty CSV
//! cell and as `null` in JSON.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::{PlateResult, SelectConfig};
use crate::error::{AppError, EXIT_OUTPUT};

/// JSON export envelope.
#[derive(Debug, Serialize)]
pub struct PlateExport<'a> {
    pub tool: &'static str,
    pub generated: DateTime<Utc>,
    pub config: &'a SelectConfig,
    pub wells: Vec<WellExport<'a>>,
}

#[derive(Debug, Serialize)]
pub struct WellExport<'a> {
    pub well: &'a str,
    pub growth: bool,
    pub slope: f64,
    pub intercept: f64,
    pub baseline: f64,
    pub start: Option<f64>,
}

fn finite_start(start: f64) -> Option<f64> {
    if start.is_nan() { None } else { Some(start) }
}

/// Write the plate result as CSV to any writer.
pub fn write_results_csv_to<W: Write>(writer: W, plate: &PlateResult) -> Result<(), AppError> {
    let mut out = csv::Writer::from_writer(writer);
    out.write_record(["well", "growth", "slope", "intercept", "baseline", "start"])
        .map_err(|e| AppError::new(EXIT_OUTPUT, format!("Failed to write export CSV header: {e}")))?;

    for (name, r) in plate.iter() {
        let start = finite_start(r.start).map(|v| v.to_string()).unwrap_or_default();
        out.write_record([
            name.to_string(),
            r.growth.to_string(),
            r.slope.to_string(),
            r.intercept.to_string(),
            r.baseline.to_string(),
            start,
        ])
        .map_err(|e| AppError::new(EXIT_OUTPUT, format!("Failed to write export CSV row: {e}")))?;
    }

    out.flush()
        .map_err(|e| AppError::new(EXIT_OUTPUT, format!("Failed to flush export CSV: {e}")))?;
    Ok(())
}

/// Write the plate result to a CSV file.
pub fn write_results_csv(path: &Path, plate: &PlateResult) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(EXIT_OUTPUT, format!("Failed to create export CSV '{}': {e}", path.display())))?;
    write_results_csv_to(file, plate)
}

pub fn build_export<'a>(plate: &'a PlateResult, config: &'a SelectConfig) -> PlateExport<'a> {
    PlateExport {
        tool: "phasesel",
        generated: Utc::now(),
        config,
        wells: plate
            .iter()
            .map(|(well, r)| WellExport {
                well,
                growth: r.growth,
                slope: r.slope,
                intercept: r.intercept,
                baseline: r.baseline,
                start: finite_start(r.start),
            })
            .collect(),
    }
}

/// Write the plate result (plus the config that produced it) to a JSON file.
pub fn write_results_json(path: &Path, plate: &PlateResult, config: &SelectConfig) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(EXIT_OUTPUT, format!("Failed to create export JSON '{}': {e}", path.display())))?;

    serde_json::to_writer_pretty(file, &build_export(plate, config))
        .map_err(|e| AppError::new(EXIT_OUTPUT, format!("Failed to write export JSON: {e}")))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::WellResult;

    fn plate() -> PlateResult {
        let mut plate = PlateResult::new();
        plate.push(
            "A1".to_string(),
            WellResult {
                slope: 0.5,
                intercept: -0.25,
                baseline: 0.1,
                growth: true,
                start: 4.0,
            },
        );
        plate.push("A2".to_string(), WellResult::no_growth());
        plate
    }

    #[test]
    fn csv_leaves_start_empty_without_growth() {
        let mut buf = Vec::new();
        write_results_csv_to(&mut buf, &plate()).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "well,growth,slope,intercept,baseline,start");
        assert_eq!(lines[1], "A1,true,0.5,-0.25,0.1,4");
        assert_eq!(lines[2], "A2,false,0,0,0,");
    }

    #[test]
    fn json_uses_null_start_without_growth() {
        let plate = plate();
        let config = SelectConfig::default();
        let value = serde_json::to_value(build_export(&plate, &config)).unwrap();
        assert_eq!(value["tool"], "phasesel");
        assert_eq!(value["config"]["max_slope"], 1.5);
        assert_eq!(value["wells"][0]["start"], 4.0);
        assert!(value["wells"][1]["start"].is_null());
        assert_eq!(value["wells"][1]["growth"], false);
    }
}
