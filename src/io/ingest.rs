//! JSON ingest and validation of the upstream curve-analysis output.
//!
//! The input is an array of wells:
//!
//! ```text
//! [{ "name": "A1",
//!    "series": { "times": [...], "values": [...] },
//!    "annotation": { "growthPhases": [
//!        { "start", "end", "slope", "intercept", "baselineValue", "rank", "exclude" } ] } }]
//! ```
//!
//! Design goals:
//! - **Strict schema**: every field except `exclude` is required
//! - **Fail fast**: the first malformed well aborts the load, naming the well and field
//! - **Names as written**: well names are not trimmed or case-folded, so `"A1"` and `"A1 "` are
//!   different wells
//! - **Separation of concerns**: no selection logic here

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::domain::{GrowthPhase, WellRecord, WellSeries};
use crate::error::{AppError, EXIT_INPUT};

/// Summary counts about the loaded plate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlateStats {
    pub n_wells: usize,
    pub n_phases: usize,
    pub n_excluded: usize,
}

/// Ingest output: validated wells + stats.
#[derive(Debug, Clone)]
pub struct PlateInput {
    pub wells: Vec<WellRecord>,
    pub stats: PlateStats,
}

#[derive(Debug, Deserialize)]
struct RawWell {
    name: Option<String>,
    series: Option<RawSeries>,
    annotation: Option<RawAnnotation>,
}

#[derive(Debug, Deserialize)]
struct RawSeries {
    times: Option<Vec<Option<f64>>>,
    values: Option<Vec<Option<f64>>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawAnnotation {
    growth_phases: Option<Vec<RawPhase>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPhase {
    start: Option<f64>,
    end: Option<f64>,
    slope: Option<f64>,
    intercept: Option<f64>,
    baseline_value: Option<f64>,
    rank: Option<f64>,
    exclude: Option<bool>,
}

/// Load and validate a plate JSON file.
pub fn load_plate(path: &Path) -> Result<PlateInput, AppError> {
    let text = fs::read_to_string(path)
        .map_err(|e| AppError::new(EXIT_INPUT, format!("Failed to open plate JSON '{}': {e}", path.display())))?;
    let wells = parse_plate_json(&text)?;
    tracing::debug!(path = %path.display(), wells = wells.len(), "loaded plate");
    Ok(PlateInput {
        stats: compute_stats(&wells),
        wells,
    })
}

/// Parse and validate plate JSON text.
pub fn parse_plate_json(text: &str) -> Result<Vec<WellRecord>, AppError> {
    let raw: Vec<RawWell> =
        serde_json::from_str(text).map_err(|e| AppError::new(EXIT_INPUT, format!("Invalid plate JSON: {e}")))?;

    raw.into_iter()
        .enumerate()
        .map(|(idx, w)| normalize_well(idx, w).map_err(|e| AppError::new(EXIT_INPUT, e)))
        .collect()
}

pub fn compute_stats(wells: &[WellRecord]) -> PlateStats {
    PlateStats {
        n_wells: wells.len(),
        n_phases: wells.iter().map(|w| w.phases.len()).sum(),
        n_excluded: wells
            .iter()
            .flat_map(|w| w.phases.iter())
            .filter(|p| p.exclude)
            .count(),
    }
}

fn normalize_well(idx: usize, raw: RawWell) -> Result<WellRecord, String> {
    let name = raw
        .name
        .filter(|n| !n.is_empty())
        .ok_or_else(|| format!("Well #{idx}: missing required field `name`"))?;

    let series = raw
        .series
        .ok_or_else(|| format!("Well `{name}`: missing required field `series`"))?;
    let times = number_list(&name, "series.times", series.times)?;
    let values = number_list(&name, "series.values", series.values)?;
    if times.len() != values.len() {
        return Err(format!(
            "Well `{name}`: `series.times` has {} entries but `series.values` has {}",
            times.len(),
            values.len()
        ));
    }

    let raw_phases = raw
        .annotation
        .ok_or_else(|| format!("Well `{name}`: missing required field `annotation`"))?
        .growth_phases
        .ok_or_else(|| format!("Well `{name}`: missing required field `annotation.growthPhases`"))?;

    let phases = raw_phases
        .into_iter()
        .enumerate()
        .map(|(i, p)| normalize_phase(&name, i, p))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(WellRecord {
        name,
        series: WellSeries { times, values },
        phases,
    })
}

fn normalize_phase(well: &str, idx: usize, raw: RawPhase) -> Result<GrowthPhase, String> {
    let field = |value: Option<f64>, name: &str| {
        value.ok_or_else(|| format!("Well `{well}`: growth phase #{idx} is missing `{name}`"))
    };
    Ok(GrowthPhase {
        start: field(raw.start, "start")?,
        end: field(raw.end, "end")?,
        slope: field(raw.slope, "slope")?,
        intercept: field(raw.intercept, "intercept")?,
        baseline_value: field(raw.baseline_value, "baselineValue")?,
        rank: field(raw.rank, "rank")?,
        exclude: raw.exclude.unwrap_or(false),
    })
}

fn number_list(well: &str, field: &str, raw: Option<Vec<Option<f64>>>) -> Result<Vec<f64>, String> {
    let raw = raw.ok_or_else(|| format!("Well `{well}`: missing required field `{field}`"))?;
    raw.into_iter()
        .enumerate()
        .map(|(i, v)| v.ok_or_else(|| format!("Well `{well}`: `{field}[{i}]` is not a number")))
        .collect()
}
