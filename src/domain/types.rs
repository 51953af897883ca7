//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - built from the upstream analysis tool's JSON output
//! - evaluated in-memory by the selector
//! - exported to JSON/CSV for downstream reporting

use serde::{Deserialize, Serialize};

/// Default minimum phase duration (`end - start`).
pub const DEFAULT_PHASE_LENGTH_CUTOFF: f64 = 5.0;
/// Default upper bound on an acceptable growth rate.
pub const DEFAULT_MAX_SLOPE: f64 = 1.5;
/// Default upper bound on `|baseline_value|`.
pub const DEFAULT_MAX_ABS_BASELINE: f64 = 0.5;
/// Default maximum gap between claimed and locally measured baseline.
pub const DEFAULT_MAX_BASELINE_DEV: f64 = 0.5;

/// Time series of optical-density readings for one well.
///
/// `times` and `values` are index-aligned and must have the same length.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WellSeries {
    pub times: Vec<f64>,
    pub values: Vec<f64>,
}

/// A candidate growth phase detected by the upstream tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrowthPhase {
    pub start: f64,
    pub end: f64,
    pub slope: f64,
    pub intercept: f64,
    /// Baseline level the upstream tool claims for this phase.
    pub baseline_value: f64,
    /// Upstream quality score; higher is better.
    pub rank: f64,
    /// Upstream request to skip this phase.
    #[serde(default)]
    pub exclude: bool,
}

impl GrowthPhase {
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// One well on the plate: its measurements plus the phases annotated on them.
#[derive(Debug, Clone, PartialEq)]
pub struct WellRecord {
    pub name: String,
    pub series: WellSeries,
    /// Phases in upstream order (the order matters for rank ties).
    pub phases: Vec<GrowthPhase>,
}

/// Per-well selection outcome.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WellResult {
    pub slope: f64,
    pub intercept: f64,
    pub baseline: f64,
    pub growth: bool,
    /// Start of the selected phase, `NaN` when `growth` is false.
    pub start: f64,
}

impl WellResult {
    /// The record emitted when no phase of a well qualifies.
    pub fn no_growth() -> Self {
        Self {
            slope: 0.0,
            intercept: 0.0,
            baseline: 0.0,
            growth: false,
            start: f64::NAN,
        }
    }

    pub fn from_phase(phase: &GrowthPhase) -> Self {
        Self {
            slope: phase.slope,
            intercept: phase.intercept,
            baseline: phase.baseline_value,
            growth: true,
            start: phase.start,
        }
    }
}

#[cfg(test)]
impl WellResult {
    /// Field-wise equality that treats two `NaN` starts as equal.
    pub(crate) fn same_as(&self, other: &WellResult) -> bool {
        let start_eq = self.start == other.start || (self.start.is_nan() && other.start.is_nan());
        self.slope == other.slope
            && self.intercept == other.intercept
            && self.baseline == other.baseline
            && self.growth == other.growth
            && start_eq
    }
}

/// Plate-level result: well name -> `WellResult`, in plate input order.
#[derive(Debug, Clone, Default)]
pub struct PlateResult {
    wells: Vec<(String, WellResult)>,
}

impl PlateResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(n: usize) -> Self {
        Self {
            wells: Vec::with_capacity(n),
        }
    }

    /// Append a well. Callers are responsible for name uniqueness.
    pub(crate) fn push(&mut self, name: String, result: WellResult) {
        self.wells.push((name, result));
    }

    pub fn get(&self, name: &str) -> Option<&WellResult> {
        self.wells.iter().find(|(n, _)| n == name).map(|(_, r)| r)
    }

    pub fn len(&self) -> usize {
        self.wells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.wells.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &WellResult)> {
        self.wells.iter().map(|(n, r)| (n.as_str(), r))
    }

    pub fn growth_count(&self) -> usize {
        self.wells.iter().filter(|(_, r)| r.growth).count()
    }
}

#[cfg(test)]
impl PlateResult {
    /// Same wells, same order, same values (`NaN` starts compare equal).
    pub(crate) fn same_as(&self, other: &PlateResult) -> bool {
        self.wells.len() == other.wells.len()
            && self
                .wells
                .iter()
                .zip(other.wells.iter())
                .all(|((na, ra), (nb, rb))| na == nb && ra.same_as(rb))
    }
}

/// The heuristic thresholds used to qualify phases.
///
/// Derived from CLI flags (plus defaults) or built directly by library callers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SelectConfig {
    /// Phases starting at or after this time are rejected.
    pub time_cutoff: Option<f64>,
    pub phase_length_cutoff: f64,
    pub max_slope: f64,
    pub max_abs_baseline: f64,
    pub max_baseline_dev: f64,
    /// Emit one diagnostic per failed check. Never changes the result.
    pub verbose: bool,
}

impl Default for SelectConfig {
    fn default() -> Self {
        Self {
            time_cutoff: None,
            phase_length_cutoff: DEFAULT_PHASE_LENGTH_CUTOFF,
            max_slope: DEFAULT_MAX_SLOPE,
            max_abs_baseline: DEFAULT_MAX_ABS_BASELINE,
            max_baseline_dev: DEFAULT_MAX_BASELINE_DEV,
            verbose: false,
        }
    }
}
