//! Phase qualification: the five independent rejection checks.
//!
//! Every check is evaluated for every non-excluded phase, so a phase that fails
//! several checks reports all of them.

use std::fmt;

use crate::domain::{GrowthPhase, SelectConfig, WellSeries};
use crate::select::error::SelectError;
use crate::select::window::{find_time_index, local_baseline};

/// A quality heuristic a phase can fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Check {
    /// `slope > max_slope`.
    SlopeTooHigh,
    /// `end - start < phase_length_cutoff`.
    PhaseTooShort,
    /// Measured baseline near the start differs from the claimed one.
    BaselineDeviation,
    /// `|baseline_value| > max_abs_baseline`.
    BaselineOutOfRange,
    /// `start >= time_cutoff`.
    AfterTimeCutoff,
}

impl Check {
    pub const ALL: [Check; 5] = [
        Check::SlopeTooHigh,
        Check::PhaseTooShort,
        Check::BaselineDeviation,
        Check::BaselineOutOfRange,
        Check::AfterTimeCutoff,
    ];

    /// Short label for terminal output.
    pub fn label(self) -> &'static str {
        match self {
            Check::SlopeTooHigh => "slope",
            Check::PhaseTooShort => "length",
            Check::BaselineDeviation => "baseline-dev",
            Check::BaselineOutOfRange => "baseline",
            Check::AfterTimeCutoff => "time-cutoff",
        }
    }

    /// Human-readable description of the failure.
    pub fn describe(self) -> &'static str {
        match self {
            Check::SlopeTooHigh => "unreasonably high growth rate",
            Check::PhaseTooShort => "phase is too short",
            Check::BaselineDeviation => "phase does not start at baseline",
            Check::BaselineOutOfRange => "baseline is too high/low",
            Check::AfterTimeCutoff => "phase starts after time cutoff",
        }
    }
}

/// A failed check together with the measured value and the threshold it broke.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rejection {
    pub check: Check,
    /// The measured quantity. For `BaselineDeviation` this is the signed
    /// difference `local - baseline_value`.
    pub observed: f64,
    pub limit: f64,
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} (limit {})",
            self.check.describe(),
            self.observed,
            self.limit
        )
    }
}

/// Run every check against `phase`.
///
/// Returns the (possibly empty) list of failed checks in check order. An empty
/// list means the phase qualifies. Fails only when `phase.start` is not a sample
/// time of the series.
pub fn qualify_phase(
    well: &str,
    series: &WellSeries,
    phase: &GrowthPhase,
    config: &SelectConfig,
) -> Result<Vec<Rejection>, SelectError> {
    let mut rejections = Vec::new();

    if phase.slope > config.max_slope {
        rejections.push(Rejection {
            check: Check::SlopeTooHigh,
            observed: phase.slope,
            limit: config.max_slope,
        });
    }

    let duration = phase.duration();
    if duration < config.phase_length_cutoff {
        rejections.push(Rejection {
            check: Check::PhaseTooShort,
            observed: duration,
            limit: config.phase_length_cutoff,
        });
    }

    let idx = find_time_index(&series.times, phase.start)
        .ok_or_else(|| SelectError::StartNotInSeries {
            well: well.to_string(),
            start: phase.start,
        })?;
    let local = local_baseline(&series.values, idx)
        .ok_or_else(|| SelectError::EmptyBaselineWindow {
            well: well.to_string(),
            start: phase.start,
        })?;
    let deviation = local - phase.baseline_value;
    if deviation.abs() > config.max_baseline_dev {
        rejections.push(Rejection {
            check: Check::BaselineDeviation,
            observed: deviation,
            limit: config.max_baseline_dev,
        });
    }

    if phase.baseline_value.abs() > config.max_abs_baseline {
        rejections.push(Rejection {
            check: Check::BaselineOutOfRange,
            observed: phase.baseline_value,
            limit: config.max_abs_baseline,
        });
    }

    if let Some(cutoff) = config.time_cutoff {
        if phase.start >= cutoff {
            rejections.push(Rejection {
                check: Check::AfterTimeCutoff,
                observed: phase.start,
                limit: cutoff,
            });
        }
    }

    Ok(rejections)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series() -> WellSeries {
        // Flat 0.15 baseline for the first samples, then growth.
        let times: Vec<f64> = (0..40).map(|i| i as f64).collect();
        let values: Vec<f64> = times
            .iter()
            .map(|&t| if t < 10.0 { 0.15 } else { 0.15 + 0.1 * (t - 10.0) })
            .collect();
        WellSeries { times, values }
    }

    fn phase() -> GrowthPhase {
        GrowthPhase {
            start: 0.0,
            end: 10.0,
            slope: 1.0,
            intercept: 0.0,
            baseline_value: 0.1,
            rank: 1.0,
            exclude: false,
        }
    }

    fn checks(rejections: &[Rejection]) -> Vec<Check> {
        rejections.iter().map(|r| r.check).collect()
    }

    #[test]
    fn good_phase_passes_every_check() {
        let r = qualify_phase("A1", &series(), &phase(), &SelectConfig::default()).unwrap();
        assert!(r.is_empty(), "{r:?}");
    }

    #[test]
    fn steep_slope_is_rejected() {
        let p = GrowthPhase { slope: 2.0, ..phase() };
        let r = qualify_phase("A1", &series(), &p, &SelectConfig::default()).unwrap();
        assert_eq!(checks(&r), vec![Check::SlopeTooHigh]);
        assert_eq!(r[0].observed, 2.0);
        assert_eq!(r[0].limit, 1.5);
    }

    #[test]
    fn slope_equal_to_limit_passes() {
        let p = GrowthPhase { slope: 1.5, ..phase() };
        let r = qualify_phase("A1", &series(), &p, &SelectConfig::default()).unwrap();
        assert!(r.is_empty());
    }

    #[test]
    fn short_phase_is_rejected_but_exact_cutoff_passes() {
        let p = GrowthPhase { end: 4.0, ..phase() };
        let r = qualify_phase("A1", &series(), &p, &SelectConfig::default()).unwrap();
        assert_eq!(checks(&r), vec![Check::PhaseTooShort]);

        let p = GrowthPhase { end: 5.0, ..phase() };
        let r = qualify_phase("A1", &series(), &p, &SelectConfig::default()).unwrap();
        assert!(r.is_empty());
    }

    #[test]
    fn baseline_deviation_uses_local_window() {
        // Local mean around t=25 is well above 0.1.
        let p = GrowthPhase { start: 25.0, end: 35.0, ..phase() };
        let r = qualify_phase("A1", &series(), &p, &SelectConfig::default()).unwrap();
        assert_eq!(checks(&r), vec![Check::BaselineDeviation]);
        assert!(r[0].observed > 0.5);
    }

    #[test]
    fn out_of_range_baseline_is_rejected() {
        // Claimed baseline -0.6 is both out of range and far from the measured 0.15.
        let p = GrowthPhase { baseline_value: -0.6, ..phase() };
        let r = qualify_phase("A1", &series(), &p, &SelectConfig::default()).unwrap();
        assert_eq!(
            checks(&r),
            vec![Check::BaselineDeviation, Check::BaselineOutOfRange]
        );
    }

    #[test]
    fn abs_baseline_equal_to_limit_passes() {
        let config = SelectConfig {
            max_baseline_dev: f64::INFINITY,
            ..SelectConfig::default()
        };
        for baseline_value in [0.5, -0.5] {
            let p = GrowthPhase { baseline_value, ..phase() };
            let r = qualify_phase("A1", &series(), &p, &config).unwrap();
            assert!(r.is_empty(), "{baseline_value}: {r:?}");
        }

        let p = GrowthPhase { baseline_value: 0.5000001, ..phase() };
        let r = qualify_phase("A1", &series(), &p, &config).unwrap();
        assert_eq!(checks(&r), vec![Check::BaselineOutOfRange]);
    }

    #[test]
    fn baseline_deviation_equal_to_limit_passes() {
        // Flat 0.25 series: the local mean is exactly 0.25.
        let times: Vec<f64> = (0..20).map(|i| i as f64).collect();
        let flat = WellSeries {
            values: vec![0.25; times.len()],
            times,
        };
        let config = SelectConfig {
            max_baseline_dev: 0.25,
            ..SelectConfig::default()
        };

        let p = GrowthPhase { baseline_value: 0.0, ..phase() };
        let r = qualify_phase("A1", &flat, &p, &config).unwrap();
        assert!(r.is_empty(), "{r:?}");

        let p = GrowthPhase { baseline_value: -0.125, ..phase() };
        let r = qualify_phase("A1", &flat, &p, &config).unwrap();
        assert_eq!(checks(&r), vec![Check::BaselineDeviation]);
        assert_eq!(r[0].observed, 0.375);
    }

    #[test]
    fn time_cutoff_is_inclusive() {
        let config = SelectConfig {
            time_cutoff: Some(0.0),
            ..SelectConfig::default()
        };
        let r = qualify_phase("A1", &series(), &phase(), &config).unwrap();
        assert_eq!(checks(&r), vec![Check::AfterTimeCutoff]);
    }

    #[test]
    fn all_failures_are_reported() {
        let config = SelectConfig {
            time_cutoff: Some(0.0),
            ..SelectConfig::default()
        };
        let p = GrowthPhase {
            slope: 3.0,
            end: 1.0,
            baseline_value: 0.9,
            ..phase()
        };
        let r = qualify_phase("A1", &series(), &p, &config).unwrap();
        assert_eq!(checks(&r), Check::ALL.to_vec());
    }

    #[test]
    fn missing_start_is_a_lookup_error() {
        let p = GrowthPhase { start: 7.5, ..phase() };
        let err = qualify_phase("B2", &series(), &p, &SelectConfig::default()).unwrap_err();
        assert_eq!(
            err,
            SelectError::StartNotInSeries {
                well: "B2".to_string(),
                start: 7.5
            }
        );
        assert!(err.to_string().contains("B2"));
        assert!(err.to_string().contains("7.5"));
    }
}
