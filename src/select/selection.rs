//! Best-phase selection per well, and plate-level orchestration.
//!
//! Selection rules:
//! 1. Skip phases flagged `exclude` (no checks, no diagnostics)
//! 2. Qualify the rest with every check in `checks`
//! 3. Pick the qualifying phase with the highest rank; on equal rank the
//!    earliest phase in input order wins
//! 4. No qualifying phase -> `WellResult::no_growth()`

use std::collections::HashSet;

use rayon::prelude::*;

use crate::domain::{PlateResult, SelectConfig, WellRecord, WellResult};
use crate::select::checks::{Rejection, qualify_phase};
use crate::select::diagnostics::{Diagnostic, DiagnosticSink};
use crate::select::error::SelectError;

/// Outcome of qualifying one phase.
#[derive(Debug, Clone, PartialEq)]
pub enum PhaseStatus {
    Excluded,
    Qualified,
    Rejected(Vec<Rejection>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PhaseVerdict {
    /// Position in the well's input phase list.
    pub index: usize,
    pub rank: f64,
    pub status: PhaseStatus,
}

/// Everything learned about one well: its result plus a verdict per phase.
#[derive(Debug, Clone)]
pub struct WellEvaluation {
    pub well: String,
    pub result: WellResult,
    pub verdicts: Vec<PhaseVerdict>,
    /// Index of the selected phase, if any qualified.
    pub selected: Option<usize>,
}

impl WellEvaluation {
    pub fn qualified_count(&self) -> usize {
        self.verdicts
            .iter()
            .filter(|v| v.status == PhaseStatus::Qualified)
            .count()
    }

    /// One diagnostic per failed check, in phase then check order.
    pub fn diagnostics(&self) -> impl Iterator<Item = Diagnostic> + '_ {
        self.verdicts.iter().flat_map(move |v| {
            let rejections: &[Rejection] = match &v.status {
                PhaseStatus::Rejected(r) => r,
                _ => &[],
            };
            rejections.iter().map(move |r| Diagnostic {
                well: self.well.clone(),
                phase_index: v.index,
                rejection: *r,
            })
        })
    }
}

impl SelectConfig {
    /// Reject thresholds that would make every comparison meaningless.
    pub fn validate(&self) -> Result<(), SelectError> {
        let fields = [
            ("phase_length_cutoff", self.phase_length_cutoff),
            ("max_slope", self.max_slope),
            ("max_abs_baseline", self.max_abs_baseline),
            ("max_baseline_dev", self.max_baseline_dev),
            ("time_cutoff", self.time_cutoff.unwrap_or(0.0)),
        ];
        for (field, value) in fields {
            if value.is_nan() {
                return Err(SelectError::InvalidConfig { field, value });
            }
        }
        Ok(())
    }
}

/// Index of the highest-ranked candidate, first occurrence on ties.
///
/// `candidates` yields `(index, rank)` in input order. A `NaN` rank never beats
/// a real one.
pub fn best_phase_index<I>(candidates: I) -> Option<usize>
where
    I: IntoIterator<Item = (usize, f64)>,
{
    let mut best: Option<(usize, f64)> = None;
    for (idx, rank) in candidates {
        let better = match best {
            None => true,
            Some((_, best_rank)) => rank > best_rank || (best_rank.is_nan() && !rank.is_nan()),
        };
        if better {
            best = Some((idx, rank));
        }
    }
    best.map(|(idx, _)| idx)
}

/// Qualify every phase of `well` and select the best one.
pub fn evaluate_well(well: &WellRecord, config: &SelectConfig) -> Result<WellEvaluation, SelectError> {
    let series = &well.series;
    if series.times.len() != series.values.len() {
        return Err(SelectError::SeriesLengthMismatch {
            well: well.name.clone(),
            times: series.times.len(),
            values: series.values.len(),
        });
    }

    let mut verdicts = Vec::with_capacity(well.phases.len());
    for (index, phase) in well.phases.iter().enumerate() {
        let status = if phase.exclude {
            PhaseStatus::Excluded
        } else {
            let rejections = qualify_phase(&well.name, series, phase, config)?;
            if rejections.is_empty() {
                PhaseStatus::Qualified
            } else {
                PhaseStatus::Rejected(rejections)
            }
        };
        verdicts.push(PhaseVerdict {
            index,
            rank: phase.rank,
            status,
        });
    }

    let selected = best_phase_index(
        verdicts
            .iter()
            .filter(|v| v.status == PhaseStatus::Qualified)
            .map(|v| (v.index, v.rank)),
    );
    let result = match selected {
        Some(idx) => WellResult::from_phase(&well.phases[idx]),
        None => WellResult::no_growth(),
    };

    Ok(WellEvaluation {
        well: well.name.clone(),
        result,
        verdicts,
        selected,
    })
}

/// Evaluate every well of a plate, in input order.
pub fn evaluate_plate(wells: &[WellRecord], config: &SelectConfig) -> Result<Vec<WellEvaluation>, SelectError> {
    config.validate()?;
    ensure_unique_names(wells)?;
    wells.iter().map(|w| evaluate_well(w, config)).collect()
}

/// Select the best phase for every well of a plate.
///
/// When `config.verbose` is set, each failed check is reported to `sink`.
pub fn select_plate<S>(wells: &[WellRecord], config: &SelectConfig, sink: &mut S) -> Result<PlateResult, SelectError>
where
    S: DiagnosticSink + ?Sized,
{
    config.validate()?;
    ensure_unique_names(wells)?;
    collect_plate(wells.iter().map(|w| evaluate_well(w, config)), wells.len(), config, sink)
}

/// Same as `select_plate`, evaluating wells in parallel.
///
/// Results, diagnostics and the reported error are replayed in input order, so
/// the outcome is identical to the sequential version.
pub fn select_plate_parallel<S>(
    wells: &[WellRecord],
    config: &SelectConfig,
    sink: &mut S,
) -> Result<PlateResult, SelectError>
where
    S: DiagnosticSink + ?Sized,
{
    config.validate()?;
    ensure_unique_names(wells)?;
    let evaluations: Vec<Result<WellEvaluation, SelectError>> =
        wells.par_iter().map(|w| evaluate_well(w, config)).collect();
    collect_plate(evaluations.into_iter(), wells.len(), config, sink)
}

fn collect_plate<I, S>(evaluations: I, n: usize, config: &SelectConfig, sink: &mut S) -> Result<PlateResult, SelectError>
where
    I: Iterator<Item = Result<WellEvaluation, SelectError>>,
    S: DiagnosticSink + ?Sized,
{
    let mut plate = PlateResult::with_capacity(n);
    for evaluation in evaluations {
        let evaluation = evaluation?;
        if config.verbose {
            for d in evaluation.diagnostics() {
                sink.report(d);
            }
        }
        plate.push(evaluation.well, evaluation.result);
    }
    Ok(plate)
}

fn ensure_unique_names(wells: &[WellRecord]) -> Result<(), SelectError> {
    let mut seen = HashSet::with_capacity(wells.len());
    for w in wells {
        if !seen.insert(w.name.as_str()) {
            return Err(SelectError::DuplicateWell { well: w.name.clone() });
        }
    }
    Ok(())
}
