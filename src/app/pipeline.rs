//! Shared "selection pipeline" logic used by the `select` and `inspect` commands.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! JSON ingest -> phase qualification -> best-phase selection
//!
//! The commands can then focus on presentation (tables vs exports).

use std::path::Path;

use crate::domain::{PlateResult, SelectConfig, WellRecord};
use crate::error::AppError;
use crate::io::ingest::{PlateInput, load_plate};
use crate::select::{DiagnosticSink, WellEvaluation, evaluate_plate, select_plate, select_plate_parallel};

/// All computed outputs of a single `phasesel select` run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub input: PlateInput,
    pub plate: PlateResult,
}

/// How wells are scheduled. The result is the same either way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Schedule {
    Sequential,
    Parallel,
}

/// Load a plate and run the selector over it.
pub fn run_select<S>(path: &Path, config: &SelectConfig, schedule: Schedule, sink: &mut S) -> Result<RunOutput, AppError>
where
    S: DiagnosticSink + ?Sized,
{
    let input = load_plate(path)?;
    let plate = select_wells(&input.wells, config, schedule, sink)?;
    Ok(RunOutput { input, plate })
}

/// Run the selector over already-loaded wells.
pub fn select_wells<S>(
    wells: &[WellRecord],
    config: &SelectConfig,
    schedule: Schedule,
    sink: &mut S,
) -> Result<PlateResult, AppError>
where
    S: DiagnosticSink + ?Sized,
{
    let plate = match schedule {
        Schedule::Sequential => select_plate(wells, config, sink)?,
        Schedule::Parallel => select_plate_parallel(wells, config, sink)?,
    };
    tracing::debug!(
        wells = plate.len(),
        growth = plate.growth_count(),
        "selection finished"
    );
    Ok(plate)
}

/// Load a plate and return the per-phase verdicts of every well.
pub fn run_inspect(path: &Path, config: &SelectConfig) -> Result<(PlateInput, Vec<WellEvaluation>), AppError> {
    let input = load_plate(path)?;
    let evaluations = evaluate_plate(&input.wells, config)?;
    Ok((input, evaluations))
}
