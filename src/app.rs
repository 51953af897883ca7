//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - initialises logging
//! - loads the plate JSON
//! - runs phase qualification + selection
//! - prints reports
//! - writes optional exports

use clap::Parser;

use crate::cli::{Command, InspectArgs, SelectArgs, ThresholdArgs};
use crate::domain::SelectConfig;
use crate::error::AppError;
use crate::select::{NullSink, TracingSink};

pub mod pipeline;

use pipeline::Schedule;

/// Entry point for the `phasesel` binary.
pub fn run() -> Result<(), AppError> {
    let cli = crate::cli::Cli::parse();
    crate::telemetry::init_tracing(cli.command.thresholds().verbose)?;

    match cli.command {
        Command::Select(args) => handle_select(args),
        Command::Inspect(args) => handle_inspect(args),
    }
}

fn handle_select(args: SelectArgs) -> Result<(), AppError> {
    let config = select_config_from_args(&args.thresholds);
    let schedule = if args.parallel {
        Schedule::Parallel
    } else {
        Schedule::Sequential
    };

    let run = if config.verbose {
        pipeline::run_select(&args.input, &config, schedule, &mut TracingSink)?
    } else {
        pipeline::run_select(&args.input, &config, schedule, &mut NullSink)?
    };

    println!("{}", crate::report::format_run_summary(&run.input.stats, &config));
    println!("{}", crate::report::format_plate_table(&run.plate));

    // Optional exports.
    if let Some(path) = &args.export {
        crate::io::export::write_results_csv(path, &run.plate)?;
        tracing::info!(path = %path.display(), "wrote CSV export");
    }
    if let Some(path) = &args.export_json {
        crate::io::export::write_results_json(path, &run.plate, &config)?;
        tracing::info!(path = %path.display(), "wrote JSON export");
    }

    Ok(())
}

fn handle_inspect(args: InspectArgs) -> Result<(), AppError> {
    let config = select_config_from_args(&args.thresholds);
    let (input, evaluations) = pipeline::run_inspect(&args.input, &config)?;

    println!("{}", crate::report::format_run_summary(&input.stats, &config));
    println!("{}", crate::report::format_phase_verdicts(&evaluations));
    Ok(())
}

pub fn select_config_from_args(args: &ThresholdArgs) -> SelectConfig {
    SelectConfig {
        time_cutoff: args.time_cutoff,
        phase_length_cutoff: args.phase_length_cutoff,
        max_slope: args.max_slope,
        max_abs_baseline: args.max_abs_baseline,
        max_baseline_dev: args.max_baseline_dev,
        verbose: args.verbose,
    }
}
