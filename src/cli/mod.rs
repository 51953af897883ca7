//! Command-line parsing for the growth-phase selector.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the selection code.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::{
    DEFAULT_MAX_ABS_BASELINE, DEFAULT_MAX_BASELINE_DEV, DEFAULT_MAX_SLOPE, DEFAULT_PHASE_LENGTH_CUTOFF,
};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "phasesel", version, about = "Select the best growth phase for every well on a plate")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Select the best phase per well, print the plate table and optionally export it.
    Select(SelectArgs),
    /// Print the verdict of every phase (selected, rejected and why, excluded).
    Inspect(InspectArgs),
}

/// Options for `select`.
#[derive(Debug, Args, Clone)]
pub struct SelectArgs {
    /// Plate JSON produced by the curve-analysis tool.
    #[arg(value_name = "JSON")]
    pub input: PathBuf,

    #[command(flatten)]
    pub thresholds: ThresholdArgs,

    /// Evaluate wells in parallel.
    #[arg(long)]
    pub parallel: bool,

    /// Export per-well results to CSV.
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Export per-well results (plus thresholds) to JSON.
    #[arg(long = "export-json")]
    pub export_json: Option<PathBuf>,
}

/// Options for `inspect`. Inspection only prints, so there are no export flags.
#[derive(Debug, Args, Clone)]
pub struct InspectArgs {
    /// Plate JSON produced by the curve-analysis tool.
    #[arg(value_name = "JSON")]
    pub input: PathBuf,

    #[command(flatten)]
    pub thresholds: ThresholdArgs,
}

/// Qualification thresholds shared by every subcommand.
#[derive(Debug, Args, Clone)]
pub struct ThresholdArgs {
    /// Reject phases starting at or after this time.
    #[arg(long)]
    pub time_cutoff: Option<f64>,

    /// Minimum phase duration (end - start).
    #[arg(long, default_value_t = DEFAULT_PHASE_LENGTH_CUTOFF)]
    pub phase_length_cutoff: f64,

    /// Maximum acceptable growth rate.
    #[arg(long, default_value_t = DEFAULT_MAX_SLOPE)]
    pub max_slope: f64,

    /// Maximum absolute baseline value.
    #[arg(long, default_value_t = DEFAULT_MAX_ABS_BASELINE)]
    pub max_abs_baseline: f64,

    /// Maximum deviation between claimed and measured baseline at phase start.
    #[arg(long, default_value_t = DEFAULT_MAX_BASELINE_DEV)]
    pub max_baseline_dev: f64,

    /// Log every failed check (well, metric, value).
    #[arg(short, long)]
    pub verbose: bool,
}

impl Command {
    pub fn thresholds(&self) -> &ThresholdArgs {
        match self {
            Command::Select(args) => &args.thresholds,
            Command::Inspect(args) => &args.thresholds,
        }
    }
}
