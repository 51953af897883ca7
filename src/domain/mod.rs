//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - input records (`WellRecord`, `WellSeries`, `GrowthPhase`)
//! - selection outputs (`WellResult`, `PlateResult`)
//! - the heuristic thresholds (`SelectConfig`)

pub mod types;

pub use types::*;
