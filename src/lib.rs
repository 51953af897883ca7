//! `phase-select` library crate.
//!
//! The binary (`phasesel`) is a thin wrapper around this library so that:
//!
//! - the selection logic is testable without spawning processes
//! - notebooks or other front-ends can call `select::select_plate` directly

pub mod app;
pub mod cli;
pub mod domain;
pub mod error;
pub mod io;
pub mod report;
pub mod select;
pub mod telemetry;
