//! Reporting utilities: plate tables, phase verdicts and run summaries.

pub mod format;

pub use format::*;
