//! Growth-phase selection.
//!
//! Responsibilities:
//!
//! - measure the local baseline around a phase start (`window`)
//! - qualify each phase against the quality heuristics (`checks`)
//! - pick the best qualifying phase per well (`selection`)
//! - report failed checks to an injected sink (`diagnostics`)

pub mod checks;
pub mod diagnostics;
pub mod error;
pub mod selection;
pub mod window;

pub use checks::*;
pub use diagnostics::*;
pub use error::*;
pub use selection::*;
pub use window::*;
