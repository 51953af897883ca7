//! Verbose diagnostics for failed checks.
//!
//! The selector never prints. When `SelectConfig::verbose` is set it hands one
//! `Diagnostic` per failed check to a caller-supplied `DiagnosticSink`.

use std::fmt;

use crate::select::checks::Rejection;

/// One failed check on one phase of one well.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub well: String,
    /// Position of the phase in the well's input phase list.
    pub phase_index: usize,
    pub rejection: Rejection,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} phase #{}: {}", self.well, self.phase_index, self.rejection)
    }
}

/// Receiver for verbose diagnostics.
pub trait DiagnosticSink {
    fn report(&mut self, diagnostic: Diagnostic);
}

/// Discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn report(&mut self, _diagnostic: Diagnostic) {}
}

/// Forwards diagnostics to `tracing` at INFO level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

/// `tracing` target of the events emitted by [`TracingSink`].
pub const DIAGNOSTICS_TARGET: &str = "phasesel::diagnostics";

impl DiagnosticSink for TracingSink {
    fn report(&mut self, d: Diagnostic) {
        tracing::info!(
            target: DIAGNOSTICS_TARGET,
            well = %d.well,
            phase = d.phase_index,
            check = d.rejection.check.label(),
            observed = d.rejection.observed,
            limit = d.rejection.limit,
            "{}",
            d.rejection.check.describe()
        );
    }
}

/// Collects diagnostics in emission order.
impl DiagnosticSink for Vec<Diagnostic> {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for &mut S {
    fn report(&mut self, diagnostic: Diagnostic) {
        (**self).report(diagnostic);
    }
}
