//! Tracing subscriber setup for the `phasesel` binary.
//!
//! The library only emits events; installing a subscriber is the binary's job.

use std::io::IsTerminal;

use tracing_subscriber::filter::Directive;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::error::{AppError, EXIT_INPUT};
use crate::select::DIAGNOSTICS_TARGET;

/// Default filter when `RUST_LOG` is unset.
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose { "info" } else { "warn" }
}

/// Build the event filter from an optional `RUST_LOG` value.
///
/// An unset, blank or unparsable `RUST_LOG` falls back to [`default_directive`].
/// In verbose mode the diagnostics target is always enabled at `info`, whatever
/// `RUST_LOG` says.
pub fn build_filter(verbose: bool, rust_log: Option<&str>) -> Result<EnvFilter, AppError> {
    let filter = rust_log
        .filter(|s| !s.trim().is_empty())
        .and_then(|s| EnvFilter::try_new(s).ok())
        .unwrap_or_else(|| EnvFilter::new(default_directive(verbose)));
    if !verbose {
        return Ok(filter);
    }

    let directive: Directive = format!("{DIAGNOSTICS_TARGET}=info")
        .parse()
        .map_err(|e| AppError::new(EXIT_INPUT, format!("Invalid log directive: {e}")))?;
    Ok(filter.add_directive(directive))
}

/// Configure the global tracing subscriber (stderr, `RUST_LOG` aware).
///
/// A `.env` file in the working directory is loaded first so `RUST_LOG` can be
/// set there.
pub fn init_tracing(verbose: bool) -> Result<(), AppError> {
    dotenvy::dotenv().ok();

    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = build_filter(verbose, rust_log.as_deref())?;
    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .with_ansi(std::io::stderr().is_terminal());

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| AppError::new(EXIT_INPUT, format!("Failed to initialise logging: {e}")))
}
