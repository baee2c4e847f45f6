//! Diagnostic logging via `tracing`.
//!
//! Library code emits events with structured fields (record id, site,
//! counts).  Secrets and keys are never passed to a log macro.  The
//! binary installs a stderr subscriber here; the filter comes from
//! `LOCKBOX_LOG` (EnvFilter syntax) and falls back to `warn`, or `debug`
//! with `--verbose`.

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "LOCKBOX_LOG";

/// Install the global subscriber.  Safe to call more than once.
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
