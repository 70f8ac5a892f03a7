//! Tracing initialization.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "GAMMA_BOOTSTRAP_LOG";

static INIT: Once = Once::new();

/// Install a `tracing` subscriber writing to stderr.
///
/// Reads [`LOG_ENV`] for per-module levels, e.g.
/// `GAMMA_BOOTSTRAP_LOG=gamma_bootstrap::sweep=debug`. Falls back to
/// `gamma_bootstrap=info` if it is unset or invalid.
///
/// Calling this more than once is a no-op.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV)
            .unwrap_or_else(|_| EnvFilter::new("gamma_bootstrap=info"));

        let installed = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_thread_ids(true),
            )
            .with(filter)
            .try_init();
        if installed.is_err() {
            tracing::debug!("a global subscriber was already set");
        }
    });
}
