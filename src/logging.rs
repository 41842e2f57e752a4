//! Tracing setup for the command-line binary
//!
//! Logs go to stderr so that command output (CSV on stdout, listings) stays
//! clean. `RUST_LOG` overrides the default level, e.g. `RUST_LOG=benefits=debug`.

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Directive used when `RUST_LOG` is unset or invalid
pub const DEFAULT_DIRECTIVE: &str = "benefits=warn";

/// Initializes the global tracing subscriber once per process.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, EnvFilter};

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));

        // Another subscriber may already be installed (e.g. by a test harness).
        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    });
}
