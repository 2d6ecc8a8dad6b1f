//! Tracing setup for the subtrack binary

use std::sync::Once;

use tracing_subscriber::{fmt, EnvFilter};

/// Environment variable holding a tracing filter directive
pub const LOG_ENV: &str = "SUBTRACK_LOG";

static TRACING_INIT: Once = Once::new();

/// Install the global fmt subscriber, writing to stderr
///
/// The filter comes from `SUBTRACK_LOG` when set, otherwise from
/// `default_filter` (normally the `log_filter` setting). Later calls are
/// no-ops.
pub fn init_tracing(default_filter: &str) {
    TRACING_INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV)
            .or_else(|_| EnvFilter::try_new(default_filter))
            .unwrap_or_else(|_| EnvFilter::new("warn"));

        fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .init();
    });
}
