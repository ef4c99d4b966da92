//! Logging setup.
//!
//! Structured logging via `tracing`. The CLI installs a stderr subscriber
//! so diagnostics never mix with result data on stdout; library users
//! bring their own subscriber.

use tracing_subscriber::EnvFilter;

/// Environment variable holding a tracing filter directive
pub const LOG_ENV_VAR: &str = "CATCH_LOG";

/// Install the global stderr subscriber.
///
/// `CATCH_LOG` overrides the default filter (`warn`, or `debug` for the
/// crate when `verbose` is set). Calling this twice is a no-op rather
/// than an error.
pub fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "warn,catch_client=debug,catch=debug"
    } else {
        "warn"
    };

    let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
