//! Diagnostic logging setup.

use tracing_subscriber::EnvFilter;

/// Environment variable overriding the log filter, in `EnvFilter` syntax.
pub const LOG_ENV: &str = "EXTCHECK_LOG";

/// Installs the global `tracing` subscriber, writing to stderr.
///
/// `EXTCHECK_LOG` wins when set; otherwise `debug` selects the debug level and
/// everything else logs warnings only. Calling this twice is harmless.
pub fn init(debug: bool) {
    let default_level = if debug { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}
