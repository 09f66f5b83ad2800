use tracing_subscriber::EnvFilter;

use super::error::Error;

/// Installs the global `tracing` subscriber.
///
/// `RUST_LOG` wins over `level`. Log lines go to stderr so stdout carries only
/// the run report.
pub fn init_logging(level: &str) -> Result<(), Error> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(level)
            .map_err(|e| Error::ConfigLoadError(format!("Invalid log level {:?}: {}", level, e)))?,
    };

    // Ignored when a subscriber is already installed (e.g. by a test harness).
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .try_init();

    Ok(())
}
