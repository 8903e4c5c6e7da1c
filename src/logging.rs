//! Logging setup for the catalog binaries.

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "course_catalog=info";

/// Initialize tracing on stderr; stdout stays reserved for output.
///
/// `RUST_LOG` overrides the default filter; `verbose` lowers it to debug.
pub fn init_logging(verbose: bool) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) if verbose => EnvFilter::new("course_catalog=debug"),
        Err(_) => EnvFilter::new(DEFAULT_LOG_FILTER),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow!("Failed to initialize logging: {}", e))
}
