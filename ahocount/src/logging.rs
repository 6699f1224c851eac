//! Diagnostics on stderr through [`tracing`].

use std::error::Error;

use tracing_subscriber::EnvFilter;

/// Initializes the logging framework.
pub fn install_tracing(filter_directives: &str) -> Result<(), Box<dyn Error>> {
    let env_filter = EnvFilter::try_new(filter_directives)
        .or_else(|_| EnvFilter::try_from_default_env())
        .or_else(|_| EnvFilter::try_new("warn"))?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| -> Box<dyn Error> { e })?;
    Ok(())
}
