use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::{Error, Result};

/// Initialize diagnostic logging.
///
/// Diagnostics always go to stderr: stdout belongs to the transcript. The
/// filter is taken from `RUST_LOG` with a default of `info`.
pub fn init_logging() -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .try_init()
        .map_err(|e| Error::Setup(format!("Failed to initialize logging: {}", e)))?;

    Ok(())
}
