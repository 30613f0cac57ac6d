use crate::Result;
use anyhow::{anyhow, Context};
use std::sync::atomic::{AtomicBool, Ordering};
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::prelude::*;

static LOGGER_INITIALIZED: AtomicBool = AtomicBool::new(false);

/// Initialize the tracing subscriber for the relay process.
///
/// `RUST_LOG` takes precedence over the CLI-provided default level. Errors when
/// invoked more than once per process invocation.
pub fn init(default_level: &str) -> Result<()> {
    if LOGGER_INITIALIZED
        .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
        .is_err()
    {
        return Err(anyhow!("logging already initialized"));
    }

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .context("failed to configure tracing level")?;

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .try_init()
        .context("failed to install tracing subscriber")?;

    Ok(())
}
