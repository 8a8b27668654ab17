use std::fs::OpenOptions;
use std::sync::Arc;

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Environment variable naming a file to receive log output.
pub const LOG_FILE_ENV: &str = "PARLEY_LOG_FILE";

/// Initialize tracing.
///
/// The terminal belongs to the UI, so log output only goes to a file and
/// only when `PARLEY_LOG_FILE` names one. Filtering follows `RUST_LOG`,
/// defaulting to `info`.
pub fn init_tracing() -> anyhow::Result<()> {
    let Some(log_path) = std::env::var_os(LOG_FILE_ENV) else {
        return Ok(());
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let file_layer = fmt::layer()
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .with_target(true);

    tracing_subscriber::registry()
        .with(file_layer.with_filter(filter))
        .init();

    Ok(())
}
