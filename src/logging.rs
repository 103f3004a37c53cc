use anyhow::{Context, Result};
use std::fs::File;
use std::path::Path;
use std::sync::Arc;
use tracing::{Subscriber, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// The terminal belongs to the UI, so logs go to a file.
/// `RUST_LOG` wins over the configured level when set.
pub fn init_logging(level: &str, path: &Path) -> Result<()> {
    let log_file =
        File::create(path).with_context(|| format!("create log file: {}", path.display()))?;
    tracing::subscriber::set_global_default(file_subscriber(level, log_file))?;
    info!(path=%path.display(), "logging initialized");
    Ok(())
}

pub fn file_subscriber(level: &str, log_file: File) -> impl Subscriber + Send + Sync + 'static {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_file(true)
        .with_line_number(true)
        .with_writer(Arc::new(log_file))
        .finish()
}
