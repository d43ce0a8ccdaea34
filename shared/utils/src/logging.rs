use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing_subscriber::{
    fmt::{self, writer::BoxMakeWriter},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

use crate::config::LoggingConfig;

/// Install the global subscriber. Logs go to stderr unless a file is
/// configured, so JSON results on stdout stay clean.
pub fn init_logging(config: &LoggingConfig) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let writer = log_writer(config.file_path.as_deref())?;
    let registry = tracing_subscriber::registry().with(env_filter);

    if config.format == "json" {
        registry.with(fmt::layer().json().with_writer(writer)).try_init()?;
    } else {
        registry
            .with(
                fmt::layer()
                    .with_ansi(config.file_path.is_none())
                    .with_writer(writer),
            )
            .try_init()?;
    }

    tracing::debug!("Logging initialized with level: {}", config.level);
    Ok(())
}

/// Appending file sink when a path is configured, stderr otherwise.
fn log_writer(file_path: Option<&str>) -> Result<BoxMakeWriter> {
    match file_path {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("opening log file {}", path))?;
            Ok(BoxMakeWriter::new(Mutex::new(file)))
        }
        None => Ok(BoxMakeWriter::new(std::io::stderr)),
    }
}
