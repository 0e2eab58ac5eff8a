use crate::conf::LoggingConfig;
use anyhow::{Context, Result};
use std::io::{self, IsTerminal};
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt};

/// Initialize the logging system with JSON formatting and environment-based filtering
///
/// - `RUST_LOG` wins over the configured level when it is set
/// - Events are JSON with flattened fields
/// - With a log file configured, events are appended to it through a
///   background writer; the returned guard must be held until exit so the
///   writer can flush
pub fn init_logging(cfg: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&cfg.level))
        .with_context(|| format!("invalid log level '{}'", cfg.level))?;

    let Some(file) = &cfg.file else {
        fmt()
            .with_env_filter(filter)
            .json()
            .flatten_event(true)
            .with_writer(io::stderr)
            .try_init()
            .map_err(|e| anyhow::anyhow!(e))
            .context("failed to install log subscriber")?;
        return Ok(None);
    };

    let dir = match file.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let name = file
        .file_name()
        .with_context(|| format!("log file '{}' has no file name", file.display()))?;

    let appender = tracing_appender::rolling::never(dir, name);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    fmt()
        .with_env_filter(filter)
        .json()
        .flatten_event(true)
        .with_writer(writer)
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))
        .context("failed to install log subscriber")?;

    Ok(Some(guard))
}

pub fn use_color() -> bool {
    io::stdout().is_terminal()
}
