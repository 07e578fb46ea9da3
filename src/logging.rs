use anyhow::{Context, Result};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use std::fs::File;
use std::io;
use std::path::Path;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Install the global subscriber.
///
/// Diagnostics go to stderr; stdout carries only command output (frame hex,
/// decoded records). With `log_file` set, the same events are also appended
/// without colour to that file, and the returned guard flushes it on drop.
pub fn init(log_file: Option<&Path>, verbosity: &Verbosity<InfoLevel>) -> Result<Option<WorkerGuard>> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(from_env) => from_env,
        Err(_) => EnvFilter::default().add_directive(verbosity.tracing_level_filter().into()),
    };

    let (file_writer, guard) = match log_file {
        Some(path) => {
            let file = File::create(path).with_context(|| format!("Cannot create log file {}", path.display()))?;
            let (writer, guard) = tracing_appender::non_blocking(file);
            (Some(writer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stderr).compact().without_time())
        .with(file_writer.map(|writer| fmt::layer().with_writer(writer).with_ansi(false)))
        .try_init()
        .context("Logging was already initialised")?;

    if let Some(path) = log_file {
        info!("Writing log to {}", path.display());
    }
    Ok(guard)
}
