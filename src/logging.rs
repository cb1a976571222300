use anyhow::{Context, Result, anyhow};
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

/// Environment variable holding the log filter, e.g. `TREEYANK_LOG=treeyank=debug`.
pub const LOG_ENV: &str = "TREEYANK_LOG";

/// Installs the global subscriber.
///
/// Without a log file only warnings and errors reach stderr, which keeps the
/// terminal clean while the picker owns the screen. With a log file the
/// default level is `info` and writes go through a non-blocking appender;
/// the returned guard must be held until exit so buffered lines are flushed.
pub fn init_logging(log_file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    match log_file {
        Some(path) => {
            let file_name = path
                .file_name()
                .ok_or_else(|| anyhow!("log file path has no file name: {}", path.display()))?;
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            let file_appender = tracing_appender::rolling::never(dir, file_name);
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

            tracing_subscriber::registry()
                .with(env_filter("info"))
                .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
                .try_init()
                .context("failed to install file logger")?;
            Ok(Some(guard))
        }
        None => {
            tracing_subscriber::registry()
                .with(env_filter("warn"))
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .without_time()
                        .with_target(false),
                )
                .try_init()
                .context("failed to install stderr logger")?;
            Ok(None)
        }
    }
}

fn env_filter(default_directive: &str) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_directive))
}
