//! Logging setup.
//!
//! The REPL owns stdout, so log lines go to a daily-rolling file instead:
//!
//! ```text
//! <log_dir>/
//! └── mitra.log.YYYY-MM-DD
//! ```
//!
//! Verbosity follows `RUST_LOG`, defaulting to `info`.

use std::path::Path;

use anyhow::{Context, Result, anyhow};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

const LOG_FILE_PREFIX: &str = "mitra.log";
const DEFAULT_FILTER: &str = "info";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Installs the global subscriber writing to `log_dir`.
///
/// The returned guard flushes buffered lines when dropped; keep it alive
/// for the lifetime of the program.
pub fn init_file_logging(log_dir: &Path) -> Result<WorkerGuard> {
    std::fs::create_dir_all(log_dir)
        .with_context(|| format!("failed to create log directory {}", log_dir.display()))?;

    let appender = tracing_appender::rolling::daily(log_dir, LOG_FILE_PREFIX);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .try_init()
        .map_err(|e| anyhow!("failed to initialise logging: {}", e))?;

    tracing::info!(target: "telemetry", "Logging to {}", log_dir.display());
    Ok(guard)
}

/// Installs a subscriber that discards everything below `warn` on stderr.
///
/// Used when no log directory can be determined.
pub fn init_stderr_logging() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new("warn"))
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow!("failed to initialise logging: {}", e))
}
