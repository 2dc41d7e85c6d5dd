//! Logging setup.
//!
//! Logs go to stderr so stdout carries only the install transcript and
//! prompts. `USAGE_MONITOR_DEBUG_LOG=1` forces debug level; otherwise
//! `RUST_LOG` applies, defaulting to `warn`. Setting `USAGE_MONITOR_LOG_DIR`
//! also writes a log file there.

use std::env;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

const LOG_FILE_NAME: &str = "usage-monitor-install.log";

fn env_flag(name: &str) -> bool {
    env::var(name)
        .map(|value| matches!(value.as_str(), "1" | "true" | "TRUE" | "yes" | "YES"))
        .unwrap_or(false)
}

fn build_filter() -> EnvFilter {
    if env_flag("USAGE_MONITOR_DEBUG_LOG") {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    }
}

/// Installs the global subscriber; call once, at startup. Keep the returned
/// guard alive for the whole process so the file writer flushes on exit.
pub fn init() -> Option<WorkerGuard> {
    let stderr_layer = fmt::layer().with_writer(std::io::stderr).with_target(false);

    match env::var_os("USAGE_MONITOR_LOG_DIR") {
        Some(dir) => {
            let appender = tracing_appender::rolling::never(dir, LOG_FILE_NAME);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let file_layer = fmt::layer().with_writer(writer).with_ansi(false);
            tracing_subscriber::registry()
                .with(build_filter())
                .with(stderr_layer)
                .with(file_layer)
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::registry()
                .with(build_filter())
                .with(stderr_layer)
                .init();
            None
        }
    }
}
