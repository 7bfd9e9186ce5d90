//! Tracing setup for the server process.
//!
//! Log lines go to two sinks: stdout for interactive runs, and a daily
//! rolling file under the configured log directory. The file copy keeps
//! module targets; stdout stays terse. `RUST_LOG` replaces the default
//! filter entirely when set.

use std::sync::OnceLock;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::core::config::AppPaths;

const LOG_FILE: &str = "ragchat.log";

// tracing-appender flushes through this guard; dropping it before
// shutdown loses buffered lines.
static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// Filter applied when `RUST_LOG` is unset: this crate at debug so chat
/// turns and retrieval calls show up in development, everything else at
/// info.
fn default_filter() -> EnvFilter {
    EnvFilter::new("info,ragchat_backend=debug")
}

pub fn init(paths: &AppPaths) {
    let log_dir = &paths.log_dir;
    let _ = std::fs::create_dir_all(log_dir);

    let file_appender = tracing_appender::rolling::daily(log_dir, LOG_FILE);
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);
    let _ = LOG_GUARD.set(guard);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter());

    let stdout_layer = tracing_subscriber::fmt::layer().with_target(false);
    let file_layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .with_writer(file_writer);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer)
        .init();
}
