// EchoMark client core
// Upload/mode-selection state machine and the detection API client behind a
// thin presentation facade.

pub mod api;
pub mod models;
pub mod services;

use std::fs;
use std::path::PathBuf;
use std::sync::OnceLock;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static LOG_GUARD: OnceLock<WorkerGuard> = OnceLock::new();

/// Initialize logging. Console output honors `RUST_LOG` (default `info`);
/// set `ECHOMARK_LOG_DIR` to also write a per-session log file.
pub fn init_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let log_dir = std::env::var("ECHOMARK_LOG_DIR")
        .ok()
        .filter(|p| !p.trim().is_empty())
        .map(PathBuf::from);

    let Some(dir) = log_dir else {
        let console_layer = fmt::layer().with_writer(std::io::stdout).with_target(true);
        tracing_subscriber::registry()
            .with(env_filter)
            .with(console_layer)
            .init();
        info!(version = env!("CARGO_PKG_VERSION"), "echomark.initialized");
        return;
    };

    if let Err(e) = fs::create_dir_all(&dir) {
        eprintln!("Failed to create log directory: {}", e);
        let console_layer = fmt::layer().with_writer(std::io::stdout).with_target(true);
        tracing_subscriber::registry()
            .with(env_filter)
            .with(console_layer)
            .init();
        info!("Falling back to console-only logging (log dir not writable)");
        return;
    }

    let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    let file_appender = rolling::never(&dir, format!("echomark_{}.log", timestamp));
    let (file_writer, file_guard) = tracing_appender::non_blocking(file_appender);
    let _ = LOG_GUARD.set(file_guard);

    let file_layer = fmt::layer()
        .with_writer(file_writer)
        .with_ansi(false)
        .with_target(true);

    let console_layer = fmt::layer().with_writer(std::io::stdout).with_target(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(console_layer)
        .init();

    info!(version = env!("CARGO_PKG_VERSION"), log_dir = %dir.display(), "echomark.initialized");
}
