//! tongues binary entrypoint kept minimal. Translation logic lives in the library.

mod args;

use std::path::Path;
use std::process::ExitCode;
use std::sync::OnceLock;
use std::{fmt, fs};

use clap::Parser;

/// Log timestamp formatter ("YYYY-MM-DD-T HH:MM:SS", local time).
struct TonguesTimer;

impl tracing_subscriber::fmt::time::FormatTime for TonguesTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> fmt::Result {
        let ts = chrono::Local::now().format("%Y-%m-%d-T %H:%M:%S").to_string();
        w.write_str(&ts)
    }
}

/// Keeps the non-blocking file writer flushing until exit.
static LOG_GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();

/// What: Initialize the tracing subscriber.
///
/// Inputs:
/// - `level`: Fallback filter when `RUST_LOG` is unset.
/// - `log_file`: Append logs to this file instead of stderr.
///
/// Details:
/// - If the log file cannot be opened, logs go to stderr with a warning.
fn init_logging(level: &str, log_file: Option<&Path>) {
    let env_filter = || {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level))
    };

    // File logging when requested, stderr otherwise
    if let Some(path) = log_file {
        match fs::OpenOptions::new().create(true).append(true).open(path) {
            Ok(file) => {
                let (non_blocking, guard) = tracing_appender::non_blocking(file);
                tracing_subscriber::fmt()
                    .with_env_filter(env_filter())
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(non_blocking)
                    .with_timer(TonguesTimer)
                    .init();
                // Dropping the guard would stop the writer thread
                let _ = LOG_GUARD.set(guard);
                tracing::debug!(path = %path.display(), "logging initialized");
                return;
            }
            Err(e) => {
                tracing_subscriber::fmt()
                    .with_env_filter(env_filter())
                    .with_target(false)
                    .with_writer(std::io::stderr)
                    .with_timer(TonguesTimer)
                    .init();
                tracing::warn!(error = %e, path = %path.display(), "failed to open log file; using stderr");
                return;
            }
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_timer(TonguesTimer)
        .init();
}

fn main() -> ExitCode {
    let args = args::Args::parse();
    let log_level = args::determine_log_level(&args);
    init_logging(&log_level, args.log_file.as_deref());

    tracing::debug!(key = ?args.key, file = ?args.file, locale = ?args.locale, "tongues starting");
    match args::process_args(&args) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            tracing::debug!(error = %err, "tongues failed");
            eprintln!("tongues: {err}");
            ExitCode::FAILURE
        }
    }
}
