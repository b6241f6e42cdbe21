//! Noor binary entrypoint kept minimal. The full runtime lives in `noor::app`.

mod args;

use std::fmt;
use std::sync::OnceLock;

use clap::Parser;

/// Log timestamp in local time, e.g. `2026-10-19-T 04:58:00`.
struct NoorTimer;

impl tracing_subscriber::fmt::time::FormatTime for NoorTimer {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> fmt::Result {
        let ts = chrono::Local::now().format("%Y-%m-%d-T %H:%M:%S").to_string();
        w.write_str(&ts)
    }
}

static LOG_GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();

/// What: Install the tracing subscriber.
///
/// Details:
/// - Writes to `~/.config/noor/logs/noor.log`; falls back to stderr when the file
///   cannot be opened.
/// - `RUST_LOG` wins over `level`.
fn init_logging(level: &str) {
    let mut log_path = noor::theme::logs_dir();
    log_path.push("noor.log");
    let env_filter = || {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level))
    };
    match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
    {
        Ok(file) => {
            let (non_blocking, guard) = tracing_appender::non_blocking(file);
            tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_target(false)
                .with_ansi(false)
                .with_writer(non_blocking)
                .with_timer(NoorTimer)
                .init();
            let _ = LOG_GUARD.set(guard);
            tracing::info!(path = %log_path.display(), "logging initialized");
        }
        Err(e) => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter())
                .with_target(false)
                .with_ansi(true)
                .with_writer(std::io::stderr)
                .with_timer(NoorTimer)
                .init();
            tracing::warn!(error = %e, "failed to open log file; using stderr");
        }
    }
}

#[tokio::main]
async fn main() {
    let args = args::Args::parse();
    init_logging(&args::determine_log_level(&args));

    let launch = args.launch_options();
    if args.print {
        args::print::handle_print(&launch).await;
    }

    tracing::info!(?launch, "Noor starting");
    if let Err(err) = noor::app::run(launch).await {
        tracing::error!(error = ?err, "Application error");
        eprintln!("noor: {err}");
    }
    tracing::info!("Noor exited");
}
