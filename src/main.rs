// ccforge - Terminal front-end for Claude Code
//
// A line-oriented terminal session: a bounded transcript of output lines,
// a single-line input editor, a scrollable viewport and an event router
// that turns keystrokes, process reports and commands into state changes.
//
// Architecture:
// - TUI core (tui/): transcript, editor, scroller, router + command table
// - Event system: background producers send `AppEvent`s over an mpsc channel
// - Demo mode: mock process events stand in for a real process supervisor
// - Logging: tracing into an in-memory buffer while the TUI owns the screen

mod cli;
mod config;
mod demo;
mod events;
mod logging;
mod tui;

use anyhow::Result;
use clap::Parser;
use config::Config;
use logging::{LogBuffer, LogLevel, TuiLogLayer};
use tokio::sync::mpsc;
use tracing_appender::rolling::RollingFileAppender;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // Handle CLI commands first (config --show, --reset, --path)
    // If a command was handled, exit early
    let cli = cli::Cli::parse();
    if cli::handle_cli(&cli)? {
        return Ok(());
    }

    // Ensure config template exists (helps users discover options)
    Config::ensure_config_exists();

    // Precedence: flags > env > config file > defaults
    let mut config = Config::load()?;
    cli.apply(&mut config);

    // Logs go to an in-memory buffer while the TUI owns the terminal
    let log_buffer = LogBuffer::new();

    // Precedence: RUST_LOG env var > config file > default "info"
    let default_filter = format!("ccforge={}", config.logging.level);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());

    // Set up file logging if enabled (non-blocking writer with rotation)
    // The guard must be kept alive for the duration of the program to ensure logs flush
    let mut file_guard: Option<tracing_appender::non_blocking::WorkerGuard> = None;
    let file_layer = if config.logging.file_enabled {
        match std::fs::create_dir_all(&config.logging.file_dir) {
            Ok(()) => {
                let file_appender = RollingFileAppender::new(
                    config.logging.file_rotation.into(),
                    &config.logging.file_dir,
                    &config.logging.file_prefix,
                );

                // Wrap in non-blocking writer (writes happen in background thread)
                let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
                file_guard = Some(guard);

                // JSON format for structured log parsing
                Some(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(non_blocking)
                        .with_ansi(false),
                )
            }
            Err(e) => {
                eprintln!(
                    "Warning: Could not create log directory {:?}: {}",
                    config.logging.file_dir, e
                );
                None
            }
        }
    } else {
        None
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(TuiLogLayer::new(log_buffer.clone()))
        .with(file_layer)
        .init();

    // Bounded channel: if the TUI falls behind, producers wait (backpressure)
    let (event_tx, event_rx) = mpsc::channel(1000);

    // Oneshot shutdown signal for the background producer
    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();

    let demo_handle = if config.demo_mode {
        tracing::info!("Running in DEMO MODE - generating mock process events");
        Some(tokio::spawn(demo::run_demo(event_tx.clone(), shutdown_rx)))
    } else {
        drop(shutdown_rx);
        None
    };

    // Run the TUI in the main task until the user quits (Ctrl+C or /exit)
    let tui_result = tui::run_tui(event_rx, &config).await;
    if let Err(e) = &tui_result {
        tracing::error!("TUI error: {:?}", e);
    }

    tracing::info!("Shutting down...");

    // If the send fails, the producer has already finished (which is fine)
    let _ = shutdown_tx.send(());
    drop(event_tx);
    if let Some(handle) = demo_handle {
        let _ = handle.await;
    }

    // The screen is ours again: surface anything worth reading
    for entry in log_buffer.at_least(LogLevel::Warn) {
        eprintln!("{}", entry.format_line());
    }

    drop(file_guard);
    tui_result
}
