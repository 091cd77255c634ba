// urlsnip - terminal form for batch URL shortening
//
// A single-binary TUI presenting up to five URL-entry slots. Shortening is
// simulated: a randomized delay plus a locally generated 6-character code.
// There is no backend, no persistence, and no network.
//
// Architecture:
// - form: slot list and status banner (pure, owned state)
// - shorten: simulated backend call (delay + validation + code)
// - runner: spawns shorten calls, commits completions
// - tui (ratatui): renders the form, owns all state on its event loop
// - logging: tracing layer capturing logs for the in-app panel

mod cli;
mod config;
mod events;
mod form;
mod logging;
mod runner;
mod shorten;
mod tui;

use anyhow::Result;
use config::Config;
use logging::{LogBuffer, TuiLogLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // Handle CLI commands first (config --show, --path, --reset)
    if cli::handle_cli() {
        return Ok(());
    }

    // Write the config template on first run so options are discoverable
    Config::ensure_config_exists();
    let config = Config::load();

    // Logs go to an in-memory buffer rendered inside the TUI; writing to
    // stdout would garble the alternate screen.
    let log_buffer = LogBuffer::new();

    // Precedence: RUST_LOG env var > config file > default "info"
    let default_filter = format!("urlsnip={}", config.logging.level);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());

    // Optional rolling file logs. The guard must stay alive for the whole
    // run so buffered writes flush on exit.
    let _file_guard: Option<tracing_appender::non_blocking::WorkerGuard> =
        if config.logging.file_enabled {
            match std::fs::create_dir_all(&config.logging.file_dir) {
                Ok(()) => {
                    let appender =
                        tracing_appender::rolling::daily(&config.logging.file_dir, "urlsnip.log");
                    let (non_blocking, guard) = tracing_appender::non_blocking(appender);
                    tracing_subscriber::registry()
                        .with(filter)
                        .with(TuiLogLayer::new(log_buffer.clone()))
                        .with(
                            tracing_subscriber::fmt::layer()
                                .with_writer(non_blocking)
                                .with_ansi(false),
                        )
                        .init();
                    Some(guard)
                }
                Err(e) => {
                    eprintln!(
                        "Warning: could not create log directory {:?}: {}",
                        config.logging.file_dir, e
                    );
                    tracing_subscriber::registry()
                        .with(filter)
                        .with(TuiLogLayer::new(log_buffer.clone()))
                        .init();
                    None
                }
            }
        } else {
            tracing_subscriber::registry()
                .with(filter)
                .with(TuiLogLayer::new(log_buffer.clone()))
                .init();
            None
        };

    tracing::info!(
        version = config::VERSION,
        origin = %config.short_origin,
        "starting urlsnip"
    );

    tui::run_tui(config, log_buffer).await?;

    tracing::info!("shutdown complete");
    Ok(())
}
