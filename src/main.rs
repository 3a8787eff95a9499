// turnbell - notifies when an AI chat response finishes in a background tab
//
// The browser is abstracted behind the `host` traits. A watcher consumes
// network and click events from the host and decides when to notify.
//
// Architecture:
// - Services: which chat sites are watched and their duration thresholds
// - Tracker: correlates request start and completion per request id
// - Classifier: drops completions too short to be a generated reply
// - Debounce: coalesces bursts of completions per tab into one decision
// - Notifier: checks tab visibility at fire time, builds and records notifications
// - Router: brings the tab forward when its notification is clicked
// - GC: sweeps requests and notifications that were never resolved
// - Watcher: single event loop owning all of the above
//
// This binary drives the watcher with a simulated browser (demo or replay).

mod classifier;
mod cli;
mod clock;
mod config;
mod debounce;
mod demo;
mod events;
mod gc;
mod host;
mod logging;
mod notifier;
mod router;
mod services;
mod startup;
mod tracker;
mod watcher;

use anyhow::Result;
use cli::RunMode;
use config::Config;
use services::ServiceRegistry;
use tokio::sync::oneshot;

#[tokio::main]
async fn main() -> Result<()> {
    // Handle CLI commands first (config --show, --reset, --path)
    // If a command was handled, exit early
    let Some(mode) = cli::handle_cli() else {
        return Ok(());
    };

    // Ensure config template exists (helps users discover options)
    Config::ensure_config_exists();

    let config = Config::from_env()?;

    // The guard must be kept alive for the duration of the program to ensure logs flush
    let _file_guard = logging::init(&config.logging);

    let steps = match &mode {
        RunMode::Demo => demo::demo_script(),
        RunMode::Replay(path) => demo::load_script(path)?,
    };

    startup::print_startup(&config, &mode);
    startup::log_startup(&config, &ServiceRegistry::from_config(&config.services));

    // Ctrl+C stops the script early; the watcher still reports what it saw
    let (shutdown_tx, shutdown_rx) = oneshot::channel();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                tracing::info!("Interrupted");
                let _ = shutdown_tx.send(());
            }
            Err(e) => {
                // Keep the sender alive so the script runs to the end
                tracing::warn!("Cannot listen for Ctrl+C: {}", e);
                std::future::pending::<()>().await;
                drop(shutdown_tx);
            }
        }
    });

    let (stats, browser) = demo::run_script(&config, steps, shutdown_rx).await?;
    demo::print_summary(&stats, &browser);

    tracing::info!("Shutdown complete");
    Ok(())
}
