use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::sync::{broadcast, mpsc};
use tracing_subscriber::EnvFilter;

mod app;
mod config;
mod grpc;
mod models;
mod sort;
mod ui;
mod utils;

use app::state::AppState;
use config::settings::Settings;
use ui::app::TuiApp;
use ui::theme::Theme;

#[derive(Parser, Debug)]
#[command(name = "gitops-tui")]
#[command(about = "Terminal UI for GitOps sources, automations and events")]
#[command(version)]
struct Args {
    /// Core API server address (overrides config)
    #[arg(short, long)]
    server: Option<String>,

    /// Configuration file path
    #[arg(short, long)]
    config: Option<String>,

    /// Cluster name sent with every request (overrides config)
    #[arg(long)]
    cluster: Option<String>,
}

/// Log to a file; stdout belongs to the TUI.
fn init_logging(log_level: &str) -> Result<()> {
    let log_path = Settings::default_log_path();
    if let Some(parent) = log_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let log_file = std::fs::File::create(&log_path)
        .with_context(|| format!("opening log file {}", log_path.display()))?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Arc::new(log_file))
        .with_ansi(false)
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Suppress panic output so a crash does not garble the terminal
    std::panic::set_hook(Box::new(|_| {}));

    // Load settings, then apply CLI overrides
    let mut settings = Settings::load(args.config.as_deref())?;
    if let Some(server) = args.server {
        settings.server_address = server;
    }
    if let Some(cluster) = args.cluster {
        settings.cluster_name = cluster;
    }

    init_logging(&settings.log_level)?;
    tracing::info!("Starting gitops-tui, server {}", settings.server_address);

    // Create channels for communication
    let (state_tx, state_rx) = mpsc::channel(1000);
    let (command_tx, command_rx) = mpsc::channel(100);
    let (ui_update_tx, _) = broadcast::channel(100);

    // Create shared application state
    let state = Arc::new(AppState::new(ui_update_tx, settings.max_events));

    // Start the API poller
    let client_handle = tokio::spawn(grpc::client::run_client(
        settings.server_address.clone(),
        settings.cluster_name.clone(),
        Duration::from_secs(settings.poll_interval.max(1)),
        state_tx.clone(),
        command_rx,
    ));

    // Start state manager
    let state_clone = state.clone();
    let state_manager_handle = tokio::spawn(async move {
        app::state::run_state_manager(state_clone, state_rx, command_tx).await;
    });

    // Run TUI (blocks until user quits)
    let theme = Theme::by_name(&settings.theme);
    let mut tui = TuiApp::new(state.clone(), state_tx, theme)?;
    let result = tui.run().await;

    // Cleanup
    client_handle.abort();
    state_manager_handle.abort();

    result
}
