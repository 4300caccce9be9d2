//! Dual-List Server - Headless Daemon
//!
//! A pure Rust HTTP server that:
//! - Seeds the "all items" collection and keeps "selected" in memory
//! - Serves paginated, filtered reads on `GET /items`
//! - Accepts add/select/deselect/reorder intents and applies them in
//!   deduplicated batches (add queue every 10 s, update queue every 1 s)
//!
//! Access via: http://localhost:9000

#![cfg_attr(test, allow(clippy::panic, clippy::unwrap_used, clippy::expect_used))]

use anyhow::Result;
use clap::Parser;
use tokio::sync::watch;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod api;
mod cli;
mod config;
mod config_commands;
mod router;
mod scheduler;
mod server_utils;
mod state;
#[cfg(test)]
mod test_helpers;

use cli::{Cli, Commands, ConfigCommands};
use config::ConfigOverrides;
use duallist_core::ListStore;
use duallist_types::AppConfig;
use state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    let overrides = ConfigOverrides { port: cli.port, seed_count: cli.seed };
    let config = config::load_config(cli.config.as_deref(), overrides)?;

    match cli.command {
        None | Some(Commands::Serve) => run_server(config).await,
        Some(Commands::Config(ConfigCommands::Show { json })) => {
            config_commands::show_config(&config, json)
        },
        Some(Commands::Config(ConfigCommands::Get { key })) => {
            config_commands::get_config_value(&config, &key)
        },
    }
}

/// Logs go to stderr so `config` subcommands keep stdout clean.
fn init_tracing(level: &str) {
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

async fn run_server(config: AppConfig) -> Result<()> {
    info!("🚀 Dual-list server starting on port {}...", config.server.port);

    let store = ListStore::seeded(config.store.seed_count);
    info!("📊 Seeded {} items", config.store.seed_count);

    let state = AppState::new(store, config);
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let flush_loops = scheduler::start_flush_loops(&state, &shutdown_rx);

    let listener = server_utils::create_listener(&state.config().server)?;
    let addr = listener.local_addr()?;
    let app = router::build_router(state.clone());

    info!("🌐 Server listening on http://{}", addr);
    info!("📋 Items API at http://{}/items", addr);

    axum::serve(listener, app).with_graceful_shutdown(server_utils::shutdown_signal()).await?;

    if shutdown_tx.send(true).is_err() {
        tracing::warn!("Flush loops already stopped before shutdown");
    }
    scheduler::join_flush_loops(flush_loops).await;

    let stats = state.dispatcher().store_stats().await;
    info!("👋 Stopped with {} available / {} selected", stats.available, stats.selected);
    Ok(())
}
