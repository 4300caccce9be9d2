use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "duallist",
    about = "Dual-list server - paginated lists with deferred, deduplicated mutations",
    version = env!("CARGO_PKG_VERSION"),
    author,
    propagate_version = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[arg(short, long, global = true, env = "DUALLIST_PORT", help = "Override server.port")]
    pub port: Option<u16>,

    #[arg(long, global = true, help = "Override store.seed_count")]
    pub seed: Option<usize>,

    #[arg(
        short,
        long,
        global = true,
        env = "DUALLIST_CONFIG",
        help = "Path to a JSON config file"
    )]
    pub config: Option<PathBuf>,

    #[arg(short, long, global = true, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Start the HTTP server (default if no command specified)")]
    Serve,

    #[command(subcommand, about = "Inspect the effective configuration")]
    Config(ConfigCommands),
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    #[command(about = "Show current configuration")]
    Show {
        #[arg(short, long, help = "Output as JSON")]
        json: bool,
    },

    #[command(about = "Get a specific configuration value")]
    Get {
        #[arg(help = "Configuration key (e.g., 'server.port', 'queue.update_flush_ms')")]
        key: String,
    },
}
