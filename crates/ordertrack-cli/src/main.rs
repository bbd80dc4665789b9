//! Ordertrack CLI
//!
//! Operator entry point: run the API server and administer actors.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

use commands::{Cli, Commands};

/// Initialize tracing from RUST_LOG, defaulting to info for our crates.
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "ordertrack=info,ordertrack_core=info,ordertrack_web=debug".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    match cli.command {
        Commands::Serve(args) => commands::serve::execute(args, &cli.db).await,
        Commands::Actor(args) => commands::actor::execute(args, &cli.db),
    }
}
