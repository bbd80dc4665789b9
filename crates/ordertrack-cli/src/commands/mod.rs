//! CLI command definitions.

pub mod actor;
pub mod serve;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ordertrack", about = "Order fulfillment tracking server", version)]
pub struct Cli {
    /// Path to the SQLite database file
    #[arg(long, global = true, default_value = "ordertrack.db", env = "ORDERTRACK_DB")]
    pub db: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the API server
    Serve(serve::ServeArgs),
    /// Manage actors and sessions
    Actor(actor::ActorArgs),
}
