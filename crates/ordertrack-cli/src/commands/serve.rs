//! Web server command.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use ordertrack_db::{migrations, DbPool};
use std::path::Path;
use std::sync::Arc;

#[derive(Args)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(long, default_value = "3030")]
    pub port: u16,

    /// Host to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,
}

pub async fn execute(args: ServeArgs, db_path: &Path) -> Result<()> {
    let pool = Arc::new(DbPool::open(db_path)?);
    migrations::run_migrations(&pool)?;

    println!();
    println!("  {} {}", "Ordertrack".cyan().bold(), "API Server".bold());
    println!();
    println!("  {}        http://{}:{}/api", "API".green(), args.host, args.port);
    println!("  {}  ws://{}:{}/ws", "WebSocket".green(), args.host, args.port);
    println!();
    println!("  {}", "Ctrl+C to stop".dimmed());
    println!();

    ordertrack_web::run_server(pool, &args.host, args.port).await?;

    Ok(())
}
