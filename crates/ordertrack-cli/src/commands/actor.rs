//! Actor administration commands.
//!
//! The admin side of the identity seam: register actors and open
//! sessions. The printed token is what API and websocket clients
//! authenticate with.

use anyhow::Result;
use clap::{Args, Subcommand};
use colored::Colorize;
use ordertrack_core::actor::Role;
use ordertrack_core::identity;
use ordertrack_db::{migrations, DbPool};
use std::path::Path;

#[derive(Args)]
pub struct ActorArgs {
    #[command(subcommand)]
    pub command: ActorCommands,
}

#[derive(Subcommand)]
pub enum ActorCommands {
    /// Register a new actor
    Add {
        /// Display name
        name: String,
        /// Email address (unique)
        email: String,
        /// Grant the team role (customers are the default)
        #[arg(long)]
        team: bool,
    },
    /// Open a session for an actor and print the bearer token
    Login {
        /// Actor id
        id: String,
    },
}

pub fn execute(args: ActorArgs, db_path: &Path) -> Result<()> {
    let pool = DbPool::open(db_path)?;
    migrations::run_migrations(&pool)?;

    match args.command {
        ActorCommands::Add { name, email, team } => {
            let role = if team { Role::TeamMember } else { Role::Customer };
            let actor = identity::register_actor(&pool, &name, &email, role)?;
            println!(
                "{} {} <{}> as {} ({})",
                "Registered".green(),
                actor.name,
                actor.email,
                actor.role.as_str(),
                actor.id
            );
        }
        ActorCommands::Login { id } => {
            let token = identity::open_session(&pool, &id)?;
            println!("{} {}", "Token".green(), token);
        }
    }

    Ok(())
}
