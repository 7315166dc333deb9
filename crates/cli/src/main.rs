//! MonNgon CLI - catalog seeding and role management.
//!
//! # Usage
//!
//! ```bash
//! # Seed categories and foods from a YAML file
//! monngon-cli seed catalog -f seed.yaml
//!
//! # Re-run against a live store without duplicating records
//! monngon-cli seed catalog -f seed.yaml --skip-existing
//!
//! # Promote an account to admin
//! monngon-cli admin grant -e admin@example.com
//!
//! # Demote an admin back to a regular user
//! monngon-cli admin revoke -e admin@example.com
//! ```
//!
//! # Commands
//!
//! - `seed catalog` - Create categories and foods in the document store
//! - `admin grant` / `admin revoke` - Manage the admin role by email

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "monngon-cli")]
#[command(author, version, about = "MonNgon CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Seed the document store
    Seed {
        #[command(subcommand)]
        target: SeedTarget,
    },
    /// Manage the admin role
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
}

#[derive(Subcommand)]
enum SeedTarget {
    /// Create categories and foods from a YAML file
    Catalog {
        /// Path to the seed file
        #[arg(short, long)]
        file: String,

        /// Reuse categories and skip foods that already exist (matched by name)
        #[arg(long)]
        skip_existing: bool,
    },
}

#[derive(Subcommand)]
enum AdminAction {
    /// Grant the admin role to an account
    Grant {
        /// Account email address
        #[arg(short, long)]
        email: String,
    },
    /// Demote an admin back to a regular user
    Revoke {
        /// Account email address
        #[arg(short, long)]
        email: String,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Seed { target } => match target {
            SeedTarget::Catalog {
                file,
                skip_existing,
            } => commands::seed::catalog(&file, skip_existing).await?,
        },
        Commands::Admin { action } => match action {
            AdminAction::Grant { email } => commands::admin::grant(&email).await?,
            AdminAction::Revoke { email } => commands::admin::revoke(&email).await?,
        },
    }
    Ok(())
}
