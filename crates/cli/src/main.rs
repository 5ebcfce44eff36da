//! Mango Stand CLI - Catalog seeding and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Seed the hosted backend with the demo catalog
//! ms-cli seed products
//!
//! # Wipe existing rows first, then seed
//! ms-cli seed products --replace
//!
//! # List catalog rows
//! ms-cli products list
//!
//! # Delete a catalog row
//! ms-cli products delete 4
//! ```
//!
//! # Commands
//!
//! - `seed products` - Insert the demo catalog into the hosted backend
//! - `products list` - Print current catalog rows
//! - `products delete` - Remove a catalog row by id

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "ms-cli")]
#[command(author, version, about = "Mango Stand CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Seed the hosted backend with demo data
    Seed {
        #[command(subcommand)]
        target: SeedTarget,
    },
    /// Manage catalog rows
    Products {
        #[command(subcommand)]
        action: ProductAction,
    },
}

#[derive(Subcommand)]
enum SeedTarget {
    /// Insert the demo catalog
    Products {
        /// Delete existing rows before inserting
        #[arg(long)]
        replace: bool,
    },
}

#[derive(Subcommand)]
enum ProductAction {
    /// List all catalog rows
    List,
    /// Delete a catalog row by id
    Delete {
        /// Row id
        id: i64,
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
            SeedTarget::Products { replace } => commands::seed::products(replace).await?,
        },
        Commands::Products { action } => match action {
            ProductAction::List => commands::products::list().await?,
            ProductAction::Delete { id } => commands::products::delete(id).await?,
        },
    }
    Ok(())
}
