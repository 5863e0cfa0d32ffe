//! Pocket Market CLI - local cart inspection and management.
//!
//! # Usage
//!
//! ```bash
//! # Show the current cart
//! pm-cart show
//!
//! # Add one unit of a product
//! pm-cart add --id p1 --title "Shirt" --image-url https://cdn.example.com/shirt.png --price 10.50
//!
//! # Change quantities (decrementing to zero removes the line)
//! pm-cart increment p1
//! pm-cart decrement p1
//! ```
//!
//! # Commands
//!
//! - `show` - Print the persisted cart
//! - `add` - Add one unit of a product to the cart
//! - `increment` - Increase a line's quantity by one
//! - `decrement` - Decrease a line's quantity by one
//!
//! The cart is stored under `POCKET_MARKET_DATA_DIR` (default
//! `.pocket-market`), in the same snapshot format the mobile app persists.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;
mod config;

use commands::cart::AddArgs;
use config::CliConfig;

#[derive(Parser)]
#[command(name = "pm-cart")]
#[command(author, version, about = "Pocket Market cart tool")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the persisted cart
    Show,
    /// Add one unit of a product to the cart
    Add {
        /// Product identifier
        #[arg(long)]
        id: String,

        /// Display name
        #[arg(long)]
        title: String,

        /// Product image URL
        #[arg(long)]
        image_url: String,

        /// Unit price, e.g. 10.50
        #[arg(long)]
        price: String,
    },
    /// Increase a line's quantity by one
    Increment {
        /// Product identifier
        id: String,
    },
    /// Decrease a line's quantity by one (removes the line at zero)
    Decrement {
        /// Product identifier
        id: String,
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
    let config = CliConfig::from_env();

    match cli.command {
        Commands::Show => commands::cart::show(&config).await?,
        Commands::Add {
            id,
            title,
            image_url,
            price,
        } => {
            commands::cart::add(
                &config,
                AddArgs {
                    id,
                    title,
                    image_url,
                    price,
                },
            )
            .await?;
        }
        Commands::Increment { id } => commands::cart::increment(&config, &id).await?,
        Commands::Decrement { id } => commands::cart::decrement(&config, &id).await?,
    }
    Ok(())
}
