//! Kirana CLI - terminal storefront for the shop.
//!
//! # Usage
//!
//! ```bash
//! # Browse the catalog (seeds it on first run)
//! kirana browse
//! kirana browse --category dairy --search milk
//!
//! # Cart
//! kirana cart show
//! kirana cart add 2
//! kirana cart remove 2
//! kirana cart clear
//!
//! # Place the order
//! kirana checkout
//!
//! # Store details
//! kirana info
//! ```
//!
//! Configuration comes from the environment (see `kirana-storefront`'s
//! config module); `KIRANA_STORE_API_URL` must point at the store backend.

#![cfg_attr(not(test), forbid(unsafe_code))]
// stdout is this binary's UI
#![allow(clippy::print_stdout)]

use clap::{Parser, Subcommand};

use kirana_core::{CategoryFilter, ProductId};
use kirana_storefront::api::HttpStoreApi;
use kirana_storefront::config::StorefrontConfig;
use kirana_storefront::session::StorefrontSession;

mod commands;

use commands::Session;

#[derive(Parser)]
#[command(name = "kirana")]
#[command(author, version, about = "Kirana store terminal storefront")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the product catalog
    Browse {
        /// Category to show (`all` or one of the category names)
        #[arg(short, long, default_value = "all")]
        category: CategoryFilter,

        /// Free-text search over name and description
        #[arg(short, long, default_value = "")]
        search: String,
    },
    /// Manage the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Place the order and empty the cart
    Checkout,
    /// Show store name, address, phone and hours
    Info,
}

#[derive(Subcommand)]
enum CartAction {
    /// Show the cart with totals
    Show,
    /// Add one unit of a product
    Add {
        /// Product ID (shown by `browse`)
        product_id: u64,
    },
    /// Remove a product's line entirely
    Remove {
        /// Product ID of the line to drop
        product_id: u64,
    },
    /// Empty the cart
    Clear,
}

#[tokio::main]
async fn main() {
    // Initialize tracing; default to info level for our crates
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "kirana=info".into());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = StorefrontConfig::from_env()?;
    let api = HttpStoreApi::new(&config)?;
    let session: Session = StorefrontSession::new(api, &config.cache);

    match cli.command {
        Commands::Browse { category, search } => {
            commands::browse::run(&session, category, &search).await?;
        }
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(&session).await?,
            CartAction::Add { product_id } => {
                commands::cart::add(&session, ProductId::new(product_id)).await?;
            }
            CartAction::Remove { product_id } => {
                commands::cart::remove(&session, ProductId::new(product_id)).await?;
            }
            CartAction::Clear => commands::cart::clear(&session).await?,
        },
        Commands::Checkout => commands::cart::checkout(&session).await?,
        Commands::Info => commands::store::info(&session).await?,
    }
    Ok(())
}
