//! Cart manipulation commands.
//!
//! Every command hydrates the cart from the file-backed storage in the data
//! directory, applies its change, then flushes before returning so the
//! snapshot is on disk when the process exits.
//!
//! # Usage
//!
//! ```bash
//! pm-cart add --id p1 --title "Shirt" --image-url https://cdn.example.com/shirt.png --price 10.50
//! pm-cart increment p1
//! pm-cart decrement p1
//! pm-cart show
//! ```

use std::str::FromStr;
use std::sync::Arc;

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::debug;

use pocket_market_cart::{CartError, CartStore, FileStorage};
use pocket_market_core::{Product, ProductId};

use crate::config::CliConfig;

/// Errors that can occur while running cart commands.
#[derive(Debug, Error)]
pub enum CartCommandError {
    /// The `--price` argument is not a decimal number.
    #[error("invalid price '{value}': {source}")]
    InvalidPrice {
        /// The rejected input.
        value: String,
        /// Parser diagnostic.
        source: rust_decimal::Error,
    },

    /// The cart store failed to open or flush.
    #[error(transparent)]
    Cart(#[from] CartError),
}

/// Arguments for the `add` command.
pub struct AddArgs {
    /// Product identifier.
    pub id: String,
    /// Display name.
    pub title: String,
    /// Product image reference.
    pub image_url: String,
    /// Unit price, e.g. `10.50`.
    pub price: String,
}

/// Print the current cart without mutating it.
///
/// # Errors
///
/// Returns an error if the cart storage cannot be read.
pub async fn show(config: &CliConfig) -> Result<(), CartCommandError> {
    let cart = open_store(config).await?;
    print_cart(&cart);
    Ok(())
}

/// Add one unit of a product to the cart.
///
/// # Errors
///
/// Returns an error if the price does not parse or if the cart storage
/// cannot be read or flushed.
pub async fn add(config: &CliConfig, args: AddArgs) -> Result<(), CartCommandError> {
    let price = Decimal::from_str(&args.price).map_err(|source| {
        CartCommandError::InvalidPrice {
            value: args.price.clone(),
            source,
        }
    })?;

    let cart = open_store(config).await?;
    cart.add_to_cart(Product {
        id: ProductId::new(args.id),
        title: args.title,
        image_url: args.image_url,
        price,
    });
    cart.flush().await?;
    print_cart(&cart);
    Ok(())
}

/// Increase the quantity of a cart line by one.
///
/// # Errors
///
/// Returns an error if the cart storage cannot be read or flushed.
pub async fn increment(config: &CliConfig, id: &str) -> Result<(), CartCommandError> {
    let cart = open_store(config).await?;
    cart.increment(&ProductId::new(id));
    cart.flush().await?;
    print_cart(&cart);
    Ok(())
}

/// Decrease the quantity of a cart line by one, removing it at zero.
///
/// # Errors
///
/// Returns an error if the cart storage cannot be read or flushed.
pub async fn decrement(config: &CliConfig, id: &str) -> Result<(), CartCommandError> {
    let cart = open_store(config).await?;
    cart.decrement(&ProductId::new(id));
    cart.flush().await?;
    print_cart(&cart);
    Ok(())
}

/// Hydrate a cart store from the configured data directory.
async fn open_store(config: &CliConfig) -> Result<CartStore, CartError> {
    debug!(data_dir = %config.data_dir.display(), "opening cart storage");
    let storage = Arc::new(FileStorage::new(config.data_dir.clone()));
    CartStore::open(storage).await
}

/// Render the cart as a table.
#[allow(clippy::print_stdout)]
fn print_cart(cart: &CartStore) {
    let items = cart.items();
    if items.is_empty() {
        println!("cart is empty");
        return;
    }

    println!("{:<24} {:<28} {:>10} {:>5}", "ID", "TITLE", "PRICE", "QTY");
    for item in &items {
        println!(
            "{:<24} {:<28} {:>10} {:>5}",
            item.id, item.title, item.price, item.quantity
        );
    }
    println!("{} item(s) total", cart.item_count());
}
