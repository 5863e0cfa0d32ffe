//! Pocket Market Cart - in-memory shopping cart with persisted storage.
//!
//! The cart lives in memory and is the authoritative copy; every mutation
//! publishes a versioned snapshot to a background worker that writes the
//! whole cart to a single key-value storage slot. Storage is eventually
//! consistent with memory, and the newest snapshot always wins.
//!
//! # Modules
//!
//! - [`storage`] - The key-value storage contract plus in-memory and
//!   file-backed reference backends
//! - [`store`] - [`CartStore`], the cart itself
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use pocket_market_cart::{CartStore, MemoryStorage};
//! use pocket_market_core::{Product, ProductId};
//! use rust_decimal::Decimal;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), pocket_market_cart::CartError> {
//! let storage = Arc::new(MemoryStorage::new());
//! let cart = CartStore::open(storage).await?;
//!
//! cart.add_to_cart(Product {
//!     id: ProductId::new("p1"),
//!     title: "Shirt".to_owned(),
//!     image_url: "https://cdn.example.com/shirt.png".to_owned(),
//!     price: Decimal::from(10),
//! });
//! cart.increment(&ProductId::new("p1"));
//!
//! assert_eq!(cart.item_count(), 2);
//! cart.flush().await?;
//! # Ok(())
//! # }
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod error;
pub mod storage;
pub mod store;

pub use error::CartError;
pub use storage::{CartStorage, FileStorage, MemoryStorage, StorageError};
pub use store::{CART_STORAGE_KEY, CartStore};
