//! Integration tests for Pocket Market.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p pocket-market-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_flow` - Cart mutation semantics end to end
//! - `persistence` - Snapshot hydration and write-back across backends
//!
//! Everything runs against the in-crate reference backends; no external
//! services are required.

#![cfg_attr(not(test), forbid(unsafe_code))]

use pocket_market_core::{Product, ProductId};
use rust_decimal::Decimal;

/// Build a product descriptor with a fixed price, the way the storefront
/// API would hand one to the cart.
#[must_use]
pub fn sample_product(id: &str, title: &str) -> Product {
    Product {
        id: ProductId::new(id),
        title: title.to_owned(),
        image_url: format!("https://cdn.example.com/{id}.png"),
        price: Decimal::new(1000, 2),
    }
}
