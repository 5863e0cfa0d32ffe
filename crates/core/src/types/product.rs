//! Product and cart line-item records.
//!
//! These types define the cart's persisted snapshot format: a JSON array of
//! line items with `price` serialized as a JSON number, matching what the
//! mobile clients already have on disk.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::id::ProductId;

/// A catalog product as the storefront API presents it to the cart.
///
/// This is the descriptor accepted by `add_to_cart`: everything a line item
/// needs except the quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Opaque backend-assigned identifier.
    pub id: ProductId,
    /// Display name.
    pub title: String,
    /// Product image reference.
    pub image_url: String,
    /// Unit price in the store currency.
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
}

/// A single cart line: a product plus how many units of it are in the cart.
///
/// Invariant: `quantity >= 1`. A line whose quantity would drop to zero is
/// removed from the cart rather than retained.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Opaque backend-assigned identifier, unique within a cart.
    pub id: ProductId,
    /// Display name.
    pub title: String,
    /// Product image reference.
    pub image_url: String,
    /// Unit price in the store currency.
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    /// Units of this product in the cart.
    pub quantity: u32,
}

impl From<Product> for LineItem {
    /// A product entering the cart starts as a single unit.
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            title: product.title,
            image_url: product.image_url,
            price: product.price,
            quantity: 1,
        }
    }
}
