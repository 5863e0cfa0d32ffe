//! Pocket Market Core - Shared types library.
//!
//! This crate provides common types used across all Pocket Market components:
//! - `cart` - In-memory shopping cart with persisted storage
//! - `cli` - Command-line tool for inspecting and mutating a local cart
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access, no async
//! runtime. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, plus the product and
//!   line-item records the cart operates on

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
