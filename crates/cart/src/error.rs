//! Unified error type for cart operations.
//!
//! Mutations never fail: in-memory state is authoritative and write-backs
//! happen in the background. Errors surface only when opening a store
//! (storage unreachable) or when explicitly flushing.

use thiserror::Error;

use crate::storage::StorageError;

/// Errors surfaced by [`crate::CartStore`].
#[derive(Debug, Error)]
pub enum CartError {
    /// The storage backend failed while hydrating the cart.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// The most recent write-back attempt covering the flushed version failed.
    #[error("cart write-back failed: {0}")]
    WriteBack(String),

    /// The persistence worker has stopped; pending snapshots will not reach
    /// storage.
    #[error("persistence worker stopped")]
    WriterGone,
}
