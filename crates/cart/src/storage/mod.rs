//! Key-value storage contract for cart persistence.
//!
//! The cart persists to a single string-keyed slot. Production apps plug in
//! whatever local storage the platform provides; this crate ships two
//! reference backends: [`MemoryStorage`] for tests and ephemeral use, and
//! [`FileStorage`] for a local data directory.

mod file;
mod memory;

use async_trait::async_trait;
use thiserror::Error;

pub use file::FileStorage;
pub use memory::MemoryStorage;

/// Error type for storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem-level failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Backend-specific failure.
    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Asynchronous key-value storage for serialized cart snapshots.
///
/// Implementations must tolerate `set` overwriting an existing value; the
/// cart always writes full snapshots, never deltas. A missing key reads as
/// `Ok(None)`, not an error.
#[async_trait]
pub trait CartStorage: Send + Sync {
    /// Read the value stored under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read; a missing key is
    /// `Ok(None)`.
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Overwrite the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the value could not be written durably.
    async fn set(&self, key: &str, value: String) -> Result<(), StorageError>;
}
