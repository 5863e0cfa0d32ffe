//! File-backed storage backend.
//!
//! Each key maps to one JSON file under a data directory. Writes go through
//! a temp file followed by a rename, so an interrupted write leaves the
//! previous snapshot intact rather than a truncated file.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;

use super::{CartStorage, StorageError};

/// Storage backend persisting each slot to a file under `root`.
#[derive(Debug, Clone)]
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    /// Create a file storage rooted at `root`.
    ///
    /// The directory is created lazily on the first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory this storage writes into.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map a slot key to a file path.
    ///
    /// Keys may contain characters that are not filename-safe (the cart key
    /// is namespaced with `:`), so everything outside `[A-Za-z0-9._-]` is
    /// replaced.
    fn slot_path(&self, key: &str) -> PathBuf {
        let name: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                    c
                } else {
                    '-'
                }
            })
            .collect();
        self.root.join(format!("{name}.json"))
    }
}

#[async_trait]
impl CartStorage for FileStorage {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.slot_path(key)).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::Io(e)),
        }
    }

    async fn set(&self, key: &str, value: String) -> Result<(), StorageError> {
        fs::create_dir_all(&self.root).await?;

        let path = self.slot_path(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value).await?;
        fs::rename(&tmp, &path).await?;

        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_path_sanitizes_key() {
        let storage = FileStorage::new("/data");
        let path = storage.slot_path("pocket-market:cart");
        assert_eq!(path, PathBuf::from("/data/pocket-market-cart.json"));
    }

    #[tokio::test]
    async fn test_missing_slot_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());

        assert!(storage.get("cart").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_set_then_get_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());

        storage.set("cart", "[1,2,3]".to_owned()).await.unwrap();
        assert_eq!(storage.get("cart").await.unwrap().as_deref(), Some("[1,2,3]"));

        storage.set("cart", "[]".to_owned()).await.unwrap();
        assert_eq!(storage.get("cart").await.unwrap().as_deref(), Some("[]"));
    }

    #[tokio::test]
    async fn test_write_leaves_no_temp_file_behind() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());

        storage.set("cart", "[]".to_owned()).await.unwrap();

        let mut entries = fs::read_dir(dir.path()).await.unwrap();
        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await.unwrap() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
        assert_eq!(names, vec!["cart.json".to_owned()]);
    }
}
