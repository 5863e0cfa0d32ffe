//! CLI configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `POCKET_MARKET_DATA_DIR` - Directory holding the persisted cart
//!   (default: `.pocket-market`)

use std::path::PathBuf;

/// Configuration for the `pm-cart` binary.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Directory the file-backed cart storage lives in.
    pub data_dir: PathBuf,
}

impl CliConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from a `.env` file if present.
    #[must_use]
    pub fn from_env() -> Self {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self {
            data_dir: PathBuf::from(get_env_or_default(
                "POCKET_MARKET_DATA_DIR",
                ".pocket-market",
            )),
        }
    }
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
