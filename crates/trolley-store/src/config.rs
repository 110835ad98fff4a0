//! # Store Configuration
//!
//! Configuration for CartStore and its collaborators.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     TROLLEY_API_URL=https://api.example.com                            │
//! │     TROLLEY_DB_PATH=/var/lib/trolley/cart.db                           │
//! │     TROLLEY_SLOT_KEY=trolley:cart                                      │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     trolley.toml next to the app, or wherever the host points us       │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     localhost API, ./trolley.db, "trolley:cart"                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # trolley.toml
//! api_base_url = "http://localhost:3333"
//! request_timeout_secs = 10
//! database_path = "./trolley.db"
//! slot_key = "trolley:cart"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use trolley_core::CART_STORAGE_KEY;

// =============================================================================
// Store Config
// =============================================================================

/// CartStore configuration.
///
/// Most fields have sensible defaults for development against a local
/// catalog API. Production deployments should configure these properly.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Base URL of the catalog/stock JSON API.
    pub api_base_url: String,

    /// Per-request timeout for remote lookups, in seconds.
    ///
    /// The original storefront hung forever on a stalled lookup; the HTTP
    /// client enforces this bound instead.
    pub request_timeout_secs: u64,

    /// Path to the SQLite snapshot database.
    pub database_path: PathBuf,

    /// Namespaced snapshot slot key.
    pub slot_key: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            api_base_url: "http://localhost:3333".to_string(),
            request_timeout_secs: 10,
            database_path: PathBuf::from("./trolley.db"),
            slot_key: CART_STORAGE_KEY.to_string(),
        }
    }
}

impl StoreConfig {
    /// Loads configuration: defaults, then TOML file (if given), then
    /// environment overrides.
    pub fn load(config_file: Option<&Path>) -> StoreResult<Self> {
        let mut config = match config_file {
            Some(path) => Self::from_file(path)?,
            None => StoreConfig::default(),
        };
        config.apply_env();
        Ok(config)
    }

    /// Parses configuration from a TOML file.
    pub fn from_file(path: &Path) -> StoreResult<Self> {
        debug!(path = %path.display(), "Loading config file");

        let raw = std::fs::read_to_string(path).map_err(|e| {
            StoreError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;

        toml::from_str(&raw).map_err(|e| {
            StoreError::Config(format!("cannot parse {}: {}", path.display(), e))
        })
    }

    /// Applies `TROLLEY_*` environment variable overrides.
    pub fn apply_env(&mut self) {
        if let Ok(url) = std::env::var("TROLLEY_API_URL") {
            self.api_base_url = url;
        }
        if let Ok(path) = std::env::var("TROLLEY_DB_PATH") {
            self.database_path = PathBuf::from(path);
        }
        if let Ok(key) = std::env::var("TROLLEY_SLOT_KEY") {
            self.slot_key = key;
        }
    }

    /// Returns the lookup timeout as a Duration.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
