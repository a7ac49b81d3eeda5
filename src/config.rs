//! Store configuration.
//!
//! Both settings have defaults matching the web host the stored format comes
//! from, so `StoreConfig::default()` reads data written there.
//!
//! # Example
//!
//! ```rust
//! use todo_ledger::config::StoreConfig;
//!
//! let config: StoreConfig = serde_json::from_str(r#"{"page_size": 10}"#).unwrap();
//! assert_eq!(config.storage_key, "todo");
//! assert_eq!(config.page_size, 10);
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::pagination::PAGE_SIZE;

/// Key the collection is stored under by default.
pub const DEFAULT_STORAGE_KEY: &str = "todo";

/// Invalid configuration value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// `storage_key` is empty.
    #[error("storage_key must not be empty")]
    EmptyStorageKey,
    /// `page_size` is zero.
    #[error("page_size must be greater than 0")]
    ZeroPageSize,
}

/// Settings for a [`crate::store::TodoStore`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Key of the key-value entry holding the task collection.
    pub storage_key: String,
    /// Tasks per page.
    pub page_size: usize,
}

impl StoreConfig {
    /// Returns the config with another storage key.
    #[must_use]
    pub fn with_storage_key(self, storage_key: impl Into<String>) -> Self {
        Self {
            storage_key: storage_key.into(),
            ..self
        }
    }

    /// Returns the config with another page size.
    #[must_use]
    pub fn with_page_size(self, page_size: usize) -> Self {
        Self { page_size, ..self }
    }

    /// Checks that every value is usable.
    ///
    /// # Errors
    ///
    /// The first invalid value as a [`ConfigError`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.storage_key.is_empty() {
            return Err(ConfigError::EmptyStorageKey);
        }
        if self.page_size == 0 {
            return Err(ConfigError::ZeroPageSize);
        }
        Ok(())
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            page_size: PAGE_SIZE,
        }
    }
}
