//! Backing stores for policy rules.
//!
//! A store is addressed by a driver name and a data-source locator, the same
//! pair a database adapter would take. The engine only ever sees the
//! [`PolicyStore`] trait; matching never happens here.

pub mod memory;
pub mod yaml_file;

use std::sync::Arc;

use async_trait::async_trait;

use authgate_core::error::{AuthgateError, Result};
use authgate_core::Rule;

pub use memory::MemoryStore;
pub use yaml_file::YamlFileStore;

/// Load/save contract between the policy engine and persistent storage.
#[async_trait]
pub trait PolicyStore: Send + Sync {
    fn driver(&self) -> &'static str;
    /// Whether the backing storage has been created. Only consulted for the
    /// initial load; a store that disappears later fails [`PolicyStore::load`].
    async fn exists(&self) -> Result<bool> {
        Ok(true)
    }
    /// Full rule set as currently persisted. A store holding zero rules is
    /// `Ok(vec![])`; missing or unreadable storage is an error.
    async fn load(&self) -> Result<Vec<Rule>>;
    /// Replace the persisted rule set.
    async fn save(&self, rules: &[Rule]) -> Result<()>;
}

/// Build a store from `(driver, source)`.
///
/// - `memory`: process-local, `source` ignored
/// - `yaml` / `file`: YAML rule file at path `source`
pub fn open_store(driver: &str, source: &str) -> Result<Arc<dyn PolicyStore>> {
    match driver {
        "memory" => Ok(Arc::new(MemoryStore::new())),
        "yaml" | "file" => {
            if source.trim().is_empty() {
                return Err(AuthgateError::Config(format!(
                    "store driver {driver} needs a file path as source"
                )));
            }
            Ok(Arc::new(YamlFileStore::new(source)))
        }
        other => Err(AuthgateError::UnsupportedDriver(other.to_string())),
    }
}
