use async_trait::async_trait;
use tokio::sync::RwLock;

use authgate_core::error::Result;
use authgate_core::Rule;

use super::PolicyStore;

/// Process-local store. Useful for tests and for deployments that seed on
/// every start.
#[derive(Debug, Default)]
pub struct MemoryStore {
    rules: RwLock<Vec<Rule>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rules(rules: Vec<Rule>) -> Self {
        Self {
            rules: RwLock::new(rules),
        }
    }

    /// Overwrite the stored rules directly, as an external policy editor would.
    pub async fn replace(&self, rules: Vec<Rule>) {
        *self.rules.write().await = rules;
    }
}

#[async_trait]
impl PolicyStore for MemoryStore {
    fn driver(&self) -> &'static str {
        "memory"
    }

    async fn load(&self) -> Result<Vec<Rule>> {
        Ok(self.rules.read().await.clone())
    }

    async fn save(&self, rules: &[Rule]) -> Result<()> {
        *self.rules.write().await = rules.to_vec();
        Ok(())
    }
}
