//! Shared fixtures for gateway integration tests.

#![allow(dead_code)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;

use authgate_core::error::{AuthgateError, Result};
use authgate_core::Rule;
use authgate_gateway::obs::GateMetrics;
use authgate_gateway::policy::PolicyEngine;
use authgate_gateway::store::{MemoryStore, PolicyStore};

/// Memory store that can be switched to fail every load/save, standing in
/// for an unreachable database.
#[derive(Default)]
pub struct FlakyStore {
    pub inner: MemoryStore,
    pub down: AtomicBool,
    pub loads: AtomicUsize,
}

impl FlakyStore {
    pub fn with_rules(rules: Vec<Rule>) -> Self {
        Self {
            inner: MemoryStore::with_rules(rules),
            ..Default::default()
        }
    }

    pub fn set_down(&self, down: bool) {
        self.down.store(down, Ordering::SeqCst);
    }
}

#[async_trait]
impl PolicyStore for FlakyStore {
    fn driver(&self) -> &'static str {
        "flaky"
    }

    async fn load(&self) -> Result<Vec<Rule>> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        if self.down.load(Ordering::SeqCst) {
            return Err(AuthgateError::Store("store unreachable".into()));
        }
        self.inner.load().await
    }

    async fn save(&self, rules: &[Rule]) -> Result<()> {
        if self.down.load(Ordering::SeqCst) {
            return Err(AuthgateError::Store("store unreachable".into()));
        }
        self.inner.save(rules).await
    }
}

pub async fn engine_with(rules: Vec<Rule>) -> Arc<PolicyEngine> {
    let store: Arc<dyn PolicyStore> = Arc::new(MemoryStore::with_rules(rules));
    Arc::new(
        PolicyEngine::load(store, Arc::new(GateMetrics::default()))
            .await
            .expect("engine must load"),
    )
}

pub async fn engine_over(store: Arc<dyn PolicyStore>) -> Arc<PolicyEngine> {
    Arc::new(
        PolicyEngine::load(store, Arc::new(GateMetrics::default()))
            .await
            .expect("engine must load"),
    )
}
