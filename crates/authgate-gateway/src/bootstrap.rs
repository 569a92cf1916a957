//! Startup: store -> engine -> default seed -> reload loop.
//!
//! Every error returned from [`bootstrap`] is fatal; the caller must not start
//! serving with an unknown or empty rule set.

use std::sync::Arc;
use std::time::Duration;

use authgate_core::error::{AuthgateError, Result};
use authgate_core::seed::default_rules;

use crate::config::{GatewayConfig, SeedSection};
use crate::obs::GateMetrics;
use crate::policy::{PolicyEngine, ReloadHandle, DEFAULT_MODEL};
use crate::store;

/// A ready engine plus the reload loop, if enabled.
pub struct Bootstrapped {
    pub engine: Arc<PolicyEngine>,
    pub reload: Option<ReloadHandle>,
}

impl Bootstrapped {
    pub async fn shutdown(self) {
        if let Some(reload) = self.reload {
            if reload.is_finished() {
                tracing::warn!("policy reload loop had already exited");
            }
            reload.stop().await;
        }
    }
}

pub async fn bootstrap(cfg: &GatewayConfig, metrics: Arc<GateMetrics>) -> Result<Bootstrapped> {
    let store = store::open_store(&cfg.store.driver, &cfg.store.source)?;
    let model = load_model(cfg.model.as_deref()).await?;

    // 1) initial load; a store not created yet starts empty
    let engine = Arc::new(PolicyEngine::load_with_model(store, model, metrics).await?);

    // 2) seed + persist when empty
    let seeded = seed_if_empty(&engine, &cfg.seed).await?;
    if seeded > 0 {
        tracing::info!(subject = %cfg.seed.subject, rules = seeded, "default policy seeded");
    }

    // 3) keep rules current
    let reload = if cfg.reload.enabled {
        Some(engine.start_auto_reload(Duration::from_millis(cfg.reload.interval_ms)))
    } else {
        tracing::info!("policy auto-reload disabled");
        None
    };

    Ok(Bootstrapped { engine, reload })
}

/// Seed the default rules and save them if the engine holds none.
/// Returns the number of rules written (0 when the store was already populated).
pub async fn seed_if_empty(engine: &PolicyEngine, seed: &SeedSection) -> Result<usize> {
    if engine.rule_count() > 0 {
        return Ok(0);
    }

    let added = engine
        .add_policies(default_rules(&seed.subject, &seed.orgs))
        .await?;
    engine.save_policy().await?;
    Ok(added)
}

async fn load_model(path: Option<&str>) -> Result<String> {
    match path {
        None => Ok(DEFAULT_MODEL.to_string()),
        Some(p) => tokio::fs::read_to_string(p)
            .await
            .map_err(|e| AuthgateError::Config(format!("read model {p} failed: {e}"))),
    }
}
