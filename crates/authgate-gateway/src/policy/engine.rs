use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

use casbin::{CoreApi, DefaultModel, Enforcer, MemoryAdapter, MgmtApi};
use tokio::sync::Mutex;

use authgate_core::error::{AuthgateError, Result};
use authgate_core::{EnforcementQuery, Rule};

use super::model::DEFAULT_MODEL;
use super::reload::{self, ReloadHandle};
use crate::obs::GateMetrics;
use crate::store::PolicyStore;

/// One immutable, fully compiled rule set.
struct Snapshot {
    enforcer: Enforcer,
    rules: Vec<Rule>,
}

/// Process-wide policy engine.
/// Construct once at startup, then share via Arc.
///
/// Every mutation (load, add, remove, reload) compiles a complete new
/// [`Snapshot`] off-lock and swaps the pointer, so `enforce` observes either
/// the previous or the next rule set and never a partial one. A failed
/// mutation leaves the current snapshot in place.
pub struct PolicyEngine {
    store: Arc<dyn PolicyStore>,
    model: String,
    current: RwLock<Arc<Snapshot>>,
    writer: Mutex<()>,
    metrics: Arc<GateMetrics>,
}

impl PolicyEngine {
    /// Build with the built-in model and load the initial rule set from `store`.
    pub async fn load(store: Arc<dyn PolicyStore>, metrics: Arc<GateMetrics>) -> Result<Self> {
        Self::load_with_model(store, DEFAULT_MODEL, metrics).await
    }

    /// Like [`PolicyEngine::load`] with a caller-supplied casbin model.
    ///
    /// A store that does not exist yet starts the engine empty; once it
    /// exists, every later read goes through [`PolicyEngine::load_policy`]
    /// and a vanished store is an error there.
    pub async fn load_with_model(
        store: Arc<dyn PolicyStore>,
        model: impl Into<String>,
        metrics: Arc<GateMetrics>,
    ) -> Result<Self> {
        let model = model.into();
        let rules = if store.exists().await? {
            store.load().await?
        } else {
            tracing::info!(driver = store.driver(), "policy store not created yet, starting empty");
            Vec::new()
        };
        let snapshot = compile(&model, rules).await?;

        metrics.rules_loaded.set(&[], snapshot.rules.len() as i64);
        tracing::info!(driver = store.driver(), rules = snapshot.rules.len(), "policy loaded");

        Ok(Self {
            store,
            model,
            current: RwLock::new(Arc::new(snapshot)),
            writer: Mutex::new(()),
            metrics,
        })
    }

    pub fn metrics(&self) -> &Arc<GateMetrics> {
        &self.metrics
    }

    pub fn store(&self) -> &Arc<dyn PolicyStore> {
        &self.store
    }

    fn snapshot(&self) -> Option<Arc<Snapshot>> {
        // Poisoned lock means a writer panicked mid-swap; callers deny.
        self.current.read().ok().map(|g| Arc::clone(&g))
    }

    fn swap(&self, next: Snapshot) -> Result<()> {
        let count = next.rules.len();
        let mut guard = self
            .current
            .write()
            .map_err(|_| AuthgateError::Internal("policy snapshot lock poisoned".into()))?;
        *guard = Arc::new(next);
        drop(guard);
        self.metrics.rules_loaded.set(&[], count as i64);
        Ok(())
    }

    /// Answer one enforcement query. Never errors: engine faults deny.
    pub fn enforce(&self, query: EnforcementQuery) -> bool {
        let started = Instant::now();
        let Some(snapshot) = self.snapshot() else {
            self.metrics.engine_faults.inc(&[]);
            tracing::warn!(fault = true, subject = %query.subject, "policy snapshot unavailable, denying");
            return false;
        };

        let verdict = snapshot.enforcer.enforce((
            query.subject.as_str(),
            query.resource.as_str(),
            query.action.as_str(),
        ));
        self.metrics.enforce_duration.observe(&[], started.elapsed());

        match verdict {
            Ok(allowed) => allowed,
            Err(e) => {
                self.metrics.engine_faults.inc(&[]);
                tracing::warn!(
                    fault = true,
                    subject = %query.subject,
                    resource = %query.resource,
                    action = %query.action,
                    error = %e,
                    "enforce failed, denying"
                );
                false
            }
        }
    }

    /// Re-read the rule set from the store and swap it in.
    pub async fn load_policy(&self) -> Result<()> {
        let _w = self.writer.lock().await;
        let rules = self.store.load().await?;
        let next = compile(&self.model, rules).await?;
        self.swap(next)
    }

    /// Persist the current rule set to the store.
    pub async fn save_policy(&self) -> Result<()> {
        let _w = self.writer.lock().await;
        let rules = self.rules();
        self.store.save(&rules).await?;
        tracing::info!(driver = self.store.driver(), rules = rules.len(), "policy saved");
        Ok(())
    }

    /// Add one rule in memory. Returns `false` if it was already present.
    pub async fn add_policy(&self, rule: Rule) -> Result<bool> {
        Ok(self.add_policies(vec![rule]).await? == 1)
    }

    /// Add rules in memory as one swap. Returns how many were new.
    pub async fn add_policies(&self, rules: Vec<Rule>) -> Result<usize> {
        let _w = self.writer.lock().await;
        let mut next_rules = self.rules();
        let before = next_rules.len();
        for rule in rules {
            if !next_rules.contains(&rule) {
                next_rules.push(rule);
            }
        }
        let added = next_rules.len() - before;
        if added == 0 {
            return Ok(0);
        }

        let next = compile(&self.model, next_rules).await?;
        self.swap(next)?;
        Ok(added)
    }

    /// Remove one rule in memory. Returns `false` if it was not present.
    pub async fn remove_policy(&self, rule: &Rule) -> Result<bool> {
        let _w = self.writer.lock().await;
        let mut next_rules = self.rules();
        let before = next_rules.len();
        next_rules.retain(|r| r != rule);
        if next_rules.len() == before {
            return Ok(false);
        }

        let next = compile(&self.model, next_rules).await?;
        self.swap(next)?;
        Ok(true)
    }

    /// Rules of the current snapshot, in insertion order.
    pub fn rules(&self) -> Vec<Rule> {
        self.snapshot().map(|s| s.rules.clone()).unwrap_or_default()
    }

    pub fn rule_count(&self) -> usize {
        self.snapshot().map(|s| s.rules.len()).unwrap_or(0)
    }

    /// Periodically re-read rules from the store until the handle is stopped or dropped.
    pub fn start_auto_reload(self: &Arc<Self>, every: Duration) -> ReloadHandle {
        reload::spawn(Arc::clone(self), every)
    }
}

async fn compile(model: &str, rules: Vec<Rule>) -> Result<Snapshot> {
    let mut unique: Vec<Rule> = Vec::with_capacity(rules.len());
    for rule in rules {
        if !unique.contains(&rule) {
            unique.push(rule);
        }
    }

    let m = DefaultModel::from_str(model).await.map_err(engine_err)?;
    let mut enforcer = Enforcer::new(m, MemoryAdapter::default())
        .await
        .map_err(engine_err)?;

    if !unique.is_empty() {
        let params: Vec<Vec<String>> = unique.iter().map(Rule::to_params).collect();
        enforcer.add_policies(params).await.map_err(engine_err)?;
    }

    Ok(Snapshot {
        enforcer,
        rules: unique,
    })
}

fn engine_err(e: casbin::Error) -> AuthgateError {
    AuthgateError::Engine(e.to_string())
}
