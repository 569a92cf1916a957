//! Shared application state for the gateway.

use std::sync::Arc;

use crate::authz::Authorizer;
use crate::config::GatewayConfig;
use crate::identity;
use crate::obs::GateMetrics;
use crate::policy::PolicyEngine;

#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    authorizer: Arc<Authorizer>,
}

impl AppState {
    /// Wire the authorizer over an already bootstrapped engine, using the
    /// identity scheme named in `cfg`.
    pub fn new(cfg: &GatewayConfig, engine: Arc<PolicyEngine>) -> Self {
        let extractor = identity::from_config(&cfg.identity);
        tracing::info!(scheme = extractor.scheme(), "identity extractor selected");
        let authorizer = Arc::new(Authorizer::new(engine, extractor));

        Self {
            inner: Arc::new(AppStateInner { authorizer }),
        }
    }

    pub fn authorizer(&self) -> Arc<Authorizer> {
        Arc::clone(&self.inner.authorizer)
    }

    pub fn metrics(&self) -> &Arc<GateMetrics> {
        self.inner.authorizer.engine().metrics()
    }
}
