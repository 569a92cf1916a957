use std::sync::Arc;

use axum::extract::Request;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use authgate_core::EnforcementQuery;

use crate::identity::IdentityExtractor;
use crate::policy::PolicyEngine;

/// Fixed rejection body. No other detail is ever returned to the caller.
pub const FORBIDDEN_BODY: &str = "403 Forbidden\n";

/// Stateless-per-call decision shim over the shared policy engine.
#[derive(Clone)]
pub struct Authorizer {
    engine: Arc<PolicyEngine>,
    identity: Arc<dyn IdentityExtractor>,
}

impl Authorizer {
    pub fn new(engine: Arc<PolicyEngine>, identity: Arc<dyn IdentityExtractor>) -> Self {
        Self { engine, identity }
    }

    pub fn engine(&self) -> &Arc<PolicyEngine> {
        &self.engine
    }

    /// Subject identifier as reported by the identity extractor (may be empty).
    pub fn user_name(&self, req: &Request) -> String {
        self.identity.current_user(req).login
    }

    /// Whether `(user, path, method)` of `req` is granted.
    ///
    /// Path and method are passed through verbatim; pattern semantics live in
    /// the engine.
    pub fn check_permission(&self, req: &Request) -> bool {
        let principal = self.identity.current_user(req);
        let subject = principal.login.as_str();
        let path = req.uri().path();
        let method = req.method().as_str();

        let allowed = self
            .engine
            .enforce(EnforcementQuery::new(subject, path, method));

        let metrics = self.engine.metrics();
        if allowed {
            metrics.decisions.inc(&[("decision", "allow")]);
            tracing::debug!(%subject, %path, %method, "request allowed");
        } else {
            metrics.decisions.inc(&[("decision", "deny")]);
            tracing::info!(
                %subject,
                %path,
                %method,
                anonymous = principal.is_anonymous(),
                scheme = self.identity.scheme(),
                "request denied"
            );
        }
        allowed
    }

    /// The 403 response written for a denied request.
    pub fn require_permission(&self) -> Response {
        (StatusCode::FORBIDDEN, FORBIDDEN_BODY).into_response()
    }
}
