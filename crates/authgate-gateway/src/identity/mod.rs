//! Identity extraction.
//!
//! The gate never authenticates. An extractor only reads whichever identity
//! an upstream layer (or the client, for Basic) attached to the request, and
//! falls back to the anonymous principal when there is none.

pub mod basic;
pub mod bearer;
pub mod extension;

use std::sync::Arc;

use axum::extract::Request;
use axum::http::header::AUTHORIZATION;

use authgate_core::Principal;

use crate::config::{IdentityScheme, IdentitySection};

pub use basic::BasicAuthExtractor;
pub use bearer::BearerTokenExtractor;
pub use extension::ExtensionExtractor;

/// Given a request, produce the subject it acts as.
pub trait IdentityExtractor: Send + Sync {
    fn scheme(&self) -> &'static str;
    fn current_user(&self, req: &Request) -> Principal;
}

/// Select the extractor named by config.
pub fn from_config(cfg: &IdentitySection) -> Arc<dyn IdentityExtractor> {
    match cfg.scheme {
        IdentityScheme::Basic => Arc::new(BasicAuthExtractor),
        IdentityScheme::Bearer => Arc::new(BearerTokenExtractor::new(cfg.tokens.clone())),
        IdentityScheme::Extension => Arc::new(ExtensionExtractor),
    }
}

/// Credentials of an `Authorization: <scheme> <credentials>` header, scheme
/// compared case-insensitively.
pub(crate) fn authorization_credentials<'a>(req: &'a Request, scheme: &str) -> Option<&'a str> {
    let value = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let (name, rest) = value.trim().split_once(' ')?;
    if !name.eq_ignore_ascii_case(scheme) {
        return None;
    }
    let rest = rest.trim();
    (!rest.is_empty()).then_some(rest)
}
