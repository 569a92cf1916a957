use axum::extract::Request;

use authgate_core::Principal;

use super::IdentityExtractor;

/// Principal placed in request extensions by an upstream authentication layer.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExtensionExtractor;

impl IdentityExtractor for ExtensionExtractor {
    fn scheme(&self) -> &'static str {
        "extension"
    }

    fn current_user(&self, req: &Request) -> Principal {
        req.extensions().get::<Principal>().cloned().unwrap_or_default()
    }
}
