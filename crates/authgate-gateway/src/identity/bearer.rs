use std::collections::HashMap;

use axum::extract::Request;

use authgate_core::Principal;

use super::{authorization_credentials, IdentityExtractor};

/// Login looked up from a static bearer-token table.
#[derive(Debug, Clone, Default)]
pub struct BearerTokenExtractor {
    tokens: HashMap<String, String>,
}

impl BearerTokenExtractor {
    pub fn new(tokens: HashMap<String, String>) -> Self {
        Self { tokens }
    }
}

impl IdentityExtractor for BearerTokenExtractor {
    fn scheme(&self) -> &'static str {
        "bearer"
    }

    fn current_user(&self, req: &Request) -> Principal {
        authorization_credentials(req, "Bearer")
            .and_then(|token| self.tokens.get(token))
            .map(|login| Principal::new(login.as_str()))
            .unwrap_or_default()
    }
}
