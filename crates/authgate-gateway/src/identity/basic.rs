use axum::extract::Request;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use authgate_core::Principal;

use super::{authorization_credentials, IdentityExtractor};

/// Login name from HTTP Basic credentials. The password is not checked here.
#[derive(Debug, Clone, Copy, Default)]
pub struct BasicAuthExtractor;

impl IdentityExtractor for BasicAuthExtractor {
    fn scheme(&self) -> &'static str {
        "basic"
    }

    fn current_user(&self, req: &Request) -> Principal {
        let Some(encoded) = authorization_credentials(req, "Basic") else {
            return Principal::anonymous();
        };
        let Ok(raw) = STANDARD.decode(encoded) else {
            tracing::debug!("malformed basic credentials");
            return Principal::anonymous();
        };
        let Ok(text) = String::from_utf8(raw) else {
            return Principal::anonymous();
        };

        match text.split_once(':') {
            Some((login, _password)) => Principal::new(login),
            None => Principal::new(text),
        }
    }
}
