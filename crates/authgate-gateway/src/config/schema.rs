use std::collections::HashMap;

use serde::Deserialize;

use authgate_core::error::{AuthgateError, Result};

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    pub version: u32,

    #[serde(default)]
    pub server: ServerSection,

    pub store: StoreSection,

    #[serde(default)]
    pub reload: ReloadSection,

    #[serde(default)]
    pub seed: SeedSection,

    #[serde(default)]
    pub identity: IdentitySection,

    /// Optional path to a casbin model file replacing the built-in keyMatch model.
    #[serde(default)]
    pub model: Option<String>,
}

impl GatewayConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(AuthgateError::UnsupportedVersion);
        }

        self.store.validate()?;
        self.reload.validate()?;
        self.seed.validate()?;
        self.identity.validate()?;

        if matches!(&self.model, Some(p) if p.trim().is_empty()) {
            return Err(AuthgateError::Config("model must not be empty when set".into()));
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_listen")]
    pub listen: String,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            listen: default_listen(),
        }
    }
}

fn default_listen() -> String {
    "0.0.0.0:8080".into()
}

/// Backing store: a driver name plus a driver-specific data-source locator.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StoreSection {
    pub driver: String,
    #[serde(default)]
    pub source: String,
}

impl StoreSection {
    pub fn validate(&self) -> Result<()> {
        if self.driver.trim().is_empty() {
            return Err(AuthgateError::Config("store.driver must not be empty".into()));
        }
        if self.driver != "memory" && self.source.trim().is_empty() {
            return Err(AuthgateError::Config(format!(
                "store.source is required for driver {}",
                self.driver
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReloadSection {
    #[serde(default = "default_reload_enabled")]
    pub enabled: bool,

    #[serde(default = "default_reload_interval_ms")]
    pub interval_ms: u64,
}

impl Default for ReloadSection {
    fn default() -> Self {
        Self {
            enabled: default_reload_enabled(),
            interval_ms: default_reload_interval_ms(),
        }
    }
}

impl ReloadSection {
    pub fn validate(&self) -> Result<()> {
        if self.enabled && !(1000..=3_600_000).contains(&self.interval_ms) {
            return Err(AuthgateError::Config(
                "reload.interval_ms must be between 1000 and 3600000".into(),
            ));
        }
        Ok(())
    }
}

fn default_reload_enabled() -> bool {
    true
}
fn default_reload_interval_ms() -> u64 {
    10_000
}

/// Default rules written when the store holds no rules at startup.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeedSection {
    #[serde(default = "default_seed_subject")]
    pub subject: String,

    #[serde(default)]
    pub orgs: Vec<u64>,
}

impl Default for SeedSection {
    fn default() -> Self {
        Self {
            subject: default_seed_subject(),
            orgs: Vec::new(),
        }
    }
}

impl SeedSection {
    pub fn validate(&self) -> Result<()> {
        if self.subject.trim().is_empty() {
            return Err(AuthgateError::Config("seed.subject must not be empty".into()));
        }
        Ok(())
    }
}

fn default_seed_subject() -> String {
    "admin".into()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdentityScheme {
    /// `Authorization: Basic ...`, login taken from the credentials.
    #[default]
    Basic,
    /// `Authorization: Bearer ...`, login looked up in `identity.tokens`.
    Bearer,
    /// Principal inserted into request extensions by an upstream layer.
    Extension,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct IdentitySection {
    #[serde(default)]
    pub scheme: IdentityScheme,

    /// token -> login (bearer scheme only)
    #[serde(default)]
    pub tokens: HashMap<String, String>,
}

impl IdentitySection {
    pub fn validate(&self) -> Result<()> {
        match self.scheme {
            IdentityScheme::Bearer if self.tokens.is_empty() => Err(AuthgateError::Config(
                "identity.tokens must not be empty for bearer scheme".into(),
            )),
            IdentityScheme::Basic | IdentityScheme::Extension if !self.tokens.is_empty() => {
                Err(AuthgateError::Config(
                    "identity.tokens is only valid for bearer scheme".into(),
                ))
            }
            _ => Ok(()),
        }
    }
}
