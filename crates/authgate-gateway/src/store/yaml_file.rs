//! YAML rule file store.
//!
//! ```yaml
//! version: 1
//! rules:
//!   - { subject: admin, resource: /api/v1/orgs, action: "*" }
//! ```
//!
//! Loading a missing or blank file is an error, so a file deleted or truncated
//! under a running gate never reads as "no rules". Saves go through a sibling
//! temp file and a rename so readers never see a half-written document.

use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use authgate_core::error::{AuthgateError, Result};
use authgate_core::Rule;

use super::PolicyStore;

const FILE_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct PolicyFile {
    version: u32,
    #[serde(default)]
    rules: Vec<Rule>,
}

#[derive(Debug, Clone)]
pub struct YamlFileStore {
    path: PathBuf,
}

impl YamlFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl PolicyStore for YamlFileStore {
    fn driver(&self) -> &'static str {
        "yaml"
    }

    async fn exists(&self) -> Result<bool> {
        match tokio::fs::metadata(&self.path).await {
            Ok(_) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(AuthgateError::Store(format!(
                "stat {} failed: {e}",
                self.path.display()
            ))),
        }
    }

    async fn load(&self) -> Result<Vec<Rule>> {
        let text = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            AuthgateError::Store(format!("read {} failed: {e}", self.path.display()))
        })?;

        if text.trim().is_empty() {
            return Err(AuthgateError::Store(format!(
                "policy file {} is empty",
                self.path.display()
            )));
        }

        let file: PolicyFile = serde_yaml::from_str(&text).map_err(|e| {
            AuthgateError::Store(format!("invalid policy file {}: {e}", self.path.display()))
        })?;
        if file.version != FILE_VERSION {
            return Err(AuthgateError::Store(format!(
                "unsupported policy file version {} in {}",
                file.version,
                self.path.display()
            )));
        }
        Ok(file.rules)
    }

    async fn save(&self, rules: &[Rule]) -> Result<()> {
        let doc = PolicyFile {
            version: FILE_VERSION,
            rules: rules.to_vec(),
        };
        let text = serde_yaml::to_string(&doc)
            .map_err(|e| AuthgateError::Store(format!("encode policy file failed: {e}")))?;

        let tmp = self.tmp_path();
        tokio::fs::write(&tmp, text).await.map_err(|e| {
            AuthgateError::Store(format!("write {} failed: {e}", tmp.display()))
        })?;
        tokio::fs::rename(&tmp, &self.path).await.map_err(|e| {
            AuthgateError::Store(format!("replace {} failed: {e}", self.path.display()))
        })?;

        tracing::debug!(path = %self.path.display(), rules = rules.len(), "policy file saved");
        Ok(())
    }
}
