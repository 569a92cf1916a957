//! Rule and query shapes.

use serde::{Deserialize, Serialize};

/// One `(subject, resource, action)` permission tuple.
///
/// All three fields are patterns; their meaning (prefix wildcards, `*`
/// actions) belongs to the policy engine.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Rule {
    pub subject: String,
    pub resource: String,
    pub action: String,
}

impl Rule {
    pub fn new(
        subject: impl Into<String>,
        resource: impl Into<String>,
        action: impl Into<String>,
    ) -> Self {
        Self {
            subject: subject.into(),
            resource: resource.into(),
            action: action.into(),
        }
    }

    /// Positional form used by casbin-style engines (`p, sub, obj, act`).
    pub fn to_params(&self) -> Vec<String> {
        vec![
            self.subject.clone(),
            self.resource.clone(),
            self.action.clone(),
        ]
    }
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, {}, {}", self.subject, self.resource, self.action)
    }
}

/// A concrete `(subject, path, method)` question, built fresh per request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnforcementQuery {
    pub subject: String,
    pub resource: String,
    pub action: String,
}

impl EnforcementQuery {
    pub fn new(
        subject: impl Into<String>,
        resource: impl Into<String>,
        action: impl Into<String>,
    ) -> Self {
        Self {
            subject: subject.into(),
            resource: resource.into(),
            action: action.into(),
        }
    }
}
