//! Authenticated request identity.

/// The subject making a request, as produced by an identity extractor.
///
/// `Principal::default()` is the anonymous principal (empty login). It is
/// still enforced like any other subject, so it only passes rules written
/// for the empty subject.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Principal {
    pub login: String,
}

impl Principal {
    pub fn new(login: impl Into<String>) -> Self {
        Self { login: login.into() }
    }

    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn is_anonymous(&self) -> bool {
        self.login.is_empty()
    }
}
