//! authgate core: authorization data model, error types, and default policy.
//!
//! This crate defines the rule/query/principal shapes and the error surface
//! shared by the gateway and by anything embedding the gate. It carries no
//! runtime, HTTP, or policy-matcher dependencies so it can be reused from
//! tooling that only needs to produce or inspect rules.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! All fallible paths must surface as `AuthgateError`/`Result`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod principal;
pub mod rule;
pub mod seed;

/// Shared result type.
pub use error::{AuthgateError, Result};
pub use principal::Principal;
pub use rule::{EnforcementQuery, Rule};
