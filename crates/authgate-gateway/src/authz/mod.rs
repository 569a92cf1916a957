//! Decision point and request-pipeline hook.
//!
//! `Authorizer` turns a request into `(subject, path, method)` and asks the
//! policy engine; `gate` applies the answer to an axum router.

pub mod authorizer;
pub mod gate;

pub use authorizer::{Authorizer, FORBIDDEN_BODY};
pub use gate::{gate, protect};
