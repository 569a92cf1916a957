//! Policy layer (rule snapshots, enforcement, auto-reload).
//!
//! Rule matching is delegated to a casbin enforcer compiled from a fixed
//! model; this layer owns the snapshot lifecycle around it.

pub mod engine;
pub mod model;
pub mod reload;

pub use engine::PolicyEngine;
pub use model::DEFAULT_MODEL;
pub use reload::ReloadHandle;
