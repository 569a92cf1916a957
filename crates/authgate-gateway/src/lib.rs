//! authgate gateway library entry.
//!
//! Wires config, policy store, policy engine, identity extraction, and the
//! authorization gate into an axum stack. Consumed by the binary (`main.rs`)
//! and by integration tests.

pub mod app_state;
pub mod authz;
pub mod bootstrap;
pub mod config;
pub mod identity;
pub mod obs;
pub mod ops;
pub mod policy;
pub mod router;
pub mod store;
