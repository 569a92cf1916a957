//! Lightweight in-process metrics (dependency-free).
//!
//! Authorization decisions, engine faults, and reload outcomes are stored as
//! atomics and rendered by the `/metrics` handler in Prometheus text format.

pub mod metrics;

pub use metrics::GateMetrics;
