//! Axum router wiring.
//!
//! The application router is wrapped by the gate as a whole, including its
//! fallback. Ops endpoints are registered on a separate router that stays
//! outside the gate, so health checks and scrapes need no principal.

use axum::{routing::get, Router};

use crate::{app_state::AppState, authz, ops};

pub fn build_router(state: AppState, app: Router) -> Router {
    let protected = authz::protect(app, state.authorizer());

    let ops = Router::new()
        .route("/healthz", get(ops::healthz))
        .route("/metrics", get(ops::metrics))
        .with_state(state);

    // On merge axum keeps the fallback of the router passed in, so the gated
    // app goes last and unknown paths still reach the gate.
    ops.merge(protected)
}
