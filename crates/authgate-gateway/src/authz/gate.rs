use std::sync::Arc;

use axum::extract::{Request, State};
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::Router;

use super::Authorizer;

/// Per-request hook. Allowed requests continue untouched; denied ones get the
/// fixed 403 and `next` is never called.
pub async fn gate(State(authz): State<Arc<Authorizer>>, req: Request, next: Next) -> Response {
    if authz.check_permission(&req) {
        next.run(req).await
    } else {
        authz.require_permission()
    }
}

/// Install the gate in front of every route (and the fallback) registered on `router` so far.
pub fn protect<S>(router: Router<S>, authz: Arc<Authorizer>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router.layer(middleware::from_fn_with_state(authz, gate))
}
