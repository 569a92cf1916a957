//! authgate gateway binary.
//!
//! - Loads `authgate.yaml` (or the path given as first argument)
//! - Bootstraps the policy engine; any failure exits before binding
//! - Serves a demo API behind the gate plus ungated `/healthz`, `/metrics`

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::Request;
use axum::Router;
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, EnvFilter};

use authgate_core::error::{AuthgateError, Result};
use authgate_gateway::{app_state, bootstrap, config, obs::GateMetrics, router};

#[tokio::main]
async fn main() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    if let Err(e) = run().await {
        tracing::error!(code = e.code().as_str(), error = %e, "authgate-gateway failed");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "authgate.yaml".to_string());
    let cfg = config::load_from_file(&path)?;
    let listen: SocketAddr = cfg
        .server
        .listen
        .parse()
        .map_err(|e| AuthgateError::Config(format!("server.listen must be a valid SocketAddr: {e}")))?;

    let boot = bootstrap::bootstrap(&cfg, Arc::new(GateMetrics::default())).await?;

    let state = app_state::AppState::new(&cfg, Arc::clone(&boot.engine));
    let app = router::build_router(state, demo_api());

    tracing::info!(%listen, "authgate-gateway starting");
    let listener = TcpListener::bind(listen)
        .await
        .map_err(|e| AuthgateError::Internal(format!("bind {listen} failed: {e}")))?;

    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AuthgateError::Internal(format!("server failed: {e}")));

    boot.shutdown().await;
    served
}

/// Stand-in for the real route table: echoes what the gate let through.
fn demo_api() -> Router {
    Router::new().fallback(|req: Request| async move {
        format!("{} {}\n", req.method(), req.uri().path())
    })
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "ctrl-c handler unavailable");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown requested");
}
