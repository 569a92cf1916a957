//! Background policy refresh.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use super::engine::PolicyEngine;

/// Owns the reload task. Dropping the handle also ends the loop.
pub struct ReloadHandle {
    shutdown: oneshot::Sender<()>,
    task: JoinHandle<()>,
}

impl ReloadHandle {
    /// Signal the loop and wait for it to exit. An in-flight reload finishes first.
    pub async fn stop(self) {
        let _ = self.shutdown.send(());
        if let Err(e) = self.task.await {
            tracing::warn!(error = %e, "policy reload task ended abnormally");
        }
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

pub(crate) fn spawn(engine: Arc<PolicyEngine>, every: Duration) -> ReloadHandle {
    let (tx, mut rx) = oneshot::channel::<()>();

    let task = tokio::spawn(async move {
        let mut tick = tokio::time::interval(every);
        tick.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // interval fires immediately; the startup load already happened
        tick.tick().await;

        tracing::info!(interval_ms = every.as_millis() as u64, "policy auto-reload started");
        loop {
            tokio::select! {
                _ = &mut rx => break,
                _ = tick.tick() => reload_once(&engine).await,
            }
        }
        tracing::info!("policy auto-reload stopped");
    });

    ReloadHandle { shutdown: tx, task }
}

async fn reload_once(engine: &PolicyEngine) {
    match engine.load_policy().await {
        Ok(()) => {
            engine.metrics().reloads.inc(&[("result", "ok")]);
            tracing::debug!(rules = engine.rule_count(), "policy reloaded");
        }
        Err(e) => {
            // last good snapshot stays active
            engine.metrics().reloads.inc(&[("result", "error")]);
            tracing::warn!(
                code = e.code().as_str(),
                error = %e,
                rules = engine.rule_count(),
                "policy reload failed, keeping previous rules"
            );
        }
    }
}
