//! Cancelable polling task
//!
//! Drives one [`FeedSource`] on a fixed interval, publishing each cycle's
//! outcome into the feed's [`FeedSlot`]. Each issued request carries a
//! generation number; the slot applies a completion only if its generation
//! is still the latest, so a slow response can never overwrite a newer one
//! and nothing publishes after teardown.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use xrpool_core::{FeedKind, FeedResult};

use crate::slot::{FeedSlot, GenerationGate};

/// Base trait for pollable feed sources
#[async_trait::async_trait]
pub trait FeedSource: Send + Sync {
    fn kind(&self) -> FeedKind;

    /// Fetch and parse one value. One call per poll cycle.
    async fn fetch_value(&self) -> FeedResult<f64>;
}

/// Handle to a running poller
///
/// Stopping is idempotent; once stopped, no further value or error reaches
/// the slot.
pub struct PollHandle {
    kind: FeedKind,
    handle: Option<JoinHandle<()>>,
    slot: Arc<FeedSlot>,
    gate: Arc<GenerationGate>,
    refresh: Arc<Notify>,
}

impl PollHandle {
    /// Trigger an immediate poll cycle without waiting for the next tick.
    pub fn refresh_now(&self) {
        self.refresh.notify_one();
    }

    /// Cancel the polling task. Double stop is a no-op.
    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            // seal before abort: in-flight request tasks survive the abort
            // and must find the gate closed
            self.slot.seal(&self.gate);
            handle.abort();
            info!(feed = %self.kind, "poller stopped");
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Spawn a poller for `source`, polling immediately and then every
/// `interval`.
pub fn spawn_poller(
    source: Arc<dyn FeedSource>,
    slot: Arc<FeedSlot>,
    interval: Duration,
) -> PollHandle {
    let gate = Arc::new(GenerationGate::new());
    let refresh = Arc::new(Notify::new());
    let kind = source.kind();

    let task_gate = Arc::clone(&gate);
    let task_refresh = Arc::clone(&refresh);
    let task_slot = Arc::clone(&slot);

    let handle = tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);

        loop {
            tokio::select! {
                _ = ticker.tick() => {}
                _ = task_refresh.notified() => {
                    info!(feed = %source.kind(), "manual refresh requested");
                    ticker.reset();
                }
            }

            let generation = task_gate.issue();
            let source = Arc::clone(&source);
            let slot = Arc::clone(&task_slot);
            let gate = Arc::clone(&task_gate);

            // The request runs detached so a slow response never delays the
            // next tick; the slot re-checks the gate under its write lock.
            tokio::spawn(async move {
                let result = source.fetch_value().await;

                if !slot.publish_if_current(&gate, generation, result.clone()) {
                    debug!(
                        feed = %source.kind(),
                        generation,
                        "discarding out-of-date poll result"
                    );
                    return;
                }

                match result {
                    Ok(value) => {
                        debug!(feed = %source.kind(), value, "poll cycle succeeded");
                    }
                    Err(err) => {
                        warn!(feed = %source.kind(), error = %err, "poll cycle failed");
                    }
                }
            });
        }
    });

    info!(feed = %kind, ?interval, "poller started");

    PollHandle {
        kind,
        handle: Some(handle),
        slot,
        gate,
        refresh,
    }
}
