//! Animation tick task
//!
//! One driver per statistic: it receives target changes, advances the
//! [`Animated`] value on a refresh tick, and publishes the display value
//! through a watch channel. The task parks while nothing is animating and
//! is cancelable exactly once.

use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::debug;

use crate::tween::Animated;

/// Per-instance animation configuration
#[derive(Debug, Clone, Copy)]
pub struct AnimationConfig {
    /// Time a single tween takes from start to target
    pub duration: Duration,
    /// Display refresh tick
    pub refresh_tick: Duration,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            duration: Duration::from_millis(800),
            refresh_tick: Duration::from_millis(16),
        }
    }
}

/// Handle to a running animation driver
pub struct AnimationHandle {
    target_tx: watch::Sender<f64>,
    display_rx: watch::Receiver<f64>,
    handle: Option<JoinHandle<()>>,
}

impl AnimationHandle {
    /// Change the target; the display eases toward it from its current
    /// value.
    pub fn set_target(&self, target: f64) {
        // Receiver lives in the driver task; send only fails after stop,
        // when updates are supposed to be dropped anyway.
        let _ = self.target_tx.send(target);
    }

    /// Latest published display value.
    pub fn display(&self) -> f64 {
        *self.display_rx.borrow()
    }

    /// Cancel the driver. Double stop is a no-op; no tick fires afterwards.
    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            debug!("animation driver stopped");
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }
}

impl Drop for AnimationHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Spawn an animation driver with `initial` as the settled display value.
pub fn spawn_animation(initial: f64, config: AnimationConfig) -> AnimationHandle {
    let (target_tx, mut target_rx) = watch::channel(initial);
    let (display_tx, display_rx) = watch::channel(initial);

    let handle = tokio::spawn(async move {
        let mut animated = Animated::new(initial, config.duration);
        let mut ticker = tokio::time::interval(config.refresh_tick);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                changed = target_rx.changed() => {
                    if changed.is_err() {
                        break;
                    }
                    let target = *target_rx.borrow_and_update();
                    // tokio's clock so paused-time tests drive the tween
                    animated.retarget(target, tokio::time::Instant::now().into_std());
                    ticker.reset();
                }
                _ = ticker.tick(), if animated.is_animating() => {
                    let value = animated.tick(tokio::time::Instant::now().into_std());
                    if display_tx.send(value).is_err() {
                        break;
                    }
                }
            }
        }
    });

    AnimationHandle {
        target_tx,
        display_rx,
        handle: Some(handle),
    }
}
