//! Cubic ease-out interpolation
//!
//! Time is always passed in by the caller, so every state transition here is
//! deterministic and testable without a runtime.

use std::time::{Duration, Instant};

/// Cubic ease-out curve: `1 − (1 − t)³` for `t` in [0, 1].
pub fn ease_out_cubic(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

/// One in-flight interpolation from a captured start to a fixed end
#[derive(Debug, Clone, Copy)]
pub struct Tween {
    start: f64,
    end: f64,
    started_at: Instant,
    duration: Duration,
}

impl Tween {
    pub fn new(start: f64, end: f64, started_at: Instant, duration: Duration) -> Self {
        Self {
            start,
            end,
            started_at,
            duration,
        }
    }

    /// Fraction of the duration elapsed at `now`, clamped to [0, 1].
    fn fraction_at(&self, now: Instant) -> f64 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.started_at);
        (elapsed.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0)
    }

    /// Interpolated value at `now`. Exactly `end` once the duration elapses.
    pub fn value_at(&self, now: Instant) -> f64 {
        let fraction = self.fraction_at(now);
        if fraction >= 1.0 {
            return self.end;
        }
        self.start + (self.end - self.start) * ease_out_cubic(fraction)
    }

    pub fn is_complete(&self, now: Instant) -> bool {
        self.fraction_at(now) >= 1.0
    }

    pub fn end(&self) -> f64 {
        self.end
    }
}

/// A display value converging toward a retargetable end value
#[derive(Debug, Clone, Copy)]
pub struct Animated {
    display: f64,
    tween: Option<Tween>,
    duration: Duration,
}

impl Animated {
    pub fn new(initial: f64, duration: Duration) -> Self {
        Self {
            display: initial,
            tween: None,
            duration,
        }
    }

    /// Begin animating toward `target` from the current display value.
    ///
    /// Retargeting mid-flight restarts from wherever the display is now,
    /// never from the old target.
    pub fn retarget(&mut self, target: f64, now: Instant) {
        if let Some(tween) = &self.tween {
            self.display = tween.value_at(now);
        }
        if (target - self.display).abs() < f64::EPSILON {
            self.tween = None;
            return;
        }
        self.tween = Some(Tween::new(self.display, target, now, self.duration));
    }

    /// Snap to `value` with no animation.
    pub fn jump_to(&mut self, value: f64) {
        self.display = value;
        self.tween = None;
    }

    /// Advance the display value to `now` and return it. Clears the tween
    /// once it completes so no further ticks are scheduled.
    pub fn tick(&mut self, now: Instant) -> f64 {
        if let Some(tween) = self.tween {
            self.display = tween.value_at(now);
            if tween.is_complete(now) {
                self.tween = None;
            }
        }
        self.display
    }

    pub fn display(&self) -> f64 {
        self.display
    }

    pub fn is_animating(&self) -> bool {
        self.tween.is_some()
    }
}
