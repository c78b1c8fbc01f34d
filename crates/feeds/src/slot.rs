//! Published feed state
//!
//! One slot per feed, written only by its own polling task and read by the
//! derivation layer. The reading is a single enum behind one lock, so a
//! value and an error are mutually exclusive and observed atomically.
//!
//! Request tasks publish through [`FeedSlot::publish_if_current`], which
//! re-checks the feed's [`GenerationGate`] while holding the slot's write
//! lock; a stale completion therefore can never land after a fresher one,
//! and nothing lands after the slot is sealed.

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use xrpool_core::{FeedKind, FeedResult};

/// Latest published reading of a feed
#[derive(Debug, Clone, PartialEq)]
pub enum Reading {
    /// Nothing fetched yet
    Idle,
    /// Last cycle succeeded
    Ready { value: f64, at: DateTime<Utc> },
    /// Last cycle failed
    Failed { message: String, at: DateTime<Utc> },
}

impl Reading {
    pub fn value(&self) -> Option<f64> {
        match self {
            Reading::Ready { value, .. } => Some(*value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Reading::Failed { message, .. } => Some(message),
            _ => None,
        }
    }

    /// Timestamp of the last successful cycle, if the slot holds one.
    pub fn ready_at(&self) -> Option<DateTime<Utc>> {
        match self {
            Reading::Ready { at, .. } => Some(*at),
            _ => None,
        }
    }
}

/// Admission control for poll-cycle results
#[derive(Debug, Default)]
pub struct GenerationGate {
    latest: AtomicU64,
    shut: AtomicBool,
}

impl GenerationGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a newly issued request and return its generation.
    pub fn issue(&self) -> u64 {
        self.latest.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Whether a completed request may still publish its result.
    ///
    /// Callers racing against `issue` must hold the slot's write lock while
    /// checking, which [`FeedSlot::publish_if_current`] does.
    pub fn admits(&self, generation: u64) -> bool {
        !self.shut.load(Ordering::SeqCst) && self.latest.load(Ordering::SeqCst) == generation
    }

    /// Refuse all further publications. Idempotent.
    pub fn close(&self) {
        self.shut.store(true, Ordering::SeqCst);
    }
}

/// A feed's published value and error state
#[derive(Debug)]
pub struct FeedSlot {
    kind: FeedKind,
    reading: RwLock<Reading>,
    update_count: AtomicU64,
}

impl FeedSlot {
    pub fn new(kind: FeedKind) -> Self {
        Self {
            kind,
            reading: RwLock::new(Reading::Idle),
            update_count: AtomicU64::new(0),
        }
    }

    pub fn kind(&self) -> FeedKind {
        self.kind
    }

    /// Publish a successful cycle, clearing any prior error.
    pub fn publish_value(&self, value: f64) {
        self.write(Reading::Ready {
            value,
            at: Utc::now(),
        });
    }

    /// Publish a failed cycle, clearing any prior value.
    pub fn publish_error(&self, message: String) {
        self.write(Reading::Failed {
            message,
            at: Utc::now(),
        });
    }

    /// Publish a cycle outcome only if `generation` is still the latest
    /// issued and the gate is open. The admission check and the write are
    /// one critical section, so a slow stale response can never overwrite
    /// a newer result. Returns whether the outcome was applied.
    pub fn publish_if_current(
        &self,
        gate: &GenerationGate,
        generation: u64,
        outcome: FeedResult<f64>,
    ) -> bool {
        let mut reading = self.reading.write();
        if !gate.admits(generation) {
            return false;
        }
        *reading = match outcome {
            Ok(value) => Reading::Ready {
                value,
                at: Utc::now(),
            },
            Err(err) => Reading::Failed {
                message: err.to_string(),
                at: Utc::now(),
            },
        };
        self.update_count.fetch_add(1, Ordering::Relaxed);
        true
    }

    /// Close `gate` under the slot's write lock. Once this returns, any
    /// completion that was admitted has also been written, and everything
    /// still in flight will be refused.
    pub fn seal(&self, gate: &GenerationGate) {
        let _reading = self.reading.write();
        gate.close();
    }

    /// Current reading, cloned out so the lock is held only briefly.
    pub fn snapshot(&self) -> Reading {
        self.reading.read().clone()
    }

    pub fn value(&self) -> Option<f64> {
        self.reading.read().value()
    }

    pub fn error(&self) -> Option<String> {
        self.reading.read().error().map(str::to_owned)
    }

    /// Number of cycles applied so far
    pub fn update_count(&self) -> u64 {
        self.update_count.load(Ordering::Relaxed)
    }

    fn write(&self, reading: Reading) {
        *self.reading.write() = reading;
        self.update_count.fetch_add(1, Ordering::Relaxed);
    }
}
