#![forbid(unsafe_code)]

//! Trailing-edge debouncer.
//!
//! A value pushed into a [`Debouncer`] is held until `delay` has passed
//! without another push. Each push replaces the pending value and restarts
//! the quiet window, so only the last value of a burst is ever delivered.
//!
//! # Usage
//!
//! ```
//! use std::time::Duration;
//! use rowport_runtime::Debouncer;
//!
//! let mut debouncer = Debouncer::new(Duration::from_millis(50));
//! debouncer.push(10.0, Duration::from_millis(0));
//! debouncer.push(20.0, Duration::from_millis(30));
//!
//! // Still inside the quiet window of the second push.
//! assert_eq!(debouncer.poll(Duration::from_millis(60)), None);
//! assert_eq!(debouncer.poll(Duration::from_millis(80)), Some(20.0));
//! ```
//!
//! # Invariants
//!
//! - **Latest-wins**: a value is never delivered after a newer push.
//! - **Quiescence**: nothing is delivered before `delay` has elapsed since the
//!   most recent push.
//! - **At-most-once**: a delivered value is not delivered again.

use core::time::Duration;

/// Holds the latest value of a burst until the burst goes quiet.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    delay: Duration,
    pending: Option<Pending<T>>,
}

#[derive(Debug, Clone)]
struct Pending<T> {
    value: T,
    deadline: Duration,
}

impl<T> Debouncer<T> {
    /// Create a debouncer with the given quiet window.
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    /// The quiet window.
    #[must_use]
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// Change the quiet window. A pending value keeps its original deadline.
    pub fn set_delay(&mut self, delay: Duration) {
        self.delay = delay;
    }

    /// Record `value` at time `now`, superseding any pending value.
    ///
    /// Returns `true` when a pending value was superseded.
    pub fn push(&mut self, value: T, now: Duration) -> bool {
        let superseded = self.pending.is_some();
        self.pending = Some(Pending {
            value,
            deadline: now.saturating_add(self.delay),
        });
        superseded
    }

    /// Deliver the pending value if its quiet window has elapsed by `now`.
    pub fn poll(&mut self, now: Duration) -> Option<T> {
        match &self.pending {
            Some(pending) if now >= pending.deadline => self.pending.take().map(|p| p.value),
            _ => None,
        }
    }

    /// Deliver the pending value immediately, ignoring the deadline.
    pub fn flush(&mut self) -> Option<T> {
        self.pending.take().map(|p| p.value)
    }

    /// Drop the pending value without delivering it.
    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }

    /// When the pending value becomes deliverable.
    #[must_use]
    pub fn deadline(&self) -> Option<Duration> {
        self.pending.as_ref().map(|p| p.deadline)
    }

    /// Whether a value is waiting for its quiet window.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}
