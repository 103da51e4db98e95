#![forbid(unsafe_code)]

//! Host time sources.
//!
//! Every timed operation in the runtime takes a `Duration` timestamp. A
//! [`Clock`] is a convenience for hosts that would rather hand over a time
//! source than compute timestamps themselves; see
//! `VirtualTable::handle_with` and `VirtualTable::tick_with` in
//! `rowport-widgets`.

use core::time::Duration;

/// Monotonic time measured from an origin chosen by the clock.
pub trait Clock {
    /// Current timestamp.
    fn now(&self) -> Duration;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> Duration {
        (**self).now()
    }
}

/// Clock whose time only moves when the host moves it.
///
/// Used by headless hosts and tests that need reproducible debounce timing.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ManualClock {
    current: Duration,
}

impl ManualClock {
    /// Clock reading `start`.
    #[must_use]
    pub const fn at(start: Duration) -> Self {
        Self { current: start }
    }

    /// Jump to `time`. Moving backwards is allowed; debouncers treat an
    /// earlier timestamp as "not yet due".
    pub fn set(&mut self, time: Duration) {
        self.current = time;
    }

    /// Move forward by `step` and return the new reading.
    pub fn advance(&mut self, step: Duration) -> Duration {
        self.current = self.current.saturating_add(step);
        self.current
    }

    /// Move forward by `millis` milliseconds and return the new reading.
    pub fn advance_ms(&mut self, millis: u64) -> Duration {
        self.advance(Duration::from_millis(millis))
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.current
    }
}

/// Real time since construction, backed by `web_time::Instant` so the same
/// code runs on native and wasm hosts.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: web_time::Instant,
}

impl SystemClock {
    /// Clock reading zero now.
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: web_time::Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}
