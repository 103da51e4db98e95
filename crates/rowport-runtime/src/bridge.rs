#![forbid(unsafe_code)]

//! Scroll event bridge.
//!
//! Converts host scroll input into [`ViewportState`] updates.
//!
//! # Decision Rule
//!
//! 1) A native scroll notification is recorded in the debouncer; it applies
//!    once `debounce` has elapsed without another notification.
//! 2) A wheel delta applies immediately as
//!    `clamp(0, total_height, scroll_offset + delta_y)` and drops any pending
//!    native offset.
//! 3) A programmatic scroll applies immediately and drops any pending native
//!    offset.
//! 4) Every applied offset is clamped into `[0, total_height]`.
//!
//! # Invariants
//!
//! - The bridge never touches rendered rows.
//! - Identical event sequences with identical timestamps yield identical
//!   viewport states.

use core::time::Duration;

use rowport_core::geometry::clamp_scroll_offset;
use rowport_core::{LayoutConfig, ViewportState, trace};

use crate::debounce::Debouncer;
use crate::event::ScrollEvent;

/// Default quiet window for native scroll notifications.
pub const DEFAULT_SCROLL_DEBOUNCE: Duration = Duration::from_millis(50);

/// Configuration for the scroll bridge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BridgeConfig {
    /// Quiet window applied to native scroll notifications.
    pub debounce: Duration,
    /// Accept wheel input for scroll emulation.
    pub wheel: bool,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            debounce: DEFAULT_SCROLL_DEBOUNCE,
            wheel: false,
        }
    }
}

impl BridgeConfig {
    /// Set the debounce window.
    #[must_use]
    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    /// Enable or disable wheel emulation.
    #[must_use]
    pub fn with_wheel(mut self, wheel: bool) -> Self {
        self.wheel = wheel;
        self
    }
}

/// Owns the [`ViewportState`] for one table instance.
#[derive(Debug, Clone)]
pub struct ScrollBridge {
    config: BridgeConfig,
    viewport: ViewportState,
    debouncer: Debouncer<f64>,
}

impl ScrollBridge {
    /// Create a bridge scrolled to the top.
    #[must_use]
    pub fn new(config: BridgeConfig, viewport_height: f64) -> Self {
        Self {
            config,
            viewport: ViewportState::new(0.0, viewport_height),
            debouncer: Debouncer::new(config.debounce),
        }
    }

    /// Current configuration.
    #[must_use]
    pub fn config(&self) -> BridgeConfig {
        self.config
    }

    /// Current viewport state.
    #[must_use]
    pub fn viewport(&self) -> ViewportState {
        self.viewport
    }

    /// Feed one host event.
    ///
    /// Returns the new viewport state when the event applied immediately.
    pub fn handle(
        &mut self,
        event: ScrollEvent,
        now: Duration,
        layout: &LayoutConfig,
    ) -> Option<ViewportState> {
        match event {
            ScrollEvent::Scroll { scroll_top } => {
                self.on_scroll(scroll_top, now);
                None
            }
            ScrollEvent::Wheel { delta_y } => self.on_wheel(delta_y, layout),
        }
    }

    /// Record a native scroll notification.
    pub fn on_scroll(&mut self, scroll_top: f64, now: Duration) {
        if self.debouncer.push(scroll_top, now) {
            trace!(scroll_top, "pending scroll superseded");
        }
    }

    /// Apply a wheel delta immediately.
    ///
    /// Ignored when wheel emulation is disabled.
    pub fn on_wheel(&mut self, delta_y: f64, layout: &LayoutConfig) -> Option<ViewportState> {
        if !self.config.wheel || !delta_y.is_finite() {
            return None;
        }
        self.debouncer.cancel();
        self.apply(self.viewport.scroll_offset + delta_y, layout)
    }

    /// Apply a debounced native offset whose quiet window has elapsed.
    ///
    /// Returns the new viewport state when the offset changed.
    pub fn tick(&mut self, now: Duration, layout: &LayoutConfig) -> Option<ViewportState> {
        let scroll_top = self.debouncer.poll(now)?;
        trace!(scroll_top, "debounced scroll applied");
        self.apply(scroll_top, layout)
    }

    /// Apply any pending native offset now, regardless of its deadline.
    pub fn flush(&mut self, layout: &LayoutConfig) -> Option<ViewportState> {
        let scroll_top = self.debouncer.flush()?;
        self.apply(scroll_top, layout)
    }

    /// Set the scroll offset programmatically.
    ///
    /// Returns the clamped offset that was applied.
    pub fn set_scroll_offset(&mut self, offset: f64, layout: &LayoutConfig) -> f64 {
        self.debouncer.cancel();
        self.apply(offset, layout);
        self.viewport.scroll_offset
    }

    /// Update the viewport height after a container resize.
    pub fn set_viewport_height(&mut self, viewport_height: f64) -> bool {
        let next = ViewportState::new(self.viewport.scroll_offset, viewport_height);
        let changed = next != self.viewport;
        self.viewport = next;
        changed
    }

    /// Re-clamp the current offset, e.g. after the item count shrank.
    pub fn reclamp(&mut self, layout: &LayoutConfig) -> Option<ViewportState> {
        self.apply(self.viewport.scroll_offset, layout)
    }

    /// When the host should next call [`ScrollBridge::tick`].
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.debouncer.deadline()
    }

    /// Whether a native offset is waiting for its quiet window.
    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    fn apply(&mut self, offset: f64, layout: &LayoutConfig) -> Option<ViewportState> {
        let clamped = clamp_scroll_offset(offset, layout);
        if clamped == self.viewport.scroll_offset {
            return None;
        }
        self.viewport = self.viewport.with_scroll_offset(clamped);
        Some(self.viewport)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn layout() -> LayoutConfig {
        // 100 rows of 48px plus a 48px header: 4848px total.
        LayoutConfig::new(100)
    }

    #[test]
    fn starts_at_top() {
        let bridge = ScrollBridge::new(BridgeConfig::default(), 480.0);
        assert_eq!(bridge.viewport(), ViewportState::new(0.0, 480.0));
        assert!(!bridge.has_pending());
    }

    #[test]
    fn scroll_applies_after_quiet_window() {
        let layout = layout();
        let mut bridge = ScrollBridge::new(BridgeConfig::default(), 480.0);

        bridge.on_scroll(300.0, ms(0));
        assert_eq!(bridge.tick(ms(49), &layout), None);
        assert_eq!(bridge.viewport().scroll_offset, 0.0);

        let state = bridge.tick(ms(50), &layout).expect("debounce elapsed");
        assert_eq!(state.scroll_offset, 300.0);
        assert!(!bridge.has_pending());
    }

    #[test]
    fn only_last_scroll_in_burst_applies() {
        let layout = layout();
        let mut bridge = ScrollBridge::new(BridgeConfig::default(), 480.0);

        for (i, top) in [100.0, 200.0, 300.0, 400.0].into_iter().enumerate() {
            bridge.on_scroll(top, ms(i as u64 * 20));
        }
        assert_eq!(bridge.next_deadline(), Some(ms(110)));
        assert_eq!(bridge.tick(ms(100), &layout), None);
        assert_eq!(
            bridge.tick(ms(110), &layout).map(|s| s.scroll_offset),
            Some(400.0)
        );
    }

    #[test]
    fn scroll_offset_is_clamped() {
        let layout = layout();
        let mut bridge = ScrollBridge::new(BridgeConfig::default(), 480.0);
        bridge.on_scroll(1.0e9, ms(0));
        let state = bridge.tick(ms(50), &layout).expect("applied");
        assert_eq!(state.scroll_offset, 4848.0);
    }

    #[test]
    fn unchanged_offset_reports_nothing() {
        let layout = layout();
        let mut bridge = ScrollBridge::new(BridgeConfig::default(), 480.0);
        bridge.on_scroll(0.0, ms(0));
        assert_eq!(bridge.tick(ms(50), &layout), None);
    }

    #[test]
    fn wheel_ignored_unless_enabled() {
        let layout = layout();
        let mut bridge = ScrollBridge::new(BridgeConfig::default(), 480.0);
        assert_eq!(bridge.on_wheel(120.0, &layout), None);
        assert_eq!(bridge.viewport().scroll_offset, 0.0);
    }

    #[test]
    fn wheel_applies_immediately_and_clamps() {
        let layout = layout();
        let mut bridge = ScrollBridge::new(BridgeConfig::default().with_wheel(true), 480.0);

        let state = bridge.on_wheel(120.0, &layout).expect("applied");
        assert_eq!(state.scroll_offset, 120.0);

        assert_eq!(bridge.on_wheel(-500.0, &layout).map(|s| s.scroll_offset), Some(0.0));
        assert_eq!(bridge.on_wheel(-10.0, &layout), None);

        let state = bridge.on_wheel(1.0e6, &layout).expect("applied");
        assert_eq!(state.scroll_offset, 4848.0);
    }

    #[test]
    fn wheel_drops_pending_scroll() {
        let layout = layout();
        let mut bridge = ScrollBridge::new(BridgeConfig::default().with_wheel(true), 480.0);
        bridge.on_scroll(900.0, ms(0));
        bridge.on_wheel(48.0, &layout);
        assert!(!bridge.has_pending());
        assert_eq!(bridge.tick(ms(100), &layout), None);
        assert_eq!(bridge.viewport().scroll_offset, 48.0);
    }

    #[test]
    fn handle_dispatches_by_kind() {
        let layout = layout();
        let mut bridge = ScrollBridge::new(BridgeConfig::default().with_wheel(true), 480.0);
        assert_eq!(bridge.handle(ScrollEvent::scroll(96.0), ms(0), &layout), None);
        assert!(bridge.has_pending());
        let state = bridge
            .handle(ScrollEvent::wheel(48.0), ms(10), &layout)
            .expect("wheel applies");
        assert_eq!(state.scroll_offset, 48.0);
    }

    #[test]
    fn programmatic_scroll_applies_and_cancels() {
        let layout = layout();
        let mut bridge = ScrollBridge::new(BridgeConfig::default(), 480.0);
        bridge.on_scroll(900.0, ms(0));
        assert_eq!(bridge.set_scroll_offset(-5.0, &layout), 0.0);
        assert_eq!(bridge.set_scroll_offset(960.0, &layout), 960.0);
        assert!(!bridge.has_pending());
    }

    #[test]
    fn flush_applies_early() {
        let layout = layout();
        let mut bridge = ScrollBridge::new(BridgeConfig::default(), 480.0);
        bridge.on_scroll(144.0, ms(0));
        assert_eq!(bridge.flush(&layout).map(|s| s.scroll_offset), Some(144.0));
    }

    #[test]
    fn reclamp_after_shrink() {
        let mut bridge = ScrollBridge::new(BridgeConfig::default(), 480.0);
        bridge.set_scroll_offset(4000.0, &layout());
        let shrunk = LayoutConfig::new(10);
        assert_eq!(bridge.reclamp(&shrunk).map(|s| s.scroll_offset), Some(528.0));
    }

    #[test]
    fn viewport_height_change() {
        let mut bridge = ScrollBridge::new(BridgeConfig::default(), 480.0);
        assert!(!bridge.set_viewport_height(480.0));
        assert!(bridge.set_viewport_height(600.0));
        assert_eq!(bridge.viewport().viewport_height, 600.0);
    }
}
