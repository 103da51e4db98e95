#![forbid(unsafe_code)]

//! Scroll input delivered by the host.

/// Raw scroll input from the scroll container.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScrollEvent {
    /// Native scroll notification carrying the container's new `scrollTop`.
    Scroll {
        /// Container scroll position, in pixels.
        scroll_top: f64,
    },
    /// Wheel input used for custom scroll emulation.
    Wheel {
        /// Vertical wheel delta, in pixels. Positive scrolls down.
        delta_y: f64,
    },
}

impl ScrollEvent {
    /// Native scroll notification.
    #[must_use]
    pub const fn scroll(scroll_top: f64) -> Self {
        Self::Scroll { scroll_top }
    }

    /// Wheel input.
    #[must_use]
    pub const fn wheel(delta_y: f64) -> Self {
        Self::Wheel { delta_y }
    }
}
