#![forbid(unsafe_code)]

//! Core: window geometry, layout configuration, and logging.
//!
//! Everything in this crate is pure. Given a [`ViewportState`] and a
//! [`LayoutConfig`], [`geometry::compute_window`] derives the [`WindowRange`]
//! of rows to materialize together with the spacer heights that stand in for
//! the rows outside it.

pub mod geometry;
pub mod layout;
pub mod logging;
pub mod unit;

pub use geometry::{WindowRange, compute_window, total_height};
pub use layout::{LayoutConfig, LayoutError, ViewportState, WindowStrategy};
pub use unit::{convert_to_unit, px};

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{
    debug, debug_span, error, error_span, info, info_span, trace, trace_span, warn, warn_span,
};
