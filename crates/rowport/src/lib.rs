#![forbid(unsafe_code)]

//! Rowport public facade crate.
//!
//! Re-exports the common types from the internal crates and offers a small
//! prelude for hosts embedding a virtual table.
//!
//! ```
//! use rowport::prelude::*;
//!
//! let options = TableOptions::new(1_000).with_strategy(StrategyKind::Continuous);
//! let mut table = VirtualTable::new(options, FnRows::new(|i: usize| i), 480.0)?;
//!
//! table.scroll_to(480.0);
//! assert_eq!(table.window().indices(), 5..25);
//! # Ok::<(), rowport::Error>(())
//! ```

use std::fmt;

// --- Core re-exports -------------------------------------------------------

pub use rowport_core::geometry::clamp_scroll_offset;
pub use rowport_core::{
    LayoutConfig, LayoutError, ViewportState, WindowRange, WindowStrategy, compute_window,
    convert_to_unit, px, total_height,
};

// --- Runtime re-exports ----------------------------------------------------

pub use rowport_runtime::{
    BridgeConfig, Clock, Debouncer, HostError, ListenerId, ListenerKind, ListenerOptions,
    ManualClock, MemoryHost, ScrollBridge, ScrollEvent, ScrollHost, ScrollListeners,
    ScrollTarget, SystemClock,
};

// --- Widget re-exports -----------------------------------------------------

pub use rowport_widgets::{
    Element, FnChunks, FnRows, Node, RecycleAction, RecycleController, RecycleStats, RowSource,
    Slots, StaticBody, StrategyKind, TableBody, TableOptions, TableShell, VirtualTable,
};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for rowport hosts.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Table options failed validation.
    Layout(LayoutError),
    /// The host surface refused an operation.
    Host(HostError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Layout(err) => write!(f, "invalid layout: {err}"),
            Self::Host(err) => write!(f, "host error: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Layout(err) => Some(err),
            Self::Host(err) => Some(err),
        }
    }
}

impl From<LayoutError> for Error {
    fn from(err: LayoutError) -> Self {
        Self::Layout(err)
    }
}

impl From<HostError> for Error {
    fn from(err: HostError) -> Self {
        Self::Host(err)
    }
}

/// Standard result type for rowport APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Error, FnChunks, FnRows, LayoutConfig, MemoryHost, Node, Result, RowSource, ScrollEvent,
        ScrollHost, StrategyKind, TableOptions, ViewportState, VirtualTable, WindowRange,
        WindowStrategy,
    };

    pub use crate::{core, runtime, widgets};
}

pub use rowport_core as core;
pub use rowport_runtime as runtime;
pub use rowport_widgets as widgets;
