#![forbid(unsafe_code)]

//! Host-facing table options.
//!
//! [`TableOptions`] carries every recognized option with its documented
//! default. [`TableOptions::layout`] resolves them into a validated
//! [`LayoutConfig`]; [`TableOptions::bridge_config`] into the scroll bridge
//! configuration.
//!
//! # Defaults
//!
//! | Option | Default |
//! |--------|---------|
//! | `row_height` | 48 |
//! | `header_height` | 48 |
//! | `buffer_size` | 25 chunked, 10 continuous |
//! | `chunk_size` | 75 |
//! | `items_length` | absent (zero rows) |
//! | `rebuild_threshold` | 100 |
//! | `debounce` | 50ms |

use core::time::Duration;

use rowport_core::layout::{
    DEFAULT_BUFFER_LENGTH, DEFAULT_CHUNK_BUFFER, DEFAULT_CHUNK_SIZE, DEFAULT_HEADER_HEIGHT,
    DEFAULT_REBUILD_THRESHOLD, DEFAULT_ROW_HEIGHT,
};
use rowport_core::{LayoutConfig, LayoutError, WindowStrategy, convert_to_unit};
use rowport_runtime::BridgeConfig;
use rowport_runtime::bridge::DEFAULT_SCROLL_DEBOUNCE;

/// Which windowing strategy a table uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StrategyKind {
    /// Fixed-size chunks with adjacent-chunk reuse.
    #[default]
    Chunked,
    /// A sliding window shifted row by row.
    Continuous,
}

/// Options recognized by [`crate::VirtualTable`].
#[derive(Debug, Clone, PartialEq)]
pub struct TableOptions {
    /// Row height in pixels.
    pub row_height: f64,
    /// Header height in pixels.
    pub header_height: f64,
    /// Buffer rows; `None` picks the strategy's default.
    pub buffer_size: Option<usize>,
    /// Rows per chunk (chunked strategy).
    pub chunk_size: usize,
    /// Number of rows; absent means zero rows.
    pub items_length: Option<usize>,
    /// Wrapper height as given by the host, e.g. `"400"` or `"50vh"`.
    pub height: Option<String>,
    /// Windowing strategy.
    pub strategy: StrategyKind,
    /// Start-index jump beyond which the continuous cache is rebuilt.
    pub rebuild_threshold: usize,
    /// Quiet window for native scroll notifications.
    pub debounce: Duration,
    /// Accept wheel input for scroll emulation.
    pub wheel: bool,
    /// Render the scroller track beside the table.
    pub scroller: bool,
    /// Extra classes on the root element.
    pub classes: Vec<String>,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            row_height: DEFAULT_ROW_HEIGHT,
            header_height: DEFAULT_HEADER_HEIGHT,
            buffer_size: None,
            chunk_size: DEFAULT_CHUNK_SIZE,
            items_length: None,
            height: None,
            strategy: StrategyKind::Chunked,
            rebuild_threshold: DEFAULT_REBUILD_THRESHOLD,
            debounce: DEFAULT_SCROLL_DEBOUNCE,
            wheel: false,
            scroller: false,
            classes: Vec::new(),
        }
    }
}

impl TableOptions {
    /// Default options for `items_length` rows.
    #[must_use]
    pub fn new(items_length: usize) -> Self {
        Self::default().with_items_length(items_length)
    }

    /// Set the row height.
    #[must_use]
    pub fn with_row_height(mut self, row_height: f64) -> Self {
        self.row_height = row_height;
        self
    }

    /// Set the header height.
    #[must_use]
    pub fn with_header_height(mut self, header_height: f64) -> Self {
        self.header_height = header_height;
        self
    }

    /// Set the buffer size.
    #[must_use]
    pub fn with_buffer_size(mut self, buffer_size: usize) -> Self {
        self.buffer_size = Some(buffer_size);
        self
    }

    /// Set the chunk size.
    #[must_use]
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    /// Set the number of rows.
    #[must_use]
    pub fn with_items_length(mut self, items_length: usize) -> Self {
        self.items_length = Some(items_length);
        self
    }

    /// Set the wrapper height.
    #[must_use]
    pub fn with_height(mut self, height: impl Into<String>) -> Self {
        self.height = Some(height.into());
        self
    }

    /// Select the windowing strategy.
    #[must_use]
    pub fn with_strategy(mut self, strategy: StrategyKind) -> Self {
        self.strategy = strategy;
        self
    }

    /// Set the continuous rebuild threshold.
    #[must_use]
    pub fn with_rebuild_threshold(mut self, rebuild_threshold: usize) -> Self {
        self.rebuild_threshold = rebuild_threshold;
        self
    }

    /// Set the scroll debounce window.
    #[must_use]
    pub fn with_debounce(mut self, debounce: Duration) -> Self {
        self.debounce = debounce;
        self
    }

    /// Enable wheel emulation.
    #[must_use]
    pub fn with_wheel(mut self, wheel: bool) -> Self {
        self.wheel = wheel;
        self
    }

    /// Render the scroller track.
    #[must_use]
    pub fn with_scroller(mut self, scroller: bool) -> Self {
        self.scroller = scroller;
        self
    }

    /// Add a class to the root element.
    #[must_use]
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    /// The configured windowing strategy with its defaults filled in.
    #[must_use]
    pub fn window_strategy(&self) -> WindowStrategy {
        match self.strategy {
            StrategyKind::Chunked => WindowStrategy::Chunked {
                chunk_size: self.chunk_size,
                buffer_size: self.buffer_size.unwrap_or(DEFAULT_CHUNK_BUFFER),
            },
            StrategyKind::Continuous => WindowStrategy::Continuous {
                buffer_length: self.buffer_size.unwrap_or(DEFAULT_BUFFER_LENGTH),
                rebuild_threshold: self.rebuild_threshold,
            },
        }
    }

    /// Resolve and validate the layout.
    pub fn layout(&self) -> Result<LayoutConfig, LayoutError> {
        let layout = LayoutConfig::new(self.items_length.unwrap_or(0))
            .with_row_height(self.row_height)
            .with_header_height(self.header_height)
            .with_strategy(self.window_strategy());
        layout.validate()?;
        Ok(layout)
    }

    /// Scroll bridge configuration.
    #[must_use]
    pub fn bridge_config(&self) -> BridgeConfig {
        BridgeConfig::default()
            .with_debounce(self.debounce)
            .with_wheel(self.wheel)
    }

    /// Wrapper height as a CSS length, if one is set.
    #[must_use]
    pub fn wrapper_height(&self) -> Option<String> {
        convert_to_unit(self.height.as_deref(), "px")
    }
}
