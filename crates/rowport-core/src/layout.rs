#![forbid(unsafe_code)]

//! Viewport state and layout configuration.
//!
//! [`LayoutConfig`] is immutable for the duration of one render cycle. It
//! carries the fixed row height, the header height folded into the total
//! scroll height, the item count, and the [`WindowStrategy`] that decides how
//! the rendered window is shaped.
//!
//! [`ViewportState`] is the only value that changes while the user scrolls.

use std::fmt;

/// Default fixed row height in pixels.
pub const DEFAULT_ROW_HEIGHT: f64 = 48.0;
/// Default header height in pixels.
pub const DEFAULT_HEADER_HEIGHT: f64 = 48.0;
/// Default rows per chunk for [`WindowStrategy::Chunked`].
pub const DEFAULT_CHUNK_SIZE: usize = 75;
/// Default rows of overlap on each side of a chunk.
pub const DEFAULT_CHUNK_BUFFER: usize = 25;
/// Default buffer rows for [`WindowStrategy::Continuous`].
pub const DEFAULT_BUFFER_LENGTH: usize = 10;
/// Default start-index jump above which the continuous window is rebuilt.
pub const DEFAULT_REBUILD_THRESHOLD: usize = 100;

/// Scroll position and visible height of the scroll container, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ViewportState {
    /// Distance scrolled from the top of the content.
    pub scroll_offset: f64,
    /// Height of the visible region.
    pub viewport_height: f64,
}

impl ViewportState {
    /// Create a viewport state. Negative or non-finite inputs collapse to `0`.
    #[must_use]
    pub fn new(scroll_offset: f64, viewport_height: f64) -> Self {
        Self {
            scroll_offset: non_negative(scroll_offset),
            viewport_height: non_negative(viewport_height),
        }
    }

    /// Return a copy with a different scroll offset.
    #[must_use]
    pub fn with_scroll_offset(self, scroll_offset: f64) -> Self {
        Self {
            scroll_offset: non_negative(scroll_offset),
            ..self
        }
    }
}

/// How the rendered window is derived from the scroll offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")
)]
pub enum WindowStrategy {
    /// Render whole chunks of `chunk_size` rows. Consecutive chunks overlap by
    /// `2 * buffer_size` rows, so the window advances in steps of
    /// `chunk_size - 2 * buffer_size`. Adjacent chunks are kept for reuse when
    /// the user reverses direction.
    Chunked {
        /// Rows per chunk.
        chunk_size: usize,
        /// Rows of overlap on each side of a chunk.
        buffer_size: usize,
    },
    /// Render the visible rows plus `buffer_length` rows, half above and half
    /// below, shifting row by row as the user scrolls.
    Continuous {
        /// Extra rows rendered around the visible rows.
        buffer_length: usize,
        /// Start-index jump above which the window is rebuilt from scratch.
        rebuild_threshold: usize,
    },
}

impl WindowStrategy {
    /// Chunked strategy with default chunk and buffer sizes.
    #[must_use]
    pub const fn chunked() -> Self {
        Self::Chunked {
            chunk_size: DEFAULT_CHUNK_SIZE,
            buffer_size: DEFAULT_CHUNK_BUFFER,
        }
    }

    /// Continuous strategy with default buffer length and rebuild threshold.
    #[must_use]
    pub const fn continuous() -> Self {
        Self::Continuous {
            buffer_length: DEFAULT_BUFFER_LENGTH,
            rebuild_threshold: DEFAULT_REBUILD_THRESHOLD,
        }
    }

    /// Rows the window advances per chunk, never zero.
    ///
    /// Returns `None` for the continuous strategy.
    #[must_use]
    pub fn chunk_step(&self) -> Option<usize> {
        match *self {
            Self::Chunked {
                chunk_size,
                buffer_size,
            } => Some(
                chunk_size
                    .saturating_sub(buffer_size.saturating_mul(2))
                    .max(1),
            ),
            Self::Continuous { .. } => None,
        }
    }

    /// Whether this is the chunked strategy.
    #[must_use]
    pub const fn is_chunked(&self) -> bool {
        matches!(self, Self::Chunked { .. })
    }
}

impl Default for WindowStrategy {
    fn default() -> Self {
        Self::chunked()
    }
}

/// Fixed-row-height layout for one render cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
pub struct LayoutConfig {
    /// Height of every row, in pixels.
    pub row_height: f64,
    /// Height of the table header, in pixels.
    pub header_height: f64,
    /// Number of rows in the dataset.
    pub items_length: usize,
    /// Window shape.
    pub strategy: WindowStrategy,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            row_height: DEFAULT_ROW_HEIGHT,
            header_height: DEFAULT_HEADER_HEIGHT,
            items_length: 0,
            strategy: WindowStrategy::default(),
        }
    }
}

impl LayoutConfig {
    /// Create a default layout over `items_length` rows.
    #[must_use]
    pub fn new(items_length: usize) -> Self {
        Self {
            items_length,
            ..Self::default()
        }
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

    /// Set the item count.
    #[must_use]
    pub fn with_items_length(mut self, items_length: usize) -> Self {
        self.items_length = items_length;
        self
    }

    /// Set the window strategy.
    #[must_use]
    pub fn with_strategy(mut self, strategy: WindowStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Check the layout for values the geometry would have to paper over.
    ///
    /// Geometry never fails on an invalid layout; it degrades to an empty
    /// window. Hosts that want to surface configuration mistakes call this.
    pub fn validate(&self) -> Result<(), LayoutError> {
        if !(self.row_height.is_finite() && self.row_height > 0.0) {
            return Err(LayoutError::InvalidRowHeight(self.row_height));
        }
        if !(self.header_height.is_finite() && self.header_height >= 0.0) {
            return Err(LayoutError::InvalidHeaderHeight(self.header_height));
        }
        if let WindowStrategy::Chunked {
            chunk_size,
            buffer_size,
        } = self.strategy
            && chunk_size <= buffer_size.saturating_mul(2)
        {
            return Err(LayoutError::ChunkTooSmall {
                chunk_size,
                buffer_size,
            });
        }
        Ok(())
    }

    /// Whether rows have a usable height.
    #[must_use]
    pub fn has_valid_row_height(&self) -> bool {
        self.row_height.is_finite() && self.row_height > 0.0
    }
}

/// Layout configuration error.
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutError {
    /// Row height is zero, negative, or not finite.
    InvalidRowHeight(f64),
    /// Header height is negative or not finite.
    InvalidHeaderHeight(f64),
    /// A chunk must be larger than its two buffers combined.
    ChunkTooSmall {
        /// Configured chunk size.
        chunk_size: usize,
        /// Configured buffer size.
        buffer_size: usize,
    },
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRowHeight(h) => write!(f, "row height must be positive, got {h}"),
            Self::InvalidHeaderHeight(h) => {
                write!(f, "header height must be non-negative, got {h}")
            }
            Self::ChunkTooSmall {
                chunk_size,
                buffer_size,
            } => write!(
                f,
                "chunk size {chunk_size} must exceed twice the buffer size {buffer_size}"
            ),
        }
    }
}

impl std::error::Error for LayoutError {}

#[inline]
pub(crate) fn non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}
