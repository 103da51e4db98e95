#![forbid(unsafe_code)]

//! Window geometry.
//!
//! Pure functions that turn a scroll offset into the index range of rows to
//! materialize and the pixel heights of the spacers above and below them.
//!
//! # Invariants
//!
//! - `0 <= start_index <= stop_index <= items_length`.
//! - `offset_top + rows * row_height + offset_bottom == items_length * row_height`
//!   whenever the window is not clamped at the end of the dataset.
//! - Identical inputs yield identical outputs.
//!
//! # Failure Modes
//!
//! | Condition | Behavior |
//! |-----------|----------|
//! | `items_length == 0` | Empty window, zero offsets |
//! | `row_height <= 0` or not finite | Empty window, zero offsets |
//! | Negative or non-finite scroll offset | Treated as `0` |
//! | Scroll offset past the end | Clamped to the total height |

use std::ops::Range;

use crate::layout::{LayoutConfig, ViewportState, WindowStrategy, non_negative};

/// The contiguous run of rows to materialize plus its spacer heights.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct WindowRange {
    /// First rendered row (inclusive).
    pub start_index: usize,
    /// Last rendered row (exclusive).
    pub stop_index: usize,
    /// Height of the leading spacer, in pixels.
    pub offset_top: f64,
    /// Height of the trailing spacer, in pixels.
    pub offset_bottom: f64,
    /// Chunk containing the window, for chunked layouts.
    pub chunk_index: Option<usize>,
}

impl WindowRange {
    /// A window that renders nothing.
    pub const EMPTY: Self = Self {
        start_index: 0,
        stop_index: 0,
        offset_top: 0.0,
        offset_bottom: 0.0,
        chunk_index: None,
    };

    /// Number of rows in the window.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.stop_index.saturating_sub(self.start_index)
    }

    /// Whether the window renders no rows.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.stop_index <= self.start_index
    }

    /// Row indices covered by the window.
    #[must_use]
    pub const fn indices(&self) -> Range<usize> {
        self.start_index..self.stop_index
    }

    /// Whether `index` is rendered by this window.
    #[must_use]
    pub const fn contains(&self, index: usize) -> bool {
        index >= self.start_index && index < self.stop_index
    }
}

/// Total scrollable height: every row plus the header.
#[must_use]
pub fn total_height(layout: &LayoutConfig) -> f64 {
    let header = non_negative(layout.header_height);
    if !layout.has_valid_row_height() {
        return header;
    }
    layout.items_length as f64 * layout.row_height + header
}

/// Clamp a raw scroll offset into `[0, total_height]`.
#[must_use]
pub fn clamp_scroll_offset(offset: f64, layout: &LayoutConfig) -> f64 {
    non_negative(offset).min(total_height(layout))
}

/// Rows materialized by the continuous strategy: the rows that fit in the
/// viewport (rounded up) plus the buffer.
#[must_use]
pub fn visible_rows(viewport_height: f64, row_height: f64, buffer_length: usize) -> usize {
    if !(row_height.is_finite() && row_height > 0.0) {
        return 0;
    }
    to_index((non_negative(viewport_height) / row_height).ceil()).saturating_add(buffer_length)
}

/// Derive the window for `viewport` under `layout`.
#[must_use]
pub fn compute_window(viewport: &ViewportState, layout: &LayoutConfig) -> WindowRange {
    let items = layout.items_length;
    if items == 0 || !layout.has_valid_row_height() {
        return WindowRange::EMPTY;
    }

    let row_height = layout.row_height;
    let scroll = clamp_scroll_offset(viewport.scroll_offset, layout);

    match layout.strategy {
        WindowStrategy::Chunked {
            chunk_size,
            buffer_size,
        } => {
            let step = chunk_size
                .saturating_sub(buffer_size.saturating_mul(2))
                .max(1);
            // The header adds scroll height past the last row; keep the last
            // row's chunk reachable instead of running off the end.
            let top_index = to_index((scroll / row_height).floor()).min(items - 1);
            let chunk_index = top_index / step;
            let start_index = chunk_index * step;
            let stop_index = start_index.saturating_add(chunk_size).min(items);
            let offset_top = start_index as f64 * row_height;
            let offset_bottom =
                non_negative(items.saturating_sub(chunk_size) as f64 * row_height - offset_top);

            WindowRange {
                start_index,
                stop_index,
                offset_top,
                offset_bottom,
                chunk_index: Some(chunk_index),
            }
        }
        WindowStrategy::Continuous { buffer_length, .. } => {
            let buffer_height = buffer_length as f64 * row_height / 2.0;
            let start_index = to_index(((scroll - buffer_height) / row_height).ceil()).min(items);
            let rows = visible_rows(viewport.viewport_height, row_height, buffer_length);
            let stop_index = start_index.saturating_add(rows).min(items);
            let offset_top = start_index as f64 * row_height;
            let offset_bottom =
                non_negative(items.saturating_sub(rows) as f64 * row_height - offset_top);

            WindowRange {
                start_index,
                stop_index,
                offset_top,
                offset_bottom,
                chunk_index: None,
            }
        }
    }
}

/// Saturating float-to-index conversion; negative and NaN map to `0`.
#[inline]
fn to_index(value: f64) -> usize {
    if value.is_nan() || value <= 0.0 {
        0
    } else {
        value as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn continuous(items: usize) -> LayoutConfig {
        LayoutConfig::new(items).with_strategy(WindowStrategy::continuous())
    }

    #[test]
    fn total_height_includes_header() {
        assert_eq!(total_height(&LayoutConfig::new(1000)), 48_048.0);
        assert_eq!(total_height(&LayoutConfig::new(0)), 48.0);
    }

    #[test]
    fn continuous_window_at_top() {
        let window = compute_window(&ViewportState::new(0.0, 480.0), &continuous(1000));
        assert_eq!(window.start_index, 0);
        assert_eq!(window.stop_index, 20);
        assert_eq!(window.offset_top, 0.0);
        assert_eq!(window.chunk_index, None);
    }

    #[test]
    fn continuous_window_after_scroll() {
        let window = compute_window(&ViewportState::new(480.0, 480.0), &continuous(1000));
        assert_eq!(window.start_index, 5);
        assert_eq!(window.stop_index, 25);
        assert_eq!(window.offset_top, 240.0);
        assert_eq!(window.offset_bottom, (1000.0 - 20.0) * 48.0 - 240.0);
    }

    #[test]
    fn continuous_buffer_hides_small_scrolls() {
        // Half the buffer sits above the viewport; scrolling less than that
        // keeps the window at the first row.
        let window = compute_window(&ViewportState::new(200.0, 480.0), &continuous(1000));
        assert_eq!(window.start_index, 0);
    }

    #[test]
    fn visible_rows_rounds_partial_rows_up() {
        assert_eq!(visible_rows(480.0, 48.0, 10), 20);
        assert_eq!(visible_rows(500.0, 48.0, 10), 21);
        assert_eq!(visible_rows(0.0, 48.0, 4), 4);
        assert_eq!(visible_rows(480.0, 0.0, 4), 0);
    }

    #[test]
    fn chunked_window_example() {
        let layout = LayoutConfig::new(1000);
        let window = compute_window(&ViewportState::new(1200.0, 480.0), &layout);
        assert_eq!(window.chunk_index, Some(1));
        assert_eq!(window.start_index, 25);
        assert_eq!(window.stop_index, 100);
        assert_eq!(window.offset_top, 1200.0);
    }

    #[test]
    fn chunked_window_clamps_stop_to_items() {
        let layout = LayoutConfig::new(90);
        let window = compute_window(&ViewportState::new(1200.0, 480.0), &layout);
        assert_eq!(window.start_index, 25);
        assert_eq!(window.stop_index, 90);
    }

    #[test]
    fn chunked_window_stays_in_chunk_until_step() {
        let layout = LayoutConfig::new(1000);
        let a = compute_window(&ViewportState::new(0.0, 480.0), &layout);
        let b = compute_window(&ViewportState::new(24.0 * 48.0, 480.0), &layout);
        let c = compute_window(&ViewportState::new(25.0 * 48.0, 480.0), &layout);
        assert_eq!(a.chunk_index, Some(0));
        assert_eq!(b.chunk_index, Some(0));
        assert_eq!(c.chunk_index, Some(1));
        assert_eq!(a, b);
    }

    #[test]
    fn empty_dataset_renders_nothing() {
        for layout in [LayoutConfig::new(0), continuous(0)] {
            let window = compute_window(&ViewportState::new(500.0, 480.0), &layout);
            assert_eq!(window, WindowRange::EMPTY);
            assert!(window.is_empty());
        }
    }

    #[test]
    fn invalid_row_height_degrades_to_empty() {
        let layout = LayoutConfig::new(100).with_row_height(0.0);
        assert_eq!(
            compute_window(&ViewportState::new(0.0, 480.0), &layout),
            WindowRange::EMPTY
        );
        assert_eq!(total_height(&layout), 48.0);
    }

    #[test]
    fn scroll_past_end_is_clamped() {
        let layout = LayoutConfig::new(100);
        let window = compute_window(&ViewportState::new(1.0e12, 480.0), &layout);
        assert!(window.start_index < 100);
        assert_eq!(window.stop_index, 100);

        let layout = continuous(100);
        let window = compute_window(&ViewportState::new(1.0e12, 480.0), &layout);
        assert!(window.start_index <= window.stop_index);
        assert_eq!(window.stop_index, 100);
    }

    #[test]
    fn clamp_scroll_offset_bounds() {
        let layout = LayoutConfig::new(10);
        assert_eq!(clamp_scroll_offset(-5.0, &layout), 0.0);
        assert_eq!(clamp_scroll_offset(100.0, &layout), 100.0);
        assert_eq!(clamp_scroll_offset(10_000.0, &layout), 528.0);
    }

    #[test]
    fn window_accessors() {
        let window = WindowRange {
            start_index: 3,
            stop_index: 7,
            ..WindowRange::EMPTY
        };
        assert_eq!(window.len(), 4);
        assert_eq!(window.indices(), 3..7);
        assert!(window.contains(3));
        assert!(!window.contains(7));
    }
}
