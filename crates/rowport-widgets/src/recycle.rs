#![forbid(unsafe_code)]

//! Window/recycle controller.
//!
//! [`RecycleController`] owns the rendered rows for one table instance and
//! brings them in line with each new [`WindowRange`] while calling the
//! [`RowSource`] as little as possible.
//!
//! # Decision Rule (continuous windows)
//!
//! 1) First update: render every row of the window.
//! 2) `|old_start - new_start| > rebuild_threshold`: drop the cache and render
//!    every row of the window.
//! 3) Otherwise keep the overlap of the old and new ranges, render the rows
//!    that slid in at the head and tail, drop the rows that slid out.
//! 4) Same range: nothing happens.
//!
//! # Decision Rule (chunked windows)
//!
//! 1) First update: render the chunk.
//! 2) One chunk forward: reuse the stored next chunk if present, else render.
//!    The vacated chunk becomes the stored previous chunk; the stored next
//!    chunk is cleared.
//! 3) One chunk back: the mirror image of (2).
//! 4) Any larger jump: render the chunk and drop both stored chunks.
//! 5) Same chunk: nothing happens.
//!
//! # Invariants
//!
//! - After every update the cache holds exactly `stop_index - start_index`
//!   rows and `rows()[i]` is the row for index `start_index + i`.
//! - Rows already present in the cache are never rendered again.
//! - New rows are rendered before the cache is touched, so the cache is never
//!   observed half-shifted.
//! - A [`RowSource::render_range`] result of the wrong length is fitted to
//!   the window: extra rows are dropped, missing rows are rendered one by one.

use std::collections::VecDeque;
use std::ops::Range;

use rowport_core::{WindowRange, WindowStrategy, debug, trace, warn};

use crate::row_source::RowSource;

/// What an update did to the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecycleAction {
    /// The cache already matched the window.
    Unchanged,
    /// Every row of the window was rendered from scratch.
    Rebuilt,
    /// The window slid toward higher indices.
    ShiftedDown {
        /// Rows rendered for the indices that slid into view.
        rendered: usize,
    },
    /// The window slid toward lower indices.
    ShiftedUp {
        /// Rows rendered for the indices that slid into view.
        rendered: usize,
    },
    /// The window kept its start but changed length.
    Resized {
        /// Rows rendered at the tail.
        rendered: usize,
    },
    /// Advanced one chunk and reused the stored next chunk.
    ReusedNextChunk,
    /// Retreated one chunk and reused the stored previous chunk.
    ReusedPreviousChunk,
    /// Moved one chunk with no stored copy, so the chunk was rendered.
    RenderedChunk,
}

impl RecycleAction {
    /// Whether the update changed the rendered rows.
    #[must_use]
    pub const fn is_change(&self) -> bool {
        !matches!(self, Self::Unchanged)
    }
}

/// Counters describing how much work the controller has done.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecycleStats {
    /// Rows produced by the row source.
    pub rows_rendered: u64,
    /// Full renders of the window (first render, large jumps, fresh chunks).
    pub rebuilds: u64,
    /// Incremental head/tail shifts.
    pub shifts: u64,
    /// Adjacent chunks reused without rendering.
    pub chunk_reuses: u64,
}

#[derive(Debug, Clone)]
struct Chunk<R> {
    range: Range<usize>,
    rows: VecDeque<R>,
}

/// Owns the rendered rows of one table and recycles them across updates.
#[derive(Debug, Clone)]
pub struct RecycleController<R> {
    rows: VecDeque<R>,
    range: Range<usize>,
    initialized: bool,
    /// Chunk the cache holds, when the last update was chunked.
    chunk: Option<usize>,
    previous: Option<Chunk<R>>,
    next: Option<Chunk<R>>,
    stats: RecycleStats,
}

impl<R> Default for RecycleController<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R> RecycleController<R> {
    /// Create an empty, uninitialized controller.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rows: VecDeque::new(),
            range: 0..0,
            initialized: false,
            chunk: None,
            previous: None,
            next: None,
            stats: RecycleStats::default(),
        }
    }

    /// Bring the cache in line with `window`.
    pub fn update<S>(
        &mut self,
        window: &WindowRange,
        strategy: &WindowStrategy,
        source: &mut S,
    ) -> RecycleAction
    where
        S: RowSource<Row = R> + ?Sized,
    {
        let target = window.indices();
        match (window.chunk_index, *strategy) {
            (Some(chunk), WindowStrategy::Chunked { .. }) => {
                self.update_chunked(chunk, target, source)
            }
            (
                _,
                WindowStrategy::Continuous {
                    rebuild_threshold, ..
                },
            ) => self.update_continuous(target, rebuild_threshold, source),
            // A chunked layout that degraded to an empty window.
            (None, WindowStrategy::Chunked { .. }) => self.update_continuous(target, 0, source),
        }
    }

    /// Drop every cached row, including stored adjacent chunks.
    pub fn invalidate(&mut self) {
        self.rows.clear();
        self.range = 0..0;
        self.initialized = false;
        self.chunk = None;
        self.previous = None;
        self.next = None;
    }

    /// Rendered rows, in index order.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = &R> + DoubleEndedIterator + '_ {
        self.rows.iter()
    }

    /// The row for absolute index `index`, if cached.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&R> {
        if self.range.contains(&index) {
            self.rows.get(index - self.range.start)
        } else {
            None
        }
    }

    /// Index range the cache represents.
    #[must_use]
    pub fn range(&self) -> Range<usize> {
        self.range.clone()
    }

    /// Number of cached rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether no rows are cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Whether at least one update has populated the cache.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Chunk held by the cache, when the last update was chunked.
    #[must_use]
    pub fn chunk_index(&self) -> Option<usize> {
        self.chunk
    }

    /// Range of the stored previous chunk.
    #[must_use]
    pub fn previous_chunk(&self) -> Option<Range<usize>> {
        self.previous.as_ref().map(|c| c.range.clone())
    }

    /// Range of the stored next chunk.
    #[must_use]
    pub fn next_chunk(&self) -> Option<Range<usize>> {
        self.next.as_ref().map(|c| c.range.clone())
    }

    /// Work counters.
    #[must_use]
    pub fn stats(&self) -> RecycleStats {
        self.stats
    }

    fn update_continuous<S>(
        &mut self,
        target: Range<usize>,
        rebuild_threshold: usize,
        source: &mut S,
    ) -> RecycleAction
    where
        S: RowSource<Row = R> + ?Sized,
    {
        // Adjacent chunks only make sense while chunking.
        self.chunk = None;
        self.previous = None;
        self.next = None;

        if !self.initialized {
            return self.rebuild(target, source);
        }

        let old = self.range.clone();
        if old == target {
            return RecycleAction::Unchanged;
        }

        let diff = old.start.abs_diff(target.start);
        if diff > rebuild_threshold {
            debug!(diff, rebuild_threshold, "window jump past threshold; rebuilding");
            return self.rebuild(target, source);
        }

        let keep_start = old.start.max(target.start);
        let keep_end = old.end.min(target.end);
        if keep_start >= keep_end {
            return self.rebuild(target, source);
        }

        let head: Vec<R> = (target.start..keep_start)
            .map(|index| source.render_row(index))
            .collect();
        let tail: Vec<R> = (keep_end..target.end)
            .map(|index| source.render_row(index))
            .collect();
        let rendered = head.len() + tail.len();

        // Commit.
        self.rows.drain(..keep_start - old.start);
        self.rows.truncate(keep_end - keep_start);
        for row in head.into_iter().rev() {
            self.rows.push_front(row);
        }
        self.rows.extend(tail);
        self.range = target.clone();

        self.stats.rows_rendered += rendered as u64;
        self.stats.shifts += 1;
        trace!(
            start = target.start,
            stop = target.end,
            rendered,
            "window shifted"
        );

        if target.start > old.start {
            RecycleAction::ShiftedDown { rendered }
        } else if target.start < old.start {
            RecycleAction::ShiftedUp { rendered }
        } else {
            RecycleAction::Resized { rendered }
        }
    }

    fn update_chunked<S>(
        &mut self,
        chunk: usize,
        target: Range<usize>,
        source: &mut S,
    ) -> RecycleAction
    where
        S: RowSource<Row = R> + ?Sized,
    {
        let Some(old) = self.chunk.filter(|_| self.initialized) else {
            self.previous = None;
            self.next = None;
            self.chunk = Some(chunk);
            return self.rebuild(target, source);
        };

        if chunk == old {
            if self.range == target {
                return RecycleAction::Unchanged;
            }
            // Same chunk, different bounds: the dataset changed under us.
            self.previous = None;
            self.next = None;
            return self.rebuild(target, source);
        }

        if chunk == old + 1 {
            let reused = self.next.take().filter(|c| c.range == target);
            let action = self.swap_chunk(target, reused, source, RecycleAction::ReusedNextChunk);
            self.previous = Some(action.1);
            self.chunk = Some(chunk);
            debug!(chunk, action = ?action.0, "advanced one chunk");
            return action.0;
        }

        if old == chunk + 1 {
            let reused = self.previous.take().filter(|c| c.range == target);
            let action =
                self.swap_chunk(target, reused, source, RecycleAction::ReusedPreviousChunk);
            self.next = Some(action.1);
            self.chunk = Some(chunk);
            debug!(chunk, action = ?action.0, "retreated one chunk");
            return action.0;
        }

        debug!(from = old, to = chunk, "chunk jump; dropping adjacent chunks");
        self.previous = None;
        self.next = None;
        self.chunk = Some(chunk);
        self.rebuild(target, source)
    }

    /// Install `reused` (or a freshly rendered chunk) as the cache and hand
    /// back the vacated chunk.
    fn swap_chunk<S>(
        &mut self,
        target: Range<usize>,
        reused: Option<Chunk<R>>,
        source: &mut S,
        reuse_action: RecycleAction,
    ) -> (RecycleAction, Chunk<R>)
    where
        S: RowSource<Row = R> + ?Sized,
    {
        let (rows, action) = match reused {
            Some(chunk) => {
                self.stats.chunk_reuses += 1;
                (chunk.rows, reuse_action)
            }
            None => {
                let rows = self.render_fresh(target.clone(), source);
                (rows, RecycleAction::RenderedChunk)
            }
        };

        // Commit.
        let vacated = Chunk {
            range: std::mem::replace(&mut self.range, target),
            rows: std::mem::replace(&mut self.rows, rows),
        };
        (action, vacated)
    }

    fn rebuild<S>(&mut self, target: Range<usize>, source: &mut S) -> RecycleAction
    where
        S: RowSource<Row = R> + ?Sized,
    {
        let rows = self.render_fresh(target.clone(), source);
        self.rows = rows;
        self.range = target;
        self.initialized = true;
        RecycleAction::Rebuilt
    }

    fn render_fresh<S>(&mut self, target: Range<usize>, source: &mut S) -> VecDeque<R>
    where
        S: RowSource<Row = R> + ?Sized,
    {
        let expected = target.len();
        let mut rows: VecDeque<R> = source.render_range(target.clone()).into();
        if rows.len() != expected {
            warn!(
                start = target.start,
                stop = target.end,
                returned = rows.len(),
                "row source returned the wrong number of rows; fitting to window"
            );
            rows.truncate(expected);
            let missing = target.start + rows.len()..target.end;
            rows.extend(missing.map(|index| source.render_row(index)));
        }
        self.stats.rows_rendered += rows.len() as u64;
        self.stats.rebuilds += 1;
        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::row_source::{FnChunks, FnRows};
    use rowport_core::geometry::compute_window;
    use rowport_core::{LayoutConfig, ViewportState};

    fn window(start: usize, stop: usize) -> WindowRange {
        WindowRange {
            start_index: start,
            stop_index: stop,
            ..WindowRange::EMPTY
        }
    }

    fn chunk_window(chunk: usize, step: usize, size: usize, items: usize) -> WindowRange {
        let start = chunk * step;
        WindowRange {
            start_index: start,
            stop_index: (start + size).min(items),
            chunk_index: Some(chunk),
            ..WindowRange::EMPTY
        }
    }

    fn assert_consistent(controller: &RecycleController<usize>) {
        let range = controller.range();
        assert_eq!(controller.len(), range.len());
        for (offset, row) in controller.rows().enumerate() {
            assert_eq!(*row, range.start + offset);
        }
    }

    #[test]
    fn first_update_renders_window() {
        let mut calls = Vec::new();
        let mut source = FnRows::new(|i: usize| {
            calls.push(i);
            i
        });
        let mut controller = RecycleController::new();
        let action = controller.update(&window(0, 5), &WindowStrategy::continuous(), &mut source);
        assert_eq!(action, RecycleAction::Rebuilt);
        assert_consistent(&controller);
        drop(source);
        assert_eq!(calls, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn same_window_twice_renders_nothing() {
        let mut count = 0;
        let mut source = FnRows::new(|i: usize| {
            count += 1;
            i
        });
        let mut controller = RecycleController::new();
        let strategy = WindowStrategy::continuous();
        controller.update(&window(3, 13), &strategy, &mut source);
        assert_eq!(
            controller.update(&window(3, 13), &strategy, &mut source),
            RecycleAction::Unchanged
        );
        drop(source);
        assert_eq!(count, 10);
    }

    #[test]
    fn single_step_scroll_down_renders_one_row_each() {
        let mut calls = Vec::new();
        let mut source = FnRows::new(|i: usize| {
            calls.push(i);
            i
        });
        let mut controller = RecycleController::new();
        let strategy = WindowStrategy::continuous();
        controller.update(&window(0, 20), &strategy, &mut source);

        for start in 1..=30 {
            let action = controller.update(&window(start, start + 20), &strategy, &mut source);
            assert_eq!(action, RecycleAction::ShiftedDown { rendered: 1 });
            assert_consistent(&controller);
        }
        drop(source);

        let expected: Vec<usize> = (0..50).collect();
        assert_eq!(calls, expected);
        assert_eq!(controller.stats().shifts, 30);
    }

    #[test]
    fn scroll_up_prepends_in_order() {
        let mut calls = Vec::new();
        let mut source = FnRows::new(|i: usize| {
            calls.push(i);
            i
        });
        let mut controller = RecycleController::new();
        let strategy = WindowStrategy::continuous();
        controller.update(&window(40, 60), &strategy, &mut source);

        let action = controller.update(&window(37, 57), &strategy, &mut source);
        assert_eq!(action, RecycleAction::ShiftedUp { rendered: 3 });
        assert_consistent(&controller);
        drop(source);
        assert_eq!(calls[20..], [37, 38, 39]);
    }

    #[test]
    fn jump_past_threshold_rebuilds() {
        let mut calls = 0;
        let mut source = FnRows::new(|i: usize| {
            calls += 1;
            i
        });
        let mut controller = RecycleController::new();
        let strategy = WindowStrategy::continuous();
        controller.update(&window(0, 20), &strategy, &mut source);

        let action = controller.update(&window(101, 121), &strategy, &mut source);
        assert_eq!(action, RecycleAction::Rebuilt);
        assert_consistent(&controller);
        assert_eq!(controller.stats().rebuilds, 2);
        drop(source);
        assert_eq!(calls, 40);
    }

    #[test]
    fn jump_at_threshold_shifts() {
        let mut source = FnRows::new(|i: usize| i);
        let mut controller = RecycleController::new();
        let strategy = WindowStrategy::Continuous {
            buffer_length: 10,
            rebuild_threshold: 100,
        };
        controller.update(&window(0, 150), &strategy, &mut source);
        let action = controller.update(&window(100, 250), &strategy, &mut source);
        assert_eq!(action, RecycleAction::ShiftedDown { rendered: 100 });
        assert_consistent(&controller);
    }

    #[test]
    fn disjoint_shift_below_threshold_renders_fresh() {
        let mut source = FnRows::new(|i: usize| i);
        let mut controller = RecycleController::new();
        let strategy = WindowStrategy::continuous();
        controller.update(&window(0, 20), &strategy, &mut source);
        let action = controller.update(&window(50, 70), &strategy, &mut source);
        assert_eq!(action, RecycleAction::Rebuilt);
        assert_consistent(&controller);
    }

    #[test]
    fn window_growing_at_tail_resizes() {
        let mut calls = Vec::new();
        let mut source = FnRows::new(|i: usize| {
            calls.push(i);
            i
        });
        let mut controller = RecycleController::new();
        let strategy = WindowStrategy::continuous();
        controller.update(&window(5, 25), &strategy, &mut source);

        assert_eq!(
            controller.update(&window(5, 28), &strategy, &mut source),
            RecycleAction::Resized { rendered: 3 }
        );
        assert_eq!(
            controller.update(&window(5, 22), &strategy, &mut source),
            RecycleAction::Resized { rendered: 0 }
        );
        assert_consistent(&controller);
        drop(source);
        assert_eq!(calls[20..], [25, 26, 27]);
    }

    #[test]
    fn shift_near_dataset_end_trims_tail() {
        let mut source = FnRows::new(|i: usize| i);
        let mut controller = RecycleController::new();
        let strategy = WindowStrategy::continuous();
        controller.update(&window(80, 100), &strategy, &mut source);
        let action = controller.update(&window(85, 100), &strategy, &mut source);
        assert_eq!(action, RecycleAction::ShiftedDown { rendered: 0 });
        assert_consistent(&controller);
    }

    #[test]
    fn chunk_forward_then_back_reuses_previous() {
        let mut calls = Vec::new();
        let mut source = FnChunks::new(|range: Range<usize>| {
            calls.push(range.clone());
            range.collect::<Vec<_>>()
        });
        let mut controller = RecycleController::new();
        let strategy = WindowStrategy::chunked();

        assert_eq!(
            controller.update(&chunk_window(0, 25, 75, 1000), &strategy, &mut source),
            RecycleAction::Rebuilt
        );
        assert_eq!(
            controller.update(&chunk_window(1, 25, 75, 1000), &strategy, &mut source),
            RecycleAction::RenderedChunk
        );
        assert_eq!(controller.previous_chunk(), Some(0..75));
        assert_eq!(controller.next_chunk(), None);

        assert_eq!(
            controller.update(&chunk_window(0, 25, 75, 1000), &strategy, &mut source),
            RecycleAction::ReusedPreviousChunk
        );
        assert_consistent(&controller);
        assert_eq!(controller.previous_chunk(), None);
        assert_eq!(controller.next_chunk(), Some(25..100));

        assert_eq!(
            controller.update(&chunk_window(1, 25, 75, 1000), &strategy, &mut source),
            RecycleAction::ReusedNextChunk
        );
        assert_consistent(&controller);
        assert_eq!(controller.stats().chunk_reuses, 2);
        drop(source);
        assert_eq!(calls, vec![0..75, 25..100]);
    }

    #[test]
    fn short_range_result_is_completed_row_by_row() {
        let mut source = FnChunks::new(|range: Range<usize>| {
            if range.len() > 1 {
                range.take(2).collect()
            } else {
                range.collect::<Vec<_>>()
            }
        });
        let mut controller = RecycleController::new();
        let strategy = WindowStrategy::continuous();

        controller.update(&window(10, 20), &strategy, &mut source);
        assert_consistent(&controller);
        assert_eq!(controller.stats().rows_rendered, 10);

        assert_eq!(
            controller.update(&window(15, 25), &strategy, &mut source),
            RecycleAction::ShiftedDown { rendered: 5 }
        );
        assert_consistent(&controller);
    }

    #[test]
    fn long_range_result_is_trimmed() {
        let mut source =
            FnChunks::new(|range: Range<usize>| (range.start..range.end + 5).collect::<Vec<_>>());
        let mut controller = RecycleController::new();
        let strategy = WindowStrategy::chunked();

        controller.update(&chunk_window(1, 25, 75, 1000), &strategy, &mut source);
        assert_consistent(&controller);
        assert_eq!(controller.len(), 75);

        controller.update(&chunk_window(2, 25, 75, 1000), &strategy, &mut source);
        assert_consistent(&controller);
    }

    #[test]
    fn same_chunk_is_unchanged() {
        let mut count = 0;
        let mut source = FnChunks::new(|range: Range<usize>| {
            count += 1;
            range.collect::<Vec<_>>()
        });
        let mut controller = RecycleController::new();
        let strategy = WindowStrategy::chunked();
        let w = chunk_window(2, 25, 75, 1000);
        controller.update(&w, &strategy, &mut source);
        assert_eq!(
            controller.update(&w, &strategy, &mut source),
            RecycleAction::Unchanged
        );
        drop(source);
        assert_eq!(count, 1);
    }

    #[test]
    fn multi_chunk_jump_drops_adjacent_chunks() {
        let mut source = FnRows::new(|i: usize| i);
        let mut controller = RecycleController::new();
        let strategy = WindowStrategy::chunked();
        controller.update(&chunk_window(0, 25, 75, 1000), &strategy, &mut source);
        controller.update(&chunk_window(1, 25, 75, 1000), &strategy, &mut source);
        assert!(controller.previous_chunk().is_some());

        assert_eq!(
            controller.update(&chunk_window(5, 25, 75, 1000), &strategy, &mut source),
            RecycleAction::Rebuilt
        );
        assert_eq!(controller.previous_chunk(), None);
        assert_eq!(controller.next_chunk(), None);

        // Back one chunk: nothing stored, so it renders.
        assert_eq!(
            controller.update(&chunk_window(4, 25, 75, 1000), &strategy, &mut source),
            RecycleAction::RenderedChunk
        );
        assert_consistent(&controller);
    }

    #[test]
    fn stale_stored_chunk_is_not_reused() {
        let mut source = FnRows::new(|i: usize| i);
        let mut controller = RecycleController::new();
        let strategy = WindowStrategy::chunked();
        controller.update(&chunk_window(0, 25, 75, 1000), &strategy, &mut source);
        controller.update(&chunk_window(1, 25, 75, 1000), &strategy, &mut source);
        // The dataset shrank; chunk 0 now ends earlier than the stored copy.
        let action = controller.update(&chunk_window(0, 25, 75, 60), &strategy, &mut source);
        assert_eq!(action, RecycleAction::RenderedChunk);
        assert_consistent(&controller);
    }

    #[test]
    fn switching_strategy_does_not_reuse_chunks() {
        let mut source = FnRows::new(|i: usize| i);
        let mut controller = RecycleController::new();
        controller.update(
            &chunk_window(1, 25, 75, 1000),
            &WindowStrategy::chunked(),
            &mut source,
        );
        controller.update(&window(30, 50), &WindowStrategy::continuous(), &mut source);
        assert_eq!(controller.chunk_index(), None);
        assert_consistent(&controller);

        let action = controller.update(
            &chunk_window(2, 25, 75, 1000),
            &WindowStrategy::chunked(),
            &mut source,
        );
        assert_eq!(action, RecycleAction::Rebuilt);
        assert_consistent(&controller);
    }

    #[test]
    fn invalidate_forces_rebuild() {
        let mut source = FnRows::new(|i: usize| i);
        let mut controller = RecycleController::new();
        let strategy = WindowStrategy::continuous();
        controller.update(&window(0, 10), &strategy, &mut source);
        controller.invalidate();
        assert!(!controller.is_initialized());
        assert!(controller.is_empty());
        assert_eq!(
            controller.update(&window(0, 10), &strategy, &mut source),
            RecycleAction::Rebuilt
        );
    }

    #[test]
    fn empty_window_clears_cache() {
        let mut source = FnRows::new(|i: usize| i);
        let mut controller = RecycleController::new();
        let strategy = WindowStrategy::chunked();
        controller.update(&chunk_window(0, 25, 75, 1000), &strategy, &mut source);
        controller.update(&WindowRange::EMPTY, &strategy, &mut source);
        assert!(controller.is_empty());
        assert_eq!(controller.range(), 0..0);
    }

    #[test]
    fn get_by_absolute_index() {
        let mut source = FnRows::new(|i: usize| i * 2);
        let mut controller = RecycleController::new();
        controller.update(&window(10, 15), &WindowStrategy::continuous(), &mut source);
        assert_eq!(controller.get(12), Some(&24));
        assert_eq!(controller.get(9), None);
        assert_eq!(controller.get(15), None);
    }

    #[test]
    fn driven_by_geometry_scroll_sequence() {
        let layout = LayoutConfig::new(1000).with_strategy(WindowStrategy::continuous());
        let mut calls = 0usize;
        let mut source = FnRows::new(|i: usize| {
            calls += 1;
            i
        });
        let mut controller = RecycleController::new();

        for step in 0..50 {
            let viewport = ViewportState::new(f64::from(step) * 48.0 + 240.0, 480.0);
            let w = compute_window(&viewport, &layout);
            controller.update(&w, &layout.strategy, &mut source);
            assert_consistent(&controller);
        }
        drop(source);
        // 20 rows up front, then one per step after the buffer is exhausted.
        assert_eq!(calls, 20 + 49);
    }

    #[test]
    fn action_is_change() {
        assert!(!RecycleAction::Unchanged.is_change());
        assert!(RecycleAction::Rebuilt.is_change());
        assert!(RecycleAction::ShiftedDown { rendered: 0 }.is_change());
    }
}
