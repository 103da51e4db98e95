#![forbid(unsafe_code)]

//! Row sources: how the windowing engine obtains row nodes.
//!
//! A [`RowSource`] must be pure with respect to the index: rendering the same
//! index twice yields equivalent nodes, because rendered rows are cached and
//! reused across renders.

use std::ops::Range;

/// Produces host row nodes on demand.
pub trait RowSource {
    /// Host node type for one row.
    type Row;

    /// Render the row at `index`.
    fn render_row(&mut self, index: usize) -> Self::Row;

    /// Render every row in `range`, in order.
    ///
    /// Chunked windows call this once per chunk. The default renders row by
    /// row; sources with a cheaper bulk path override it.
    fn render_range(&mut self, range: Range<usize>) -> Vec<Self::Row> {
        range.map(|index| self.render_row(index)).collect()
    }
}

impl<S: RowSource + ?Sized> RowSource for &mut S {
    type Row = S::Row;

    fn render_row(&mut self, index: usize) -> Self::Row {
        (**self).render_row(index)
    }

    fn render_range(&mut self, range: Range<usize>) -> Vec<Self::Row> {
        (**self).render_range(range)
    }
}

/// Row source backed by a per-row closure.
#[derive(Debug, Clone)]
pub struct FnRows<F> {
    render: F,
}

impl<F> FnRows<F> {
    /// Wrap a `(index) -> row` closure.
    pub fn new(render: F) -> Self {
        Self { render }
    }
}

impl<F, R> RowSource for FnRows<F>
where
    F: FnMut(usize) -> R,
{
    type Row = R;

    fn render_row(&mut self, index: usize) -> R {
        (self.render)(index)
    }
}

/// Row source backed by a whole-range closure.
///
/// Single rows are produced by rendering a one-row range.
///
/// # Panics
///
/// [`RowSource::render_row`] panics if the closure returns anything other
/// than exactly one row for a one-row range.
#[derive(Debug, Clone)]
pub struct FnChunks<F> {
    render: F,
}

impl<F> FnChunks<F> {
    /// Wrap a `(start..stop) -> rows` closure.
    pub fn new(render: F) -> Self {
        Self { render }
    }
}

impl<F, R> RowSource for FnChunks<F>
where
    F: FnMut(Range<usize>) -> Vec<R>,
{
    type Row = R;

    fn render_row(&mut self, index: usize) -> R {
        let mut rows = (self.render)(index..index + 1);
        assert_eq!(
            rows.len(),
            1,
            "range renderer must return one row per index in the range"
        );
        rows.remove(0)
    }

    fn render_range(&mut self, range: Range<usize>) -> Vec<R> {
        (self.render)(range)
    }
}
