#![forbid(unsafe_code)]

//! Generic table shell.
//!
//! [`TableShell`] owns the pass-through slots and the wrapper markup. The
//! body rows come from a [`TableBody`], so the same shell serves a plain
//! table and a windowed one.
//!
//! ```text
//! div.rowport-table [+ body classes, caller classes]
//! ├── top slot
//! ├── div.rowport-table__wrapper  (style height)
//! │   ├── div.rowport-table__table
//! │   │   └── table
//! │   │       ├── body.before slot
//! │   │       ├── tbody  (body nodes)
//! │   │       └── body.after slot
//! │   └── scroller (optional, from the body)
//! └── bottom slot
//! ```

use crate::node::{Element, Node};

/// Root element class.
pub const ROOT_CLASS: &str = "rowport-table";
/// Wrapper element class.
pub const WRAPPER_CLASS: &str = "rowport-table__wrapper";
/// Inner table container class.
pub const TABLE_CLASS: &str = "rowport-table__table";

/// Supplies the contents of `tbody` to a [`TableShell`].
pub trait TableBody<N> {
    /// Children of `tbody`, in order.
    fn body_nodes(&self) -> Vec<Node<N>>;

    /// Classes added to the root element.
    fn root_classes(&self) -> &[&'static str] {
        &[]
    }

    /// An element rendered after the table inside the wrapper.
    fn scroller(&self) -> Option<Element<N>> {
        None
    }
}

/// Renders every row it holds, with no windowing.
#[derive(Debug, Clone, Copy)]
pub struct StaticBody<'a, N> {
    rows: &'a [N],
}

impl<'a, N> StaticBody<'a, N> {
    /// Wrap a slice of row nodes.
    #[must_use]
    pub fn new(rows: &'a [N]) -> Self {
        Self { rows }
    }
}

impl<N: Clone> TableBody<N> for StaticBody<'_, N> {
    fn body_nodes(&self) -> Vec<Node<N>> {
        self.rows.iter().cloned().map(Node::Content).collect()
    }
}

/// Caller content forwarded around the body, untouched.
#[derive(Debug, Clone, PartialEq)]
pub struct Slots<N> {
    /// Above the wrapper.
    pub top: Vec<N>,
    /// Below the wrapper.
    pub bottom: Vec<N>,
    /// Inside `table`, before `tbody` (e.g. `thead`).
    pub body_before: Vec<N>,
    /// Inside `table`, after `tbody` (e.g. `tfoot`).
    pub body_after: Vec<N>,
}

impl<N> Default for Slots<N> {
    fn default() -> Self {
        Self {
            top: Vec::new(),
            bottom: Vec::new(),
            body_before: Vec::new(),
            body_after: Vec::new(),
        }
    }
}

/// Table markup with pass-through slots.
#[derive(Debug, Clone, PartialEq)]
pub struct TableShell<N> {
    slots: Slots<N>,
    classes: Vec<String>,
    height: Option<String>,
}

impl<N> Default for TableShell<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N> TableShell<N> {
    /// An empty shell.
    #[must_use]
    pub fn new() -> Self {
        Self {
            slots: Slots::default(),
            classes: Vec::new(),
            height: None,
        }
    }

    /// Replace the top slot.
    #[must_use]
    pub fn with_top(mut self, nodes: impl IntoIterator<Item = N>) -> Self {
        self.slots.top = nodes.into_iter().collect();
        self
    }

    /// Replace the bottom slot.
    #[must_use]
    pub fn with_bottom(mut self, nodes: impl IntoIterator<Item = N>) -> Self {
        self.slots.bottom = nodes.into_iter().collect();
        self
    }

    /// Replace the slot before `tbody`.
    #[must_use]
    pub fn with_body_before(mut self, nodes: impl IntoIterator<Item = N>) -> Self {
        self.slots.body_before = nodes.into_iter().collect();
        self
    }

    /// Replace the slot after `tbody`.
    #[must_use]
    pub fn with_body_after(mut self, nodes: impl IntoIterator<Item = N>) -> Self {
        self.slots.body_after = nodes.into_iter().collect();
        self
    }

    /// Add a class to the root element.
    #[must_use]
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    /// Add several classes to the root element.
    #[must_use]
    pub fn with_classes<I, C>(mut self, classes: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<String>,
    {
        self.classes.extend(classes.into_iter().map(Into::into));
        self
    }

    /// Set the wrapper height. `height` is a CSS length, e.g. the output of
    /// [`rowport_core::convert_to_unit`].
    #[must_use]
    pub fn with_height(mut self, height: Option<String>) -> Self {
        self.height = height;
        self
    }

    /// The slots.
    #[must_use]
    pub fn slots(&self) -> &Slots<N> {
        &self.slots
    }

    /// Mutable access to the slots.
    pub fn slots_mut(&mut self) -> &mut Slots<N> {
        &mut self.slots
    }

    /// Wrapper height, if set.
    #[must_use]
    pub fn height(&self) -> Option<&str> {
        self.height.as_deref()
    }
}

impl<N: Clone> TableShell<N> {
    /// Assemble the table around `body`.
    #[must_use]
    pub fn render<B>(&self, body: &B) -> Node<N>
    where
        B: TableBody<N> + ?Sized,
    {
        let content = |nodes: &[N]| nodes.iter().cloned().map(Node::Content).collect::<Vec<_>>();

        let table = Element::new("table")
            .with_children(content(&self.slots.body_before))
            .with_child(Element::new("tbody").with_children(body.body_nodes()))
            .with_children(content(&self.slots.body_after));

        let mut wrapper = Element::new("div")
            .with_class(WRAPPER_CLASS)
            .with_child(Element::new("div").with_class(TABLE_CLASS).with_child(table));
        if let Some(height) = &self.height {
            wrapper = wrapper.with_style("height", height.clone());
        }
        if let Some(scroller) = body.scroller() {
            wrapper = wrapper.with_child(scroller);
        }

        Element::new("div")
            .with_class(ROOT_CLASS)
            .with_classes(body.root_classes().iter().copied())
            .with_classes(self.classes.iter().cloned())
            .with_children(content(&self.slots.top))
            .with_child(wrapper)
            .with_children(content(&self.slots.bottom))
            .into()
    }
}
