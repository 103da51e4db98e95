#![forbid(unsafe_code)]

//! Virtual table: the host render adapter.
//!
//! [`VirtualTable`] ties the pieces together for one table instance: it owns
//! the [`ScrollBridge`], derives a [`WindowRange`] whenever the viewport
//! changes, lets the [`RecycleController`] bring the row cache in line, and
//! renders the result through a [`TableShell`].
//!
//! # Event Flow
//!
//! ```text
//! host event ──► ScrollBridge ──► ViewportState ──► compute_window
//!                                                        │
//!            render ◄── TableShell ◄── RecycleController ◄┘
//! ```
//!
//! Time is supplied by the host on every call that needs it, either as a
//! timestamp or as a [`Clock`] through the `*_with` variants. The table never
//! keeps a clock of its own.
//!
//! # Invariants
//!
//! - The rendered rows always correspond to [`VirtualTable::window`].
//! - Spacer heights are the window's `offset_top` and `offset_bottom`.
//! - A programmatic scroll is written back to the host exactly once.
//!
//! # Failure Modes
//!
//! | Condition | Behavior |
//! |-----------|----------|
//! | Invalid options at construction | `Err(LayoutError)` |
//! | Host container missing on mount, unmount, or sync | Logged at `warn`, ignored |
//! | Item count shrinks below the scroll position | Offset re-clamped, caches rebuilt |

use core::fmt;
use core::time::Duration;

use rowport_core::geometry::{compute_window, total_height};
use rowport_core::{
    LayoutConfig, LayoutError, ViewportState, WindowRange, debug, debug_span, px, warn,
};
use rowport_runtime::{
    Clock, HostError, ScrollBridge, ScrollEvent, ScrollHost, ScrollListeners, ScrollTarget,
};

use crate::node::{Element, Node};
use crate::options::TableOptions;
use crate::recycle::{RecycleAction, RecycleController, RecycleStats};
use crate::row_source::RowSource;
use crate::shell::{Slots, TableBody, TableShell};

/// Root class marking a windowed table.
pub const VIRTUAL_CLASS: &str = "rowport-table--virtual";
/// Scroller track class.
pub const SCROLLER_CLASS: &str = "rowport-table__scroller";

/// A windowed table over a [`RowSource`].
pub struct VirtualTable<S: RowSource> {
    layout: LayoutConfig,
    source: S,
    bridge: ScrollBridge,
    controller: RecycleController<S::Row>,
    window: WindowRange,
    shell: TableShell<S::Row>,
    scroller: bool,
    listeners: ScrollListeners,
    pending_sync: Option<f64>,
    last_sync_error: Option<HostError>,
    last_action: RecycleAction,
}

impl<S: RowSource> fmt::Debug for VirtualTable<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VirtualTable")
            .field("layout", &self.layout)
            .field("viewport", &self.bridge.viewport())
            .field("window", &self.window)
            .field("rows", &self.controller.len())
            .field("pending_sync", &self.pending_sync)
            .field("last_action", &self.last_action)
            .finish_non_exhaustive()
    }
}

impl<S: RowSource> VirtualTable<S> {
    /// Build a table and render its first window.
    pub fn new(options: TableOptions, source: S, viewport_height: f64) -> Result<Self, LayoutError> {
        let layout = options.layout()?;
        let shell = TableShell::new()
            .with_height(options.wrapper_height())
            .with_classes(options.classes.iter().cloned());

        let mut table = Self {
            layout,
            source,
            bridge: ScrollBridge::new(options.bridge_config(), viewport_height),
            controller: RecycleController::new(),
            window: WindowRange::EMPTY,
            shell,
            scroller: options.scroller,
            listeners: ScrollListeners::new(),
            pending_sync: None,
            last_sync_error: None,
            last_action: RecycleAction::Unchanged,
        };
        table.refresh();
        Ok(table)
    }

    /// Replace the pass-through slots.
    #[must_use]
    pub fn with_slots(mut self, slots: Slots<S::Row>) -> Self {
        *self.shell.slots_mut() = slots;
        self
    }

    /// The pass-through slots.
    pub fn slots_mut(&mut self) -> &mut Slots<S::Row> {
        self.shell.slots_mut()
    }

    /// Resolved layout.
    #[must_use]
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Current viewport state.
    #[must_use]
    pub fn viewport(&self) -> ViewportState {
        self.bridge.viewport()
    }

    /// Window the cached rows correspond to.
    #[must_use]
    pub fn window(&self) -> &WindowRange {
        &self.window
    }

    /// Row cache.
    #[must_use]
    pub fn controller(&self) -> &RecycleController<S::Row> {
        &self.controller
    }

    /// Recycling counters.
    #[must_use]
    pub fn stats(&self) -> RecycleStats {
        self.controller.stats()
    }

    /// What the most recent cache update did.
    #[must_use]
    pub fn last_action(&self) -> RecycleAction {
        self.last_action
    }

    /// The row source.
    #[must_use]
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Total scrollable height, header included.
    #[must_use]
    pub fn total_height(&self) -> f64 {
        total_height(&self.layout)
    }

    /// Feed one host event at host time `now`.
    ///
    /// Returns the cache update when the event changed the viewport
    /// immediately. Native scroll notifications are debounced and surface
    /// through [`VirtualTable::tick`] instead.
    pub fn handle(&mut self, event: ScrollEvent, now: Duration) -> Option<RecycleAction> {
        match event {
            ScrollEvent::Scroll { scroll_top } => {
                self.on_scroll(scroll_top, now);
                None
            }
            ScrollEvent::Wheel { delta_y } => self.on_wheel(delta_y),
        }
    }

    /// Record a native scroll notification.
    pub fn on_scroll(&mut self, scroll_top: f64, now: Duration) {
        self.bridge.on_scroll(scroll_top, now);
    }

    /// Apply a wheel delta. The host container is synced on the next
    /// [`VirtualTable::sync_scroll`].
    pub fn on_wheel(&mut self, delta_y: f64) -> Option<RecycleAction> {
        let state = self.bridge.on_wheel(delta_y, &self.layout)?;
        self.pending_sync = Some(state.scroll_offset);
        Some(self.refresh())
    }

    /// Apply a debounced scroll whose quiet window has elapsed by `now`.
    pub fn tick(&mut self, now: Duration) -> Option<RecycleAction> {
        self.bridge.tick(now, &self.layout)?;
        Some(self.refresh())
    }

    /// [`VirtualTable::handle`] with the timestamp read from `clock`.
    pub fn handle_with<C: Clock + ?Sized>(
        &mut self,
        event: ScrollEvent,
        clock: &C,
    ) -> Option<RecycleAction> {
        self.handle(event, clock.now())
    }

    /// [`VirtualTable::tick`] with the timestamp read from `clock`.
    pub fn tick_with<C: Clock + ?Sized>(&mut self, clock: &C) -> Option<RecycleAction> {
        self.tick(clock.now())
    }

    /// When the host should next call [`VirtualTable::tick`].
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.bridge.next_deadline()
    }

    /// Scroll programmatically.
    ///
    /// The offset is clamped and applied at once; the host container follows
    /// on the next [`VirtualTable::sync_scroll`]. Returns the applied offset.
    pub fn scroll_to(&mut self, offset: f64) -> f64 {
        let applied = self.bridge.set_scroll_offset(offset, &self.layout);
        self.pending_sync = Some(applied);
        self.refresh();
        applied
    }

    /// Scroll so that row `index` sits at the top of the viewport.
    pub fn scroll_to_index(&mut self, index: usize) -> f64 {
        let offset = index as f64 * self.layout.row_height;
        self.scroll_to(offset)
    }

    /// Update the viewport height after the container resized.
    pub fn set_viewport_height(&mut self, viewport_height: f64) -> Option<RecycleAction> {
        if !self.bridge.set_viewport_height(viewport_height) {
            return None;
        }
        Some(self.refresh())
    }

    /// Change the number of rows. Cached rows are discarded.
    pub fn set_items_length(&mut self, items_length: usize) -> Option<RecycleAction> {
        if items_length == self.layout.items_length {
            return None;
        }
        debug!(
            from = self.layout.items_length,
            to = items_length,
            "items length changed; invalidating caches"
        );
        self.layout.items_length = items_length;
        self.controller.invalidate();
        if let Some(state) = self.bridge.reclamp(&self.layout) {
            self.pending_sync = Some(state.scroll_offset);
        }
        Some(self.refresh())
    }

    /// Attach input listeners to the host's table container.
    ///
    /// Once a listener is attached, any pending scroll position is written
    /// too. When the host refuses every listener the position stays pending
    /// and calling `mount` again retries both.
    pub fn mount<H: ScrollHost + ?Sized>(&mut self, host: &mut H) -> usize {
        let attached = self.listeners.mount(host, self.bridge.config().wheel);
        if self.listeners.is_mounted() {
            self.sync_scroll(host);
        }
        attached
    }

    /// Detach every listener attached by [`VirtualTable::mount`].
    pub fn unmount<H: ScrollHost + ?Sized>(&mut self, host: &mut H) -> usize {
        self.listeners.unmount(host)
    }

    /// Listener lifecycle state.
    #[must_use]
    pub fn listeners(&self) -> &ScrollListeners {
        &self.listeners
    }

    /// Scroll position waiting to be written to the host.
    #[must_use]
    pub fn pending_sync(&self) -> Option<f64> {
        self.pending_sync
    }

    /// Write a pending programmatic scroll position to the host containers.
    ///
    /// Returns `true` when a position was pending.
    pub fn sync_scroll<H: ScrollHost + ?Sized>(&mut self, host: &mut H) -> bool {
        let Some(offset) = self.pending_sync.take() else {
            return false;
        };
        let targets: &[ScrollTarget] = if self.scroller {
            &[ScrollTarget::Table, ScrollTarget::Scroller]
        } else {
            &[ScrollTarget::Table]
        };
        for &target in targets {
            if let Err(err) = host.set_scroll_top(target, offset) {
                warn!(?target, error = %err, "scroll sync failed; ignoring");
                self.last_sync_error = Some(err);
            }
        }
        true
    }

    /// Most recent host failure tolerated by [`VirtualTable::sync_scroll`].
    #[must_use]
    pub fn last_sync_error(&self) -> Option<&HostError> {
        self.last_sync_error.as_ref()
    }

    /// Rendered output tree.
    #[must_use]
    pub fn render(&self) -> Node<S::Row>
    where
        S::Row: Clone,
    {
        let _span = debug_span!(
            "virtual_table_render",
            start = self.window.start_index,
            stop = self.window.stop_index,
            offset_top = self.window.offset_top,
            offset_bottom = self.window.offset_bottom
        )
        .entered();

        self.shell.render(self)
    }

    fn refresh(&mut self) -> RecycleAction {
        let window = compute_window(&self.bridge.viewport(), &self.layout);
        let action = self
            .controller
            .update(&window, &self.layout.strategy, &mut self.source);
        if action.is_change() {
            debug!(
                ?action,
                start = window.start_index,
                stop = window.stop_index,
                "window updated"
            );
        }
        self.window = window;
        self.last_action = action;
        action
    }
}

impl<S> TableBody<S::Row> for VirtualTable<S>
where
    S: RowSource,
    S::Row: Clone,
{
    fn body_nodes(&self) -> Vec<Node<S::Row>> {
        let mut nodes = Vec::with_capacity(self.controller.len() + 2);
        nodes.push(Element::spacer(self.window.offset_top).into());
        nodes.extend(self.controller.rows().cloned().map(Node::Content));
        nodes.push(Element::spacer(self.window.offset_bottom).into());
        nodes
    }

    fn root_classes(&self) -> &[&'static str] {
        &[VIRTUAL_CLASS]
    }

    fn scroller(&self) -> Option<Element<S::Row>> {
        if !self.scroller {
            return None;
        }
        Some(
            Element::new("div").with_class(SCROLLER_CLASS).with_child(
                Element::new("div").with_style("height", px(self.total_height())),
            ),
        )
    }
}
