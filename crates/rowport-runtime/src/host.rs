#![forbid(unsafe_code)]

//! Host surface: listener attachment and scroll position writes.
//!
//! The host owns the actual scroll containers. [`ScrollListeners`] is the
//! single place that attaches listeners on mount and removes them on unmount.
//! Host failures during either step are logged and swallowed: a missing
//! container at unmount is a lifecycle ordering quirk, not a fault.

use std::fmt;

use rowport_core::{debug, warn};

/// Which scroll container an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScrollTarget {
    /// The scrollable element wrapping the table.
    Table,
    /// The optional scroller track beside the table.
    Scroller,
}

/// Kind of input listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListenerKind {
    /// Native scroll notification.
    Scroll,
    /// Wheel input.
    Wheel,
}

/// Listener registration options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListenerOptions {
    /// The listener never cancels the default action.
    pub passive: bool,
}

impl Default for ListenerOptions {
    fn default() -> Self {
        Self { passive: true }
    }
}

/// Host-assigned listener handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

/// Failure reported by the host surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostError {
    /// The target container does not exist (not mounted yet, or already gone).
    MissingContainer(ScrollTarget),
    /// The host refused the operation.
    Rejected(&'static str),
}

impl fmt::Display for HostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingContainer(target) => write!(f, "missing {target:?} container"),
            Self::Rejected(msg) => write!(f, "rejected: {msg}"),
        }
    }
}

impl std::error::Error for HostError {}

/// Operations the windowing engine needs from its host.
pub trait ScrollHost {
    /// Attach an input listener to `target`.
    fn add_listener(
        &mut self,
        target: ScrollTarget,
        kind: ListenerKind,
        options: ListenerOptions,
    ) -> Result<ListenerId, HostError>;

    /// Remove a listener previously returned by [`ScrollHost::add_listener`].
    fn remove_listener(&mut self, target: ScrollTarget, id: ListenerId) -> Result<(), HostError>;

    /// Set the native scroll position of `target`.
    fn set_scroll_top(&mut self, target: ScrollTarget, offset: f64) -> Result<(), HostError>;
}

/// Listener lifecycle for one table instance.
///
/// `mount` and `unmount` are idempotent. Every listener attached by `mount`
/// is removed by `unmount`. A listener the host refused at mount time is
/// attached by the next `mount`.
#[derive(Debug, Clone, Default)]
pub struct ScrollListeners {
    attached: Vec<(ListenerKind, ListenerId)>,
    last_error: Option<HostError>,
}

impl ScrollListeners {
    /// Create an unmounted lifecycle.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach the scroll listener, and the wheel listener when `wheel` is set,
    /// to the table container.
    ///
    /// Returns the number of listeners attached by this call. Kinds that are
    /// already attached are skipped.
    pub fn mount<H: ScrollHost + ?Sized>(&mut self, host: &mut H, wheel: bool) -> usize {
        let kinds: &[ListenerKind] = if wheel {
            &[ListenerKind::Scroll, ListenerKind::Wheel]
        } else {
            &[ListenerKind::Scroll]
        };

        let mut added = 0;
        for &kind in kinds {
            if self.is_attached(kind) {
                continue;
            }
            match host.add_listener(ScrollTarget::Table, kind, ListenerOptions::default()) {
                Ok(id) => {
                    debug!(?kind, id = id.0, "listener attached");
                    self.attached.push((kind, id));
                    added += 1;
                }
                Err(err) => {
                    warn!(?kind, error = %err, "listener attach failed; will retry on next mount");
                    self.last_error = Some(err);
                }
            }
        }
        added
    }

    /// Remove every listener attached by [`ScrollListeners::mount`].
    ///
    /// Returns the number of listeners the host confirmed removing.
    pub fn unmount<H: ScrollHost + ?Sized>(&mut self, host: &mut H) -> usize {
        let mut removed = 0;
        for entry in self.attached.drain(..) {
            match host.remove_listener(ScrollTarget::Table, entry.1) {
                Ok(()) => {
                    debug!(kind = ?entry.0, id = (entry.1).0, "listener removed");
                    removed += 1;
                }
                Err(err) => {
                    warn!(kind = ?entry.0, error = %err, "listener removal failed; ignoring");
                    self.last_error = Some(err);
                }
            }
        }
        removed
    }

    /// Whether at least one listener is attached.
    #[must_use]
    pub fn is_mounted(&self) -> bool {
        !self.attached.is_empty()
    }

    /// Whether a listener of `kind` is attached.
    #[must_use]
    pub fn is_attached(&self, kind: ListenerKind) -> bool {
        self.attached.iter().any(|&(k, _)| k == kind)
    }

    /// Listeners currently attached.
    #[must_use]
    pub fn attached(&self) -> &[(ListenerKind, ListenerId)] {
        &self.attached
    }

    /// Most recent host failure tolerated during mount or unmount.
    #[must_use]
    pub fn last_error(&self) -> Option<&HostError> {
        self.last_error.as_ref()
    }
}

/// A listener registered with [`MemoryHost`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegisteredListener {
    /// Container the listener is attached to.
    pub target: ScrollTarget,
    /// Listener kind.
    pub kind: ListenerKind,
    /// Registration options.
    pub options: ListenerOptions,
    /// Assigned handle.
    pub id: ListenerId,
}

/// In-memory host for headless embedding and tests.
///
/// Containers exist until [`MemoryHost::remove_container`] is called.
#[derive(Debug, Clone)]
pub struct MemoryHost {
    listeners: Vec<RegisteredListener>,
    table_scroll_top: Option<f64>,
    scroller_scroll_top: Option<f64>,
    next_id: u64,
}

impl Default for MemoryHost {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryHost {
    /// Create a host with both containers present and scrolled to the top.
    #[must_use]
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
            table_scroll_top: Some(0.0),
            scroller_scroll_top: Some(0.0),
            next_id: 1,
        }
    }

    /// Remove a container, as when the host tears down its DOM first.
    pub fn remove_container(&mut self, target: ScrollTarget) {
        *self.slot(target) = None;
        self.listeners.retain(|l| l.target != target);
    }

    /// Recreate a removed container, scrolled to the top. Existing containers
    /// are left alone.
    pub fn restore_container(&mut self, target: ScrollTarget) {
        self.slot(target).get_or_insert(0.0);
    }

    /// Listeners currently registered.
    #[must_use]
    pub fn listeners(&self) -> &[RegisteredListener] {
        &self.listeners
    }

    /// Current scroll position of `target`, if the container exists.
    #[must_use]
    pub fn scroll_top(&self, target: ScrollTarget) -> Option<f64> {
        match target {
            ScrollTarget::Table => self.table_scroll_top,
            ScrollTarget::Scroller => self.scroller_scroll_top,
        }
    }

    fn slot(&mut self, target: ScrollTarget) -> &mut Option<f64> {
        match target {
            ScrollTarget::Table => &mut self.table_scroll_top,
            ScrollTarget::Scroller => &mut self.scroller_scroll_top,
        }
    }
}

impl ScrollHost for MemoryHost {
    fn add_listener(
        &mut self,
        target: ScrollTarget,
        kind: ListenerKind,
        options: ListenerOptions,
    ) -> Result<ListenerId, HostError> {
        if self.slot(target).is_none() {
            return Err(HostError::MissingContainer(target));
        }
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push(RegisteredListener {
            target,
            kind,
            options,
            id,
        });
        Ok(id)
    }

    fn remove_listener(&mut self, target: ScrollTarget, id: ListenerId) -> Result<(), HostError> {
        if self.slot(target).is_none() {
            return Err(HostError::MissingContainer(target));
        }
        self.listeners.retain(|l| l.id != id);
        Ok(())
    }

    fn set_scroll_top(&mut self, target: ScrollTarget, offset: f64) -> Result<(), HostError> {
        match self.slot(target) {
            Some(top) => {
                *top = offset;
                Ok(())
            }
            None => Err(HostError::MissingContainer(target)),
        }
    }
}
