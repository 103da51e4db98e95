#![forbid(unsafe_code)]

//! Scroll event bridge.
//!
//! Hosts push raw scroll and wheel input into a [`ScrollBridge`] together
//! with a monotonic timestamp. Native scroll notifications are debounced;
//! wheel input is applied immediately. The bridge only ever produces a new
//! [`ViewportState`](rowport_core::ViewportState); it never sees rendered rows.
//!
//! Time is host-driven: nothing here sleeps or spawns. Hosts call
//! [`ScrollBridge::tick`] when the deadline reported by
//! [`ScrollBridge::next_deadline`] has passed.

pub mod bridge;
pub mod clock;
pub mod debounce;
pub mod event;
pub mod host;

pub use bridge::{BridgeConfig, ScrollBridge};
pub use clock::{Clock, ManualClock, SystemClock};
pub use debounce::Debouncer;
pub use event::ScrollEvent;
pub use host::{
    HostError, ListenerId, ListenerKind, ListenerOptions, MemoryHost, RegisteredListener,
    ScrollHost, ScrollListeners, ScrollTarget,
};
