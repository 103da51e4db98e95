#![forbid(unsafe_code)]

//! Widgets: row recycling, the table shell, and the virtual table adapter.
//!
//! The usual entry point is [`VirtualTable`]: give it [`TableOptions`] and a
//! [`RowSource`], feed it host scroll events, and render its [`Node`] tree.
//! The lower-level [`RecycleController`] and [`TableShell`] are public for
//! hosts that drive the window themselves.

pub mod node;
pub mod options;
pub mod recycle;
pub mod row_source;
pub mod shell;
pub mod virtual_table;

pub use node::{Element, Node};
pub use options::{StrategyKind, TableOptions};
pub use recycle::{RecycleAction, RecycleController, RecycleStats};
pub use row_source::{FnChunks, FnRows, RowSource};
pub use shell::{Slots, StaticBody, TableBody, TableShell};
pub use virtual_table::VirtualTable;
