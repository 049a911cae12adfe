#![forbid(unsafe_code)]

//! Core: key events, navigation directions, and grid geometry.
//!
//! # Role in gridnav
//! `gridnav-core` is the input layer. It owns the normalized key event types
//! that the dispatchers consume and the cell-grid geometry that occupancy
//! matrices are expressed in.
//!
//! # Primary responsibilities
//! - **KeyEvent**: key code plus press/repeat/release phase.
//! - **NavDirection**: the four spatial directions a key can map to.
//! - **CellPos / GridSize**: column/row coordinates and grid dimensions.
//! - **LayoutOrientation**: where the dock sits relative to the grid.
//!
//! Nothing here performs I/O or logging; higher crates decide policy.

pub mod event;
pub mod geometry;

pub use event::{KeyCode, KeyEvent, KeyEventKind, NavDirection};
pub use geometry::{CellPos, GridSize, LayoutOrientation};
