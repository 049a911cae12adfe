#![forbid(unsafe_code)]

//! Directional focus resolution for paged grids with a dock.
//!
//! # Role in gridnav
//! `gridnav-focus` turns a key press on a focused item into a focus request.
//! It owns the occupancy matrices, the resolver seam, page-crossing logic,
//! and one dispatcher per container topology.
//!
//! # Flow of one key event
//! 1. A dispatcher checks the key phase and asks the [`NavigationHost`] for
//!    the containers involved.
//! 2. It builds a fresh [`OccupancyMatrix`] (sparse, full, or merged with the
//!    dock). Matrices are never cached: containers can change between keys.
//! 3. The [`Resolver`] maps key + origin to a [`ResolutionOutcome`].
//! 4. The [`PageCoordinator`] turns sentinels into a page snap and a target,
//!    re-resolving on the neighbor page for row-continuity crossings.
//! 5. The resulting [`DispatchPlan`] is applied: snap, focus, sound cue.
//!
//! # Example
//! ```
//! use gridnav_core::{CellPos, GridSize, KeyCode};
//! use gridnav_focus::{MatrixResolver, NavigationContext, Resolver, build_full_matrix};
//!
//! let matrix = build_full_matrix(GridSize::new(4, 4), 16).unwrap();
//! let ctx = NavigationContext::at_slot(KeyCode::Left, &matrix, 10, 0, 1);
//! let outcome = MatrixResolver.resolve(&ctx, &matrix);
//! assert_eq!(outcome.concrete(), Some(9));
//! assert_eq!(matrix.find(9), Some(CellPos::new(1, 2)));
//! ```

pub mod config;
pub mod coordinator;
pub mod dispatch;
pub mod error;
pub mod host;
pub mod matrix;
pub mod outcome;
pub mod resolver;
pub mod sound;

/// Tracing target shared by every navigation span and event.
pub(crate) const TARGET: &str = "gridnav.focus";

pub use config::NavConfig;
pub use coordinator::{Landing, PageCoordinator, PageLayout, ResolutionFrame, SlotSpace};
pub use dispatch::{DispatchPlan, DockDispatcher, GridDispatcher, PagedDispatcher, Topology};
pub use error::{ConfigError, LayoutError};
pub use host::{
    Container, ContainerId, FocusSink, FocusTarget, ItemRef, ItemRemoval, NavigationHost, Pager,
    SoundFeedback,
};
pub use matrix::{
    Anchor, AnchoredMatrix, DockMergePolicy, MergeOrientation, OccupancyMatrix,
    build_anchored_matrix, build_full_anchored_matrix, build_full_matrix, build_matrix,
    build_matrix_sized, build_merged_matrix,
};
pub use outcome::{NavigationContext, PageStep, ResolutionOutcome, Sentinel};
pub use resolver::{MatrixResolver, Resolver};
pub use sound::SoundCue;
