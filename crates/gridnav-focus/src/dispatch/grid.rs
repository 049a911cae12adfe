#![forbid(unsafe_code)]

//! Dispatcher for items on a sparse page grid.
//!
//! The dock only takes part when the key points at it: Down in the
//! horizontal layout, Right in the vertical-bar layout. Its all-items button
//! is never a destination from the grid.

use gridnav_core::{KeyCode, KeyEvent, LayoutOrientation, NavDirection};

use super::{DispatchPlan, Topology, drive};
use crate::config::NavConfig;
use crate::coordinator::{PageCoordinator, PageLayout, ResolutionFrame, SlotSpace};
use crate::error::LayoutError;
use crate::host::{ContainerId, ItemRef, NavigationHost};
use crate::matrix::{DockMergePolicy, MergeOrientation, build_matrix, build_merged_matrix};
use crate::resolver::{MatrixResolver, Resolver};

/// Handles keys for items on a page grid.
#[derive(Debug, Clone, Default)]
pub struct GridDispatcher<R = MatrixResolver> {
    coordinator: PageCoordinator<R>,
    config: NavConfig,
}

impl GridDispatcher {
    #[must_use]
    pub fn new(config: NavConfig) -> Self {
        Self::with_resolver(MatrixResolver, config)
    }
}

impl<R: Resolver> GridDispatcher<R> {
    #[must_use]
    pub fn with_resolver(resolver: R, config: NavConfig) -> Self {
        Self {
            coordinator: PageCoordinator::new(resolver, PageLayout::Sparse),
            config,
        }
    }

    #[must_use]
    pub const fn config(&self) -> &NavConfig {
        &self.config
    }

    /// Handle a key event on `origin`. Returns whether it was consumed.
    pub fn handle_key<H: NavigationHost + ?Sized>(
        &self,
        host: &mut H,
        origin: ItemRef,
        event: KeyEvent,
        layout: LayoutOrientation,
    ) -> bool {
        drive(host, &self.config, Topology::Grid, event, |host| {
            self.plan(host, origin, event.code, layout)
        })
    }

    /// Decide the side effects of `key` without performing them.
    pub fn plan<H: NavigationHost + ?Sized>(
        &self,
        host: &H,
        origin: ItemRef,
        key: KeyCode,
        layout: LayoutOrientation,
    ) -> Result<DispatchPlan, LayoutError> {
        let ContainerId::Page(page_index) = origin.container else {
            return Err(LayoutError::UnknownSlot {
                container: origin.container,
                index: origin.index,
            });
        };
        let pager = host.pager();
        let grid = host
            .container(origin.container)
            .ok_or(LayoutError::MissingContainer(origin.container))?;
        if !grid.has_child(origin.index) {
            return Err(LayoutError::UnknownSlot {
                container: origin.container,
                index: origin.index,
            });
        }

        if key.is_removal() {
            return Ok(DispatchPlan::removal(origin));
        }

        let merge = match (key, layout) {
            (KeyCode::Down, LayoutOrientation::Horizontal) => Some(MergeOrientation::Horizontal),
            (KeyCode::Right, LayoutOrientation::VerticalBar) => Some(MergeOrientation::Vertical),
            _ => None,
        };
        let primary_count = grid.child_count();
        let (matrix, slots) = match merge.zip(host.dock_container()) {
            Some((orientation, dock)) => {
                let policy =
                    DockMergePolicy::new(orientation).with_all_items(host.all_items_rank(), false);
                let slots = SlotSpace::Merged {
                    page: page_index,
                    primary_count,
                    dock_count: dock.child_count(),
                };
                (build_merged_matrix(grid, dock, &policy)?, slots)
            }
            None => {
                let slots = SlotSpace::Single {
                    container: origin.container,
                    count: primary_count,
                };
                (build_matrix(grid)?, slots)
            }
        };

        let frame = ResolutionFrame {
            key,
            page_index,
            page_count: pager.page_count(),
            matrix: &matrix,
            slots,
            origin,
            origin_count: primary_count,
        };
        let outcome = self.coordinator.resolve(&frame);
        if outcome.is_noop() {
            return Ok(if key == KeyCode::Up {
                DispatchPlan::beyond(NavDirection::Up, key)
            } else {
                DispatchPlan::none()
            });
        }
        let landing = self.coordinator.settle(pager, &frame, outcome)?;
        Ok(DispatchPlan::from_landing(landing, key))
    }
}
