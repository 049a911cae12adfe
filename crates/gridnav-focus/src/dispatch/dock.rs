#![forbid(unsafe_code)]

//! Dispatcher for dock items.
//!
//! The key pointing at the grid (Up in the horizontal layout, Left in the
//! vertical bar) searches the dock merged into the pager's current page.
//! Other arrows stay inside the dock. In the vertical bar, Right points away
//! from the grid and pages forward instead.

use gridnav_core::{KeyCode, KeyEvent, LayoutOrientation};

use super::{DispatchPlan, Topology, drive};
use crate::TARGET;
use crate::config::NavConfig;
use crate::coordinator::{PageCoordinator, PageLayout, ResolutionFrame, SlotSpace};
use crate::error::LayoutError;
use crate::host::{ContainerId, ItemRef, NavigationHost};
use crate::matrix::{DockMergePolicy, MergeOrientation, build_matrix, build_merged_matrix};
use crate::outcome::ResolutionOutcome;
use crate::resolver::{MatrixResolver, Resolver};

/// Handles keys for items in the dock.
#[derive(Debug, Clone, Default)]
pub struct DockDispatcher<R = MatrixResolver> {
    coordinator: PageCoordinator<R>,
    config: NavConfig,
}

impl DockDispatcher {
    #[must_use]
    pub fn new(config: NavConfig) -> Self {
        Self::with_resolver(MatrixResolver, config)
    }
}

impl<R: Resolver> DockDispatcher<R> {
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
        drive(host, &self.config, Topology::Dock, event, |host| {
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
        if origin.container != ContainerId::Dock {
            return Err(LayoutError::UnknownSlot {
                container: origin.container,
                index: origin.index,
            });
        }
        let dock = host
            .dock_container()
            .ok_or(LayoutError::MissingContainer(ContainerId::Dock))?;
        let origin_pos = dock
            .position_of(origin.index)
            .ok_or(LayoutError::UnknownSlot {
                container: ContainerId::Dock,
                index: origin.index,
            })?;

        let pager = host.pager();
        let page_index = pager.current_page_index();
        let Some(grid) = host
            .current_container()
            .filter(|grid| !grid.grid_size().is_empty())
        else {
            // Pages are still being created or removed.
            tracing::debug!(target: TARGET, page_index, "current page unavailable");
            return Ok(DispatchPlan::none());
        };

        // TODO: confirm with product whether Right in the vertical bar should
        // page forward or traverse the dock.
        let key = match (key, layout) {
            (KeyCode::Right, LayoutOrientation::VerticalBar) => KeyCode::PageDown,
            _ => key,
        };
        let merge = match (key, layout) {
            (KeyCode::Up, LayoutOrientation::Horizontal) => Some(MergeOrientation::Horizontal),
            (KeyCode::Left, LayoutOrientation::VerticalBar) => Some(MergeOrientation::Vertical),
            _ => None,
        };

        let (matrix, slots) = match merge {
            Some(orientation) => {
                let policy = DockMergePolicy::new(orientation);
                let rank = host.all_items_rank();
                let include = rank == Some(policy.rank_of(origin_pos));
                let policy = policy.with_all_items(rank, include);
                let slots = SlotSpace::Merged {
                    page: page_index,
                    primary_count: grid.child_count(),
                    dock_count: dock.child_count(),
                };
                (build_merged_matrix(grid, dock, &policy)?, slots)
            }
            None => {
                let slots = SlotSpace::Single {
                    container: ContainerId::Dock,
                    count: dock.child_count(),
                };
                (build_matrix(dock)?, slots)
            }
        };

        let frame = ResolutionFrame {
            key,
            page_index,
            page_count: pager.page_count(),
            matrix: &matrix,
            slots,
            origin,
            origin_count: dock.child_count(),
        };
        let outcome = self.coordinator.resolve(&frame);
        if let ResolutionOutcome::Sentinel(sentinel) = outcome {
            if sentinel.crossing().is_some() {
                // The dock has no row continuity with neighbor pages.
                tracing::trace!(target: TARGET, ?sentinel, "dock crossing absorbed");
                return Ok(DispatchPlan::none());
            }
        }
        let landing = self.coordinator.settle(pager, &frame, outcome)?;
        Ok(DispatchPlan::from_landing(landing, key))
    }
}
