#![forbid(unsafe_code)]

//! Dispatcher for row-major paged grids (app drawers, folders).

use gridnav_core::{KeyCode, KeyEvent, NavDirection};

use super::{DispatchPlan, Topology, drive};
use crate::config::NavConfig;
use crate::coordinator::{Landing, PageCoordinator, PageLayout, ResolutionFrame, SlotSpace};
use crate::error::LayoutError;
use crate::host::{ContainerId, FocusTarget, ItemRef, NavigationHost};
use crate::matrix::build_full_matrix;
use crate::resolver::{MatrixResolver, Resolver};

/// Handles keys for items on full-page grids.
///
/// With a `noop_fallback` direction set, an arrow in that direction that
/// lands nowhere focuses the chrome on that side instead, such as a folder
/// name field below the grid.
#[derive(Debug, Clone, Default)]
pub struct PagedDispatcher<R = MatrixResolver> {
    coordinator: PageCoordinator<R>,
    config: NavConfig,
    noop_fallback: Option<NavDirection>,
}

impl PagedDispatcher {
    #[must_use]
    pub fn new(config: NavConfig) -> Self {
        Self::with_resolver(MatrixResolver, config)
    }
}

impl<R: Resolver> PagedDispatcher<R> {
    #[must_use]
    pub fn with_resolver(resolver: R, config: NavConfig) -> Self {
        Self {
            coordinator: PageCoordinator::new(resolver, PageLayout::Full),
            config,
            noop_fallback: None,
        }
    }

    /// Focus the chrome beyond this edge when an arrow lands nowhere.
    #[must_use]
    pub fn with_noop_fallback(mut self, direction: NavDirection) -> Self {
        self.noop_fallback = Some(direction);
        self
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
    ) -> bool {
        drive(host, &self.config, Topology::Paged, event, |host| {
            self.plan(host, origin, event.code)
        })
    }

    /// Decide the side effects of `key` without performing them.
    pub fn plan<H: NavigationHost + ?Sized>(
        &self,
        host: &H,
        origin: ItemRef,
        key: KeyCode,
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
        let count = grid.child_count();
        if origin.index >= count {
            return Err(LayoutError::UnknownSlot {
                container: origin.container,
                index: origin.index,
            });
        }

        let matrix = build_full_matrix(grid.grid_size(), count)?;
        let frame = ResolutionFrame {
            key,
            page_index,
            page_count: pager.page_count(),
            matrix: &matrix,
            slots: SlotSpace::Single {
                container: origin.container,
                count,
            },
            origin,
            origin_count: count,
        };
        let outcome = self.coordinator.resolve(&frame);
        let landing = if outcome.is_noop() {
            Landing::none()
        } else {
            self.coordinator.settle(pager, &frame, outcome)?
        };

        let plan = DispatchPlan::from_landing(landing, key);
        match self.noop_fallback {
            Some(direction) if plan.focus.is_none() && key.direction() == Some(direction) => {
                Ok(plan.with_focus(FocusTarget::Beyond(direction), key))
            }
            _ => Ok(plan),
        }
    }
}
