#![forbid(unsafe_code)]

//! Page-boundary coordination.
//!
//! Turns a [`ResolutionOutcome`] into a [`Landing`]: the page to snap to, if
//! any, and the item that should receive focus.
//!
//! Row-continuity crossings take two resolver calls. The resolver only ever
//! searches one matrix, so after the first call reports that the search ran
//! off the page edge, the neighbor page's matrix is rebuilt with a pivot
//! column on the entry side and searched again from the pivot in the row the
//! focus left from.
//!
//! # Invariants
//!
//! - A landing never names a page outside `[0, page_count)`.
//! - A landing target always names an existing child.
//! - Nothing is snapped unless the neighbor page exists.

use gridnav_core::KeyCode;

use crate::TARGET;
use crate::error::LayoutError;
use crate::host::{Container, ContainerId, ItemRef, Pager};
use crate::matrix::{OccupancyMatrix, build_anchored_matrix, build_full_anchored_matrix};
use crate::outcome::{NavigationContext, ResolutionOutcome, Sentinel};
use crate::resolver::Resolver;

/// How page matrices are built for crossing searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PageLayout {
    /// Children sit at their reported cells.
    #[default]
    Sparse,
    /// Children fill the grid row-major.
    Full,
}

/// Maps matrix slots back to container children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SlotSpace {
    /// Slots are the children of one container.
    Single { container: ContainerId, count: usize },
    /// Page children first, then dock children offset by `primary_count`.
    Merged {
        page: usize,
        primary_count: usize,
        dock_count: usize,
    },
}

impl SlotSpace {
    /// The child a slot names, `None` when out of range.
    #[must_use]
    pub fn item(&self, slot: usize) -> Option<ItemRef> {
        match *self {
            Self::Single { container, count } => {
                (slot < count).then_some(ItemRef { container, index: slot })
            }
            Self::Merged {
                page,
                primary_count,
                dock_count,
            } => {
                if slot < primary_count {
                    Some(ItemRef::page(page, slot))
                } else {
                    let local = slot - primary_count;
                    (local < dock_count).then_some(ItemRef::dock(local))
                }
            }
        }
    }

    /// The slot an item occupies, `None` if it is not in this space.
    #[must_use]
    pub fn slot_of(&self, item: ItemRef) -> Option<usize> {
        match *self {
            Self::Single { container, count } => {
                (item.container == container && item.index < count).then_some(item.index)
            }
            Self::Merged {
                page,
                primary_count,
                dock_count,
            } => match item.container {
                ContainerId::Page(p) if p == page && item.index < primary_count => {
                    Some(item.index)
                }
                ContainerId::Dock if item.index < dock_count => Some(primary_count + item.index),
                ContainerId::Page(_) | ContainerId::Dock => None,
            },
        }
    }
}

/// Everything known about one key event when resolving it.
#[derive(Debug, Clone, Copy)]
pub struct ResolutionFrame<'a> {
    pub key: KeyCode,
    pub page_index: usize,
    pub page_count: usize,
    /// Matrix the first resolution runs against.
    pub matrix: &'a OccupancyMatrix,
    pub slots: SlotSpace,
    /// The focused item.
    pub origin: ItemRef,
    /// Child count of the origin's container.
    pub origin_count: usize,
}

impl ResolutionFrame<'_> {
    /// Matrix slot of the focused item.
    #[must_use]
    pub fn current_slot(&self) -> Option<usize> {
        self.slots.slot_of(self.origin)
    }
}

/// Result of coordinating one key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Landing {
    /// Page the pager should scroll to.
    pub snap_to: Option<usize>,
    /// Item to focus.
    pub target: Option<ItemRef>,
}

impl Landing {
    /// Nothing moves.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            snap_to: None,
            target: None,
        }
    }

    /// Focus an item on the current page.
    #[must_use]
    pub const fn focus(target: ItemRef) -> Self {
        Self {
            snap_to: None,
            target: Some(target),
        }
    }

    #[must_use]
    pub const fn is_none(&self) -> bool {
        self.snap_to.is_none() && self.target.is_none()
    }
}

/// Interprets resolver outcomes, crossing pages when needed.
#[derive(Debug, Clone, Copy, Default)]
pub struct PageCoordinator<R> {
    resolver: R,
    layout: PageLayout,
}

impl<R: Resolver> PageCoordinator<R> {
    #[must_use]
    pub const fn new(resolver: R, layout: PageLayout) -> Self {
        Self { resolver, layout }
    }

    /// First resolution call: from the focused slot in the frame's matrix.
    pub fn resolve(&self, frame: &ResolutionFrame<'_>) -> ResolutionOutcome {
        let Some(current) = frame.current_slot() else {
            return ResolutionOutcome::NOOP;
        };
        let ctx = NavigationContext::at_slot(
            frame.key,
            frame.matrix,
            current,
            frame.page_index,
            frame.page_count,
        );
        let outcome = self.resolver.resolve(&ctx, frame.matrix);
        tracing::trace!(target: TARGET, key = ?frame.key, current, ?outcome, "resolved");
        outcome
    }

    /// Turn an outcome into a landing.
    pub fn settle(
        &self,
        pager: &dyn Pager,
        frame: &ResolutionFrame<'_>,
        outcome: ResolutionOutcome,
    ) -> Result<Landing, LayoutError> {
        match outcome {
            ResolutionOutcome::Concrete(slot) => Ok(frame
                .slots
                .item(slot)
                .map_or_else(Landing::none, Landing::focus)),
            ResolutionOutcome::Sentinel(sentinel) => self.land(pager, frame, sentinel),
        }
    }

    /// Interpret a sentinel.
    pub fn land(
        &self,
        pager: &dyn Pager,
        frame: &ResolutionFrame<'_>,
        sentinel: Sentinel,
    ) -> Result<Landing, LayoutError> {
        let origin = frame.origin.container;
        match sentinel {
            Sentinel::NoOp => Ok(Landing::none()),
            Sentinel::CurrentPageFirst => Ok((frame.origin_count > 0)
                .then(|| Landing::focus(ItemRef { container: origin, index: 0 }))
                .unwrap_or_default()),
            Sentinel::CurrentPageLast => Ok(frame
                .origin_count
                .checked_sub(1)
                .map(|index| Landing::focus(ItemRef { container: origin, index }))
                .unwrap_or_default()),
            Sentinel::PreviousPageFirst | Sentinel::NextPageFirst => {
                Ok(self.land_on_edge_item(pager, frame, sentinel, |page| {
                    page.has_child(0).then_some(0)
                }))
            }
            Sentinel::PreviousPageLast => {
                Ok(self.land_on_edge_item(pager, frame, sentinel, |page| page.last_child()))
            }
            Sentinel::PreviousPageLeftColumn
            | Sentinel::PreviousPageRightColumn
            | Sentinel::NextPageLeftColumn
            | Sentinel::NextPageRightColumn => self.cross_with_row(pager, frame, sentinel),
        }
    }

    fn land_on_edge_item(
        &self,
        pager: &dyn Pager,
        frame: &ResolutionFrame<'_>,
        sentinel: Sentinel,
        pick: impl Fn(&dyn Container) -> Option<usize>,
    ) -> Landing {
        let Some(target_page) = sentinel
            .page_step()
            .and_then(|step| step.apply(frame.page_index, frame.page_count))
        else {
            tracing::debug!(
                target: TARGET,
                ?sentinel,
                page = frame.page_index,
                "no neighbor page"
            );
            return Landing::none();
        };
        let Some(page) = pager.page(target_page) else {
            tracing::debug!(target: TARGET, ?sentinel, target_page, "neighbor page missing");
            return Landing::none();
        };
        let target = pick(page)
            .filter(|&index| page.has_child(index))
            .map(|index| ItemRef::page(target_page, index));
        tracing::debug!(
            target: TARGET,
            from = frame.page_index,
            to = target_page,
            ?sentinel,
            "page crossing"
        );
        Landing {
            snap_to: Some(target_page),
            target,
        }
    }

    fn cross_with_row(
        &self,
        pager: &dyn Pager,
        frame: &ResolutionFrame<'_>,
        sentinel: Sentinel,
    ) -> Result<Landing, LayoutError> {
        let Some((step, anchor)) = sentinel.crossing() else {
            return Ok(Landing::none());
        };
        let Some(target_page) = step.apply(frame.page_index, frame.page_count) else {
            tracing::debug!(
                target: TARGET,
                ?sentinel,
                page = frame.page_index,
                "no neighbor page"
            );
            return Ok(Landing::none());
        };
        let Some(row) = frame
            .current_slot()
            .and_then(|slot| frame.matrix.find_row(slot))
        else {
            return Ok(Landing::none());
        };
        let Some(page) = pager.page(target_page) else {
            tracing::debug!(target: TARGET, ?sentinel, target_page, "neighbor page missing");
            return Ok(Landing::none());
        };
        let size = page.grid_size();
        if size.is_empty() {
            // Page still being created or torn down.
            return Ok(Landing::none());
        }

        let anchored = match self.layout {
            PageLayout::Sparse => build_anchored_matrix(page, anchor, row)?,
            PageLayout::Full => {
                build_full_anchored_matrix(size, page.child_count(), anchor, row)?
            }
        };
        let ctx = NavigationContext::at_pivot(
            frame.key,
            &anchored.matrix,
            anchored.pivot,
            target_page,
            frame.page_count,
        );
        let outcome = self.resolver.resolve(&ctx, &anchored.matrix);
        let target = outcome
            .concrete()
            .filter(|&index| page.has_child(index))
            .map(|index| ItemRef::page(target_page, index));
        tracing::debug!(
            target: TARGET,
            from = frame.page_index,
            to = target_page,
            row,
            ?anchor,
            ?outcome,
            "row-continuity crossing"
        );
        Ok(Landing {
            snap_to: Some(target_page),
            target,
        })
    }
}
