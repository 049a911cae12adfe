#![forbid(unsafe_code)]

//! Resolution inputs and outcomes.

use gridnav_core::{CellPos, GridSize, KeyCode};

use crate::matrix::{Anchor, OccupancyMatrix};

/// A boundary signal instead of a concrete slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sentinel {
    /// Nothing to move to.
    NoOp,
    CurrentPageFirst,
    CurrentPageLast,
    PreviousPageFirst,
    PreviousPageLast,
    NextPageFirst,
    /// Previous page, same row, searching from its left edge.
    PreviousPageLeftColumn,
    /// Previous page, same row, searching from its right edge.
    PreviousPageRightColumn,
    /// Next page, same row, searching from its left edge.
    NextPageLeftColumn,
    /// Next page, same row, searching from its right edge.
    NextPageRightColumn,
}

/// Direction of a page transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageStep {
    Previous,
    Next,
}

impl PageStep {
    /// Neighbor index if it lies in `[0, page_count)`.
    #[must_use]
    pub fn apply(self, page: usize, page_count: usize) -> Option<usize> {
        let target = match self {
            Self::Previous => page.checked_sub(1)?,
            Self::Next => page.checked_add(1)?,
        };
        (target < page_count).then_some(target)
    }
}

impl Sentinel {
    /// Page step and search anchor for row-continuity crossings.
    #[must_use]
    pub const fn crossing(self) -> Option<(PageStep, Anchor)> {
        match self {
            Self::PreviousPageLeftColumn => Some((PageStep::Previous, Anchor::LeftColumn)),
            Self::PreviousPageRightColumn => Some((PageStep::Previous, Anchor::RightColumn)),
            Self::NextPageLeftColumn => Some((PageStep::Next, Anchor::LeftColumn)),
            Self::NextPageRightColumn => Some((PageStep::Next, Anchor::RightColumn)),
            _ => None,
        }
    }

    /// Page step for sentinels that change page, crossings included.
    #[must_use]
    pub const fn page_step(self) -> Option<PageStep> {
        match self {
            Self::PreviousPageFirst
            | Self::PreviousPageLast
            | Self::PreviousPageLeftColumn
            | Self::PreviousPageRightColumn => Some(PageStep::Previous),
            Self::NextPageFirst | Self::NextPageLeftColumn | Self::NextPageRightColumn => {
                Some(PageStep::Next)
            }
            Self::NoOp | Self::CurrentPageFirst | Self::CurrentPageLast => None,
        }
    }
}

/// What a resolver decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResolutionOutcome {
    /// Move to this slot of the matrix that was resolved against.
    Concrete(usize),
    /// A boundary condition for the caller to interpret.
    Sentinel(Sentinel),
}

impl ResolutionOutcome {
    pub const NOOP: Self = Self::Sentinel(Sentinel::NoOp);

    /// The slot, if concrete.
    #[must_use]
    pub const fn concrete(self) -> Option<usize> {
        match self {
            Self::Concrete(index) => Some(index),
            Self::Sentinel(_) => None,
        }
    }

    #[must_use]
    pub const fn is_noop(self) -> bool {
        matches!(self, Self::Sentinel(Sentinel::NoOp))
    }
}

impl From<Sentinel> for ResolutionOutcome {
    fn from(sentinel: Sentinel) -> Self {
        Self::Sentinel(sentinel)
    }
}

/// Inputs to one resolution call.
///
/// `size` is the grid as the resolver sees it, which is the merged or
/// anchored matrix size rather than the physical grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigationContext {
    pub key: KeyCode,
    pub size: GridSize,
    /// Slot the search starts from.
    pub current: Option<usize>,
    /// Fallback origin when `current` is not in the matrix.
    pub pivot: Option<CellPos>,
    pub page_index: usize,
    pub page_count: usize,
}

impl NavigationContext {
    /// Search from a real slot.
    #[must_use]
    pub fn at_slot(
        key: KeyCode,
        matrix: &OccupancyMatrix,
        current: usize,
        page_index: usize,
        page_count: usize,
    ) -> Self {
        Self {
            key,
            size: matrix.size(),
            current: Some(current),
            pivot: None,
            page_index,
            page_count,
        }
    }

    /// Search from a virtual pivot cell.
    #[must_use]
    pub fn at_pivot(
        key: KeyCode,
        matrix: &OccupancyMatrix,
        pivot: CellPos,
        page_index: usize,
        page_count: usize,
    ) -> Self {
        Self {
            key,
            size: matrix.size(),
            current: None,
            pivot: Some(pivot),
            page_index,
            page_count,
        }
    }
}
