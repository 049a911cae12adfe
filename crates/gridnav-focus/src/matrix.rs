#![forbid(unsafe_code)]

//! Occupancy matrices: which child sits in which grid cell.
//!
//! A matrix is rebuilt from live container state for every key event and
//! dropped once that event is resolved. Containers can be mutated between
//! events (drag and drop, page insertion), so nothing here is cached.
//!
//! # Variants
//!
//! | Builder | Shape | Used by |
//! |---------|-------|---------|
//! | [`build_matrix`] | container's grid, children at their cells | grid, dock |
//! | [`build_full_matrix`] | row-major fill up to the child count | full-page grids |
//! | [`build_merged_matrix`] | grid plus dock rows/columns | grid ↔ dock moves |
//! | [`build_anchored_matrix`] | grid plus one pivot column | page crossings |
//!
//! # Invariants
//!
//! - Every occupied cell holds a distinct slot index.
//! - Slot indices come from exactly one container child each; merged dock
//!   children are offset by the primary container's child count.
//! - A matrix never has a zero-length axis.

use std::fmt;

use gridnav_core::{CellPos, GridSize};

use crate::error::LayoutError;
use crate::host::Container;

/// 2-D table from (column, row) to a slot index or empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OccupancyMatrix {
    size: GridSize,
    cells: Vec<Option<usize>>,
}

impl OccupancyMatrix {
    /// An all-empty matrix.
    ///
    /// Fails with [`LayoutError::InvalidDimensions`] when either axis is zero.
    pub fn new(size: GridSize) -> Result<Self, LayoutError> {
        if size.is_empty() {
            return Err(LayoutError::InvalidDimensions {
                cols: size.cols,
                rows: size.rows,
            });
        }
        Ok(Self {
            size,
            cells: vec![None; size.area()],
        })
    }

    /// Dimensions (countX, countY).
    #[inline]
    pub const fn size(&self) -> GridSize {
        self.size
    }

    /// Slot at a cell, `None` when empty or outside.
    #[inline]
    pub fn get(&self, pos: CellPos) -> Option<usize> {
        self.size.linear(pos).and_then(|i| self.cells[i])
    }

    /// Slot at a signed coordinate, `None` when empty or outside.
    #[inline]
    pub fn get_signed(&self, col: i32, row: i32) -> Option<usize> {
        if !self.size.contains_signed(col, row) {
            return None;
        }
        self.get(CellPos::new(col as u16, row as u16))
    }

    /// Cell holding `index`, if any.
    pub fn find(&self, index: usize) -> Option<CellPos> {
        self.cells
            .iter()
            .position(|cell| *cell == Some(index))
            .and_then(|i| self.size.unlinear(i))
    }

    /// Row holding `index`, if any.
    pub fn find_row(&self, index: usize) -> Option<u16> {
        self.find(index).map(|pos| pos.row)
    }

    /// Occupied cells in row-major order.
    pub fn occupied(&self) -> impl Iterator<Item = (CellPos, usize)> + '_ {
        self.cells.iter().enumerate().filter_map(|(i, cell)| {
            let index = (*cell)?;
            self.size.unlinear(i).map(|pos| (pos, index))
        })
    }

    /// Number of occupied cells.
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Put `index` at `pos`.
    ///
    /// Fails when the cell is outside the matrix or already occupied.
    pub fn insert(&mut self, pos: CellPos, index: usize) -> Result<(), LayoutError> {
        let Some(linear) = self.size.linear(pos) else {
            return Err(LayoutError::ChildOutOfBounds {
                index,
                pos,
                size: self.size,
            });
        };
        match self.cells[linear] {
            Some(existing) => Err(LayoutError::CellConflict {
                pos,
                existing,
                incoming: index,
            }),
            None => {
                self.cells[linear] = Some(index);
                Ok(())
            }
        }
    }

    fn place_children(
        &mut self,
        container: &dyn Container,
        dx: u16,
        dy: u16,
        base: usize,
        skip: impl Fn(CellPos) -> bool,
    ) -> Result<(), LayoutError> {
        let size = container.grid_size();
        for child in 0..container.child_count() {
            let Some(pos) = container.position_of(child) else {
                continue;
            };
            if !size.contains(pos) {
                return Err(LayoutError::ChildOutOfBounds {
                    index: child,
                    pos,
                    size,
                });
            }
            if skip(pos) {
                continue;
            }
            let shifted = CellPos::new(pos.col.saturating_add(dx), pos.row.saturating_add(dy));
            self.insert(shifted, base + child)?;
        }
        Ok(())
    }
}

impl fmt::Display for OccupancyMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self
            .cells
            .iter()
            .flatten()
            .max()
            .map_or(1, |max| max.to_string().len());
        for row in 0..self.size.rows {
            for col in 0..self.size.cols {
                if col > 0 {
                    f.write_str(" ")?;
                }
                match self.get(CellPos::new(col, row)) {
                    Some(index) => write!(f, "{index:>width$}")?,
                    None => write!(f, "{:>width$}", ".")?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Which way the dock extends the grid when merged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MergeOrientation {
    /// Dock rows are appended below the grid.
    Horizontal,
    /// Dock columns are appended right of the grid.
    Vertical,
}

/// How a dock is folded into the primary grid's matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DockMergePolicy {
    pub orientation: MergeOrientation,
    /// Rank (position along the dock) of the all-items button.
    pub all_items_rank: Option<u16>,
    /// Whether the all-items button takes part in navigation.
    pub include_all_items: bool,
}

impl DockMergePolicy {
    /// Merge without an all-items button.
    #[must_use]
    pub const fn new(orientation: MergeOrientation) -> Self {
        Self {
            orientation,
            all_items_rank: None,
            include_all_items: false,
        }
    }

    /// Set the all-items rank and whether it is navigable.
    #[must_use]
    pub const fn with_all_items(mut self, rank: Option<u16>, include: bool) -> Self {
        self.all_items_rank = rank;
        self.include_all_items = include;
        self
    }

    /// Rank of a dock cell along the merge orientation.
    #[inline]
    pub const fn rank_of(&self, pos: CellPos) -> u16 {
        match self.orientation {
            MergeOrientation::Horizontal => pos.col,
            MergeOrientation::Vertical => pos.row,
        }
    }

    fn excludes(&self, pos: CellPos) -> bool {
        !self.include_all_items && self.all_items_rank == Some(self.rank_of(pos))
    }
}

/// Which edge of a neighbor page a crossing search starts from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Anchor {
    /// Pivot sits left of column 0.
    LeftColumn,
    /// Pivot sits right of the last column.
    RightColumn,
}

/// A matrix with a virtual pivot cell to search from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnchoredMatrix {
    pub matrix: OccupancyMatrix,
    /// The empty cell the search starts from.
    pub pivot: CellPos,
}

/// Build the sparse matrix of a container at its declared size.
pub fn build_matrix(container: &dyn Container) -> Result<OccupancyMatrix, LayoutError> {
    build_matrix_sized(container, container.grid_size())
}

/// Build the sparse matrix of a container at an explicit size.
pub fn build_matrix_sized(
    container: &dyn Container,
    size: GridSize,
) -> Result<OccupancyMatrix, LayoutError> {
    let mut matrix = OccupancyMatrix::new(size)?;
    matrix.place_children(container, 0, 0, 0, |_| false)?;
    Ok(matrix)
}

/// Build a row-major matrix holding slots `0..child_count`.
///
/// Cells past the last child stay empty, so a short last page never yields
/// a slot that does not exist.
pub fn build_full_matrix(
    size: GridSize,
    child_count: usize,
) -> Result<OccupancyMatrix, LayoutError> {
    let mut matrix = OccupancyMatrix::new(size)?;
    for (i, cell) in matrix.cells.iter_mut().enumerate().take(child_count) {
        *cell = Some(i);
    }
    Ok(matrix)
}

/// Build a matrix of `primary` extended by `dock`.
///
/// Dock slots are offset by `primary.child_count()`, so any index at or past
/// that count belongs to the dock. The cross axis spans the wider of the two
/// containers.
pub fn build_merged_matrix(
    primary: &dyn Container,
    dock: &dyn Container,
    policy: &DockMergePolicy,
) -> Result<OccupancyMatrix, LayoutError> {
    let grid = primary.grid_size();
    let strip = dock.grid_size();
    for size in [grid, strip] {
        if size.is_empty() {
            return Err(LayoutError::InvalidDimensions {
                cols: size.cols,
                rows: size.rows,
            });
        }
    }

    let (size, dx, dy) = match policy.orientation {
        MergeOrientation::Horizontal => (
            GridSize::new(
                grid.cols.max(strip.cols),
                grid.rows.saturating_add(strip.rows),
            ),
            0,
            grid.rows,
        ),
        MergeOrientation::Vertical => (
            GridSize::new(
                grid.cols.saturating_add(strip.cols),
                grid.rows.max(strip.rows),
            ),
            grid.cols,
            0,
        ),
    };

    let mut matrix = OccupancyMatrix::new(size)?;
    matrix.place_children(primary, 0, 0, 0, |_| false)?;
    matrix.place_children(dock, dx, dy, primary.child_count(), |pos| {
        policy.excludes(pos)
    })?;
    Ok(matrix)
}

/// Build a sparse matrix with one extra pivot column on the anchor side.
///
/// `row` is clamped to the container's last row.
pub fn build_anchored_matrix(
    container: &dyn Container,
    anchor: Anchor,
    row: u16,
) -> Result<AnchoredMatrix, LayoutError> {
    let (mut matrix, pivot) = anchored_frame(container.grid_size(), anchor, row)?;
    let dx = match anchor {
        Anchor::LeftColumn => 1,
        Anchor::RightColumn => 0,
    };
    matrix.place_children(container, dx, 0, 0, |_| false)?;
    Ok(AnchoredMatrix { matrix, pivot })
}

/// Row-major variant of [`build_anchored_matrix`] for full-page grids.
pub fn build_full_anchored_matrix(
    size: GridSize,
    child_count: usize,
    anchor: Anchor,
    row: u16,
) -> Result<AnchoredMatrix, LayoutError> {
    let (mut matrix, pivot) = anchored_frame(size, anchor, row)?;
    let dx = match anchor {
        Anchor::LeftColumn => 1,
        Anchor::RightColumn => 0,
    };
    for slot in 0..child_count {
        let Some(pos) = size.unlinear(slot) else {
            break;
        };
        matrix.insert(CellPos::new(pos.col + dx, pos.row), slot)?;
    }
    Ok(AnchoredMatrix { matrix, pivot })
}

fn anchored_frame(
    size: GridSize,
    anchor: Anchor,
    row: u16,
) -> Result<(OccupancyMatrix, CellPos), LayoutError> {
    if size.is_empty() {
        return Err(LayoutError::InvalidDimensions {
            cols: size.cols,
            rows: size.rows,
        });
    }
    let row = row.min(size.rows - 1);
    let matrix = OccupancyMatrix::new(GridSize::new(size.cols.saturating_add(1), size.rows))?;
    let pivot = match anchor {
        Anchor::LeftColumn => CellPos::new(0, row),
        Anchor::RightColumn => CellPos::new(size.cols, row),
    };
    Ok((matrix, pivot))
}
