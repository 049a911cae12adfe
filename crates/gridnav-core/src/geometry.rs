#![forbid(unsafe_code)]

//! Cell-grid geometry.

use std::fmt;

/// A cell coordinate inside a grid.
///
/// Uses grid coordinates (0-indexed, origin at top-left).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct CellPos {
    /// Column (x).
    pub col: u16,
    /// Row (y).
    pub row: u16,
}

impl CellPos {
    /// Create a new cell position.
    #[inline]
    pub const fn new(col: u16, row: u16) -> Self {
        Self { col, row }
    }
}

impl fmt::Display for CellPos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.col, self.row)
    }
}

/// Grid dimensions in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct GridSize {
    /// Number of columns (countX).
    pub cols: u16,
    /// Number of rows (countY).
    pub rows: u16,
}

impl GridSize {
    /// Create a new grid size.
    #[inline]
    pub const fn new(cols: u16, rows: u16) -> Self {
        Self { cols, rows }
    }

    /// Number of cells.
    #[inline]
    pub const fn area(&self) -> usize {
        self.cols as usize * self.rows as usize
    }

    /// Check if the grid has no cells.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.cols == 0 || self.rows == 0
    }

    /// Check if a cell lies inside the grid.
    #[inline]
    pub const fn contains(&self, pos: CellPos) -> bool {
        pos.col < self.cols && pos.row < self.rows
    }

    /// Check if a signed coordinate lies inside the grid.
    #[inline]
    pub fn contains_signed(&self, col: i32, row: i32) -> bool {
        0 <= col && col < i32::from(self.cols) && 0 <= row && row < i32::from(self.rows)
    }

    /// Row-major index of a cell, `None` when outside.
    #[inline]
    pub const fn linear(&self, pos: CellPos) -> Option<usize> {
        if self.contains(pos) {
            Some(pos.row as usize * self.cols as usize + pos.col as usize)
        } else {
            None
        }
    }

    /// Cell for a row-major index, `None` when outside.
    #[inline]
    pub const fn unlinear(&self, index: usize) -> Option<CellPos> {
        if self.cols == 0 || index >= self.area() {
            return None;
        }
        let cols = self.cols as usize;
        Some(CellPos::new((index % cols) as u16, (index / cols) as u16))
    }
}

impl fmt::Display for GridSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.cols, self.rows)
    }
}

/// Where the dock sits relative to the paged grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LayoutOrientation {
    /// Dock is a row below the grid.
    #[default]
    Horizontal,
    /// Dock is a column beside the grid (landscape vertical bar).
    VerticalBar,
}
