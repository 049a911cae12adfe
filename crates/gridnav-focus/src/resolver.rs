#![forbid(unsafe_code)]

//! Directional resolution: from a slot and a key to the next slot.
//!
//! The [`Resolver`] trait is the seam the dispatchers and the page
//! coordinator call through. [`MatrixResolver`] is the reference
//! implementation.
//!
//! # Algorithm
//!
//! 1. Locate the origin: the cell holding `current`, else the pivot.
//! 2. Scan the origin's row (left/right) or column (up/down) in the key's
//!    direction and take the first occupied cell.
//! 3. Otherwise widen into a cone: at distance `k`, scan from `k` steps
//!    ahead, checking the line `k` steps to one side and then the other.
//! 4. If still nothing, left/right fall off the page edge and report a
//!    row-continuity crossing when a neighbor page exists.
//!
//! # Invariants
//!
//! - Only occupied cells are ever returned as `Concrete`.
//! - The origin cell is never returned.
//! - The algorithm is deterministic: same inputs → same outcome.
//! - Up/down never leave the page; they report `NoOp` at the edge.

use gridnav_core::{CellPos, KeyCode, NavDirection};

use crate::matrix::OccupancyMatrix;
use crate::outcome::{NavigationContext, ResolutionOutcome, Sentinel};

/// Maps a key and an origin inside a matrix to an outcome.
pub trait Resolver {
    fn resolve(&self, ctx: &NavigationContext, matrix: &OccupancyMatrix) -> ResolutionOutcome;
}

impl<R: Resolver + ?Sized> Resolver for &R {
    fn resolve(&self, ctx: &NavigationContext, matrix: &OccupancyMatrix) -> ResolutionOutcome {
        (**self).resolve(ctx, matrix)
    }
}

/// Reference nearest-cell resolver.
#[derive(Debug, Clone, Copy, Default)]
pub struct MatrixResolver;

impl MatrixResolver {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Resolver for MatrixResolver {
    fn resolve(&self, ctx: &NavigationContext, matrix: &OccupancyMatrix) -> ResolutionOutcome {
        let last_page = ctx.page_index + 1 >= ctx.page_count;
        match ctx.key {
            KeyCode::Home => Sentinel::CurrentPageFirst.into(),
            KeyCode::End => Sentinel::CurrentPageLast.into(),
            KeyCode::PageUp if ctx.page_index > 0 => Sentinel::PreviousPageFirst.into(),
            KeyCode::PageUp => Sentinel::CurrentPageFirst.into(),
            KeyCode::PageDown if !last_page => Sentinel::NextPageFirst.into(),
            KeyCode::PageDown => Sentinel::CurrentPageLast.into(),
            code => {
                let Some(dir) = code.direction() else {
                    return ResolutionOutcome::NOOP;
                };
                let Some(origin) = locate(ctx, matrix) else {
                    return ResolutionOutcome::NOOP;
                };
                if let Some(slot) = search(ctx, matrix, origin, dir) {
                    return ResolutionOutcome::Concrete(slot);
                }
                match dir {
                    NavDirection::Left if ctx.page_index > 0 => {
                        Sentinel::PreviousPageRightColumn.into()
                    }
                    NavDirection::Right if !last_page => Sentinel::NextPageLeftColumn.into(),
                    _ => ResolutionOutcome::NOOP,
                }
            }
        }
    }
}

fn locate(ctx: &NavigationContext, matrix: &OccupancyMatrix) -> Option<(i32, i32)> {
    let pos: CellPos = ctx
        .current
        .and_then(|index| matrix.find(index))
        .or(ctx.pivot)?;
    Some((i32::from(pos.col), i32::from(pos.row)))
}

/// Occupied slot at a signed coordinate inside the resolver's view.
fn inspect(
    ctx: &NavigationContext,
    matrix: &OccupancyMatrix,
    col: i32,
    row: i32,
) -> Option<usize> {
    if !ctx.size.contains_signed(col, row) {
        return None;
    }
    matrix.get_signed(col, row)
}

fn search(
    ctx: &NavigationContext,
    matrix: &OccupancyMatrix,
    (x, y): (i32, i32),
    dir: NavDirection,
) -> Option<usize> {
    let (dx, dy) = dir.delta();
    let cols = i32::from(ctx.size.cols);
    let rows = i32::from(ctx.size.rows);

    if dir.is_horizontal() {
        // Same row first.
        let mut i = x + dx;
        while 0 <= i && i < cols {
            if let Some(slot) = inspect(ctx, matrix, i, y) {
                return Some(slot);
            }
            i += dx;
        }
        // Cone: rows y±k, starting k columns ahead.
        for k in 1..rows {
            let ahead = y + k * dx;
            let behind = y - k * dx;
            let mut i = x + k * dx;
            while 0 <= i && i < cols {
                if let Some(slot) = inspect(ctx, matrix, i, ahead) {
                    return Some(slot);
                }
                if let Some(slot) = inspect(ctx, matrix, i, behind) {
                    return Some(slot);
                }
                i += dx;
            }
        }
    } else {
        // Same column first.
        let mut j = y + dy;
        while 0 <= j && j < rows {
            if let Some(slot) = inspect(ctx, matrix, x, j) {
                return Some(slot);
            }
            j += dy;
        }
        // Cone: columns x±k, starting k rows ahead.
        for k in 1..cols {
            let ahead = x + k * dy;
            let behind = x - k * dy;
            let mut j = y + k * dy;
            while 0 <= j && j < rows {
                if let Some(slot) = inspect(ctx, matrix, ahead, j) {
                    return Some(slot);
                }
                if let Some(slot) = inspect(ctx, matrix, behind, j) {
                    return Some(slot);
                }
                j += dy;
            }
        }
    }
    None
}

// =========================================================================
// Tests
// =========================================================================
