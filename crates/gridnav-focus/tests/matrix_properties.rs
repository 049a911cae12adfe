//! Property checks for matrix building and resolution.

use std::collections::HashSet;

use gridnav_core::{CellPos, GridSize, KeyCode, NavDirection};
use gridnav_focus::{
    Container, DockMergePolicy, MatrixResolver, MergeOrientation, NavigationContext,
    OccupancyMatrix, ResolutionOutcome, Resolver, build_full_matrix, build_matrix,
    build_merged_matrix,
};
use gridnav_harness::FakeContainer;
use proptest::prelude::*;

/// A grid of `cols x rows` with a random subset of cells occupied.
fn sparse_grid() -> impl Strategy<Value = FakeContainer> {
    (1u16..8, 1u16..6).prop_flat_map(|(cols, rows)| {
        let area = usize::from(cols) * usize::from(rows);
        proptest::collection::vec(any::<bool>(), area).prop_map(move |mask| {
            let cells: Vec<(u16, u16)> = mask
                .iter()
                .enumerate()
                .filter(|(_, on)| **on)
                .map(|(i, _)| ((i % usize::from(cols)) as u16, (i / usize::from(cols)) as u16))
                .collect();
            FakeContainer::sparse(cols, rows, &cells)
        })
    })
}

fn keys() -> impl Strategy<Value = KeyCode> {
    prop_oneof![
        Just(KeyCode::Up),
        Just(KeyCode::Down),
        Just(KeyCode::Left),
        Just(KeyCode::Right),
        Just(KeyCode::Home),
        Just(KeyCode::End),
        Just(KeyCode::PageUp),
        Just(KeyCode::PageDown),
    ]
}

fn assert_unique_and_in_range(matrix: &OccupancyMatrix, count: usize) {
    let mut seen = HashSet::new();
    for (pos, slot) in matrix.occupied() {
        assert!(slot < count, "slot {slot} at {pos} out of range {count}");
        assert!(seen.insert(slot), "slot {slot} appears twice");
    }
}

proptest! {
    #[test]
    fn sparse_slots_are_unique_and_in_range(grid in sparse_grid()) {
        let m = build_matrix(&grid).expect("cells come from the grid");
        assert_unique_and_in_range(&m, grid.child_count());
        prop_assert_eq!(m.occupied_count(), grid.child_count());
        for index in 0..grid.child_count() {
            prop_assert_eq!(m.find(index), grid.position_of(index));
        }
    }

    #[test]
    fn full_matrix_holds_exactly_child_count(
        cols in 1u16..10,
        rows in 1u16..10,
        extra in 0usize..5,
    ) {
        let size = GridSize::new(cols, rows);
        let count = size.area().saturating_sub(extra);
        let m = build_full_matrix(size, count).expect("non-empty size");
        assert_unique_and_in_range(&m, count);
        prop_assert_eq!(m.occupied_count(), count);
    }

    #[test]
    fn resolution_is_deterministic_and_concrete_is_occupied(
        grid in sparse_grid(),
        key in keys(),
        pick in any::<prop::sample::Index>(),
        page in 0usize..3,
    ) {
        prop_assume!(grid.child_count() > 0);
        let m = build_matrix(&grid).expect("valid");
        let current = pick.index(grid.child_count());
        let ctx = NavigationContext::at_slot(key, &m, current, page, 3);
        let first = MatrixResolver.resolve(&ctx, &m);
        let second = MatrixResolver.resolve(&ctx, &m);
        prop_assert_eq!(first, second);
        if let ResolutionOutcome::Concrete(slot) = first {
            prop_assert!(m.find(slot).is_some(), "slot {} is not occupied", slot);
            prop_assert_ne!(slot, current);
        }
    }

    #[test]
    fn vertical_keys_never_leave_the_page(
        grid in sparse_grid(),
        pick in any::<prop::sample::Index>(),
    ) {
        prop_assume!(grid.child_count() > 0);
        let m = build_matrix(&grid).expect("valid");
        let current = pick.index(grid.child_count());
        for dir in [NavDirection::Up, NavDirection::Down] {
            let ctx = NavigationContext::at_slot(dir.key(), &m, current, 1, 3);
            let outcome = MatrixResolver.resolve(&ctx, &m);
            prop_assert!(
                matches!(outcome, ResolutionOutcome::Concrete(_)) || outcome.is_noop(),
                "{:?} produced {:?}", dir, outcome
            );
        }
    }

    #[test]
    fn all_items_cell_follows_inclusion_flag(
        cols in 1u16..7,
        rows in 1u16..5,
        dock_cols in 1u16..7,
        rank_seed in any::<u16>(),
        include in any::<bool>(),
    ) {
        let grid = FakeContainer::full(cols, rows, usize::from(cols) * usize::from(rows));
        let dock = FakeContainer::full(dock_cols, 1, usize::from(dock_cols));
        let rank = rank_seed % dock_cols;
        let policy = DockMergePolicy::new(MergeOrientation::Horizontal)
            .with_all_items(Some(rank), include);
        let m = build_merged_matrix(&grid, &dock, &policy).expect("valid");

        let cell = m.get(CellPos::new(rank, rows));
        let expected = grid.child_count() + usize::from(rank);
        if include {
            prop_assert_eq!(cell, Some(expected));
        } else {
            prop_assert_eq!(cell, None);
        }
        assert_unique_and_in_range(&m, grid.child_count() + dock.child_count());
    }
}
