//! End-to-end key handling against the recording host.

use std::cell::Cell;

use gridnav_core::{CellPos, KeyCode, KeyEvent, KeyEventKind, LayoutOrientation, NavDirection};
use gridnav_focus::{
    DockDispatcher, FocusTarget, GridDispatcher, ItemRef, MatrixResolver, NavConfig,
    NavigationContext, OccupancyMatrix, PagedDispatcher, ResolutionOutcome, Resolver, Sentinel,
    SoundCue, build_full_matrix,
};
use gridnav_harness::{FakeContainer, FakePager, HostEvent, RecordingHost};

const H: LayoutOrientation = LayoutOrientation::Horizontal;
const V: LayoutOrientation = LayoutOrientation::VerticalBar;

fn pages(pages: Vec<FakeContainer>) -> RecordingHost {
    RecordingHost::new(FakePager::new(pages))
}

fn grid() -> GridDispatcher {
    GridDispatcher::new(NavConfig::default())
}

fn press(host: &mut RecordingHost, origin: ItemRef, key: KeyCode) -> bool {
    grid().handle_key(host, origin, KeyEvent::new(key), H)
}

fn item(page: usize, index: usize) -> FocusTarget {
    FocusTarget::Item(ItemRef::page(page, index))
}

// =========================================================================
// Plain grid
// =========================================================================

#[test]
fn left_in_full_four_by_four() {
    let mut host = pages(vec![FakeContainer::full(4, 4, 16)]);
    assert!(press(&mut host, ItemRef::page(0, 10), KeyCode::Left));
    assert_eq!(
        host.events(),
        &[
            HostEvent::Focused(item(0, 9)),
            HostEvent::Sound(SoundCue::NavigateLeft)
        ]
    );
}

#[test]
fn up_at_top_row_resolves_to_noop() {
    let m = build_full_matrix(gridnav_core::GridSize::new(4, 4), 16).expect("valid");
    let ctx = NavigationContext::at_slot(KeyCode::Up, &m, 2, 0, 1);
    assert_eq!(MatrixResolver.resolve(&ctx, &m), ResolutionOutcome::NOOP);

    let mut host = pages(vec![FakeContainer::full(4, 4, 16)]);
    assert!(press(&mut host, ItemRef::page(0, 2), KeyCode::Up));
    assert_eq!(host.focused(), vec![FocusTarget::Beyond(NavDirection::Up)]);
}

#[test]
fn right_at_page_edge_keeps_row() {
    let mut host = pages(vec![
        FakeContainer::full(3, 2, 6),
        FakeContainer::full(3, 2, 6),
    ]);
    assert!(press(&mut host, ItemRef::page(0, 5), KeyCode::Right));
    assert_eq!(host.pager.snaps(), &[1]);
    assert_eq!(host.last_focus(), Some(item(1, 3)));
    assert_eq!(host.cues(), vec![SoundCue::NavigateRight]);
}

#[test]
fn left_at_page_edge_lands_on_rightmost_of_row() {
    let mut host = RecordingHost::new(
        FakePager::new(vec![
            FakeContainer::from_ascii(
                "x x .
                 x . .",
            ),
            FakeContainer::full(3, 2, 6),
        ])
        .at(1),
    );
    // Page 0 row 0 holds items 0 and 1; row 1 only item 2.
    assert!(press(&mut host, ItemRef::page(1, 0), KeyCode::Left));
    assert_eq!(host.last_focus(), Some(item(0, 1)));
    assert!(press(&mut host, ItemRef::page(1, 3), KeyCode::Left));
    assert_eq!(host.last_focus(), Some(item(0, 2)));
}

#[test]
fn sparse_grid_skips_holes() {
    let mut host = pages(vec![FakeContainer::from_ascii(
        "x . . x
         . . x .",
    )]);
    assert!(press(&mut host, ItemRef::page(0, 0), KeyCode::Right));
    assert!(press(&mut host, ItemRef::page(0, 1), KeyCode::Down));
    assert_eq!(host.focused(), vec![item(0, 1), item(0, 2)]);
}

#[test]
fn pending_neighbor_page_absorbs_crossing() {
    let mut host = RecordingHost::new(
        FakePager::new(vec![
            FakeContainer::full(3, 2, 6),
            FakeContainer::full(3, 2, 6),
        ])
        .with_pending(1),
    );
    assert!(press(&mut host, ItemRef::page(0, 2), KeyCode::Right));
    assert!(host.events().is_empty());
    assert!(host.pager.snaps().is_empty());
}

#[test]
fn page_keys_on_grid() {
    let mut host = pages(vec![
        FakeContainer::full(3, 2, 6),
        FakeContainer::full(3, 2, 4),
    ]);
    let d = grid();
    assert!(d.handle_key(&mut host, ItemRef::page(0, 4), KeyEvent::new(KeyCode::PageDown), H));
    assert_eq!(host.last_focus(), Some(item(1, 0)));
    assert!(d.handle_key(&mut host, ItemRef::page(1, 0), KeyEvent::new(KeyCode::End), H));
    assert_eq!(host.last_focus(), Some(item(1, 3)));
    assert!(d.handle_key(&mut host, ItemRef::page(1, 3), KeyEvent::new(KeyCode::PageUp), H));
    assert_eq!(host.last_focus(), Some(item(0, 0)));
    assert!(d.handle_key(&mut host, ItemRef::page(0, 0), KeyEvent::new(KeyCode::PageUp), H));
    assert_eq!(host.last_focus(), Some(item(0, 0)));
    assert_eq!(host.pager.snaps(), &[1, 0]);
    assert_eq!(
        host.cues(),
        vec![
            SoundCue::NavigateDown,
            SoundCue::NavigateDown,
            SoundCue::NavigateUp,
            SoundCue::NavigateUp,
        ]
    );
}

#[test]
fn delete_key_removes_exactly_once() {
    let mut host = pages(vec![FakeContainer::full(4, 4, 16)]);
    assert!(press(&mut host, ItemRef::page(0, 7), KeyCode::Delete));
    assert_eq!(host.events(), &[HostEvent::Removed(ItemRef::page(0, 7))]);
}

#[test]
fn release_is_consumed_silently() {
    let mut host = pages(vec![FakeContainer::full(4, 4, 16)]);
    let d = grid();
    for code in [KeyCode::Left, KeyCode::Delete, KeyCode::PageDown] {
        assert!(d.handle_key(&mut host, ItemRef::page(0, 5), KeyEvent::release(code), H));
    }
    assert!(host.events().is_empty());
}

#[test]
fn repeat_resolves_like_press() {
    let mut host = pages(vec![FakeContainer::full(4, 4, 16)]);
    let event = KeyEvent::new(KeyCode::Right).with_kind(KeyEventKind::Repeat);
    assert!(grid().handle_key(&mut host, ItemRef::page(0, 5), event, H));
    assert_eq!(host.last_focus(), Some(item(0, 6)));
}

#[test]
fn unowned_keys_pass_through() {
    let mut host = pages(vec![FakeContainer::full(4, 4, 16)]);
    let d = grid();
    for code in [KeyCode::Enter, KeyCode::Tab, KeyCode::Char('q'), KeyCode::Other(300)] {
        assert!(!d.handle_key(&mut host, ItemRef::page(0, 5), KeyEvent::new(code), H));
    }
    assert!(host.events().is_empty());
}

#[test]
fn sound_feedback_can_be_disabled() {
    let mut host = pages(vec![FakeContainer::full(4, 4, 16)]);
    let d = GridDispatcher::new(NavConfig::default().with_sound_feedback(false));
    assert!(d.handle_key(&mut host, ItemRef::page(0, 5), KeyEvent::new(KeyCode::Left), H));
    assert_eq!(host.events(), &[HostEvent::Focused(item(0, 4))]);
}

#[test]
fn invalid_layout_is_not_consumed() {
    let mut host = pages(vec![FakeContainer::full(4, 4, 16).with_size(0, 4)]);
    assert!(!press(&mut host, ItemRef::page(0, 0), KeyCode::Left));
    assert!(host.events().is_empty());
}

#[test]
#[should_panic(expected = "invalid grid dimensions")]
fn strict_layout_panics() {
    let mut host = pages(vec![FakeContainer::full(4, 4, 16).with_size(0, 4)]);
    let d = GridDispatcher::new(NavConfig::default().with_strict_layout(true));
    d.handle_key(&mut host, ItemRef::page(0, 0), KeyEvent::new(KeyCode::Left), H);
}

// =========================================================================
// Grid and dock
// =========================================================================

fn docked() -> RecordingHost {
    pages(vec![
        FakeContainer::full(4, 3, 12),
        FakeContainer::full(4, 3, 12),
    ])
    .with_dock(FakeContainer::full(4, 1, 4))
    .with_all_items_rank(2)
}

#[test]
fn dock_up_from_all_items_reaches_bottom_row() {
    let mut host = docked();
    let d = DockDispatcher::new(NavConfig::default());
    assert!(d.handle_key(&mut host, ItemRef::dock(2), KeyEvent::new(KeyCode::Up), H));
    assert_eq!(host.last_focus(), Some(item(0, 10)));
    assert_eq!(host.cues(), vec![SoundCue::NavigateUp]);
}

#[test]
fn dock_up_follows_scrolled_page() {
    let mut host = docked();
    host.pager = FakePager::new(vec![
        FakeContainer::full(4, 3, 12),
        FakeContainer::from_ascii(
            ". . . .
             . x . .
             . . . .",
        ),
    ])
    .at(1);
    let d = DockDispatcher::new(NavConfig::default());
    assert!(d.handle_key(&mut host, ItemRef::dock(3), KeyEvent::new(KeyCode::Up), H));
    assert_eq!(host.last_focus(), Some(item(1, 0)));
}

#[test]
fn grid_down_then_dock_up_round_trip() {
    let mut host = docked();
    let g = grid();
    let d = DockDispatcher::new(NavConfig::default());
    assert!(g.handle_key(&mut host, ItemRef::page(0, 9), KeyEvent::new(KeyCode::Down), H));
    assert_eq!(host.last_focus(), Some(FocusTarget::Item(ItemRef::dock(1))));
    assert!(d.handle_key(&mut host, ItemRef::dock(1), KeyEvent::new(KeyCode::Up), H));
    assert_eq!(host.last_focus(), Some(item(0, 9)));
}

#[test]
fn dock_page_down_lands_on_next_page() {
    let mut host = docked();
    let d = DockDispatcher::new(NavConfig::default());
    assert!(d.handle_key(&mut host, ItemRef::dock(0), KeyEvent::new(KeyCode::PageDown), H));
    assert_eq!(host.pager.snaps(), &[1]);
    assert_eq!(host.last_focus(), Some(item(1, 0)));
}

#[test]
fn vertical_bar_dock_left_reaches_grid() {
    let mut host = pages(vec![FakeContainer::full(3, 3, 9)])
        .with_dock(FakeContainer::full(1, 3, 3));
    let d = DockDispatcher::new(NavConfig::default());
    assert!(d.handle_key(&mut host, ItemRef::dock(2), KeyEvent::new(KeyCode::Left), V));
    assert_eq!(host.last_focus(), Some(item(0, 8)));
}

#[test]
fn vertical_bar_dock_right_on_last_page_stays_in_dock() {
    let mut host = pages(vec![FakeContainer::full(3, 3, 9)])
        .with_dock(FakeContainer::full(1, 3, 3));
    let d = DockDispatcher::new(NavConfig::default());
    // Remapped to PageDown; on the last page that is the dock's last item.
    assert!(d.handle_key(&mut host, ItemRef::dock(0), KeyEvent::new(KeyCode::Right), V));
    assert_eq!(host.last_focus(), Some(FocusTarget::Item(ItemRef::dock(2))));
    assert_eq!(host.cues(), vec![SoundCue::NavigateDown]);
}

fn vertical_bar_with_all_items() -> RecordingHost {
    pages(vec![FakeContainer::full(3, 3, 9)])
        .with_dock(FakeContainer::full(1, 3, 3))
        .with_all_items_rank(1)
}

#[test]
fn vertical_bar_all_items_button_reaches_grid() {
    let mut host = vertical_bar_with_all_items();
    let d = DockDispatcher::new(NavConfig::default());
    assert!(d.handle_key(&mut host, ItemRef::dock(1), KeyEvent::new(KeyCode::Left), V));
    assert_eq!(host.last_focus(), Some(item(0, 5)));
    assert_eq!(host.cues(), vec![SoundCue::NavigateLeft]);
}

#[test]
fn vertical_bar_grid_skips_all_items_button() {
    let mut host = vertical_bar_with_all_items();
    // (3,1) holds the all-items button; the cone moves on to row 2 first.
    assert!(grid().handle_key(&mut host, ItemRef::page(0, 5), KeyEvent::new(KeyCode::Right), V));
    assert_eq!(host.last_focus(), Some(FocusTarget::Item(ItemRef::dock(2))));
}

/// Delegates to [`MatrixResolver`] and remembers what one cell held.
struct CellWatch {
    pos: CellPos,
    seen: Cell<Option<Option<usize>>>,
}

impl CellWatch {
    fn new(col: u16, row: u16) -> Self {
        Self {
            pos: CellPos::new(col, row),
            seen: Cell::new(None),
        }
    }
}

impl Resolver for CellWatch {
    fn resolve(&self, ctx: &NavigationContext, matrix: &OccupancyMatrix) -> ResolutionOutcome {
        self.seen.set(Some(matrix.get(self.pos)));
        MatrixResolver.resolve(ctx, matrix)
    }
}

#[test]
fn vertical_bar_all_items_cell_only_open_from_its_own_row() {
    let watch = CellWatch::new(3, 1);
    let d = DockDispatcher::with_resolver(&watch, NavConfig::default());

    let mut host = vertical_bar_with_all_items();
    assert!(d.handle_key(&mut host, ItemRef::dock(2), KeyEvent::new(KeyCode::Left), V));
    assert_eq!(watch.seen.get(), Some(None));
    assert_eq!(host.last_focus(), Some(item(0, 8)));

    let mut host = vertical_bar_with_all_items();
    assert!(d.handle_key(&mut host, ItemRef::dock(1), KeyEvent::new(KeyCode::Left), V));
    // Dock slots follow the nine page slots.
    assert_eq!(watch.seen.get(), Some(Some(10)));
}

// =========================================================================
// Paged grids
// =========================================================================

#[test]
fn drawer_crossing_uses_full_matrix() {
    let mut host = pages(vec![
        FakeContainer::full(4, 3, 12),
        FakeContainer::full(4, 3, 5),
    ]);
    let d = PagedDispatcher::new(NavConfig::default());
    // Item 11 is row 2; page 1 has no row 2, so the cone finds row 1.
    assert!(d.handle_key(&mut host, ItemRef::page(0, 11), KeyEvent::new(KeyCode::Right)));
    assert_eq!(host.pager.snaps(), &[1]);
    assert_eq!(host.last_focus(), Some(item(1, 4)));
}

#[test]
fn drawer_left_edge_crosses_to_previous_page() {
    let mut host = RecordingHost::new(
        FakePager::new(vec![
            FakeContainer::full(3, 2, 6),
            FakeContainer::full(3, 2, 6),
        ])
        .at(1),
    );
    let d = PagedDispatcher::new(NavConfig::default());
    assert!(d.handle_key(&mut host, ItemRef::page(1, 3), KeyEvent::new(KeyCode::Left)));
    assert_eq!(host.pager.snaps(), &[0]);
    assert_eq!(host.last_focus(), Some(item(0, 5)));
    assert_eq!(host.cues(), vec![SoundCue::NavigateLeft]);
}

#[test]
fn folder_down_at_bottom_focuses_name_field() {
    let mut host = pages(vec![FakeContainer::full(3, 3, 7)]);
    let d = PagedDispatcher::new(NavConfig::default()).with_noop_fallback(NavDirection::Down);
    assert!(d.handle_key(&mut host, ItemRef::page(0, 6), KeyEvent::new(KeyCode::Down)));
    assert_eq!(
        host.events(),
        &[
            HostEvent::Focused(FocusTarget::Beyond(NavDirection::Down)),
            HostEvent::Sound(SoundCue::NavigateDown),
        ]
    );
}

// =========================================================================
// Resolver injection
// =========================================================================

/// Always answers with the same sentinel for paging keys.
struct PreviousLastOnPageUp;

impl Resolver for PreviousLastOnPageUp {
    fn resolve(&self, ctx: &NavigationContext, matrix: &OccupancyMatrix) -> ResolutionOutcome {
        match ctx.key {
            KeyCode::PageUp => ResolutionOutcome::Sentinel(Sentinel::PreviousPageLast),
            _ => MatrixResolver.resolve(ctx, matrix),
        }
    }
}

#[test]
fn next_first_then_previous_last_returns_to_last_item() {
    let mut host = pages(vec![
        FakeContainer::full(3, 2, 5),
        FakeContainer::full(3, 2, 6),
    ]);
    let d = GridDispatcher::with_resolver(PreviousLastOnPageUp, NavConfig::default());
    assert!(d.handle_key(&mut host, ItemRef::page(0, 1), KeyEvent::new(KeyCode::PageDown), H));
    assert_eq!(host.last_focus(), Some(item(1, 0)));
    assert!(d.handle_key(&mut host, ItemRef::page(1, 0), KeyEvent::new(KeyCode::PageUp), H));
    assert_eq!(host.last_focus(), Some(item(0, 4)));
    assert_eq!(host.pager.snaps(), &[1, 0]);
}

/// Mirrors page order at the edges: Left runs off into the next page and
/// Right into the previous one.
struct Mirrored;

impl Resolver for Mirrored {
    fn resolve(&self, ctx: &NavigationContext, matrix: &OccupancyMatrix) -> ResolutionOutcome {
        let outcome = MatrixResolver.resolve(ctx, matrix);
        if ctx.current.is_none() || outcome.concrete().is_some() {
            return outcome;
        }
        match ctx.key {
            KeyCode::Left => ResolutionOutcome::Sentinel(Sentinel::NextPageRightColumn),
            KeyCode::Right => ResolutionOutcome::Sentinel(Sentinel::PreviousPageLeftColumn),
            _ => outcome,
        }
    }
}

#[test]
fn mirrored_left_edge_enters_next_page_from_the_right() {
    let mut host = pages(vec![
        FakeContainer::full(3, 2, 6),
        FakeContainer::full(3, 2, 6),
    ]);
    let d = GridDispatcher::with_resolver(Mirrored, NavConfig::default());
    assert!(d.handle_key(&mut host, ItemRef::page(0, 3), KeyEvent::new(KeyCode::Left), H));
    assert_eq!(host.pager.snaps(), &[1]);
    assert_eq!(host.last_focus(), Some(item(1, 5)));
}

#[test]
fn mirrored_right_edge_enters_previous_page_from_the_left() {
    let mut host = RecordingHost::new(
        FakePager::new(vec![
            FakeContainer::full(3, 2, 6),
            FakeContainer::full(3, 2, 6),
        ])
        .at(1),
    );
    let d = PagedDispatcher::with_resolver(Mirrored, NavConfig::default());
    assert!(d.handle_key(&mut host, ItemRef::page(1, 5), KeyEvent::new(KeyCode::Right)));
    assert_eq!(host.pager.snaps(), &[0]);
    assert_eq!(host.last_focus(), Some(item(0, 3)));
}
