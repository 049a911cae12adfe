#![forbid(unsafe_code)]

//! In-memory fixtures for exercising the gridnav dispatchers.
//!
//! - [`FakeContainer`]: a grid whose children sit at fixed cells, built
//!   row-major, from explicit cells, or from an ASCII picture.
//! - [`FakePager`]: a list of pages with a current index and a snap log.
//! - [`RecordingHost`]: a [`NavigationHost`] that records every side effect.
//! - [`trace`]: a `tracing` layer that captures spans and events.
//!
//! [`NavigationHost`]: gridnav_focus::NavigationHost

pub mod trace;

use gridnav_core::{CellPos, GridSize};
use gridnav_focus::{
    Container, FocusSink, FocusTarget, ItemRef, ItemRemoval, NavigationHost, Pager, SoundCue,
    SoundFeedback,
};

/// A grid with children at fixed cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FakeContainer {
    size: GridSize,
    cells: Vec<CellPos>,
}

impl FakeContainer {
    /// `count` children filling `cols x rows` row-major.
    #[must_use]
    pub fn full(cols: u16, rows: u16, count: usize) -> Self {
        let size = GridSize::new(cols, rows);
        Self {
            size,
            cells: (0..count).map_while(|i| size.unlinear(i)).collect(),
        }
    }

    /// Children at explicit cells, in child order.
    #[must_use]
    pub fn sparse(cols: u16, rows: u16, cells: &[(u16, u16)]) -> Self {
        Self {
            size: GridSize::new(cols, rows),
            cells: cells.iter().map(|&(c, r)| CellPos::new(c, r)).collect(),
        }
    }

    /// Parse a picture such as:
    ///
    /// ```text
    /// x . x
    /// . x .
    /// ```
    ///
    /// `.` is an empty cell, any other token a child. Children are numbered
    /// in reading order. Width is the longest row.
    #[must_use]
    pub fn from_ascii(picture: &str) -> Self {
        let rows: Vec<Vec<&str>> = picture
            .lines()
            .map(|line| line.split_whitespace().collect::<Vec<_>>())
            .filter(|tokens| !tokens.is_empty())
            .collect();
        let cols = rows.iter().map(Vec::len).max().unwrap_or(0);
        let mut cells = Vec::new();
        for (r, tokens) in rows.iter().enumerate() {
            for (c, token) in tokens.iter().enumerate() {
                if *token != "." {
                    cells.push(CellPos::new(axis(c), axis(r)));
                }
            }
        }
        Self {
            size: GridSize::new(axis(cols), axis(rows.len())),
            cells,
        }
    }

    /// A grid with no children.
    #[must_use]
    pub fn empty(cols: u16, rows: u16) -> Self {
        Self::sparse(cols, rows, &[])
    }

    /// Override the declared size, keeping the children.
    #[must_use]
    pub fn with_size(mut self, cols: u16, rows: u16) -> Self {
        self.size = GridSize::new(cols, rows);
        self
    }
}

fn axis(n: usize) -> u16 {
    u16::try_from(n).expect("picture too large")
}

impl Container for FakeContainer {
    fn grid_size(&self) -> GridSize {
        self.size
    }

    fn child_count(&self) -> usize {
        self.cells.len()
    }

    fn position_of(&self, index: usize) -> Option<CellPos> {
        self.cells.get(index).copied()
    }
}

/// Pages plus a current index. Snaps take effect immediately.
#[derive(Debug, Clone, Default)]
pub struct FakePager {
    pages: Vec<Option<FakeContainer>>,
    current: usize,
    snaps: Vec<usize>,
}

impl FakePager {
    #[must_use]
    pub fn new(pages: Vec<FakeContainer>) -> Self {
        Self {
            pages: pages.into_iter().map(Some).collect(),
            current: 0,
            snaps: Vec::new(),
        }
    }

    #[must_use]
    pub fn at(mut self, current: usize) -> Self {
        self.current = current;
        self
    }

    /// Keep page `index` counted but unavailable, as while it is created.
    #[must_use]
    pub fn with_pending(mut self, index: usize) -> Self {
        if let Some(page) = self.pages.get_mut(index) {
            *page = None;
        }
        self
    }

    /// Every page snapped to, oldest first.
    #[must_use]
    pub fn snaps(&self) -> &[usize] {
        &self.snaps
    }
}

impl Pager for FakePager {
    fn current_page_index(&self) -> usize {
        self.current
    }

    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn page(&self, index: usize) -> Option<&dyn Container> {
        self.pages
            .get(index)
            .and_then(Option::as_ref)
            .map(|page| page as &dyn Container)
    }

    fn snap_to_page(&mut self, index: usize) {
        self.snaps.push(index);
        self.current = index;
    }
}

/// A side effect requested by a dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostEvent {
    Focused(FocusTarget),
    Sound(SoundCue),
    Removed(ItemRef),
}

/// Host that records side effects instead of performing them.
#[derive(Debug, Clone, Default)]
pub struct RecordingHost {
    pub pager: FakePager,
    pub dock: Option<FakeContainer>,
    pub all_items_rank: Option<u16>,
    events: Vec<HostEvent>,
}

impl RecordingHost {
    #[must_use]
    pub fn new(pager: FakePager) -> Self {
        Self {
            pager,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_dock(mut self, dock: FakeContainer) -> Self {
        self.dock = Some(dock);
        self
    }

    #[must_use]
    pub fn with_all_items_rank(mut self, rank: u16) -> Self {
        self.all_items_rank = Some(rank);
        self
    }

    #[must_use]
    pub fn events(&self) -> &[HostEvent] {
        &self.events
    }

    /// Focus requests only.
    #[must_use]
    pub fn focused(&self) -> Vec<FocusTarget> {
        self.events
            .iter()
            .filter_map(|e| match e {
                HostEvent::Focused(target) => Some(*target),
                _ => None,
            })
            .collect()
    }

    /// The most recent focus request.
    #[must_use]
    pub fn last_focus(&self) -> Option<FocusTarget> {
        self.focused().last().copied()
    }

    /// Sound cues only.
    #[must_use]
    pub fn cues(&self) -> Vec<SoundCue> {
        self.events
            .iter()
            .filter_map(|e| match e {
                HostEvent::Sound(cue) => Some(*cue),
                _ => None,
            })
            .collect()
    }

    /// Removal requests only.
    #[must_use]
    pub fn removed(&self) -> Vec<ItemRef> {
        self.events
            .iter()
            .filter_map(|e| match e {
                HostEvent::Removed(item) => Some(*item),
                _ => None,
            })
            .collect()
    }

    /// Forget recorded events and snaps.
    pub fn clear(&mut self) {
        self.events.clear();
        self.pager.snaps.clear();
    }
}

impl FocusSink for RecordingHost {
    fn request_focus(&mut self, target: FocusTarget) {
        self.events.push(HostEvent::Focused(target));
    }
}

impl SoundFeedback for RecordingHost {
    fn play_directional(&mut self, cue: SoundCue) {
        self.events.push(HostEvent::Sound(cue));
    }
}

impl ItemRemoval for RecordingHost {
    fn remove(&mut self, item: ItemRef) {
        self.events.push(HostEvent::Removed(item));
    }
}

impl NavigationHost for RecordingHost {
    fn pager(&self) -> &dyn Pager {
        &self.pager
    }

    fn pager_mut(&mut self) -> &mut dyn Pager {
        &mut self.pager
    }

    fn dock_container(&self) -> Option<&dyn Container> {
        self.dock.as_ref().map(|dock| dock as &dyn Container)
    }

    fn all_items_rank(&self) -> Option<u16> {
        self.all_items_rank
    }
}
