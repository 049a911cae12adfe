#![forbid(unsafe_code)]

//! Collaborator interfaces the embedding UI implements.
//!
//! The dispatchers never walk a widget tree. Everything they need is asked
//! of an injected [`NavigationHost`]: the pager and its page containers, the
//! optional dock, and the sinks for focus, sound, and removal.
//!
//! Items are addressed by [`ItemRef`]: a container plus a child index in that
//! container's child order.

use std::fmt;

use gridnav_core::{CellPos, GridSize, NavDirection};

use crate::sound::SoundCue;

/// Which container an item lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContainerId {
    /// The primary grid of the page with this index.
    Page(usize),
    /// The dock strip.
    Dock,
}

impl fmt::Display for ContainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Page(index) => write!(f, "page {index}"),
            Self::Dock => f.write_str("dock"),
        }
    }
}

/// A child of a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ItemRef {
    pub container: ContainerId,
    pub index: usize,
}

impl ItemRef {
    /// An item on a page's primary grid.
    #[must_use]
    pub const fn page(page: usize, index: usize) -> Self {
        Self {
            container: ContainerId::Page(page),
            index,
        }
    }

    /// An item in the dock.
    #[must_use]
    pub const fn dock(index: usize) -> Self {
        Self {
            container: ContainerId::Dock,
            index,
        }
    }
}

/// Where focus should go after a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FocusTarget {
    /// A grid or dock item.
    Item(ItemRef),
    /// Chrome outside the grid on that edge (search bar, folder title, ...).
    Beyond(NavDirection),
}

/// A grid of positioned children.
pub trait Container {
    /// Declared column/row counts.
    fn grid_size(&self) -> GridSize;

    /// Number of visible children.
    fn child_count(&self) -> usize;

    /// Top-left cell of child `index`, `None` if there is no such child.
    fn position_of(&self, index: usize) -> Option<CellPos>;

    /// Whether `index` names a child.
    fn has_child(&self, index: usize) -> bool {
        index < self.child_count()
    }

    /// Index of the last child, `None` when empty.
    fn last_child(&self) -> Option<usize> {
        self.child_count().checked_sub(1)
    }
}

/// A horizontally paged set of grids.
pub trait Pager {
    /// The page currently shown (or being scrolled to).
    fn current_page_index(&self) -> usize;

    /// Number of pages.
    fn page_count(&self) -> usize;

    /// The primary grid of a page, `None` while the page does not exist.
    fn page(&self, index: usize) -> Option<&dyn Container>;

    /// Start scrolling to a page. Fire-and-forget.
    fn snap_to_page(&mut self, index: usize);
}

/// Receives focus requests.
pub trait FocusSink {
    fn request_focus(&mut self, target: FocusTarget);
}

/// Plays navigation sounds.
pub trait SoundFeedback {
    fn play_directional(&mut self, cue: SoundCue);
}

/// Removes items on delete keys.
pub trait ItemRemoval {
    fn remove(&mut self, item: ItemRef);
}

/// Everything a dispatcher needs from the embedding UI.
pub trait NavigationHost: FocusSink + SoundFeedback + ItemRemoval {
    /// The pager holding the grid pages.
    fn pager(&self) -> &dyn Pager;

    /// Mutable access for page snapping.
    fn pager_mut(&mut self) -> &mut dyn Pager;

    /// The dock strip, if this host has one.
    fn dock_container(&self) -> Option<&dyn Container> {
        None
    }

    /// Dock rank of the privileged all-items button, if any.
    fn all_items_rank(&self) -> Option<u16> {
        None
    }

    /// The grid of the pager's current page.
    fn current_container(&self) -> Option<&dyn Container> {
        let pager = self.pager();
        pager.page(pager.current_page_index())
    }

    /// Resolve a container id.
    fn container(&self, id: ContainerId) -> Option<&dyn Container> {
        match id {
            ContainerId::Page(index) => self.pager().page(index),
            ContainerId::Dock => self.dock_container(),
        }
    }
}
