#![forbid(unsafe_code)]

//! Canonical key event types.
//!
//! Only the keys that grid navigation cares about are named; everything else
//! arrives as [`KeyCode::Char`] or [`KeyCode::Other`] and is never owned by
//! the navigation layer.
//!
//! # Design Notes
//!
//! - `KeyEventKind` defaults to `Press` when the platform cannot distinguish
//! - `Repeat` behaves like `Press` for resolution purposes
//! - A key is *owned* when the dispatchers consume it even if nothing moves

/// A keyboard key relevant to directional navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// Up arrow / D-pad up.
    Up,

    /// Down arrow / D-pad down.
    Down,

    /// Left arrow / D-pad left.
    Left,

    /// Right arrow / D-pad right.
    Right,

    /// Page Up key.
    PageUp,

    /// Page Down key.
    PageDown,

    /// Home key (move to first item).
    Home,

    /// End key (move to last item).
    End,

    /// Backspace key (deletes the focused item).
    Backspace,

    /// Forward delete key.
    Delete,

    /// Enter/Return key.
    Enter,

    /// Tab key.
    Tab,

    /// Escape key.
    Escape,

    /// A regular character key.
    Char(char),

    /// Any other platform key code.
    Other(u32),
}

impl KeyCode {
    /// Whether the navigation layer consumes this key.
    ///
    /// Owned keys are swallowed even when resolution produces no movement,
    /// so the platform never applies its own default focus traversal.
    #[must_use]
    pub const fn is_owned(self) -> bool {
        matches!(
            self,
            Self::Up
                | Self::Down
                | Self::Left
                | Self::Right
                | Self::Home
                | Self::End
                | Self::PageUp
                | Self::PageDown
                | Self::Backspace
                | Self::Delete
        )
    }

    /// Whether this key requests removal of the focused item.
    #[must_use]
    pub const fn is_removal(self) -> bool {
        matches!(self, Self::Backspace | Self::Delete)
    }

    /// Spatial direction for arrow keys, `None` otherwise.
    #[must_use]
    pub const fn direction(self) -> Option<NavDirection> {
        match self {
            Self::Up => Some(NavDirection::Up),
            Self::Down => Some(NavDirection::Down),
            Self::Left => Some(NavDirection::Left),
            Self::Right => Some(NavDirection::Right),
            _ => None,
        }
    }

    /// The vertical or horizontal sense a key moves focus in.
    ///
    /// Paging and home/end keys map onto up/down so feedback stays
    /// consistent with where focus lands.
    #[must_use]
    pub const fn heading(self) -> Option<NavDirection> {
        match self {
            Self::Left => Some(NavDirection::Left),
            Self::Right => Some(NavDirection::Right),
            Self::Down | Self::PageDown | Self::End => Some(NavDirection::Down),
            Self::Up | Self::PageUp | Self::Home => Some(NavDirection::Up),
            _ => None,
        }
    }
}

/// The phase of a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeyEventKind {
    /// Key was pressed (default when not distinguishable).
    #[default]
    Press,

    /// Key is being held (repeat event).
    Repeat,

    /// Key was released.
    Release,
}

/// A keyboard event delivered to a dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    /// The key code that was pressed.
    pub code: KeyCode,

    /// The phase of the event.
    pub kind: KeyEventKind,
}

impl KeyEvent {
    /// Create a press event for the given key.
    #[must_use]
    pub const fn new(code: KeyCode) -> Self {
        Self {
            code,
            kind: KeyEventKind::Press,
        }
    }

    /// Set the event phase.
    #[must_use]
    pub const fn with_kind(mut self, kind: KeyEventKind) -> Self {
        self.kind = kind;
        self
    }

    /// Shorthand for a release event.
    #[must_use]
    pub const fn release(code: KeyCode) -> Self {
        Self::new(code).with_kind(KeyEventKind::Release)
    }

    /// Whether this event should trigger resolution.
    #[must_use]
    pub const fn is_press(&self) -> bool {
        matches!(self.kind, KeyEventKind::Press | KeyEventKind::Repeat)
    }
}

impl From<KeyCode> for KeyEvent {
    fn from(code: KeyCode) -> Self {
        Self::new(code)
    }
}

/// Spatial navigation direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavDirection {
    Up,
    Down,
    Left,
    Right,
}

impl NavDirection {
    /// All four directions, in a stable order.
    pub const ALL: [Self; 4] = [Self::Up, Self::Down, Self::Left, Self::Right];

    /// Column/row step for one move in this direction.
    #[must_use]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }

    /// Whether the direction moves along a row.
    #[must_use]
    pub const fn is_horizontal(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }

    /// The arrow key that produces this direction.
    #[must_use]
    pub const fn key(self) -> KeyCode {
        match self {
            Self::Up => KeyCode::Up,
            Self::Down => KeyCode::Down,
            Self::Left => KeyCode::Left,
            Self::Right => KeyCode::Right,
        }
    }
}
