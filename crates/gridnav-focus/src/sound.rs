#![forbid(unsafe_code)]

//! Directional sound cues.

use gridnav_core::{KeyCode, NavDirection};

/// Cue played when focus moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundCue {
    NavigateLeft,
    NavigateRight,
    NavigateUp,
    NavigateDown,
}

impl SoundCue {
    /// Cue for a key, `None` for keys that do not move focus.
    ///
    /// Page and home/end keys share the up/down cues.
    #[must_use]
    pub const fn for_key(code: KeyCode) -> Option<Self> {
        match code.heading() {
            Some(NavDirection::Left) => Some(Self::NavigateLeft),
            Some(NavDirection::Right) => Some(Self::NavigateRight),
            Some(NavDirection::Up) => Some(Self::NavigateUp),
            Some(NavDirection::Down) => Some(Self::NavigateDown),
            None => None,
        }
    }
}
