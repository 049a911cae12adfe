#![forbid(unsafe_code)]

//! gridnav public facade crate.
//!
//! Re-exports the navigation types from the internal crates, bundles the
//! three dispatchers into a [`Navigator`], and offers a prelude.
//!
//! ```
//! use gridnav::prelude::*;
//!
//! let nav = Navigator::new(NavConfig::default());
//! assert!(nav.config().sound_feedback);
//! ```

use std::fmt;

// --- Core re-exports -------------------------------------------------------

pub use gridnav_core::{
    CellPos, GridSize, KeyCode, KeyEvent, KeyEventKind, LayoutOrientation, NavDirection,
};

// --- Focus re-exports ------------------------------------------------------

pub use gridnav_focus::{
    Anchor, AnchoredMatrix, ConfigError, Container, ContainerId, DispatchPlan, DockDispatcher,
    DockMergePolicy, FocusSink, FocusTarget, GridDispatcher, ItemRef, ItemRemoval, Landing,
    LayoutError, MatrixResolver, MergeOrientation, NavConfig, NavigationContext, NavigationHost,
    OccupancyMatrix, PageCoordinator, PageLayout, PagedDispatcher, Pager, ResolutionOutcome,
    Resolver, Sentinel, SoundCue, SoundFeedback, Topology,
};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for gridnav.
#[derive(Debug)]
pub enum Error {
    /// Containers handed to a builder were not navigable.
    Layout(LayoutError),
    /// Configuration could not be loaded.
    Config(ConfigError),
}

impl Error {
    /// Whether the caller can carry on.
    ///
    /// Layout errors only cost the current key event. Configuration errors
    /// need fixing before dispatchers are built.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Layout(_))
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Layout(err) => write!(f, "{err}"),
            Self::Config(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Layout(err) => Some(err),
            Self::Config(err) => Some(err),
        }
    }
}

impl From<LayoutError> for Error {
    fn from(err: LayoutError) -> Self {
        Self::Layout(err)
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Self::Config(err)
    }
}

/// Standard result type for gridnav APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Navigator ------------------------------------------------------------

/// The three dispatchers sharing one configuration.
#[derive(Debug, Clone)]
pub struct Navigator {
    config: NavConfig,
    grid: GridDispatcher,
    dock: DockDispatcher,
    paged: PagedDispatcher,
}

impl Navigator {
    #[must_use]
    pub fn new(config: NavConfig) -> Self {
        Self {
            config,
            grid: GridDispatcher::new(config),
            dock: DockDispatcher::new(config),
            paged: PagedDispatcher::new(config),
        }
    }

    /// Build from `GRIDNAV_*` environment variables.
    pub fn try_from_env() -> Result<Self> {
        Ok(Self::new(NavConfig::try_from_env()?))
    }

    /// Build from a TOML file.
    #[cfg(feature = "config")]
    pub fn from_toml_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
        Ok(Self::new(NavConfig::from_toml_file(path)?))
    }

    /// Focus the chrome beyond `direction` when a paged arrow lands nowhere.
    #[must_use]
    pub fn with_paged_fallback(mut self, direction: NavDirection) -> Self {
        self.paged = self.paged.with_noop_fallback(direction);
        self
    }

    #[must_use]
    pub const fn config(&self) -> &NavConfig {
        &self.config
    }

    /// Route a key on `origin` to the dispatcher for its container.
    ///
    /// Page items go through the grid dispatcher; use [`Self::paged`] for
    /// app drawers and folders.
    pub fn handle_key<H: NavigationHost + ?Sized>(
        &self,
        host: &mut H,
        origin: ItemRef,
        event: KeyEvent,
        layout: LayoutOrientation,
    ) -> bool {
        match origin.container {
            ContainerId::Page(_) => self.grid.handle_key(host, origin, event, layout),
            ContainerId::Dock => self.dock.handle_key(host, origin, event, layout),
        }
    }

    #[must_use]
    pub const fn grid(&self) -> &GridDispatcher {
        &self.grid
    }

    #[must_use]
    pub const fn dock(&self) -> &DockDispatcher {
        &self.dock
    }

    #[must_use]
    pub const fn paged(&self) -> &PagedDispatcher {
        &self.paged
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new(NavConfig::default())
    }
}

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Container, Error, FocusTarget, ItemRef, KeyCode, KeyEvent, LayoutOrientation, NavConfig,
        NavDirection, NavigationHost, Navigator, Pager, Result,
    };

    pub use crate::{core, focus};
}

pub use gridnav_core as core;
pub use gridnav_focus as focus;
