#![forbid(unsafe_code)]

//! Per-topology key dispatch.
//!
//! A dispatcher handles one key event for one focused item:
//!
//! 1. Phase check: unowned keys are not consumed, releases of owned keys are
//!    consumed silently.
//! 2. Plan: with shared borrows of the host, build the matrix, resolve, and
//!    coordinate page crossings into a [`DispatchPlan`].
//! 3. Apply: snap the pager, remove, request focus, play the cue.
//!
//! Planning is pure, so a plan can be inspected in tests without a host
//! that records anything.
//!
//! # Invariants
//!
//! - Every owned key press is consumed unless the layout is invalid.
//! - An invalid layout is never consumed (or panics in strict mode).
//! - A cue is only played when focus is requested.

mod dock;
mod grid;
mod paged;

pub use dock::DockDispatcher;
pub use grid::GridDispatcher;
pub use paged::PagedDispatcher;

use gridnav_core::{KeyCode, KeyEvent, NavDirection};

use crate::TARGET;
use crate::config::NavConfig;
use crate::coordinator::Landing;
use crate::error::LayoutError;
use crate::host::{FocusTarget, ItemRef, NavigationHost};
use crate::sound::SoundCue;

/// Which kind of container a dispatcher serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topology {
    /// A sparse page grid that can reach the dock.
    Grid,
    /// The dock strip.
    Dock,
    /// A row-major paged grid such as an app drawer or folder.
    Paged,
}

impl Topology {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Grid => "grid",
            Self::Dock => "dock",
            Self::Paged => "paged",
        }
    }
}

/// Side effects decided for one key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DispatchPlan {
    pub snap_to: Option<usize>,
    pub focus: Option<FocusTarget>,
    pub cue: Option<SoundCue>,
    pub remove: Option<ItemRef>,
}

impl DispatchPlan {
    /// Consume the key and do nothing.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            snap_to: None,
            focus: None,
            cue: None,
            remove: None,
        }
    }

    /// Hand the item to the removal collaborator.
    #[must_use]
    pub const fn removal(item: ItemRef) -> Self {
        Self {
            remove: Some(item),
            ..Self::none()
        }
    }

    /// Focus the chrome beyond a grid edge.
    #[must_use]
    pub fn beyond(direction: NavDirection, key: KeyCode) -> Self {
        Self::none().with_focus(FocusTarget::Beyond(direction), key)
    }

    /// Plan from a coordinator landing.
    #[must_use]
    pub fn from_landing(landing: Landing, key: KeyCode) -> Self {
        let plan = Self {
            snap_to: landing.snap_to,
            ..Self::none()
        };
        match landing.target {
            Some(item) => plan.with_focus(FocusTarget::Item(item), key),
            None => plan,
        }
    }

    /// Set the focus target and the matching cue.
    #[must_use]
    pub fn with_focus(mut self, target: FocusTarget, key: KeyCode) -> Self {
        self.focus = Some(target);
        self.cue = SoundCue::for_key(key);
        self
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.snap_to.is_none()
            && self.focus.is_none()
            && self.cue.is_none()
            && self.remove.is_none()
    }

    /// Perform the side effects against the host.
    pub fn apply<H: NavigationHost + ?Sized>(&self, host: &mut H, sound_feedback: bool) {
        if let Some(page) = self.snap_to {
            host.pager_mut().snap_to_page(page);
        }
        if let Some(item) = self.remove {
            host.remove(item);
        }
        if let Some(target) = self.focus {
            host.request_focus(target);
            if let Some(cue) = self.cue.filter(|_| sound_feedback) {
                host.play_directional(cue);
            }
        }
    }
}

/// What to do with a key event before planning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Phase {
    /// Not ours.
    Ignore,
    /// Ours, but nothing to do (release).
    Consume,
    /// Press or repeat of an owned key.
    Resolve,
}

impl Phase {
    pub(crate) const fn of(event: KeyEvent) -> Self {
        if !event.code.is_owned() {
            Self::Ignore
        } else if event.is_press() {
            Self::Resolve
        } else {
            Self::Consume
        }
    }
}

/// Shared driver: phase check, plan, apply.
pub(crate) fn drive<H, F>(
    host: &mut H,
    config: &NavConfig,
    topology: Topology,
    event: KeyEvent,
    plan: F,
) -> bool
where
    H: NavigationHost + ?Sized,
    F: FnOnce(&H) -> Result<DispatchPlan, LayoutError>,
{
    match Phase::of(event) {
        Phase::Ignore => return false,
        Phase::Consume => return true,
        Phase::Resolve => {}
    }

    let _span = tracing::debug_span!(
        target: TARGET,
        "gridnav.dispatch",
        topology = topology.as_str(),
        key = ?event.code,
        page = host.pager().current_page_index(),
    )
    .entered();

    match plan(&*host) {
        Ok(plan) => {
            tracing::trace!(target: TARGET, ?plan, "dispatch plan");
            plan.apply(host, config.sound_feedback);
            true
        }
        Err(err) => {
            if config.strict_layout {
                panic!("invalid layout for {} navigation: {err}", topology.as_str());
            }
            tracing::warn!(
                target: TARGET,
                topology = topology.as_str(),
                error = %err,
                "invalid layout, key not consumed"
            );
            false
        }
    }
}
