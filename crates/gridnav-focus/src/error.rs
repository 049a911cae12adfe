#![forbid(unsafe_code)]

//! Error types for matrix building and configuration.
//!
//! Errors never escape a dispatcher entry point. A [`LayoutError`] turns the
//! key event into "not consumed" so the embedding UI can fall back to its own
//! focus traversal; in strict mode it is escalated to a panic instead.

use std::fmt;

use gridnav_core::{CellPos, GridSize};

use crate::host::ContainerId;

/// The containers handed to the builder or dispatcher are not navigable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// A grid declared zero columns or rows.
    InvalidDimensions { cols: u16, rows: u16 },
    /// A child reported a cell outside its container's grid.
    ChildOutOfBounds {
        index: usize,
        pos: CellPos,
        size: GridSize,
    },
    /// Two children claimed the same cell.
    CellConflict {
        pos: CellPos,
        existing: usize,
        incoming: usize,
    },
    /// The host could not supply a container the dispatcher needs.
    MissingContainer(ContainerId),
    /// The focused item is not a child of its container.
    UnknownSlot { container: ContainerId, index: usize },
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDimensions { cols, rows } => {
                write!(f, "invalid grid dimensions: {cols}x{rows}")
            }
            Self::ChildOutOfBounds { index, pos, size } => {
                write!(f, "child {index} at {pos} lies outside {size} grid")
            }
            Self::CellConflict {
                pos,
                existing,
                incoming,
            } => write!(
                f,
                "cell {pos} claimed by child {incoming} but already holds {existing}"
            ),
            Self::MissingContainer(id) => write!(f, "missing container: {id}"),
            Self::UnknownSlot { container, index } => {
                write!(f, "slot {index} is not a child of {container}")
            }
        }
    }
}

impl std::error::Error for LayoutError {}

/// Configuration loading failures.
#[derive(Debug)]
pub enum ConfigError {
    /// Reading the config file failed.
    Io(std::io::Error),
    /// The TOML document could not be parsed.
    #[cfg(feature = "config")]
    Toml(toml::de::Error),
    /// A value was syntactically valid but not acceptable.
    InvalidValue { key: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "config I/O: {err}"),
            #[cfg(feature = "config")]
            Self::Toml(err) => write!(f, "config parse: {err}"),
            Self::InvalidValue { key, value } => {
                write!(f, "invalid value for {key}: {value:?}")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            #[cfg(feature = "config")]
            Self::Toml(err) => Some(err),
            Self::InvalidValue { .. } => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}
