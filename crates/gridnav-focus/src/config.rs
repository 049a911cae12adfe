#![forbid(unsafe_code)]

//! Dispatcher configuration.
//!
//! Captures the small set of knobs the dispatchers honor as a single
//! [`NavConfig`] that can be built from environment variables or, with the
//! `config` feature, loaded from TOML.
//!
//! ```toml
//! # gridnav.toml
//! strict_layout = true
//! sound_feedback = false
//! ```
//!
//! `NavConfig::default()` absorbs layout errors and plays sound cues.

#[cfg(feature = "config")]
use std::path::Path;

#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Env var that escalates layout errors to panics.
pub const ENV_STRICT_LAYOUT: &str = "GRIDNAV_STRICT_LAYOUT";

/// Env var that toggles directional sound cues.
pub const ENV_SOUND_FEEDBACK: &str = "GRIDNAV_SOUND_FEEDBACK";

/// Tunables shared by every dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct NavConfig {
    /// Panic on [`LayoutError`](crate::LayoutError) instead of leaving the
    /// event unconsumed. Meant for diagnostic builds.
    pub strict_layout: bool,

    /// Emit a directional sound cue whenever focus moves.
    pub sound_feedback: bool,
}

impl Default for NavConfig {
    fn default() -> Self {
        Self {
            strict_layout: false,
            sound_feedback: true,
        }
    }
}

impl NavConfig {
    /// Builder: escalate layout errors.
    #[must_use]
    pub const fn with_strict_layout(mut self, strict: bool) -> Self {
        self.strict_layout = strict;
        self
    }

    /// Builder: toggle sound cues.
    #[must_use]
    pub const fn with_sound_feedback(mut self, enabled: bool) -> Self {
        self.sound_feedback = enabled;
        self
    }

    /// Create from environment variables, keeping defaults for anything
    /// unset or unparseable.
    ///
    /// Env: `GRIDNAV_STRICT_LAYOUT=1`, `GRIDNAV_SOUND_FEEDBACK=0`
    pub fn from_env() -> Self {
        match Self::try_from_env() {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!(
                    target: crate::TARGET,
                    error = %err,
                    "ignoring gridnav env config"
                );
                Self::default()
            }
        }
    }

    /// Create from environment variables, rejecting unparseable values.
    pub fn try_from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(value) = lookup(ENV_STRICT_LAYOUT) {
            config.strict_layout = parse_flag(ENV_STRICT_LAYOUT, &value)?;
        }
        if let Some(value) = lookup(ENV_SOUND_FEEDBACK) {
            config.sound_feedback = parse_flag(ENV_SOUND_FEEDBACK, &value)?;
        }
        Ok(config)
    }

    /// Load from a TOML string.
    #[cfg(feature = "config")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(ConfigError::Toml)
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }
}

fn parse_flag(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key,
            value: value.to_owned(),
        }),
    }
}
