#![forbid(unsafe_code)]

//! Declarative popover configuration.
//!
//! Captures every plain-data popover option as a single [`PopoverConfig`]
//! that can be loaded from TOML or JSON, so applications can tune placement
//! without recompiling.
//!
//! # Loading
//!
//! ```toml
//! # popover.toml
//! animated = false
//! z_index = 3000
//!
//! [anchor_origin]
//! vertical = "top"
//! horizontal = "middle"
//! ```
//!
//! ```rust,ignore
//! let config = PopoverConfig::from_toml_file("popover.toml")?.validated()?;
//! let props = PopoverProps::from_config(&config, children);
//! ```
//!
//! # Defaults
//!
//! Missing fields take the values of `PopoverConfig::default()`, which match
//! the defaults of [`crate::popover::PopoverProps::new`].

#[cfg(feature = "config")]
use std::path::Path;

#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};

use perch_layout::{DEFAULT_POPOVER_Z_INDEX, Origin, PlacementOptions};

/// Largest stacking order accepted by [`PopoverConfig::validate`].
pub const MAX_Z_INDEX: i32 = 1_000_000;

/// Plain-data popover options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct PopoverConfig {
    /// Point on the anchor the panel attaches to.
    pub anchor_origin: Origin,
    /// Point on the panel that attaches to the anchor.
    pub target_origin: Origin,
    /// Render through an animation strategy.
    pub animated: bool,
    /// Try fallback alignments when the panel overflows the viewport.
    pub can_auto_position: bool,
    /// Request a close when the anchor scrolls out of view.
    pub auto_close_when_off_screen: bool,
    /// Stacking order of the panel.
    pub z_index: i32,
}

impl Default for PopoverConfig {
    fn default() -> Self {
        Self {
            anchor_origin: Origin::ANCHOR_DEFAULT,
            target_origin: Origin::TARGET_DEFAULT,
            animated: true,
            can_auto_position: true,
            auto_close_when_off_screen: true,
            z_index: DEFAULT_POPOVER_Z_INDEX,
        }
    }
}

impl PopoverConfig {
    /// Load from a TOML string.
    #[cfg(feature = "config")]
    pub fn from_toml_str(s: &str) -> Result<Self, PopoverConfigError> {
        toml::from_str(s).map_err(PopoverConfigError::Toml)
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, PopoverConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(PopoverConfigError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    #[cfg(feature = "config")]
    pub fn from_json_str(s: &str) -> Result<Self, PopoverConfigError> {
        serde_json::from_str(s).map_err(PopoverConfigError::Json)
    }

    /// Load from a JSON file on disk.
    #[cfg(feature = "config")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, PopoverConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(PopoverConfigError::Io)?;
        Self::from_json_str(&content)
    }

    /// Validate all parameters are within acceptable ranges.
    ///
    /// Returns a list of validation errors. An empty list means the config
    /// is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.z_index < 0 {
            errors.push(format!("z_index must be >= 0, got {}", self.z_index));
        } else if self.z_index > MAX_Z_INDEX {
            errors.push(format!(
                "z_index must be <= {MAX_Z_INDEX}, got {}",
                self.z_index
            ));
        }

        errors
    }

    /// Return `self` if [`validate`](Self::validate) reports nothing.
    pub fn validated(self) -> Result<Self, PopoverConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(PopoverConfigError::Validation(errors))
        }
    }

    /// Placement inputs derived from this config.
    pub fn placement_options(&self) -> PlacementOptions {
        PlacementOptions {
            anchor_origin: self.anchor_origin,
            target_origin: self.target_origin,
            auto_position: self.can_auto_position,
            auto_close_off_screen: self.auto_close_when_off_screen,
            z_index: self.z_index,
        }
    }
}

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// Errors that can occur when loading a popover configuration.
#[derive(Debug)]
pub enum PopoverConfigError {
    /// I/O error reading a file.
    Io(std::io::Error),
    /// TOML parse error.
    #[cfg(feature = "config")]
    Toml(toml::de::Error),
    /// JSON parse error.
    #[cfg(feature = "config")]
    Json(serde_json::Error),
    /// Validation errors.
    Validation(Vec<String>),
}

impl std::fmt::Display for PopoverConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            #[cfg(feature = "config")]
            Self::Toml(e) => write!(f, "TOML parse error: {e}"),
            #[cfg(feature = "config")]
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
            Self::Validation(errors) => {
                write!(f, "validation errors: {}", errors.join("; "))
            }
        }
    }
}

impl std::error::Error for PopoverConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            #[cfg(feature = "config")]
            Self::Toml(e) => Some(e),
            #[cfg(feature = "config")]
            Self::Json(e) => Some(e),
            Self::Validation(_) => None,
        }
    }
}
