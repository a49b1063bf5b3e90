#![forbid(unsafe_code)]

//! Perch public facade crate.
//!
//! Re-exports the positioning engine, the popover widget and the host
//! contract from the internal crates, plus a prelude for day-to-day use.
//!
//! ```rust,ignore
//! use perch::prelude::*;
//!
//! let props = PopoverProps::new(children)
//!     .anchor(button)
//!     .anchor_origin(Origin::new(Vertical::Bottom, Horizontal::Right))
//!     .target_origin(Origin::new(Vertical::Top, Horizontal::Right))
//!     .open(true);
//! let mut popover = Popover::new(host.clone(), props);
//! // host attaches the panel, then:
//! popover.handle_mounted();
//! ```

use std::fmt;

// --- Core re-exports -------------------------------------------------------

pub use perch_core::geometry::{Rect, Size, Viewport};
pub use perch_core::host::{Host, NodeId, RootHandle, RootId, ScrollSubscription, SubscriptionId};
pub use perch_core::panel::PanelNode;
pub use perch_core::style::{StyleDecls, px};

#[cfg(feature = "tracing-json")]
pub use perch_core::logging::init_json_logging;

// --- Layout re-exports -----------------------------------------------------

pub use perch_layout::{
    AxisPoint, DEFAULT_POPOVER_Z_INDEX, Horizontal, NamedPoints, Origin, OverlapMode, Placement,
    PlacementOptions, PlacementOutcome, PlacementTrigger, Position, Resolution, Vertical,
    auto_position, compute, is_off_screen, overlap_mode, place, primary_position, resolve,
};

// --- Widget re-exports -----------------------------------------------------

pub use perch_widgets::{
    AnimationFrame, AnimationStrategy, CloseHook, CloseReason, DefaultAnimation, FadeAnimation,
    MountGate, Popover, PopoverConfig, PopoverConfigError, PopoverPhase, PopoverProps,
};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for Perch.
///
/// Placement itself never fails; only configuration loading does.
#[derive(Debug)]
pub enum Error {
    /// Loading or validating a [`PopoverConfig`] failed.
    Config(PopoverConfigError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(err) => write!(f, "popover config: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(err) => Some(err),
        }
    }
}

impl From<PopoverConfigError> for Error {
    fn from(err: PopoverConfigError) -> Self {
        Self::Config(err)
    }
}

/// Standard result type for Perch APIs.
pub type Result<T> = std::result::Result<T, Error>;

/// Load and validate a popover config from a TOML file.
#[cfg(feature = "config")]
pub fn load_config(path: impl AsRef<std::path::Path>) -> Result<PopoverConfig> {
    Ok(PopoverConfig::from_toml_file(path)?.validated()?)
}

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        CloseReason, Error, Horizontal, Host, NodeId, Origin, Placement, Popover, PopoverConfig,
        PopoverProps, Rect, Result, Size, StyleDecls, Vertical, Viewport,
    };

    pub use crate::{core, layout, widgets};
}

pub use perch_core as core;
pub use perch_layout as layout;
pub use perch_widgets as widgets;
