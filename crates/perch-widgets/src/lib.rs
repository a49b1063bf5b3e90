#![forbid(unsafe_code)]

//! Popover widget for Perch.
//!
//! - [`popover`]: the lifecycle controller. Mounts a detached root while
//!   open, re-places the panel on attach, update and scroll, and requests a
//!   close when the anchor scrolls away.
//! - [`animation`]: pluggable two-phase enter animations.
//! - [`config`]: `PopoverConfig`, loadable from TOML/JSON with the `config`
//!   feature.

pub mod animation;
pub mod config;
pub mod popover;

pub use animation::{
    AnimationFrame, AnimationStrategy, DefaultAnimation, FadeAnimation, MountGate,
    render_animated,
};
pub use config::{MAX_Z_INDEX, PopoverConfig, PopoverConfigError};
pub use popover::{CloseHook, CloseReason, Popover, PopoverPhase, PopoverProps};
