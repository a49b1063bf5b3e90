// Forbid unsafe in production; deny in tests.
#![cfg_attr(not(test), forbid(unsafe_code))]
#![cfg_attr(test, deny(unsafe_code))]

//! Core: geometry, the host-framework contract, and logging.
//!
//! # Role in Perch
//! `perch-core` is the boundary layer. It owns the value types every other
//! crate speaks (rectangles, viewport size, style declarations) and the
//! [`host::Host`] trait through which the positioning engine and the popover
//! lifecycle touch the rendering framework.
//!
//! # Primary responsibilities
//! - **Geometry**: page-absolute rectangles and the viewport capability.
//! - **Host**: detached roots, element measurement, scroll subscriptions,
//!   style writes.
//! - **Panel tree**: what a detached root renders ([`panel::PanelNode`]).
//! - **Logging**: `tracing` re-exports with no-op fallbacks.
//!
//! # How it fits in the system
//! `perch-layout` reads geometry through the host and computes placements;
//! `perch-widgets` drives the open/close lifecycle. Neither knows which
//! framework sits behind [`host::Host`].

pub mod geometry;
pub mod host;
pub mod logging;
pub mod panel;
pub mod style;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, info, trace};
