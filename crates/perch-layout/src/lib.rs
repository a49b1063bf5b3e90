#![forbid(unsafe_code)]

//! Anchored placement: origin model, overlap resolution, and the placement
//! engine.
//!
//! # Role in Perch
//! `perch-layout` turns an anchor box, a panel size, and two alignment
//! origins into page-absolute coordinates. Everything except [`place`] is a
//! pure function of its inputs, so hosts can reuse the math without the
//! popover lifecycle.

pub mod measure;
pub mod origin;
pub mod overlap;
pub mod placement;

pub use measure::{read_anchor, read_target};
pub use origin::{AxisPoint, Horizontal, NamedPoints, Origin, Vertical};
pub use overlap::{OverlapMode, Resolution, overlap_mode, resolve};
pub use perch_core::geometry::{Rect, Size, Viewport};
pub use placement::{
    DEFAULT_POPOVER_Z_INDEX, Placement, PlacementOptions, PlacementOutcome, PlacementTrigger,
    Position, auto_position, compute, is_off_screen, place, primary_position,
};
