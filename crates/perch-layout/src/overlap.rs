#![forbid(unsafe_code)]

//! Overlap resolution: fallback alignment points for auto-positioning.
//!
//! For each axis the anchor point and the target point are classified:
//!
//! | Mode        | When                                         |
//! |-------------|----------------------------------------------|
//! | `Auto`      | either point is the axis median              |
//! | `Inclusive` | both points are the same edge                |
//! | `Exclusive` | both points are edges and they differ        |
//!
//! The mode decides where the median sits in the fallback list: tried first
//! when no explicit edge pairing was requested (`Auto`), tried second
//! otherwise. For `Inclusive`/`Exclusive` the anchor point flips to its
//! opposite edge for the fallback pass.
//!
//! The target origin is never adjusted. The fallback candidates already
//! enumerate the alternative target points.

use crate::origin::{AxisPoint, Horizontal, Origin, Vertical};

/// How anchor and target points relate on one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlapMode {
    /// A median is involved; the natural placement is self-consistent.
    Auto,
    /// Both points are the same edge (panel overlaps the anchor on that side).
    Inclusive,
    /// Both points are opposite edges (panel sits beside the anchor).
    Exclusive,
}

/// Classify one axis.
pub fn overlap_mode<P: AxisPoint>(anchor: P, target: P) -> OverlapMode {
    if anchor.is_median() || target.is_median() {
        OverlapMode::Auto
    } else if anchor == target {
        OverlapMode::Inclusive
    } else {
        OverlapMode::Exclusive
    }
}

/// Ordered pair of fallback target points for one axis.
///
/// Candidates are the edges other than the target's own point, with the
/// median inserted first (`Auto`) or second (otherwise); the first two
/// entries of that list are kept.
pub fn candidates<P: AxisPoint>(mode: OverlapMode, target: P) -> [P; 2] {
    if target.is_median() {
        return [P::MEDIAN, P::EDGES[0]];
    }
    let other = target.opposite();
    match mode {
        OverlapMode::Auto => [P::MEDIAN, other],
        OverlapMode::Inclusive | OverlapMode::Exclusive => [other, P::MEDIAN],
    }
}

/// Fallback plan for both axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    /// Horizontal overlap classification.
    pub x_mode: OverlapMode,
    /// Vertical overlap classification.
    pub y_mode: OverlapMode,
    /// Horizontal target points to try, in order.
    pub x_candidates: [Horizontal; 2],
    /// Vertical target points to try, in order.
    pub y_candidates: [Vertical; 2],
    /// Anchor origin to measure from during the fallback pass.
    pub adjusted_anchor: Origin,
}

/// Resolve overlap for an anchor/target origin pair.
pub fn resolve(anchor: Origin, target: Origin) -> Resolution {
    let x_mode = overlap_mode(anchor.horizontal, target.horizontal);
    let y_mode = overlap_mode(anchor.vertical, target.vertical);

    let mut adjusted_anchor = anchor;
    if y_mode != OverlapMode::Auto {
        adjusted_anchor.vertical = anchor.vertical.opposite();
    }
    if x_mode != OverlapMode::Auto {
        adjusted_anchor.horizontal = anchor.horizontal.opposite();
    }

    Resolution {
        x_mode,
        y_mode,
        x_candidates: candidates(x_mode, target.horizontal),
        y_candidates: candidates(y_mode, target.vertical),
        adjusted_anchor,
    }
}
