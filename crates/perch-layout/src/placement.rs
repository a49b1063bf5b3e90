#![forbid(unsafe_code)]

//! Placement engine for anchored floating panels.
//!
//! Computes the page-absolute `{top, left}` of a target panel so that the
//! target's origin point lands on the anchor's origin point, then (optionally)
//! corrects the result when the panel would overflow the viewport.
//!
//! # Pipeline
//!
//! 1. [`primary_position`]: align `target_origin` with `anchor_origin`.
//! 2. [`is_off_screen`]: on scroll, check whether the anchor left the
//!    viewport (advisory; placement continues).
//! 3. [`auto_position`]: best-effort fallback using the overlap resolver's
//!    candidates when the panel overflows.
//! 4. [`Placement::clamped`]: clamp the top-left corner to `>= 0` and attach
//!    `max-height` and stacking order.
//!
//! Steps 1-4 are pure. [`place`] runs them against a [`Host`], reading
//! geometry and writing the resulting style onto the target element.
//!
//! # Invariants
//!
//! - `top` and `left` of a [`Placement`] are never negative.
//! - Without a fallback, shifting the anchor by `(dx, dy)` shifts `left` by
//!   exactly `dx` and `top` by exactly `dy`.
//! - Placing twice with unchanged geometry yields the same result.
//!
//! # Failure Modes
//!
//! - Panels larger than the viewport stay partially off-screen; only the
//!   top-left corner is guaranteed visible.
//! - If neither fallback candidate fits, the primary value is kept.

use perch_core::geometry::Viewport;
use perch_core::host::{Host, NodeId};
use perch_core::style::{StyleDecls, px};
use perch_core::{debug, trace};

use crate::measure::{read_anchor, read_target};
use crate::origin::{NamedPoints, Origin};
use crate::overlap::resolve;

/// Stacking order written onto popover panels.
pub const DEFAULT_POPOVER_Z_INDEX: i32 = 2100;

/// Inputs that stay fixed across placement passes of one popover.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacementOptions {
    /// Point on the anchor the panel attaches to.
    pub anchor_origin: Origin,
    /// Point on the panel that attaches to the anchor.
    pub target_origin: Origin,
    /// Try fallback alignments when the panel overflows the viewport.
    pub auto_position: bool,
    /// On scroll, report when the anchor leaves the viewport.
    pub auto_close_off_screen: bool,
    /// Stacking order written with the placement.
    pub z_index: i32,
}

impl Default for PlacementOptions {
    fn default() -> Self {
        Self {
            anchor_origin: Origin::ANCHOR_DEFAULT,
            target_origin: Origin::TARGET_DEFAULT,
            auto_position: true,
            auto_close_off_screen: true,
            z_index: DEFAULT_POPOVER_Z_INDEX,
        }
    }
}

/// What caused a placement pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementTrigger {
    /// The target element attached for the first time.
    Mount,
    /// The panel subtree re-rendered.
    Update,
    /// The page scrolled.
    Scroll,
}

impl PlacementTrigger {
    /// Whether the pass runs in response to scrolling.
    #[inline]
    pub fn is_scroll(self) -> bool {
        matches!(self, Self::Scroll)
    }

    /// Stable name used in log events.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Mount => "mount",
            Self::Update => "update",
            Self::Scroll => "scroll",
        }
    }
}

/// Unclamped top-left corner in page pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub top: f64,
    pub left: f64,
}

/// Align the target's origin point with the anchor's origin point.
pub fn primary_position(
    anchor: &NamedPoints,
    target: &NamedPoints,
    anchor_origin: Origin,
    target_origin: Origin,
) -> Position {
    Position {
        top: anchor.vertical(anchor_origin.vertical) - target.vertical(target_origin.vertical),
        left: anchor.horizontal(anchor_origin.horizontal)
            - target.horizontal(target_origin.horizontal),
    }
}

/// Whether the anchor's top-left corner has left the viewport.
pub fn is_off_screen(anchor: &NamedPoints, viewport: Viewport) -> bool {
    !viewport.contains_point(anchor.left, anchor.top)
}

/// Best-effort correction of an overflowing position.
///
/// Per axis: if `primary` starts before the viewport or ends past it, try
/// the overlap resolver's two candidates measured from the adjusted anchor
/// point. The first candidate whose far edge fits is taken (clamped to
/// `>= 0`); if none fits, the primary value is kept.
pub fn auto_position(
    anchor: &NamedPoints,
    target: &NamedPoints,
    anchor_origin: Origin,
    target_origin: Origin,
    primary: Position,
    viewport: Viewport,
) -> Position {
    let plan = resolve(anchor_origin, target_origin);

    let top = fit_axis(
        primary.top,
        target.bottom,
        viewport.height,
        anchor.vertical(plan.adjusted_anchor.vertical),
        plan.y_candidates.map(|p| target.vertical(p)),
    );
    let left = fit_axis(
        primary.left,
        target.right,
        viewport.width,
        anchor.horizontal(plan.adjusted_anchor.horizontal),
        plan.x_candidates.map(|p| target.horizontal(p)),
    );

    Position { top, left }
}

/// One axis of [`auto_position`].
fn fit_axis(current: f64, extent: f64, limit: f64, anchor: f64, offsets: [f64; 2]) -> f64 {
    if current >= 0.0 && current + extent <= limit {
        return current;
    }
    for offset in offsets {
        let candidate = anchor - offset;
        if candidate + extent <= limit {
            return non_negative(candidate);
        }
    }
    current
}

/// `max(0, value)` that also maps `-0.0` and NaN to `0.0`.
#[inline]
fn non_negative(value: f64) -> f64 {
    if value > 0.0 { value } else { 0.0 }
}

/// Final placement written onto the target element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Page-absolute top, never negative.
    pub top: f64,
    /// Page-absolute left, never negative.
    pub left: f64,
    /// Viewport height; the panel scrolls internally beyond it.
    pub max_height: f64,
    /// Stacking order.
    pub z_index: i32,
}

impl Placement {
    /// Clamp a position so its top-left corner is on the page.
    pub fn clamped(position: Position, viewport: Viewport, z_index: i32) -> Self {
        Self {
            top: non_negative(position.top),
            left: non_negative(position.left),
            max_height: viewport.height,
            z_index,
        }
    }

    /// Inline style declarations for this placement.
    pub fn to_style(&self) -> StyleDecls {
        StyleDecls::new()
            .with("top", px(self.top))
            .with("left", px(self.left))
            .with("max-height", px(self.max_height))
            .with("position", "absolute")
            .with("z-index", self.z_index.to_string())
    }
}

/// Run steps 1, 3 and 4 of the pipeline on already-measured geometry.
pub fn compute(
    anchor: &NamedPoints,
    target: &NamedPoints,
    viewport: Viewport,
    options: &PlacementOptions,
) -> Placement {
    let mut position = primary_position(
        anchor,
        target,
        options.anchor_origin,
        options.target_origin,
    );
    if options.auto_position {
        position = auto_position(
            anchor,
            target,
            options.anchor_origin,
            options.target_origin,
            position,
            viewport,
        );
    }
    Placement::clamped(position, viewport, options.z_index)
}

/// Result of a host-bound placement pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementOutcome {
    /// What was written onto the target.
    pub placement: Placement,
    /// The pass was scroll-triggered, off-screen closing is enabled, and the
    /// anchor has left the viewport.
    pub off_screen: bool,
}

/// Measure, place, and write the target's style.
///
/// Returns `None` without touching the target when either element cannot be
/// measured.
pub fn place<H: Host>(
    host: &H,
    anchor_node: NodeId,
    target_node: NodeId,
    options: &PlacementOptions,
    trigger: PlacementTrigger,
) -> Option<PlacementOutcome> {
    let Some(anchor) = read_anchor(host, anchor_node) else {
        trace!(message = "popover.placement_skipped", reason = "anchor_unmeasurable");
        return None;
    };
    let Some(mut target) = read_target(host, target_node) else {
        trace!(message = "popover.placement_skipped", reason = "target_unmeasurable");
        return None;
    };
    let viewport = host.viewport();

    let mut position = primary_position(
        &anchor,
        &target,
        options.anchor_origin,
        options.target_origin,
    );

    // Same anchor snapshot as the placement itself.
    let off_screen =
        trigger.is_scroll() && options.auto_close_off_screen && is_off_screen(&anchor, viewport);
    if off_screen {
        debug!(
            message = "popover.off_screen",
            anchor_top = anchor.top,
            anchor_left = anchor.left
        );
    }

    if options.auto_position {
        if let Some(remeasured) = read_target(host, target_node) {
            target = remeasured;
        }
        position = auto_position(
            &anchor,
            &target,
            options.anchor_origin,
            options.target_origin,
            position,
            viewport,
        );
    }

    let placement = Placement::clamped(position, viewport, options.z_index);
    host.apply_style(target_node, &placement.to_style());
    debug!(
        message = "popover.place",
        trigger = trigger.as_str(),
        top = placement.top,
        left = placement.left,
        auto_position = options.auto_position
    );

    Some(PlacementOutcome {
        placement,
        off_screen,
    })
}
