#![forbid(unsafe_code)]

//! Enter animation strategies for popover panels.
//!
//! A strategy maps `(target_origin, open)` to the visual state of the panel
//! wrapper. The popover drives it in two phases:
//!
//! 1. The panel mounts with `open = false`: the strategy renders its inert
//!    starting state (e.g. scaled to zero, transparent).
//! 2. On the first attach of the panel element, [`MountGate`] flips and the
//!    panel re-renders with `open = true`; the strategy's transition animates
//!    from the starting state instead of popping in.
//!
//! # Invariants
//!
//! - A [`MountGate`] flips exactly once and never resets. Remounting the
//!   panel creates a fresh gate.
//! - Strategies are pure: the same inputs yield the same frame.

use std::fmt;
use std::time::Duration;

use perch_core::panel::PanelNode;
use perch_core::style::StyleDecls;
use perch_layout::Origin;

/// Visual state produced by an [`AnimationStrategy`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnimationFrame {
    /// Declarations for the animated wrapper.
    pub style: StyleDecls,
    /// Whether children are rendered in this frame.
    pub render_children: bool,
}

/// Pluggable enter animation.
pub trait AnimationStrategy: fmt::Debug {
    /// Visual state for a panel attached at `target_origin`.
    ///
    /// `open` is `false` until the panel has attached once.
    fn frame(&self, target_origin: Origin, open: bool) -> AnimationFrame;
}

/// Wrap `children` in the output of `strategy`.
pub fn render_animated<C>(
    strategy: &dyn AnimationStrategy,
    target_origin: Origin,
    gate: &MountGate,
    children: C,
) -> PanelNode<C> {
    let open = gate.has_mounted();
    let frame = strategy.frame(target_origin, open);
    PanelNode::Animated {
        open,
        style: frame.style,
        children: frame.render_children.then_some(children),
    }
}

/// One-shot "has attached" flag for a mounted panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MountGate {
    has_mounted: bool,
}

impl MountGate {
    /// A gate that has not seen an attach yet.
    pub const fn new() -> Self {
        Self { has_mounted: false }
    }

    /// Whether the panel has attached.
    #[inline]
    pub fn has_mounted(&self) -> bool {
        self.has_mounted
    }

    /// Record an attach. Returns `true` only the first time, meaning the
    /// panel must re-render.
    pub fn mark_attached(&mut self) -> bool {
        if self.has_mounted {
            return false;
        }
        self.has_mounted = true;
        true
    }
}

/// Scale and fade in from the target-origin corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DefaultAnimation {
    /// Transition duration.
    pub duration: Duration,
    /// Scale of the inert starting state, in `[0.0, 1.0]`.
    pub initial_scale: f64,
}

impl DefaultAnimation {
    /// 250ms scale-from-zero.
    pub const fn new() -> Self {
        Self {
            duration: Duration::from_millis(250),
            initial_scale: 0.0,
        }
    }

    /// Set the transition duration.
    #[must_use]
    pub const fn duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    /// Set the starting scale (clamped to `[0.0, 1.0]`).
    #[must_use]
    pub fn initial_scale(mut self, scale: f64) -> Self {
        self.initial_scale = scale.clamp(0.0, 1.0);
        self
    }
}

impl Default for DefaultAnimation {
    fn default() -> Self {
        Self::new()
    }
}

impl AnimationStrategy for DefaultAnimation {
    fn frame(&self, target_origin: Origin, open: bool) -> AnimationFrame {
        let ms = self.duration.as_millis();
        let scale = if open { 1.0 } else { self.initial_scale };
        let style = StyleDecls::new()
            .with("opacity", if open { "1" } else { "0" })
            .with("transform", format!("scale({scale}, {scale})"))
            .with("transform-origin", target_origin.css_transform_origin())
            .with(
                "transition",
                format!("transform {ms}ms ease-out, opacity {ms}ms ease-out"),
            );
        AnimationFrame {
            style,
            render_children: true,
        }
    }
}

/// Opacity-only fade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FadeAnimation {
    /// Transition duration.
    pub duration: Duration,
}

impl FadeAnimation {
    /// Fade over `duration`.
    pub const fn new(duration: Duration) -> Self {
        Self { duration }
    }
}

impl Default for FadeAnimation {
    fn default() -> Self {
        Self::new(Duration::from_millis(150))
    }
}

impl AnimationStrategy for FadeAnimation {
    fn frame(&self, _target_origin: Origin, open: bool) -> AnimationFrame {
        let ms = self.duration.as_millis();
        AnimationFrame {
            style: StyleDecls::new()
                .with("opacity", if open { "1" } else { "0" })
                .with("transition", format!("opacity {ms}ms linear")),
            render_children: true,
        }
    }
}
