#![forbid(unsafe_code)]

//! The subtree a detached root renders.

use crate::style::StyleDecls;

/// Top-level node of a popover's detached render root.
///
/// `C` is the caller's children type; the host decides how to turn it into
/// real elements.
#[derive(Debug, Clone, PartialEq)]
pub enum PanelNode<C> {
    /// Non-animated wrapper: an absolutely positioned container with the
    /// caller's extra style merged on top.
    Plain {
        /// Wrapper style (base declarations plus caller overrides).
        style: StyleDecls,
        /// Panel content.
        children: C,
    },
    /// Output of an animation strategy.
    Animated {
        /// Whether the strategy has been triggered (first post-mount frame).
        open: bool,
        /// Visual state declarations (opacity, transform, transition).
        style: StyleDecls,
        /// Panel content; `None` when the strategy withholds children.
        children: Option<C>,
    },
}

impl<C> PanelNode<C> {
    /// Style declarations of the wrapper.
    pub fn style(&self) -> &StyleDecls {
        match self {
            Self::Plain { style, .. } | Self::Animated { style, .. } => style,
        }
    }

    /// Panel content, if rendered.
    pub fn children(&self) -> Option<&C> {
        match self {
            Self::Plain { children, .. } => Some(children),
            Self::Animated { children, .. } => children.as_ref(),
        }
    }

    /// Whether this node came from an animation strategy.
    pub fn is_animated(&self) -> bool {
        matches!(self, Self::Animated { .. })
    }
}
