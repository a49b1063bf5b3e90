#![forbid(unsafe_code)]

//! Origin model: named alignment points on an element's box.
//!
//! An [`Origin`] pairs a horizontal point (`left | middle | right`) with a
//! vertical point (`top | center | bottom`). One origin is attached to the
//! anchor, one to the target panel; placement aligns the two points.
//!
//! [`NamedPoints`] is the lookup table from each of the six names to a
//! coordinate, derived on demand from a measured box:
//!
//! - [`NamedPoints::page`] for the anchor, in page-absolute pixels.
//! - [`NamedPoints::local`] for the target, in its own frame where the
//!   top-left corner is always `(0, 0)` before placement.

use std::fmt;

use perch_core::geometry::{Rect, Size};

/// Horizontal alignment point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Horizontal {
    #[default]
    Left,
    Middle,
    Right,
}

/// Vertical alignment point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Vertical {
    #[default]
    Top,
    Center,
    Bottom,
}

/// The three points along one axis, with the median in the middle.
///
/// Lets the overlap resolver treat both axes with one piece of logic.
pub trait AxisPoint: Copy + Eq + fmt::Debug {
    /// The axis median (`middle` / `center`).
    const MEDIAN: Self;
    /// The two edges, in reading order.
    const EDGES: [Self; 2];

    /// Mirror an edge to the opposite edge. The median maps to itself.
    fn opposite(self) -> Self;

    /// Whether this point is the axis median.
    #[inline]
    fn is_median(self) -> bool {
        self == Self::MEDIAN
    }
}

impl AxisPoint for Horizontal {
    const MEDIAN: Self = Self::Middle;
    const EDGES: [Self; 2] = [Self::Left, Self::Right];

    fn opposite(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
            Self::Middle => Self::Middle,
        }
    }
}

impl AxisPoint for Vertical {
    const MEDIAN: Self = Self::Center;
    const EDGES: [Self; 2] = [Self::Top, Self::Bottom];

    fn opposite(self) -> Self {
        match self {
            Self::Top => Self::Bottom,
            Self::Bottom => Self::Top,
            Self::Center => Self::Center,
        }
    }
}

impl Horizontal {
    /// CSS keyword for this point.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Middle => "center",
            Self::Right => "right",
        }
    }
}

impl Vertical {
    /// CSS keyword for this point.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Center => "center",
            Self::Bottom => "bottom",
        }
    }
}

/// An alignment point on a box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Origin {
    pub horizontal: Horizontal,
    pub vertical: Vertical,
}

impl Origin {
    /// Create an origin.
    pub const fn new(vertical: Vertical, horizontal: Horizontal) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }

    /// Default anchor origin: bottom-left, so the panel opens below the anchor.
    pub const ANCHOR_DEFAULT: Self = Self::new(Vertical::Bottom, Horizontal::Left);

    /// Default target origin: top-left.
    pub const TARGET_DEFAULT: Self = Self::new(Vertical::Top, Horizontal::Left);

    /// Same origin with a different horizontal point.
    #[must_use]
    pub const fn with_horizontal(self, horizontal: Horizontal) -> Self {
        Self {
            horizontal,
            vertical: self.vertical,
        }
    }

    /// Same origin with a different vertical point.
    #[must_use]
    pub const fn with_vertical(self, vertical: Vertical) -> Self {
        Self {
            horizontal: self.horizontal,
            vertical,
        }
    }

    /// CSS `transform-origin` value, e.g. `left top`.
    pub fn css_transform_origin(self) -> String {
        format!("{} {}", self.horizontal.as_str(), self.vertical.as_str())
    }
}

impl Default for Origin {
    /// Top-left.
    fn default() -> Self {
        Self::TARGET_DEFAULT
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.vertical.as_str(), self.horizontal.as_str())
    }
}

/// Coordinates of the six named points of a box.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct NamedPoints {
    pub top: f64,
    pub center: f64,
    pub bottom: f64,
    pub left: f64,
    pub middle: f64,
    pub right: f64,
}

impl NamedPoints {
    /// Points of a page-absolute box.
    pub fn page(rect: &Rect) -> Self {
        let bottom = rect.bottom();
        let right = rect.right();
        Self {
            top: rect.top(),
            center: rect.top() + (bottom - rect.top()) / 2.0,
            bottom,
            left: rect.left(),
            middle: rect.left() + (right - rect.left()) / 2.0,
            right,
        }
    }

    /// Points of a box in its own frame (top-left at the origin).
    pub fn local(size: Size) -> Self {
        Self {
            top: 0.0,
            center: size.height / 2.0,
            bottom: size.height,
            left: 0.0,
            middle: size.width / 2.0,
            right: size.width,
        }
    }

    /// Coordinate of a horizontal point.
    #[inline]
    pub fn horizontal(&self, point: Horizontal) -> f64 {
        match point {
            Horizontal::Left => self.left,
            Horizontal::Middle => self.middle,
            Horizontal::Right => self.right,
        }
    }

    /// Coordinate of a vertical point.
    #[inline]
    pub fn vertical(&self, point: Vertical) -> f64 {
        match point {
            Vertical::Top => self.top,
            Vertical::Center => self.center,
            Vertical::Bottom => self.bottom,
        }
    }

    /// Box width implied by the points.
    #[inline]
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    /// Box height implied by the points.
    #[inline]
    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }
}
