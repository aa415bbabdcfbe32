//! Geometric primitives for layered layouts.
//!
//! - [`Point`] - A 2D coordinate in layout space
//! - [`Size`] - Width and height dimensions
//!
//! # Coordinate System
//!
//! Layout space follows the SVG convention:
//!
//! ```text
//!   (0,0) ────────► +X   (levels grow rightward)
//!     │
//!     │
//!     ▼
//!    +Y                  (nodes within a level stack downward)
//! ```
//!
//! A [`Point`] produced by the layout engine is the top-left corner of a node
//! box. Render surfaces are free to scale or shift the whole space.

use serde::Serialize;

/// A 2D point in layout space.
///
/// # Examples
///
/// ```
/// # use strata_core::geometry::Point;
/// let p = Point::new(20.0, 100.0);
/// assert_eq!(p.x(), 20.0);
/// assert_eq!(p.y(), 100.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    /// Creates a new point with the given coordinates.
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate.
    pub fn x(self) -> f32 {
        self.x
    }

    /// Returns the y-coordinate.
    pub fn y(self) -> f32 {
        self.y
    }
}

/// Width and height of a box or of a whole layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn width(self) -> f32 {
        self.width
    }

    pub fn height(self) -> f32 {
        self.height
    }

    /// Returns `true` if both dimensions are zero.
    pub fn is_zero(self) -> bool {
        self.width == 0.0 && self.height == 0.0
    }
}
