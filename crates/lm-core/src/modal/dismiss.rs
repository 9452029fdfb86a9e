//! Outside-press detection.
//!
//! The host reports a pointer press together with the bounds of every modal
//! surface it is currently rendering. Nothing listens globally; the check is
//! evaluated only against the surfaces passed in.

use serde::{Deserialize, Serialize};

/// Pointer position in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned bounds of a rendered modal surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Edges are inclusive: a press on the border belongs to the surface.
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }
}

/// Scoped outside-interaction check for the active modal.
#[derive(Debug, Clone, Copy)]
pub struct OutsideInteraction<'a> {
    surfaces: &'a [Rect],
}

impl<'a> OutsideInteraction<'a> {
    pub fn new(surfaces: &'a [Rect]) -> Self {
        Self { surfaces }
    }

    /// `true` only when the point misses every rendered surface.
    ///
    /// With no surfaces rendered there is nothing to dismiss, so the press is
    /// not treated as outside.
    pub fn is_outside(&self, point: Point) -> bool {
        !self.surfaces.is_empty() && self.surfaces.iter().all(|s| !s.contains(point))
    }
}
