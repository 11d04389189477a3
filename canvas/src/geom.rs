#[cfg(test)]
#[path = "geom_test.rs"]
mod geom_test;

use serde::{Deserialize, Serialize};

/// A point in canvas pixel space. The origin is the top-left corner of the
/// floor-plan stage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Clamp both coordinates to be non-negative.
    #[must_use]
    pub fn clamped_to_stage(self) -> Self {
        Self { x: self.x.max(0.0), y: self.y.max(0.0) }
    }
}

/// Axis-aligned rectangle `[x, x + width] × [y, y + length]`.
///
/// `length` runs along the y axis, matching how rooms and desks are measured
/// on a floor plan.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub length: f64,
}

impl Bounds {
    /// Whether `pt` lies inside the rectangle. Edges count as inside.
    #[must_use]
    pub fn contains(&self, pt: Point) -> bool {
        pt.x >= self.x && pt.x <= self.x + self.width && pt.y >= self.y && pt.y <= self.y + self.length
    }
}
