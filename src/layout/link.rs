//! Parent → child link curves.
//!
//! Links are cubic Béziers in left-to-right orientation: both control points
//! sit on the horizontal midpoint between the endpoints, each holding its own
//! endpoint's vertical coordinate. The result is an S-curve that reads as
//! "parent branches right into child" and never crosses its sibling links.

use serde::Serialize;

/// A 2-D point in layout space, already in screen axis order (x right, y down).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl Point {
    /// Create a point.
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Cubic curve between a parent and a child node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkCurve {
    /// Parent end.
    pub start: Point,
    /// First control point.
    pub control1: Point,
    /// Second control point.
    pub control2: Point,
    /// Child end.
    pub end: Point,
}

impl LinkCurve {
    /// Curve between two nodes given as (spread, depth) layout coordinates.
    ///
    /// The depth axis is horizontal on screen, so `(x, y)` of a node maps to
    /// the screen point `(y, x)`.
    pub fn between(source_x: f64, source_y: f64, target_x: f64, target_y: f64) -> Self {
        let mid = (source_y + target_y) / 2.0;
        Self {
            start: Point::new(source_y, source_x),
            control1: Point::new(mid, source_x),
            control2: Point::new(mid, target_x),
            end: Point::new(target_y, target_x),
        }
    }

    /// Evaluate the curve at `t` in `[0, 1]`.
    pub fn point_at(&self, t: f64) -> Point {
        let u = 1.0 - t;
        let (a, b, c, d) = (u * u * u, 3.0 * u * u * t, 3.0 * u * t * t, t * t * t);
        Point::new(
            a * self.start.x + b * self.control1.x + c * self.control2.x + d * self.end.x,
            a * self.start.y + b * self.control1.y + c * self.control2.y + d * self.end.y,
        )
    }

    /// SVG path data: `M x0,y0 C c1x,c1y c2x,c2y x1,y1`.
    pub fn svg_path(&self) -> String {
        format!(
            "M {},{} C {},{} {},{} {},{}",
            self.start.x,
            self.start.y,
            self.control1.x,
            self.control1.y,
            self.control2.x,
            self.control2.y,
            self.end.x,
            self.end.y,
        )
    }
}
