//! Small value types shared by every component: [`Point`], [`Rect`] and
//! [`Color`].
//!
//! All coordinates are `f64` pixels.  Screen space has its origin at the
//! top-left corner of the window; workspace space is screen space shifted
//! down by the menu bar height.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Sub};

/// A 2D coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Squared Euclidean distance to `other`.
    pub fn distance_sq(self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// Shift vertically by `dy`.
    pub fn offset_y(self, dy: f64) -> Self {
        Self::new(self.x, self.y + dy)
    }
}

impl From<[f64; 2]> for Point {
    fn from([x, y]: [f64; 2]) -> Self {
        Self { x, y }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, other: Point) -> Point {
        Point::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, other: Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;

    fn mul(self, s: f64) -> Point {
        Point::new(self.x * s, self.y * s)
    }
}

/// Linear interpolation between `p1` (at `t = 0`) and `p2` (at `t = 1`).
///
/// Written as `p1 * (1 - t) + p2 * t`, which equals `p1 + t * (p2 - p1)`
/// but lands on both endpoints exactly.  `t` outside `[0, 1]` extrapolates
/// along the line through both points.
pub fn lerp(p1: Point, p2: Point, t: f64) -> Point {
    p1 * (1.0 - t) + p2 * t
}

/// Axis-aligned rectangle used for pointer hit regions and filled bars.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Whether `p` lies inside the rectangle.
    ///
    /// The left and top edges are inclusive, the right and bottom edges are
    /// exclusive, so two rectangles sharing an edge never both claim a
    /// point.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x < self.x + self.width && p.y >= self.y && p.y < self.y + self.height
    }
}

/// An opaque RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "[u8; 3]", into = "[u8; 3]")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const LIGHT_GRAY: Color = Color::rgb(230, 230, 230);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const YELLOW: Color = Color::rgb(255, 205, 0);
    pub const BLUE: Color = Color::rgb(60, 21, 184);
    pub const RED: Color = Color::rgb(251, 0, 13);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Channels scaled to `[0.0, 1.0]`.
    pub fn to_unit(self) -> (f64, f64, f64) {
        (
            f64::from(self.r) / 255.0,
            f64::from(self.g) / 255.0,
            f64::from(self.b) / 255.0,
        )
    }
}

impl From<[u8; 3]> for Color {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self { r, g, b }
    }
}

impl From<Color> for [u8; 3] {
    fn from(c: Color) -> Self {
        [c.r, c.g, c.b]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lerp_endpoints_and_midpoint() {
        let a = Point::new(0.0, 10.0);
        let b = Point::new(10.0, 30.0);
        assert_eq!(lerp(a, b, 0.0), a);
        assert_eq!(lerp(a, b, 1.0), b);
        assert_eq!(lerp(a, b, 0.5), Point::new(5.0, 20.0));
    }

    #[test]
    fn lerp_extrapolates_outside_unit_interval() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(10.0, 0.0);
        assert_eq!(lerp(a, b, 2.0), Point::new(20.0, 0.0));
        assert_eq!(lerp(a, b, -1.0), Point::new(-10.0, 0.0));
    }

    #[test]
    fn rect_edges_are_half_open() {
        let r = Rect::new(50.0, 25.0, 50.0, 50.0);
        assert!(r.contains(Point::new(50.0, 25.0)));
        assert!(r.contains(Point::new(99.9, 74.9)));
        assert!(!r.contains(Point::new(100.0, 50.0)));
        assert!(!r.contains(Point::new(60.0, 75.0)));
        assert!(!r.contains(Point::new(49.9, 50.0)));
    }

    #[test]
    fn color_roundtrips_through_array() {
        let json = serde_json::to_string(&Color::YELLOW).unwrap();
        assert_eq!(json, "[255,205,0]");
        let back: Color = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Color::YELLOW);
    }

    #[test]
    fn distance_sq_avoids_root() {
        assert_eq!(Point::new(0.0, 0.0).distance_sq(Point::new(3.0, 4.0)), 25.0);
    }
}
