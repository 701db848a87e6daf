//! The ordered set of control points for the current curve.
//!
//! [`ControlPointStore`] always holds between [`MIN_POINTS`] and
//! [`MAX_POINTS`] points.  Changing the point count never resamples the old
//! curve: the whole sequence is replaced with the fixed template for the
//! new count.

use crate::geometry::Point;
use log::debug;

/// Starting layouts, indexed by `point_count - MIN_POINTS`.
const TEMPLATES: [&[[f64; 2]]; 5] = [
    &[[200.0, 400.0], [600.0, 400.0]],
    &[[200.0, 400.0], [400.0, 100.0], [600.0, 400.0]],
    &[[200.0, 400.0], [200.0, 100.0], [600.0, 100.0], [600.0, 400.0]],
    &[
        [200.0, 400.0],
        [200.0, 250.0],
        [400.0, 100.0],
        [600.0, 250.0],
        [600.0, 400.0],
    ],
    &[
        [200.0, 400.0],
        [200.0, 250.0],
        [300.0, 100.0],
        [500.0, 100.0],
        [600.0, 250.0],
        [600.0, 400.0],
    ],
];

/// Fewest supported control points (a straight line).
pub const MIN_POINTS: usize = 2;
/// Most supported control points (a quintic curve).
pub const MAX_POINTS: usize = TEMPLATES.len() + 1;

/// Template for `count` points.  `count` must already be in range.
fn template(count: usize) -> Vec<Point> {
    TEMPLATES[count - MIN_POINTS]
        .iter()
        .copied()
        .map(Point::from)
        .collect()
}

/// Rejected store construction.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("unsupported control point count {0} (expected {min}..={max})", min = MIN_POINTS, max = MAX_POINTS)]
    UnsupportedPointCount(usize),
}

/// Owns the control points of the curve.
#[derive(Debug, Clone, PartialEq)]
pub struct ControlPointStore {
    points: Vec<Point>,
}

impl ControlPointStore {
    /// Create a store holding the template for `count` points.
    ///
    /// Unlike [`set_point_count`](Self::set_point_count), an out-of-range
    /// count here is an error: it can only come from startup configuration.
    pub fn new(count: usize) -> Result<Self, StoreError> {
        if !(MIN_POINTS..=MAX_POINTS).contains(&count) {
            return Err(StoreError::UnsupportedPointCount(count));
        }
        Ok(Self {
            points: template(count),
        })
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Number of control points (curve degree plus one).
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Always `false`; a store never holds fewer than [`MIN_POINTS`].
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Position of the point at `index`.
    pub fn get(&self, index: usize) -> Option<Point> {
        self.points.get(index).copied()
    }

    /// Replace every point with the template for `count`, clamped to
    /// `[MIN_POINTS, MAX_POINTS]`.
    ///
    /// Returns the count actually applied.  Requesting the current count
    /// still resets the points to the template.
    pub fn set_point_count(&mut self, count: usize) -> usize {
        let count = count.clamp(MIN_POINTS, MAX_POINTS);
        self.points = template(count);
        debug!("control points reset to {}-point template", count);
        count
    }

    /// One more control point, unless already at [`MAX_POINTS`].
    ///
    /// At the upper bound the points are left untouched (a drag-edited
    /// curve is not reset).  Returns whether the points changed.
    pub fn increase(&mut self) -> bool {
        if self.len() >= MAX_POINTS {
            return false;
        }
        self.set_point_count(self.len() + 1);
        true
    }

    /// One fewer control point, unless already at [`MIN_POINTS`].
    ///
    /// Returns whether the points changed.
    pub fn decrease(&mut self) -> bool {
        if self.len() <= MIN_POINTS {
            return false;
        }
        self.set_point_count(self.len() - 1);
        true
    }

    /// First point (in store order) within `radius` of `pos`.
    ///
    /// The boundary is inclusive and compared on squared distances.
    pub fn hit_test(&self, pos: Point, radius: f64) -> Option<usize> {
        let r2 = radius * radius;
        self.points.iter().position(|p| p.distance_sq(pos) <= r2)
    }

    /// Move the point at `index` to `pos`, clamping `y` to be non-negative.
    ///
    /// `x` is never clamped.  Returns the stored position, or `None` when
    /// `index` is out of range.
    pub fn move_point(&mut self, index: usize, pos: Point) -> Option<Point> {
        let slot = self.points.get_mut(index)?;
        *slot = Point::new(pos.x, pos.y.max(0.0));
        Some(*slot)
    }
}
