//! De Casteljau evaluation of Bezier curves of any degree.
//!
//! A curve with `N` control points is evaluated at `t` by repeatedly
//! replacing the point list with the linear interpolations between
//! neighbours until a single point remains.  Every function here is pure.

use crate::geometry::{lerp, Point};

/// Interpolation step used to sample the curve polyline.
pub const DEFAULT_SAMPLE_STEP: f64 = 0.005;

/// Finest sampling step; smaller steps are raised to this.
pub const MIN_SAMPLE_STEP: f64 = 1e-4;

/// Collapse one level: `N` points become `N - 1` interpolated points.
fn collapse(level: &[Point], t: f64) -> Vec<Point> {
    level.windows(2).map(|w| lerp(w[0], w[1], t)).collect()
}

/// Evaluate the curve defined by `points` at parameter `t`.
///
/// A single point is returned unchanged.  Returns `None` for an empty
/// slice.  `t` is not clamped; values outside `[0, 1]` extrapolate.
pub fn evaluate(points: &[Point], t: f64) -> Option<Point> {
    let mut level = points.to_vec();
    while level.len() > 1 {
        level = collapse(&level, t);
    }
    level.pop()
}

/// Every level of the construction at `t`, from the input points down to
/// the final singleton.
///
/// Level `k` holds `N - k` points.  The last level is the value
/// [`evaluate`] returns.  An empty input yields no levels.
pub fn evaluate_with_levels(points: &[Point], t: f64) -> Vec<Vec<Point>> {
    if points.is_empty() {
        return Vec::new();
    }
    let mut levels = Vec::with_capacity(points.len());
    levels.push(points.to_vec());
    while let Some(last) = levels.last().filter(|l| l.len() > 1) {
        let next = collapse(last, t);
        levels.push(next);
    }
    levels
}

/// Sample the curve at `t = 0, step, 2 * step, …` while `t < 1`.
///
/// `t = 1` itself is never sampled, so the polyline stops just short of
/// the last control point.  The `i`-th parameter is computed as
/// `i * step` rather than by accumulation, which yields exactly
/// `ceil(1 / step)` samples.  A non-positive or non-finite `step` yields
/// no samples; a positive step below [`MIN_SAMPLE_STEP`] is raised to it.
pub fn sample_curve(points: &[Point], step: f64) -> Vec<Point> {
    if points.is_empty() || !(step > 0.0 && step.is_finite()) {
        return Vec::new();
    }
    let step = step.max(MIN_SAMPLE_STEP);
    let mut samples = Vec::new();
    let mut i: u32 = 0;
    loop {
        let t = f64::from(i) * step;
        if t >= 1.0 {
            break;
        }
        match evaluate(points, t) {
            Some(p) => samples.push(p),
            None => break,
        }
        i += 1;
    }
    samples
}
