use glam::Vec2;

use crate::path::{Path, PathSegment};

/// How the ordered point sequence becomes a continuous curve.
///
/// Every mode passes exactly through the input points, in order. The
/// centripetal Catmull-Rom variant is the default: it avoids the overshoot
/// artifacts naive cubic splines show on unevenly spaced data.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PolylineInterpolation {
    /// Straight segments.
    None,
    /// Gentle neighbor-weighted smoothing.
    Smoothed,
    /// Eased cubic with horizontally placed control points.
    CubicCurve,
    /// Cardinal spline; tension 0 is loosest, 1 collapses to lines.
    Hermite(f32),
    /// Parametrized Catmull-Rom; alpha 0.5 is the centripetal variant.
    CatmullRom(f32),
}

impl Default for PolylineInterpolation {
    fn default() -> Self {
        PolylineInterpolation::CatmullRom(0.5)
    }
}

impl PolylineInterpolation {
    /// Builds the curve, or `None` when fewer than two points are supplied.
    pub fn as_path(&self, points: &[Vec2]) -> Option<Path> {
        if points.len() < 2 {
            return None;
        }
        let segments = match *self {
            PolylineInterpolation::None => lines(points),
            PolylineInterpolation::Smoothed => smoothed(points, 0.15),
            PolylineInterpolation::CubicCurve => cubic_thirds(points),
            PolylineInterpolation::Hermite(tension) => hermite(points, tension),
            PolylineInterpolation::CatmullRom(alpha) => catmull_rom(points, alpha),
        };
        Some(Path::new(segments))
    }
}

fn lines(points: &[Vec2]) -> Vec<PathSegment> {
    points
        .windows(2)
        .map(|w| PathSegment::Line {
            from: w[0],
            to: w[1],
        })
        .collect()
}

/// Control points pulled along the neighbor deltas by `k`.
fn smoothed(points: &[Vec2], k: f32) -> Vec<PathSegment> {
    let n = points.len();
    let at = |i: isize| points[i.clamp(0, n as isize - 1) as usize];
    (0..n - 1)
        .map(|i| {
            let i = i as isize;
            let p1 = at(i);
            let p2 = at(i + 1);
            PathSegment::Cubic {
                from: p1,
                c1: p1 + (p2 - at(i - 1)) * k,
                c2: p2 - (at(i + 2) - p1) * k,
                to: p2,
            }
        })
        .collect()
}

/// Control points at the horizontal thirds of each span; eases y between
/// the two endpoint values.
fn cubic_thirds(points: &[Vec2]) -> Vec<PathSegment> {
    points
        .windows(2)
        .map(|w| {
            let (p1, p2) = (w[0], w[1]);
            let dx = (p2.x - p1.x) / 3.0;
            PathSegment::Cubic {
                from: p1,
                c1: Vec2::new(p1.x + dx, p1.y),
                c2: Vec2::new(p1.x + 2.0 * dx, p2.y),
                to: p2,
            }
        })
        .collect()
}

/// Cardinal spline: tangents from central differences scaled by the
/// tension, one-sided at the endpoints.
fn hermite(points: &[Vec2], tension: f32) -> Vec<PathSegment> {
    let n = points.len();
    let scale = (1.0 - tension.clamp(0.0, 1.0)) * 0.5;
    let tangent = |i: usize| -> Vec2 {
        if i == 0 {
            (points[1] - points[0]) * scale * 2.0
        } else if i == n - 1 {
            (points[n - 1] - points[n - 2]) * scale * 2.0
        } else {
            (points[i + 1] - points[i - 1]) * scale
        }
    };
    (0..n - 1)
        .map(|i| PathSegment::Cubic {
            from: points[i],
            c1: points[i] + tangent(i) / 3.0,
            c2: points[i + 1] - tangent(i + 1) / 3.0,
            to: points[i + 1],
        })
        .collect()
}

/// Parametrized Catmull-Rom converted to cubic Bezier spans. Coincident
/// neighbors make the knot spacing collapse; those spans degrade to lines.
fn catmull_rom(points: &[Vec2], alpha: f32) -> Vec<PathSegment> {
    let n = points.len();
    let alpha = alpha.clamp(0.0, 1.0);
    let at = |i: isize| points[i.clamp(0, n as isize - 1) as usize];
    (0..n - 1)
        .map(|i| {
            let i = i as isize;
            let (p0, p1, p2, p3) = (at(i - 1), at(i), at(i + 1), at(i + 2));

            let d01 = p0.distance(p1).powf(alpha);
            let d12 = p1.distance(p2).powf(alpha);
            let d23 = p2.distance(p3).powf(alpha);
            if d12 <= f32::EPSILON {
                return PathSegment::Line { from: p1, to: p2 };
            }

            let m1 = if d01 <= f32::EPSILON {
                p2 - p1
            } else {
                ((p1 - p0) / d01 - (p2 - p0) / (d01 + d12) + (p2 - p1) / d12) * d12
            };
            let m2 = if d23 <= f32::EPSILON {
                p2 - p1
            } else {
                ((p2 - p1) / d12 - (p3 - p1) / (d12 + d23) + (p3 - p2) / d23) * d12
            };

            PathSegment::Cubic {
                from: p1,
                c1: p1 + m1 / 3.0,
                c2: p2 - m2 / 3.0,
                to: p2,
            }
        })
        .collect()
}
