use glam::Vec2;

use crate::data_types::Viewport;

/// Maps a numeric series into normalized viewport coordinates.
///
/// The tracked `[min, max]` range affects every y coordinate, so
/// `update_range_limits` must run before scaling new data. Given a fixed
/// range, `make_points` is pure.
#[derive(Clone, Debug, Default)]
pub struct PointScaler {
    min_value: f32,
    max_value: f32,
}

impl PointScaler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn range(&self) -> (f32, f32) {
        (self.min_value, self.max_value)
    }

    /// Recomputes the value range over the series. NaN values are ignored.
    pub fn update_range_limits(&mut self, series: &[f32]) {
        let mut min = f32::INFINITY;
        let mut max = f32::NEG_INFINITY;
        for &v in series {
            if v.is_nan() {
                continue;
            }
            min = min.min(v);
            max = max.max(v);
        }
        if min.is_finite() && max.is_finite() {
            self.min_value = min;
            self.max_value = max;
        } else {
            self.min_value = 0.0;
            self.max_value = 0.0;
        }
    }

    /// One point per series element. X advances by `width / (len - 1)` per
    /// index; y is the value's inverted affine position in the range.
    pub fn make_points(&self, series: &[f32], viewport: Viewport) -> Vec<Vec2> {
        if series.is_empty() {
            return Vec::new();
        }
        let sections = (series.len() - 1).max(1) as f32;
        let x_step = viewport.width / sections;
        let span = self.max_value - self.min_value;
        series
            .iter()
            .enumerate()
            .map(|(i, &v)| {
                // Fixed-zero fraction when the range is degenerate.
                let fraction = if span > 0.0 {
                    (v.clamp(self.min_value, self.max_value) - self.min_value) / span
                } else {
                    0.0
                };
                Vec2::new(x_step * i as f32, viewport.height * (1.0 - fraction))
            })
            .collect()
    }
}
