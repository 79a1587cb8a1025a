use glam::Vec2;

use crate::utils::hash_f32_slice;

/// One dataset's raw values for an update cycle.
///
/// A series is replaced wholesale when the data source reports new values;
/// identity is compared through the content hash, never element by element.
#[derive(Clone, Debug)]
pub struct Series {
    values: Vec<f32>,
    content_hash: u64,
}

impl Series {
    pub fn new(values: Vec<f32>) -> Self {
        let content_hash = hash_f32_slice(&values);
        Self {
            values,
            content_hash,
        }
    }

    pub fn values(&self) -> &[f32] {
        &self.values
    }

    pub fn content_hash(&self) -> u64 {
        self.content_hash
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl From<Vec<f32>> for Series {
    fn from(values: Vec<f32>) -> Self {
        Self::new(values)
    }
}

impl PartialEq for Series {
    fn eq(&self, other: &Self) -> bool {
        self.content_hash == other.content_hash
    }
}

/// Drawable area in continuous units. Changing it invalidates all geometry.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn hash(&self) -> u64 {
        hash_f32_slice(&[self.width, self.height])
    }
}

/// Strategy converting a raw series into the point set actually rendered.
/// Exactly one mode is active per dataset; switching modes invalidates the
/// dataset's cached points and primitives.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ReductionMode {
    Discrete,
    /// Replace each contiguous chunk of the given size with its mean.
    Averaged(usize),
    /// Polyline decimation within the given tolerance.
    Simplified(f32),
    /// Least-squares fit, extrapolating the given number of points.
    Regressed(usize),
}

/// How many times a dataset wants its primitives animated per regeneration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AnimationTiming {
    None,
    RepeatN(u32),
    Infinite,
    OneShot,
}

impl AnimationTiming {
    /// Repeat count used by the scheduler; anything above zero animates.
    pub fn repeat_count(&self) -> u32 {
        match self {
            AnimationTiming::None => 0,
            AnimationTiming::RepeatN(n) => *n,
            AnimationTiming::Infinite => u32::MAX,
            AnimationTiming::OneShot => 1,
        }
    }
}

/// A dataset's reduced point set together with the values that produced it.
/// `Regressed` keeps the extrapolated tail in `data`, so `points` and
/// `data` stay index-aligned for segment coloring and hit-testing.
#[derive(Clone, Debug, Default)]
pub struct ChartData {
    pub points: Vec<Vec2>,
    pub data: Vec<f32>,
}

impl ChartData {
    pub fn new(points: Vec<Vec2>, data: Vec<f32>) -> Self {
        Self { points, data }
    }

    /// The point with the maximum x coordinate, i.e. the most recent one.
    pub fn max_x_point(&self) -> Option<Vec2> {
        self.points
            .iter()
            .copied()
            .max_by(|a, b| a.x.total_cmp(&b.x))
    }

    /// The point with the minimum x coordinate.
    pub fn min_x_point(&self) -> Option<Vec2> {
        self.points
            .iter()
            .copied()
            .min_by(|a, b| a.x.total_cmp(&b.x))
    }
}
