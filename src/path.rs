//! Continuous curve description produced by the interpolators and consumed
//! by the primitive factory and the ride animation.

use glam::Vec2;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathSegment {
    Line {
        from: Vec2,
        to: Vec2,
    },
    Cubic {
        from: Vec2,
        c1: Vec2,
        c2: Vec2,
        to: Vec2,
    },
}

impl PathSegment {
    pub fn from_point(&self) -> Vec2 {
        match self {
            PathSegment::Line { from, .. } | PathSegment::Cubic { from, .. } => *from,
        }
    }

    pub fn to_point(&self) -> Vec2 {
        match self {
            PathSegment::Line { to, .. } | PathSegment::Cubic { to, .. } => *to,
        }
    }

    /// Evaluates the segment at local parameter `t` in `[0, 1]`.
    pub fn point_at(&self, t: f32) -> Vec2 {
        let t = t.clamp(0.0, 1.0);
        match *self {
            PathSegment::Line { from, to } => from.lerp(to, t),
            PathSegment::Cubic { from, c1, c2, to } => {
                let u = 1.0 - t;
                from * (u * u * u)
                    + c1 * (3.0 * u * u * t)
                    + c2 * (3.0 * u * t * t)
                    + to * (t * t * t)
            }
        }
    }
}

/// An ordered run of connected segments.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Path {
    segments: Vec<PathSegment>,
}

impl Path {
    pub fn new(segments: Vec<PathSegment>) -> Self {
        Self { segments }
    }

    /// Axis-aligned rectangle as a closed four-segment path, clockwise from
    /// the top-left corner.
    pub fn rect(origin: Vec2, width: f32, height: f32) -> Self {
        let tl = origin;
        let tr = Vec2::new(origin.x + width, origin.y);
        let br = Vec2::new(origin.x + width, origin.y + height);
        let bl = Vec2::new(origin.x, origin.y + height);
        Self::new(vec![
            PathSegment::Line { from: tl, to: tr },
            PathSegment::Line { from: tr, to: br },
            PathSegment::Line { from: br, to: bl },
            PathSegment::Line { from: bl, to: tl },
        ])
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn start(&self) -> Option<Vec2> {
        self.segments.first().map(|s| s.from_point())
    }

    pub fn end(&self) -> Option<Vec2> {
        self.segments.last().map(|s| s.to_point())
    }

    /// Samples the path at global parameter `t` in `[0, 1]`, distributed
    /// uniformly over segments. For an interpolated polyline of n points,
    /// `t = i / (n - 1)` lands exactly on input point i.
    pub fn point_at(&self, t: f32) -> Option<Vec2> {
        if self.segments.is_empty() {
            return None;
        }
        let t = t.clamp(0.0, 1.0);
        let scaled = t * self.segments.len() as f32;
        let idx = (scaled as usize).min(self.segments.len() - 1);
        Some(self.segments[idx].point_at(scaled - idx as f32))
    }

    /// One single-segment path per segment, in order. Segment bands are
    /// built from these.
    pub fn sub_paths(&self) -> Vec<Path> {
        self.segments
            .iter()
            .map(|&s| Path::new(vec![s]))
            .collect()
    }

    /// Control-point bounding box; exact for lines, a conservative hull for
    /// cubics.
    pub fn bounds(&self) -> Option<(Vec2, Vec2)> {
        let mut min = Vec2::splat(f32::INFINITY);
        let mut max = Vec2::splat(f32::NEG_INFINITY);
        let mut extend = |p: Vec2| {
            min = min.min(p);
            max = max.max(p);
        };
        for seg in &self.segments {
            match *seg {
                PathSegment::Line { from, to } => {
                    extend(from);
                    extend(to);
                }
                PathSegment::Cubic { from, c1, c2, to } => {
                    extend(from);
                    extend(c1);
                    extend(c2);
                    extend(to);
                }
            }
        }
        if self.segments.is_empty() {
            None
        } else {
            Some((min, max))
        }
    }
}
