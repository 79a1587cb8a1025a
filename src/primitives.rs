use glam::Vec2;
use tracing::warn;

use crate::data_types::{ChartData, DatasetRole, Viewport};
use crate::interpolation::PolylineInterpolation;
use crate::path::Path;
use crate::theme::{ChartTheme, Rgba};

/// Stacking order: segment bands sit under the curve, point markers above
/// it, selection markers on top of everything.
pub const Z_SEGMENTS: f32 = -20.0;
pub const Z_BARS: f32 = -10.0;
pub const Z_CURVE: f32 = 0.0;
pub const Z_POINTS: f32 = 10.0;
pub const Z_TOP: f32 = 100.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Curve,
    PointMarker,
    SegmentBand,
    SelectedMarker,
    CurrentMarker,
    Bar,
}

#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct PrimitiveStyle {
    pub fill: Option<Rgba>,
    pub stroke: Option<Rgba>,
    pub line_width: f32,
}

/// An atomic visual shape derived from a point set.
///
/// Primitives are owned by the dataset that produced them and are destroyed
/// and recreated on regeneration; animation mutates opacity and position
/// only, never geometry.
#[derive(Clone, Debug, PartialEq)]
pub struct Primitive {
    pub kind: PrimitiveKind,
    pub geometry: Path,
    pub anchor: Vec2,
    pub style: PrimitiveStyle,
    pub z_order: f32,
    pub opacity: f32,
}

impl Primitive {
    fn new(kind: PrimitiveKind, geometry: Path, anchor: Vec2, style: PrimitiveStyle, z: f32) -> Self {
        Self {
            kind,
            geometry,
            anchor,
            style,
            z_order: z,
            opacity: 1.0,
        }
    }
}

/// Primitive list for one dataset, plus the collapsed bar paths kept as
/// morph-animation start states.
#[derive(Clone, Debug, Default)]
pub struct BuiltPrimitives {
    pub primitives: Vec<Primitive>,
    pub morph_starts: Vec<Path>,
}

/// Builds the visual primitive set for a dataset's points.
pub struct PrimitiveFactory {
    pub theme: ChartTheme,
}

impl PrimitiveFactory {
    pub fn new(theme: ChartTheme) -> Self {
        Self { theme }
    }

    /// Dispatches on the dataset's role. Kinds with insufficient input
    /// yield an empty list, never an error.
    pub fn build(
        &self,
        role: DatasetRole,
        chart: &ChartData,
        curve_path: Option<&Path>,
        interpolation: PolylineInterpolation,
        viewport: Viewport,
    ) -> BuiltPrimitives {
        match role {
            DatasetRole::Curve => self.curve(&chart.points, interpolation),
            DatasetRole::Points => self.point_markers(&chart.points),
            DatasetRole::Segments => self.segment_bands(curve_path, &chart.data),
            DatasetRole::SelectedPoint => self.marker_at_latest(
                chart,
                PrimitiveKind::SelectedMarker,
                self.theme.selected_point_size,
                self.theme.selected_point_color,
            ),
            DatasetRole::CurrentPoint => self.marker_at_latest(
                chart,
                PrimitiveKind::CurrentMarker,
                self.theme.current_point_size,
                self.theme.current_point_color,
            ),
            DatasetRole::Bar {
                column_index,
                column_count,
            } => self.bars(&chart.points, column_index, column_count, viewport),
        }
    }

    fn curve(&self, points: &[Vec2], interpolation: PolylineInterpolation) -> BuiltPrimitives {
        let Some(path) = interpolation.as_path(points) else {
            warn!(points = points.len(), "not enough points for a curve path");
            return BuiltPrimitives::default();
        };
        let anchor = path.start().unwrap_or_default();
        let style = PrimitiveStyle {
            fill: None,
            stroke: Some(self.theme.curve_color.with_alpha(0.5)),
            line_width: self.theme.curve_line_width,
        };
        BuiltPrimitives {
            primitives: vec![Primitive::new(
                PrimitiveKind::Curve,
                path,
                anchor,
                style,
                Z_CURVE,
            )],
            morph_starts: Vec::new(),
        }
    }

    fn point_markers(&self, points: &[Vec2]) -> BuiltPrimitives {
        let style = PrimitiveStyle {
            fill: Some(self.theme.point_color),
            stroke: None,
            line_width: 0.5,
        };
        let size = self.theme.point_size;
        let primitives = points
            .iter()
            .enumerate()
            .map(|(i, &p)| {
                // Each marker stacks above the previous one.
                Primitive::new(
                    PrimitiveKind::PointMarker,
                    marker_rect(p, size),
                    p,
                    style,
                    Z_POINTS + i as f32,
                )
            })
            .collect();
        BuiltPrimitives {
            primitives,
            morph_starts: Vec::new(),
        }
    }

    /// One band per sub-path of the reference curve, shaded by mapping the
    /// segment's originating data value through the 10-step color ramp.
    fn segment_bands(&self, curve_path: Option<&Path>, data: &[f32]) -> BuiltPrimitives {
        let Some(path) = curve_path else {
            warn!("segment bands requested without a curve path");
            return BuiltPrimitives::default();
        };
        let sub_paths = path.sub_paths();
        if sub_paths.is_empty() || data.is_empty() {
            return BuiltPrimitives::default();
        }
        let min = data.iter().copied().fold(f32::INFINITY, f32::min);
        let max = data.iter().copied().fold(f32::NEG_INFINITY, f32::max);
        let primitives = sub_paths
            .into_iter()
            .enumerate()
            .map(|(i, sub)| {
                let value = data[i % data.len()];
                let color = ChartTheme::ramp_color(self.theme.segment_color, value, min, max);
                let anchor = sub.bounds().map(|(lo, _)| lo).unwrap_or_default();
                let style = PrimitiveStyle {
                    fill: Some(color.darker(0.5).with_alpha(0.12)),
                    stroke: Some(color.with_alpha(0.8)),
                    line_width: self.theme.segment_line_width,
                };
                Primitive::new(PrimitiveKind::SegmentBand, sub, anchor, style, Z_SEGMENTS)
            })
            .collect();
        BuiltPrimitives {
            primitives,
            morph_starts: Vec::new(),
        }
    }

    fn marker_at_latest(
        &self,
        chart: &ChartData,
        kind: PrimitiveKind,
        size: f32,
        color: Rgba,
    ) -> BuiltPrimitives {
        let Some(point) = chart.max_x_point() else {
            return BuiltPrimitives::default();
        };
        let style = PrimitiveStyle {
            fill: Some(color),
            stroke: None,
            line_width: 0.5,
        };
        BuiltPrimitives {
            primitives: vec![Primitive::new(
                kind,
                marker_rect(point, size),
                point,
                style,
                Z_TOP,
            )],
            morph_starts: Vec::new(),
        }
    }

    /// One rectangle per adjacent point pair, occupying the dataset's
    /// column slot within the pair span, plus the matching collapsed
    /// rectangles used as morph start states.
    fn bars(
        &self,
        points: &[Vec2],
        column_index: usize,
        column_count: usize,
        viewport: Viewport,
    ) -> BuiltPrimitives {
        if points.len() < 2 || column_count == 0 {
            return BuiltPrimitives::default();
        }
        let style = PrimitiveStyle {
            fill: Some(self.theme.bar_color.with_alpha(0.6)),
            stroke: Some(self.theme.bar_color),
            line_width: 1.0,
        };
        let mut primitives = Vec::with_capacity(points.len() - 1);
        let mut morph_starts = Vec::with_capacity(points.len() - 1);
        for pair in points.windows(2) {
            let span = (pair[0].x - pair[1].x).abs();
            let width = span / column_count as f32;
            let origin_x = pair[0].x + width * column_index as f32;
            let top = Vec2::new(origin_x, pair[0].y);
            let height = viewport.height - pair[0].y;

            let rect = Path::rect(top, width, height);
            // Thin strip at the bar's bottom edge: the collapsed start of
            // the morph animation.
            morph_starts.push(Path::rect(Vec2::new(origin_x, top.y + height), width, 1.0));
            primitives.push(Primitive::new(PrimitiveKind::Bar, rect, top, style, Z_BARS));
        }
        BuiltPrimitives {
            primitives,
            morph_starts,
        }
    }
}

/// Fixed-size square footprint centered on a point; hosts draw markers as
/// ovals inscribed in it.
fn marker_rect(center: Vec2, size: f32) -> Path {
    Path::rect(
        Vec2::new(center.x - size * 0.5, center.y - size * 0.5),
        size,
        size,
    )
}
