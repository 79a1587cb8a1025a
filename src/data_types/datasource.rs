use super::data::{AnimationTiming, ReductionMode};
use crate::animation::AnimationId;
use crate::primitives::Primitive;

/// Trait for data sources that feed the scene manager.
///
/// One implementor serves every dataset index; the scene queries it once
/// per regeneration cycle.
pub trait ChartDataSource: Send + Sync {
    /// Raw values for a dataset. Empty means "nothing to draw yet".
    fn series_for(&self, dataset: usize) -> Vec<f32>;

    /// The reduction strategy for a dataset this cycle.
    fn reduction_mode_for(&self, _dataset: usize) -> ReductionMode {
        ReductionMode::Discrete
    }

    /// Sections one page is divided into (e.g. months: 6).
    fn sections_per_page(&self) -> usize {
        1
    }

    /// Total number of scrollable pages.
    fn page_count(&self) -> f32 {
        1.0
    }

    /// Steady-state opacity for a dataset's primitives, typically 0 or 1.
    fn opacity_for(&self, _dataset: usize) -> f32 {
        1.0
    }

    fn animation_timing_for(&self, _dataset: usize) -> AnimationTiming {
        AnimationTiming::None
    }
}

/// Consumer of the scene's outputs. The host view implements this to mirror
/// primitive lists into its own layer tree.
pub trait RenderSink {
    fn primitives_changed(&mut self, dataset: usize, primitives: &[Primitive]);

    fn selection_changed(&mut self, _dataset: usize, _point_index: usize) {}

    fn animation_completed(&mut self, _dataset: usize, _descriptor: AnimationId) {}
}

/// Sink that drops everything; useful when only geometry is wanted.
#[derive(Default)]
pub struct NullSink;

impl RenderSink for NullSink {
    fn primitives_changed(&mut self, _dataset: usize, _primitives: &[Primitive]) {}
}

/// Default data source: one value vector per dataset, shared page layout.
pub struct VecDataSource {
    series: Vec<Vec<f32>>,
    modes: Vec<ReductionMode>,
    timings: Vec<AnimationTiming>,
    opacities: Vec<f32>,
    sections_per_page: usize,
    page_count: f32,
}

impl VecDataSource {
    pub fn new(series: Vec<Vec<f32>>) -> Self {
        let n = series.len();
        Self {
            series,
            modes: vec![ReductionMode::Discrete; n],
            timings: vec![AnimationTiming::None; n],
            opacities: vec![1.0; n],
            sections_per_page: 1,
            page_count: 1.0,
        }
    }

    pub fn with_pages(mut self, sections_per_page: usize, page_count: f32) -> Self {
        self.sections_per_page = sections_per_page;
        self.page_count = page_count;
        self
    }

    pub fn set_series(&mut self, dataset: usize, values: Vec<f32>) {
        if let Some(s) = self.series.get_mut(dataset) {
            *s = values;
        }
    }

    pub fn set_mode(&mut self, dataset: usize, mode: ReductionMode) {
        if let Some(m) = self.modes.get_mut(dataset) {
            *m = mode;
        }
    }

    pub fn set_timing(&mut self, dataset: usize, timing: AnimationTiming) {
        if let Some(t) = self.timings.get_mut(dataset) {
            *t = timing;
        }
    }

    pub fn set_opacity(&mut self, dataset: usize, opacity: f32) {
        if let Some(o) = self.opacities.get_mut(dataset) {
            *o = opacity;
        }
    }
}

impl ChartDataSource for VecDataSource {
    fn series_for(&self, dataset: usize) -> Vec<f32> {
        self.series.get(dataset).cloned().unwrap_or_default()
    }

    fn reduction_mode_for(&self, dataset: usize) -> ReductionMode {
        self.modes
            .get(dataset)
            .copied()
            .unwrap_or(ReductionMode::Discrete)
    }

    fn sections_per_page(&self) -> usize {
        self.sections_per_page
    }

    fn page_count(&self) -> f32 {
        self.page_count
    }

    fn opacity_for(&self, dataset: usize) -> f32 {
        self.opacities.get(dataset).copied().unwrap_or(1.0)
    }

    fn animation_timing_for(&self, dataset: usize) -> AnimationTiming {
        self.timings
            .get(dataset)
            .copied()
            .unwrap_or(AnimationTiming::None)
    }
}
