//! Scene orchestration: pulls raw series from the data source, runs the
//! reduce/scale/interpolate pipeline, owns the per-dataset primitive lists
//! and drives the animation scheduler.

use std::sync::Arc;

use glam::Vec2;
use parking_lot::RwLock;
use tracing::{debug, info};

use crate::animation::{AnimationDescriptor, AnimationId, ScheduledAnimation};
use crate::data_types::{
    AnimationTiming, ChartData, ChartDataSource, DatasetConfig, DatasetRole, ReductionMode,
    RenderSink, Series, Viewport,
};
use crate::decimation::{averaged, extrapolate, simplify};
use crate::interpolation::PolylineInterpolation;
use crate::layout_cache::LayoutCache;
use crate::path::Path;
use crate::primitives::{BuiltPrimitives, PrimitiveFactory};
use crate::scales::PointScaler;
use crate::scheduler::{
    AnimationScheduler, CompletionAction, DatasetAnimationRequest, SchedulerState,
};
use crate::theme::ChartTheme;

/// Everything the scene tracks for one dataset. Created and destroyed with
/// the dataset; primitives are rebuilt wholesale on regeneration.
struct DatasetState {
    config: DatasetConfig,
    series: Series,
    mode: ReductionMode,
    timing: AnimationTiming,
    opacity: f32,
    chart: ChartData,
    built: BuiltPrimitives,
}

impl DatasetState {
    fn new(config: DatasetConfig) -> Self {
        Self {
            config,
            series: Series::new(Vec::new()),
            mode: ReductionMode::Discrete,
            timing: AnimationTiming::None,
            opacity: 1.0,
            chart: ChartData::default(),
            built: BuiltPrimitives::default(),
        }
    }
}

/// Result of reporting an animation completion: follow-up actions for the
/// host, plus transitions from a regeneration that was waiting on the drain.
pub struct CompletionOutcome {
    pub actions: Vec<CompletionAction>,
    pub animations: Vec<ScheduledAnimation>,
}

pub struct SceneManager {
    source: Arc<RwLock<dyn ChartDataSource>>,
    sink: Box<dyn RenderSink>,
    factory: PrimitiveFactory,
    scaler: PointScaler,
    interpolation: PolylineInterpolation,
    viewport: Viewport,
    cache: LayoutCache,
    scheduler: AnimationScheduler,
    datasets: Vec<DatasetState>,
    page_count: f32,
    sections_per_page: usize,
    selected_point: Option<usize>,
    dirty: bool,
}

impl SceneManager {
    pub fn new(
        source: Arc<RwLock<dyn ChartDataSource>>,
        sink: Box<dyn RenderSink>,
        configs: Vec<DatasetConfig>,
        theme: ChartTheme,
        viewport: Viewport,
    ) -> Self {
        Self {
            source,
            sink,
            factory: PrimitiveFactory::new(theme),
            scaler: PointScaler::new(),
            interpolation: PolylineInterpolation::default(),
            viewport,
            cache: LayoutCache::default(),
            scheduler: AnimationScheduler::new(),
            datasets: configs.into_iter().map(DatasetState::new).collect(),
            page_count: 1.0,
            sections_per_page: 1,
            selected_point: None,
            dirty: true,
        }
    }

    /// Pulls the current series, modes, timings and opacities from the data
    /// source and flags the scene dirty when anything changed.
    pub fn update_data(&mut self) {
        let source = self.source.read();
        let page_count = source.page_count();
        if page_count != self.page_count {
            self.page_count = page_count;
            self.dirty = true;
        }
        self.sections_per_page = source.sections_per_page();
        for (i, ds) in self.datasets.iter_mut().enumerate() {
            let series = Series::new(source.series_for(i));
            if series != ds.series {
                info!(dataset = i, len = series.len(), "series replaced");
                ds.series = series;
                self.dirty = true;
            }
            let mode = source.reduction_mode_for(i);
            if mode != ds.mode {
                debug!(dataset = i, ?mode, "reduction mode changed");
                ds.mode = mode;
                self.dirty = true;
            }
            ds.timing = source.animation_timing_for(i);
            ds.opacity = source.opacity_for(i);
        }
    }

    /// Full regeneration cycle: refresh data, reduce and scale every
    /// dataset, rebuild primitives and schedule their transitions.
    ///
    /// Skipped while more than one animation is in flight (unless forced;
    /// the request is then queued and replayed once the queue drains) and
    /// when the resulting layout was already produced for this viewport.
    pub fn update_layout(&mut self, force: bool) -> Vec<ScheduledAnimation> {
        self.update_data();
        if !self.scheduler.begin_regeneration(force) {
            return Vec::new();
        }

        let charts: Vec<ChartData> = self
            .datasets
            .iter()
            .map(|ds| Self::reduce(&mut self.scaler, ds.series.values(), ds.mode, self.viewport))
            .collect();

        let reference = self
            .datasets
            .iter()
            .position(|ds| ds.config.role == DatasetRole::Curve)
            .unwrap_or(0);
        let reference_points = charts
            .get(reference)
            .map(|c| c.points.as_slice())
            .unwrap_or(&[]);
        let hit = self.cache.observe(self.viewport, reference_points);
        if hit && !self.dirty && !force {
            debug!("layout unchanged, regeneration skipped");
            return Vec::new();
        }

        let curve_path = charts
            .get(reference)
            .and_then(|c| self.interpolation.as_path(&c.points));

        for (i, chart) in charts.into_iter().enumerate() {
            let ds = &mut self.datasets[i];
            ds.built = self.factory.build(
                ds.config.role,
                &chart,
                curve_path.as_ref(),
                self.interpolation,
                self.viewport,
            );
            ds.chart = chart;
            // Point markers keep their own fade lifecycle; everything else
            // takes the steady-state opacity straight from the source.
            if ds.config.role != DatasetRole::Points {
                for primitive in &mut ds.built.primitives {
                    primitive.opacity = ds.opacity;
                }
            }
            self.sink.primitives_changed(i, &ds.built.primitives);
        }
        self.dirty = false;
        self.selected_point = None;

        let requests: Vec<DatasetAnimationRequest<'_>> = self
            .datasets
            .iter()
            .enumerate()
            .map(|(i, ds)| DatasetAnimationRequest {
                dataset: i,
                role: ds.config.role,
                repeat_count: ds.timing.repeat_count(),
                target_opacity: ds.opacity,
                primitives: &ds.built.primitives,
                morph_starts: &ds.built.morph_starts,
            })
            .collect();
        self.scheduler
            .schedule(&requests, curve_path.as_ref(), self.page_count)
    }

    /// Reduces one raw series into its scaled point set. The scaler range
    /// is recomputed per dataset, over the series the mode actually renders.
    fn reduce(
        scaler: &mut PointScaler,
        series: &[f32],
        mode: ReductionMode,
        viewport: Viewport,
    ) -> ChartData {
        match mode {
            ReductionMode::Discrete => {
                scaler.update_range_limits(series);
                ChartData::new(scaler.make_points(series, viewport), series.to_vec())
            }
            ReductionMode::Averaged(chunk) => {
                let means = averaged(series, chunk);
                scaler.update_range_limits(&means);
                ChartData::new(scaler.make_points(&means, viewport), means)
            }
            ReductionMode::Simplified(tolerance) => {
                scaler.update_range_limits(series);
                let points = scaler.make_points(series, viewport);
                ChartData::new(simplify(&points, tolerance), series.to_vec())
            }
            ReductionMode::Regressed(count) => {
                if count == 0 {
                    return ChartData::default();
                }
                let mut combined = series.to_vec();
                combined.extend(extrapolate(series, count));
                scaler.update_range_limits(&combined);
                ChartData::new(scaler.make_points(&combined, viewport), combined)
            }
        }
    }

    /// Host reports a transition finished. Consumes a queued regeneration
    /// if this completion drained the animation queue.
    pub fn notify_animation_completed(
        &mut self,
        dataset: usize,
        id: AnimationId,
    ) -> CompletionOutcome {
        self.sink.animation_completed(dataset, id);
        let mut actions = self.scheduler.on_animation_completed(id);
        let mut animations = Vec::new();
        if let Some(pos) = actions
            .iter()
            .position(|a| *a == CompletionAction::RegenerationReady)
        {
            actions.remove(pos);
            debug!("animation queue drained, running deferred regeneration");
            animations = self.update_layout(false);
        }
        CompletionOutcome {
            actions,
            animations,
        }
    }

    /// Host reports the chained scroll-to-page transition settled. Returns
    /// the point-marker fade descriptors, once per latch.
    pub fn notify_scroll_completed(&mut self) -> Vec<AnimationDescriptor> {
        let mut fades = Vec::new();
        for action in self.scheduler.on_scroll_completed() {
            if let CompletionAction::FadeOutPoints(descriptors) = action {
                fades = descriptors;
            }
        }
        if let Some(first) = fades.first() {
            let dataset = first.dataset;
            if let Some(ds) = self.datasets.get_mut(dataset) {
                for primitive in &mut ds.built.primitives {
                    primitive.opacity = 0.0;
                }
                self.sink.primitives_changed(dataset, &ds.built.primitives);
            }
        }
        fades
    }

    /// Selects the reference-curve point nearest to `location`, moves the
    /// selection markers onto it and notifies the sink.
    pub fn select_point_near(&mut self, location: Vec2) -> Option<usize> {
        let reference = self
            .datasets
            .iter()
            .find(|ds| ds.config.role == DatasetRole::Curve)?;
        let (index, point) = reference
            .chart
            .points
            .iter()
            .copied()
            .enumerate()
            .min_by(|a, b| {
                a.1.distance_squared(location)
                    .total_cmp(&b.1.distance_squared(location))
            })?;
        self.selected_point = Some(index);

        for (i, ds) in self.datasets.iter_mut().enumerate() {
            let size = match ds.config.role {
                DatasetRole::SelectedPoint => self.factory.theme.selected_point_size,
                DatasetRole::CurrentPoint => self.factory.theme.current_point_size,
                _ => continue,
            };
            for primitive in &mut ds.built.primitives {
                primitive.anchor = point;
                primitive.geometry = Path::rect(point - Vec2::splat(size * 0.5), size, size);
            }
            self.sink.primitives_changed(i, &ds.built.primitives);
            self.sink.selection_changed(i, index);
        }
        Some(index)
    }

    /// Nearest primitive to `location` by anchor distance.
    pub fn nearest_primitive(&self, location: Vec2) -> Option<(usize, usize)> {
        self.primitive_anchors()
            .min_by(|a, b| {
                a.2.distance_squared(location)
                    .total_cmp(&b.2.distance_squared(location))
            })
            .map(|(d, l, _)| (d, l))
    }

    /// Farthest primitive from `location` by anchor distance.
    pub fn farthest_primitive(&self, location: Vec2) -> Option<(usize, usize)> {
        self.primitive_anchors()
            .max_by(|a, b| {
                a.2.distance_squared(location)
                    .total_cmp(&b.2.distance_squared(location))
            })
            .map(|(d, l, _)| (d, l))
    }

    fn primitive_anchors(&self) -> impl Iterator<Item = (usize, usize, Vec2)> + '_ {
        self.datasets.iter().enumerate().flat_map(|(d, ds)| {
            ds.built
                .primitives
                .iter()
                .enumerate()
                .map(move |(l, p)| (d, l, p.anchor))
        })
    }

    /// Where the riding marker sits at `progress` of the current ride.
    pub fn ride_point_at(&self, progress: f32) -> Option<Vec2> {
        self.scheduler.ride_point_at(progress)
    }

    pub fn set_viewport(&mut self, viewport: Viewport) -> Vec<ScheduledAnimation> {
        self.viewport = viewport;
        self.cache.clear();
        self.update_layout(true)
    }

    pub fn set_interpolation(
        &mut self,
        interpolation: PolylineInterpolation,
    ) -> Vec<ScheduledAnimation> {
        self.interpolation = interpolation;
        self.cache.clear();
        self.update_layout(true)
    }

    pub fn set_theme(&mut self, theme: ChartTheme) -> Vec<ScheduledAnimation> {
        self.factory.theme = theme;
        self.update_layout(true)
    }

    pub fn primitives(&self, dataset: usize) -> &[crate::primitives::Primitive] {
        self.datasets
            .get(dataset)
            .map(|ds| ds.built.primitives.as_slice())
            .unwrap_or(&[])
    }

    pub fn chart_data(&self, dataset: usize) -> Option<&ChartData> {
        self.datasets.get(dataset).map(|ds| &ds.chart)
    }

    pub fn dataset_count(&self) -> usize {
        self.datasets.len()
    }

    pub fn selected_point(&self) -> Option<usize> {
        self.selected_point
    }

    pub fn page_count(&self) -> f32 {
        self.page_count
    }

    pub fn sections_per_page(&self) -> usize {
        self.sections_per_page
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn theme(&self) -> &ChartTheme {
        &self.factory.theme
    }

    pub fn scheduler_state(&self) -> SchedulerState {
        self.scheduler.state()
    }

    /// The layout has settled once the same fingerprint has hit more than
    /// once in a row.
    pub fn is_layout_stable(&self) -> bool {
        self.cache.is_stable()
    }
}
