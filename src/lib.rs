//! scrollchart: data-to-geometry pipeline for scrollable charts.
//!
//! Raw series go through reduction, scaling and interpolation into render
//! primitives; a scheduler drives the transitions between regenerations.

pub mod animation;
pub mod data_types;
pub mod decimation;
pub mod interpolation;
pub mod layout_cache;
pub mod path;
pub mod primitives;
pub mod scales;
pub mod scene;
pub mod scheduler;
pub mod theme;
pub mod utils;

pub use data_types::{
    AnimationTiming, ChartData, ChartDataSource, DatasetConfig, DatasetRole, NullSink,
    ReductionMode, RenderSink, Series, VecDataSource, Viewport,
};
pub use interpolation::PolylineInterpolation;
pub use scene::SceneManager;
pub use theme::ChartTheme;
