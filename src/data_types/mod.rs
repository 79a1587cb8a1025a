pub mod data;
pub mod datasource;
pub mod plot_configs;

pub use data::{AnimationTiming, ChartData, ReductionMode, Series, Viewport};
pub use datasource::{ChartDataSource, NullSink, RenderSink, VecDataSource};
pub use plot_configs::{DatasetConfig, DatasetRole};
