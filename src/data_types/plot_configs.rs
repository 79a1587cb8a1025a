use serde::{Deserialize, Serialize};

/// Visual treatment a dataset's point set is rendered with.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum DatasetRole {
    /// The interpolated reference polyline other kinds derive from.
    Curve,
    /// One marker per point.
    Points,
    /// One colored band per sub-path of the curve.
    Segments,
    /// Single marker at the most recent point.
    SelectedPoint,
    /// Single marker at the most recent point, smaller treatment.
    CurrentPoint,
    /// One column per adjacent point pair.
    Bar {
        /// Which column slot of the pair span this dataset occupies.
        column_index: usize,
        /// Total column slots the pair span is divided into.
        column_count: usize,
    },
}

/// Per-dataset configuration owned by the scene manager, created and
/// destroyed with the dataset.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DatasetConfig {
    pub role: DatasetRole,
}

impl DatasetConfig {
    pub fn new(role: DatasetRole) -> Self {
        Self { role }
    }

    /// The classic seven-dataset arrangement: curve, point markers, segment
    /// bands, selection markers and two bar columns (slots 1 and 4 of 6).
    pub fn default_set() -> Vec<DatasetConfig> {
        vec![
            DatasetConfig::new(DatasetRole::Curve),
            DatasetConfig::new(DatasetRole::Points),
            DatasetConfig::new(DatasetRole::Segments),
            DatasetConfig::new(DatasetRole::SelectedPoint),
            DatasetConfig::new(DatasetRole::CurrentPoint),
            DatasetConfig::new(DatasetRole::Bar {
                column_index: 1,
                column_count: 6,
            }),
            DatasetConfig::new(DatasetRole::Bar {
                column_index: 4,
                column_count: 6,
            }),
        ]
    }
}
