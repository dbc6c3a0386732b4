//! Cell labels for traversability rasters.
//!
//! A traversability raster carries exactly two semantic classes. The raw
//! label values are arbitrary (`0`/`1`, `0`/`255`, ...); only the obstacle
//! value is configured, every other value is free space.

use serde::{Deserialize, Serialize};

/// Semantic class of a raster cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellLabel {
    /// Traversable cell
    #[default]
    Free,

    /// Blocked cell (walls, furniture, out-of-map)
    Obstacle,
}

impl CellLabel {
    /// Classify a raw raster value.
    #[inline]
    pub fn classify(value: u8, obstacle_label: u8) -> Self {
        if value == obstacle_label {
            CellLabel::Obstacle
        } else {
            CellLabel::Free
        }
    }

    /// Can an agent stand on this cell?
    #[inline]
    pub fn is_traversable(self) -> bool {
        matches!(self, CellLabel::Free)
    }
}
