//! Point and coordinate types for trajectories and rasters.

use serde::{Deserialize, Serialize};

/// Pixel coordinates (integer raster indices).
///
/// Rows grow downwards in image order, columns grow to the right.
/// Coordinates may be negative or exceed the raster; bounds are checked
/// by the consumer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct PixelCoord {
    /// Row index (image y)
    pub row: i32,
    /// Column index (image x)
    pub col: i32,
}

impl PixelCoord {
    /// Create a new pixel coordinate
    #[inline]
    pub fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }
}

/// World coordinates (meters, f64).
///
/// The world origin sits at the geometric centre of the raster. A sample
/// with a NaN component marks a missing waypoint.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct WorldPoint {
    /// X coordinate in meters (image columns)
    pub x: f64,
    /// Y coordinate in meters (image rows)
    pub y: f64,
}

impl WorldPoint {
    /// Create a new world point
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Zero point (origin)
    pub const ZERO: WorldPoint = WorldPoint { x: 0.0, y: 0.0 };

    /// Missing-sample sentinel
    pub const MISSING: WorldPoint = WorldPoint {
        x: f64::NAN,
        y: f64::NAN,
    };

    /// True if either coordinate is NaN.
    #[inline]
    pub fn is_missing(&self) -> bool {
        self.x.is_nan() || self.y.is_nan()
    }
}
