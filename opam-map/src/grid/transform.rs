//! World ↔ pixel coordinate transform.
//!
//! The world origin is the geometric centre of the raster:
//!
//! ```text
//! offset_x = width / 2      offset_y = height / 2     (integer division)
//! col = offset_x + round(x * pix_per_meter)
//! row = offset_y + round(y * pix_per_meter)
//! ```
//!
//! `round` is round-half-to-even. Pixels outside the raster are handled by
//! the consumers; only coordinates beyond [`PIXEL_LIMIT`] are saturated, so
//! far-away and infinite waypoints stay off-raster without overflowing.

use crate::core::{PixelCoord, WorldPoint};

/// Largest pixel magnitude a transformed coordinate can take.
///
/// Rasters are bounded by the same value, so a saturated coordinate is
/// always off-raster and differences of two coordinates fit in an `i32`.
pub const PIXEL_LIMIT: i32 = 1 << 29;

/// Transform between world meters and raster pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PixelTransform {
    /// Pixels per meter
    pix_per_meter: f64,
    /// Column of the world origin
    offset_x: i32,
    /// Row of the world origin
    offset_y: i32,
}

impl PixelTransform {
    /// Create a transform for a `width × height` raster.
    pub fn new(width: usize, height: usize, pix_per_meter: f64) -> Self {
        Self {
            pix_per_meter,
            offset_x: (width / 2) as i32,
            offset_y: (height / 2) as i32,
        }
    }

    /// Pixels per meter
    #[inline]
    pub fn pix_per_meter(&self) -> f64 {
        self.pix_per_meter
    }

    /// Map one waypoint; `None` for a missing sample.
    #[inline]
    pub fn world_to_pixel(&self, point: WorldPoint) -> Option<PixelCoord> {
        if point.is_missing() {
            return None;
        }
        let col = saturate(self.offset_x, point.x * self.pix_per_meter);
        let row = saturate(self.offset_y, point.y * self.pix_per_meter);
        Some(PixelCoord::new(row, col))
    }

    /// World position of a pixel centre.
    #[inline]
    pub fn pixel_to_world(&self, coord: PixelCoord) -> WorldPoint {
        WorldPoint::new(
            (coord.col as f64 - self.offset_x as f64) / self.pix_per_meter,
            (coord.row as f64 - self.offset_y as f64) / self.pix_per_meter,
        )
    }

    /// Map a whole path, dropping missing samples.
    ///
    /// The result may be shorter than the input.
    pub fn path_to_pixels(&self, path: &[WorldPoint]) -> Vec<PixelCoord> {
        path.iter()
            .filter_map(|&p| self.world_to_pixel(p))
            .collect()
    }
}

/// `offset + round(scaled)` clamped to `±PIXEL_LIMIT`, computed in f64.
#[inline]
fn saturate(offset: i32, scaled: f64) -> i32 {
    let limit = PIXEL_LIMIT as f64;
    (offset as f64 + scaled.round_ties_even()).clamp(-limit, limit) as i32
}
