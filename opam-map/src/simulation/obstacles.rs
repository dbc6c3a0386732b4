//! Obstacle outlines for simulators.
//!
//! Each horizontal run of obstacle pixels in a raster row becomes one
//! axis-aligned rectangle in world coordinates:
//!
//! ```text
//! row r:   . . # # # # . .        run c0..=c1
//!
//!   (x0, y1) ┌─────────┐ (x1, y1)
//!            │         │          x0 = col c0 left edge, x1 = col c1 right edge
//!   (x0, y0) └─────────┘ (x1, y0)  y0/y1 = row r top/bottom edge
//! ```

use crate::core::{PixelCoord, WorldPoint};
use crate::grid::{PixelTransform, TraversabilityMap};

/// Closed polygon, vertices counter-clockwise in world meters.
#[derive(Clone, Debug, PartialEq)]
pub struct ObstacleOutline {
    /// Polygon vertices (not repeated at the end)
    pub vertices: Vec<WorldPoint>,
}

impl ObstacleOutline {
    /// Axis-aligned rectangle from two corners.
    pub fn rectangle(min: WorldPoint, max: WorldPoint) -> Self {
        Self {
            vertices: vec![
                WorldPoint::new(min.x, min.y),
                WorldPoint::new(max.x, min.y),
                WorldPoint::new(max.x, max.y),
                WorldPoint::new(min.x, max.y),
            ],
        }
    }

    /// Shoelace signed area; positive for counter-clockwise outlines.
    pub fn signed_area(&self) -> f64 {
        let n = self.vertices.len();
        let twice: f64 = (0..n)
            .map(|i| {
                let a = self.vertices[i];
                let b = self.vertices[(i + 1) % n];
                a.x * b.y - b.x * a.y
            })
            .sum();
        twice / 2.0
    }
}

/// Merge obstacle pixels row by row into world-space rectangles.
pub fn obstacle_outlines(
    raster: &TraversabilityMap,
    transform: &PixelTransform,
) -> Vec<ObstacleOutline> {
    let half = 0.5 / transform.pix_per_meter();
    let mut outlines = Vec::new();

    for row in 0..raster.height() as i32 {
        let mut col = 0;
        while col < raster.width() as i32 {
            if !raster.is_obstacle(PixelCoord::new(row, col)) {
                col += 1;
                continue;
            }
            let start = col;
            while col < raster.width() as i32 && raster.is_obstacle(PixelCoord::new(row, col)) {
                col += 1;
            }
            let first = transform.pixel_to_world(PixelCoord::new(row, start));
            let last = transform.pixel_to_world(PixelCoord::new(row, col - 1));
            outlines.push(ObstacleOutline::rectangle(
                WorldPoint::new(first.x - half, first.y - half),
                WorldPoint::new(last.x + half, last.y + half),
            ));
        }
    }
    outlines
}
