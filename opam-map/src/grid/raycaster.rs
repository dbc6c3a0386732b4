//! Bresenham rasterization of pixel paths.
//!
//! Each segment between consecutive waypoints is expanded into every pixel
//! it crosses, endpoints included:
//!
//! ```text
//! From (0,0) to (3,7):          (row, col)
//!
//!     3 │        ●
//!     2 │     ●●
//!     1 │  ●●
//!     0 ●●
//!       └──────────
//!        0 1 2 3 4 5 6 7
//! ```
//!
//! Segments are concatenated in temporal order, so the pixel shared by two
//! consecutive segments appears twice.

use crate::core::PixelCoord;

/// Bresenham's line algorithm iterator.
///
/// Yields every pixel from `start` to `end` inclusive. Works for all
/// octants; the major axis is chosen from the segment slope. State is kept
/// in i64 so any pair of `PixelCoord` endpoints is accepted.
pub struct BresenhamLine {
    x: i64,
    y: i64,
    dx: i64,
    dy: i64,
    x_inc: i64,
    y_inc: i64,
    error: i64,
    steep: bool,
    end_x: i64,
    end_y: i64,
    done: bool,
}

impl BresenhamLine {
    /// Create a new Bresenham line iterator from start to end pixels.
    pub fn new(start: PixelCoord, end: PixelCoord) -> Self {
        let (start_row, start_col) = (start.row as i64, start.col as i64);
        let (end_row, end_col) = (end.row as i64, end.col as i64);
        let dx = (end_col - start_col).abs();
        let dy = (end_row - start_row).abs();
        let steep = dy > dx;

        // Iterate along the major axis (x) and step the minor axis (y).
        let (x, y, end_x, end_y, dx, dy) = if steep {
            (start_row, start_col, end_row, end_col, dy, dx)
        } else {
            (start_col, start_row, end_col, end_row, dx, dy)
        };

        let x_inc = if end_x > x { 1 } else { -1 };
        let y_inc = if end_y > y { 1 } else { -1 };

        Self {
            x,
            y,
            dx,
            dy,
            x_inc,
            y_inc,
            error: dx / 2,
            steep,
            end_x,
            end_y,
            done: false,
        }
    }
}

impl Iterator for BresenhamLine {
    type Item = PixelCoord;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        // Both axes stay between the i32 endpoints
        let (x, y) = (self.x as i32, self.y as i32);
        let result = if self.steep {
            PixelCoord::new(x, y)
        } else {
            PixelCoord::new(y, x)
        };

        if self.x == self.end_x && self.y == self.end_y {
            self.done = true;
            return Some(result);
        }

        self.error -= self.dy;
        if self.error < 0 {
            self.y += self.y_inc;
            self.error += self.dx;
        }
        self.x += self.x_inc;

        Some(result)
    }
}

/// Collect all pixels along one segment (endpoints included).
pub fn cells_along_segment(start: PixelCoord, end: PixelCoord) -> Vec<PixelCoord> {
    BresenhamLine::new(start, end).collect()
}

/// Lazily walk a pixel path segment by segment.
///
/// Same order as [`rasterize_path`], without materializing the pixels, so a
/// caller can stop at the first pixel of interest.
pub fn path_cells(waypoints: &[PixelCoord]) -> impl Iterator<Item = PixelCoord> + '_ {
    waypoints
        .windows(2)
        .flat_map(|segment| BresenhamLine::new(segment[0], segment[1]))
}

/// Rasterize a pixel path segment by segment.
///
/// Paths with fewer than two waypoints yield nothing.
pub fn rasterize_path(waypoints: &[PixelCoord]) -> Vec<PixelCoord> {
    path_cells(waypoints).collect()
}
