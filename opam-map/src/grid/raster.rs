//! Traversability raster storage.
//!
//! Row-major label grid. Pixel `(row, col)` lives at index
//! `row * width + col`, matching image memory order.

use crate::core::{CellLabel, PixelCoord};
use crate::error::{OpamError, Result};
use crate::grid::transform::PIXEL_LIMIT;

/// Immutable W×H raster of obstacle / free labels.
#[derive(Clone, Debug)]
pub struct TraversabilityMap {
    /// Raw label values, row-major
    labels: Vec<u8>,
    /// Width in pixels (columns)
    width: usize,
    /// Height in pixels (rows)
    height: usize,
    /// Raw value marking obstacle cells
    obstacle_label: u8,
}

impl TraversabilityMap {
    /// Create a raster from row-major labels.
    ///
    /// The raster may hold at most two distinct values, and when it holds
    /// two, one of them must be `obstacle_label`. Each side is at most
    /// [`PIXEL_LIMIT`] pixels.
    pub fn new(width: usize, height: usize, labels: Vec<u8>, obstacle_label: u8) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(OpamError::InvalidRaster(format!(
                "empty raster ({}x{})",
                width, height
            )));
        }
        if width > PIXEL_LIMIT as usize || height > PIXEL_LIMIT as usize {
            return Err(OpamError::InvalidRaster(format!(
                "raster {}x{} exceeds {} pixels per side",
                width, height, PIXEL_LIMIT
            )));
        }
        if labels.len() != width * height {
            return Err(OpamError::InvalidRaster(format!(
                "{} labels for a {}x{} raster",
                labels.len(),
                width,
                height
            )));
        }

        let mut seen = [false; 256];
        for &value in &labels {
            seen[value as usize] = true;
        }
        let distinct: Vec<u8> = (0..=255u8).filter(|&v| seen[v as usize]).collect();
        if distinct.len() > 2 {
            return Err(OpamError::InvalidRaster(format!(
                "expected two labels, found {} ({:?}...)",
                distinct.len(),
                &distinct[..3]
            )));
        }
        if distinct.len() == 2 && !distinct.contains(&obstacle_label) {
            return Err(OpamError::InvalidRaster(format!(
                "obstacle label {} not among raster labels {:?}",
                obstacle_label, distinct
            )));
        }

        Ok(Self {
            labels,
            width,
            height,
            obstacle_label,
        })
    }

    /// Create an all-free raster (free label = `obstacle_label + 1`, wrapping).
    pub fn free(width: usize, height: usize, obstacle_label: u8) -> Result<Self> {
        let free = obstacle_label.wrapping_add(1);
        Self::new(width, height, vec![free; width * height], obstacle_label)
    }

    /// Parse an ASCII picture: `#` is obstacle, anything else is free.
    ///
    /// Handy for tests and small hand-made maps. Uses labels 0 (obstacle)
    /// and 1 (free).
    pub fn from_ascii(rows: &[&str]) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.chars().count());
        let mut labels = Vec::with_capacity(width * height);
        for (i, row) in rows.iter().enumerate() {
            if row.chars().count() != width {
                return Err(OpamError::InvalidRaster(format!(
                    "row {} has {} columns, expected {}",
                    i,
                    row.chars().count(),
                    width
                )));
            }
            labels.extend(row.chars().map(|c| if c == '#' { 0 } else { 1 }));
        }
        Self::new(width, height, labels, 0)
    }

    /// Width in pixels
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Total number of pixels
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.width * self.height
    }

    /// Raw obstacle value
    #[inline]
    pub fn obstacle_label(&self) -> u8 {
        self.obstacle_label
    }

    /// Raw label array, row-major
    #[inline]
    pub fn labels(&self) -> &[u8] {
        &self.labels
    }

    /// Check if a pixel lies inside the raster
    #[inline]
    pub fn is_valid_coord(&self, coord: PixelCoord) -> bool {
        coord.row >= 0
            && coord.col >= 0
            && (coord.row as usize) < self.height
            && (coord.col as usize) < self.width
    }

    /// Convert a pixel to a flat index
    #[inline]
    pub fn coord_to_index(&self, coord: PixelCoord) -> Option<usize> {
        if self.is_valid_coord(coord) {
            Some(coord.row as usize * self.width + coord.col as usize)
        } else {
            None
        }
    }

    /// Label at a pixel; `None` outside the raster.
    #[inline]
    pub fn get(&self, coord: PixelCoord) -> Option<CellLabel> {
        self.coord_to_index(coord)
            .map(|i| CellLabel::classify(self.labels[i], self.obstacle_label))
    }

    /// Is this pixel blocked? Pixels outside the raster count as obstacles.
    #[inline]
    pub fn is_obstacle(&self, coord: PixelCoord) -> bool {
        !self.get(coord).is_some_and(CellLabel::is_traversable)
    }

    /// Number of obstacle pixels
    pub fn obstacle_count(&self) -> usize {
        self.labels
            .iter()
            .filter(|&&v| v == self.obstacle_label)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raster_creation() {
        let map = TraversabilityMap::free(20, 10, 0).unwrap();
        assert_eq!(map.width(), 20);
        assert_eq!(map.height(), 10);
        assert_eq!(map.cell_count(), 200);
        assert_eq!(map.obstacle_count(), 0);
    }

    #[test]
    fn test_oversized_raster_rejected() {
        let side = PIXEL_LIMIT as usize + 1;
        assert!(matches!(
            TraversabilityMap::new(side, 1, Vec::new(), 0),
            Err(OpamError::InvalidRaster(_))
        ));
    }

    #[test]
    fn test_row_major_indexing() {
        let map = TraversabilityMap::free(20, 10, 0).unwrap();
        assert_eq!(map.coord_to_index(PixelCoord::new(2, 3)), Some(43));
        assert_eq!(map.coord_to_index(PixelCoord::new(10, 0)), None);
        assert_eq!(map.coord_to_index(PixelCoord::new(0, -1)), None);
    }

    #[test]
    fn test_ascii_map() {
        let map = TraversabilityMap::from_ascii(&["....", ".#..", "...."]).unwrap();
        assert_eq!(map.get(PixelCoord::new(1, 1)), Some(CellLabel::Obstacle));
        assert_eq!(map.get(PixelCoord::new(0, 0)), Some(CellLabel::Free));
        assert_eq!(map.obstacle_count(), 1);
    }

    #[test]
    fn test_out_of_bounds_is_obstacle() {
        let map = TraversabilityMap::free(5, 5, 0).unwrap();
        assert!(map.is_obstacle(PixelCoord::new(-1, 2)));
        assert!(map.is_obstacle(PixelCoord::new(2, 5)));
        assert!(!map.is_obstacle(PixelCoord::new(2, 2)));
    }

    #[test]
    fn test_rejects_three_labels() {
        let result = TraversabilityMap::new(3, 1, vec![0, 1, 2], 0);
        assert!(matches!(result, Err(OpamError::InvalidRaster(_))));
    }

    #[test]
    fn test_rejects_missing_obstacle_label() {
        let result = TraversabilityMap::new(2, 1, vec![1, 255], 0);
        assert!(matches!(result, Err(OpamError::InvalidRaster(_))));
    }

    #[test]
    fn test_rejects_size_mismatch() {
        assert!(TraversabilityMap::new(3, 3, vec![0; 8], 0).is_err());
        assert!(TraversabilityMap::new(0, 3, vec![], 0).is_err());
    }

    #[test]
    fn test_accepts_0_255_labels() {
        let map = TraversabilityMap::new(2, 1, vec![0, 255], 0).unwrap();
        assert!(map.is_obstacle(PixelCoord::new(0, 0)));
        assert!(!map.is_obstacle(PixelCoord::new(0, 1)));
    }
}
