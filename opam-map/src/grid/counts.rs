//! Visitation counts and per-path swept-area scratch.
//!
//! ```text
//! stamps (weighted, may overlap) ──► SweptArea ──► value > 0 ──► +1 ──► VisitationGrid
//! ```
//!
//! A path contributes at most one increment per pixel, however many of its
//! stamps overlap there.

use crate::core::PixelCoord;

/// Cumulative per-pixel visitation counts, row-major.
///
/// Counts only grow; a fresh grid is the only way back to zero.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VisitationGrid {
    counts: Vec<u32>,
    width: usize,
    height: usize,
}

impl VisitationGrid {
    /// Create a zeroed grid
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            counts: vec![0; width * height],
            width,
            height,
        }
    }

    /// Rebuild a grid from stored counts; `None` on size mismatch.
    pub fn from_counts(width: usize, height: usize, counts: Vec<u32>) -> Option<Self> {
        (counts.len() == width * height).then_some(Self {
            counts,
            width,
            height,
        })
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

    /// Raw counts, row-major
    #[inline]
    pub fn counts(&self) -> &[u32] {
        &self.counts
    }

    /// Count at a pixel; `None` outside the grid.
    #[inline]
    pub fn get(&self, coord: PixelCoord) -> Option<u32> {
        if coord.row < 0 || coord.col < 0 {
            return None;
        }
        let (row, col) = (coord.row as usize, coord.col as usize);
        if row >= self.height || col >= self.width {
            return None;
        }
        Some(self.counts[row * self.width + col])
    }

    /// Highest count (0 for an untouched grid)
    pub fn max(&self) -> u32 {
        self.counts.iter().copied().max().unwrap_or(0)
    }

    /// Sum of all counts
    pub fn total(&self) -> u64 {
        self.counts.iter().map(|&c| c as u64).sum()
    }

    /// Number of pixels visited at least once
    pub fn visited_cells(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }

    /// Counts scaled to [0, 1] by the maximum; all zeros for an empty grid.
    pub fn normalized(&self) -> Vec<f32> {
        let max = self.max();
        if max == 0 {
            return vec![0.0; self.counts.len()];
        }
        self.counts
            .iter()
            .map(|&c| c as f32 / max as f32)
            .collect()
    }

    /// Add one visit to each listed flat index.
    pub(crate) fn increment_indices(&mut self, indices: &[usize]) {
        for &i in indices {
            self.counts[i] = self.counts[i].saturating_add(1);
        }
    }
}

/// Scratch grid for one path's footprint stamps.
///
/// Stamps are summed into `weights`; the indices that became non-zero are
/// tracked so collapsing and clearing never scan the full raster.
#[derive(Clone, Debug)]
pub struct SweptArea {
    weights: Vec<u32>,
    touched: Vec<usize>,
    width: usize,
    height: usize,
}

impl SweptArea {
    /// Create an empty scratch grid
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            weights: vec![0; width * height],
            touched: Vec::new(),
            width,
            height,
        }
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

    /// Add `weight` at a flat index
    #[inline]
    pub fn add(&mut self, index: usize, weight: u8) {
        if weight == 0 {
            return;
        }
        let cell = &mut self.weights[index];
        if *cell == 0 {
            self.touched.push(index);
        }
        *cell = cell.saturating_add(weight as u32);
    }

    /// Summed stamp weight at a flat index
    #[inline]
    pub fn weight(&self, index: usize) -> u32 {
        self.weights[index]
    }

    /// Flat indices with non-zero weight (the binary indicator), in first-touch order.
    #[inline]
    pub fn touched(&self) -> &[usize] {
        &self.touched
    }

    /// Is the scratch grid empty?
    pub fn is_empty(&self) -> bool {
        self.touched.is_empty()
    }

    /// Reset to zero for the next path.
    pub fn clear(&mut self) {
        for &i in &self.touched {
            self.weights[i] = 0;
        }
        self.touched.clear();
    }
}
