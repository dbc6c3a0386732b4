//! Agent footprint mask.
//!
//! The agent silhouette is a disk approximated on the pixel grid:
//!
//! ```text
//! radius_px = radius_m * (pix_per_meter / reference_scale)
//! max_r     = ceil(radius_px)
//! min_r     = round(radius_px)          (round half to even)
//! diameter  = max_r + min_r
//! ```
//!
//! The kernel is a `diameter × diameter` Gaussian with full width at half
//! maximum equal to `diameter`, rounded to {0, 1}. Pixels closer than
//! `diameter / 2` to the kernel centre become 1.
//!
//! A stamp centred on pixel `(r, c)` covers rows `r - max_r .. r + min_r`
//! and columns `c - max_r .. c + min_r`. When `radius_px` is fractional the
//! window reaches one pixel further up/left than down/right.

use crate::core::PixelCoord;

/// Binary footprint kernel, built once per environment.
#[derive(Clone, Debug, PartialEq)]
pub struct FootprintMask {
    /// Kernel extent towards lower row/col indices
    max_r: i32,
    /// Kernel extent towards higher row/col indices
    min_r: i32,
    /// Kernel side length
    diameter: usize,
    /// Row-major inclusion weights (0 or 1)
    weights: Vec<u8>,
}

impl FootprintMask {
    /// Build the mask for an agent radius in meters.
    pub fn new(radius_m: f64, pix_per_meter: f64, reference_scale: f64) -> Self {
        let radius_px = radius_m * (pix_per_meter / reference_scale);
        let max_r = radius_px.ceil() as i32;
        let min_r = radius_px.round_ties_even() as i32;
        let diameter = (max_r + min_r).max(0) as usize;

        Self {
            max_r,
            min_r,
            diameter,
            weights: gaussian_disk(diameter),
        }
    }

    /// `ceil(radius_px)`
    #[inline]
    pub fn max_r(&self) -> i32 {
        self.max_r
    }

    /// `round(radius_px)`
    #[inline]
    pub fn min_r(&self) -> i32 {
        self.min_r
    }

    /// Kernel side length in pixels
    #[inline]
    pub fn diameter(&self) -> usize {
        self.diameter
    }

    /// Row-major weights
    #[inline]
    pub fn weights(&self) -> &[u8] {
        &self.weights
    }

    /// Weight at kernel cell `(i, j)`
    #[inline]
    pub fn weight(&self, i: usize, j: usize) -> u8 {
        self.weights[i * self.diameter + j]
    }

    /// Number of pixels covered by one stamp
    pub fn area(&self) -> usize {
        self.weights.iter().filter(|&&w| w > 0).count()
    }

    /// Top-left pixel of the stamp window centred at `centre`.
    #[inline]
    pub fn window_origin(&self, centre: PixelCoord) -> PixelCoord {
        PixelCoord::new(
            centre.row.saturating_sub(self.max_r),
            centre.col.saturating_sub(self.max_r),
        )
    }

    /// Does the stamp window at `centre` fit a `width × height` raster?
    pub fn fits(&self, centre: PixelCoord, width: usize, height: usize) -> bool {
        let origin = self.window_origin(centre);
        let d = self.diameter as i64;
        origin.row >= 0
            && origin.col >= 0
            && origin.row as i64 + d <= height as i64
            && origin.col as i64 + d <= width as i64
    }

    /// Pixels set by a stamp at `centre` with non-zero weight, unclipped.
    pub fn stamp_cells(&self, centre: PixelCoord) -> impl Iterator<Item = (PixelCoord, u8)> + '_ {
        let origin = self.window_origin(centre);
        let d = self.diameter;
        self.weights
            .iter()
            .enumerate()
            .filter(|(_, w)| **w > 0)
            .map(move |(k, &w)| {
                let cell = PixelCoord::new(
                    origin.row.saturating_add((k / d) as i32),
                    origin.col.saturating_add((k % d) as i32),
                );
                (cell, w)
            })
    }
}

/// Gaussian kernel with FWHM = `size`, rounded half-to-even to {0, 1}.
///
/// `exp(-4 ln2 d² / size²)` rounds to 1 exactly when `4 d² < size²`. The
/// comparison is done in integers so the half-maximum ring is exact.
fn gaussian_disk(size: usize) -> Vec<u8> {
    let centre = (size / 2) as i64;
    let fwhm_sq = (size * size) as i64;
    let mut weights = Vec::with_capacity(size * size);
    for i in 0..size as i64 {
        for j in 0..size as i64 {
            let dist_sq = (i - centre).pow(2) + (j - centre).pow(2);
            let inside = 4 * dist_sq < fwhm_sq;
            weights.push(u8::from(inside));
        }
    }
    weights
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::LN_2;

    fn gaussian_falloff(dist_sq: f64, size: usize) -> f64 {
        let fwhm_sq = (size * size) as f64;
        (-4.0 * LN_2 * dist_sq / fwhm_sq).exp()
    }

    #[test]
    fn test_radius_at_reference_scale() {
        let mask = FootprintMask::new(1.5, 10.0, 10.0);
        assert_eq!(mask.max_r(), 2);
        assert_eq!(mask.min_r(), 2);
        assert_eq!(mask.diameter(), 4);
        assert_eq!(mask.weights().len(), 16);
    }

    #[test]
    fn test_radius_at_high_resolution() {
        let mask = FootprintMask::new(1.5, 100.0, 10.0);
        assert_eq!(mask.max_r(), 15);
        assert_eq!(mask.min_r(), 15);
        assert_eq!(mask.diameter(), 30);
    }

    #[test]
    fn test_asymmetric_sizing() {
        // radius_px = 2.3 -> ceil 3, round 2
        let mask = FootprintMask::new(2.3, 10.0, 10.0);
        assert_eq!(mask.max_r(), 3);
        assert_eq!(mask.min_r(), 2);
        assert_eq!(mask.diameter(), 5);
    }

    #[test]
    fn test_half_to_even_min_radius() {
        // radius_px = 2.5 -> ceil 3, round 2
        let mask = FootprintMask::new(2.5, 10.0, 10.0);
        assert_eq!(mask.min_r(), 2);
        assert_eq!(mask.diameter(), 5);
    }

    #[test]
    fn test_diameter_four_kernel_shape() {
        let mask = FootprintMask::new(1.5, 10.0, 10.0);
        // Centre (2, 2); squared distances below 4 are inside
        #[rustfmt::skip]
        let expected: [u8; 16] = [
            0, 0, 0, 0,
            0, 1, 1, 1,
            0, 1, 1, 1,
            0, 1, 1, 1,
        ];
        assert_eq!(mask.weights(), &expected[..]);
        assert_eq!(mask.area(), 9);
    }

    #[test]
    fn test_weights_match_rounded_falloff() {
        let mask = FootprintMask::new(1.5, 100.0, 10.0);
        let d = mask.diameter();
        let c = (d / 2) as f64;
        for i in 0..d {
            for j in 0..d {
                let dist_sq = (i as f64 - c).powi(2) + (j as f64 - c).powi(2);
                let falloff = gaussian_falloff(dist_sq, d);
                // Skip the exact half-maximum ring, which is decided in integers
                if (falloff - 0.5).abs() > 1e-9 {
                    assert_eq!(mask.weight(i, j), falloff.round_ties_even() as u8);
                }
            }
        }
    }

    #[test]
    fn test_kernel_is_radially_symmetric() {
        let mask = FootprintMask::new(1.5, 100.0, 10.0);
        let d = mask.diameter();
        let c = d / 2;
        for i in 1..d {
            for j in 1..d {
                let mi = 2 * c - i;
                let mj = 2 * c - j;
                if mi < d && mj < d {
                    assert_eq!(mask.weight(i, j), mask.weight(mi, mj));
                    assert_eq!(mask.weight(i, j), mask.weight(j, i));
                }
            }
        }
        // Centre is always inside, corners are outside
        assert_eq!(mask.weight(c, c), 1);
        assert_eq!(mask.weight(0, 0), 0);
    }

    #[test]
    fn test_area_approximates_disk() {
        let mask = FootprintMask::new(1.5, 100.0, 10.0);
        let expected = std::f64::consts::PI * 15.0 * 15.0;
        let area = mask.area() as f64;
        assert!((area - expected).abs() / expected < 0.05, "area {}", area);
    }

    #[test]
    fn test_tiny_radius_keeps_centre_pixel() {
        // radius_px = 0.3 -> max_r 1, min_r 0, diameter 1
        let mask = FootprintMask::new(0.3, 10.0, 10.0);
        assert_eq!(mask.diameter(), 1);
        assert_eq!(mask.weights(), &[1u8]);
    }

    #[test]
    fn test_stamp_window() {
        let mask = FootprintMask::new(1.5, 10.0, 10.0);
        let centre = PixelCoord::new(10, 10);
        assert_eq!(mask.window_origin(centre), PixelCoord::new(8, 8));
        assert!(mask.fits(centre, 20, 20));
        assert!(!mask.fits(PixelCoord::new(1, 10), 20, 20));
        assert!(!mask.fits(PixelCoord::new(10, 19), 20, 20));
        assert!(mask.fits(PixelCoord::new(10, 18), 20, 20));

        let cells: Vec<_> = mask.stamp_cells(centre).map(|(c, _)| c).collect();
        assert_eq!(cells.len(), mask.area());
        assert!(cells.contains(&centre));
        assert!(cells.iter().all(|c| c.row >= 9 && c.row < 12));
    }
}
