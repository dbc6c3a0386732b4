//! Traversability map loader.
//!
//! Any grayscale (or convertible) image the `image` crate can decode is
//! accepted. Pixels equal to the obstacle label are blocked; the raster may
//! carry one other value for free space.

use std::path::Path;

use image::GrayImage;
use log::info;

use crate::error::{OpamError, Result};
use crate::grid::TraversabilityMap;

/// Load an image file as a traversability raster.
pub fn load_raster<P: AsRef<Path>>(path: P, obstacle_label: u8) -> Result<TraversabilityMap> {
    let path = path.as_ref();
    let img = image::open(path)
        .map_err(|source| OpamError::Image {
            path: path.to_path_buf(),
            source,
        })?
        .into_luma8();

    let raster = raster_from_image(&img, obstacle_label).map_err(|e| match e {
        OpamError::InvalidRaster(msg) => {
            OpamError::InvalidRaster(format!("{}: {}", path.display(), msg))
        }
        other => other,
    })?;
    info!(
        "Loaded map {} ({}x{}, {} obstacle pixels)",
        path.display(),
        raster.width(),
        raster.height(),
        raster.obstacle_count()
    );
    Ok(raster)
}

/// Build a raster from an 8-bit grayscale image.
pub fn raster_from_image(img: &GrayImage, obstacle_label: u8) -> Result<TraversabilityMap> {
    let (width, height) = img.dimensions();
    TraversabilityMap::new(
        width as usize,
        height as usize,
        img.as_raw().clone(),
        obstacle_label,
    )
}
