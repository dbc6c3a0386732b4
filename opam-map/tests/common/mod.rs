//! Shared helpers for opam-map integration tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use image::{GrayImage, Luma};
use opam_map::core::{Episode, WorldPoint};
use opam_map::{Environment, EnvironmentSettings, TraversabilityMap};

/// All-free environment with default settings (10 px/m, 1.5 m radius).
pub fn free_environment(width: usize, height: usize) -> Environment {
    let raster = TraversabilityMap::free(width, height, 0).unwrap();
    Environment::new("free", raster, EnvironmentSettings::default()).unwrap()
}

/// Environment from an ASCII picture (`#` = obstacle).
pub fn ascii_environment(rows: &[&str]) -> Environment {
    let raster = TraversabilityMap::from_ascii(rows).unwrap();
    Environment::new("ascii", raster, EnvironmentSettings::default()).unwrap()
}

/// Evenly spaced samples from `from` to `to`, both included.
pub fn straight_path(from: (f64, f64), to: (f64, f64), samples: usize) -> Vec<WorldPoint> {
    (0..samples)
        .map(|i| {
            let t = if samples > 1 {
                i as f64 / (samples - 1) as f64
            } else {
                0.0
            };
            WorldPoint::new(from.0 + t * (to.0 - from.0), from.1 + t * (to.1 - from.1))
        })
        .collect()
}

/// A few crossing multi-agent episodes inside a 40×40 raster at 10 px/m.
pub fn crossing_episodes(count: usize) -> Vec<Episode> {
    (0..count)
        .map(|i| {
            let offset = -1.0 + 0.25 * (i % 9) as f64;
            Episode::new(vec![
                straight_path((-1.2, offset), (1.2, -offset), 6),
                straight_path((offset, -1.2), (-offset, 1.2), 6),
                straight_path((-1.0, -1.0), (1.0, 1.0), 6),
            ])
        })
        .collect()
}

/// Write an ASCII picture as a 0/255 grayscale image (`#` = 0).
pub fn write_map_image(dir: &Path, file_name: &str, rows: &[&str]) -> PathBuf {
    let height = rows.len() as u32;
    let width = rows[0].chars().count() as u32;
    let mut img = GrayImage::new(width, height);
    for (y, row) in rows.iter().enumerate() {
        for (x, c) in row.chars().enumerate() {
            let value = if c == '#' { 0 } else { 255 };
            img.put_pixel(x as u32, y as u32, Luma([value]));
        }
    }
    let path = dir.join(file_name);
    img.save(&path).unwrap();
    path
}

/// Write a file verbatim.
pub fn write_file(dir: &Path, file_name: &str, contents: &str) -> PathBuf {
    let path = dir.join(file_name);
    std::fs::write(&path, contents).unwrap();
    path
}

/// Free 40×40 picture with a wall segment on row 5.
pub fn room_rows() -> Vec<String> {
    (0..40)
        .map(|row| {
            (0..40)
                .map(|col| if row == 5 && (10..30).contains(&col) { '#' } else { '.' })
                .collect()
        })
        .collect()
}
