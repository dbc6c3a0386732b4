//! Visitation export: PNG renderings and the `.opamv` binary counts format.
//!
//! `.opamv` layout:
//! - Header (16 bytes):
//!   - Magic: "OPAMV" (5 bytes)
//!   - Version: u8 (1 byte)
//!   - Reserved: 2 bytes
//!   - Width: u32 (4 bytes, little-endian)
//!   - Height: u32 (4 bytes, little-endian)
//! - Counts: width * height u32 values (little-endian, row-major)

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use image::{GrayImage, Luma};

use crate::error::{OpamError, Result};
use crate::grid::{TraversabilityMap, VisitationGrid};

/// Magic bytes for .opamv format
const MAGIC: &[u8; 5] = b"OPAMV";

/// Current format version
const VERSION: u8 = 1;

/// Header size in bytes
const HEADER_SIZE: usize = 16;

/// Raster labels scaled so the largest label becomes 255.
pub fn render_map(raster: &TraversabilityMap) -> GrayImage {
    let max = raster.labels().iter().copied().max().unwrap_or(0);
    let pixels = raster
        .labels()
        .iter()
        .map(|&v| {
            if max == 0 {
                0
            } else {
                (v as u32 * 255 / max as u32) as u8
            }
        })
        .collect();
    gray_image(raster.width(), raster.height(), pixels)
}

/// Map rendering with visited pixels replaced by `count / max * 255`.
///
/// Unvisited pixels keep the map shade.
pub fn render_visitation(raster: &TraversabilityMap, counts: &VisitationGrid) -> GrayImage {
    let mut img = render_map(raster);
    let width = counts.width();
    for (i, &level) in counts.normalized().iter().enumerate() {
        if level > 0.0 {
            let shade = (level * 255.0) as u8;
            img.put_pixel((i % width) as u32, (i / width) as u32, Luma([shade]));
        }
    }
    img
}

fn gray_image(width: usize, height: usize, pixels: Vec<u8>) -> GrayImage {
    // Buffer length always equals width * height here
    GrayImage::from_vec(width as u32, height as u32, pixels)
        .unwrap_or_else(|| GrayImage::new(width as u32, height as u32))
}

/// Save a grayscale image; the format follows the file extension.
pub fn save_png<P: AsRef<Path>>(img: &GrayImage, path: P) -> Result<()> {
    let path = path.as_ref();
    img.save(path).map_err(|source| OpamError::Image {
        path: path.to_path_buf(),
        source,
    })
}

/// Save counts to .opamv binary format
pub fn save_counts<P: AsRef<Path>>(counts: &VisitationGrid, path: P) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_counts(counts, &mut writer)?;
    writer.flush()?;
    Ok(())
}

/// Write counts to a writer in .opamv format
pub fn write_counts<W: Write>(counts: &VisitationGrid, writer: &mut W) -> Result<()> {
    let mut header = [0u8; HEADER_SIZE];
    header[0..5].copy_from_slice(MAGIC);
    header[5] = VERSION;
    // Bytes 6..8 reserved
    header[8..12].copy_from_slice(&(counts.width() as u32).to_le_bytes());
    header[12..16].copy_from_slice(&(counts.height() as u32).to_le_bytes());
    writer.write_all(&header)?;

    let mut data = Vec::with_capacity(counts.counts().len() * 4);
    for &c in counts.counts() {
        data.extend_from_slice(&c.to_le_bytes());
    }
    writer.write_all(&data)?;
    Ok(())
}

/// Load counts from .opamv binary format
pub fn load_counts<P: AsRef<Path>>(path: P) -> Result<VisitationGrid> {
    let mut reader = BufReader::new(File::open(path)?);
    read_counts(&mut reader)
}

/// Read counts from a reader in .opamv format
pub fn read_counts<R: Read>(reader: &mut R) -> Result<VisitationGrid> {
    let mut header = [0u8; HEADER_SIZE];
    reader.read_exact(&mut header)?;

    if &header[0..5] != MAGIC {
        return Err(OpamError::InvalidFormat("Invalid magic bytes".to_string()));
    }
    let version = header[5];
    if version != VERSION {
        return Err(OpamError::InvalidFormat(format!(
            "Version mismatch: expected {}, found {}",
            VERSION, version
        )));
    }

    let width = u32::from_le_bytes([header[8], header[9], header[10], header[11]]) as usize;
    let height = u32::from_le_bytes([header[12], header[13], header[14], header[15]]) as usize;

    let mut data = vec![0u8; width * height * 4];
    reader.read_exact(&mut data)?;
    let values = data
        .chunks_exact(4)
        .map(|b| u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
        .collect();

    VisitationGrid::from_counts(width, height, values)
        .ok_or_else(|| OpamError::InvalidFormat("Count data does not match header".to_string()))
}
