//! Raster grids and the geometric kernels operating on them.
//!
//! - [`TraversabilityMap`]: Obstacle / free label raster
//! - [`PixelTransform`]: World meters → raster pixels
//! - [`raycaster`]: Bresenham rasterization of pixel paths
//! - [`FootprintMask`]: Binary disk kernel stamped along paths
//! - [`VisitationGrid`] and [`SweptArea`]: Count accumulation
//!
//! ## Pipeline
//!
//! ```text
//! Path (world) ─► PixelTransform ─► raycaster ─► obstacle check ─► FootprintMask stamps
//!                                                                        │
//!                                          VisitationGrid ◄── +1 ◄── SweptArea
//! ```

mod counts;
mod footprint;
mod raster;
pub mod raycaster;
mod transform;

pub use counts::{SweptArea, VisitationGrid};
pub use footprint::FootprintMask;
pub use raster::TraversabilityMap;
pub use transform::{PIXEL_LIMIT, PixelTransform};
