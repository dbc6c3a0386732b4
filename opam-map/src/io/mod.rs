//! File input and output.
//!
//! - [`map_loader`]: Traversability rasters from image files
//! - [`episodes`]: Episode JSON documents
//! - [`export`]: PNG renderings and `.opamv` raw counts

pub mod episodes;
pub mod export;
pub mod map_loader;

pub use episodes::{load_episodes, parse_episodes, save_episodes};
pub use export::{load_counts, render_map, render_visitation, save_counts, save_png};
pub use map_loader::load_raster;
