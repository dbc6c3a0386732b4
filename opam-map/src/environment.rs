//! Environment: one traversability raster and its visitation counts.
//!
//! Accumulation for one episode:
//!
//! 1. Check that every agent path has the same number of samples.
//! 2. Per path: world → pixel, then a lazy Bresenham walk that stops at the
//!    first obstacle or off-raster pixel.
//! 3. Valid paths stamp the footprint mask at every rasterized pixel into a
//!    scratch [`SweptArea`]; its non-zero pixels are the path's contribution.
//! 4. Contributions are buffered and committed only once the whole episode
//!    went through, so a failed episode leaves the counts untouched.

use log::{debug, warn};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::ConfigError;
use crate::core::{Episode, PixelCoord, WorldPoint};
use crate::error::{EpisodeError, Result};
use crate::grid::raycaster::{path_cells, rasterize_path};
use crate::grid::{FootprintMask, PixelTransform, SweptArea, TraversabilityMap, VisitationGrid};

/// Reference resolution at which `agent_radius` is expressed one-to-one.
pub const DEFAULT_REFERENCE_SCALE: f64 = 10.0;

/// What to do when a footprint stamp reaches past the raster edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryPolicy {
    /// Drop the stamp pixels outside the raster, keep the rest
    #[default]
    Clamp,
    /// Fail the whole episode
    Reject,
}

/// Per-environment parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct EnvironmentSettings {
    /// Raster resolution (pixels per meter)
    pub pix_per_meter: f64,
    /// Agent radius in meters
    pub agent_radius: f64,
    /// Resolution at which `agent_radius` maps 1:1 to pixels
    pub reference_scale: f64,
    /// Raw raster value of obstacle cells
    pub obstacle_label: u8,
    /// Stamp handling at raster edges
    pub boundary: BoundaryPolicy,
}

impl Default for EnvironmentSettings {
    fn default() -> Self {
        Self {
            pix_per_meter: 10.0,
            agent_radius: 1.5,
            reference_scale: DEFAULT_REFERENCE_SCALE,
            obstacle_label: 0,
            boundary: BoundaryPolicy::Clamp,
        }
    }
}

impl EnvironmentSettings {
    /// Settings with a given resolution, other fields default.
    pub fn with_scale(pix_per_meter: f64) -> Self {
        Self {
            pix_per_meter,
            ..Self::default()
        }
    }

    /// Check that scale, radius and reference scale are positive and finite.
    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        for (field, value) in [
            ("pix_per_meter", self.pix_per_meter),
            ("agent_radius", self.agent_radius),
            ("reference_scale", self.reference_scale),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::NotPositive { field, value });
            }
        }
        Ok(())
    }
}

/// Fate of a single agent path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PathOutcome {
    /// Swept area added; number of distinct pixels covered
    Accepted {
        /// Pixels incremented by this path
        cells: usize,
    },
    /// Path crosses an obstacle (or leaves the raster) and is discarded
    Rejected {
        /// First offending rasterized pixel
        at: PixelCoord,
    },
    /// Fewer than two valid waypoints; nothing to rasterize
    Degenerate,
}

/// Statistics for one or more accumulated episodes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EpisodeSummary {
    /// Paths whose swept area was counted
    pub paths_accepted: usize,
    /// Paths discarded for crossing obstacles
    pub paths_rejected: usize,
    /// Paths with fewer than two valid waypoints
    pub paths_degenerate: usize,
    /// Pixel increments committed to the count grid
    pub cells_incremented: usize,
}

impl EpisodeSummary {
    /// Merge another summary into this one
    pub fn merge(&mut self, other: &EpisodeSummary) {
        self.paths_accepted += other.paths_accepted;
        self.paths_rejected += other.paths_rejected;
        self.paths_degenerate += other.paths_degenerate;
        self.cells_incremented += other.cells_incremented;
    }

    fn record(&mut self, outcome: PathOutcome) {
        match outcome {
            PathOutcome::Accepted { cells } => {
                self.paths_accepted += 1;
                self.cells_incremented += cells;
            }
            PathOutcome::Rejected { .. } => self.paths_rejected += 1,
            PathOutcome::Degenerate => self.paths_degenerate += 1,
        }
    }

    /// Total paths seen
    pub fn paths_total(&self) -> usize {
        self.paths_accepted + self.paths_rejected + self.paths_degenerate
    }
}

/// Result of accumulating a batch of episodes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AccumulationReport {
    /// Episodes committed to the count grid
    pub episodes_committed: usize,
    /// Episodes skipped, with their index in the batch
    pub skipped: Vec<(usize, EpisodeError)>,
    /// Path statistics over committed episodes
    pub summary: EpisodeSummary,
}

impl AccumulationReport {
    /// True if no episode was skipped
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Buffered contribution of one episode, not yet committed.
struct EpisodeContribution {
    summary: EpisodeSummary,
    increments: Vec<usize>,
}

/// One environment: raster, footprint, recorded episodes and counts.
#[derive(Clone, Debug)]
pub struct Environment {
    name: String,
    raster: TraversabilityMap,
    settings: EnvironmentSettings,
    transform: PixelTransform,
    mask: FootprintMask,
    episodes: Vec<Episode>,
    counts: VisitationGrid,
}

impl Environment {
    /// Create an environment; the footprint mask is built here, once.
    pub fn new(
        name: impl Into<String>,
        raster: TraversabilityMap,
        settings: EnvironmentSettings,
    ) -> Result<Self> {
        settings.validate()?;
        let transform =
            PixelTransform::new(raster.width(), raster.height(), settings.pix_per_meter);
        let mask = FootprintMask::new(
            settings.agent_radius,
            settings.pix_per_meter,
            settings.reference_scale,
        );
        let counts = VisitationGrid::new(raster.width(), raster.height());

        Ok(Self {
            name: name.into(),
            raster,
            settings,
            transform,
            mask,
            episodes: Vec::new(),
            counts,
        })
    }

    /// Environment name (map file stem)
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Traversability raster
    pub fn raster(&self) -> &TraversabilityMap {
        &self.raster
    }

    /// Settings used to build this environment
    pub fn settings(&self) -> &EnvironmentSettings {
        &self.settings
    }

    /// World ↔ pixel transform
    pub fn transform(&self) -> &PixelTransform {
        &self.transform
    }

    /// Footprint mask
    pub fn footprint(&self) -> &FootprintMask {
        &self.mask
    }

    /// Raster dimensions (width, height)
    pub fn dimensions(&self) -> (usize, usize) {
        (self.raster.width(), self.raster.height())
    }

    /// Visitation counts accumulated so far
    pub fn visitation_counts(&self) -> &VisitationGrid {
        &self.counts
    }

    /// Attached episodes
    pub fn episodes(&self) -> &[Episode] {
        &self.episodes
    }

    /// Replace the attached episodes
    pub fn set_episodes(&mut self, episodes: Vec<Episode>) {
        self.episodes = episodes;
    }

    /// Append episodes to the attached ones
    pub fn extend_episodes(&mut self, episodes: impl IntoIterator<Item = Episode>) {
        self.episodes.extend(episodes);
    }

    // =========================================================================
    // PATH GEOMETRY
    // =========================================================================

    /// World path → every pixel crossed, segment by segment.
    ///
    /// Missing samples are dropped before rasterizing, so the segment
    /// bridges the gap. Fewer than two valid samples gives an empty result.
    pub fn raytrace_path(&self, path: &[WorldPoint]) -> Vec<PixelCoord> {
        let coarse = self.transform.path_to_pixels(path);
        rasterize_path(&coarse)
    }

    /// First rasterized pixel on an obstacle or outside the raster.
    pub fn first_obstacle(&self, pixels: &[PixelCoord]) -> Option<PixelCoord> {
        pixels.iter().copied().find(|&p| self.raster.is_obstacle(p))
    }

    /// Does the rasterized path avoid every obstacle pixel?
    pub fn is_path_valid(&self, pixels: &[PixelCoord]) -> bool {
        self.first_obstacle(pixels).is_none()
    }

    /// First obstacle or off-raster pixel along a pixel-waypoint path.
    ///
    /// Segments are walked lazily, so a path heading far outside the raster
    /// stops at its first off-raster pixel.
    pub fn first_obstacle_on_path(&self, waypoints: &[PixelCoord]) -> Option<PixelCoord> {
        path_cells(waypoints).find(|&p| self.raster.is_obstacle(p))
    }

    /// Stamp the footprint at every given path pixel.
    ///
    /// Stamps add into `swept`. Edge handling follows the boundary policy.
    pub fn stamp_path(
        &self,
        pixels: impl IntoIterator<Item = PixelCoord>,
        swept: &mut SweptArea,
    ) -> std::result::Result<(), EpisodeError> {
        let (width, height) = self.dimensions();
        for centre in pixels {
            if self.mask.fits(centre, width, height) {
                // Whole window inside the raster
                for (cell, weight) in self.mask.stamp_cells(centre) {
                    swept.add(cell.row as usize * width + cell.col as usize, weight);
                }
                continue;
            }

            if self.settings.boundary == BoundaryPolicy::Reject
                && self
                    .mask
                    .stamp_cells(centre)
                    .any(|(cell, _)| !self.raster.is_valid_coord(cell))
            {
                return Err(EpisodeError::StampOutOfBounds {
                    row: centre.row,
                    col: centre.col,
                });
            }

            for (cell, weight) in self.mask.stamp_cells(centre) {
                if let Some(i) = self.raster.coord_to_index(cell) {
                    swept.add(i, weight);
                }
            }
        }
        Ok(())
    }

    /// Swept area of one world path, validity check included.
    ///
    /// `swept` is cleared first. Rejected and degenerate paths leave it empty.
    pub fn swept_area(
        &self,
        path: &[WorldPoint],
        swept: &mut SweptArea,
    ) -> std::result::Result<PathOutcome, EpisodeError> {
        swept.clear();
        let waypoints = self.transform.path_to_pixels(path);
        if waypoints.len() < 2 {
            return Ok(PathOutcome::Degenerate);
        }
        if let Some(at) = self.first_obstacle_on_path(&waypoints) {
            return Ok(PathOutcome::Rejected { at });
        }
        self.stamp_path(path_cells(&waypoints), swept)?;
        Ok(PathOutcome::Accepted {
            cells: swept.touched().len(),
        })
    }

    /// Scratch grid sized to this raster.
    pub fn scratch(&self) -> SweptArea {
        let (width, height) = self.dimensions();
        SweptArea::new(width, height)
    }

    fn episode_contribution(
        &self,
        episode: &Episode,
        swept: &mut SweptArea,
    ) -> std::result::Result<EpisodeContribution, EpisodeError> {
        episode.check_path_lengths()?;

        let mut contribution = EpisodeContribution {
            summary: EpisodeSummary::default(),
            increments: Vec::new(),
        };
        for (agent, path) in episode.paths.iter().enumerate() {
            let outcome = self.swept_area(path, swept)?;
            if let PathOutcome::Rejected { at } = outcome {
                debug!(
                    "{}: agent {} path rejected at obstacle ({}, {})",
                    self.name, agent, at.row, at.col
                );
            }
            contribution.increments.extend_from_slice(swept.touched());
            contribution.summary.record(outcome);
        }
        swept.clear();
        Ok(contribution)
    }

    fn commit(&mut self, contribution: &EpisodeContribution) {
        self.counts.increment_indices(&contribution.increments);
    }

    // =========================================================================
    // ACCUMULATION
    // =========================================================================

    /// Accumulate one episode, all or nothing.
    pub fn accumulate_episode(
        &mut self,
        episode: &Episode,
    ) -> std::result::Result<EpisodeSummary, EpisodeError> {
        let mut swept = self.scratch();
        let contribution = self.episode_contribution(episode, &mut swept)?;
        self.commit(&contribution);
        Ok(contribution.summary)
    }

    /// Accumulate episodes in order, skipping the ones that fail.
    pub fn accumulate(&mut self, episodes: &[Episode]) -> AccumulationReport {
        debug!(
            "Computing visitation counts for {} ({} episodes)...",
            self.name,
            episodes.len()
        );
        let mut swept = self.scratch();
        let mut report = AccumulationReport::default();
        for (index, episode) in episodes.iter().enumerate() {
            let result = self.episode_contribution(episode, &mut swept);
            self.apply(index, result, &mut report);
        }
        report
    }

    /// Parallel [`accumulate`](Self::accumulate).
    ///
    /// Episode contributions are computed on the rayon pool and merged in
    /// episode order, giving the same counts as the sequential version.
    pub fn accumulate_parallel(&mut self, episodes: &[Episode]) -> AccumulationReport {
        debug!(
            "Computing visitation counts for {} ({} episodes, parallel)...",
            self.name,
            episodes.len()
        );
        let results: Vec<_> = episodes
            .par_iter()
            .map_init(
                || self.scratch(),
                |swept, episode| self.episode_contribution(episode, swept),
            )
            .collect();

        let mut report = AccumulationReport::default();
        for (index, result) in results.into_iter().enumerate() {
            self.apply(index, result, &mut report);
        }
        report
    }

    fn apply(
        &mut self,
        index: usize,
        result: std::result::Result<EpisodeContribution, EpisodeError>,
        report: &mut AccumulationReport,
    ) {
        match result {
            Ok(contribution) => {
                self.commit(&contribution);
                report.episodes_committed += 1;
                report.summary.merge(&contribution.summary);
            }
            Err(e) => {
                warn!(
                    "{}: skipping episode {} [{}]: {}",
                    self.name,
                    index,
                    e.code(),
                    e
                );
                report.skipped.push((index, e));
            }
        }
    }

    /// Accumulate every attached episode.
    ///
    /// Counts keep growing on repeated calls.
    pub fn compute_visitation_counts(&mut self) -> AccumulationReport {
        let episodes = std::mem::take(&mut self.episodes);
        let report = self.accumulate(&episodes);
        self.episodes = episodes;
        report
    }
}
