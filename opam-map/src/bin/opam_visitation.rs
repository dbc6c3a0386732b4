//! Compute visitation counts for a directory of maps.
//!
//! # Usage
//!
//! ```bash
//! opam-visitation --maps data/maps --episodes data/episodes --output output/
//! ```
//!
//! # Output Files
//!
//! - `<map>_visitation.png`: Map with visited pixels shaded by count
//! - `<map>.opamv`: Raw u32 counts

use std::path::{Path, PathBuf};

use clap::Parser;
use log::{error, info};

use opam_map::io::{render_visitation, save_counts, save_png};
use opam_map::{Aggregator, OpamConfig};

#[derive(Parser)]
#[command(name = "opam-visitation")]
#[command(about = "Accumulate agent visitation counts over traversability maps")]
struct Args {
    /// Directory of map images
    #[arg(short, long)]
    maps: PathBuf,

    /// Directory of episode JSON files
    #[arg(short, long)]
    episodes: PathBuf,

    /// YAML configuration (defaults to configs/config.yaml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Episodes to load per file (0 = all), overrides the config
    #[arg(long)]
    num_episodes: Option<usize>,

    /// Map resolution in pixels per meter, overrides the config
    #[arg(long)]
    pix_per_meter: Option<f64>,

    /// Output directory, overrides the config
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    if let Err(e) = run(&args) {
        error!("{}", e);
        std::process::exit(1);
    }
}

fn load_config(args: &Args) -> Result<OpamConfig, Box<dyn std::error::Error>> {
    let mut config = match &args.config {
        Some(path) => OpamConfig::load(path)?,
        None => OpamConfig::load_default()?,
    };
    if let Some(n) = args.num_episodes {
        config.loading.num_episodes = n;
    }
    if let Some(ppm) = args.pix_per_meter {
        config.environment.pix_per_meter = ppm;
    }
    if let Some(output) = &args.output {
        config.persistence.output_dir = output.display().to_string();
    }
    config.validate()?;
    Ok(config)
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(args)?;
    let settings = config.to_environment_settings();
    info!(
        "Scale {} px/m, agent radius {} m, boundary {:?}",
        settings.pix_per_meter, settings.agent_radius, settings.boundary
    );

    let mut aggregator = Aggregator::new();
    aggregator.load_maps_with(&args.maps, &settings, &config.loading)?;
    if aggregator.is_empty() {
        return Err(format!("no maps found in {}", args.maps.display()).into());
    }
    aggregator.load_episodes(&args.episodes, config.loading.num_episodes)?;

    let reports = aggregator.compute_visitation_counts();

    let output_dir = config.persistence.output_path();
    std::fs::create_dir_all(&output_dir)?;

    for environment in aggregator.iter() {
        let name = environment.name();
        let counts = environment.visitation_counts();
        if let Some(report) = reports.get(name) {
            info!(
                "{}: {} episodes committed, {} skipped, {} paths accepted, {} rejected, max {}",
                name,
                report.episodes_committed,
                report.skipped.len(),
                report.summary.paths_accepted,
                report.summary.paths_rejected,
                counts.max()
            );
        }

        if config.persistence.export_png {
            let path = output_path(&output_dir, name, "_visitation.png");
            save_png(&render_visitation(environment.raster(), counts), &path)?;
            info!("Wrote {}", path.display());
        }
        if config.persistence.export_counts {
            let path = output_path(&output_dir, name, ".opamv");
            save_counts(counts, &path)?;
            info!("Wrote {}", path.display());
        }
    }
    Ok(())
}

fn output_path(dir: &Path, name: &str, suffix: &str) -> PathBuf {
    dir.join(format!("{}{}", name, suffix))
}
