use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use hog_cli::{RunConfig, render};

/// Command line arguments for batch HOG extraction
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Compute HOG cell histograms for a batch of images and write them as text"
)]
struct Args {
    /// Input images, in output order (overrides the configured list)
    images: Vec<PathBuf>,

    /// Output text file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Job configuration file (.toml, or .json)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of orientation bins
    #[arg(long)]
    bins: Option<usize>,

    /// Square cell side in pixels
    #[arg(long)]
    cell_size: Option<usize>,

    /// Square image side in pixels
    #[arg(long)]
    image_size: Option<usize>,

    /// Also write one histogram glyph PNG per input into this directory
    #[arg(long)]
    render_dir: Option<PathBuf>,

    /// Write the effective configuration to this file and exit
    #[arg(long)]
    save_config: Option<PathBuf>,
}

impl Args {
    /// Defaults, then the config file, then command line flags
    fn resolve(&self) -> Result<RunConfig, Box<dyn std::error::Error>> {
        let mut cfg = match &self.config {
            Some(path) => RunConfig::load(path)?,
            None => RunConfig::default(),
        };
        if !self.images.is_empty() {
            cfg.image_paths = self.images.clone();
        }
        if let Some(output) = &self.output {
            cfg.output_path = output.clone();
        }
        if let Some(bins) = self.bins {
            cfg.hog = cfg.hog.with_bins(bins);
        }
        if let Some(side) = self.cell_size {
            cfg.hog = cfg.hog.with_cell_size(side, side);
        }
        if let Some(side) = self.image_size {
            cfg.hog = cfg.hog.with_image_size(side, side);
        }
        cfg.validate()?;
        Ok(cfg)
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();
    let cfg = args.resolve()?;

    if let Some(path) = &args.save_config {
        cfg.save(path)?;
        println!("Saved configuration to {}", path.display());
        return Ok(());
    }

    println!("{}", cfg.summary());

    let t0 = Instant::now();
    let batch = hog_cli::run(&cfg)?;
    let elapsed = t0.elapsed();

    println!("Time taken: {:.2?}", elapsed);
    println!(
        "Wrote {} descriptors of {} values to {}",
        batch.len(),
        cfg.hog.descriptor_len(),
        cfg.output_path.display()
    );

    if let Some(dir) = &args.render_dir {
        let written = render::save_glyphs(dir, &cfg.image_paths, &batch, &cfg.hog)?;
        println!("Saved {} glyph images to {}", written.len(), dir.display());
    }

    Ok(())
}
