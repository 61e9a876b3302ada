use hog_cli::render::render_glyphs;
use hog_cli::{HogConfig, HogPipeline, RunConfig};
use image::{Rgb, RgbImage};
use std::time::Instant;

/// Synthetic scene: a bright disc on a dark background with a diagonal band
fn synthetic_scene(size: u32) -> RgbImage {
    let c = size as f32 / 2.0;
    RgbImage::from_fn(size, size, |x, y| {
        let (fx, fy) = (x as f32 - c, y as f32 - c);
        let in_disc = fx * fx + fy * fy < (size as f32 / 3.0).powi(2);
        let in_band = (x as i32 - y as i32).abs() < 8;
        match (in_disc, in_band) {
            (true, _) => Rgb([230, 220, 210]),
            (false, true) => Rgb([120, 160, 90]),
            _ => Rgb([15, 20, 25]),
        }
    })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("HOG Feature Extraction Showcase");
    println!("===============================\n");

    let cfg = HogConfig::default();
    println!("{}", cfg.summary());

    let img = synthetic_scene(cfg.image_width as u32);
    let pipeline = HogPipeline::new(cfg)?;

    let start = Instant::now();
    let hist = pipeline.extract_rgb(&img)?;
    println!(
        "Extracted {} values in {:.2?}",
        hist.as_flat().len(),
        start.elapsed()
    );

    // Aggregate orientation energy across all cells
    let mut totals = vec![0.0; cfg.num_bins];
    for cell in hist.cells() {
        for (bin, &v) in cell.iter().enumerate() {
            totals[bin] += v;
        }
    }
    let bin_deg = 180.0 / cfg.num_bins as f64;
    for (bin, total) in totals.iter().enumerate() {
        println!(
            "   bin {} [{:>5.1}°, {:>5.1}°): {:>12.1}",
            bin,
            bin as f64 * bin_deg,
            (bin + 1) as f64 * bin_deg,
            total
        );
    }

    img.save("hog_showcase_input.png")?;
    render_glyphs(&hist, &cfg).save("hog_showcase_glyphs.png")?;
    println!("\nSaved hog_showcase_input.png and hog_showcase_glyphs.png");

    let job = RunConfig {
        image_paths: vec!["hog_showcase_input.png".into()],
        output_path: "hog_showcase.txt".into(),
        hog: cfg,
    };
    job.save("hog_showcase.toml")?;
    println!("Saved a matching job file to hog_showcase.toml:\n\n{}", job.to_toml()?);

    Ok(())
}
