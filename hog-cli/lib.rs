use std::path::PathBuf;

use hog_cells::HistogramBuilder;
use hog_core::HogError;
use hog_gradient::{ImageLoadError, compute_gradients, to_intensity_checked};
use image::RgbImage;
use log::{debug, info};
use thiserror::Error;

pub mod config;
pub mod render;
pub mod source;
pub mod writer;

pub use config::RunConfig;
pub use hog_core::{self, BatchResult, CellHistograms, GradientGrid, HogConfig, IntensityGrid};
pub use source::ImageSource;
pub use writer::{format_line, parse_line, read_results, write_batch, write_results};

#[derive(Debug, Error)]
pub enum RunError {
    #[error("HOG error: {0}")]
    Hog(#[from] HogError),
    #[error("Image error: {0}")]
    Load(#[from] ImageLoadError),
    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Malformed value {value:?} on line {line}: {source}")]
    Parse {
        line: usize,
        value: String,
        #[source]
        source: std::num::ParseFloatError,
    },
    #[error("Invalid TOML configuration: {0}")]
    TomlDe(#[from] toml::de::Error),
    #[error("TOML serialization failed: {0}")]
    TomlSer(#[from] toml::ser::Error),
    #[error("JSON configuration error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Run configuration lists no input images")]
    NoImages,
    #[error("Failed to save rendering {}: {source}", .path.display())]
    Render {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

pub type RunResult<T> = Result<T, RunError>;

/// High-level extractor: grayscale, Sobel gradients, then cell histograms
#[derive(Debug, Clone)]
pub struct HogPipeline {
    cfg: HogConfig,
    histograms: HistogramBuilder,
}

impl HogPipeline {
    /// Create a pipeline for a validated configuration
    pub fn new(cfg: HogConfig) -> RunResult<Self> {
        let histograms = HistogramBuilder::new(cfg)?;
        Ok(Self { cfg, histograms })
    }

    /// Histograms of one intensity grid
    pub fn extract(&self, grid: &IntensityGrid) -> RunResult<CellHistograms> {
        self.cfg.check_grid(grid.width(), grid.height())?;
        let grad = compute_gradients(grid);
        Ok(self.histograms.build(&grad)?)
    }

    /// Histograms of one decoded RGB image
    pub fn extract_rgb(&self, img: &RgbImage) -> RunResult<CellHistograms> {
        let grid = to_intensity_checked(img, &self.cfg, "in-memory image")?;
        self.extract(&grid)
    }

    /// Process every source in order.
    ///
    /// All-or-nothing: the first source that fails to load aborts the batch
    /// and its error is returned; no partial result escapes.
    pub fn run<S: ImageSource>(&self, sources: &[S]) -> RunResult<BatchResult> {
        info!(
            "extracting HOG features from {} images ({})",
            sources.len(),
            self.cfg.summary()
        );
        let mut batch = BatchResult::with_capacity(sources.len());
        for (i, source) in sources.iter().enumerate() {
            let grid = source.load_intensity(&self.cfg)?;
            let hist = self.extract(&grid)?;
            debug!(
                "image {} ({}): {} cells x {} bins",
                i,
                source.name(),
                hist.num_cells(),
                hist.num_bins()
            );
            batch.push(hist);
        }
        Ok(batch)
    }

    /// Get pipeline configuration
    pub fn config(&self) -> &HogConfig {
        &self.cfg
    }
}

/// Run a whole job: extract every configured image, then write the output file
pub fn run(config: &RunConfig) -> RunResult<BatchResult> {
    config.validate()?;
    let pipeline = HogPipeline::new(config.hog)?;
    let batch = pipeline.run(&config.image_paths)?;
    write_results(&config.output_path, &batch)?;
    Ok(batch)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn small_config() -> HogConfig {
        HogConfig::new(4, 4).with_cell_size(2, 2)
    }

    fn checkerboard(size: u32, square: u32) -> RgbImage {
        RgbImage::from_fn(size, size, |x, y| {
            if (x / square + y / square) % 2 == 0 {
                Rgb([20, 20, 20])
            } else {
                Rgb([230, 230, 230])
            }
        })
    }

    #[test]
    fn test_pipeline_rejects_invalid_config() {
        let result = HogPipeline::new(HogConfig::new(5, 4).with_cell_size(2, 2));
        assert!(matches!(
            result,
            Err(RunError::Hog(HogError::IndivisibleImage { .. }))
        ));
    }

    #[test]
    fn test_extract_shape() {
        let pipeline = HogPipeline::new(small_config()).unwrap();
        let hist = pipeline.extract_rgb(&checkerboard(4, 2)).unwrap();
        assert_eq!(hist.num_cells(), 4);
        assert_eq!(hist.num_bins(), 8);
        assert_eq!(hist.as_flat().len(), small_config().descriptor_len());
    }

    #[test]
    fn test_extract_rejects_wrong_size() {
        let pipeline = HogPipeline::new(small_config()).unwrap();
        let result = pipeline.extract_rgb(&checkerboard(6, 2));
        assert!(matches!(
            result,
            Err(RunError::Load(ImageLoadError::DimensionMismatch { .. }))
        ));

        let grid = IntensityGrid::from_fn(2, 2, |_, _| 0);
        assert!(matches!(
            pipeline.extract(&grid),
            Err(RunError::Hog(HogError::GridMismatch { .. }))
        ));
    }

    #[test]
    fn test_black_image_gives_zero_descriptor() {
        let pipeline = HogPipeline::new(small_config()).unwrap();
        let hist = pipeline
            .extract_rgb(&RgbImage::from_pixel(4, 4, Rgb([0, 0, 0])))
            .unwrap();
        assert!(hist.as_flat().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_run_preserves_order() {
        let pipeline = HogPipeline::new(small_config()).unwrap();
        let images = vec![
            RgbImage::from_pixel(4, 4, Rgb([0, 0, 0])),
            checkerboard(4, 2),
            RgbImage::from_pixel(4, 4, Rgb([0, 0, 0])),
        ];

        let batch = pipeline.run(&images).unwrap();
        assert_eq!(batch.len(), 3);
        let energy: Vec<f64> = batch
            .iter()
            .map(|h| h.as_flat().iter().sum::<f64>())
            .collect();
        assert_eq!(energy[0], 0.0);
        assert!(energy[1] > 0.0);
        assert_eq!(energy[2], 0.0);
    }

    #[test]
    fn test_run_is_all_or_nothing() {
        let pipeline = HogPipeline::new(small_config()).unwrap();
        let images = vec![checkerboard(4, 2), checkerboard(8, 2), checkerboard(4, 1)];
        assert!(pipeline.run(&images).is_err());
    }

    #[test]
    fn test_run_empty_batch() {
        let pipeline = HogPipeline::new(small_config()).unwrap();
        let images: Vec<RgbImage> = Vec::new();
        assert!(pipeline.run(&images).unwrap().is_empty());
    }
}
