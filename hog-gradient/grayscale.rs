use std::path::Path;

use hog_core::{HogConfig, IntensityGrid};
use image::{Rgb, RgbImage};
use log::debug;

use crate::error::{ImageLoadError, LoadResult};

/// Average the three channels of every pixel, truncating toward zero
pub fn to_intensity(img: &RgbImage) -> IntensityGrid {
    let (w, h) = img.dimensions();
    IntensityGrid::from_fn(w as usize, h as usize, |row, col| {
        let Rgb([r, g, b]) = *img.get_pixel(col as u32, row as u32);
        ((r as u16 + g as u16 + b as u16) / 3) as u8
    })
}

/// Convert `img` after checking it has the configured dimensions.
///
/// `source_name` only labels the error.
pub fn to_intensity_checked(
    img: &RgbImage,
    cfg: &HogConfig,
    source_name: &str,
) -> LoadResult<IntensityGrid> {
    let (w, h) = img.dimensions();
    let (width, height) = (w as usize, h as usize);
    if width != cfg.image_width || height != cfg.image_height {
        return Err(ImageLoadError::DimensionMismatch {
            source_name: source_name.to_string(),
            expected_width: cfg.image_width,
            expected_height: cfg.image_height,
            width,
            height,
        });
    }
    Ok(to_intensity(img))
}

/// Decode the image at `path` and reduce it to intensities
pub fn load_intensity(path: &Path, cfg: &HogConfig) -> LoadResult<IntensityGrid> {
    let img = image::open(path)
        .map_err(|source| ImageLoadError::Decode {
            path: path.to_path_buf(),
            source,
        })?
        .into_rgb8();
    debug!(
        "decoded {} ({}x{})",
        path.display(),
        img.width(),
        img.height()
    );
    to_intensity_checked(&img, cfg, &path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid_image(width: u32, height: u32, rgb: [u8; 3]) -> RgbImage {
        RgbImage::from_pixel(width, height, Rgb(rgb))
    }

    #[test]
    fn test_channel_average_truncates() {
        let mut img = solid_image(2, 1, [0, 0, 0]);
        img.put_pixel(0, 0, Rgb([1, 1, 2]));
        img.put_pixel(1, 0, Rgb([255, 255, 254]));

        let grid = to_intensity(&img);
        assert_eq!(grid.get(0, 0), 1);
        assert_eq!(grid.get(0, 1), 254);
    }

    #[test]
    fn test_white_stays_white() {
        let grid = to_intensity(&solid_image(3, 3, [255, 255, 255]));
        assert!(grid.as_raw().iter().all(|&v| v == 255));
    }

    #[test]
    fn test_row_major_layout() {
        // x selects the column, y the row
        let mut img = solid_image(3, 2, [0, 0, 0]);
        img.put_pixel(2, 1, Rgb([90, 90, 90]));

        let grid = to_intensity(&img);
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.height(), 2);
        assert_eq!(grid.get(1, 2), 90);
        assert_eq!(grid.as_raw()[5], 90);
    }

    #[test]
    fn test_dimension_mismatch() {
        let cfg = HogConfig::new(4, 4).with_cell_size(2, 2);
        let img = solid_image(4, 6, [10, 20, 30]);

        let result = to_intensity_checked(&img, &cfg, "tall");
        assert!(matches!(
            result,
            Err(ImageLoadError::DimensionMismatch { width: 4, height: 6, .. })
        ));
    }

    #[test]
    fn test_load_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gray.png");
        solid_image(4, 4, [30, 60, 90]).save(&path).unwrap();

        let cfg = HogConfig::new(4, 4).with_cell_size(2, 2);
        let grid = load_intensity(&path, &cfg).unwrap();
        assert!(grid.as_raw().iter().all(|&v| v == 60));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.png");

        let result = load_intensity(&path, &HogConfig::default());
        assert!(matches!(result, Err(ImageLoadError::Decode { .. })));
    }
}
