use std::path::{Path, PathBuf};

use hog_core::{HogConfig, IntensityGrid};
use hog_gradient::{LoadResult, load_intensity, to_intensity_checked};
use image::RgbImage;

/// Anything the batch can pull an intensity grid from.
///
/// Loading fails with a decode/not-found error or a dimension mismatch.
pub trait ImageSource {
    /// Label used in logs and errors
    fn name(&self) -> String;

    fn load_intensity(&self, cfg: &HogConfig) -> LoadResult<IntensityGrid>;
}

impl ImageSource for Path {
    fn name(&self) -> String {
        self.display().to_string()
    }

    fn load_intensity(&self, cfg: &HogConfig) -> LoadResult<IntensityGrid> {
        load_intensity(self, cfg)
    }
}

impl ImageSource for PathBuf {
    fn name(&self) -> String {
        self.as_path().name()
    }

    fn load_intensity(&self, cfg: &HogConfig) -> LoadResult<IntensityGrid> {
        self.as_path().load_intensity(cfg)
    }
}

impl ImageSource for str {
    fn name(&self) -> String {
        self.to_string()
    }

    fn load_intensity(&self, cfg: &HogConfig) -> LoadResult<IntensityGrid> {
        Path::new(self).load_intensity(cfg)
    }
}

impl ImageSource for String {
    fn name(&self) -> String {
        self.clone()
    }

    fn load_intensity(&self, cfg: &HogConfig) -> LoadResult<IntensityGrid> {
        Path::new(self).load_intensity(cfg)
    }
}

impl ImageSource for RgbImage {
    fn name(&self) -> String {
        format!("in-memory {}x{} image", self.width(), self.height())
    }

    fn load_intensity(&self, cfg: &HogConfig) -> LoadResult<IntensityGrid> {
        to_intensity_checked(self, cfg, &self.name())
    }
}

impl<T: ImageSource + ?Sized> ImageSource for &T {
    fn name(&self) -> String {
        (**self).name()
    }

    fn load_intensity(&self, cfg: &HogConfig) -> LoadResult<IntensityGrid> {
        (**self).load_intensity(cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hog_gradient::ImageLoadError;
    use image::Rgb;

    #[test]
    fn test_in_memory_source() {
        let cfg = HogConfig::new(4, 4).with_cell_size(2, 2);
        let img = RgbImage::from_pixel(4, 4, Rgb([9, 9, 12]));
        let grid = img.load_intensity(&cfg).unwrap();
        assert!(grid.as_raw().iter().all(|&v| v == 10));
        assert_eq!(img.name(), "in-memory 4x4 image");
    }

    #[test]
    fn test_path_sources_agree() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("img.png");
        RgbImage::from_fn(4, 4, |x, y| Rgb([(x * 40) as u8, (y * 40) as u8, 0]))
            .save(&path)
            .unwrap();

        let cfg = HogConfig::new(4, 4).with_cell_size(2, 2);
        let from_path = path.as_path().load_intensity(&cfg).unwrap();
        let from_buf = path.load_intensity(&cfg).unwrap();
        let as_str = path.to_str().unwrap();
        let from_str = as_str.load_intensity(&cfg).unwrap();
        assert_eq!(from_path, from_buf);
        assert_eq!(from_path, from_str);
    }

    #[test]
    fn test_missing_path() {
        let cfg = HogConfig::default();
        let result = "definitely/not/here.png".load_intensity(&cfg);
        assert!(matches!(result, Err(ImageLoadError::Decode { .. })));
    }
}
