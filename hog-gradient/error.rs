use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImageLoadError {
    #[error("Failed to decode {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("Image {source_name} is {width}x{height}, expected {expected_width}x{expected_height}")]
    DimensionMismatch {
        source_name: String,
        expected_width: usize,
        expected_height: usize,
        width: usize,
        height: usize,
    },
}

pub type LoadResult<T> = Result<T, ImageLoadError>;
