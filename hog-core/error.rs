use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HogError {
    #[error("Invalid image dimensions: {width}x{height} (must be > 0)")]
    InvalidImageSize { width: usize, height: usize },
    #[error("Invalid cell dimensions: {width}x{height} (must be > 0)")]
    InvalidCellSize { width: usize, height: usize },
    #[error("Invalid bin count: {0} (must be > 0)")]
    InvalidBinCount(usize),
    #[error("Image {axis} {image} is not a multiple of cell {axis} {cell}")]
    IndivisibleImage {
        axis: &'static str,
        image: usize,
        cell: usize,
    },
    #[error("Grid data length mismatch: expected {expected_len}, got {actual_len}")]
    InvalidGridData {
        expected_len: usize,
        actual_len: usize,
    },
    #[error("Grid is {width}x{height}, configuration expects {expected_width}x{expected_height}")]
    GridMismatch {
        expected_width: usize,
        expected_height: usize,
        width: usize,
        height: usize,
    },
}

pub type HogResult<T> = Result<T, HogError>;
