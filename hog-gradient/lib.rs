//! Grayscale conversion and gradient computation.
//!
//! `grayscale` turns decoded RGB rasters into [`IntensityGrid`]s and
//! `gradient` convolves them with the Sobel pair into a [`GradientGrid`].
//!
//! [`IntensityGrid`]: hog_core::IntensityGrid
//! [`GradientGrid`]: hog_core::GradientGrid

pub mod error;
pub mod gradient;
pub mod grayscale;

pub use error::{ImageLoadError, LoadResult};
pub use gradient::{
    Kernel3, SOBEL_KERNEL_X, SOBEL_KERNEL_Y, compute_gradients, compute_gradients_with_kernels,
    zero_pad,
};
pub use grayscale::{load_intensity, to_intensity, to_intensity_checked};
