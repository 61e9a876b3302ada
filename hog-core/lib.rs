//! Core types and configuration shared by the HOG crates.

pub mod config;
pub mod error;
pub mod types;

pub use config::HogConfig;
pub use error::{HogError, HogResult};
pub use types::{BatchResult, CellHistograms, GradientGrid, IntensityGrid};
