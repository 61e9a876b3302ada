use crate::error::{HogError, HogResult};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Image geometry and histogram layout for one extraction run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HogConfig {
    /// Orientation bins per cell, spread uniformly over [0, π)
    pub num_bins: usize,
    /// Image dimensions every input must match
    pub image_width: usize,
    pub image_height: usize,
    /// Non-overlapping cell dimensions
    pub cell_width: usize,
    pub cell_height: usize,
}

impl Default for HogConfig {
    fn default() -> Self {
        Self {
            num_bins: 8,
            image_width: 150,
            image_height: 150,
            cell_width: 10,
            cell_height: 10,
        }
    }
}

impl HogConfig {
    /// Create a configuration for `width`x`height` images with the default cell layout
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            image_width: width,
            image_height: height,
            ..Self::default()
        }
    }

    /// Set the number of orientation bins
    pub fn with_bins(mut self, num_bins: usize) -> Self {
        self.num_bins = num_bins;
        self
    }

    /// Set the image dimensions
    pub fn with_image_size(mut self, width: usize, height: usize) -> Self {
        self.image_width = width;
        self.image_height = height;
        self
    }

    /// Set the cell dimensions
    pub fn with_cell_size(mut self, width: usize, height: usize) -> Self {
        self.cell_width = width;
        self.cell_height = height;
        self
    }

    pub fn num_cells_x(&self) -> usize {
        self.image_width / self.cell_width
    }

    pub fn num_cells_y(&self) -> usize {
        self.image_height / self.cell_height
    }

    /// Total cells per image
    pub fn num_cells(&self) -> usize {
        self.num_cells_x() * self.num_cells_y()
    }

    /// Length of one flattened image descriptor (cells × bins)
    pub fn descriptor_len(&self) -> usize {
        self.num_cells() * self.num_bins
    }

    /// Angular width of one orientation bin in radians
    pub fn bin_width(&self) -> f64 {
        std::f64::consts::PI / self.num_bins as f64
    }

    /// Generate human-readable summary
    pub fn summary(&self) -> String {
        format!(
            "HogConfig: {}x{} image, {}x{} cells ({}x{} grid), {} bins",
            self.image_width,
            self.image_height,
            self.cell_width,
            self.cell_height,
            self.num_cells_x(),
            self.num_cells_y(),
            self.num_bins
        )
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> HogResult<()> {
        if self.image_width == 0 || self.image_height == 0 {
            return Err(HogError::InvalidImageSize {
                width: self.image_width,
                height: self.image_height,
            });
        }
        if self.cell_width == 0 || self.cell_height == 0 {
            return Err(HogError::InvalidCellSize {
                width: self.cell_width,
                height: self.cell_height,
            });
        }
        if self.num_bins == 0 {
            return Err(HogError::InvalidBinCount(self.num_bins));
        }
        if self.image_width % self.cell_width != 0 {
            return Err(HogError::IndivisibleImage {
                axis: "width",
                image: self.image_width,
                cell: self.cell_width,
            });
        }
        if self.image_height % self.cell_height != 0 {
            return Err(HogError::IndivisibleImage {
                axis: "height",
                image: self.image_height,
                cell: self.cell_height,
            });
        }
        Ok(())
    }

    /// Check that a `width`x`height` grid has the configured image dimensions
    pub fn check_grid(&self, width: usize, height: usize) -> HogResult<()> {
        if width != self.image_width || height != self.image_height {
            return Err(HogError::GridMismatch {
                expected_width: self.image_width,
                expected_height: self.image_height,
                width,
                height,
            });
        }
        Ok(())
    }
}
