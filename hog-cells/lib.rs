use std::f64::consts::PI;
use std::ops::Range;

use hog_core::{CellHistograms, GradientGrid, HogConfig, HogResult};

/// Fold a raw orientation from (−π, π] into [0, π).
///
/// Negative angles gain π. `atan2` may return exactly π, and a tiny negative
/// angle plus π can round up to π, so anything that lands on π folds to 0.
#[inline]
pub fn normalize_orientation(theta: f64) -> f64 {
    let folded = if theta < 0.0 { theta + PI } else { theta };
    if folded >= PI { folded - PI } else { folded }
}

/// Bin index of a normalized orientation.
///
/// Boundaries belong to the bin they open. The modulo wraps a quotient that
/// rounds up to `num_bins` back to bin 0.
#[inline]
pub fn orientation_bin(theta: f64, bin_width: f64, num_bins: usize) -> usize {
    (theta / bin_width).floor() as usize % num_bins
}

/// Pixel rectangle covered by one cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellRegion {
    pub cx: usize,
    pub cy: usize,
    /// Flattened index, `num_cells_x * cy + cx`
    pub index: usize,
    pub rows: Range<usize>,
    pub cols: Range<usize>,
}

/// Enumerate the cells of `cfg` in index order
pub fn cell_regions(cfg: &HogConfig) -> impl Iterator<Item = CellRegion> + '_ {
    let nx = cfg.num_cells_x();
    (0..cfg.num_cells_y()).flat_map(move |cy| {
        (0..nx).map(move |cx| CellRegion {
            cx,
            cy,
            index: nx * cy + cx,
            rows: cy * cfg.cell_height..(cy + 1) * cfg.cell_height,
            cols: cx * cfg.cell_width..(cx + 1) * cfg.cell_width,
        })
    })
}

/// Accumulates magnitude-weighted orientation histograms over fixed cells
#[derive(Debug, Clone)]
pub struct HistogramBuilder {
    cfg: HogConfig,
}

impl HistogramBuilder {
    pub fn new(cfg: HogConfig) -> HogResult<Self> {
        cfg.validate()?;
        Ok(Self { cfg })
    }

    /// Build the histogram set for one image's gradients.
    ///
    /// The gradient grid must have the configured image dimensions.
    pub fn build(&self, grad: &GradientGrid) -> HogResult<CellHistograms> {
        self.cfg.check_grid(grad.width, grad.height)?;

        let num_bins = self.cfg.num_bins;
        let bin_width = self.cfg.bin_width();
        let mut hist =
            CellHistograms::zeros(self.cfg.num_cells_x(), self.cfg.num_cells_y(), num_bins);

        for region in cell_regions(&self.cfg) {
            for row in region.rows.clone() {
                for col in region.cols.clone() {
                    let theta = normalize_orientation(grad.orientation_at(row, col));
                    let bin = orientation_bin(theta, bin_width, num_bins);
                    hist.accumulate(region.index, bin, grad.magnitude_at(row, col));
                }
            }
        }

        Ok(hist)
    }

    pub fn config(&self) -> &HogConfig {
        &self.cfg
    }
}
