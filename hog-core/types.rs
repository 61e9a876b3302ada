use crate::error::{HogError, HogResult};

/// Row-major grayscale intensities, one `u8` per pixel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntensityGrid {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl IntensityGrid {
    /// Wrap a row-major buffer; its length must be `width * height`
    pub fn new(width: usize, height: usize, data: Vec<u8>) -> HogResult<Self> {
        if width == 0 || height == 0 {
            return Err(HogError::InvalidImageSize { width, height });
        }
        let expected_len = width * height;
        if data.len() != expected_len {
            return Err(HogError::InvalidGridData {
                expected_len,
                actual_len: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Build a grid by evaluating `f(row, col)` for every pixel
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> u8) -> Self {
        let mut data = Vec::with_capacity(width * height);
        for row in 0..height {
            for col in 0..width {
                data.push(f(row, col));
            }
        }
        Self {
            width,
            height,
            data,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> u8 {
        self.data[row * self.width + col]
    }

    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }
}

/// Per-pixel gradients of one intensity grid
///
/// `orientation` holds raw `atan2(gx, gy)` values in (−π, π]; the histogram
/// stage folds them into [0, π).
#[derive(Debug, Clone, PartialEq)]
pub struct GradientGrid {
    pub width: usize,
    pub height: usize,
    /// Horizontal derivative
    pub gx: Vec<i32>,
    /// Vertical derivative
    pub gy: Vec<i32>,
    /// `sqrt(gx^2 + gy^2)`, never negative
    pub magnitude: Vec<f64>,
    pub orientation: Vec<f64>,
}

impl GradientGrid {
    #[inline]
    pub fn magnitude_at(&self, row: usize, col: usize) -> f64 {
        self.magnitude[row * self.width + col]
    }

    #[inline]
    pub fn orientation_at(&self, row: usize, col: usize) -> f64 {
        self.orientation[row * self.width + col]
    }
}

/// Orientation histograms for every cell of one image, `[cell][bin]`
///
/// Cells are flattened row-major: cell `(cx, cy)` lives at `num_cells_x * cy + cx`.
#[derive(Debug, Clone, PartialEq)]
pub struct CellHistograms {
    num_cells_x: usize,
    num_cells_y: usize,
    num_bins: usize,
    values: Vec<f64>,
}

impl CellHistograms {
    /// All-zero histograms for a `num_cells_x` x `num_cells_y` grid
    pub fn zeros(num_cells_x: usize, num_cells_y: usize, num_bins: usize) -> Self {
        Self {
            num_cells_x,
            num_cells_y,
            num_bins,
            values: vec![0.0; num_cells_x * num_cells_y * num_bins],
        }
    }

    pub fn num_cells_x(&self) -> usize {
        self.num_cells_x
    }

    pub fn num_cells_y(&self) -> usize {
        self.num_cells_y
    }

    pub fn num_cells(&self) -> usize {
        self.num_cells_x * self.num_cells_y
    }

    pub fn num_bins(&self) -> usize {
        self.num_bins
    }

    #[inline]
    pub fn cell_index(&self, cx: usize, cy: usize) -> usize {
        self.num_cells_x * cy + cx
    }

    /// Histogram of one cell
    pub fn cell(&self, cell: usize) -> &[f64] {
        let start = cell * self.num_bins;
        &self.values[start..start + self.num_bins]
    }

    #[inline]
    pub fn get(&self, cell: usize, bin: usize) -> f64 {
        self.values[cell * self.num_bins + bin]
    }

    /// Add `weight` to one bin; weights are magnitudes, so entries only grow
    #[inline]
    pub fn accumulate(&mut self, cell: usize, bin: usize, weight: f64) {
        debug_assert!(weight >= 0.0);
        self.values[cell * self.num_bins + bin] += weight;
    }

    /// Iterate over cells in index order
    pub fn cells(&self) -> impl Iterator<Item = &[f64]> {
        self.values.chunks(self.num_bins.max(1))
    }

    /// Cell-major, then bin, flattening of every entry
    pub fn as_flat(&self) -> &[f64] {
        &self.values
    }
}

/// Histograms of a whole batch, in input order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchResult {
    images: Vec<CellHistograms>,
}

impl BatchResult {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            images: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, histograms: CellHistograms) {
        self.images.push(histograms);
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn get(&self, image: usize) -> Option<&CellHistograms> {
        self.images.get(image)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CellHistograms> {
        self.images.iter()
    }
}

impl FromIterator<CellHistograms> for BatchResult {
    fn from_iter<I: IntoIterator<Item = CellHistograms>>(iter: I) -> Self {
        Self {
            images: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a BatchResult {
    type Item = &'a CellHistograms;
    type IntoIter = std::slice::Iter<'a, CellHistograms>;

    fn into_iter(self) -> Self::IntoIter {
        self.images.iter()
    }
}
