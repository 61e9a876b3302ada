//! Sobel gradients with magnitude and orientation.
//!
//! - Zero-pads the intensity grid by one pixel, so border pixels see black
//!   neighbours and report weaker (or spurious) gradients.
//! - Applies the 3×3 kernels without flipping them.
//! - Orientation is `atan2(gx, gy)`: the angle of the edge line itself, not
//!   of the gradient normal. Downstream binning depends on this order.
//!
//! Complexity: O(W·H); memory: one padded `i32` copy plus four output buffers.
use hog_core::{GradientGrid, IntensityGrid};

pub type Kernel3 = [[i32; 3]; 3];

pub const SOBEL_KERNEL_X: Kernel3 = [[-1, 0, 1], [-2, 0, 2], [-1, 0, 1]];
pub const SOBEL_KERNEL_Y: Kernel3 = [[-1, -2, -1], [0, 0, 0], [1, 2, 1]];

/// Copy `grid` into a `(w + 2) x (h + 2)` buffer with a one-pixel zero border
pub fn zero_pad(grid: &IntensityGrid) -> Vec<i32> {
    let w = grid.width();
    let h = grid.height();
    let pw = w + 2;
    let mut padded = vec![0i32; pw * (h + 2)];
    if w == 0 {
        return padded;
    }
    for (row, src) in grid.as_raw().chunks(w).enumerate() {
        let dst = &mut padded[(row + 1) * pw + 1..(row + 1) * pw + 1 + w];
        for (d, &s) in dst.iter_mut().zip(src) {
            *d = s as i32;
        }
    }
    padded
}

/// Gradients of `grid` under an arbitrary kernel pair
pub fn compute_gradients_with_kernels(
    grid: &IntensityGrid,
    kernel_x: &Kernel3,
    kernel_y: &Kernel3,
) -> GradientGrid {
    let w = grid.width();
    let h = grid.height();
    let pw = w + 2;
    let padded = zero_pad(grid);

    let n = w * h;
    let mut gx = Vec::with_capacity(n);
    let mut gy = Vec::with_capacity(n);
    let mut magnitude = Vec::with_capacity(n);
    let mut orientation = Vec::with_capacity(n);

    for i in 0..h {
        for j in 0..w {
            let mut sum_x = 0i32;
            let mut sum_y = 0i32;
            for l in 0..3 {
                let start = (i + l) * pw + j;
                let window = &padded[start..start + 3];
                for m in 0..3 {
                    sum_x += window[m] * kernel_x[l][m];
                    sum_y += window[m] * kernel_y[l][m];
                }
            }

            gx.push(sum_x);
            gy.push(sum_y);
            magnitude.push(((sum_x * sum_x + sum_y * sum_y) as f64).sqrt());
            // (x, y) rather than (y, x): tangent instead of normal
            orientation.push((sum_x as f64).atan2(sum_y as f64));
        }
    }

    GradientGrid {
        width: w,
        height: h,
        gx,
        gy,
        magnitude,
        orientation,
    }
}

/// Compute Sobel gradients of an intensity grid
pub fn compute_gradients(grid: &IntensityGrid) -> GradientGrid {
    compute_gradients_with_kernels(grid, &SOBEL_KERNEL_X, &SOBEL_KERNEL_Y)
}
