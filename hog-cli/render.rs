use std::path::{Path, PathBuf};

use hog_cells::cell_regions;
use hog_core::{BatchResult, CellHistograms, HogConfig};
use image::{Rgb, RgbImage};
use imageproc::drawing::draw_line_segment_mut;
use log::info;

use crate::{RunError, RunResult};

/// Draw every cell's histogram as a star of line segments.
///
/// Each bin becomes a segment through the cell centre along the bin's centre
/// orientation, with length and brightness proportional to its weight
/// relative to the strongest bin of the image.
pub fn render_glyphs(hist: &CellHistograms, cfg: &HogConfig) -> RgbImage {
    let mut canvas = RgbImage::new(cfg.image_width as u32, cfg.image_height as u32);
    let max = hist.as_flat().iter().copied().fold(0.0, f64::max);
    if max <= 0.0 {
        return canvas;
    }

    let bin_width = cfg.bin_width();
    let half_len = cfg.cell_width.min(cfg.cell_height) as f32 / 2.0;

    for region in cell_regions(cfg) {
        let cx = region.cols.start as f32 + cfg.cell_width as f32 / 2.0;
        let cy = region.rows.start as f32 + cfg.cell_height as f32 / 2.0;
        for (bin, &weight) in hist.cell(region.index).iter().enumerate() {
            if weight <= 0.0 {
                continue;
            }
            let ratio = weight / max;
            let theta = (bin as f64 + 0.5) * bin_width;
            let (sin, cos) = theta.sin_cos();
            let len = half_len * ratio as f32;
            // Image rows grow downward
            let dx = cos as f32 * len;
            let dy = -(sin as f32) * len;
            let level = (255.0 * ratio).round() as u8;
            draw_line_segment_mut(
                &mut canvas,
                (cx - dx, cy - dy),
                (cx + dx, cy + dy),
                Rgb([level, level, level]),
            );
        }
    }
    canvas
}

/// Save one glyph image per input under `dir`, named `<stem>_hog.png`
pub fn save_glyphs(
    dir: &Path,
    inputs: &[PathBuf],
    batch: &BatchResult,
    cfg: &HogConfig,
) -> RunResult<Vec<PathBuf>> {
    std::fs::create_dir_all(dir).map_err(|source| RunError::Write {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut written = Vec::with_capacity(batch.len());
    for (i, (input, hist)) in inputs.iter().zip(batch).enumerate() {
        let stem = input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| format!("image{i}"));
        let path = dir.join(format!("{stem}_hog.png"));
        render_glyphs(hist, cfg)
            .save(&path)
            .map_err(|source| RunError::Render {
                path: path.clone(),
                source,
            })?;
        written.push(path);
    }
    info!("rendered {} glyph images into {}", written.len(), dir.display());
    Ok(written)
}
