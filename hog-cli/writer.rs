//! Text serialization of batch results.
//!
//! One line per image, values flattened cell-major then bin, separated by
//! commas with nothing trailing. Floats use the shortest representation that
//! parses back to the same `f64`, always with a decimal point (`0.0`, `1020.0`).
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use hog_core::{BatchResult, CellHistograms};
use log::{debug, info};

use crate::{RunError, RunResult};

/// Format one image's histograms as a comma-separated line (no newline)
pub fn format_line(hist: &CellHistograms) -> String {
    let values: Vec<String> = hist.as_flat().iter().map(|v| format!("{v:?}")).collect();
    values.join(",")
}

/// Write every image of `batch` to `out`, one line each
pub fn write_batch<W: Write>(out: &mut W, batch: &BatchResult) -> io::Result<()> {
    for hist in batch {
        writeln!(out, "{}", format_line(hist))?;
    }
    Ok(())
}

/// Write `batch` to `path`, replacing it only once the whole file is on disk.
///
/// The text is rendered in memory, written to a sibling temporary file,
/// synced, then renamed over `path`. On failure the temporary file is removed
/// and an existing `path` is left untouched.
pub fn write_results(path: &Path, batch: &BatchResult) -> RunResult<()> {
    let mut buf = Vec::new();
    write_batch(&mut buf, batch).map_err(|source| RunError::Write {
        path: path.to_path_buf(),
        source,
    })?;

    let tmp = temp_path(path);
    debug!("staging {} bytes in {}", buf.len(), tmp.display());
    if let Err(source) = replace_with(&tmp, path, &buf) {
        let _ = fs::remove_file(&tmp);
        return Err(RunError::Write {
            path: path.to_path_buf(),
            source,
        });
    }

    info!("wrote {} descriptors to {}", batch.len(), path.display());
    Ok(())
}

fn replace_with(tmp: &Path, path: &Path, contents: &[u8]) -> io::Result<()> {
    let mut file = fs::File::create(tmp)?;
    file.write_all(contents)?;
    file.sync_all()?;
    drop(file);
    fs::rename(tmp, path)
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "hog-output".into());
    name.push(".tmp");
    path.with_file_name(name)
}

/// Parse one output line back into its values; `line_no` labels errors
pub fn parse_line(line: &str, line_no: usize) -> RunResult<Vec<f64>> {
    line.split(',')
        .map(|value| {
            value.trim().parse::<f64>().map_err(|source| RunError::Parse {
                line: line_no,
                value: value.to_string(),
                source,
            })
        })
        .collect()
}

/// Read a results file written by [`write_results`]
pub fn read_results(path: &Path) -> RunResult<Vec<Vec<f64>>> {
    let content = fs::read_to_string(path).map_err(|source| RunError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    content
        .lines()
        .enumerate()
        .map(|(i, line)| parse_line(line, i + 1))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sample_histograms(seed: f64) -> CellHistograms {
        let mut hist = CellHistograms::zeros(2, 2, 3);
        for cell in 0..4 {
            for bin in 0..3 {
                hist.accumulate(cell, bin, seed * (cell * 3 + bin) as f64 / 7.0);
            }
        }
        hist
    }

    #[test]
    fn test_format_line() {
        let mut hist = CellHistograms::zeros(2, 1, 2);
        hist.accumulate(0, 1, 1020.0);
        hist.accumulate(1, 0, 0.5);
        assert_eq!(format_line(&hist), "0.0,1020.0,0.5,0.0");
    }

    #[test]
    fn test_no_trailing_comma() {
        let mut out = Vec::new();
        let batch: BatchResult = vec![sample_histograms(1.0), sample_histograms(2.0)]
            .into_iter()
            .collect();
        write_batch(&mut out, &batch).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        for line in lines {
            assert!(!line.ends_with(','));
            assert_eq!(line.matches(',').count(), 4 * 3 - 1);
        }
        assert!(text.ends_with('\n'));
    }

    #[test]
    fn test_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("output.txt");
        let batch: BatchResult = (1..=3).map(|i| sample_histograms(i as f64 * 1.37)).collect();

        write_results(&path, &batch).unwrap();
        let parsed = read_results(&path).unwrap();

        assert_eq!(parsed.len(), batch.len());
        for (values, hist) in parsed.iter().zip(&batch) {
            assert_eq!(values.len(), hist.as_flat().len());
            for (&a, &b) in values.iter().zip(hist.as_flat()) {
                assert_relative_eq!(a, b);
            }
        }
        assert!(!temp_path(&path).exists());
    }

    #[test]
    fn test_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("output.txt");
        fs::write(&path, "stale\n").unwrap();

        let batch: BatchResult = std::iter::once(sample_histograms(1.0)).collect();
        write_results(&path, &batch).unwrap();

        let parsed = read_results(&path).unwrap();
        assert_eq!(parsed.len(), 1);
    }

    #[test]
    fn test_unwritable_destination() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no_such_dir").join("output.txt");
        let batch: BatchResult = std::iter::once(sample_histograms(1.0)).collect();

        let result = write_results(&path, &batch);
        assert!(matches!(result, Err(RunError::Write { .. })));
        assert!(!path.exists());
    }

    #[test]
    fn test_parse_error_reports_line() {
        let result = parse_line("1.0,abc,2.0", 7);
        match result {
            Err(RunError::Parse { line, value, .. }) => {
                assert_eq!(line, 7);
                assert_eq!(value, "abc");
            }
            other => panic!("expected parse error, got {:?}", other),
        }
    }
}
