use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::model::Matrix;
use crate::error::{LabelerError, Result};

// ---------------------------------------------------------------------------
// Export record
// ---------------------------------------------------------------------------

/// The saved labelling of one input file.
///
/// ```json
/// { "data": [[[71.2, ...], ...], ...], "label": ["hum", "", ...] }
/// ```
///
/// `data[i]` is segment `i` as nested rows; `label[i]` is its label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportRecord {
    pub data: Vec<Vec<Vec<f64>>>,
    pub label: Vec<String>,
}

impl ExportRecord {
    /// Pair segments with labels positionally. Lengths must match.
    pub fn new(parts: &[Matrix], labels: &[String]) -> Result<Self> {
        if parts.len() != labels.len() {
            return Err(LabelerError::LabelCountMismatch {
                labels: labels.len(),
                segments: parts.len(),
            });
        }
        Ok(ExportRecord {
            data: parts.iter().map(Matrix::to_nested).collect(),
            label: labels.to_vec(),
        })
    }
}

/// Output stem for an input file: its file name up to the first `.`.
pub fn base_name(input: &Path) -> String {
    let name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    match name.split_once('.') {
        Some((stem, _)) => stem.to_string(),
        None => name,
    }
}

/// Write `record` to `<output_dir>/<base>.json`.
pub fn write_record(output_dir: &Path, base: &str, record: &ExportRecord) -> Result<PathBuf> {
    let path = output_dir.join(format!("{base}.json"));
    if path.exists() {
        log::warn!("Overwriting existing {}", path.display());
    }
    let content = serde_json::to_string(record).map_err(|e| LabelerError::Write {
        path: path.clone(),
        source: io::Error::other(e),
    })?;
    write_atomic(&path, &content).map_err(|source| LabelerError::Write {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}

/// Save the rendered panel row as `<output_dir>/<base>.png`.
pub fn write_preview(output_dir: &Path, base: &str, image: &image::RgbaImage) -> Result<PathBuf> {
    let path = output_dir.join(format!("{base}.png"));
    image
        .save_with_format(&path, image::ImageFormat::Png)
        .map_err(|e| LabelerError::Write {
            path: path.clone(),
            source: io::Error::other(e),
        })?;
    Ok(path)
}

/// Write through a `.tmp` sibling and rename, so a failed save never
/// leaves a truncated target behind.
fn write_atomic(path: &Path, content: &str) -> io::Result<()> {
    let temp_path = path.with_extension("json.tmp");

    if let Err(e) = fs::write(&temp_path, content) {
        let _ = fs::remove_file(&temp_path);
        return Err(e);
    }

    if let Err(e) = fs::rename(&temp_path, path) {
        let _ = fs::remove_file(&temp_path);
        return Err(e);
    }

    Ok(())
}
