use std::path::Path;

use anyhow::{Context, Result, bail};

use super::model::Matrix;

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Parse a spectrogram CSV into a [`Matrix`].
///
/// Layout:  one header row (its contents are ignored), then one line per
/// matrix row. Every cell must be a finite number (empty, `nan` and `inf`
/// cells are rejected) and every row must have the same width as the header.
///
/// ```text
/// f0,f1,f2,...
/// 71.2,88.0,64.9,...
/// ```
pub fn load_matrix(path: &Path) -> Result<Matrix> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .context("opening CSV")?;

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        let row = record
            .iter()
            .enumerate()
            .map(|(col, cell)| {
                let value = cell
                    .parse::<f64>()
                    .with_context(|| format!("Row {row_no}, column {col}: '{cell}' is not a number"))?;
                if !value.is_finite() {
                    bail!("Row {row_no}, column {col}: '{cell}' is not a finite number");
                }
                Ok(value)
            })
            .collect::<Result<Vec<f64>>>()?;
        rows.push(row);
    }

    if rows.is_empty() {
        bail!("file has no data rows");
    }

    Matrix::from_rows(rows).context("rows have different lengths")
}
