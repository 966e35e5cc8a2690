use crate::error::{LabelerError, Result};

// ---------------------------------------------------------------------------
// Matrix – one parsed data file
// ---------------------------------------------------------------------------

/// Dense row-major matrix of intensities (rows × columns).
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    values: Vec<f64>,
}

impl Matrix {
    /// Build from row vectors. All rows must have the same length.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Option<Self> {
        let n_rows = rows.len();
        let n_cols = rows.first().map_or(0, Vec::len);
        if rows.iter().any(|r| r.len() != n_cols) {
            return None;
        }
        let values = rows.into_iter().flatten().collect();
        Some(Matrix {
            rows: n_rows,
            cols: n_cols,
            values,
        })
    }

    /// `(rows, columns)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.values[row * self.cols + col]
    }

    pub fn row(&self, row: usize) -> &[f64] {
        &self.values[row * self.cols..(row + 1) * self.cols]
    }

    /// Nested row vectors, the layout used in the export record.
    pub fn to_nested(&self) -> Vec<Vec<f64>> {
        (0..self.rows).map(|r| self.row(r).to_vec()).collect()
    }

    /// Split into `n` equal-width column chunks, left to right.
    ///
    /// Fails unless the column count is a multiple of `n`.
    pub fn split_columns(&self, n: usize) -> Result<Vec<Matrix>> {
        if n == 0 || self.cols % n != 0 {
            return Err(LabelerError::ShapeMismatch {
                columns: self.cols,
                segments: n,
            });
        }
        let width = self.cols / n;
        let chunks = (0..n)
            .map(|i| {
                let start = i * width;
                let values = (0..self.rows)
                    .flat_map(|r| self.row(r)[start..start + width].iter().copied())
                    .collect();
                Matrix {
                    rows: self.rows,
                    cols: width,
                    values,
                }
            })
            .collect();
        Ok(chunks)
    }

    /// Inverse of [`Matrix::split_columns`]. Returns `None` when the row
    /// counts differ or `parts` is empty.
    pub fn concat_columns(parts: &[Matrix]) -> Option<Matrix> {
        let rows = parts.first()?.rows;
        if parts.iter().any(|p| p.rows != rows) {
            return None;
        }
        let cols = parts.iter().map(|p| p.cols).sum();
        let mut values = Vec::with_capacity(rows * cols);
        for r in 0..rows {
            for p in parts {
                values.extend_from_slice(p.row(r));
            }
        }
        Some(Matrix { rows, cols, values })
    }
}

// ---------------------------------------------------------------------------
// Segments – the split of the current record
// ---------------------------------------------------------------------------

/// The current file split into its labelled segments.
#[derive(Debug, Clone)]
pub struct Segments {
    /// File name shown in the title bar.
    pub name: String,
    /// Source matrix as parsed.
    pub record: Matrix,
    /// `record` split column-wise, left to right.
    pub parts: Vec<Matrix>,
}
