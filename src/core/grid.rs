use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Row-major grid of scalar samples displayed by images and contour sets.
///
/// Row `0` is the first row of the data; images draw it at the top of the
/// axis, the way raster images are laid out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueGrid {
    rows: usize,
    cols: usize,
    values: Vec<f64>,
}

impl ValueGrid {
    /// Builds a grid from row-major values.
    ///
    /// Non-finite samples are accepted and treated as masked cells.
    pub fn new(rows: usize, cols: usize, values: Vec<f64>) -> ChartResult<Self> {
        if rows == 0 || cols == 0 {
            return Err(ChartError::InvalidData(
                "grid must have at least one row and one column".to_owned(),
            ));
        }
        let expected = rows.checked_mul(cols).ok_or_else(|| {
            ChartError::InvalidData("grid dimensions overflow".to_owned())
        })?;
        if values.len() != expected {
            return Err(ChartError::InvalidData(format!(
                "grid expects {expected} values for {rows}x{cols}, got {}",
                values.len()
            )));
        }
        Ok(Self { rows, cols, values })
    }

    /// Builds a grid by evaluating `f(row, col)` for every cell.
    pub fn from_fn(
        rows: usize,
        cols: usize,
        mut f: impl FnMut(usize, usize) -> f64,
    ) -> ChartResult<Self> {
        let mut values = Vec::with_capacity(rows.saturating_mul(cols));
        for row in 0..rows {
            for col in 0..cols {
                values.push(f(row, col));
            }
        }
        Self::new(rows, cols, values)
    }

    /// Builds a grid from nested rows; every row must have the same length.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> ChartResult<Self> {
        let row_count = rows.len();
        let cols = rows.first().map_or(0, Vec::len);
        if rows.iter().any(|row| row.len() != cols) {
            return Err(ChartError::InvalidData(
                "grid rows must have equal length".to_owned(),
            ));
        }
        Self::new(row_count, cols, rows.into_iter().flatten().collect())
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.values.get(row * self.cols + col).copied()
    }

    /// Returns `(min, max)` over finite samples, or `None` when every sample is masked.
    #[must_use]
    pub fn finite_range(&self) -> Option<(f64, f64)> {
        self.values
            .iter()
            .copied()
            .filter(|value| value.is_finite())
            .fold(None, |range, value| match range {
                None => Some((value, value)),
                Some((min, max)) => Some((min.min(value), max.max(value))),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::ValueGrid;

    #[test]
    fn finite_range_skips_masked_cells() {
        let grid = ValueGrid::new(2, 2, vec![f64::NAN, -3.0, 4.5, f64::INFINITY]).expect("grid");
        assert_eq!(grid.finite_range(), Some((-3.0, 4.5)));
    }

    #[test]
    fn fully_masked_grid_has_no_range() {
        let grid = ValueGrid::new(1, 2, vec![f64::NAN, f64::NAN]).expect("grid");
        assert_eq!(grid.finite_range(), None);
    }

    #[test]
    fn mismatched_shapes_are_rejected() {
        assert!(ValueGrid::new(2, 3, vec![0.0; 5]).is_err());
        assert!(ValueGrid::new(0, 3, Vec::new()).is_err());
        assert!(ValueGrid::from_rows(vec![vec![1.0, 2.0], vec![3.0]]).is_err());
    }

    #[test]
    fn from_fn_is_row_major() {
        let grid = ValueGrid::from_fn(2, 3, |row, col| (row * 10 + col) as f64).expect("grid");
        assert_eq!(grid.get(1, 2), Some(12.0));
        assert_eq!(grid.values()[3], 10.0);
        assert_eq!(grid.get(2, 0), None);
    }
}
