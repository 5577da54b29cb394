//! Element-wise comparison of an exact result against a simulated one.

use ndarray::{ArrayView1, ArrayView2};
use serde::Serialize;

use crate::error::ReportError;

/// Shape of the compared quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Shape {
    /// A probability vector over states.
    Vector { len: usize },
    /// A matrix, e.g. transient x absorbing.
    Matrix { rows: usize, cols: usize },
}

/// One compared element.
///
/// `row` and `col` are 1-indexed state labels; `col` is absent for vectors.
/// `difference` is `simulated - exact`, unrounded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonCell {
    pub row: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub col: Option<usize>,
    pub exact: f64,
    pub simulated: f64,
    pub difference: f64,
}

/// Structured diff of an exact result and a simulated result of equal shape.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    shape: Shape,
    cells: Vec<ComparisonCell>,
}

impl Comparison {
    /// Compares two vectors. Cell `i` is labelled state `i + 1`.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::ShapeMismatch`] if the lengths differ.
    pub fn vectors(
        exact: ArrayView1<'_, f64>,
        simulated: ArrayView1<'_, f64>,
    ) -> Result<Self, ReportError> {
        if exact.len() != simulated.len() {
            return Err(ReportError::ShapeMismatch {
                exact: (exact.len(), 1),
                simulated: (simulated.len(), 1),
            });
        }
        let cells = exact
            .iter()
            .zip(simulated.iter())
            .enumerate()
            .map(|(i, (&e, &s))| ComparisonCell {
                row: i + 1,
                col: None,
                exact: e,
                simulated: s,
                difference: s - e,
            })
            .collect();
        Ok(Self {
            shape: Shape::Vector { len: exact.len() },
            cells,
        })
    }

    /// Compares two matrices. Cell `(i, j)` is labelled `(i + 1, j + 1)`
    /// until relabelled with [`Comparison::with_labels`].
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::ShapeMismatch`] if the shapes differ.
    pub fn matrices(
        exact: ArrayView2<'_, f64>,
        simulated: ArrayView2<'_, f64>,
    ) -> Result<Self, ReportError> {
        if exact.dim() != simulated.dim() {
            return Err(ReportError::ShapeMismatch {
                exact: exact.dim(),
                simulated: simulated.dim(),
            });
        }
        let (rows, cols) = exact.dim();
        let cells = exact
            .indexed_iter()
            .map(|((i, j), &e)| {
                let s = simulated[[i, j]];
                ComparisonCell {
                    row: i + 1,
                    col: Some(j + 1),
                    exact: e,
                    simulated: s,
                    difference: s - e,
                }
            })
            .collect();
        Ok(Self {
            shape: Shape::Matrix { rows, cols },
            cells,
        })
    }

    /// Replaces the default labels with 1-indexed state labels.
    ///
    /// For vectors only `row_labels` is used and `col_labels` must be empty.
    ///
    /// # Errors
    ///
    /// Returns [`ReportError::LabelMismatch`] if a label list has the wrong
    /// length.
    pub fn with_labels(
        mut self,
        row_labels: &[usize],
        col_labels: &[usize],
    ) -> Result<Self, ReportError> {
        let (rows, cols) = match self.shape {
            Shape::Vector { len } => (len, 0),
            Shape::Matrix { rows, cols } => (rows, cols),
        };
        if row_labels.len() != rows {
            return Err(ReportError::LabelMismatch {
                axis: "row",
                expected: rows,
                got: row_labels.len(),
            });
        }
        if col_labels.len() != cols {
            return Err(ReportError::LabelMismatch {
                axis: "column",
                expected: cols,
                got: col_labels.len(),
            });
        }
        // Cells are row-major, so position alone gives (i, j).
        let stride = cols.max(1);
        for (k, cell) in self.cells.iter_mut().enumerate() {
            cell.row = row_labels[k / stride];
            if cols > 0 {
                cell.col = Some(col_labels[k % cols]);
            }
        }
        Ok(self)
    }

    /// Shape of the compared quantity.
    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// Every compared element, row-major.
    pub fn cells(&self) -> &[ComparisonCell] {
        &self.cells
    }

    /// Largest `|simulated - exact|` over all cells; 0 for an empty comparison.
    pub fn max_abs_difference(&self) -> f64 {
        self.cells
            .iter()
            .fold(0.0_f64, |acc, c| acc.max(c.difference.abs()))
    }
}
