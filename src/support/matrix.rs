//! Dense matrix helpers shared by the input-output models.
//!
//! All tables are stored as [`nalgebra`] `DMatrix<f64>` / `DVector<f64>`.
//! This module holds the shape contract loaders must satisfy
//! ([`from_rows`], [`ShapeMismatch`]), entry validation
//! ([`first_invalid_entry`]), the diagonal scalings used throughout IO
//! analysis, and the LU-based inverse solve.

use nalgebra::{DMatrix, DVector};
use thiserror::Error;

use crate::support::constraint::{Constraint, ConstraintError, Finite, NonNegative};

/// A matrix or vector whose dimensions disagree with a related input.
///
/// Shapes are `(rows, cols)`; vectors report `(len, 1)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{operand} has shape {actual:?}, expected {expected:?}")]
pub struct ShapeMismatch {
    /// Name of the offending input (e.g. `"Z"`, `"x"`, `"D1"`).
    pub operand: &'static str,
    /// Shape required by the related inputs.
    pub expected: (usize, usize),
    /// Shape actually supplied.
    pub actual: (usize, usize),
}

/// A matrix cell that violates the non-negative, finite entry contract.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("{operand}[{row}, {col}] = {value} is invalid: {reason}")]
pub struct InvalidEntry {
    pub operand: &'static str,
    pub row: usize,
    pub col: usize,
    pub value: f64,
    #[source]
    pub reason: ConstraintError,
}

/// Builds a matrix from row-major nested vectors, refusing ragged input.
///
/// An empty slice yields a `0 × 0` matrix.
///
/// # Errors
///
/// Returns [`ShapeMismatch`] naming the first row whose length differs from
/// the first row's length.
///
/// # Example
///
/// ```
/// use io_footprint::support::matrix::from_rows;
///
/// let z = from_rows("Z", &[vec![10.0, 20.0], vec![30.0, 40.0]]).unwrap();
/// assert_eq!(z[(1, 0)], 30.0);
///
/// assert!(from_rows("Z", &[vec![10.0, 20.0], vec![30.0]]).is_err());
/// ```
pub fn from_rows(operand: &'static str, rows: &[Vec<f64>]) -> Result<DMatrix<f64>, ShapeMismatch> {
    let nrows = rows.len();
    let ncols = rows.first().map_or(0, Vec::len);

    if let Some(bad) = rows.iter().find(|row| row.len() != ncols) {
        return Err(ShapeMismatch {
            operand,
            expected: (nrows, ncols),
            actual: (nrows, bad.len()),
        });
    }

    Ok(DMatrix::from_fn(nrows, ncols, |i, j| rows[i][j]))
}

/// Returns the first cell that is negative, infinite or `NaN`.
#[must_use]
pub fn first_invalid_entry(operand: &'static str, m: &DMatrix<f64>) -> Option<InvalidEntry> {
    let nrows = m.nrows();
    m.iter().enumerate().find_map(|(index, value)| {
        let reason = Finite::check(value)
            .and_then(|()| NonNegative::check(value))
            .err()?;
        // nalgebra storage is column-major.
        Some(InvalidEntry {
            operand,
            row: index % nrows,
            col: index / nrows,
            value: *value,
            reason,
        })
    })
}

/// Computes `m · diag(divisors)⁻¹`, dividing column `j` by `divisors[j]`.
#[must_use]
pub fn divide_columns(m: &DMatrix<f64>, divisors: &DVector<f64>) -> DMatrix<f64> {
    DMatrix::from_fn(m.nrows(), m.ncols(), |i, j| m[(i, j)] / divisors[j])
}

/// Computes `diag(divisors)⁻¹ · m`, dividing row `i` by `divisors[i]`.
#[must_use]
pub fn divide_rows(m: &DMatrix<f64>, divisors: &DVector<f64>) -> DMatrix<f64> {
    DMatrix::from_fn(m.nrows(), m.ncols(), |i, j| m[(i, j)] / divisors[i])
}

/// Solves `m · X = I` by LU decomposition with partial pivoting.
///
/// Returns `None` when `m` is singular or numerically so: a pivot no larger
/// than `n · ε` times the largest pivot, or a non-finite solution.
#[must_use]
pub fn solve_inverse(m: DMatrix<f64>) -> Option<DMatrix<f64>> {
    let n = m.nrows();
    if n == 0 || n != m.ncols() {
        return None;
    }

    let lu = m.lu();
    let pivots = lu.u().diagonal();
    let largest = pivots.amax();
    let cutoff = largest * f64::EPSILON * n as f64;
    if largest == 0.0 || !largest.is_finite() || pivots.iter().any(|p| p.abs() <= cutoff) {
        return None;
    }

    let inverse = lu.solve(&DMatrix::identity(n, n))?;
    inverse.iter().all(|v| v.is_finite()).then_some(inverse)
}

/// Row sums of `m` as a column vector.
#[must_use]
pub fn row_sums(m: &DMatrix<f64>) -> DVector<f64> {
    DVector::from_fn(m.nrows(), |i, _| m.row(i).sum())
}

/// Column sums of `m` as a column vector.
#[must_use]
pub fn column_sums(m: &DMatrix<f64>) -> DVector<f64> {
    DVector::from_fn(m.ncols(), |j, _| m.column(j).sum())
}

/// Sums the selected rows of `m` into a single column vector of length `ncols`.
#[must_use]
pub fn sum_rows(m: &DMatrix<f64>, rows: impl IntoIterator<Item = usize>) -> DVector<f64> {
    rows.into_iter()
        .fold(DVector::zeros(m.ncols()), |acc, k| acc + m.row(k).transpose())
}

/// Largest absolute elementwise difference between two same-shaped matrices.
#[must_use]
pub fn max_abs_deviation(a: &DMatrix<f64>, b: &DMatrix<f64>) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y).abs())
        .fold(0.0, f64::max)
}
