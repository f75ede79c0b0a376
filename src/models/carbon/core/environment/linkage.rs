//! Per-group intensities, environmental multipliers and linkage indices.

use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};

use crate::support::matrix;

use super::EnvironmentError;

/// Threshold above which a linkage index counts as "above average".
pub const DEFAULT_KEY_THRESHOLD: f64 = 1.0;

/// Aggregated pressure of one indicator group and its intensity per unit output.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupIntensity {
    /// `Γ`: the group's rows of `D1` summed per sector.
    pub pressure: DVector<f64>,
    /// `α`: `Γ ⊘ x`, the diagonal of the intensity matrix.
    pub coefficients: DVector<f64>,
}

impl GroupIntensity {
    /// The diagonal intensity matrix `diag(α)`.
    #[must_use]
    pub fn coefficient_matrix(&self) -> DMatrix<f64> {
        DMatrix::from_diagonal(&self.coefficients)
    }
}

/// Position of a sector on the backward and forward linkage axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkageClass {
    /// Above threshold on both axes.
    Key,
    /// Above threshold only on the backward (demand) axis.
    BackwardDriven,
    /// Above threshold only on the forward (supply) axis.
    ForwardDriven,
    /// Above threshold on neither axis.
    Weak,
}

impl LinkageClass {
    /// Classifies a `(BL, FL)` pair against `threshold`.
    #[must_use]
    pub fn classify(backward: f64, forward: f64, threshold: f64) -> Self {
        match (backward > threshold, forward > threshold) {
            (true, true) => Self::Key,
            (true, false) => Self::BackwardDriven,
            (false, true) => Self::ForwardDriven,
            (false, false) => Self::Weak,
        }
    }
}

/// Full linkage analysis of one indicator group.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupAnalysis {
    rows: Vec<usize>,
    intensity: GroupIntensity,
    backward_multipliers: DMatrix<f64>,
    forward_multipliers: DMatrix<f64>,
    backward_index: DVector<f64>,
    forward_index: DVector<f64>,
}

impl GroupAnalysis {
    /// Runs the analysis for the `rows` of `pressures`.
    ///
    /// `rows` must already be validated against the indicator count.
    pub(crate) fn compute(
        group: &str,
        rows: impl IntoIterator<Item = usize>,
        pressures: &DMatrix<f64>,
        gross_output: &DVector<f64>,
        leontief: &DMatrix<f64>,
        ghosh: &DMatrix<f64>,
    ) -> Result<Self, EnvironmentError> {
        let rows: Vec<usize> = rows.into_iter().collect();
        let n = gross_output.len();

        let pressure = matrix::sum_rows(pressures, rows.iter().copied());
        let coefficients = pressure.component_div(gross_output);

        // α · L scales row i by α[i]; G · αᵗ scales column j by α[j].
        let backward_multipliers = DMatrix::from_fn(n, n, |i, j| coefficients[i] * leontief[(i, j)]);
        let forward_multipliers = DMatrix::from_fn(n, n, |i, j| ghosh[(i, j)] * coefficients[j]);

        let backward_total = backward_multipliers.sum();
        let forward_total = forward_multipliers.sum();
        if !(backward_total > 0.0 && forward_total > 0.0) {
            return Err(EnvironmentError::DegenerateGroup {
                group: group.to_string(),
            });
        }

        let sectors = n as f64;
        let backward_index = matrix::row_sums(&backward_multipliers) / (backward_total / sectors);
        let forward_index = matrix::column_sums(&forward_multipliers) / (forward_total / sectors);

        tracing::debug!(group, rows = ?rows, "analysed indicator group");

        Ok(Self {
            rows,
            intensity: GroupIntensity {
                pressure,
                coefficients,
            },
            backward_multipliers,
            forward_multipliers,
            backward_index,
            forward_index,
        })
    }

    /// Indicator rows aggregated by this analysis, ascending.
    #[must_use]
    pub fn rows(&self) -> &[usize] {
        &self.rows
    }

    /// Aggregated pressure `Γ` and intensity `α`.
    #[must_use]
    pub fn intensity(&self) -> &GroupIntensity {
        &self.intensity
    }

    /// Backward environmental multipliers `α · L`.
    ///
    /// Entry `(i, j)` is the group pressure emitted by sector `i` per unit of
    /// final demand for sector `j`.
    #[must_use]
    pub fn backward_multipliers(&self) -> &DMatrix<f64> {
        &self.backward_multipliers
    }

    /// Forward environmental multipliers `G · αᵗ`.
    #[must_use]
    pub fn forward_multipliers(&self) -> &DMatrix<f64> {
        &self.forward_multipliers
    }

    /// Backward linkage index `BL`, normalized to mean 1.
    #[must_use]
    pub fn backward_index(&self) -> &DVector<f64> {
        &self.backward_index
    }

    /// Forward linkage index `FL`, normalized to mean 1.
    #[must_use]
    pub fn forward_index(&self) -> &DVector<f64> {
        &self.forward_index
    }

    /// Sectors with both `BL > threshold` and `FL > threshold`, ascending.
    #[must_use]
    pub fn key_sectors(&self, threshold: f64) -> Vec<usize> {
        self.backward_index
            .iter()
            .zip(self.forward_index.iter())
            .enumerate()
            .filter(|(_, (bl, fl))| **bl > threshold && **fl > threshold)
            .map(|(sector, _)| sector)
            .collect()
    }

    /// Linkage class of `sector` at [`DEFAULT_KEY_THRESHOLD`].
    ///
    /// Returns `None` if `sector` is out of range.
    #[must_use]
    pub fn linkage_class(&self, sector: usize) -> Option<LinkageClass> {
        let backward = self.backward_index.get(sector)?;
        let forward = self.forward_index.get(sector)?;
        Some(LinkageClass::classify(
            *backward,
            *forward,
            DEFAULT_KEY_THRESHOLD,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification() {
        assert_eq!(LinkageClass::classify(1.2, 1.1, 1.0), LinkageClass::Key);
        assert_eq!(
            LinkageClass::classify(1.2, 0.9, 1.0),
            LinkageClass::BackwardDriven
        );
        assert_eq!(
            LinkageClass::classify(0.8, 1.5, 1.0),
            LinkageClass::ForwardDriven
        );
        // The threshold itself is not above average.
        assert_eq!(LinkageClass::classify(1.0, 1.0, 1.0), LinkageClass::Weak);
    }

    #[test]
    fn coefficient_matrix_is_diagonal() {
        let intensity = GroupIntensity {
            pressure: DVector::from_vec(vec![60.0, 120.0]),
            coefficients: DVector::from_vec(vec![0.6, 0.6]),
        };
        let alpha = intensity.coefficient_matrix();
        assert_eq!(alpha, DMatrix::from_row_slice(2, 2, &[0.6, 0.0, 0.0, 0.6]));
    }

    #[test]
    fn zero_pressure_group_is_degenerate() {
        let pressures = DMatrix::from_row_slice(1, 2, &[0.0, 0.0]);
        let x = DVector::from_vec(vec![100.0, 200.0]);
        let identity = DMatrix::identity(2, 2);

        let err = GroupAnalysis::compute("water", [0], &pressures, &x, &identity, &identity)
            .unwrap_err();
        assert_eq!(
            err,
            EnvironmentError::DegenerateGroup {
                group: "water".into()
            }
        );
    }

    #[test]
    fn negative_multipliers_are_degenerate() {
        // Inverses of a non-productive economy can be negative everywhere.
        let pressures = DMatrix::from_row_slice(1, 2, &[50.0, 100.0]);
        let x = DVector::from_vec(vec![100.0, 100.0]);
        let inverse = DMatrix::from_row_slice(2, 2, &[-0.8, -1.2, -1.2, -0.8]);

        let err = GroupAnalysis::compute("ghg", [0], &pressures, &x, &inverse, &inverse)
            .unwrap_err();
        assert_eq!(
            err,
            EnvironmentError::DegenerateGroup {
                group: "ghg".into()
            }
        );
        assert_eq!(
            err.to_string(),
            "linkage totals of indicator group `ghg` are not positive"
        );
    }
}
