//! Economic stage: technical coefficients and the Leontief and Ghosh inverses.

mod error;

pub use error::{EconomyError, InverseKind};

use std::sync::{Arc, OnceLock};

use nalgebra::{DMatrix, DVector};
use serde::{Deserialize, Serialize};

use crate::support::{
    constraint::{Finite, StrictlyPositive, find_violation},
    matrix::{self, ShapeMismatch},
};

/// Validated intermediate-consumption table and gross output of one economy.
///
/// Derived matrices are computed on first request and cached. Construction
/// only validates; it never inverts anything, so a non-productive economy
/// is reported by [`leontief_inverse`](Self::leontief_inverse) or
/// [`ghosh_inverse`](Self::ghosh_inverse) rather than by [`new`](Self::new).
#[derive(Debug)]
pub struct EconomicModel {
    z: DMatrix<f64>,
    x: DVector<f64>,
    technical: OnceLock<DMatrix<f64>>,
    allocation: OnceLock<DMatrix<f64>>,
    leontief: OnceLock<Result<Arc<DMatrix<f64>>, EconomyError>>,
    ghosh: OnceLock<Result<Arc<DMatrix<f64>>, EconomyError>>,
}

/// Economy-wide multipliers of a single sector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SectorMultipliers {
    pub sector: usize,
    /// Column sum of `L`: total output across the economy per unit of final
    /// demand for this sector.
    pub output_multiplier: f64,
    /// Row sum of `G`: total output enabled downstream per unit of primary
    /// input into this sector.
    pub distribution_multiplier: f64,
}

impl EconomicModel {
    /// Validates `Z` (N×N) and `x` (length N).
    ///
    /// # Errors
    ///
    /// - [`EconomyError::ShapeMismatch`] if `z` is not square or `x` has the wrong length.
    /// - [`EconomyError::NoSectors`] if `N` is zero.
    /// - [`EconomyError::InvalidEntry`] if a flow is negative or not finite.
    /// - [`EconomyError::NonFiniteOutput`] if a gross output is infinite or `NaN`.
    /// - [`EconomyError::NonPositiveOutput`] if a gross output is not strictly positive.
    pub fn new(z: DMatrix<f64>, x: DVector<f64>) -> Result<Self, EconomyError> {
        let n = z.nrows();

        if z.ncols() != n {
            return Err(ShapeMismatch {
                operand: "Z",
                expected: (n, n),
                actual: z.shape(),
            }
            .into());
        }
        if x.len() != n {
            return Err(ShapeMismatch {
                operand: "x",
                expected: (n, 1),
                actual: (x.len(), 1),
            }
            .into());
        }
        if n == 0 {
            return Err(EconomyError::NoSectors);
        }
        if let Some(entry) = matrix::first_invalid_entry("Z", &z) {
            return Err(entry.into());
        }
        if let Some((sector, _)) = find_violation::<Finite, f64>(x.iter()) {
            return Err(EconomyError::NonFiniteOutput {
                sector,
                value: x[sector],
            });
        }
        if let Some((sector, _)) = find_violation::<StrictlyPositive, f64>(x.iter()) {
            return Err(EconomyError::NonPositiveOutput {
                sector,
                value: x[sector],
            });
        }

        Ok(Self {
            z,
            x,
            technical: OnceLock::new(),
            allocation: OnceLock::new(),
            leontief: OnceLock::new(),
            ghosh: OnceLock::new(),
        })
    }

    /// Number of production sectors `N`.
    #[must_use]
    pub fn sectors(&self) -> usize {
        self.x.len()
    }

    /// Intermediate-consumption matrix `Z`.
    #[must_use]
    pub fn intermediate_consumption(&self) -> &DMatrix<f64> {
        &self.z
    }

    /// Gross-output vector `x`.
    #[must_use]
    pub fn gross_output(&self) -> &DVector<f64> {
        &self.x
    }

    /// Technical coefficients `A = Z · diag(x)⁻¹`.
    pub fn technical_coefficients(&self) -> &DMatrix<f64> {
        self.technical
            .get_or_init(|| matrix::divide_columns(&self.z, &self.x))
    }

    /// Allocation (distribution) coefficients `B = diag(x)⁻¹ · Z`.
    pub fn allocation_coefficients(&self) -> &DMatrix<f64> {
        self.allocation
            .get_or_init(|| matrix::divide_rows(&self.z, &self.x))
    }

    /// Leontief inverse `L = (I − A)⁻¹`.
    ///
    /// # Errors
    ///
    /// Returns [`EconomyError::SingularEconomy`] with [`InverseKind::Leontief`]
    /// if `I − A` is singular.
    pub fn leontief_inverse(&self) -> Result<&DMatrix<f64>, EconomyError> {
        match self.leontief_cell() {
            Ok(l) => Ok(&**l),
            Err(err) => Err(err.clone()),
        }
    }

    /// Ghosh inverse `G = (I − B)⁻¹`.
    ///
    /// # Errors
    ///
    /// Returns [`EconomyError::SingularEconomy`] with [`InverseKind::Ghosh`]
    /// if `I − B` is singular.
    pub fn ghosh_inverse(&self) -> Result<&DMatrix<f64>, EconomyError> {
        match self.ghosh_cell() {
            Ok(g) => Ok(&**g),
            Err(err) => Err(err.clone()),
        }
    }

    /// Output and distribution multipliers of `sector`.
    ///
    /// # Errors
    ///
    /// Returns [`EconomyError::IndexOutOfRange`] for an unknown sector, or a
    /// singular-economy error if either inverse does not exist.
    pub fn sector_multipliers(&self, sector: usize) -> Result<SectorMultipliers, EconomyError> {
        if sector >= self.sectors() {
            return Err(EconomyError::IndexOutOfRange {
                index: sector,
                sectors: self.sectors(),
            });
        }

        Ok(SectorMultipliers {
            sector,
            output_multiplier: self.leontief_inverse()?.column(sector).sum(),
            distribution_multiplier: self.ghosh_inverse()?.row(sector).sum(),
        })
    }

    pub(crate) fn shared_leontief(&self) -> Result<Arc<DMatrix<f64>>, EconomyError> {
        self.leontief_cell().clone()
    }

    pub(crate) fn shared_ghosh(&self) -> Result<Arc<DMatrix<f64>>, EconomyError> {
        self.ghosh_cell().clone()
    }

    fn leontief_cell(&self) -> &Result<Arc<DMatrix<f64>>, EconomyError> {
        self.leontief.get_or_init(|| {
            invert_complement(self.technical_coefficients(), InverseKind::Leontief)
        })
    }

    fn ghosh_cell(&self) -> &Result<Arc<DMatrix<f64>>, EconomyError> {
        self.ghosh.get_or_init(|| {
            invert_complement(self.allocation_coefficients(), InverseKind::Ghosh)
        })
    }
}

/// Solves `(I − m)⁻¹`.
fn invert_complement(
    m: &DMatrix<f64>,
    inverse: InverseKind,
) -> Result<Arc<DMatrix<f64>>, EconomyError> {
    let n = m.nrows();
    let complement = DMatrix::identity(n, n) - m;

    match matrix::solve_inverse(complement) {
        Some(solved) => {
            tracing::debug!(?inverse, sectors = n, "solved inverse");
            Ok(Arc::new(solved))
        }
        None => {
            tracing::debug!(?inverse, sectors = n, "inverse is singular");
            Err(EconomyError::SingularEconomy { inverse })
        }
    }
}
