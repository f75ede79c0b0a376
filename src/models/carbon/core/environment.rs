//! Environmental extension: direct intensities, total multipliers and
//! per-group linkage analysis.
//!
//! Follows the satellite-account methodology of Miller & Blair (2009):
//! pressures are normalized by gross output (`D`), propagated through the
//! Leontief inverse (`D_a`), and aggregated into named indicator groups for
//! backward (Leontief) and forward (Ghosh) linkage indices.

mod error;
mod groups;
mod linkage;

pub use error::EnvironmentError;
pub use groups::IndicatorGroups;
pub use linkage::{DEFAULT_KEY_THRESHOLD, GroupAnalysis, GroupIntensity, LinkageClass};

pub(crate) use groups::validate_rows;

use std::{
    collections::{BTreeSet, HashMap},
    sync::{Arc, OnceLock},
};

use nalgebra::{DMatrix, DVector};

use crate::support::matrix::{self, ShapeMismatch};

use super::EconomicModel;

/// Environmental pressures attached to a solved economy.
///
/// Construction requires both economic inverses to exist, so every
/// operation here is infallible except for group lookups.
#[derive(Debug)]
pub struct EnvironmentalModel {
    economy: Arc<EconomicModel>,
    leontief: Arc<DMatrix<f64>>,
    ghosh: Arc<DMatrix<f64>>,
    pressures: DMatrix<f64>,
    groups: IndicatorGroups,
    direct: OnceLock<DMatrix<f64>>,
    total: OnceLock<DMatrix<f64>>,
    analyses: HashMap<String, OnceLock<Result<GroupAnalysis, EnvironmentError>>>,
}

impl EnvironmentalModel {
    /// Attaches raw pressures `D1` (M×N) and indicator groups to `economy`.
    ///
    /// # Errors
    ///
    /// - [`EnvironmentError::ShapeMismatch`] if `D1` does not have N columns.
    /// - [`EnvironmentError::InvalidEntry`] if a pressure is negative or not finite.
    /// - [`EnvironmentError::EmptyGroup`] or [`EnvironmentError::IndicatorOutOfRange`]
    ///   for an invalid group.
    /// - [`EnvironmentError::Economy`] if the Leontief or Ghosh inverse does not exist.
    pub fn new(
        economy: Arc<EconomicModel>,
        pressures: DMatrix<f64>,
        groups: IndicatorGroups,
    ) -> Result<Self, EnvironmentError> {
        let n = economy.sectors();

        if pressures.ncols() != n {
            return Err(ShapeMismatch {
                operand: "D1",
                expected: (pressures.nrows(), n),
                actual: pressures.shape(),
            }
            .into());
        }
        if let Some(entry) = matrix::first_invalid_entry("D1", &pressures) {
            return Err(entry.into());
        }
        groups.validate(pressures.nrows())?;

        let leontief = economy.shared_leontief()?;
        let ghosh = economy.shared_ghosh()?;

        let analyses = groups
            .names()
            .map(|name| (name.to_string(), OnceLock::new()))
            .collect();

        Ok(Self {
            economy,
            leontief,
            ghosh,
            pressures,
            groups,
            direct: OnceLock::new(),
            total: OnceLock::new(),
            analyses,
        })
    }

    /// The economy this extension is attached to.
    #[must_use]
    pub fn economy(&self) -> &Arc<EconomicModel> {
        &self.economy
    }

    /// Raw pressures `D1`.
    #[must_use]
    pub fn pressures(&self) -> &DMatrix<f64> {
        &self.pressures
    }

    /// Configured indicator groups.
    #[must_use]
    pub fn groups(&self) -> &IndicatorGroups {
        &self.groups
    }

    /// Number of indicators `M`.
    #[must_use]
    pub fn indicators(&self) -> usize {
        self.pressures.nrows()
    }

    /// Number of sectors `N`.
    #[must_use]
    pub fn sectors(&self) -> usize {
        self.pressures.ncols()
    }

    /// Leontief inverse of the underlying economy.
    #[must_use]
    pub fn leontief(&self) -> &DMatrix<f64> {
        &self.leontief
    }

    /// Ghosh inverse of the underlying economy.
    #[must_use]
    pub fn ghosh(&self) -> &DMatrix<f64> {
        &self.ghosh
    }

    /// Direct intensity `D = D1 · diag(x)⁻¹`: pressure per unit of output.
    pub fn direct_intensity(&self) -> &DMatrix<f64> {
        self.direct
            .get_or_init(|| matrix::divide_columns(&self.pressures, self.economy.gross_output()))
    }

    /// Total multipliers `D_a = D · L`: direct plus indirect pressure per
    /// unit of final demand.
    pub fn total_multipliers(&self) -> &DMatrix<f64> {
        self.total
            .get_or_init(|| self.direct_intensity() * &*self.leontief)
    }

    /// Economy-wide pressure per indicator reconstructed as `D · x`.
    #[must_use]
    pub fn total_pressures(&self) -> DVector<f64> {
        self.direct_intensity() * self.economy.gross_output()
    }

    /// Linkage analysis of a configured group, computed on first request.
    ///
    /// # Errors
    ///
    /// Returns [`EnvironmentError::UnknownGroup`] if `group` is not configured,
    /// or [`EnvironmentError::DegenerateGroup`] if its linkage totals are not
    /// positive.
    pub fn group(&self, group: &str) -> Result<&GroupAnalysis, EnvironmentError> {
        let (cell, rows) = self
            .analyses
            .get(group)
            .zip(self.groups.get(group))
            .ok_or_else(|| EnvironmentError::UnknownGroup {
                group: group.to_string(),
            })?;

        cell.get_or_init(|| self.analyze(group, rows.iter().copied()))
            .as_ref()
            .map_err(Clone::clone)
    }

    /// `Γ` and `α` for `group`.
    ///
    /// # Errors
    ///
    /// See [`group`](Self::group).
    pub fn group_intensity(&self, group: &str) -> Result<&GroupIntensity, EnvironmentError> {
        Ok(self.group(group)?.intensity())
    }

    /// Backward environmental multipliers `α · L` for `group`.
    ///
    /// # Errors
    ///
    /// See [`group`](Self::group).
    pub fn backward_multiplier(&self, group: &str) -> Result<&DMatrix<f64>, EnvironmentError> {
        Ok(self.group(group)?.backward_multipliers())
    }

    /// Forward environmental multipliers `G · αᵗ` for `group`.
    ///
    /// # Errors
    ///
    /// See [`group`](Self::group).
    pub fn forward_multiplier(&self, group: &str) -> Result<&DMatrix<f64>, EnvironmentError> {
        Ok(self.group(group)?.forward_multipliers())
    }

    /// Backward linkage index `BL` for `group`.
    ///
    /// # Errors
    ///
    /// See [`group`](Self::group).
    pub fn backward_linkage_index(&self, group: &str) -> Result<&DVector<f64>, EnvironmentError> {
        Ok(self.group(group)?.backward_index())
    }

    /// Forward linkage index `FL` for `group`.
    ///
    /// # Errors
    ///
    /// See [`group`](Self::group).
    pub fn forward_linkage_index(&self, group: &str) -> Result<&DVector<f64>, EnvironmentError> {
        Ok(self.group(group)?.forward_index())
    }

    /// Sectors above `threshold` on both linkage axes for `group`.
    ///
    /// # Errors
    ///
    /// See [`group`](Self::group).
    pub fn key_sectors(&self, group: &str, threshold: f64) -> Result<Vec<usize>, EnvironmentError> {
        Ok(self.group(group)?.key_sectors(threshold))
    }

    /// Linkage class of `sector` for `group`, or `None` for an unknown sector.
    ///
    /// # Errors
    ///
    /// See [`group`](Self::group).
    pub fn linkage_class(
        &self,
        group: &str,
        sector: usize,
    ) -> Result<Option<LinkageClass>, EnvironmentError> {
        Ok(self.group(group)?.linkage_class(sector))
    }

    /// Runs a linkage analysis for an arbitrary validated row set, uncached.
    pub(crate) fn analyze_rows(
        &self,
        label: &str,
        rows: &BTreeSet<usize>,
    ) -> Result<GroupAnalysis, EnvironmentError> {
        validate_rows(label, rows, self.indicators())?;
        self.analyze(label, rows.iter().copied())
    }

    fn analyze(
        &self,
        group: &str,
        rows: impl IntoIterator<Item = usize>,
    ) -> Result<GroupAnalysis, EnvironmentError> {
        GroupAnalysis::compute(
            group,
            rows,
            &self.pressures,
            self.economy.gross_output(),
            &self.leontief,
            &self.ghosh,
        )
    }
}
