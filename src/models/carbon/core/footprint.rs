//! Carbon footprint queries over an environmental model.
//!
//! A [`FootprintCalculator`] fixes which indicator rows count as greenhouse
//! gases and answers product, basket, scenario and mitigation queries from
//! the aggregated direct intensities and total multipliers of those rows.

mod error;
mod ranking;
mod results;

pub use error::QueryError;
pub use results::{
    BasketFootprint, MitigationPotential, MitigationPriority, ProductFootprint,
    ScenarioComparison, SectorContribution, SectorResponsibility,
};

use std::{
    collections::BTreeSet,
    sync::{Arc, OnceLock},
};

use nalgebra::DVector;

use crate::support::{
    constraint::{Constraint, ConstraintError, Finite, NonNegative},
    matrix,
};

use super::{
    DEFAULT_KEY_THRESHOLD, EnvironmentError, EnvironmentalModel, GroupAnalysis, LinkageClass,
    validate_rows,
};

use ranking::{SUMMARY_LEN, rank_descending, share_of, top_contributors};

/// Label used for the calculator's row set when none is given.
pub const DEFAULT_GHG_LABEL: &str = "ghg";

/// Answers footprint queries for one selection of greenhouse-gas indicators.
///
/// Cheap to clone; clones share the environmental model and the lazily
/// computed linkage analysis.
#[derive(Debug, Clone)]
pub struct FootprintCalculator {
    environment: Arc<EnvironmentalModel>,
    label: String,
    rows: BTreeSet<usize>,
    direct: DVector<f64>,
    total: DVector<f64>,
    linkages: Arc<OnceLock<Result<GroupAnalysis, EnvironmentError>>>,
}

impl FootprintCalculator {
    /// Creates a calculator treating `ghg_rows` of `D1` as greenhouse gases.
    ///
    /// # Errors
    ///
    /// Returns [`EnvironmentError::EmptyGroup`] or
    /// [`EnvironmentError::IndicatorOutOfRange`] for an invalid row selection.
    pub fn new(
        environment: Arc<EnvironmentalModel>,
        ghg_rows: impl IntoIterator<Item = usize>,
    ) -> Result<Self, EnvironmentError> {
        Self::with_label(environment, DEFAULT_GHG_LABEL, ghg_rows.into_iter().collect())
    }

    /// Creates a calculator over the rows of a configured indicator group.
    ///
    /// # Errors
    ///
    /// Returns [`EnvironmentError::UnknownGroup`] if `group` is not configured.
    pub fn for_group(
        environment: Arc<EnvironmentalModel>,
        group: &str,
    ) -> Result<Self, EnvironmentError> {
        let rows = environment
            .groups()
            .get(group)
            .cloned()
            .ok_or_else(|| EnvironmentError::UnknownGroup {
                group: group.to_string(),
            })?;
        Self::with_label(environment, group, rows)
    }

    fn with_label(
        environment: Arc<EnvironmentalModel>,
        label: &str,
        rows: BTreeSet<usize>,
    ) -> Result<Self, EnvironmentError> {
        validate_rows(label, &rows, environment.indicators())?;

        let direct = matrix::sum_rows(environment.direct_intensity(), rows.iter().copied());
        let total = matrix::sum_rows(environment.total_multipliers(), rows.iter().copied());

        Ok(Self {
            environment,
            label: label.to_string(),
            rows,
            direct,
            total,
            linkages: Arc::new(OnceLock::new()),
        })
    }

    /// The environmental model queried by this calculator.
    #[must_use]
    pub fn environment(&self) -> &Arc<EnvironmentalModel> {
        &self.environment
    }

    /// Indicator rows treated as greenhouse gases.
    #[must_use]
    pub fn rows(&self) -> &BTreeSet<usize> {
        &self.rows
    }

    /// Number of sectors `N`.
    #[must_use]
    pub fn sectors(&self) -> usize {
        self.direct.len()
    }

    /// Aggregated greenhouse-gas direct intensity per sector.
    #[must_use]
    pub fn direct_intensity(&self) -> &DVector<f64> {
        &self.direct
    }

    /// Aggregated greenhouse-gas total multiplier per sector.
    #[must_use]
    pub fn total_intensity(&self) -> &DVector<f64> {
        &self.total
    }

    /// Footprint of `quantity` units of final demand for `sector`'s product.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::IndexOutOfRange`] for an unknown sector or
    /// [`QueryError::InvalidQuantity`] for a negative or non-finite quantity.
    pub fn product_footprint(
        &self,
        sector: usize,
        quantity: f64,
    ) -> Result<ProductFootprint, QueryError> {
        self.check_sector(sector)?;
        check_amount(&quantity).map_err(|reason| QueryError::InvalidQuantity {
            value: quantity,
            reason,
        })?;

        let direct_intensity = self.direct[sector];
        let direct = direct_intensity * quantity;
        let total = self.total[sector] * quantity;

        let production = self.environment.leontief().column(sector) * quantity;
        let emissions = self.direct.component_mul(&production);

        Ok(ProductFootprint {
            sector,
            quantity,
            total,
            direct,
            indirect: total - direct,
            direct_intensity,
            production_required: production.iter().copied().collect(),
            emissions_by_sector: emissions.iter().copied().collect(),
        })
    }

    /// Footprint of a final-demand basket.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::DimensionMismatch`] if `demand` does not have one
    /// entry per sector, or [`QueryError::InvalidDemand`] for a negative or
    /// non-finite entry.
    pub fn basket_footprint(
        &self,
        demand: &[f64],
        label: impl Into<String>,
    ) -> Result<BasketFootprint, QueryError> {
        let demand = self.check_demand(demand)?;

        let contributions = self.total.component_mul(&demand);
        let production = self.environment.leontief() * &demand;
        let emissions: Vec<f64> = self.direct.component_mul(&production).iter().copied().collect();

        Ok(BasketFootprint {
            label: label.into(),
            total: contributions.sum(),
            contributions: contributions.iter().copied().collect(),
            production_required: production.iter().copied().collect(),
            top_emitters: top_contributors(&emissions, SUMMARY_LEN),
            emissions_by_sector: emissions,
        })
    }

    /// Compares the footprints of two independent demand baskets.
    ///
    /// # Errors
    ///
    /// Returns the first validation error of either basket, as in
    /// [`basket_footprint`](Self::basket_footprint).
    pub fn compare_scenarios(
        &self,
        baseline: &[f64],
        alternative: &[f64],
        names: (&str, &str),
    ) -> Result<ScenarioComparison, QueryError> {
        let baseline = self.basket_footprint(baseline, names.0)?;
        let alternative = self.basket_footprint(alternative, names.1)?;

        let absolute_change = alternative.total - baseline.total;
        let percent_change =
            (baseline.total != 0.0).then(|| absolute_change / baseline.total * 100.0);

        let sector_differences: Vec<f64> = alternative
            .emissions_by_sector
            .iter()
            .zip(&baseline.emissions_by_sector)
            .map(|(alt, base)| alt - base)
            .collect();
        let reductions: Vec<f64> = sector_differences.iter().map(|d| -d).collect();

        Ok(ScenarioComparison {
            largest_reductions: top_contributors(&reductions, SUMMARY_LEN),
            largest_increases: top_contributors(&sector_differences, SUMMARY_LEN),
            baseline,
            alternative,
            absolute_change,
            percent_change,
            sector_differences,
        })
    }

    /// Ranks sectors by their contribution to the basket footprint of `demand`.
    ///
    /// Returns `min(count, N)` entries ordered by non-increasing contribution,
    /// ties broken by ascending sector index. Linkage indices and the
    /// mitigation potential are `None` when the greenhouse-gas rows carry no
    /// usable linkage analysis.
    ///
    /// # Errors
    ///
    /// Returns basket validation errors as in
    /// [`basket_footprint`](Self::basket_footprint).
    pub fn mitigation_priorities(
        &self,
        demand: &[f64],
        count: usize,
    ) -> Result<Vec<MitigationPriority>, QueryError> {
        let basket = self.basket_footprint(demand, "mitigation")?;
        let linkages = self.linkages().ok();

        let contributions = &basket.contributions;
        let mean = basket.total / contributions.len() as f64;

        let priorities = rank_descending(contributions)
            .into_iter()
            .take(count)
            .map(|sector| {
                let contribution = contributions[sector];
                let backward = linkages.map(|l| l.backward_index()[sector]);
                let forward = linkages.map(|l| l.forward_index()[sector]);
                MitigationPriority {
                    sector,
                    contribution,
                    share: share_of(contribution, basket.total),
                    backward_linkage: backward,
                    forward_linkage: forward,
                    direct_intensity: self.direct[sector],
                    potential: backward.zip(forward).map(|(bl, fl)| {
                        MitigationPotential::assess(contribution, mean, bl, fl)
                    }),
                }
            })
            .collect();

        Ok(priorities)
    }

    /// Producer and consumer responsibility of `sector`.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::IndexOutOfRange`] for an unknown sector, or
    /// [`QueryError::Environment`] for a degenerate linkage analysis.
    pub fn sector_responsibility(&self, sector: usize) -> Result<SectorResponsibility, QueryError> {
        self.check_sector(sector)?;
        let linkages = self.linkages()?;

        let backward = linkages.backward_index()[sector];
        let forward = linkages.forward_index()[sector];

        Ok(SectorResponsibility {
            sector,
            producer: self.direct[sector] * self.environment.economy().gross_output()[sector],
            consumer: self.total[sector],
            backward_linkage: backward,
            forward_linkage: forward,
            linkage_class: LinkageClass::classify(backward, forward, DEFAULT_KEY_THRESHOLD),
        })
    }

    /// Sectors above `threshold` on both greenhouse-gas linkage axes.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::Environment`] for a degenerate linkage analysis.
    pub fn key_sectors(&self, threshold: f64) -> Result<Vec<usize>, QueryError> {
        Ok(self.linkages()?.key_sectors(threshold))
    }

    /// Linkage analysis of the greenhouse-gas rows, computed on first use.
    ///
    /// # Errors
    ///
    /// Returns [`EnvironmentError::DegenerateGroup`] if the linkage totals of
    /// the rows are not positive.
    pub fn linkages(&self) -> Result<&GroupAnalysis, EnvironmentError> {
        self.linkages
            .get_or_init(|| self.environment.analyze_rows(&self.label, &self.rows))
            .as_ref()
            .map_err(Clone::clone)
    }

    fn check_sector(&self, sector: usize) -> Result<(), QueryError> {
        if sector < self.sectors() {
            Ok(())
        } else {
            Err(QueryError::IndexOutOfRange {
                index: sector,
                sectors: self.sectors(),
            })
        }
    }

    fn check_demand(&self, demand: &[f64]) -> Result<DVector<f64>, QueryError> {
        if demand.len() != self.sectors() {
            return Err(QueryError::DimensionMismatch {
                expected: self.sectors(),
                actual: demand.len(),
            });
        }

        for (sector, value) in demand.iter().enumerate() {
            check_amount(value).map_err(|reason| QueryError::InvalidDemand {
                sector,
                value: *value,
                reason,
            })?;
        }

        Ok(DVector::from_column_slice(demand))
    }
}

/// Quantities and demand entries must be finite and non-negative.
fn check_amount(value: &f64) -> Result<(), ConstraintError> {
    Finite::check(value)?;
    NonNegative::check(value)
}
