//! One certified dataset version: every pipeline stage built from raw inputs.

mod config;
mod error;

pub use config::BuildConfig;
pub use error::BuildError;

use std::sync::Arc;

use nalgebra::{DMatrix, DVector};
use tracing::{debug, warn};

use crate::support::matrix;

use super::{
    ConsistencyValidator, EconomicModel, EconomyError, EnvironmentError, EnvironmentalModel,
    FootprintCalculator, IndicatorGroups, ValidationReport,
};

/// Raw tables for one dataset version, as produced by a loader.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetInputs {
    /// Intermediate consumption `Z` (N×N).
    pub z: DMatrix<f64>,
    /// Gross output `x` (N).
    pub x: DVector<f64>,
    /// Raw pressures `D1` (M×N).
    pub pressures: DMatrix<f64>,
    pub groups: IndicatorGroups,
    /// Group whose rows the footprint calculator treats as greenhouse gases.
    pub ghg_group: String,
}

impl DatasetInputs {
    /// Assembles inputs from row-major tables.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::Economy`] if `z_rows` is ragged or
    /// [`BuildError::Environment`] if `pressure_rows` is ragged.
    pub fn from_rows(
        z_rows: &[Vec<f64>],
        x: Vec<f64>,
        pressure_rows: &[Vec<f64>],
        groups: IndicatorGroups,
        ghg_group: impl Into<String>,
    ) -> Result<Self, BuildError> {
        let z = matrix::from_rows("Z", z_rows).map_err(EconomyError::from)?;
        let pressures = matrix::from_rows("D1", pressure_rows).map_err(EnvironmentError::from)?;

        Ok(Self {
            z,
            x: DVector::from_vec(x),
            pressures,
            groups,
            ghg_group: ghg_group.into(),
        })
    }
}

/// A fully built dataset version, ready to be shared behind an `Arc`.
#[derive(Debug, Clone)]
pub struct Dataset {
    economy: Arc<EconomicModel>,
    environment: Arc<EnvironmentalModel>,
    calculator: FootprintCalculator,
    report: ValidationReport,
}

impl Dataset {
    /// Builds and certifies every stage from `inputs`.
    ///
    /// # Errors
    ///
    /// Returns the first stage error, or [`BuildError::Uncertified`] when
    /// `config.require_certification` is set and a consistency check fails.
    pub fn build(inputs: DatasetInputs, config: &BuildConfig) -> Result<Self, BuildError> {
        let DatasetInputs {
            z,
            x,
            pressures,
            groups,
            ghg_group,
        } = inputs;

        let economy = Arc::new(EconomicModel::new(z, x)?);
        let environment = Arc::new(EnvironmentalModel::new(
            Arc::clone(&economy),
            pressures,
            groups,
        )?);
        let calculator = FootprintCalculator::for_group(Arc::clone(&environment), &ghg_group)?;

        let report = ConsistencyValidator::new(&environment)
            .with_config(config.validation)
            .run();

        if !report.passed() {
            let failed: Vec<&str> = report.failures().map(|c| c.name.as_str()).collect();
            warn!(?failed, "dataset failed certification");
            if config.require_certification {
                return Err(BuildError::Uncertified(report));
            }
        }

        debug!(
            sectors = economy.sectors(),
            indicators = environment.indicators(),
            group = %ghg_group,
            "dataset built"
        );

        Ok(Self {
            economy,
            environment,
            calculator,
            report,
        })
    }

    #[must_use]
    pub fn economy(&self) -> &Arc<EconomicModel> {
        &self.economy
    }

    #[must_use]
    pub fn environment(&self) -> &Arc<EnvironmentalModel> {
        &self.environment
    }

    /// Footprint calculator over the configured greenhouse-gas group.
    #[must_use]
    pub fn calculator(&self) -> &FootprintCalculator {
        &self.calculator
    }

    /// Consistency report produced while building.
    #[must_use]
    pub fn report(&self) -> &ValidationReport {
        &self.report
    }

    /// Whether every consistency check passed.
    #[must_use]
    pub fn is_certified(&self) -> bool {
        self.report.passed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::{sync::Barrier, thread};

    use approx::assert_relative_eq;

    use crate::{
        models::carbon::core::{InverseKind, ValidationConfig},
        support::{matrix::ShapeMismatch, registry::Registry},
    };

    fn toy_inputs() -> DatasetInputs {
        DatasetInputs::from_rows(
            &[vec![10.0, 20.0], vec![30.0, 40.0]],
            vec![100.0, 200.0],
            &[vec![50.0, 100.0], vec![10.0, 20.0]],
            IndicatorGroups::new().with("ghg", [0, 1]),
            "ghg",
        )
        .unwrap()
    }

    #[test]
    fn builds_certified_toy_dataset() {
        let dataset = Dataset::build(toy_inputs(), &BuildConfig::default()).unwrap();

        assert!(dataset.is_certified());
        assert_eq!(dataset.economy().sectors(), 2);
        assert!(Arc::ptr_eq(dataset.calculator().environment(), dataset.environment()));

        let footprint = dataset.calculator().product_footprint(0, 100.0).unwrap();
        assert_relative_eq!(footprint.total, 66.0 / 0.69, max_relative = 1e-12);
    }

    #[test]
    fn ragged_tables_are_refused() {
        let result = DatasetInputs::from_rows(
            &[vec![10.0, 20.0], vec![30.0]],
            vec![100.0, 200.0],
            &[vec![1.0, 1.0]],
            IndicatorGroups::new().with("ghg", [0]),
            "ghg",
        );
        assert!(matches!(
            result,
            Err(BuildError::Economy(EconomyError::ShapeMismatch(ShapeMismatch {
                operand: "Z",
                ..
            })))
        ));

        let result = DatasetInputs::from_rows(
            &[vec![10.0]],
            vec![100.0],
            &[vec![1.0], vec![]],
            IndicatorGroups::new().with("ghg", [0]),
            "ghg",
        );
        assert!(matches!(
            result,
            Err(BuildError::Environment(EnvironmentError::ShapeMismatch(_)))
        ));
    }

    #[test]
    fn singular_economy_surfaces_as_economy_error() {
        let mut inputs = toy_inputs();
        inputs.z = DMatrix::from_row_slice(2, 2, &[100.0, 0.0, 0.0, 50.0]);

        let err = Dataset::build(inputs, &BuildConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            BuildError::Economy(EconomyError::SingularEconomy {
                inverse: InverseKind::Leontief
            })
        ));
    }

    #[test]
    fn unknown_ghg_group_is_an_environment_error() {
        let mut inputs = toy_inputs();
        inputs.ghg_group = "co2".to_string();

        let err = Dataset::build(inputs, &BuildConfig::default()).unwrap_err();
        assert_eq!(
            err,
            BuildError::Environment(EnvironmentError::UnknownGroup {
                group: "co2".to_string()
            })
        );
    }

    #[test]
    fn certification_can_be_required_or_waived() {
        let strict = ValidationConfig {
            inverse_tolerance: -1.0,
            ..ValidationConfig::default()
        };

        let required = BuildConfig {
            validation: strict,
            require_certification: true,
        };
        match Dataset::build(toy_inputs(), &required) {
            Err(BuildError::Uncertified(report)) => {
                assert_eq!(report.failures().count(), 1);
            }
            other => panic!("expected an uncertified build, got {other:?}"),
        }

        let waived = BuildConfig {
            require_certification: false,
            ..required
        };
        let dataset = Dataset::build(toy_inputs(), &waived).unwrap();
        assert!(!dataset.is_certified());
    }

    #[test]
    fn concurrent_requests_share_one_published_version() {
        let registry = Arc::new(Registry::<&'static str, Dataset>::new());
        let barrier = Arc::new(Barrier::new(4));

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let registry = Arc::clone(&registry);
                let barrier = Arc::clone(&barrier);
                thread::spawn(move || {
                    barrier.wait();
                    let dataset = registry
                        .get_or_build(&"2021", || {
                            Dataset::build(toy_inputs(), &BuildConfig::default())
                        })
                        .unwrap();
                    let total = dataset
                        .calculator()
                        .basket_footprint(&[10.0, 20.0], "household")
                        .unwrap()
                        .total;
                    (dataset, total)
                })
            })
            .collect();

        let results: Vec<(Arc<Dataset>, f64)> =
            handles.into_iter().map(|h| h.join().unwrap()).collect();

        for (dataset, total) in &results {
            assert!(Arc::ptr_eq(dataset, &results[0].0));
            assert_relative_eq!(*total, 18.6 / 0.69, max_relative = 1e-12);
        }
        assert_eq!(registry.versions(), vec!["2021"]);
    }
}
