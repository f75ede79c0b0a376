//! Numerical consistency checks over a built environmental model.
//!
//! The validator measures how far the computed matrices drift from the
//! identities they must satisfy and reports every measurement. It never
//! fails: callers decide whether an uncertified model is acceptable.

mod config;
mod report;

pub use config::ValidationConfig;
pub use report::{CheckResult, ValidationReport};

use nalgebra::DMatrix;
use tracing::{debug, warn};

use crate::support::matrix;

use super::EnvironmentalModel;

/// Runs the consistency checks against one environmental model.
#[derive(Debug, Clone, Copy)]
pub struct ConsistencyValidator<'a> {
    environment: &'a EnvironmentalModel,
    config: ValidationConfig,
}

impl<'a> ConsistencyValidator<'a> {
    /// Creates a validator with default tolerances.
    #[must_use]
    pub fn new(environment: &'a EnvironmentalModel) -> Self {
        Self {
            environment,
            config: ValidationConfig::default(),
        }
    }

    /// Replaces the tolerances.
    #[must_use]
    pub fn with_config(self, config: ValidationConfig) -> Self {
        Self { config, ..self }
    }

    /// Runs every check and collects the outcomes.
    #[must_use]
    pub fn run(&self) -> ValidationReport {
        let mut checks = vec![
            self.leontief_identity(),
            self.leontief_diagonal(),
            self.ghosh_diagonal(),
            self.hawkins_simon(),
            self.multiplier_dominance(),
            self.pressure_reconstruction(),
        ];
        checks.extend(self.linkage_means());

        let report = ValidationReport { checks };
        debug!(
            checks = report.checks.len(),
            failed = report.failures().count(),
            "consistency checks complete"
        );
        report
    }

    fn leontief_identity(&self) -> CheckResult {
        let economy = self.environment.economy();
        let n = economy.sectors();
        let complement = DMatrix::identity(n, n) - economy.technical_coefficients();
        let product = self.environment.leontief() * complement;

        CheckResult::within(
            "leontief_identity",
            matrix::max_abs_deviation(&product, &DMatrix::identity(n, n)),
            self.config.inverse_tolerance,
        )
    }

    fn leontief_diagonal(&self) -> CheckResult {
        CheckResult::within(
            "leontief_diagonal",
            diagonal_shortfall(self.environment.leontief()),
            self.config.bound_tolerance,
        )
    }

    fn ghosh_diagonal(&self) -> CheckResult {
        CheckResult::within(
            "ghosh_diagonal",
            diagonal_shortfall(self.environment.ghosh()),
            self.config.bound_tolerance,
        )
    }

    /// Every column of `A` must spend less than one unit per unit of output.
    fn hawkins_simon(&self) -> CheckResult {
        let sums = matrix::column_sums(self.environment.economy().technical_coefficients());
        let deviation = sums.iter().copied().fold(0.0, f64::max);

        CheckResult {
            name: "hawkins_simon".to_string(),
            passed: deviation < 1.0,
            deviation,
        }
    }

    /// Total multipliers may never fall below direct intensities.
    fn multiplier_dominance(&self) -> CheckResult {
        let direct = self.environment.direct_intensity();
        let total = self.environment.total_multipliers();

        let deviation = direct
            .iter()
            .zip(total.iter())
            .map(|(&d, &da)| relative_to((d - da).max(0.0), d))
            .fold(0.0, f64::max);

        CheckResult::within(
            "multiplier_dominance",
            deviation,
            self.config.bound_tolerance,
        )
    }

    fn pressure_reconstruction(&self) -> CheckResult {
        let reconstructed = self.environment.total_pressures();
        let observed = matrix::row_sums(self.environment.pressures());

        let (indicator, deviation) = reconstructed
            .iter()
            .zip(observed.iter())
            .map(|(&rebuilt, &raw)| relative_to((rebuilt - raw).abs(), raw))
            .enumerate()
            .fold((0, 0.0), |worst, (k, dev)| if dev > worst.1 { (k, dev) } else { worst });

        if deviation > self.config.reconstruction_warning {
            warn!(
                indicator,
                deviation, "pressure totals drift from the raw extension"
            );
        }

        CheckResult::within(
            "pressure_reconstruction",
            deviation,
            self.config.reconstruction_tolerance,
        )
    }

    fn linkage_means(&self) -> Vec<CheckResult> {
        let tolerance = self.config.linkage_tolerance;
        let mut checks = Vec::new();

        for group in self.environment.groups().names() {
            let backward = format!("linkage_mean[{group}].backward");
            let forward = format!("linkage_mean[{group}].forward");

            match self.environment.group(group) {
                Ok(analysis) => {
                    checks.push(CheckResult::within(
                        backward,
                        (analysis.backward_index().mean() - 1.0).abs(),
                        tolerance,
                    ));
                    checks.push(CheckResult::within(
                        forward,
                        (analysis.forward_index().mean() - 1.0).abs(),
                        tolerance,
                    ));
                }
                Err(error) => {
                    warn!(group, %error, "linkage analysis unavailable");
                    checks.push(unavailable(backward));
                    checks.push(unavailable(forward));
                }
            }
        }

        checks
    }
}

/// Worst amount by which a diagonal entry falls below one.
fn diagonal_shortfall(m: &DMatrix<f64>) -> f64 {
    m.diagonal()
        .iter()
        .map(|&v| (1.0 - v).max(0.0))
        .fold(0.0, f64::max)
}

/// `gap` relative to `reference`, or absolute when the reference is zero.
fn relative_to(gap: f64, reference: f64) -> f64 {
    if reference.abs() > 0.0 {
        gap / reference.abs()
    } else {
        gap
    }
}

fn unavailable(name: String) -> CheckResult {
    CheckResult {
        name,
        passed: false,
        deviation: f64::INFINITY,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Arc;

    use approx::assert_relative_eq;
    use nalgebra::DVector;
    use proptest::prelude::*;

    use crate::models::carbon::core::{
        EconomicModel, IndicatorGroups,
        test_support::{arb_environment, three_sector_environment, toy_economy, toy_environment},
    };

    #[test]
    fn toy_model_is_certified() {
        let env = toy_environment();
        let report = ConsistencyValidator::new(&env).run();

        assert!(report.passed(), "{:?}", report.failures().collect::<Vec<_>>());

        let names: Vec<&str> = report.checks.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(
            names,
            [
                "leontief_identity",
                "leontief_diagonal",
                "ghosh_diagonal",
                "hawkins_simon",
                "multiplier_dominance",
                "pressure_reconstruction",
                "linkage_mean[ghg].backward",
                "linkage_mean[ghg].forward",
            ]
        );
    }

    #[test]
    fn hawkins_simon_reports_largest_column_sum() {
        let env = toy_environment();
        let report = ConsistencyValidator::new(&env).run();
        let check = report.check("hawkins_simon").unwrap();

        // Column sums of A are 0.4 and 0.3.
        assert_relative_eq!(check.deviation, 0.4, max_relative = 1e-12);
        assert!(check.passed);
    }

    #[test]
    fn one_entry_pair_per_group() {
        let env = three_sector_environment();
        let report = ConsistencyValidator::new(&env).run();

        assert!(report.passed());
        assert_eq!(report.checks.len(), 6 + 2 * 2);
        assert!(report.check("linkage_mean[other].forward").is_some());
    }

    #[test]
    fn tight_tolerances_fail_without_panicking() {
        let env = three_sector_environment();
        let config = ValidationConfig {
            inverse_tolerance: -1.0,
            reconstruction_tolerance: -1.0,
            ..ValidationConfig::default()
        };
        let report = ConsistencyValidator::new(&env).with_config(config).run();

        assert!(!report.passed());
        let failed: Vec<&str> = report.failures().map(|c| c.name.as_str()).collect();
        assert_eq!(failed, ["leontief_identity", "pressure_reconstruction"]);
    }

    #[test]
    fn degenerate_group_is_reported_not_raised() {
        let pressures = DMatrix::from_row_slice(2, 2, &[50.0, 100.0, 0.0, 0.0]);
        let groups = IndicatorGroups::new().with("ghg", [0]).with("idle", [1]);
        let env = EnvironmentalModel::new(Arc::new(toy_economy()), pressures, groups).unwrap();

        let report = ConsistencyValidator::new(&env).run();
        assert!(!report.passed());

        let idle = report.check("linkage_mean[idle].backward").unwrap();
        assert!(!idle.passed);
        assert_eq!(idle.deviation, f64::INFINITY);
        assert!(report.check("linkage_mean[ghg].backward").unwrap().passed);
    }

    #[test]
    fn non_productive_economy_fails_structural_checks() {
        // Invertible but non-productive: every sector uses 1.5 units of the
        // other's output per unit produced, so L = G = [[-0.8, -1.2], [-1.2, -0.8]].
        let economy = EconomicModel::new(
            DMatrix::from_row_slice(2, 2, &[0.0, 150.0, 150.0, 0.0]),
            DVector::from_vec(vec![100.0, 100.0]),
        )
        .unwrap();
        let pressures = DMatrix::from_row_slice(1, 2, &[50.0, 100.0]);
        let groups = IndicatorGroups::new().with("ghg", [0]);
        let env = EnvironmentalModel::new(Arc::new(economy), pressures, groups).unwrap();

        let report = ConsistencyValidator::new(&env).run();
        let check = |name: &str| report.check(name).unwrap().clone();

        assert!(check("leontief_identity").passed);
        assert!(check("pressure_reconstruction").passed);

        for (name, deviation) in [
            ("leontief_diagonal", 1.8),
            ("ghosh_diagonal", 1.8),
            ("hawkins_simon", 1.5),
            ("multiplier_dominance", 4.2),
        ] {
            let result = check(name);
            assert!(!result.passed, "{name} should fail");
            assert_relative_eq!(result.deviation, deviation, max_relative = 1e-9);
        }

        let backward = check("linkage_mean[ghg].backward");
        assert!(!backward.passed);
        assert_eq!(backward.deviation, f64::INFINITY);
    }

    #[test]
    fn report_serializes() {
        let env = toy_environment();
        let report = ConsistencyValidator::new(&env).run();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["checks"][0]["name"], "leontief_identity");
    }

    proptest! {
        #[test]
        fn generated_productive_economies_are_certified(env in arb_environment()) {
            let report = ConsistencyValidator::new(&env).run();
            let failures: Vec<&CheckResult> = report.failures().collect();
            prop_assert!(failures.is_empty(), "{:?}", failures);
        }
    }
}
