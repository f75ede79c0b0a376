//! Environmentally extended input-output analysis.
//!
//! The pipeline runs in stages, each an immutable value built from the one
//! before it:
//!
//! 1. [`EconomicModel`]: validated `Z` and `x`, technical and allocation
//!    coefficients, the Leontief and Ghosh inverses.
//! 2. [`EnvironmentalModel`]: raw pressures `D1` attached to a solvable
//!    economy, direct intensities, total multipliers and per-group linkage
//!    analyses.
//! 3. [`FootprintCalculator`]: greenhouse-gas queries over product
//!    quantities and final-demand baskets.
//!
//! [`ConsistencyValidator`] checks a built environmental model against the
//! identities it must satisfy, and [`Dataset`] bundles all stages of one
//! certified dataset version.

mod dataset;
mod economy;
mod environment;
mod footprint;
mod validation;

#[cfg(test)]
pub(crate) mod test_support;

pub use dataset::{BuildConfig, BuildError, Dataset, DatasetInputs};
pub use economy::{EconomicModel, EconomyError, InverseKind, SectorMultipliers};
pub use environment::{
    DEFAULT_KEY_THRESHOLD, EnvironmentError, EnvironmentalModel, GroupAnalysis, GroupIntensity,
    IndicatorGroups, LinkageClass,
};
pub use footprint::{
    BasketFootprint, DEFAULT_GHG_LABEL, FootprintCalculator, MitigationPotential,
    MitigationPriority, ProductFootprint, QueryError, ScenarioComparison, SectorContribution,
    SectorResponsibility,
};
pub use validation::{CheckResult, ConsistencyValidator, ValidationConfig, ValidationReport};

use environment::validate_rows;
