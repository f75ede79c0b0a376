//! Carbon footprint models over environmentally extended input-output tables.
//!
//! This module provides [`twine_core::Model`] implementations answering
//! footprint queries. The computational core is in the internal `core`
//! module; the types needed to build and inspect a dataset are re-exported
//! here.
//!
//! # Example
//!
//! ```
//! use io_footprint::models::carbon::{
//!     BuildConfig, Dataset, DatasetInputs, IndicatorGroups, ProductFootprintModel, ProductQuery,
//! };
//! use twine_core::Model;
//!
//! let inputs = DatasetInputs::from_rows(
//!     &[vec![10.0, 20.0], vec![30.0, 40.0]],
//!     vec![100.0, 200.0],
//!     &[vec![50.0, 100.0], vec![10.0, 20.0]],
//!     IndicatorGroups::new().with("ghg", [0, 1]),
//!     "ghg",
//! )?;
//! let dataset = Dataset::build(inputs, &BuildConfig::default())?;
//!
//! let model = ProductFootprintModel::new(dataset.calculator().clone());
//! let footprint = model.call(&ProductQuery { sector: 0, quantity: 100.0 })?;
//! assert!((footprint.direct - 60.0).abs() < 1e-9);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub(crate) mod core;
mod query;

pub use self::core::{
    BasketFootprint, BuildConfig, BuildError, CheckResult, ConsistencyValidator,
    DEFAULT_GHG_LABEL, DEFAULT_KEY_THRESHOLD, Dataset, DatasetInputs, EconomicModel,
    EconomyError, EnvironmentError, EnvironmentalModel, FootprintCalculator, GroupAnalysis,
    GroupIntensity, IndicatorGroups, InverseKind, LinkageClass, MitigationPotential,
    MitigationPriority, ProductFootprint, QueryError, ScenarioComparison, SectorContribution,
    SectorMultipliers, SectorResponsibility, ValidationConfig, ValidationReport,
};
pub use query::{
    BasketFootprintModel, BasketQuery, ProductFootprintModel, ProductQuery,
    ScenarioComparisonModel, ScenarioQuery,
};
