//! [`Model`] adapters over a [`FootprintCalculator`].
//!
//! Each adapter owns a calculator (cheap to clone, shares the underlying
//! dataset) and delegates a single query type to it.

use serde::{Deserialize, Serialize};
use twine_core::Model;

use crate::models::carbon::core::{
    BasketFootprint, FootprintCalculator, ProductFootprint, QueryError, ScenarioComparison,
};

/// A quantity of one sector's product.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProductQuery {
    pub sector: usize,
    pub quantity: f64,
}

/// A labelled final-demand basket with one entry per sector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BasketQuery {
    pub label: String,
    pub demand: Vec<f64>,
}

/// Two demand baskets to compare.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioQuery {
    pub baseline: BasketQuery,
    pub alternative: BasketQuery,
}

/// Computes the footprint of a [`ProductQuery`].
#[derive(Debug, Clone)]
pub struct ProductFootprintModel {
    calculator: FootprintCalculator,
}

impl ProductFootprintModel {
    #[must_use]
    pub fn new(calculator: FootprintCalculator) -> Self {
        Self { calculator }
    }
}

impl Model for ProductFootprintModel {
    type Input = ProductQuery;
    type Output = ProductFootprint;
    type Error = QueryError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        self.calculator.product_footprint(input.sector, input.quantity)
    }
}

/// Computes the footprint of a [`BasketQuery`].
#[derive(Debug, Clone)]
pub struct BasketFootprintModel {
    calculator: FootprintCalculator,
}

impl BasketFootprintModel {
    #[must_use]
    pub fn new(calculator: FootprintCalculator) -> Self {
        Self { calculator }
    }
}

impl Model for BasketFootprintModel {
    type Input = BasketQuery;
    type Output = BasketFootprint;
    type Error = QueryError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        self.calculator.basket_footprint(&input.demand, input.label.as_str())
    }
}

/// Compares the two baskets of a [`ScenarioQuery`].
#[derive(Debug, Clone)]
pub struct ScenarioComparisonModel {
    calculator: FootprintCalculator,
}

impl ScenarioComparisonModel {
    #[must_use]
    pub fn new(calculator: FootprintCalculator) -> Self {
        Self { calculator }
    }
}

impl Model for ScenarioComparisonModel {
    type Input = ScenarioQuery;
    type Output = ScenarioComparison;
    type Error = QueryError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        let ScenarioQuery {
            baseline,
            alternative,
        } = input;

        self.calculator.compare_scenarios(
            &baseline.demand,
            &alternative.demand,
            (baseline.label.as_str(), alternative.label.as_str()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::models::carbon::core::test_support::toy_environment;

    fn calculator() -> FootprintCalculator {
        FootprintCalculator::for_group(toy_environment(), "ghg").unwrap()
    }

    fn basket(label: &str, demand: &[f64]) -> BasketQuery {
        BasketQuery {
            label: label.to_string(),
            demand: demand.to_vec(),
        }
    }

    #[test]
    fn product_model_delegates() {
        let model = ProductFootprintModel::new(calculator());
        let footprint = model
            .call(&ProductQuery {
                sector: 0,
                quantity: 100.0,
            })
            .unwrap();

        assert_relative_eq!(footprint.total, 66.0 / 0.69, max_relative = 1e-12);
        assert!(matches!(
            model.call(&ProductQuery {
                sector: 9,
                quantity: 1.0
            }),
            Err(QueryError::IndexOutOfRange { index: 9, .. })
        ));
    }

    #[test]
    fn basket_model_keeps_label() {
        let model = BasketFootprintModel::new(calculator());
        let footprint = model.call(&basket("household", &[10.0, 20.0])).unwrap();

        assert_eq!(footprint.label, "household");
        assert_relative_eq!(footprint.total, 18.6 / 0.69, max_relative = 1e-12);
    }

    #[test]
    fn scenario_model_compares_named_baskets() {
        let model = ScenarioComparisonModel::new(calculator());
        let comparison = model
            .call(&ScenarioQuery {
                baseline: basket("today", &[10.0, 20.0]),
                alternative: basket("target", &[10.0, 10.0]),
            })
            .unwrap();

        assert_eq!(comparison.alternative.label, "target");
        assert!(comparison.absolute_change < 0.0);
    }

    #[test]
    fn queries_deserialize_from_json() {
        let query: ScenarioQuery = serde_json::from_str(
            r#"{
                "baseline": { "label": "a", "demand": [1.0, 0.0] },
                "alternative": { "label": "b", "demand": [0.0, 1.0] }
            }"#,
        )
        .unwrap();
        assert_eq!(query.baseline.demand, vec![1.0, 0.0]);
    }
}
