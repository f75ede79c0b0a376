//! Plain result types returned by footprint queries.

use serde::{Deserialize, Serialize};

use crate::models::carbon::core::LinkageClass;

/// Footprint of a quantity of one sector's product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductFootprint {
    pub sector: usize,
    pub quantity: f64,
    /// Direct plus indirect emissions.
    pub total: f64,
    /// Emissions of the producing sector itself.
    pub direct: f64,
    /// Emissions elsewhere in the supply chain (`total − direct`).
    pub indirect: f64,
    /// Direct emissions per unit of product.
    pub direct_intensity: f64,
    /// Output required from every sector to deliver the quantity (`L · f`).
    pub production_required: Vec<f64>,
    /// Emissions of every sector while producing that output; sums to `total`.
    pub emissions_by_sector: Vec<f64>,
}

/// One sector's share of an aggregate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SectorContribution {
    pub sector: usize,
    pub value: f64,
    /// Fraction of the aggregate total, `0` when the total is not positive.
    pub share: f64,
}

/// Footprint of a final-demand basket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BasketFootprint {
    pub label: String,
    pub total: f64,
    /// Emissions attributable to the final demand of each sector.
    pub contributions: Vec<f64>,
    /// Output required from every sector (`L · v`).
    pub production_required: Vec<f64>,
    /// Emissions released by every sector while producing that output.
    pub emissions_by_sector: Vec<f64>,
    /// The five largest entries of `emissions_by_sector`.
    pub top_emitters: Vec<SectorContribution>,
}

/// Side-by-side footprint of two demand scenarios.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioComparison {
    pub baseline: BasketFootprint,
    pub alternative: BasketFootprint,
    /// `alternative.total − baseline.total`.
    pub absolute_change: f64,
    /// Change relative to the baseline in percent, `None` for a zero baseline.
    pub percent_change: Option<f64>,
    /// Per-sector change in `emissions_by_sector`.
    pub sector_differences: Vec<f64>,
    /// The five sectors whose emissions fall the most.
    pub largest_reductions: Vec<SectorContribution>,
    /// The five sectors whose emissions rise the most.
    pub largest_increases: Vec<SectorContribution>,
}

/// Qualitative mitigation leverage of a sector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MitigationPotential {
    /// Key sector contributing more than the average sector.
    VeryHigh,
    /// Strong backward linkage: cutting its demand ripples upstream.
    HighDemandLeverage,
    /// Strong forward linkage: decarbonizing it benefits its customers.
    HighSupplyLeverage,
    /// Large contributor with limited spillovers.
    Medium,
    Low,
}

impl MitigationPotential {
    /// Linkage index above which a single axis alone counts as high leverage.
    pub const STRONG_LINKAGE: f64 = 1.5;

    /// Assesses a sector from its contribution, the mean contribution, and its
    /// linkage indices.
    #[must_use]
    pub fn assess(contribution: f64, mean_contribution: f64, backward: f64, forward: f64) -> Self {
        let above_mean = contribution > mean_contribution;

        if backward > 1.0 && forward > 1.0 && above_mean {
            Self::VeryHigh
        } else if backward > Self::STRONG_LINKAGE {
            Self::HighDemandLeverage
        } else if forward > Self::STRONG_LINKAGE {
            Self::HighSupplyLeverage
        } else if above_mean {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

/// A ranked mitigation candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MitigationPriority {
    pub sector: usize,
    /// Emissions attributable to this sector's final demand.
    pub contribution: f64,
    /// Fraction of the basket total.
    pub share: f64,
    /// `None` when the linkage analysis is degenerate.
    pub backward_linkage: Option<f64>,
    pub forward_linkage: Option<f64>,
    pub direct_intensity: f64,
    pub potential: Option<MitigationPotential>,
}

/// Producer- versus consumer-side responsibility of one sector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectorResponsibility {
    pub sector: usize,
    /// Emissions released by the sector's own production (`d · x`).
    pub producer: f64,
    /// Emissions caused economy-wide per unit of the sector's final demand.
    pub consumer: f64,
    pub backward_linkage: f64,
    pub forward_linkage: f64,
    pub linkage_class: LinkageClass,
}
