//! ESG value attribution.
//!
//! Splits the enterprise-value uplift of an ESG program across the four
//! factors in proportion to each factor's absolute margin-point contribution
//! (|coefficient × delta|). This is a proportional estimate for waterfall
//! reporting, not a re-valuation per factor: a factor with a negative margin
//! effect still receives a share of the uplift sized by its magnitude.

use serde::{Deserialize, Serialize};

use super::scenario::ScenarioComparison;
use crate::dcf::{EsgFactor, EsgMetrics};

/// Attribution of one factor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FactorImpact {
    pub factor: EsgFactor,
    /// `target - current` of the underlying metric
    pub metric_delta: f64,
    /// Coefficient × delta (margin points)
    pub margin_contribution: f64,
    /// Share of the total uplift allocated to this factor
    pub value_impact: f64,
}

/// Waterfall from baseline to ESG-adjusted enterprise value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EsgAttribution {
    pub baseline_enterprise_value: f64,
    pub esg_enterprise_value: f64,
    pub total_uplift: f64,
    /// One entry per factor, in [`EsgFactor::ALL`] order
    pub factors: Vec<FactorImpact>,
}

impl EsgAttribution {
    /// Impact of a single factor.
    pub fn impact(&self, factor: EsgFactor) -> Option<&FactorImpact> {
        self.factors.iter().find(|f| f.factor == factor)
    }

    /// Sum of allocated factor impacts.
    pub fn allocated(&self) -> f64 {
        self.factors.iter().map(|f| f.value_impact).sum()
    }
}

/// Allocate the comparison's enterprise-value uplift across ESG factors.
///
/// When every metric is unchanged no weights exist and every factor gets zero.
pub fn attribute_uplift(comparison: &ScenarioComparison, metrics: &EsgMetrics) -> EsgAttribution {
    let total_uplift = comparison.uplift();

    let contributions: Vec<(EsgFactor, f64)> = EsgFactor::ALL
        .iter()
        .map(|&factor| (factor, factor.contribution(metrics)))
        .collect();
    let total_weight: f64 = contributions.iter().map(|(_, c)| c.abs()).sum();

    let factors = contributions
        .into_iter()
        .map(|(factor, contribution)| {
            let value_impact = if total_weight > 0.0 {
                total_uplift * (contribution.abs() / total_weight)
            } else {
                0.0
            };
            FactorImpact {
                factor,
                metric_delta: factor.delta(metrics),
                margin_contribution: contribution,
                value_impact,
            }
        })
        .collect();

    EsgAttribution {
        baseline_enterprise_value: comparison.enterprise_value.baseline,
        esg_enterprise_value: comparison.enterprise_value.esg,
        total_uplift,
        factors,
    }
}
