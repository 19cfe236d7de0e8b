//! ESG Adjustment Calculator.
//!
//! Converts the change between current and target ESG metrics into a
//! gross-margin shift and an EBIT shift using fixed empirical coefficients.
//!
//! | Factor | Coefficient | Acts on |
//! |--------|-------------|---------|
//! | GHG emissions | -6.15 per MtCO2e | gross margin |
//! | Water use | -3.09 per m³ | gross margin |
//! | Female employees | +1.43 per pp | EBIT |
//! | Sustainable waste ratio | -0.11 per pp | EBIT |
//!
//! Deltas are `target - current`, so a reduction in emissions or water use
//! (negative delta) produces a positive margin shift.

use serde::{Deserialize, Serialize};

use super::types::{EsgAdjustments, EsgMetrics};

/// Gross-margin pp per MtCO2e change in emissions.
pub const GHG_COEFFICIENT: f64 = -6.15;
/// Gross-margin pp per m³ change in water use.
pub const WATER_COEFFICIENT: f64 = -3.09;
/// EBIT pp per pp change in female-employee share.
pub const DIVERSITY_COEFFICIENT: f64 = 1.43;
/// EBIT pp per pp change in sustainable waste ratio.
pub const SWR_COEFFICIENT: f64 = -0.11;

/// The four ESG drivers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EsgFactor {
    /// Greenhouse-gas emissions
    Ghg,
    /// Water use per unit
    Water,
    /// Female-employee share
    Diversity,
    /// Sustainable waste ratio
    WasteRatio,
}

/// Which margin line a factor shifts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MarginLine {
    GrossMargin,
    Ebit,
}

impl EsgFactor {
    /// All factors in reporting order.
    pub const ALL: [EsgFactor; 4] = [Self::Ghg, Self::Water, Self::Diversity, Self::WasteRatio];

    /// Empirical coefficient of this factor.
    pub const fn coefficient(self) -> f64 {
        match self {
            Self::Ghg => GHG_COEFFICIENT,
            Self::Water => WATER_COEFFICIENT,
            Self::Diversity => DIVERSITY_COEFFICIENT,
            Self::WasteRatio => SWR_COEFFICIENT,
        }
    }

    /// Margin line this factor acts on.
    pub const fn margin_line(self) -> MarginLine {
        match self {
            Self::Ghg | Self::Water => MarginLine::GrossMargin,
            Self::Diversity | Self::WasteRatio => MarginLine::Ebit,
        }
    }

    /// `target - current` for this factor.
    pub fn delta(self, metrics: &EsgMetrics) -> f64 {
        match self {
            Self::Ghg => metrics.delta_ghg(),
            Self::Water => metrics.delta_water(),
            Self::Diversity => metrics.delta_diversity(),
            Self::WasteRatio => metrics.delta_swr(),
        }
    }

    /// Margin-point contribution of this factor (coefficient × delta).
    pub fn contribution(self, metrics: &EsgMetrics) -> f64 {
        self.coefficient() * self.delta(metrics)
    }
}

impl std::fmt::Display for EsgFactor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ghg => write!(f, "GHG Reduction"),
            Self::Water => write!(f, "Water Efficiency"),
            Self::Diversity => write!(f, "Workforce Diversity"),
            Self::WasteRatio => write!(f, "Waste Management"),
        }
    }
}

/// Compute the gross-margin and EBIT shifts implied by `metrics`.
///
/// Defined for any finite input; equal current and target values give
/// [`EsgAdjustments::ZERO`].
pub fn compute_esg_adjustments(metrics: &EsgMetrics) -> EsgAdjustments {
    let gross_margin_shift = GHG_COEFFICIENT * metrics.delta_ghg()
        + WATER_COEFFICIENT * metrics.delta_water();
    let ebit_shift = DIVERSITY_COEFFICIENT * metrics.delta_diversity()
        + SWR_COEFFICIENT * metrics.delta_swr();

    tracing::debug!(gross_margin_shift, ebit_shift, "Computed ESG adjustments");

    EsgAdjustments {
        gross_margin_shift,
        ebit_shift,
    }
}
