//! Valuation Engine Types.
//!
//! Plain records passed between the three engine stages. Every record is
//! rebuilt from scratch on each run; nothing here holds state between runs.

use serde::{Deserialize, Serialize};

/// Number of explicitly projected years.
pub const PROJECTION_YEARS: usize = 5;

// ============================================================================
// ESG Types
// ============================================================================

/// Current (year 0) and target (year 5) values of the four ESG indicators.
///
/// No bounds are enforced here; range checks belong to whoever collects the
/// record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EsgMetrics {
    /// Greenhouse-gas emissions, current (MtCO2e)
    pub ghg_0: f64,
    /// Greenhouse-gas emissions, target (MtCO2e)
    pub ghg_target: f64,
    /// Water use per unit, current (m³)
    pub water_0: f64,
    /// Water use per unit, target (m³)
    pub water_target: f64,
    /// Female employees, current (%)
    pub diversity_0: f64,
    /// Female employees, target (%)
    pub diversity_target: f64,
    /// Sustainable waste ratio, current (%)
    pub swr_0: f64,
    /// Sustainable waste ratio, target (%)
    pub swr_target: f64,
}

impl EsgMetrics {
    /// Metrics with every target equal to its current value ("no ESG program").
    pub fn unchanged(ghg: f64, water: f64, diversity: f64, swr: f64) -> Self {
        Self {
            ghg_0: ghg,
            ghg_target: ghg,
            water_0: water,
            water_target: water,
            diversity_0: diversity,
            diversity_target: diversity,
            swr_0: swr,
            swr_target: swr,
        }
    }

    /// Target minus current emissions.
    pub fn delta_ghg(&self) -> f64 {
        self.ghg_target - self.ghg_0
    }

    /// Target minus current water use.
    pub fn delta_water(&self) -> f64 {
        self.water_target - self.water_0
    }

    /// Target minus current female-employee share.
    pub fn delta_diversity(&self) -> f64 {
        self.diversity_target - self.diversity_0
    }

    /// Target minus current sustainable waste ratio.
    pub fn delta_swr(&self) -> f64 {
        self.swr_target - self.swr_0
    }
}

/// Margin shifts derived from ESG metric changes, in percentage points.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct EsgAdjustments {
    /// Gross-margin shift at full realisation (pp)
    pub gross_margin_shift: f64,
    /// EBIT shift at full realisation, as pp of revenue
    pub ebit_shift: f64,
}

impl EsgAdjustments {
    /// Adjustments of a run without any ESG program.
    pub const ZERO: Self = Self {
        gross_margin_shift: 0.0,
        ebit_shift: 0.0,
    };

    /// Whether both shifts are exactly zero.
    pub fn is_zero(&self) -> bool {
        self.gross_margin_shift == 0.0 && self.ebit_shift == 0.0
    }
}

// ============================================================================
// Financial Input Types
// ============================================================================

/// Financial inputs consumed by the DCF Projector and Valuation Calculator.
///
/// Percentages are expressed in percent (6.0 = 6%) except `nwc_pct`, which is
/// a plain ratio (0.10 = 10% of revenue).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FinancialInputs {
    /// Base-year revenue (currency units)
    pub revenue: f64,
    /// Year-by-year COGS figures. Only the first entry is read, to derive the
    /// base gross margin.
    #[serde(alias = "cogs_inputs")]
    pub cogs: [f64; PROJECTION_YEARS],
    /// SG&A (% of revenue)
    pub sga: f64,
    /// R&D expense (% of revenue)
    pub rd: f64,
    /// Other operating expense (% of revenue)
    pub opex: f64,
    /// Depreciation (% of revenue)
    pub dep_pct: f64,
    /// Capital expenditure (% of revenue)
    pub capex_pct: f64,
    /// Net working capital as a ratio of revenue
    pub nwc_pct: f64,
    /// Annual revenue growth (%), also used as the perpetuity growth rate
    pub growth_rate: f64,
    /// Weighted-average cost of capital (%)
    #[serde(default)]
    pub wacc: f64,
    /// Tax rate (%)
    pub tax_rate: f64,
    /// Net debt (currency units)
    pub net_debt: f64,
    /// Shares outstanding
    pub shares_outstanding: f64,
}

impl FinancialInputs {
    /// Gross margin (%) implied by the base revenue and the first COGS entry.
    pub fn base_gross_margin(&self) -> f64 {
        (self.revenue - self.cogs[0]) / self.revenue * 100.0
    }

    /// Inputs with every currency-denominated figure multiplied by `factor`.
    ///
    /// Percentages, ratios and the share count are left untouched.
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            revenue: self.revenue * factor,
            cogs: self.cogs.map(|c| c * factor),
            net_debt: self.net_debt * factor,
            ..*self
        }
    }
}

impl Default for FinancialInputs {
    fn default() -> Self {
        Self {
            revenue: 10_000.0,
            cogs: [5_000.0, 5_100.0, 5_200.0, 5_300.0, 5_400.0],
            sga: 6.0,
            rd: 4.0,
            opex: 2.0,
            dep_pct: 3.6,
            capex_pct: 4.0,
            nwc_pct: 0.10,
            growth_rate: 5.0,
            wacc: 8.488,
            tax_rate: 24.0,
            net_debt: 2_000.0,
            shares_outstanding: 400.0,
        }
    }
}

// ============================================================================
// Projection Types
// ============================================================================

/// One projected year.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectionRow {
    /// Projection year (1-based)
    pub year: u32,
    pub revenue: f64,
    pub cogs: f64,
    pub ebit: f64,
    /// EBIT after tax
    pub ebiat: f64,
    pub depreciation: f64,
    pub capex: f64,
    /// Change in net working capital versus the previous year
    pub change_in_nwc: f64,
    /// Free cash flow
    pub fcf: f64,
    pub discount_factor: f64,
    pub discounted_fcf: f64,
}

impl ProjectionRow {
    /// Gross margin (%) of this year.
    pub fn gross_margin_pct(&self) -> f64 {
        (self.revenue - self.cogs) / self.revenue * 100.0
    }

    /// Operating (EBIT) margin (%) of this year.
    pub fn operating_margin_pct(&self) -> f64 {
        self.ebit / self.revenue * 100.0
    }
}

/// Five projected years, in order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    pub rows: [ProjectionRow; PROJECTION_YEARS],
}

impl Projection {
    /// Final projected year.
    pub fn last(&self) -> &ProjectionRow {
        &self.rows[PROJECTION_YEARS - 1]
    }

    /// Sum of discounted free cash flows across all years.
    pub fn total_discounted_fcf(&self) -> f64 {
        self.rows.iter().map(|r| r.discounted_fcf).sum()
    }

    /// Sum of NWC changes across all years.
    pub fn total_change_in_nwc(&self) -> f64 {
        self.rows.iter().map(|r| r.change_in_nwc).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ProjectionRow> {
        self.rows.iter()
    }
}

// ============================================================================
// Valuation Types
// ============================================================================

/// Terminal value and the enterprise-to-share-price bridge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ValuationResult {
    /// Gordon Growth terminal value at the end of year 5
    pub terminal_value: f64,
    /// Terminal value discounted to today
    pub present_value_tv: f64,
    /// Sum of discounted FCF plus discounted terminal value
    pub enterprise_value: f64,
    /// Enterprise value minus net debt
    pub equity_value: f64,
    pub price_per_share: f64,
    /// Sum of discounted FCF over the explicit horizon
    pub total_pv_fcf: f64,
}

impl ValuationResult {
    /// Share of enterprise value coming from the terminal value (%).
    pub fn terminal_value_share(&self) -> Option<f64> {
        (self.enterprise_value != 0.0)
            .then(|| self.present_value_tv / self.enterprise_value * 100.0)
    }
}
