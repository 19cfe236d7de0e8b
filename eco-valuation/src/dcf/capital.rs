//! Capital structure and WACC.

use serde::{Deserialize, Serialize};

/// Cost-of-capital inputs used to derive a WACC.
///
/// Weights are percentages of total capital and are not required to sum
/// to 100.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CapitalStructure {
    /// Cost of equity (%)
    pub cost_of_equity: f64,
    /// Pre-tax cost of debt (%)
    pub cost_of_debt: f64,
    /// Equity share of capital (%)
    pub equity_weight_pct: f64,
    /// Debt share of capital (%)
    pub debt_weight_pct: f64,
}

impl CapitalStructure {
    /// Weighted-average cost of capital (%) with debt cost taken after tax.
    pub fn wacc(&self, tax_rate: f64) -> f64 {
        (self.equity_weight_pct / 100.0) * self.cost_of_equity
            + (self.debt_weight_pct / 100.0) * self.cost_of_debt * (1.0 - tax_rate / 100.0)
    }

    /// Sum of both weights (%).
    pub fn total_weight_pct(&self) -> f64 {
        self.equity_weight_pct + self.debt_weight_pct
    }
}

impl Default for CapitalStructure {
    fn default() -> Self {
        Self {
            cost_of_equity: 10.0,
            cost_of_debt: 5.2,
            equity_weight_pct: 75.0,
            debt_weight_pct: 25.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_wacc() {
        let wacc = CapitalStructure::default().wacc(24.0);
        assert!((wacc - 8.488).abs() < 1e-9, "wacc {wacc}");
    }

    #[test]
    fn test_all_equity() {
        let capital = CapitalStructure {
            equity_weight_pct: 100.0,
            debt_weight_pct: 0.0,
            ..CapitalStructure::default()
        };
        assert!((capital.wacc(30.0) - 10.0).abs() < 1e-12);
        assert!((capital.total_weight_pct() - 100.0).abs() < 1e-12);
    }

    #[test]
    fn test_tax_shield_lowers_wacc() {
        let capital = CapitalStructure::default();
        assert!(capital.wacc(40.0) < capital.wacc(0.0));
    }
}
