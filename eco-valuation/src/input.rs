//! Scenario input record.
//!
//! The record a collector (form, file, caller) hands to the engine: financial
//! inputs, ESG metrics, and optionally the capital structure the WACC is
//! derived from. Validation here is the collector-side guard; the engine
//! itself only rejects the three inputs that would make results undefined.

use serde::{Deserialize, Serialize};
use std::path::Path;

use eco_common::error::{Error, Result, ResultExt};
use eco_common::validation::{
    check_above, check_finite, check_positive, check_range, collect_errors, Validate,
    ValidationError, ValidationResult,
};

use crate::dcf::{CapitalStructure, EsgMetrics, FinancialInputs};

/// One valuation request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScenarioInput {
    pub financials: FinancialInputs,
    pub esg: EsgMetrics,
    /// When present, its WACC replaces `financials.wacc`
    #[serde(default)]
    pub capital_structure: Option<CapitalStructure>,
}

impl Default for ScenarioInput {
    fn default() -> Self {
        Self {
            financials: FinancialInputs::default(),
            esg: EsgMetrics {
                ghg_0: 3.5,
                ghg_target: 2.5,
                water_0: 3.5,
                water_target: 2.5,
                diversity_0: 20.0,
                diversity_target: 25.0,
                swr_0: 90.0,
                swr_target: 95.0,
            },
            capital_structure: Some(CapitalStructure::default()),
        }
    }
}

impl ScenarioInput {
    /// Load a scenario from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = match std::fs::read_to_string(path) {
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(Error::NotFound(format!("scenario file {}", path.display())));
            }
            read => read.context(format!("Failed to read scenario from {}", path.display()))?,
        };

        Self::from_json(&content)
            .map_err(|e| e.with_context(format!("Failed to parse scenario from {}", path.display())))
    }

    /// Parse a scenario from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Financial inputs as the engine consumes them, with the WACC taken from
    /// the capital structure when one is given.
    pub fn resolve(&self) -> FinancialInputs {
        let mut financials = self.financials;
        if let Some(capital) = &self.capital_structure {
            let total_weight = capital.total_weight_pct();
            if (total_weight - 100.0).abs() > 1e-9 {
                tracing::warn!(total_weight, "Capital structure weights do not sum to 100%");
            }
            financials.wacc = capital.wacc(financials.tax_rate);
            tracing::debug!(wacc = financials.wacc, "Derived WACC from capital structure");
        }
        financials
    }

    /// Validate and convert failures into an input error.
    pub fn validated(self) -> Result<Self> {
        self.validate()
            .map_err(|e| Error::InvalidInput(e.to_string()))?;
        Ok(self)
    }
}

impl Validate for ScenarioInput {
    fn validate(&self) -> ValidationResult<()> {
        let mut errors = Vec::new();
        let mut push = |result: ValidationResult<()>| {
            if let Err(e) = result {
                errors.push(e);
            }
        };

        let f = self.resolve();

        push(check_positive("financials.revenue", f.revenue));
        push(check_positive("financials.shares_outstanding", f.shares_outstanding));
        for (i, cogs) in f.cogs.iter().enumerate() {
            push(check_range(&format!("financials.cogs[{i}]"), *cogs, 0.0, f64::MAX));
        }
        for (field, pct) in [
            ("financials.sga", f.sga),
            ("financials.rd", f.rd),
            ("financials.opex", f.opex),
            ("financials.dep_pct", f.dep_pct),
            ("financials.capex_pct", f.capex_pct),
            ("financials.tax_rate", f.tax_rate),
        ] {
            push(check_range(field, pct, 0.0, 100.0));
        }
        push(check_range("financials.nwc_pct", f.nwc_pct, 0.0, 1.0));
        // At or below -100% revenue or the discount base reaches zero
        push(check_above("financials.growth_rate", f.growth_rate, -100.0));
        push(check_above("financials.wacc", f.wacc, -100.0));
        push(check_finite("financials.net_debt", f.net_debt));

        if f.wacc.is_finite() && f.growth_rate.is_finite() && f.wacc <= f.growth_rate {
            push(Err(ValidationError::Conflict {
                reason: format!(
                    "WACC {:.3}% must exceed the growth rate {:.3}% for the terminal value to converge",
                    f.wacc, f.growth_rate
                ),
            }));
        }

        let esg = &self.esg;
        for (field, v) in [
            ("esg.ghg_0", esg.ghg_0),
            ("esg.ghg_target", esg.ghg_target),
            ("esg.water_0", esg.water_0),
            ("esg.water_target", esg.water_target),
        ] {
            push(check_range(field, v, 0.0, f64::MAX));
        }
        for (field, v) in [
            ("esg.diversity_0", esg.diversity_0),
            ("esg.diversity_target", esg.diversity_target),
            ("esg.swr_0", esg.swr_0),
            ("esg.swr_target", esg.swr_target),
        ] {
            push(check_range(field, v, 0.0, 100.0));
        }

        if let Some(capital) = &self.capital_structure {
            push(check_finite("capital_structure.cost_of_equity", capital.cost_of_equity));
            push(check_finite("capital_structure.cost_of_debt", capital.cost_of_debt));
            push(check_range(
                "capital_structure.equity_weight_pct",
                capital.equity_weight_pct,
                0.0,
                100.0,
            ));
            push(check_range(
                "capital_structure.debt_weight_pct",
                capital.debt_weight_pct,
                0.0,
                100.0,
            ));
        }

        collect_errors(errors)
    }
}
