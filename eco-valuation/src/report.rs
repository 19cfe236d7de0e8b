//! Valuation report rendering.
//!
//! Bundles one complete run (and optionally its baseline comparison) into a
//! report that renders as Markdown for people or JSON for programs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use eco_common::logging::generate_run_id;
use eco_common::{ReportFormat, Result};

use crate::analysis::{
    attribute_uplift, compare, margin_trajectory, run_pipeline, EsgAttribution, MarginPoint,
    MetricDelta, PipelineOutput, ScenarioComparison,
};
use crate::dcf::{EngineResult, EsgMetrics, FinancialInputs};
use crate::input::ScenarioInput;

// ============================================================================
// Valuation Report
// ============================================================================

/// A rendered-ready record of one valuation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuationReport {
    pub run_id: String,
    pub generated_at: DateTime<Utc>,
    /// Financial inputs after WACC resolution
    pub inputs: FinancialInputs,
    pub metrics: EsgMetrics,
    /// The ESG-adjusted run
    pub output: PipelineOutput,
    pub comparison: Option<ScenarioComparison>,
    /// Empty when no baseline was run
    pub margins: Vec<MarginPoint>,
    pub attribution: Option<EsgAttribution>,
}

impl ValuationReport {
    /// Run a scenario and collect everything the report shows.
    ///
    /// With `include_baseline` the no-ESG scenario is run as well and the
    /// comparison, margin trajectory and attribution are filled in.
    pub fn build(scenario: &ScenarioInput, include_baseline: bool) -> EngineResult<Self> {
        let inputs = scenario.resolve();
        let metrics = scenario.esg;

        let (output, comparison, margins, attribution) = if include_baseline {
            let comparison = compare(&inputs, &metrics)?;
            let margins =
                margin_trajectory(&comparison.baseline.projection, &comparison.esg.projection);
            let attribution = attribute_uplift(&comparison, &metrics);
            (comparison.esg, Some(comparison), margins, Some(attribution))
        } else {
            (run_pipeline(&inputs, &metrics)?, None, Vec::new(), None)
        };

        let report = Self {
            run_id: generate_run_id(),
            generated_at: Utc::now(),
            inputs,
            metrics,
            output,
            comparison,
            margins,
            attribution,
        };

        tracing::info!(
            run_id = %report.run_id,
            enterprise_value = report.output.valuation.enterprise_value,
            price_per_share = report.output.valuation.price_per_share,
            include_baseline,
            "Valuation report built"
        );

        Ok(report)
    }

    /// Render in the requested format.
    pub fn generate(&self, format: ReportFormat) -> Result<String> {
        match format {
            ReportFormat::Markdown => Ok(self.to_markdown()),
            ReportFormat::Json => self.to_json(),
        }
    }

    /// Render as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Render as Markdown.
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();
        let valuation = &self.output.valuation;
        let adjustments = &self.output.adjustments;

        // Header
        md.push_str("# ESG-Adjusted Valuation Report\n\n");
        md.push_str(&format!("**Run**: {}\n\n", self.run_id));
        md.push_str(&format!(
            "**Generated**: {}\n\n",
            self.generated_at.format("%Y-%m-%d %H:%M UTC")
        ));

        // Headline figures
        md.push_str("## Valuation\n\n");
        md.push_str(&format!("- Enterprise value: {:.2}\n", valuation.enterprise_value));
        md.push_str(&format!("- Equity value: {:.2}\n", valuation.equity_value));
        md.push_str(&format!("- Price per share: {:.2}\n", valuation.price_per_share));
        md.push_str(&format!("- PV of explicit FCF: {:.2}\n", valuation.total_pv_fcf));
        md.push_str(&format!(
            "- Terminal value: {:.2} (PV {:.2})\n",
            valuation.terminal_value, valuation.present_value_tv
        ));
        if let Some(share) = valuation.terminal_value_share() {
            md.push_str(&format!("- Terminal value share of EV: {:.1}%\n", share));
        }
        md.push('\n');

        md.push_str(&format!(
            "WACC {:.3}%, perpetuity growth {:.2}%, tax {:.1}%, net debt {:.2}, shares {:.0}\n\n",
            self.inputs.wacc,
            self.inputs.growth_rate,
            self.inputs.tax_rate,
            self.inputs.net_debt,
            self.inputs.shares_outstanding
        ));

        // ESG adjustments
        md.push_str("## ESG Adjustments\n\n");
        md.push_str(&format!(
            "- Gross margin shift: {:+.2} pp\n",
            adjustments.gross_margin_shift
        ));
        md.push_str(&format!("- EBIT shift: {:+.2} pp\n", adjustments.ebit_shift));
        md.push_str("- Phased in linearly over five years\n\n");

        // Projection
        md.push_str("## Five-Year Projection\n\n");
        md.push_str(
            "| Year | Revenue | COGS | EBIT | EBIAT | Dep. | CapEx | ΔNWC | FCF | DF | PV FCF |\n",
        );
        md.push_str(
            "|------|---------|------|------|-------|------|-------|------|-----|----|--------|\n",
        );
        for row in self.output.projection.iter() {
            md.push_str(&format!(
                "| {} | {:.2} | {:.2} | {:.2} | {:.2} | {:.2} | {:.2} | {:.2} | {:.2} | {:.4} | {:.2} |\n",
                row.year,
                row.revenue,
                row.cogs,
                row.ebit,
                row.ebiat,
                row.depreciation,
                row.capex,
                row.change_in_nwc,
                row.fcf,
                row.discount_factor,
                row.discounted_fcf
            ));
        }
        md.push('\n');

        // Comparison
        if let Some(ref comparison) = self.comparison {
            md.push_str("## Baseline vs ESG\n\n");
            md.push_str("| Metric | Baseline | ESG | Change | Change % |\n");
            md.push_str("|--------|----------|-----|--------|----------|\n");
            for (label, delta) in [
                ("Enterprise value", &comparison.enterprise_value),
                ("Equity value", &comparison.equity_value),
                ("Price per share", &comparison.price_per_share),
                ("PV of explicit FCF", &comparison.total_pv_fcf),
            ] {
                md.push_str(&delta_row(label, delta));
            }
            md.push('\n');
        }

        // Margins
        if !self.margins.is_empty() {
            md.push_str("## Margin Trajectory\n\n");
            md.push_str("| Year | Gross (base) | Gross (ESG) | Operating (base) | Operating (ESG) |\n");
            md.push_str("|------|--------------|-------------|------------------|-----------------|\n");
            for p in &self.margins {
                md.push_str(&format!(
                    "| {} | {:.2}% | {:.2}% | {:.2}% | {:.2}% |\n",
                    p.year,
                    p.baseline_gross_margin,
                    p.esg_gross_margin,
                    p.baseline_operating_margin,
                    p.esg_operating_margin
                ));
            }
            md.push('\n');
        }

        // Attribution
        if let Some(ref attribution) = self.attribution {
            md.push_str("## Value Attribution\n\n");
            md.push_str(&format!(
                "Baseline EV {:.2} → ESG EV {:.2} (uplift {:+.2})\n\n",
                attribution.baseline_enterprise_value,
                attribution.esg_enterprise_value,
                attribution.total_uplift
            ));
            md.push_str("| Factor | Metric Δ | Margin pp | Value impact |\n");
            md.push_str("|--------|----------|-----------|--------------|\n");
            for f in &attribution.factors {
                md.push_str(&format!(
                    "| {} | {:+.2} | {:+.2} | {:+.2} |\n",
                    f.factor, f.metric_delta, f.margin_contribution, f.value_impact
                ));
            }
            md.push('\n');
        }

        md
    }
}

fn delta_row(label: &str, delta: &MetricDelta) -> String {
    let pct = delta
        .change_pct
        .map(|p| format!("{:+.2}%", p))
        .unwrap_or_else(|| "n/a".to_string());
    format!(
        "| {} | {:.2} | {:.2} | {:+.2} | {} |\n",
        label, delta.baseline, delta.esg, delta.change, pct
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_with_baseline() {
        let report = ValuationReport::build(&ScenarioInput::default(), true).unwrap();

        assert!(report.comparison.is_some());
        assert!(report.attribution.is_some());
        assert_eq!(report.margins.len(), 5);
        assert!((report.output.valuation.price_per_share - 290.7084039159605).abs() < 1e-6);
        assert!(!report.run_id.is_empty());
    }

    #[test]
    fn test_report_without_baseline() {
        let report = ValuationReport::build(&ScenarioInput::default(), false).unwrap();

        assert!(report.comparison.is_none());
        assert!(report.attribution.is_none());
        assert!(report.margins.is_empty());

        let md = report.to_markdown();
        assert!(md.contains("## Five-Year Projection"));
        assert!(!md.contains("## Baseline vs ESG"));
        assert!(!md.contains("## Value Attribution"));
    }

    #[test]
    fn test_report_to_markdown() {
        let report = ValuationReport::build(&ScenarioInput::default(), true).unwrap();
        let md = report.to_markdown();

        assert!(md.contains("# ESG-Adjusted Valuation Report"));
        assert!(md.contains("- Price per share: 290.71"));
        assert!(md.contains("- Gross margin shift: +9.24 pp"));
        assert!(md.contains("| Enterprise value | 84300.46 | 118283.36 |"));
        assert!(md.contains("| GHG Reduction |"));
        // Year 1 of the ESG run
        assert!(md.contains("| 1 | 10500.00 | 5055.96 | 4322.64 |"));
    }

    #[test]
    fn test_report_to_json() {
        let report = ValuationReport::build(&ScenarioInput::default(), true).unwrap();
        let json = report.generate(ReportFormat::Json).unwrap();

        let parsed: ValuationReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.run_id, report.run_id);
        assert_eq!(parsed.output.projection.rows.len(), 5);

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(value["comparison"]["enterprise_value"]["change"].as_f64().unwrap() > 0.0);
    }

    #[test]
    fn test_build_propagates_engine_errors() {
        let mut scenario = ScenarioInput::default();
        scenario.financials.shares_outstanding = 0.0;
        assert!(ValuationReport::build(&scenario, true).is_err());
        assert!(ValuationReport::build(&scenario, false).is_err());
    }
}
