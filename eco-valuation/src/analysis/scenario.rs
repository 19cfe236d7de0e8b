//! Pipeline runs and baseline-versus-ESG comparison.
//!
//! The baseline scenario is the same company with no ESG program (zero
//! adjustments). Both runs are independent; neither reads the other's output.

use serde::{Deserialize, Serialize};

use crate::dcf::{
    compute_esg_adjustments, project, value, EngineResult, EsgAdjustments, EsgMetrics,
    FinancialInputs, Projection, ValuationResult,
};

/// Output of one ESG → DCF → valuation run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PipelineOutput {
    pub adjustments: EsgAdjustments,
    pub projection: Projection,
    pub valuation: ValuationResult,
}

/// Run all three stages for one set of inputs.
pub fn run_pipeline(inputs: &FinancialInputs, metrics: &EsgMetrics) -> EngineResult<PipelineOutput> {
    let adjustments = compute_esg_adjustments(metrics);
    run_with_adjustments(inputs, adjustments)
}

/// Run the projection and valuation stages with precomputed adjustments.
pub fn run_with_adjustments(
    inputs: &FinancialInputs,
    adjustments: EsgAdjustments,
) -> EngineResult<PipelineOutput> {
    let projection = project(inputs, &adjustments)?;
    let valuation = value(&projection, inputs)?;

    Ok(PipelineOutput {
        adjustments,
        projection,
        valuation,
    })
}

/// Run the baseline scenario (no ESG adjustments).
pub fn run_baseline(inputs: &FinancialInputs) -> EngineResult<PipelineOutput> {
    run_with_adjustments(inputs, EsgAdjustments::ZERO)
}

/// One valuation figure under both scenarios.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricDelta {
    pub baseline: f64,
    pub esg: f64,
    /// `esg - baseline`
    pub change: f64,
    /// Change relative to the baseline (%), `None` when the baseline is zero
    pub change_pct: Option<f64>,
}

impl MetricDelta {
    pub fn new(baseline: f64, esg: f64) -> Self {
        let change = esg - baseline;
        let change_pct = (baseline != 0.0).then(|| change / baseline * 100.0);
        Self {
            baseline,
            esg,
            change,
            change_pct,
        }
    }
}

/// Baseline and ESG-adjusted runs side by side.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScenarioComparison {
    pub baseline: PipelineOutput,
    pub esg: PipelineOutput,
    pub enterprise_value: MetricDelta,
    pub equity_value: MetricDelta,
    pub price_per_share: MetricDelta,
    pub total_pv_fcf: MetricDelta,
}

impl ScenarioComparison {
    /// Build the comparison from two completed runs.
    pub fn from_runs(baseline: PipelineOutput, esg: PipelineOutput) -> Self {
        let (b, e) = (&baseline.valuation, &esg.valuation);
        Self {
            enterprise_value: MetricDelta::new(b.enterprise_value, e.enterprise_value),
            equity_value: MetricDelta::new(b.equity_value, e.equity_value),
            price_per_share: MetricDelta::new(b.price_per_share, e.price_per_share),
            total_pv_fcf: MetricDelta::new(b.total_pv_fcf, e.total_pv_fcf),
            baseline,
            esg,
        }
    }

    /// Enterprise value created by the ESG program.
    pub fn uplift(&self) -> f64 {
        self.enterprise_value.change
    }
}

/// Run the baseline and ESG scenarios and compare them.
pub fn compare(inputs: &FinancialInputs, metrics: &EsgMetrics) -> EngineResult<ScenarioComparison> {
    let baseline = run_baseline(inputs)?;
    let esg = run_pipeline(inputs, metrics)?;
    let comparison = ScenarioComparison::from_runs(baseline, esg);

    tracing::info!(
        baseline_ev = comparison.enterprise_value.baseline,
        esg_ev = comparison.enterprise_value.esg,
        uplift = comparison.uplift(),
        "Scenario comparison complete"
    );

    Ok(comparison)
}
