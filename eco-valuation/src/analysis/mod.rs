//! Scenario analysis built on top of the valuation engine.
//!
//! - [`scenario`]: full pipeline runs and the baseline-versus-ESG comparison
//! - [`margins`]: per-year gross and operating margin trajectories
//! - [`attribution`]: enterprise-value uplift split across ESG factors

pub mod attribution;
pub mod margins;
pub mod scenario;

pub use attribution::{attribute_uplift, EsgAttribution, FactorImpact};
pub use margins::{margin_trajectory, MarginPoint};
pub use scenario::{
    compare, run_baseline, run_pipeline, run_with_adjustments, MetricDelta, PipelineOutput,
    ScenarioComparison,
};
