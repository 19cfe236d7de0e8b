//! EcoValuate - ESG-adjusted discounted cash flow valuation.
//!
//! Translates planned changes in four ESG metrics into margin improvements,
//! projects five years of free cash flow with those improvements phased in,
//! and values the company with a Gordon Growth terminal value.
//!
//! - [`dcf`]: the three calculation stages and their data types
//! - [`analysis`]: baseline comparison, margin trajectories, value attribution
//! - [`input`]: the scenario record and its validation
//! - [`report`]: Markdown and JSON rendering

#![warn(clippy::all)]
#![allow(clippy::pedantic)]

pub mod analysis;
pub mod dcf;
pub mod input;
pub mod report;

pub use analysis::{
    attribute_uplift, compare, margin_trajectory, run_pipeline, EsgAttribution, PipelineOutput,
    ScenarioComparison,
};
pub use dcf::{
    compute_esg_adjustments, project, value, CapitalStructure, EsgAdjustments, EsgMetrics,
    FinancialInputs, Projection, ValuationError, ValuationResult,
};
pub use input::ScenarioInput;
pub use report::ValuationReport;
