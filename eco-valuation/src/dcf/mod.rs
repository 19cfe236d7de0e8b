//! Valuation Engine.
//!
//! Three stateless stages, run in order on every calculation:
//!
//! ```text
//! EsgMetrics ──► compute_esg_adjustments ──► EsgAdjustments
//!                                                │
//! FinancialInputs ─────────────────────► project ──► Projection (5 rows)
//!        │                                              │
//!        └────────────────────────────────────► value ──► ValuationResult
//! ```
//!
//! # Usage
//!
//! ```
//! use eco_valuation::dcf::{compute_esg_adjustments, project, value, EsgMetrics, FinancialInputs};
//!
//! let inputs = FinancialInputs::default();
//! let adjustments = compute_esg_adjustments(&EsgMetrics::unchanged(3.5, 3.5, 20.0, 90.0));
//! let projection = project(&inputs, &adjustments)?;
//! let result = value(&projection, &inputs)?;
//!
//! assert!(result.enterprise_value > 0.0);
//! # Ok::<(), eco_valuation::dcf::ValuationError>(())
//! ```

pub mod capital;
pub mod error;
pub mod esg;
pub mod projection;
pub mod types;
pub mod valuation;

pub use capital::CapitalStructure;
pub use error::{EngineResult, ValuationError};
pub use esg::{compute_esg_adjustments, EsgFactor, MarginLine};
pub use projection::project;
pub use types::{
    EsgAdjustments, EsgMetrics, FinancialInputs, Projection, ProjectionRow, ValuationResult,
    PROJECTION_YEARS,
};
pub use valuation::{gordon_terminal_value, value};
