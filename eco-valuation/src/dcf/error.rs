//! Engine error types.
//!
//! Each variant is a precondition that would otherwise turn into NaN or
//! infinity somewhere in the projection or the terminal value.

use thiserror::Error;

/// Result type alias for engine operations.
pub type EngineResult<T> = Result<T, ValuationError>;

/// Precondition failures of the valuation engine.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ValuationError {
    /// Base revenue is zero, negative or not finite
    #[error("revenue must be a positive finite number, got {revenue}")]
    InvalidRevenue { revenue: f64 },

    /// WACC does not exceed the perpetuity growth rate (both in %)
    #[error(
        "terminal value does not converge: WACC {wacc}% must exceed terminal growth {terminal_growth}%"
    )]
    NonConvergentTerminalValue { wacc: f64, terminal_growth: f64 },

    /// Share count is zero, negative or not finite
    #[error("shares outstanding must be a positive finite number, got {shares_outstanding}")]
    InvalidShareCount { shares_outstanding: f64 },
}
