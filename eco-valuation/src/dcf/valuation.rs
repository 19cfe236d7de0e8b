//! Valuation Calculator.
//!
//! Turns a completed projection into enterprise value, equity value and a
//! per-share price using a Gordon Growth terminal value. The perpetuity
//! growth rate is the same annual growth rate that drove the projection.

use super::error::{EngineResult, ValuationError};
use super::types::{FinancialInputs, Projection, ValuationResult, PROJECTION_YEARS};

/// Value a projection.
///
/// # Errors
///
/// - [`ValuationError::NonConvergentTerminalValue`] when WACC does not exceed
///   the growth rate.
/// - [`ValuationError::InvalidShareCount`] when the share count is not a
///   positive finite number.
pub fn value(projection: &Projection, inputs: &FinancialInputs) -> EngineResult<ValuationResult> {
    let wacc = inputs.wacc / 100.0;
    let terminal_growth = inputs.growth_rate / 100.0;

    let spread = wacc - terminal_growth;
    if spread.is_nan() || spread <= 0.0 {
        return Err(ValuationError::NonConvergentTerminalValue {
            wacc: inputs.wacc,
            terminal_growth: inputs.growth_rate,
        });
    }
    if !(inputs.shares_outstanding.is_finite() && inputs.shares_outstanding > 0.0) {
        return Err(ValuationError::InvalidShareCount {
            shares_outstanding: inputs.shares_outstanding,
        });
    }

    let terminal_fcf = projection.last().fcf;
    let terminal_value = terminal_fcf * (1.0 + terminal_growth) / spread;
    let present_value_tv = terminal_value / (1.0 + wacc).powi(PROJECTION_YEARS as i32);

    let total_pv_fcf = projection.total_discounted_fcf();
    let enterprise_value = total_pv_fcf + present_value_tv;
    let equity_value = enterprise_value - inputs.net_debt;
    let price_per_share = equity_value / inputs.shares_outstanding;

    tracing::debug!(
        terminal_value,
        enterprise_value,
        price_per_share,
        "Computed valuation"
    );

    Ok(ValuationResult {
        terminal_value,
        present_value_tv,
        enterprise_value,
        equity_value,
        price_per_share,
        total_pv_fcf,
    })
}

/// Gordon Growth terminal value for a final-year cash flow.
///
/// `wacc` and `growth` are in percent. Returns `None` when the formula does
/// not converge.
pub fn gordon_terminal_value(terminal_fcf: f64, wacc: f64, growth: f64) -> Option<f64> {
    let (r, g) = (wacc / 100.0, growth / 100.0);
    (r - g > 0.0).then(|| terminal_fcf * (1.0 + g) / (r - g))
}
