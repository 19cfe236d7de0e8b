//! DCF Projector.
//!
//! Projects five years of revenue, costs and free cash flow, phasing the ESG
//! margin shifts in linearly (20% of the full shift in year 1, 100% in
//! year 5).
//!
//! ```text
//! revenue(y)  = revenue(y-1) × (1 + g)
//! margin(y)   = base gross margin + gross shift × y/5
//! EBIT(y)     = gross profit − SG&A − R&D − opex + revenue × ebit shift × y/5
//! FCF(y)      = EBIT × (1 − t) + D&A − CapEx − ΔNWC
//! ```
//!
//! Revenue and the NWC balance are the only values carried from one year to
//! the next.

use super::error::{EngineResult, ValuationError};
use super::types::{EsgAdjustments, FinancialInputs, Projection, ProjectionRow, PROJECTION_YEARS};

/// Project five years of cash flows.
///
/// # Errors
///
/// [`ValuationError::InvalidRevenue`] when the base revenue is not a positive
/// finite number, since the base gross margin divides by it.
pub fn project(inputs: &FinancialInputs, adjustments: &EsgAdjustments) -> EngineResult<Projection> {
    if !(inputs.revenue.is_finite() && inputs.revenue > 0.0) {
        return Err(ValuationError::InvalidRevenue {
            revenue: inputs.revenue,
        });
    }

    let mut rows = [ProjectionRow::default(); PROJECTION_YEARS];

    // Later COGS entries are ignored; only year 0 sets the margin baseline
    let base_gross_margin = inputs.base_gross_margin();
    let mut revenue = inputs.revenue;
    let mut nwc_last = inputs.revenue * inputs.nwc_pct;

    for (idx, row) in rows.iter_mut().enumerate() {
        let year = idx as i32 + 1;

        revenue *= 1.0 + inputs.growth_rate / 100.0;

        let esg_progress = f64::from(year) / PROJECTION_YEARS as f64;
        let gross_margin = base_gross_margin + adjustments.gross_margin_shift * esg_progress;

        let cogs = revenue * (1.0 - gross_margin / 100.0);
        let gross_profit = revenue - cogs;

        let sga = revenue * (inputs.sga / 100.0);
        let rd = revenue * (inputs.rd / 100.0);
        let opex = revenue * (inputs.opex / 100.0);
        let ebit_base = gross_profit - sga - rd - opex;

        // Revenue-scaled, not a percentage of EBIT
        let ebit_adjustment = revenue * (adjustments.ebit_shift * esg_progress / 100.0);
        let ebit = ebit_base + ebit_adjustment;

        let ebiat = ebit * (1.0 - inputs.tax_rate / 100.0);
        let depreciation = revenue * (inputs.dep_pct / 100.0);
        let capex = revenue * (inputs.capex_pct / 100.0);

        let nwc = revenue * inputs.nwc_pct;
        let change_in_nwc = nwc - nwc_last;
        nwc_last = nwc;

        let fcf = ebiat + depreciation - capex - change_in_nwc;
        let discount_factor = 1.0 / (1.0 + inputs.wacc / 100.0).powi(year);

        *row = ProjectionRow {
            year: year as u32,
            revenue,
            cogs,
            ebit,
            ebiat,
            depreciation,
            capex,
            change_in_nwc,
            fcf,
            discount_factor,
            discounted_fcf: fcf * discount_factor,
        };
    }

    tracing::debug!(
        base_gross_margin,
        final_revenue = revenue,
        final_fcf = rows[PROJECTION_YEARS - 1].fcf,
        "Projected cash flows"
    );

    Ok(Projection { rows })
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-6;

    fn assert_approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= EPS,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_baseline_first_year() {
        let projection = project(&FinancialInputs::default(), &EsgAdjustments::ZERO).unwrap();
        let y1 = &projection.rows[0];

        assert_eq!(y1.year, 1);
        assert_approx(y1.revenue, 10_500.0);
        assert_approx(y1.cogs, 5_250.0);
        assert_approx(y1.ebit, 3_990.0);
        assert_approx(y1.ebiat, 3_032.4);
        assert_approx(y1.depreciation, 378.0);
        assert_approx(y1.capex, 420.0);
        assert_approx(y1.change_in_nwc, 50.0);
        assert_approx(y1.fcf, 2_940.4);
        assert_approx(y1.discount_factor, 1.0 / 1.08488);
    }

    #[test]
    fn test_years_are_numbered_in_order() {
        let projection = project(&FinancialInputs::default(), &EsgAdjustments::ZERO).unwrap();
        let years: Vec<u32> = projection.iter().map(|r| r.year).collect();
        assert_eq!(years, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_esg_shift_is_phased_in_linearly() {
        let adjustments = EsgAdjustments {
            gross_margin_shift: 10.0,
            ebit_shift: 0.0,
        };
        let projection = project(&FinancialInputs::default(), &adjustments).unwrap();

        for row in projection.iter() {
            let expected = 50.0 + 10.0 * f64::from(row.year) / 5.0;
            assert_approx(row.gross_margin_pct(), expected);
        }
    }

    #[test]
    fn test_ebit_shift_scales_with_revenue() {
        let inputs = FinancialInputs::default();
        let base = project(&inputs, &EsgAdjustments::ZERO).unwrap();
        let shifted = project(
            &inputs,
            &EsgAdjustments {
                gross_margin_shift: 0.0,
                ebit_shift: 5.0,
            },
        )
        .unwrap();

        for (b, s) in base.iter().zip(shifted.iter()) {
            let expected = b.revenue * 5.0 * f64::from(b.year) / 5.0 / 100.0;
            assert_approx(s.ebit - b.ebit, expected);
            assert_approx(s.cogs, b.cogs);
        }
    }

    #[test]
    fn test_later_cogs_entries_are_ignored() {
        let inputs = FinancialInputs::default();
        let mut altered = inputs;
        altered.cogs = [inputs.cogs[0], 1.0, 99_999.0, 0.0, 42.0];

        let a = project(&inputs, &EsgAdjustments::ZERO).unwrap();
        let b = project(&altered, &EsgAdjustments::ZERO).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_zero_revenue_is_rejected() {
        let mut inputs = FinancialInputs::default();
        inputs.revenue = 0.0;
        assert_eq!(
            project(&inputs, &EsgAdjustments::ZERO),
            Err(ValuationError::InvalidRevenue { revenue: 0.0 })
        );
    }

    #[test]
    fn test_non_finite_revenue_is_rejected() {
        let mut inputs = FinancialInputs::default();
        inputs.revenue = f64::NAN;
        assert!(matches!(
            project(&inputs, &EsgAdjustments::ZERO),
            Err(ValuationError::InvalidRevenue { .. })
        ));
    }
}
