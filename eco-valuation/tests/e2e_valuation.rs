//! End-to-end checks of the valuation pipeline against hand-computed figures
//! for the default scenario (WACC derived from the default capital structure).

use eco_valuation::analysis::{attribute_uplift, compare, run_baseline};
use eco_valuation::dcf::{EsgFactor, ValuationError};
use eco_valuation::{run_pipeline, ScenarioInput, ValuationReport};

const EPS: f64 = 1e-6;

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < EPS,
        "expected {expected}, got {actual}"
    );
}

// ============================================================================
// Baseline
// ============================================================================

#[test]
fn test_baseline_year_one() {
    let inputs = ScenarioInput::default().resolve();
    assert_close(inputs.wacc, 8.488);

    let run = run_baseline(&inputs).unwrap();
    let y1 = &run.projection.rows[0];

    assert_eq!(y1.year, 1);
    assert_close(y1.revenue, 10_500.0);
    assert_close(y1.cogs, 5_250.0);
    assert_close(y1.ebit, 3_990.0);
    assert_close(y1.ebiat, 3_032.4);
    assert_close(y1.depreciation, 378.0);
    assert_close(y1.capex, 420.0);
    assert_close(y1.change_in_nwc, 50.0);
    assert_close(y1.fcf, 2_940.4);
    assert_close(y1.discount_factor, 0.9217609320846545);
}

#[test]
fn test_baseline_year_five() {
    let inputs = ScenarioInput::default().resolve();
    let run = run_baseline(&inputs).unwrap();
    let y5 = run.projection.last();

    assert_eq!(y5.year, 5);
    assert_close(y5.revenue, 12_762.815625);
    assert_close(y5.fcf, 3_574.0745775);
}

#[test]
fn test_baseline_valuation() {
    let inputs = ScenarioInput::default().resolve();
    let v = run_baseline(&inputs).unwrap().valuation;

    assert_close(v.terminal_value, 107_591.12116900807);
    assert_close(v.present_value_tv, 71_592.56432172489);
    assert_close(v.total_pv_fcf, 12_707.894393871451);
    assert_close(v.enterprise_value, 84_300.45871559634);
    assert_close(v.equity_value, 82_300.45871559634);
    assert_close(v.price_per_share, 205.75114678899084);
}

// ============================================================================
// ESG Program
// ============================================================================

#[test]
fn test_esg_program_valuation() {
    let scenario = ScenarioInput::default();
    let run = run_pipeline(&scenario.resolve(), &scenario.esg).unwrap();

    assert_close(run.adjustments.gross_margin_shift, 9.24);
    assert_close(run.adjustments.ebit_shift, 6.6);

    let y1 = &run.projection.rows[0];
    assert_close(y1.cogs, 5_055.96);
    assert_close(y1.ebit, 4_322.64);
    assert_close(y1.fcf, 3_193.2064);

    let v = run.valuation;
    assert_close(v.terminal_value, 153_842.86245369844);
    assert_close(v.present_value_tv, 102_369.08869416351);
    assert_close(v.total_pv_fcf, 15_914.27287222069);
    assert_close(v.enterprise_value, 118_283.3615663842);
    assert_close(v.equity_value, 116_283.3615663842);
    assert_close(v.price_per_share, 290.7084039159605);
}

#[test]
fn test_comparison_and_attribution() {
    let scenario = ScenarioInput::default();
    let comparison = compare(&scenario.resolve(), &scenario.esg).unwrap();

    let uplift = 118_283.3615663842 - 84_300.45871559634;
    assert_close(comparison.uplift(), uplift);
    assert_close(
        comparison.price_per_share.change,
        290.7084039159605 - 205.75114678899084,
    );

    let attribution = attribute_uplift(&comparison, &scenario.esg);
    assert!((attribution.allocated() - uplift).abs() < 1e-6);

    // |-6.15| + |-3.09| + |7.15| + |-0.55| = 16.94
    let ghg = attribution.impact(EsgFactor::Ghg).unwrap();
    assert_close(ghg.value_impact, uplift * 6.15 / 16.94);
    let diversity = attribution.impact(EsgFactor::Diversity).unwrap();
    assert_close(diversity.margin_contribution, 7.15);
}

// ============================================================================
// Errors and Edge Cases
// ============================================================================

#[test]
fn test_later_cogs_entries_do_not_affect_results() {
    let scenario = ScenarioInput::default();
    let inputs = scenario.resolve();
    let mut altered = inputs;
    altered.cogs[1] = 1.0;
    altered.cogs[2] = 99_999.0;
    altered.cogs[3] = 0.0;
    altered.cogs[4] = 42.0;

    assert_eq!(
        run_pipeline(&inputs, &scenario.esg).unwrap(),
        run_pipeline(&altered, &scenario.esg).unwrap()
    );
}

#[test]
fn test_zero_revenue_is_rejected() {
    let scenario = ScenarioInput::default();
    let mut inputs = scenario.resolve();
    inputs.revenue = 0.0;

    assert_eq!(
        run_pipeline(&inputs, &scenario.esg).unwrap_err(),
        ValuationError::InvalidRevenue { revenue: 0.0 }
    );
}

#[test]
fn test_growth_above_wacc_is_rejected() {
    let mut scenario = ScenarioInput::default();
    scenario.financials.growth_rate = 9.0;

    assert!(matches!(
        run_pipeline(&scenario.resolve(), &scenario.esg),
        Err(ValuationError::NonConvergentTerminalValue { .. })
    ));
}

#[test]
fn test_negative_equity_is_reported_not_rejected() {
    let scenario = ScenarioInput::default();
    let mut inputs = scenario.resolve();
    inputs.net_debt = 500_000.0;

    let v = run_pipeline(&inputs, &scenario.esg).unwrap().valuation;
    assert!(v.equity_value < 0.0);
    assert!(v.price_per_share < 0.0);
}

#[test]
fn test_report_from_scenario_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("scenario.json");
    std::fs::write(
        &path,
        serde_json::to_string_pretty(&ScenarioInput::default()).unwrap(),
    )
    .unwrap();

    let scenario = ScenarioInput::load(&path).unwrap().validated().unwrap();
    let report = ValuationReport::build(&scenario, true).unwrap();

    assert_close(report.output.valuation.price_per_share, 290.7084039159605);
    assert!(report.to_markdown().contains("## Value Attribution"));
}
