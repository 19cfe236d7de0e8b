//! Margin trajectories.
//!
//! Year-by-year gross and operating margins of the baseline and ESG runs,
//! read back from the projected line items.

use serde::{Deserialize, Serialize};

use crate::dcf::Projection;

/// Margins of one projected year under both scenarios (%).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarginPoint {
    pub year: u32,
    pub baseline_gross_margin: f64,
    pub esg_gross_margin: f64,
    pub baseline_operating_margin: f64,
    pub esg_operating_margin: f64,
}

impl MarginPoint {
    /// ESG minus baseline gross margin (pp).
    pub fn gross_margin_gain(&self) -> f64 {
        self.esg_gross_margin - self.baseline_gross_margin
    }

    /// ESG minus baseline operating margin (pp).
    pub fn operating_margin_gain(&self) -> f64 {
        self.esg_operating_margin - self.baseline_operating_margin
    }
}

/// Pair up the two projections year by year.
pub fn margin_trajectory(baseline: &Projection, esg: &Projection) -> Vec<MarginPoint> {
    baseline
        .iter()
        .zip(esg.iter())
        .map(|(b, e)| MarginPoint {
            year: b.year,
            baseline_gross_margin: b.gross_margin_pct(),
            esg_gross_margin: e.gross_margin_pct(),
            baseline_operating_margin: b.operating_margin_pct(),
            esg_operating_margin: e.operating_margin_pct(),
        })
        .collect()
}
