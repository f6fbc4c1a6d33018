//! Simplified five-signal Piotroski strength score.
//!
//! **Profitability**:
//! 1. ROA > 0
//! 2. CFO > 0
//! 3. CFO > PAT (accruals quality)
//!
//! **Leverage / Liquidity** (against the immediately preceding year):
//! 4. Debt-to-equity not rising (no prior year: compared against 100)
//! 5. Current ratio not falling (no prior year: compared against 0)
//!
//! Score 4-5 = Strong, 2-3 = Moderate, 0-1 = Weak. Display only; the
//! composite score does not use it.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::ratios::RatioSet;
use crate::record::FinancialRecord;

/// Debt-to-equity baseline when there is no prior year.
const NO_PRIOR_LEVERAGE: Decimal = dec!(100);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrengthScore {
    pub roa_positive: bool,
    pub cfo_positive: bool,
    pub cfo_exceeds_pat: bool,
    pub leverage_not_rising: bool,
    pub liquidity_not_falling: bool,
    /// Total score (0-5).
    pub f_score: u8,
    /// "Strong" (4-5), "Moderate" (2-3) or "Weak" (0-1).
    pub strength: String,
}

fn classify(score: u8) -> String {
    match score {
        4..=5 => "Strong".to_string(),
        2..=3 => "Moderate".to_string(),
        _ => "Weak".to_string(),
    }
}

pub fn simplified_f_score(
    record: &FinancialRecord,
    ratios: &RatioSet,
    prior: Option<&RatioSet>,
) -> StrengthScore {
    let prior_leverage = prior.map_or(NO_PRIOR_LEVERAGE, |p| p.debt_to_equity);
    let prior_liquidity = prior.map_or(Decimal::ZERO, |p| p.current_ratio);

    let roa_positive = ratios.roa_pct > Decimal::ZERO;
    let cfo_positive = record.cfo > Decimal::ZERO;
    let cfo_exceeds_pat = record.cfo > record.pat;
    let leverage_not_rising = ratios.debt_to_equity <= prior_leverage;
    let liquidity_not_falling = ratios.current_ratio >= prior_liquidity;

    let f_score = [
        roa_positive,
        cfo_positive,
        cfo_exceeds_pat,
        leverage_not_rising,
        liquidity_not_falling,
    ]
    .iter()
    .filter(|&&s| s)
    .count() as u8;

    StrengthScore {
        roa_positive,
        cfo_positive,
        cfo_exceeds_pat,
        leverage_not_rising,
        liquidity_not_falling,
        f_score,
        strength: classify(f_score),
    }
}
