//! Ratio deriver: liquidity, profitability, solvency, efficiency and
//! cash-realization ratios from a single normalized record.
//!
//! Every division uses [`safe_divide`], so a zero denominator yields a
//! defined (if low-confidence) value rather than infinity.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::math::{difference, is_substituted, safe_divide, scale};
use crate::record::FinancialRecord;
use crate::types::{Multiple, Percent, Rate};

const HUNDRED: Decimal = dec!(100);
const DAYS_IN_YEAR: Decimal = dec!(365);

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatioSet {
    // Liquidity
    pub current_ratio: Multiple,
    pub ocf_ratio: Multiple,
    // Profitability
    pub net_profit_margin_pct: Percent,
    pub roa_pct: Percent,
    pub roe_pct: Percent,
    pub roce_pct: Percent,
    // Efficiency
    pub debtor_days: Decimal,
    // Solvency
    pub debt_to_equity: Multiple,
    pub interest_coverage: Multiple,
    // DuPont inputs
    pub dupont_margin: Rate,
    pub asset_turnover: Multiple,
    pub financial_leverage: Multiple,
    // Cash realization
    pub cfo_to_pat: Multiple,
    pub accruals_ratio: Rate,
}

/// ROE expressed as margin x turnover x leverage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DupontBreakdown {
    pub net_margin_pct: Percent,
    pub asset_turnover: Multiple,
    pub financial_leverage: Multiple,
    pub roe_pct: Percent,
    /// margin x turnover x leverage x 100. Equals `roe_pct` unless a
    /// denominator was substituted.
    pub implied_roe_pct: Percent,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Derive the full ratio set for one record.
pub fn derive_ratios(record: &FinancialRecord) -> RatioSet {
    RatioSet {
        current_ratio: safe_divide(record.current_assets, record.current_liabilities),
        ocf_ratio: safe_divide(record.cfo, record.current_liabilities),

        net_profit_margin_pct: percent(record.pat, record.revenue),
        roa_pct: percent(record.pat, record.total_assets),
        roe_pct: percent(record.pat, record.equity),
        roce_pct: percent(record.ebit, record.capital_employed()),

        debtor_days: scale(safe_divide(record.receivables, record.revenue), DAYS_IN_YEAR),

        debt_to_equity: safe_divide(record.total_debt, record.equity),
        interest_coverage: safe_divide(record.ebit, record.interest),

        dupont_margin: safe_divide(record.pat, record.revenue),
        asset_turnover: safe_divide(record.revenue, record.total_assets),
        financial_leverage: safe_divide(record.total_assets, record.equity),

        cfo_to_pat: safe_divide(record.cfo, record.pat),
        accruals_ratio: safe_divide(difference(record.pat, record.cfo), record.total_assets),
    }
}

impl RatioSet {
    pub fn dupont(&self) -> DupontBreakdown {
        let implied = self
            .dupont_margin
            .checked_mul(self.asset_turnover)
            .and_then(|v| v.checked_mul(self.financial_leverage))
            .map(|v| scale(v, HUNDRED))
            .unwrap_or(self.roe_pct);

        DupontBreakdown {
            net_margin_pct: scale(self.dupont_margin, HUNDRED),
            asset_turnover: self.asset_turnover,
            financial_leverage: self.financial_leverage,
            roe_pct: self.roe_pct,
            implied_roe_pct: implied,
        }
    }
}

/// Canonical denominators of this record that are zero and therefore get
/// replaced by 1 somewhere in the ratio set or the distress index.
pub fn substituted_denominators(record: &FinancialRecord) -> Vec<&'static str> {
    [
        ("CurrentLiabilities", record.current_liabilities),
        ("Revenue", record.revenue),
        ("TotalAssets", record.total_assets),
        ("Equity", record.equity),
        ("TotalDebt+Equity", record.capital_employed()),
        ("Interest", record.interest),
        ("PAT", record.pat),
        ("TotalDebt", record.total_debt),
    ]
    .into_iter()
    .filter(|(_, value)| is_substituted(*value))
    .map(|(name, _)| name)
    .collect()
}

fn percent(numerator: Decimal, denominator: Decimal) -> Percent {
    scale(safe_divide(numerator, denominator), HUNDRED)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
