//! Earnings-quality and manipulation detector.
//!
//! Two independent signals:
//! - **Weak cash realization**: operating cash flow covers less than 80% of
//!   reported profit (CFO / PAT < 0.8).
//! - **Receivables outpacing revenue**: receivables grew more than 1.3x as
//!   fast as revenue versus the immediately preceding period. Only the second
//!   signal sets the manipulation flag.
//!
//! A record with no prior period has zero growth on both lines and can never
//! raise the manipulation flag.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::ratios::RatioSet;
use crate::math::growth_rate;
use crate::record::FinancialRecord;
use crate::types::{Multiple, Rate};

/// CFO / PAT strictly below this is weak cash realization.
pub const WEAK_CASH_REALIZATION: Decimal = dec!(0.8);

/// Receivables growth must exceed revenue growth times this multiple.
pub const RECEIVABLES_GROWTH_MULTIPLE: Decimal = dec!(1.3);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrowthPair {
    pub revenue_growth: Rate,
    pub receivables_growth: Rate,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EarningsQuality {
    pub cfo_to_pat: Multiple,
    pub accruals_ratio: Rate,
    pub weak_cash_realization: bool,
    pub growth: GrowthPair,
    pub has_prior_period: bool,
    pub manipulation_flag: bool,
}

/// Assess cash realization and receivables growth for `record`.
///
/// `prior` must be the immediately preceding fiscal year of the same entity,
/// or `None` for the first observation or an ad-hoc entry.
pub fn assess_earnings_quality(
    record: &FinancialRecord,
    prior: Option<&FinancialRecord>,
    ratios: &RatioSet,
) -> EarningsQuality {
    let growth = GrowthPair {
        revenue_growth: growth_rate(record.revenue, prior.map(|p| p.revenue)),
        receivables_growth: growth_rate(record.receivables, prior.map(|p| p.receivables)),
    };

    let threshold = growth
        .revenue_growth
        .saturating_mul(RECEIVABLES_GROWTH_MULTIPLE);

    EarningsQuality {
        cfo_to_pat: ratios.cfo_to_pat,
        accruals_ratio: ratios.accruals_ratio,
        weak_cash_realization: ratios.cfo_to_pat < WEAK_CASH_REALIZATION,
        manipulation_flag: growth.receivables_growth > threshold,
        has_prior_period: prior.is_some(),
        growth,
    }
}
