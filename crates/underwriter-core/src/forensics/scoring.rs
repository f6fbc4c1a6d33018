//! Composite creditworthiness score.
//!
//! Starts at 100 and applies fixed, independent deductions:
//!
//! | Condition                          | Points |
//! |------------------------------------|--------|
//! | Distress index < 1.23              | -25    |
//! | Distress index in [1.23, 2.9)      | -10    |
//! | CFO / PAT < 0.8                    | -15    |
//! | Debt-to-equity > 2.0               | -15    |
//! | Current ratio < 1.0                | -10    |
//! | Interest coverage < 1.5            | -10    |
//! | Manipulation flag                  | -10    |
//!
//! The result is floored at 0.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::distress::{DistressAssessment, DistressZone};
use super::manipulation::EarningsQuality;
use super::ratios::RatioSet;

const STARTING_SCORE: u32 = 100;

pub const MAX_DEBT_TO_EQUITY: Decimal = dec!(2.0);
pub const MIN_CURRENT_RATIO: Decimal = dec!(1.0);
pub const MIN_INTEREST_COVERAGE: Decimal = dec!(1.5);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreRule {
    DistressZone,
    GreyZone,
    WeakCashRealization,
    HighLeverage,
    LiquidityStress,
    ThinInterestCover,
    ReceivablesManipulation,
}

impl ScoreRule {
    pub fn points(self) -> u32 {
        match self {
            Self::DistressZone => 25,
            Self::GreyZone => 10,
            Self::WeakCashRealization => 15,
            Self::HighLeverage => 15,
            Self::LiquidityStress => 10,
            Self::ThinInterestCover => 10,
            Self::ReceivablesManipulation => 10,
        }
    }

    fn describe(self) -> &'static str {
        match self {
            Self::DistressZone => "Distress index below 1.23",
            Self::GreyZone => "Distress index in grey zone (1.23 to 2.9)",
            Self::WeakCashRealization => "CFO / PAT below 0.8",
            Self::HighLeverage => "Debt-to-equity above 2.0",
            Self::LiquidityStress => "Current ratio below 1.0",
            Self::ThinInterestCover => "Interest coverage below 1.5",
            Self::ReceivablesManipulation => "Receivables growth above 1.3x revenue growth",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deduction {
    pub rule: ScoreRule,
    pub points: u32,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompositeScore {
    /// 0-100
    pub score: u8,
    /// Applied deductions in evaluation order.
    pub deductions: Vec<Deduction>,
}

impl CompositeScore {
    pub fn has(&self, rule: ScoreRule) -> bool {
        self.deductions.iter().any(|d| d.rule == rule)
    }
}

pub fn composite_score(
    ratios: &RatioSet,
    distress: &DistressAssessment,
    quality: &EarningsQuality,
) -> CompositeScore {
    let distress_rule = match distress.zone {
        DistressZone::Distress => Some(ScoreRule::DistressZone),
        DistressZone::Grey => Some(ScoreRule::GreyZone),
        DistressZone::Safe => None,
    };

    let checks = [
        (ScoreRule::WeakCashRealization, quality.weak_cash_realization),
        (ScoreRule::HighLeverage, ratios.debt_to_equity > MAX_DEBT_TO_EQUITY),
        (ScoreRule::LiquidityStress, ratios.current_ratio < MIN_CURRENT_RATIO),
        (ScoreRule::ThinInterestCover, ratios.interest_coverage < MIN_INTEREST_COVERAGE),
        (ScoreRule::ReceivablesManipulation, quality.manipulation_flag),
    ];

    let deductions: Vec<Deduction> = distress_rule
        .into_iter()
        .chain(checks.into_iter().filter(|(_, hit)| *hit).map(|(rule, _)| rule))
        .map(|rule| Deduction {
            rule,
            points: rule.points(),
            description: rule.describe().to_string(),
        })
        .collect();

    let total: u32 = deductions.iter().map(|d| d.points).sum();
    let score = STARTING_SCORE.saturating_sub(total) as u8;

    CompositeScore { score, deductions }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
