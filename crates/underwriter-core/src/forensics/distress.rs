//! Distress estimator: the emerging-market form of the Altman Z''-Score.
//!
//! Z'' = 3.25 + 6.56*X1 + 3.26*X2 + 6.72*X3 + 1.05*X4
//!
//! X2 uses profit after tax in place of retained earnings and X4 uses book
//! equity over total debt. X5 (revenue / total assets) is reported for
//! display but carries no weight.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::math::{difference, safe_divide};
use crate::record::FinancialRecord;
use crate::types::Rate;

// ---------------------------------------------------------------------------
// Coefficients
// ---------------------------------------------------------------------------

const CONSTANT: Decimal = dec!(3.25);
const COEFF_X1: Decimal = dec!(6.56);
const COEFF_X2: Decimal = dec!(3.26);
const COEFF_X3: Decimal = dec!(6.72);
const COEFF_X4: Decimal = dec!(1.05);

/// Index values below this are in the distress band.
pub const DISTRESS_UPPER: Decimal = dec!(1.23);
/// Index values at or above this are in the safe band.
pub const SAFE_LOWER: Decimal = dec!(2.9);

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DistressZone {
    Safe,
    Grey,
    Distress,
}

impl std::fmt::Display for DistressZone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Safe => write!(f, "SAFE"),
            Self::Grey => write!(f, "GREY"),
            Self::Distress => write!(f, "DISTRESS"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistressComponent {
    pub name: String,
    pub ratio: Decimal,
    pub coefficient: Decimal,
    pub weighted_value: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DistressAssessment {
    /// Working capital / total assets
    pub x1: Rate,
    /// PAT / total assets
    pub x2: Rate,
    /// EBIT / total assets
    pub x3: Rate,
    /// Equity / total debt
    pub x4: Rate,
    /// Revenue / total assets (display only)
    pub x5: Rate,
    pub index: Decimal,
    pub zone: DistressZone,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

pub fn estimate_distress(record: &FinancialRecord) -> DistressAssessment {
    let working_capital = difference(record.current_assets, record.current_liabilities);

    let x1 = safe_divide(working_capital, record.total_assets);
    let x2 = safe_divide(record.pat, record.total_assets);
    let x3 = safe_divide(record.ebit, record.total_assets);
    let x4 = safe_divide(record.equity, record.total_debt);
    let x5 = safe_divide(record.revenue, record.total_assets);

    let index = weighted_terms(x1, x2, x3, x4)
        .iter()
        .fold(CONSTANT, |acc, term| acc.saturating_add(*term));

    DistressAssessment {
        x1,
        x2,
        x3,
        x4,
        x5,
        index,
        zone: classify_zone(index),
    }
}

/// Map an index value to its band.
pub fn classify_zone(index: Decimal) -> DistressZone {
    if index < DISTRESS_UPPER {
        DistressZone::Distress
    } else if index < SAFE_LOWER {
        DistressZone::Grey
    } else {
        DistressZone::Safe
    }
}

impl DistressAssessment {
    /// Weighted breakdown of the four scored ratios.
    pub fn components(&self) -> Vec<DistressComponent> {
        let weighted = weighted_terms(self.x1, self.x2, self.x3, self.x4);
        [
            ("X1: Working Capital / Total Assets", self.x1, COEFF_X1),
            ("X2: PAT / Total Assets", self.x2, COEFF_X2),
            ("X3: EBIT / Total Assets", self.x3, COEFF_X3),
            ("X4: Equity / Total Debt", self.x4, COEFF_X4),
        ]
        .into_iter()
        .zip(weighted)
        .map(|((name, ratio, coefficient), weighted_value)| DistressComponent {
            name: name.to_string(),
            ratio,
            coefficient,
            weighted_value,
        })
        .collect()
    }
}

fn weighted_terms(x1: Decimal, x2: Decimal, x3: Decimal, x4: Decimal) -> [Decimal; 4] {
    [
        COEFF_X1.saturating_mul(x1),
        COEFF_X2.saturating_mul(x2),
        COEFF_X3.saturating_mul(x3),
        COEFF_X4.saturating_mul(x4),
    ]
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::LineItem;

    fn healthy() -> FinancialRecord {
        FinancialRecord::new("Healthy", 2024)
            .with(LineItem::CurrentAssets, dec!(6000))
            .with(LineItem::CurrentLiabilities, dec!(4000))
            .with(LineItem::TotalAssets, dec!(20000))
            .with(LineItem::Pat, dec!(2000))
            .with(LineItem::Ebit, dec!(3000))
            .with(LineItem::Equity, dec!(10000))
            .with(LineItem::TotalDebt, dec!(5000))
            .with(LineItem::Revenue, dec!(30000))
    }

    #[test]
    fn test_components_and_index() {
        let d = estimate_distress(&healthy());
        assert_eq!(d.x1, dec!(0.1));
        assert_eq!(d.x2, dec!(0.1));
        assert_eq!(d.x3, dec!(0.15));
        assert_eq!(d.x4, dec!(2));
        assert_eq!(d.x5, dec!(1.5));
        // 3.25 + 0.656 + 0.326 + 1.008 + 2.1
        assert_eq!(d.index, dec!(7.34));
        assert_eq!(d.zone, DistressZone::Safe);
    }

    #[test]
    fn test_x5_excluded_from_index() {
        let mut record = healthy();
        let before = estimate_distress(&record).index;
        record.revenue = dec!(1_000_000);
        let after = estimate_distress(&record);
        assert_eq!(after.index, before);
        assert_eq!(after.x5, dec!(50));
    }

    #[test]
    fn test_zone_boundaries() {
        assert_eq!(classify_zone(dec!(1.2299)), DistressZone::Distress);
        assert_eq!(classify_zone(dec!(1.23)), DistressZone::Grey);
        assert_eq!(classify_zone(dec!(2.8999)), DistressZone::Grey);
        assert_eq!(classify_zone(dec!(2.9)), DistressZone::Safe);
    }

    #[test]
    fn test_distressed_company() {
        let record = FinancialRecord::new("Distressed", 2024)
            .with(LineItem::CurrentAssets, dec!(2000))
            .with(LineItem::CurrentLiabilities, dec!(6000))
            .with(LineItem::TotalAssets, dec!(10000))
            .with(LineItem::Pat, dec!(-1500))
            .with(LineItem::Ebit, dec!(-800))
            .with(LineItem::Equity, dec!(500))
            .with(LineItem::TotalDebt, dec!(9000));
        let d = estimate_distress(&record);
        assert!(d.index < DISTRESS_UPPER, "index {}", d.index);
        assert_eq!(d.zone, DistressZone::Distress);
    }

    #[test]
    fn test_empty_record_scores_constant_plus_nothing() {
        let d = estimate_distress(&FinancialRecord::default());
        assert_eq!(d.index, dec!(3.25));
        assert_eq!(d.zone, DistressZone::Safe);
    }

    #[test]
    fn test_component_breakdown_sums_to_index() {
        let d = estimate_distress(&healthy());
        let components = d.components();
        assert_eq!(components.len(), 4);
        assert_eq!(components[3].coefficient, dec!(1.05));
        let total: Decimal = components.iter().map(|c| c.weighted_value).sum();
        assert_eq!(CONSTANT + total, d.index);
    }

    #[test]
    fn test_zone_display() {
        assert_eq!(DistressZone::Grey.to_string(), "GREY");
        assert_eq!(
            serde_json::to_value(DistressZone::Distress).unwrap(),
            serde_json::json!("DISTRESS")
        );
    }
}
