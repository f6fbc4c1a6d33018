//! Business life-cycle stage from the sign pattern of the three cash-flow
//! aggregates (operating, investing, financing).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::record::FinancialRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LifeCycleStage {
    Introduction,
    Growth,
    Mature,
    #[serde(rename = "Decline/Stress")]
    DeclineStress,
    Transition,
}

impl std::fmt::Display for LifeCycleStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Introduction => "Introduction",
            Self::Growth => "Growth",
            Self::Mature => "Mature",
            Self::DeclineStress => "Decline/Stress",
            Self::Transition => "Transition",
        };
        write!(f, "{}", s)
    }
}

/// Classify by sign of (CFO, CFI, CFF). Rules are evaluated in order and the
/// first match wins; zero counts as neither positive nor negative.
pub fn classify_life_cycle(cfo: Decimal, cfi: Decimal, cff: Decimal) -> LifeCycleStage {
    let neg = |v: Decimal| v < Decimal::ZERO;
    let pos = |v: Decimal| v > Decimal::ZERO;

    if neg(cfo) && neg(cfi) && pos(cff) {
        LifeCycleStage::Introduction
    } else if pos(cfo) && neg(cfi) && pos(cff) {
        LifeCycleStage::Growth
    } else if pos(cfo) && neg(cfi) && neg(cff) {
        LifeCycleStage::Mature
    } else if neg(cfo) {
        LifeCycleStage::DeclineStress
    } else {
        LifeCycleStage::Transition
    }
}

impl FinancialRecord {
    pub fn life_cycle_stage(&self) -> LifeCycleStage {
        classify_life_cycle(self.cfo, self.cfi, self.cff)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_introduction_beats_decline() {
        assert_eq!(
            classify_life_cycle(dec!(-10), dec!(-5), dec!(20)),
            LifeCycleStage::Introduction
        );
        assert_eq!(
            classify_life_cycle(dec!(-100), dec!(-50), dec!(200)),
            LifeCycleStage::Introduction
        );
    }

    #[test]
    fn test_growth_and_mature() {
        assert_eq!(
            classify_life_cycle(dec!(500), dec!(-200), dec!(100)),
            LifeCycleStage::Growth
        );
        assert_eq!(
            classify_life_cycle(dec!(500), dec!(-200), dec!(-100)),
            LifeCycleStage::Mature
        );
    }

    #[test]
    fn test_negative_cfo_fallthrough_is_decline() {
        assert_eq!(
            classify_life_cycle(dec!(-1), dec!(10), dec!(10)),
            LifeCycleStage::DeclineStress
        );
        assert_eq!(
            classify_life_cycle(dec!(-1), dec!(-1), dec!(0)),
            LifeCycleStage::DeclineStress
        );
    }

    #[test]
    fn test_zeros_fall_through_to_transition() {
        assert_eq!(
            classify_life_cycle(Decimal::ZERO, Decimal::ZERO, Decimal::ZERO),
            LifeCycleStage::Transition
        );
        // CFF exactly zero is neither financing inflow nor outflow
        assert_eq!(
            classify_life_cycle(dec!(500), dec!(-200), Decimal::ZERO),
            LifeCycleStage::Transition
        );
        assert_eq!(
            classify_life_cycle(dec!(500), dec!(200), dec!(-100)),
            LifeCycleStage::Transition
        );
    }

    #[test]
    fn test_every_sign_triple_maps_to_one_stage() {
        let signs = [dec!(-1), Decimal::ZERO, dec!(1)];
        let mut seen = std::collections::HashSet::new();
        for cfo in signs {
            for cfi in signs {
                for cff in signs {
                    seen.insert(classify_life_cycle(cfo, cfi, cff));
                }
            }
        }
        assert_eq!(seen.len(), 5);
    }

    #[test]
    fn test_display_and_serde_labels() {
        assert_eq!(LifeCycleStage::DeclineStress.to_string(), "Decline/Stress");
        assert_eq!(
            serde_json::to_value(LifeCycleStage::DeclineStress).unwrap(),
            serde_json::json!("Decline/Stress")
        );
    }
}
