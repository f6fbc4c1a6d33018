//! Property-based tests for the diagnostic pipeline
//!
//! Invariants that hold for every normalized record:
//! - Composite score stays within [0, 100]
//! - Ratio derivation is total and deterministic
//! - Life-cycle classification follows the fixed rule order
//! - The decision tier always agrees with the score

use proptest::prelude::*;
use rust_decimal::Decimal;
use serde_json::{json, Map, Value};

use underwriter_core::forensics::lifecycle::{classify_life_cycle, LifeCycleStage};
use underwriter_core::forensics::ratios::derive_ratios;
use underwriter_core::metrics::derive_metrics;
use underwriter_core::normalize::normalize_record;
use underwriter_core::record::{FinancialRecord, LineItem};
use underwriter_core::verdict::{Decision, RuleBasedComposer, VerdictComposer};

/// Amounts in hundredths, up to +/- 1e12, with zero heavily represented so
/// that zero denominators are exercised.
fn amount() -> impl Strategy<Value = Decimal> {
    prop_oneof![
        1 => Just(Decimal::ZERO),
        3 => (-100_000_000_000_000i64..100_000_000_000_000i64).prop_map(|v| Decimal::new(v, 2)),
    ]
}

fn record() -> impl Strategy<Value = FinancialRecord> {
    prop::collection::vec(amount(), LineItem::ALL.len()).prop_map(|values| {
        LineItem::ALL
            .iter()
            .zip(values)
            .fold(FinancialRecord::new("Prop Co", 2024), |record, (item, value)| {
                record.with(*item, value)
            })
    })
}

fn sign() -> impl Strategy<Value = Decimal> {
    prop_oneof![Just(Decimal::NEGATIVE_ONE), Just(Decimal::ZERO), Just(Decimal::ONE)]
}

proptest! {
    #[test]
    fn prop_composite_score_is_bounded(current in record(), prior in record()) {
        let metrics = derive_metrics(&current, Some(&prior));
        prop_assert!(metrics.score() <= 100);

        let deducted: u32 = metrics.composite.deductions.iter().map(|d| d.points).sum();
        prop_assert_eq!(u32::from(metrics.score()), 100u32.saturating_sub(deducted));
    }

    #[test]
    fn prop_ratio_derivation_is_deterministic(record in record()) {
        prop_assert_eq!(derive_ratios(&record), derive_ratios(&record));
        prop_assert_eq!(derive_metrics(&record, None), derive_metrics(&record, None));
    }

    #[test]
    fn prop_first_period_never_flags_manipulation(record in record()) {
        let metrics = derive_metrics(&record, None);
        prop_assert!(!metrics.earnings_quality.manipulation_flag);
        prop_assert_eq!(metrics.earnings_quality.growth.revenue_growth, Decimal::ZERO);
    }

    #[test]
    fn prop_life_cycle_rule_order(cfo in sign(), cfi in sign(), cff in sign()) {
        let zero = Decimal::ZERO;
        let expected = if cfo < zero && cfi < zero && cff > zero {
            LifeCycleStage::Introduction
        } else if cfo > zero && cfi < zero && cff > zero {
            LifeCycleStage::Growth
        } else if cfo > zero && cfi < zero && cff < zero {
            LifeCycleStage::Mature
        } else if cfo < zero {
            LifeCycleStage::DeclineStress
        } else {
            LifeCycleStage::Transition
        };
        prop_assert_eq!(classify_life_cycle(cfo, cfi, cff), expected);
    }

    #[test]
    fn prop_decision_matches_score(record in record()) {
        let verdict = RuleBasedComposer.compose(&derive_metrics(&record, None));
        let expected = match verdict.composite_score {
            75..=100 => Decision::Approve,
            50..=74 => Decision::Review,
            _ => Decision::Reject,
        };
        prop_assert_eq!(verdict.decision, expected);
        prop_assert!(!verdict.rationale.is_empty());
    }

    #[test]
    fn prop_normalizer_is_total(text in ".{0,12}", number in any::<i32>()) {
        let mut raw = Map::new();
        raw.insert("Company".into(), json!("Noisy"));
        raw.insert("Year".into(), Value::String(text.clone()));
        raw.insert("Revenue".into(), Value::String(text));
        raw.insert("PAT".into(), json!(number));
        let record = normalize_record(&raw);
        prop_assert_eq!(record.pat, Decimal::from(number));
        prop_assert_eq!(record.cfo, Decimal::ZERO);
        let _ = derive_metrics(&record, None);
    }
}
