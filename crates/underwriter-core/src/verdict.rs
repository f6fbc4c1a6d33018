//! Verdict composer.
//!
//! One capability, two interchangeable implementations:
//! - [`RuleBasedComposer`] maps the composite score to a decision and emits a
//!   fixed-order rationale line per triggered red flag.
//! - [`GenerativeComposer`] produces the same verdict and additionally asks an
//!   external [`NarrativeGenerator`] for a prose rewrite. The narrative never
//!   changes the decision, risk profile or score.
//!
//! [`build_composer`] picks the implementation from configuration.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::{VerdictConfig, VerdictStrategy};
use crate::forensics::distress::DistressZone;
use crate::forensics::lifecycle::LifeCycleStage;
use crate::forensics::scoring::ScoreRule;
use crate::metrics::DerivedMetrics;
use crate::types::FiscalYear;
use crate::{UnderwriterError, UnderwriterResult};

const APPROVE_FLOOR: u8 = 75;
const REVIEW_FLOOR: u8 = 50;
const HUNDRED: Decimal = dec!(100);

pub const NO_RED_FLAGS: &str = "No major forensic red flags detected.";

// ---------------------------------------------------------------------------
// Verdict types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Decision {
    Approve,
    Review,
    Reject,
}

impl std::fmt::Display for Decision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Approve => write!(f, "APPROVE"),
            Self::Review => write!(f, "REVIEW"),
            Self::Reject => write!(f, "REJECT"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskProfile {
    #[serde(rename = "LOW RISK")]
    Low,
    #[serde(rename = "MEDIUM RISK")]
    Medium,
    #[serde(rename = "HIGH RISK")]
    High,
}

impl std::fmt::Display for RiskProfile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "LOW RISK"),
            Self::Medium => write!(f, "MEDIUM RISK"),
            Self::High => write!(f, "HIGH RISK"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub decision: Decision,
    pub risk_profile: RiskProfile,
    pub composite_score: u8,
    /// One line per triggered condition, in fixed order.
    pub rationale: Vec<String>,
    /// Free-text rewrite from the generative strategy, if one was produced.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub narrative: Option<String>,
    pub strategy: VerdictStrategy,
}

/// Map a composite score to its decision tier.
pub fn decide(score: u8) -> (Decision, RiskProfile) {
    if score >= APPROVE_FLOOR {
        (Decision::Approve, RiskProfile::Low)
    } else if score >= REVIEW_FLOOR {
        (Decision::Review, RiskProfile::Medium)
    } else {
        (Decision::Reject, RiskProfile::High)
    }
}

/// Rationale lines for every triggered condition: distress zone, weak cash
/// conversion, high leverage, liquidity stress, manipulation flag.
pub fn rationale_lines(metrics: &DerivedMetrics) -> Vec<String> {
    let mut lines = Vec::new();

    if metrics.distress.zone == DistressZone::Distress {
        lines.push(format!(
            "High bankruptcy risk: distress index {:.2} is below 1.23",
            metrics.distress.index.round_dp(2)
        ));
    }
    if metrics.earnings_quality.weak_cash_realization {
        lines.push(format!(
            "Low earnings quality (paper profits): CFO/PAT of {:.2} is below 0.8",
            metrics.ratios.cfo_to_pat.round_dp(2)
        ));
    }
    if metrics.composite.has(ScoreRule::HighLeverage) {
        lines.push(format!(
            "High leverage: debt-to-equity of {:.2}x exceeds 2.0x",
            metrics.ratios.debt_to_equity.round_dp(2)
        ));
    }
    if metrics.composite.has(ScoreRule::LiquidityStress) {
        lines.push(format!(
            "Liquidity stress: current ratio of {:.2}x is below 1.0x",
            metrics.ratios.current_ratio.round_dp(2)
        ));
    }
    if metrics.earnings_quality.manipulation_flag {
        let growth = &metrics.earnings_quality.growth;
        lines.push(format!(
            "Possible revenue manipulation: receivables grew {:.1}% against revenue growth of {:.1}%",
            growth.receivables_growth.saturating_mul(HUNDRED).round_dp(1),
            growth.revenue_growth.saturating_mul(HUNDRED).round_dp(1)
        ));
    }

    if lines.is_empty() {
        lines.push(NO_RED_FLAGS.to_string());
    }
    lines
}

// ---------------------------------------------------------------------------
// Composer capability
// ---------------------------------------------------------------------------

pub trait VerdictComposer: Send + Sync {
    fn strategy(&self) -> VerdictStrategy;

    fn compose(&self, metrics: &DerivedMetrics) -> Verdict;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RuleBasedComposer;

impl VerdictComposer for RuleBasedComposer {
    fn strategy(&self) -> VerdictStrategy {
        VerdictStrategy::Rules
    }

    fn compose(&self, metrics: &DerivedMetrics) -> Verdict {
        let (decision, risk_profile) = decide(metrics.score());
        Verdict {
            decision,
            risk_profile,
            composite_score: metrics.score(),
            rationale: rationale_lines(metrics),
            narrative: None,
            strategy: VerdictStrategy::Rules,
        }
    }
}

/// Everything a narrative generator is allowed to see.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NarrativeRequest {
    pub entity: String,
    pub year: FiscalYear,
    pub decision: Decision,
    pub risk_profile: RiskProfile,
    pub composite_score: u8,
    pub distress_index: Decimal,
    pub life_cycle: LifeCycleStage,
    pub rationale: Vec<String>,
}

impl NarrativeRequest {
    fn new(metrics: &DerivedMetrics, verdict: &Verdict) -> Self {
        Self {
            entity: metrics.entity.clone(),
            year: metrics.year,
            decision: verdict.decision,
            risk_profile: verdict.risk_profile,
            composite_score: verdict.composite_score,
            distress_index: metrics.distress.index,
            life_cycle: metrics.life_cycle,
            rationale: verdict.rationale.clone(),
        }
    }

    /// Plain-text prompt summarizing the already-decided verdict.
    pub fn prompt(&self) -> String {
        let mut prompt = format!(
            "Write a short credit note for {} (FY{}). Decision: {} ({}), composite score {}/100, \
             distress index {:.2}, life-cycle stage {}. Key findings:",
            self.entity,
            self.year,
            self.decision,
            self.risk_profile,
            self.composite_score,
            self.distress_index.round_dp(2),
            self.life_cycle,
        );
        for line in &self.rationale {
            prompt.push_str("\n- ");
            prompt.push_str(line);
        }
        prompt
    }
}

/// External collaborator that rewrites a verdict as prose.
pub trait NarrativeGenerator: Send + Sync {
    fn generate(&self, request: &NarrativeRequest) -> UnderwriterResult<String>;
}

impl NarrativeGenerator for Box<dyn NarrativeGenerator> {
    fn generate(&self, request: &NarrativeRequest) -> UnderwriterResult<String> {
        (**self).generate(request)
    }
}

pub struct GenerativeComposer<G: NarrativeGenerator> {
    rules: RuleBasedComposer,
    generator: G,
}

impl<G: NarrativeGenerator> GenerativeComposer<G> {
    pub fn new(generator: G) -> Self {
        Self {
            rules: RuleBasedComposer,
            generator,
        }
    }
}

impl<G: NarrativeGenerator> VerdictComposer for GenerativeComposer<G> {
    fn strategy(&self) -> VerdictStrategy {
        VerdictStrategy::Generative
    }

    fn compose(&self, metrics: &DerivedMetrics) -> Verdict {
        let mut verdict = self.rules.compose(metrics);
        verdict.strategy = VerdictStrategy::Generative;

        let request = NarrativeRequest::new(metrics, &verdict);
        match self.generator.generate(&request) {
            Ok(text) if !text.trim().is_empty() => {
                debug!(entity = %metrics.entity, year = metrics.year, "narrative generated");
                verdict.narrative = Some(text.trim().to_string());
            }
            Ok(_) => warn!(entity = %metrics.entity, "narrator returned empty text; keeping rule rationale"),
            Err(e) => warn!(entity = %metrics.entity, error = %e, "narrator failed; keeping rule rationale"),
        }
        verdict
    }
}

/// Build the composer selected by `config`.
///
/// The generative strategy requires a generator; asking for it without one
/// is a configuration error rather than a silent fallback.
pub fn build_composer(
    config: &VerdictConfig,
    generator: Option<Box<dyn NarrativeGenerator>>,
) -> UnderwriterResult<Box<dyn VerdictComposer>> {
    match (config.strategy, generator) {
        (VerdictStrategy::Rules, _) => Ok(Box::new(RuleBasedComposer)),
        (VerdictStrategy::Generative, Some(generator)) => {
            Ok(Box::new(GenerativeComposer::new(generator)))
        }
        (VerdictStrategy::Generative, None) => Err(UnderwriterError::Config(
            "generative verdict strategy selected but no narrative generator is available".into(),
        )),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::derive_metrics;
    use crate::record::{FinancialRecord, LineItem};
    use pretty_assertions::assert_eq;

    struct EchoNarrator;

    impl NarrativeGenerator for EchoNarrator {
        fn generate(&self, request: &NarrativeRequest) -> UnderwriterResult<String> {
            Ok(format!("  {} is a {} case.  ", request.entity, request.risk_profile))
        }
    }

    struct BrokenNarrator;

    impl NarrativeGenerator for BrokenNarrator {
        fn generate(&self, _request: &NarrativeRequest) -> UnderwriterResult<String> {
            Err(UnderwriterError::Narrative("service unavailable".into()))
        }
    }

    fn clean() -> FinancialRecord {
        FinancialRecord::new("Clean Co", 2024)
            .with(LineItem::Revenue, dec!(10000))
            .with(LineItem::Pat, dec!(1500))
            .with(LineItem::Cfo, dec!(1200))
            .with(LineItem::TotalDebt, dec!(5000))
            .with(LineItem::Equity, dec!(8000))
            .with(LineItem::CurrentAssets, dec!(6000))
            .with(LineItem::CurrentLiabilities, dec!(4000))
            .with(LineItem::Ebit, dec!(2000))
            .with(LineItem::Interest, dec!(500))
            .with(LineItem::TotalAssets, dec!(15000))
    }

    #[test]
    fn test_decision_tiers() {
        assert_eq!(decide(100), (Decision::Approve, RiskProfile::Low));
        assert_eq!(decide(75), (Decision::Approve, RiskProfile::Low));
        assert_eq!(decide(74), (Decision::Review, RiskProfile::Medium));
        assert_eq!(decide(50), (Decision::Review, RiskProfile::Medium));
        assert_eq!(decide(49), (Decision::Reject, RiskProfile::High));
        assert_eq!(decide(0), (Decision::Reject, RiskProfile::High));
    }

    #[test]
    fn test_clean_record_gets_no_red_flags_line() {
        let verdict = RuleBasedComposer.compose(&derive_metrics(&clean(), None));
        assert_eq!(verdict.decision, Decision::Approve);
        assert_eq!(verdict.composite_score, 100);
        assert_eq!(verdict.rationale, vec![NO_RED_FLAGS.to_string()]);
        assert_eq!(verdict.narrative, None);
    }

    #[test]
    fn test_rationale_order_is_fixed() {
        let prior = FinancialRecord::new("Red Flags", 2023)
            .with(LineItem::Revenue, dec!(1000))
            .with(LineItem::Receivables, dec!(100));
        let current = FinancialRecord::new("Red Flags", 2024)
            .with(LineItem::Revenue, dec!(1100))
            .with(LineItem::Receivables, dec!(150))
            .with(LineItem::Pat, dec!(100))
            .with(LineItem::Cfo, dec!(-50))
            .with(LineItem::TotalAssets, dec!(5000))
            .with(LineItem::CurrentAssets, dec!(500))
            .with(LineItem::CurrentLiabilities, dec!(3000))
            .with(LineItem::Ebit, dec!(150))
            .with(LineItem::Interest, dec!(400))
            .with(LineItem::Equity, dec!(200))
            .with(LineItem::TotalDebt, dec!(4500));
        let verdict = RuleBasedComposer.compose(&derive_metrics(&current, Some(&prior)));

        assert_eq!(verdict.decision, Decision::Reject);
        assert_eq!(verdict.risk_profile, RiskProfile::High);
        assert_eq!(verdict.rationale.len(), 5);
        assert!(verdict.rationale[0].starts_with("High bankruptcy risk"));
        assert!(verdict.rationale[1].starts_with("Low earnings quality"));
        assert_eq!(
            verdict.rationale[2],
            "High leverage: debt-to-equity of 22.50x exceeds 2.0x"
        );
        assert_eq!(
            verdict.rationale[3],
            "Liquidity stress: current ratio of 0.17x is below 1.0x"
        );
        assert_eq!(
            verdict.rationale[4],
            "Possible revenue manipulation: receivables grew 50.0% against revenue growth of 10.0%"
        );
    }

    #[test]
    fn test_grey_zone_has_no_distress_line() {
        let mut record = clean();
        record.current_assets = dec!(500);
        record.current_liabilities = dec!(4500);
        record.total_assets = dec!(10000);
        record.pat = dec!(500);
        record.cfo = dec!(600);
        record.ebit = dec!(800);
        record.interest = dec!(100);
        record.equity = dec!(4000);
        record.total_debt = dec!(4000);
        let metrics = derive_metrics(&record, None);
        assert_eq!(metrics.distress.zone, DistressZone::Grey);
        let verdict = RuleBasedComposer.compose(&metrics);
        assert_eq!(verdict.rationale.len(), 1);
        assert!(verdict.rationale[0].starts_with("Liquidity stress"));
    }

    #[test]
    fn test_generative_keeps_numeric_verdict() {
        let metrics = derive_metrics(&clean(), None);
        let rules = RuleBasedComposer.compose(&metrics);
        let generative = GenerativeComposer::new(EchoNarrator).compose(&metrics);

        assert_eq!(generative.decision, rules.decision);
        assert_eq!(generative.composite_score, rules.composite_score);
        assert_eq!(generative.rationale, rules.rationale);
        assert_eq!(generative.strategy, VerdictStrategy::Generative);
        assert_eq!(
            generative.narrative.as_deref(),
            Some("Clean Co is a LOW RISK case.")
        );
    }

    #[test]
    fn test_generative_failure_falls_back_to_rules() {
        let metrics = derive_metrics(&clean(), None);
        let verdict = GenerativeComposer::new(BrokenNarrator).compose(&metrics);
        assert_eq!(verdict.narrative, None);
        assert_eq!(verdict.rationale, vec![NO_RED_FLAGS.to_string()]);
    }

    #[test]
    fn test_build_composer_by_config() {
        let rules = build_composer(&VerdictConfig::default(), None).unwrap();
        assert_eq!(rules.strategy(), VerdictStrategy::Rules);

        let config = VerdictConfig {
            strategy: VerdictStrategy::Generative,
            ..VerdictConfig::default()
        };
        let generative = build_composer(&config, Some(Box::new(EchoNarrator))).unwrap();
        assert_eq!(generative.strategy(), VerdictStrategy::Generative);

        assert!(matches!(
            build_composer(&config, None),
            Err(UnderwriterError::Config(_))
        ));
    }

    #[test]
    fn test_prompt_lists_rationale() {
        let metrics = derive_metrics(&clean(), None);
        let verdict = RuleBasedComposer.compose(&metrics);
        let prompt = NarrativeRequest::new(&metrics, &verdict).prompt();
        assert!(prompt.contains("Clean Co (FY2024)"));
        assert!(prompt.contains("APPROVE (LOW RISK)"));
        assert!(prompt.ends_with(NO_RED_FLAGS));
    }
}
