//! One-shot derivation of every diagnostic for a single record.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::forensics::distress::{estimate_distress, DistressAssessment};
use crate::forensics::lifecycle::LifeCycleStage;
use crate::forensics::manipulation::{assess_earnings_quality, EarningsQuality};
use crate::forensics::ratios::{derive_ratios, DupontBreakdown, RatioSet};
use crate::forensics::scoring::{composite_score, CompositeScore};
use crate::record::FinancialRecord;
use crate::types::FiscalYear;

#[cfg(feature = "strength")]
use crate::forensics::strength::{simplified_f_score, StrengthScore};

/// Everything derived from one record (and, for growth, its predecessor).
/// Recomputed per request; never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivedMetrics {
    pub entity: String,
    pub year: FiscalYear,
    pub ratios: RatioSet,
    pub dupont: DupontBreakdown,
    pub distress: DistressAssessment,
    pub earnings_quality: EarningsQuality,
    pub life_cycle: LifeCycleStage,
    pub composite: CompositeScore,
    #[cfg(feature = "strength")]
    pub strength: StrengthScore,
}

/// Run the full pipeline for `record`.
///
/// `prior` must be the immediately preceding fiscal year of the same entity;
/// pass `None` for the first year of a series or an ad-hoc record.
pub fn derive_metrics(record: &FinancialRecord, prior: Option<&FinancialRecord>) -> DerivedMetrics {
    let ratios = derive_ratios(record);
    let distress = estimate_distress(record);
    let earnings_quality = assess_earnings_quality(record, prior, &ratios);
    let life_cycle = record.life_cycle_stage();
    let composite = composite_score(&ratios, &distress, &earnings_quality);

    #[cfg(feature = "strength")]
    let strength = {
        let prior_ratios = prior.map(derive_ratios);
        simplified_f_score(record, &ratios, prior_ratios.as_ref())
    };

    debug!(
        entity = %record.entity,
        year = record.year,
        distress_index = %distress.index,
        zone = %distress.zone,
        life_cycle = %life_cycle,
        score = composite.score,
        "derived metrics"
    );

    DerivedMetrics {
        entity: record.entity.clone(),
        year: record.year,
        dupont: ratios.dupont(),
        ratios,
        distress,
        earnings_quality,
        life_cycle,
        composite,
        #[cfg(feature = "strength")]
        strength,
    }
}

impl DerivedMetrics {
    pub fn score(&self) -> u8 {
        self.composite.score
    }
}
