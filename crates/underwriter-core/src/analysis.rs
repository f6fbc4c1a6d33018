//! Top-level analyses returning the standard output envelope.

use std::time::Instant;

use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;

use crate::config::ReportConfig;
use crate::forensics::distress::{DISTRESS_UPPER, SAFE_LOWER};
use crate::forensics::manipulation::{RECEIVABLES_GROWTH_MULTIPLE, WEAK_CASH_REALIZATION};
use crate::forensics::ratios::substituted_denominators;
use crate::forensics::scoring::{MAX_DEBT_TO_EQUITY, MIN_CURRENT_RATIO, MIN_INTEREST_COVERAGE};
use crate::metrics::{derive_metrics, DerivedMetrics};
use crate::record::FinancialRecord;
use crate::repository::FinancialRepository;
use crate::types::{with_metadata, ComputationOutput, FiscalYear, Money};
use crate::verdict::{Verdict, VerdictComposer};
use crate::UnderwriterResult;

const METHODOLOGY: &str = "Forensic credit diagnostics: liquidity, profitability, leverage and \
     efficiency ratios; emerging-market distress index; cash realization and receivables-growth \
     checks; cash-flow sign life cycle; deduction-based composite score";

// ---------------------------------------------------------------------------
// Report types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub year: FiscalYear,
    pub revenue: Money,
    pub pat: Money,
    pub cfo: Money,
}

/// Headline figures for the selected year plus the series trend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub revenue: Money,
    pub pat: Money,
    pub total_debt: Money,
    pub cfo: Money,
    pub currency_label: String,
    /// Ascending by year.
    pub trend: Vec<TrendPoint>,
}

impl Snapshot {
    fn new(record: &FinancialRecord, series: &[FinancialRecord], config: &ReportConfig) -> Self {
        let mut trend: Vec<TrendPoint> = series
            .iter()
            .map(|r| TrendPoint {
                year: r.year,
                revenue: r.revenue,
                pat: r.pat,
                cfo: r.cfo,
            })
            .collect();
        trend.sort_by_key(|p| p.year);
        Self {
            revenue: record.revenue,
            pat: record.pat,
            total_debt: record.total_debt,
            cfo: record.cfo,
            currency_label: config.currency_label.clone(),
            trend,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditReport {
    pub metrics: DerivedMetrics,
    pub verdict: Verdict,
    pub snapshot: Snapshot,
}

// ---------------------------------------------------------------------------
// Analyses
// ---------------------------------------------------------------------------

/// One warning per zero denominator that was replaced by 1.
pub fn substitution_warnings(record: &FinancialRecord) -> Vec<String> {
    substituted_denominators(record)
        .into_iter()
        .map(|name| format!("{name} is zero; ratios using it were computed with a denominator of 1"))
        .collect()
}

/// Analyze a single record, optionally against its immediately preceding year.
pub fn analyze_record(
    record: &FinancialRecord,
    prior: Option<&FinancialRecord>,
    composer: &dyn VerdictComposer,
    config: &ReportConfig,
) -> ComputationOutput<CreditReport> {
    let started = Instant::now();
    let series: Vec<FinancialRecord> = prior.into_iter().chain([record]).cloned().collect();
    let report = compose_report(record, prior, &series, composer, config);
    with_metadata(
        METHODOLOGY,
        &assumptions(composer),
        substitution_warnings(record),
        started,
        series.len(),
        report,
    )
}

/// Derive metrics for a whole series.
///
/// Input order is irrelevant: records are processed oldest first so each one
/// sees its predecessor, and the result is returned most recent first.
pub fn analyze_series(records: &[FinancialRecord]) -> Vec<DerivedMetrics> {
    let mut ordered: Vec<&FinancialRecord> = records.iter().collect();
    ordered.sort_by_key(|r| r.year);

    let mut results: Vec<DerivedMetrics> = ordered
        .iter()
        .enumerate()
        .map(|(i, record)| {
            let prior = i.checked_sub(1).map(|p| ordered[p]);
            derive_metrics(record, prior)
        })
        .collect();
    results.reverse();
    results
}

/// Full report for one entity-year held by `repository`.
///
/// `year` defaults to the most recent fiscal year on file.
pub fn build_report(
    repository: &dyn FinancialRepository,
    entity: &str,
    year: Option<FiscalYear>,
    composer: &dyn VerdictComposer,
    config: &ReportConfig,
) -> UnderwriterResult<ComputationOutput<CreditReport>> {
    let started = Instant::now();
    let series = repository.series(entity)?;
    let record = match year {
        Some(fy) => repository.record(entity, fy)?,
        None => repository.latest(entity)?,
    };
    let prior = series.iter().filter(|r| r.year < record.year).last();

    debug!(entity, year = record.year, has_prior = prior.is_some(), "building report");
    let report = compose_report(&record, prior, &series, composer, config);

    Ok(with_metadata(
        METHODOLOGY,
        &assumptions(composer),
        substitution_warnings(&record),
        started,
        series.len(),
        report,
    ))
}

/// Metrics for every year of `entity`, most recent first.
pub fn series_report(
    repository: &dyn FinancialRepository,
    entity: &str,
) -> UnderwriterResult<ComputationOutput<Vec<DerivedMetrics>>> {
    let started = Instant::now();
    let series = repository.series(entity)?;
    let warnings = series
        .iter()
        .flat_map(|r| {
            substitution_warnings(r)
                .into_iter()
                .map(move |w| format!("FY{}: {w}", r.year))
        })
        .collect();
    let metrics = analyze_series(&series);
    Ok(with_metadata(
        METHODOLOGY,
        &thresholds(),
        warnings,
        started,
        series.len(),
        metrics,
    ))
}

fn compose_report(
    record: &FinancialRecord,
    prior: Option<&FinancialRecord>,
    series: &[FinancialRecord],
    composer: &dyn VerdictComposer,
    config: &ReportConfig,
) -> CreditReport {
    let metrics = derive_metrics(record, prior);
    let verdict = composer.compose(&metrics);
    CreditReport {
        snapshot: Snapshot::new(record, series, config),
        metrics,
        verdict,
    }
}

fn thresholds() -> serde_json::Value {
    json!({
        "distress_zone_upper": DISTRESS_UPPER.to_string(),
        "safe_zone_lower": SAFE_LOWER.to_string(),
        "weak_cash_realization_below": WEAK_CASH_REALIZATION.to_string(),
        "receivables_growth_multiple": RECEIVABLES_GROWTH_MULTIPLE.to_string(),
        "max_debt_to_equity": MAX_DEBT_TO_EQUITY.to_string(),
        "min_current_ratio": MIN_CURRENT_RATIO.to_string(),
        "min_interest_coverage": MIN_INTEREST_COVERAGE.to_string(),
        "zero_denominator_substitute": "1",
    })
}

fn assumptions(composer: &dyn VerdictComposer) -> serde_json::Value {
    let mut value = thresholds();
    value["verdict_strategy"] = json!(composer.strategy().to_string());
    value
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
