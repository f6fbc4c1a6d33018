use clap::Args;
use serde::Serialize;
use serde_json::{json, Value};
use std::time::Instant;

use underwriter_core::analysis::{build_report, series_report};
use underwriter_core::config::UnderwriterConfig;
use underwriter_core::repository::{FinancialRepository, InMemoryRepository};
use underwriter_core::{with_metadata, FiscalYear};

use crate::config::composer_from_config;
use crate::input;

/// Arguments for a full report on one entity-year of a dataset
#[derive(Args)]
pub struct ReportArgs {
    /// Path to a JSON or CSV dataset
    #[arg(long)]
    pub data: String,

    /// Borrower name as it appears in the Company column
    #[arg(long)]
    pub entity: String,

    /// Fiscal year (defaults to the most recent on file)
    #[arg(long)]
    pub year: Option<FiscalYear>,
}

/// Arguments for metrics across every year of one entity
#[derive(Args)]
pub struct SeriesArgs {
    /// Path to a JSON or CSV dataset
    #[arg(long)]
    pub data: String,

    /// Borrower name as it appears in the Company column
    #[arg(long)]
    pub entity: String,
}

/// Arguments for listing the borrowers in a dataset
#[derive(Args)]
pub struct EntitiesArgs {
    /// Path to a JSON or CSV dataset
    #[arg(long)]
    pub data: String,
}

#[derive(Serialize)]
struct EntityListing {
    entity: String,
    fiscal_years: Vec<FiscalYear>,
}

fn load_repository(path: &str) -> Result<InMemoryRepository, Box<dyn std::error::Error>> {
    let rows = input::file::read_dataset(path)?;
    Ok(InMemoryRepository::from_raw_rows(&rows))
}

pub fn run_report(
    args: ReportArgs,
    config: &UnderwriterConfig,
) -> Result<Value, Box<dyn std::error::Error>> {
    let repository = load_repository(&args.data)?;
    let composer = composer_from_config(config)?;
    let output = build_report(
        &repository,
        &args.entity,
        args.year,
        composer.as_ref(),
        &config.report,
    )?;
    Ok(serde_json::to_value(output)?)
}

pub fn run_series(args: SeriesArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let repository = load_repository(&args.data)?;
    let output = series_report(&repository, &args.entity)?;
    Ok(serde_json::to_value(output)?)
}

pub fn run_entities(args: EntitiesArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let started = Instant::now();
    let repository = load_repository(&args.data)?;
    let listing = repository
        .entities()?
        .into_iter()
        .map(|entity| {
            let fiscal_years = repository.fiscal_years(&entity)?;
            Ok(EntityListing {
                entity,
                fiscal_years,
            })
        })
        .collect::<Result<Vec<_>, Box<dyn std::error::Error>>>()?;

    let output = with_metadata(
        "Dataset inventory: borrowers and fiscal years on file",
        &json!({ "data": args.data }),
        Vec::new(),
        started,
        repository.len(),
        listing,
    );
    Ok(serde_json::to_value(output)?)
}
