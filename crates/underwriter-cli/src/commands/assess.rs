use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use underwriter_core::analysis::analyze_record;
use underwriter_core::config::UnderwriterConfig;
use underwriter_core::normalize::normalize_rows;
use underwriter_core::record::{FinancialRecord, LineItem};

use crate::config::composer_from_config;
use crate::input;

/// Arguments for an ad-hoc assessment of one borrower-year
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct AssessArgs {
    /// Path to a JSON or CSV file with one row, or a short series for one
    /// entity (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Borrower name
    #[arg(long, default_value = "Ad-hoc")]
    pub entity: String,

    /// Fiscal year
    #[arg(long, default_value_t = 0)]
    pub year: i32,

    /// Revenue
    #[arg(long)]
    pub revenue: Option<Decimal>,

    /// EBITDA
    #[arg(long)]
    pub ebitda: Option<Decimal>,

    /// EBIT
    #[arg(long)]
    pub ebit: Option<Decimal>,

    /// Profit after tax
    #[arg(long)]
    pub pat: Option<Decimal>,

    /// Interest expense
    #[arg(long)]
    pub interest: Option<Decimal>,

    /// Total assets
    #[arg(long)]
    pub total_assets: Option<Decimal>,

    /// Total debt
    #[arg(long)]
    pub total_debt: Option<Decimal>,

    /// Shareholders' equity
    #[arg(long)]
    pub equity: Option<Decimal>,

    /// Current assets
    #[arg(long)]
    pub current_assets: Option<Decimal>,

    /// Current liabilities
    #[arg(long)]
    pub current_liabilities: Option<Decimal>,

    /// Inventory
    #[arg(long)]
    pub inventory: Option<Decimal>,

    /// Trade receivables
    #[arg(long)]
    pub receivables: Option<Decimal>,

    /// Cash and equivalents
    #[arg(long)]
    pub cash: Option<Decimal>,

    /// Cash flow from operations
    #[arg(long)]
    pub cfo: Option<Decimal>,

    /// Cash flow from investing
    #[arg(long)]
    pub cfi: Option<Decimal>,

    /// Cash flow from financing
    #[arg(long)]
    pub cff: Option<Decimal>,

    /// Capital expenditure
    #[arg(long)]
    pub capex: Option<Decimal>,
}

impl AssessArgs {
    fn flagged_record(&self) -> Result<FinancialRecord, Box<dyn std::error::Error>> {
        let flags = [
            (LineItem::Revenue, self.revenue),
            (LineItem::Ebitda, self.ebitda),
            (LineItem::Ebit, self.ebit),
            (LineItem::Pat, self.pat),
            (LineItem::Interest, self.interest),
            (LineItem::TotalAssets, self.total_assets),
            (LineItem::TotalDebt, self.total_debt),
            (LineItem::Equity, self.equity),
            (LineItem::CurrentAssets, self.current_assets),
            (LineItem::CurrentLiabilities, self.current_liabilities),
            (LineItem::Inventory, self.inventory),
            (LineItem::Receivables, self.receivables),
            (LineItem::Cash, self.cash),
            (LineItem::Cfo, self.cfo),
            (LineItem::Cfi, self.cfi),
            (LineItem::Cff, self.cff),
            (LineItem::Capex, self.capex),
        ];
        if flags.iter().all(|(_, value)| value.is_none()) {
            return Err("provide --input <file>, pipe JSON on stdin, or pass line-item flags".into());
        }

        Ok(flags
            .into_iter()
            .fold(FinancialRecord::new(self.entity.clone(), self.year), |record, (item, value)| {
                record.with(item, value.unwrap_or_default())
            }))
    }
}

pub fn run_assess(
    args: AssessArgs,
    config: &UnderwriterConfig,
) -> Result<Value, Box<dyn std::error::Error>> {
    let rows = if let Some(ref path) = args.input {
        Some(input::file::read_dataset(path)?)
    } else {
        input::stdin::read_stdin_rows()?
    };

    let mut records = match rows {
        Some(rows) => normalize_rows(&rows),
        None => vec![args.flagged_record()?],
    };
    records.sort_by_key(|r| r.year);

    let (record, prior) = match records.as_slice() {
        [] => return Err("input contained no rows".into()),
        [.., prior, current] => (current, Some(prior)),
        [current] => (current, None),
    };
    if records.iter().any(|r| r.entity != record.entity) {
        return Err("assess expects rows for a single entity; use `uw report --data` for datasets".into());
    }

    let composer = composer_from_config(config)?;
    let output = analyze_record(record, prior, composer.as_ref(), &config.report);
    Ok(serde_json::to_value(output)?)
}
