//! The canonical company-year observation consumed by the pipeline.

use serde::{Deserialize, Serialize};

use crate::types::{FiscalYear, Money};

/// One company-year of annual financial-statement figures.
///
/// Serialized names are the canonical column names used by ingestion
/// collaborators (`Revenue`, `TotalAssets`, `CFO`, ...). Every amount is a
/// finite `Decimal`; absent values are zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FinancialRecord {
    #[serde(rename = "Company")]
    pub entity: String,
    #[serde(rename = "Year")]
    pub year: FiscalYear,
    #[serde(rename = "Revenue")]
    pub revenue: Money,
    #[serde(rename = "EBITDA")]
    pub ebitda: Money,
    #[serde(rename = "EBIT")]
    pub ebit: Money,
    #[serde(rename = "PAT")]
    pub pat: Money,
    #[serde(rename = "Interest")]
    pub interest: Money,
    #[serde(rename = "TotalAssets")]
    pub total_assets: Money,
    #[serde(rename = "TotalDebt")]
    pub total_debt: Money,
    #[serde(rename = "Equity")]
    pub equity: Money,
    #[serde(rename = "CurrentAssets")]
    pub current_assets: Money,
    #[serde(rename = "CurrentLiabilities")]
    pub current_liabilities: Money,
    #[serde(rename = "Inventory")]
    pub inventory: Money,
    #[serde(rename = "Receivables")]
    pub receivables: Money,
    #[serde(rename = "Cash")]
    pub cash: Money,
    #[serde(rename = "CFO")]
    pub cfo: Money,
    #[serde(rename = "CFI")]
    pub cfi: Money,
    #[serde(rename = "CFF")]
    pub cff: Money,
    #[serde(rename = "Capex")]
    pub capex: Money,
}

/// The numeric line items of a [`FinancialRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LineItem {
    Revenue,
    Ebitda,
    Ebit,
    Pat,
    Interest,
    TotalAssets,
    TotalDebt,
    Equity,
    CurrentAssets,
    CurrentLiabilities,
    Inventory,
    Receivables,
    Cash,
    Cfo,
    Cfi,
    Cff,
    Capex,
}

impl LineItem {
    pub const ALL: [LineItem; 17] = [
        LineItem::Revenue,
        LineItem::Ebitda,
        LineItem::Ebit,
        LineItem::Pat,
        LineItem::Interest,
        LineItem::TotalAssets,
        LineItem::TotalDebt,
        LineItem::Equity,
        LineItem::CurrentAssets,
        LineItem::CurrentLiabilities,
        LineItem::Inventory,
        LineItem::Receivables,
        LineItem::Cash,
        LineItem::Cfo,
        LineItem::Cfi,
        LineItem::Cff,
        LineItem::Capex,
    ];

    /// Canonical column name as delivered by ingestion collaborators.
    pub fn canonical_name(self) -> &'static str {
        match self {
            Self::Revenue => "Revenue",
            Self::Ebitda => "EBITDA",
            Self::Ebit => "EBIT",
            Self::Pat => "PAT",
            Self::Interest => "Interest",
            Self::TotalAssets => "TotalAssets",
            Self::TotalDebt => "TotalDebt",
            Self::Equity => "Equity",
            Self::CurrentAssets => "CurrentAssets",
            Self::CurrentLiabilities => "CurrentLiabilities",
            Self::Inventory => "Inventory",
            Self::Receivables => "Receivables",
            Self::Cash => "Cash",
            Self::Cfo => "CFO",
            Self::Cfi => "CFI",
            Self::Cff => "CFF",
            Self::Capex => "Capex",
        }
    }
}

impl std::fmt::Display for LineItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.canonical_name())
    }
}

impl FinancialRecord {
    /// Start an empty record (all amounts zero) for an entity-year.
    pub fn new(entity: impl Into<String>, year: FiscalYear) -> Self {
        Self {
            entity: entity.into(),
            year,
            ..Self::default()
        }
    }

    pub fn get(&self, item: LineItem) -> Money {
        match item {
            LineItem::Revenue => self.revenue,
            LineItem::Ebitda => self.ebitda,
            LineItem::Ebit => self.ebit,
            LineItem::Pat => self.pat,
            LineItem::Interest => self.interest,
            LineItem::TotalAssets => self.total_assets,
            LineItem::TotalDebt => self.total_debt,
            LineItem::Equity => self.equity,
            LineItem::CurrentAssets => self.current_assets,
            LineItem::CurrentLiabilities => self.current_liabilities,
            LineItem::Inventory => self.inventory,
            LineItem::Receivables => self.receivables,
            LineItem::Cash => self.cash,
            LineItem::Cfo => self.cfo,
            LineItem::Cfi => self.cfi,
            LineItem::Cff => self.cff,
            LineItem::Capex => self.capex,
        }
    }

    pub fn set(&mut self, item: LineItem, value: Money) {
        let slot = match item {
            LineItem::Revenue => &mut self.revenue,
            LineItem::Ebitda => &mut self.ebitda,
            LineItem::Ebit => &mut self.ebit,
            LineItem::Pat => &mut self.pat,
            LineItem::Interest => &mut self.interest,
            LineItem::TotalAssets => &mut self.total_assets,
            LineItem::TotalDebt => &mut self.total_debt,
            LineItem::Equity => &mut self.equity,
            LineItem::CurrentAssets => &mut self.current_assets,
            LineItem::CurrentLiabilities => &mut self.current_liabilities,
            LineItem::Inventory => &mut self.inventory,
            LineItem::Receivables => &mut self.receivables,
            LineItem::Cash => &mut self.cash,
            LineItem::Cfo => &mut self.cfo,
            LineItem::Cfi => &mut self.cfi,
            LineItem::Cff => &mut self.cff,
            LineItem::Capex => &mut self.capex,
        };
        *slot = value;
    }

    /// Builder-style setter, handy for ad-hoc records and tests.
    pub fn with(mut self, item: LineItem, value: Money) -> Self {
        self.set(item, value);
        self
    }

    /// Capital employed proxy used by ROCE (TotalDebt + Equity).
    pub fn capital_employed(&self) -> Money {
        self.total_debt.saturating_add(self.equity)
    }
}
