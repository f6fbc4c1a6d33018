//! Source-data provider.
//!
//! The core stays stateless; whatever loads a dataset hands it to the
//! presentation layer as a [`FinancialRepository`]. Lookups that cannot be
//! satisfied are explicit errors, never empty results.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::normalize::{normalize_rows, RawRecord};
use crate::record::FinancialRecord;
use crate::types::FiscalYear;
use crate::{UnderwriterError, UnderwriterResult};

pub trait FinancialRepository {
    /// Entity names in ascending order.
    fn entities(&self) -> UnderwriterResult<Vec<String>>;

    /// Fiscal years available for `entity`, most recent first.
    fn fiscal_years(&self, entity: &str) -> UnderwriterResult<Vec<FiscalYear>>;

    /// Every record for `entity`, oldest first.
    fn series(&self, entity: &str) -> UnderwriterResult<Vec<FinancialRecord>>;

    /// The record for one entity-year.
    fn record(&self, entity: &str, year: FiscalYear) -> UnderwriterResult<FinancialRecord> {
        self.series(entity)?
            .into_iter()
            .find(|r| r.year == year)
            .ok_or_else(|| UnderwriterError::PeriodNotFound {
                entity: entity.to_string(),
                year,
            })
    }

    /// The most recent record for `entity`.
    fn latest(&self, entity: &str) -> UnderwriterResult<FinancialRecord> {
        self.series(entity)?
            .pop()
            .ok_or_else(|| UnderwriterError::EntityNotFound(entity.to_string()))
    }
}

/// Dataset held in memory, keyed by entity then fiscal year.
///
/// A repeated entity-year keeps the row that appears last.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    data: BTreeMap<String, BTreeMap<FiscalYear, FinancialRecord>>,
}

impl InMemoryRepository {
    pub fn new(records: impl IntoIterator<Item = FinancialRecord>) -> Self {
        let mut data: BTreeMap<String, BTreeMap<FiscalYear, FinancialRecord>> = BTreeMap::new();
        for record in records {
            let years = data.entry(record.entity.clone()).or_default();
            if let Some(previous) = years.insert(record.year, record) {
                warn!(
                    entity = %previous.entity,
                    year = previous.year,
                    "duplicate entity-year; keeping the later row"
                );
            }
        }
        debug!(entities = data.len(), "repository loaded");
        Self { data }
    }

    /// Normalize untyped rows and load them.
    pub fn from_raw_rows(rows: &[RawRecord]) -> Self {
        Self::new(normalize_rows(rows))
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn len(&self) -> usize {
        self.data.values().map(BTreeMap::len).sum()
    }

    fn years_of(&self, entity: &str) -> UnderwriterResult<&BTreeMap<FiscalYear, FinancialRecord>> {
        if self.data.is_empty() {
            return Err(UnderwriterError::NoData);
        }
        self.data
            .get(entity)
            .ok_or_else(|| UnderwriterError::EntityNotFound(entity.to_string()))
    }
}

impl FinancialRepository for InMemoryRepository {
    fn entities(&self) -> UnderwriterResult<Vec<String>> {
        if self.data.is_empty() {
            return Err(UnderwriterError::NoData);
        }
        Ok(self.data.keys().cloned().collect())
    }

    fn fiscal_years(&self, entity: &str) -> UnderwriterResult<Vec<FiscalYear>> {
        Ok(self.years_of(entity)?.keys().rev().copied().collect())
    }

    fn series(&self, entity: &str) -> UnderwriterResult<Vec<FinancialRecord>> {
        Ok(self.years_of(entity)?.values().cloned().collect())
    }

    fn record(&self, entity: &str, year: FiscalYear) -> UnderwriterResult<FinancialRecord> {
        self.years_of(entity)?
            .get(&year)
            .cloned()
            .ok_or_else(|| UnderwriterError::PeriodNotFound {
                entity: entity.to_string(),
                year,
            })
    }
}
