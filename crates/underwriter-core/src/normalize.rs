//! Row normalizer.
//!
//! Turns a loosely-typed row (as delivered by a CSV reader, a JSON feed or a
//! manual-entry form) into a complete [`FinancialRecord`]. Normalization never
//! fails: anything absent or unparsable becomes zero so that a degenerate
//! report can still be rendered.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde_json::{Map, Value};
use std::str::FromStr;
use tracing::warn;

use crate::record::{FinancialRecord, LineItem};
use crate::types::FiscalYear;

/// A raw row keyed by canonical column names.
pub type RawRecord = Map<String, Value>;

/// Column holding the entity (borrower) name.
pub const ENTITY_COLUMN: &str = "Company";

/// Column holding the fiscal year.
pub const YEAR_COLUMN: &str = "Year";

/// Produce a fully populated record from an arbitrary subset of canonical fields.
pub fn normalize_record(raw: &RawRecord) -> FinancialRecord {
    let entity = raw
        .get(ENTITY_COLUMN)
        .map(entity_name)
        .unwrap_or_default();

    let year = match raw.get(YEAR_COLUMN) {
        Some(value) => parse_year(value).unwrap_or_else(|| {
            warn!(entity = %entity, value = %value, "unparsable fiscal year, defaulting to 0");
            0
        }),
        None => 0,
    };

    let mut record = FinancialRecord::new(entity, year);
    for item in LineItem::ALL {
        let Some(value) = raw.get(item.canonical_name()) else {
            continue;
        };
        match parse_amount(value) {
            Some(amount) => record.set(item, amount),
            None if value.is_null() => {}
            None => warn!(
                entity = %record.entity,
                year = record.year,
                field = item.canonical_name(),
                value = %value,
                "non-numeric value, defaulting to 0"
            ),
        }
    }
    record
}

/// Normalize every row of a dataset, preserving input order.
pub fn normalize_rows(rows: &[RawRecord]) -> Vec<FinancialRecord> {
    rows.iter().map(normalize_record).collect()
}

/// Parse a numeric cell.
///
/// Accepts JSON numbers and plain numeric text (including scientific
/// notation). Text with thousands separators, currency symbols, booleans and
/// anything out of `Decimal` range yield `None`.
pub fn parse_amount(value: &Value) -> Option<Decimal> {
    match value {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                return Some(Decimal::from(i));
            }
            if let Some(u) = n.as_u64() {
                return Some(Decimal::from(u));
            }
            parse_decimal_text(&n.to_string())
        }
        Value::String(s) => parse_decimal_text(s.trim()),
        _ => None,
    }
}

/// Parse a fiscal-year cell: an integer, or integral numeric text.
pub fn parse_year(value: &Value) -> Option<FiscalYear> {
    match value {
        Value::Number(n) => match n.as_i64() {
            Some(i) => FiscalYear::try_from(i).ok(),
            None => parse_decimal_text(&n.to_string()).and_then(integral_year),
        },
        Value::String(s) => {
            let trimmed = s.trim();
            trimmed
                .parse::<FiscalYear>()
                .ok()
                .or_else(|| parse_decimal_text(trimmed).and_then(integral_year))
        }
        _ => None,
    }
}

fn parse_decimal_text(text: &str) -> Option<Decimal> {
    if text.is_empty() {
        return None;
    }
    Decimal::from_str(text)
        .ok()
        .or_else(|| Decimal::from_scientific(text).ok())
}

fn integral_year(value: Decimal) -> Option<FiscalYear> {
    if value.fract().is_zero() {
        value.to_i32()
    } else {
        None
    }
}

fn entity_name(value: &Value) -> String {
    match value {
        Value::String(s) => s.trim().to_string(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn raw(value: Value) -> RawRecord {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_complete_row() {
        let record = normalize_record(&raw(json!({
            "Company": "Tata Motors",
            "Year": 2023,
            "Revenue": 10000,
            "PAT": "1500.5",
            "CFO": -1200,
        })));
        assert_eq!(record.entity, "Tata Motors");
        assert_eq!(record.year, 2023);
        assert_eq!(record.revenue, dec!(10000));
        assert_eq!(record.pat, dec!(1500.5));
        assert_eq!(record.cfo, dec!(-1200));
    }

    #[test]
    fn test_missing_fields_default_to_zero() {
        let record = normalize_record(&raw(json!({ "Company": "Shell Co" })));
        for item in LineItem::ALL {
            assert_eq!(record.get(item), Decimal::ZERO, "{item}");
        }
        assert_eq!(record.year, 0);
    }

    #[test]
    fn test_unparsable_values_default_to_zero() {
        let record = normalize_record(&raw(json!({
            "Revenue": "n/a",
            "EBIT": "1,234",
            "Equity": true,
            "Cash": null,
            "TotalDebt": "",
            "Inventory": [1, 2],
        })));
        assert_eq!(record.revenue, Decimal::ZERO);
        assert_eq!(record.ebit, Decimal::ZERO);
        assert_eq!(record.equity, Decimal::ZERO);
        assert_eq!(record.cash, Decimal::ZERO);
        assert_eq!(record.total_debt, Decimal::ZERO);
        assert_eq!(record.inventory, Decimal::ZERO);
    }

    #[test]
    fn test_float_and_scientific_amounts() {
        assert_eq!(parse_amount(&json!(1234.75)), Some(dec!(1234.75)));
        assert_eq!(parse_amount(&json!("1.5e3")), Some(dec!(1500)));
        assert_eq!(parse_amount(&json!("  42 ")), Some(dec!(42)));
        assert_eq!(parse_amount(&json!("NaN")), None);
        assert_eq!(parse_amount(&json!("inf")), None);
    }

    #[test]
    fn test_year_parsing() {
        assert_eq!(parse_year(&json!(2022)), Some(2022));
        assert_eq!(parse_year(&json!("2021")), Some(2021));
        assert_eq!(parse_year(&json!(2020.0)), Some(2020));
        assert_eq!(parse_year(&json!("FY2020")), None);
        assert_eq!(parse_year(&json!(2020.5)), None);

        let record = normalize_record(&raw(json!({ "Year": "FY24" })));
        assert_eq!(record.year, 0);
    }

    #[test]
    fn test_numeric_entity_name() {
        let record = normalize_record(&raw(json!({ "Company": 500325 })));
        assert_eq!(record.entity, "500325");
    }

    #[test]
    fn test_normalize_rows_preserves_order() {
        let rows = vec![
            raw(json!({ "Company": "A", "Year": 2021 })),
            raw(json!({ "Company": "B", "Year": 2020 })),
        ];
        let records = normalize_rows(&rows);
        assert_eq!(records[0].entity, "A");
        assert_eq!(records[1].year, 2020);
    }
}
