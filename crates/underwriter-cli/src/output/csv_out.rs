use serde_json::Value;
use std::io;

use super::{flatten, scalar_text};

/// Write output as CSV to stdout.
///
/// A single result becomes two columns (field, value); a list of results
/// becomes one row per item with flattened column names.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    let result = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    match result {
        Value::Array(items) => write_rows(&mut wtr, items),
        Value::Object(_) => {
            let mut fields = Vec::new();
            flatten("", result, &mut fields);
            let _ = wtr.write_record(["field", "value"]);
            for (key, val) in &fields {
                let _ = wtr.write_record([key.as_str(), val.as_str()]);
            }
        }
        scalar => {
            let _ = wtr.write_record([scalar_text(scalar)]);
        }
    }

    let _ = wtr.flush();
}

fn write_rows(wtr: &mut csv::Writer<io::StdoutLock<'_>>, items: &[Value]) {
    let rows: Vec<Vec<(String, String)>> = items
        .iter()
        .map(|item| {
            let mut fields = Vec::new();
            flatten("", item, &mut fields);
            fields
        })
        .collect();

    let Some(first) = rows.first() else {
        return;
    };
    let headers: Vec<&str> = first.iter().map(|(k, _)| k.as_str()).collect();
    let _ = wtr.write_record(&headers);

    for row in &rows {
        let cells: Vec<&str> = headers
            .iter()
            .map(|h| {
                row.iter()
                    .find(|(k, _)| k == h)
                    .map(|(_, v)| v.as_str())
                    .unwrap_or_default()
            })
            .collect();
        let _ = wtr.write_record(&cells);
    }
}
