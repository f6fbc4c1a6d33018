use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

use underwriter_core::normalize::RawRecord;

/// Read a JSON file as a generic serde_json::Value.
pub fn read_json_value(path: &str) -> Result<Value, Box<dyn std::error::Error>> {
    let canonical = resolve_path(path)?;
    let contents = fs::read_to_string(&canonical)
        .map_err(|e| format!("Failed to read '{}': {}", canonical.display(), e))?;
    let value: Value = serde_json::from_str(&contents)
        .map_err(|e| format!("Failed to parse '{}': {}", canonical.display(), e))?;
    Ok(value)
}

/// Read a dataset of financial rows from a `.csv` or `.json` file.
///
/// CSV: header row holds the canonical column names; every cell is handed to
/// the normalizer as text, empty cells as null. JSON: an array of row objects,
/// or an object with a `records` array.
pub fn read_dataset(path: &str) -> Result<Vec<RawRecord>, Box<dyn std::error::Error>> {
    let canonical = resolve_path(path)?;
    let is_csv = canonical
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("csv"));

    let rows = if is_csv {
        read_csv_rows(&canonical)?
    } else {
        rows_from_value(read_json_value(path)?)
            .map_err(|e| format!("Failed to load '{}': {}", canonical.display(), e))?
    };
    tracing::debug!(path = %canonical.display(), rows = rows.len(), "dataset read");
    Ok(rows)
}

/// Accept a single row object, an array of rows, or `{"records": [...]}`.
pub fn rows_from_value(value: Value) -> Result<Vec<RawRecord>, String> {
    match value {
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(i, item)| match item {
                Value::Object(map) => Ok(map),
                other => Err(format!("row {} is not an object: {}", i, other)),
            })
            .collect(),
        Value::Object(mut map) => match map.remove("records") {
            Some(records) => rows_from_value(records),
            None => Ok(vec![map]),
        },
        other => Err(format!("expected an object or array of rows, got {}", other)),
    }
}

fn read_csv_rows(path: &Path) -> Result<Vec<RawRecord>, Box<dyn std::error::Error>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_path(path)
        .map_err(|e| format!("Failed to read '{}': {}", path.display(), e))?;
    let headers = reader.headers()?.clone();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| format!("Failed to parse '{}': {}", path.display(), e))?;
        let row: RawRecord = headers
            .iter()
            .zip(record.iter())
            .map(|(column, cell)| {
                let value = if cell.is_empty() {
                    Value::Null
                } else {
                    Value::String(cell.to_string())
                };
                (column.to_string(), value)
            })
            .collect();
        rows.push(row);
    }
    Ok(rows)
}

/// Resolve and validate the path, preventing directory traversal.
fn resolve_path(path: &str) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let p = Path::new(path);
    let canonical = if p.is_absolute() {
        p.to_path_buf()
    } else {
        std::env::current_dir()?.join(p)
    };

    if !canonical.exists() {
        return Err(format!("File not found: {}", canonical.display()).into());
    }

    if !canonical.is_file() {
        return Err(format!("Not a file: {}", canonical.display()).into());
    }

    Ok(canonical)
}
