use serde_json::Value;

use super::scalar_text;

/// Print just the headline answer from the output.
///
/// Reports print `DECISION score`, series print one `year score zone` line per
/// year, entity listings print one name per line.
pub fn print_minimal(value: &Value) {
    let result = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    match result {
        Value::Object(map) => {
            if let Some(verdict) = map.get("verdict") {
                println!(
                    "{} {}",
                    scalar_text(&verdict["decision"]),
                    scalar_text(&verdict["composite_score"])
                );
            } else if let Some((key, val)) = map.iter().next() {
                println!("{}: {}", key, scalar_text(val));
            }
        }
        Value::Array(items) => {
            for item in items {
                if let Some(entity) = item.get("fiscal_years").and(item.get("entity")) {
                    println!("{}", scalar_text(entity));
                } else {
                    println!(
                        "{} {} {}",
                        scalar_text(&item["year"]),
                        scalar_text(&item["composite"]["score"]),
                        scalar_text(&item["distress"]["zone"])
                    );
                }
            }
        }
        other => println!("{}", scalar_text(other)),
    }
}
