use colored::Colorize;
use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use super::{flatten, scalar_text};

/// Format output as tables using the tabled crate.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => match map.get("result") {
            Some(result) => print_result(result, map),
            None => print_fields(value),
        },
        Value::Array(items) => print_list(items),
        other => println!("{}", scalar_text(other)),
    }
}

fn print_result(result: &Value, envelope: &Map<String, Value>) {
    match result {
        Value::Object(sections) => {
            if let Some(verdict) = sections.get("verdict") {
                print_headline(verdict);
            }
            for (name, section) in sections {
                println!("\n{}", title(name).bold());
                print_fields(section);
            }
        }
        Value::Array(items) => print_list(items),
        other => println!("{}", scalar_text(other)),
    }

    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings {
                println!("  - {}", scalar_text(w));
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

fn print_headline(verdict: &Value) {
    let decision = scalar_text(&verdict["decision"]);
    let label = format!(
        "{} ({}), composite score {}/100",
        decision,
        scalar_text(&verdict["risk_profile"]),
        scalar_text(&verdict["composite_score"])
    );
    let painted = match decision.as_str() {
        "APPROVE" => label.green(),
        "REVIEW" => label.yellow(),
        _ => label.red(),
    };
    println!("{}", painted.bold());

    if let Value::Array(lines) = &verdict["rationale"] {
        for line in lines {
            println!("  - {}", scalar_text(line));
        }
    }
    if let Value::String(narrative) = &verdict["narrative"] {
        println!("\n{}", narrative);
    }
}

fn print_fields(value: &Value) {
    let mut fields = Vec::new();
    flatten("", value, &mut fields);

    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in fields {
        builder.push_record([key, val]);
    }
    println!("{}", Table::from(builder));
}

fn print_list(items: &[Value]) {
    if items.is_empty() {
        println!("(empty)");
        return;
    }
    for item in items {
        let heading = match (item.get("entity"), item.get("year")) {
            (Some(entity), Some(year)) => format!("{} FY{}", scalar_text(entity), scalar_text(year)),
            (Some(entity), None) => scalar_text(entity),
            _ => String::new(),
        };
        if !heading.is_empty() {
            println!("\n{}", heading.bold());
        }
        print_fields(item);
    }
}

fn title(key: &str) -> String {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect::<String>().replace('_', " "),
        None => String::new(),
    }
}
