use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use super::flatten_result;

/// Format output as tables using the tabled crate.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => {
            if let Some(result) = map.get("result") {
                print_result_table(result, map);
            } else if let Some(Value::Array(rows)) = map.get("results") {
                let header: Map<String, Value> = map
                    .iter()
                    .filter(|(k, _)| k.as_str() != "results")
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .collect();
                if !header.is_empty() {
                    print_flat_object(&header);
                    println!();
                }
                print_array_table(rows);
            } else {
                print_flat_object(map);
            }
        }
        Value::Array(arr) => {
            print_array_table(arr);
        }
        _ => {
            println!("{}", value);
        }
    }
}

fn print_result_table(result: &Value, envelope: &Map<String, Value>) {
    if let Value::Object(res_map) = result {
        let (fields, tables) = flatten_result(res_map);
        let mut builder = Builder::default();
        builder.push_record(["Field", "Value"]);
        for (key, val) in &fields {
            builder.push_record([key.as_str(), &format_value(val)]);
        }
        println!("{}", Table::from(builder));

        for (name, rows) in &tables {
            println!("\n{}:", name);
            print_array_table(rows);
        }
    } else {
        print_flat_object(envelope);
    }

    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings {
                if let Value::String(s) = w {
                    println!("  - {}", s);
                }
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

fn print_flat_object(map: &Map<String, Value>) {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in map {
        builder.push_record([key.as_str(), &format_value(val)]);
    }
    println!("{}", Table::from(builder));
}

fn print_array_table(arr: &[Value]) {
    if arr.is_empty() {
        println!("(empty)");
        return;
    }

    if let Some(Value::Object(first)) = arr.first() {
        // Nested columns (per-source draws) are flattened to dotted headers
        let rows: Vec<Vec<(String, Value)>> = arr
            .iter()
            .filter_map(Value::as_object)
            .map(|map| flatten_result(map).0)
            .collect();
        let headers: Vec<String> = flatten_result(first).0.into_iter().map(|(k, _)| k).collect();

        let mut builder = Builder::default();
        builder.push_record(headers.clone());
        for row in &rows {
            let cells: Vec<String> = headers
                .iter()
                .map(|h| {
                    row.iter()
                        .find(|(k, _)| k == h)
                        .map(|(_, v)| format_value(v))
                        .unwrap_or_default()
                })
                .collect();
            builder.push_record(cells);
        }
        println!("{}", Table::from(builder));
    } else {
        for item in arr {
            println!("{}", format_value(item));
        }
    }
}

fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "-".to_string(),
        Value::Array(arr) => {
            let items: Vec<String> = arr.iter().map(format_value).collect();
            items.join(", ")
        }
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}
