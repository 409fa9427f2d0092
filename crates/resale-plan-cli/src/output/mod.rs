pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::{Map, Value};

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// Split a result object into dotted scalar fields and named arrays of rows.
///
/// Nested objects are flattened (`profitability.net_margin`); arrays of
/// objects such as the period schedule are returned separately so they can
/// be rendered as their own table.
pub fn flatten_result(map: &Map<String, Value>) -> (Vec<(String, Value)>, Vec<(String, Vec<Value>)>) {
    let mut fields = Vec::new();
    let mut tables = Vec::new();
    collect(map, "", &mut fields, &mut tables);
    (fields, tables)
}

fn collect(
    map: &Map<String, Value>,
    prefix: &str,
    fields: &mut Vec<(String, Value)>,
    tables: &mut Vec<(String, Vec<Value>)>,
) {
    for (key, val) in map {
        let name = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match val {
            Value::Object(inner) => collect(inner, &name, fields, tables),
            Value::Array(rows) if rows.first().is_some_and(Value::is_object) => {
                tables.push((name, rows.clone()));
            }
            _ => fields.push((name, val.clone())),
        }
    }
}
