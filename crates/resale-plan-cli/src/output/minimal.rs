use serde_json::Value;

/// Headline figure of each command, as JSON pointers into the result.
const PRIORITY_POINTERS: [&str; 5] = [
    "/profitability/irr_pct",
    "/profitability/net_margin",
    "/irr_pct",
    "/coefficient",
    "/cost_basis",
];

/// Print just the key answer value from the output.
///
/// Looks for the headline figures in order of priority (skipping nulls), then
/// falls back to the first field of the result object.
pub fn print_minimal(value: &Value) {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    for pointer in PRIORITY_POINTERS {
        if let Some(val) = result_obj.pointer(pointer) {
            if !val.is_null() {
                println!("{}", format_minimal(val));
                return;
            }
        }
    }

    if let Value::Object(map) = result_obj {
        if let Some((key, val)) = map.iter().next() {
            println!("{}: {}", key, format_minimal(val));
            return;
        }
    }

    println!("{}", format_minimal(result_obj));
}

fn format_minimal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
