use serde_json::Value;

use super::{format_scalar, is_panel, result_of};

/// Print just the key answer.
///
/// For a month panel that is one line per tile plus the target comparison;
/// for other views the view state.
pub fn print_minimal(value: &Value) {
    for line in minimal_lines(value) {
        println!("{}", line);
    }
}

fn minimal_lines(value: &Value) -> Vec<String> {
    let result = result_of(value);

    if is_panel(result) {
        let mut lines: Vec<String> = result["tiles"]
            .as_array()
            .map(|tiles| tiles.iter().map(tile_line).collect())
            .unwrap_or_default();
        lines.push(tile_line(&result["target"]));
        return lines;
    }

    if let Some(state) = result.get("state").and_then(Value::as_str) {
        return match result.get("month").and_then(Value::as_str) {
            Some(month) => vec![format!("{state}: {month}")],
            None => vec![state.to_string()],
        };
    }

    match result {
        // Month options, table rows or the metric catalogue: one per line
        Value::Array(items) => items
            .iter()
            .map(|item| {
                let key = ["value", "month", "key"].iter().find_map(|k| item.get(*k));
                match key {
                    Some(v) => format_scalar(v),
                    None => format_scalar(item),
                }
            })
            .collect(),
        other => vec![format_scalar(other)],
    }
}

fn tile_line(tile: &Value) -> String {
    format!(
        "{}\t{}\t{}",
        format_scalar(&tile["label"]),
        format_scalar(&tile["value_text"]),
        format_scalar(&tile["change_text"]),
    )
}
