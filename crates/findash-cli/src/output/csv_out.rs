use serde_json::Value;
use std::io;

use super::{is_panel, result_of};

/// Write output as CSV to stdout.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());
    write_csv(&mut wtr, value);
    let _ = wtr.flush();
}

fn write_csv<W: io::Write>(wtr: &mut csv::Writer<W>, value: &Value) {
    let result = result_of(value);

    if is_panel(result) {
        // One line per tile, target comparison last
        let _ = wtr.write_record(["metric", "label", "value", "change", "trend"]);
        let tiles = result["tiles"].as_array().into_iter().flatten();
        for tile in tiles.chain(std::iter::once(&result["target"])) {
            let _ = wtr.write_record([
                format_csv_value(&tile["metric"]),
                format_csv_value(&tile["label"]),
                format_csv_value(&tile["value"]),
                format_csv_value(&tile["change"]),
                format_csv_value(&tile["trend"]),
            ]);
        }
        return;
    }

    match result {
        Value::Object(map) => {
            let _ = wtr.write_record(["field", "value"]);
            for (key, val) in map {
                let _ = wtr.write_record([key.as_str(), &format_csv_value(val)]);
            }
        }
        Value::Array(arr) => write_array_csv(wtr, arr),
        other => {
            let _ = wtr.write_record([&format_csv_value(other)]);
        }
    }
}

fn write_array_csv<W: io::Write>(wtr: &mut csv::Writer<W>, arr: &[Value]) {
    if arr.is_empty() {
        return;
    }

    // Extract headers from first object
    if let Some(Value::Object(first)) = arr.first() {
        let headers: Vec<&str> = first.keys().map(|k| k.as_str()).collect();
        let _ = wtr.write_record(&headers);

        for item in arr {
            if let Value::Object(map) = item {
                let row: Vec<String> = headers
                    .iter()
                    .map(|h| map.get(*h).map(format_csv_value).unwrap_or_default())
                    .collect();
                let _ = wtr.write_record(&row);
            }
        }
    } else {
        for item in arr {
            let _ = wtr.write_record([&format_csv_value(item)]);
        }
    }
}

fn format_csv_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
