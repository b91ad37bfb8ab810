use colored::Colorize;
use serde_json::Value;
use tabled::{builder::Builder, Table};

use super::{format_scalar, is_panel, result_of};

/// Format output as a table using the tabled crate.
pub fn print_table(value: &Value) {
    let result = result_of(value);

    if is_panel(result) {
        print_panel(result);
    } else if let Some(state) = result.get("state").and_then(Value::as_str) {
        print_state(state, result);
    } else {
        match result {
            Value::Object(_) => print_flat_object(result),
            Value::Array(arr) => print_array_table(arr),
            other => println!("{}", format_scalar(other)),
        }
    }

    print_envelope_notes(value);
}

fn print_state(state: &str, result: &Value) {
    match state {
        "unchanged" => println!("No month selected; nothing to update."),
        "no_data" => println!(
            "No data for this selection: {}",
            result.get("month").map(format_scalar).unwrap_or_default()
        ),
        other => println!("{}", other),
    }
}

fn trend_marker(trend: &Value) -> String {
    match trend.as_str() {
        Some("up") => "▲".green().to_string(),
        Some("down") => "▼".magenta().to_string(),
        _ => "-".dimmed().to_string(),
    }
}

fn print_panel(panel: &Value) {
    println!(
        "{}",
        format!("Financial Dashboard: {}", format_scalar(&panel["month"]))
            .as_str()
            .bold()
    );

    let mut tiles = Builder::default();
    tiles.push_record(["Metric", "Value", "Change", "", "Compared"]);
    if let Some(arr) = panel["tiles"].as_array() {
        for tile in arr {
            push_tile(&mut tiles, tile);
        }
    }
    push_tile(&mut tiles, &panel["target"]);
    println!("{}", Table::from(tiles));

    if let Some(arr) = panel["donuts"].as_array() {
        let mut donuts = Builder::default();
        donuts.push_record(["Ratio", "Value", "Complement"]);
        for d in arr {
            donuts.push_record([
                format_scalar(&d["label"]),
                format_scalar(&d["value_text"]),
                format_number(&d["payload"]["complement"]),
            ]);
        }
        println!("{}", Table::from(donuts));
    }
}

fn push_tile(builder: &mut Builder, tile: &Value) {
    builder.push_record([
        format_scalar(&tile["label"]),
        format_scalar(&tile["value_text"]),
        format_scalar(&tile["change_text"]),
        trend_marker(&tile["trend"]),
        format_scalar(&tile["caption"]),
    ]);
}

fn format_number(value: &Value) -> String {
    match value.as_f64() {
        Some(n) => format!("{:.1}", n),
        None => "n/a".to_string(),
    }
}

fn print_envelope_notes(value: &Value) {
    let Some(envelope) = value.as_object() else {
        return;
    };

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

fn print_flat_object(value: &Value) {
    if let Value::Object(map) = value {
        let mut builder = Builder::default();
        builder.push_record(["Field", "Value"]);
        for (key, val) in map {
            builder.push_record([key.as_str(), &format_value(val)]);
        }
        let table = Table::from(builder);
        println!("{}", table);
    }
}

fn print_array_table(arr: &[Value]) {
    if arr.is_empty() {
        println!("(empty)");
        return;
    }

    // Collect all keys from first object for headers
    if let Some(Value::Object(first)) = arr.first() {
        let headers: Vec<String> = first.keys().cloned().collect();
        let mut builder = Builder::default();
        builder.push_record(&headers);

        for item in arr {
            if let Value::Object(map) = item {
                let row: Vec<String> = headers
                    .iter()
                    .map(|h| map.get(h.as_str()).map(format_value).unwrap_or_default())
                    .collect();
                builder.push_record(row);
            }
        }

        let table = Table::from(builder);
        println!("{}", table);
    } else {
        for item in arr {
            println!("{}", format_value(item));
        }
    }
}

fn format_value(value: &Value) -> String {
    match value {
        Value::Array(arr) => {
            let items: Vec<String> = arr.iter().map(format_value).collect();
            items.join(", ")
        }
        other => format_scalar(other),
    }
}
