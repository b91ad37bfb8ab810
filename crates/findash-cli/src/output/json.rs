use serde_json::Value;
use std::io::{self, Write};

/// Pretty-print JSON to stdout.
pub fn print_json(value: &Value) {
    let stdout = io::stdout();
    if let Err(e) = write_json(&mut stdout.lock(), value) {
        eprintln!("JSON serialization error: {}", e);
    }
}

fn write_json<W: Write>(out: &mut W, value: &Value) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_pretty_with_trailing_newline() {
        let mut buf = Vec::new();
        write_json(&mut buf, &json!({ "state": "unchanged" })).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "{\n  \"state\": \"unchanged\"\n}\n");
    }

    #[test]
    fn test_non_finite_is_null() {
        let mut buf = Vec::new();
        write_json(&mut buf, &json!({ "pct": Value::from(f64::INFINITY) })).unwrap();
        assert!(String::from_utf8(buf).unwrap().contains("\"pct\": null"));
    }
}
