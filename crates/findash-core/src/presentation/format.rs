use std::cmp::Ordering;

use crate::dashboard::metric::MetricKind;

/// Shown in place of ±inf / NaN.
pub const NOT_AVAILABLE: &str = "n/a";

/// Fixed-point formatting of `|value|` with `,` thousands grouping.
fn grouped_abs(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match formatted.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (formatted.as_str(), None),
    };

    let mut out = String::with_capacity(formatted.len() + int_part.len() / 3);
    let digits = int_part.len();
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (digits - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

/// Sign of the value as displayed; a value that rounds to zero has none.
fn displayed_sign(value: f64, digits: &str) -> Ordering {
    if digits.bytes().all(|b| b == b'0' || !b.is_ascii_digit()) {
        Ordering::Equal
    } else if value < 0.0 {
        Ordering::Less
    } else {
        Ordering::Greater
    }
}

fn sign(value: f64, digits: &str) -> &'static str {
    match displayed_sign(value, digits) {
        Ordering::Less => "-",
        _ => "",
    }
}

/// `$1,234`: whole units with thousands separators.
pub fn format_currency(value: f64) -> String {
    if !value.is_finite() {
        return NOT_AVAILABLE.to_string();
    }
    let digits = grouped_abs(value, 0);
    format!("{}${}", sign(value, &digits), digits)
}

/// `1.23`
pub fn format_ratio(value: f64) -> String {
    if !value.is_finite() {
        return NOT_AVAILABLE.to_string();
    }
    let digits = grouped_abs(value, 2);
    format!("{}{}", sign(value, &digits), digits)
}

/// `25.0%`
pub fn format_percent(value: f64) -> String {
    if !value.is_finite() {
        return NOT_AVAILABLE.to_string();
    }
    let digits = grouped_abs(value, 1);
    format!("{}{}%", sign(value, &digits), digits)
}

/// `+5.0%`, `-3.2%`, `0.0%`. The plus sign is explicit only when positive.
pub fn format_change(pct: f64) -> String {
    if !pct.is_finite() {
        return NOT_AVAILABLE.to_string();
    }
    let digits = grouped_abs(pct, 1);
    let prefix = match displayed_sign(pct, &digits) {
        Ordering::Greater => "+",
        Ordering::Less => "-",
        Ordering::Equal => "",
    };
    format!("{}{}%", prefix, digits)
}

pub fn format_value(kind: MetricKind, value: f64) -> String {
    match kind {
        MetricKind::Currency => format_currency(value),
        MetricKind::Ratio => format_ratio(value),
        MetricKind::Percent => format_percent(value),
    }
}
