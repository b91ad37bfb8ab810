use serde::Serialize;

use super::format::{format_change, format_value};
use crate::dashboard::metric::Metric;
use crate::dashboard::table::MonthRow;
use crate::dashboard::trend::Trend;
use crate::types::Percent;

pub const CAPTION_PREVIOUS_MONTH: &str = "vs previous month";
pub const CAPTION_TARGET: &str = "vs target";

/// Icon name and color for a trend; flat has neither.
pub fn trend_icon(trend: Trend) -> Option<&'static str> {
    match trend {
        Trend::Up => Some("caret-up"),
        Trend::Down => Some("caret-down"),
        Trend::Flat => None,
    }
}

pub fn trend_color(trend: Trend) -> Option<&'static str> {
    match trend {
        Trend::Up => Some("#00B050"),
        Trend::Down => Some("#FF3399"),
        Trend::Flat => None,
    }
}

/// One dashboard tile, fully formatted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Indicator {
    pub metric: Metric,
    pub label: String,
    pub value: f64,
    pub value_text: String,
    /// Percent change, or for the target comparison the distance to target
    pub change: Percent,
    pub change_text: String,
    pub trend: Trend,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub caption: String,
}

/// Format any metric of a month as a tile.
pub fn format_indicator(row: &MonthRow, metric: Metric) -> Indicator {
    let value = row.value(metric);
    let (change, caption) = match row.pct_change(metric) {
        Some(pct) => (pct, CAPTION_PREVIOUS_MONTH),
        None => (value, CAPTION_TARGET),
    };
    let trend = row.trend(metric);

    Indicator {
        metric,
        label: metric.label().to_string(),
        value,
        value_text: format_value(metric.kind(), value),
        change,
        change_text: format_change(change),
        trend,
        icon: trend_icon(trend).map(str::to_string),
        color: trend_color(trend).map(str::to_string),
        caption: caption.to_string(),
    }
}

/// Ring-chart payload: a percentage and its complement to 100.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DonutPayload {
    pub value: Percent,
    pub complement: Percent,
}

impl DonutPayload {
    pub fn new(value: Percent) -> Self {
        DonutPayload {
            value,
            complement: 100.0 - value,
        }
    }
}

pub fn donut(row: &MonthRow, metric: Metric) -> DonutPayload {
    DonutPayload::new(row.value(metric))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_donut_complement() {
        let d = DonutPayload::new(25.0);
        assert_eq!(d.value, 25.0);
        assert_eq!(d.complement, 75.0);

        // Over-budget values leave a negative remainder.
        let over = DonutPayload::new(110.0);
        assert_eq!(over.complement, -10.0);
    }

    #[test]
    fn test_trend_styles() {
        assert_eq!(trend_icon(Trend::Up), Some("caret-up"));
        assert_eq!(trend_color(Trend::Down), Some("#FF3399"));
        assert_eq!(trend_icon(Trend::Flat), None);
        assert_eq!(trend_color(Trend::Flat), None);
    }
}
