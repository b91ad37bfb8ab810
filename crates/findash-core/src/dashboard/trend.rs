use serde::{Deserialize, Serialize};

/// Direction of a period-over-period change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Flat,
}

/// Classify a percent change. Only an exact zero is `Flat`; NaN compares
/// neither above nor below zero and also lands on `Flat`.
pub fn classify_trend(pct_change: f64) -> Trend {
    if pct_change > 0.0 {
        Trend::Up
    } else if pct_change < 0.0 {
        Trend::Down
    } else {
        Trend::Flat
    }
}
