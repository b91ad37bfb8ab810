use serde::Serialize;

use super::indicator::{donut, format_indicator, DonutPayload, Indicator};
use crate::dashboard::metric::Metric;
use crate::dashboard::table::{lookup_month, DerivedTable, MonthRow};
use crate::types::Percent;

/// Tiles shown for a month, in display order.
pub const PANEL_TILES: [Metric; 10] = [
    Metric::AccountsReceivable,
    Metric::AccountsPayable,
    Metric::Income,
    Metric::Expenses,
    Metric::GrossProfit,
    Metric::OperatingProfitEbit,
    Metric::NetProfit,
    Metric::QuickRatio,
    Metric::CurrentRatio,
    Metric::CashAtEom,
];

/// Percentages drawn as ring charts.
pub const PANEL_DONUTS: [Metric; 3] = [
    Metric::NetProfitMarginPct,
    Metric::IncomeBudgetPct,
    Metric::ExpenseBudgetPct,
];

/// State of the month selector. Clearing it is a valid state, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    NoneSelected,
    Selected(String),
}

impl From<Option<String>> for Selection {
    fn from(month: Option<String>) -> Self {
        match month {
            Some(m) if !m.trim().is_empty() => Selection::Selected(m),
            _ => Selection::NoneSelected,
        }
    }
}

impl From<Option<&str>> for Selection {
    fn from(month: Option<&str>) -> Self {
        Selection::from(month.map(str::to_string))
    }
}

/// A labelled donut.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Donut {
    pub metric: Metric,
    pub label: String,
    pub value_text: String,
    pub payload: DonutPayload,
}

/// Everything displayed for one month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Panel {
    pub month: String,
    pub tiles: Vec<Indicator>,
    pub donuts: Vec<Donut>,
    pub target_margin: Percent,
    pub target: Indicator,
}

impl Panel {
    pub fn for_row(row: &MonthRow, target_margin: Percent) -> Self {
        let tiles = PANEL_TILES
            .iter()
            .map(|m| format_indicator(row, *m))
            .collect();
        let donuts = PANEL_DONUTS
            .iter()
            .map(|m| {
                let tile = format_indicator(row, *m);
                Donut {
                    metric: *m,
                    label: tile.label,
                    value_text: tile.value_text,
                    payload: donut(row, *m),
                }
            })
            .collect();

        Panel {
            month: row.month().to_string(),
            tiles,
            donuts,
            target_margin,
            target: format_indicator(row, Metric::NetProfitMarginVsTarget),
        }
    }

    pub fn tile(&self, metric: Metric) -> Option<&Indicator> {
        self.tiles.iter().find(|t| t.metric == metric)
    }
}

/// What the renderer should do after a selection event.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum View {
    /// Nothing selected: keep whatever is on screen.
    Unchanged,
    /// The selected month has no row.
    NoData { month: String },
    Panel(Panel),
}

/// Resolve a selection against the table. Never fails.
pub fn render(table: &DerivedTable, selection: &Selection) -> View {
    match selection {
        Selection::NoneSelected => View::Unchanged,
        Selection::Selected(month) => match lookup_month(table, month) {
            Ok(row) => View::Panel(Panel::for_row(row, table.target_margin())),
            Err(_) => View::NoData {
                month: month.clone(),
            },
        },
    }
}

/// One entry of the month dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthOption {
    pub label: String,
    pub value: String,
}

/// Dropdown options in fiscal order.
pub fn month_options(table: &DerivedTable) -> Vec<MonthOption> {
    table
        .months()
        .map(|m| MonthOption {
            label: m.to_string(),
            value: m.to_string(),
        })
        .collect()
}
