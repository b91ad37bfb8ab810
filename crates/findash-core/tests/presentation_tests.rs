#![cfg(feature = "presentation")]

use findash_core::presentation::{
    donut, format_indicator, month_options, render, Selection, View,
};
use findash_core::{DerivedTable, Metric, MonthlyRecord, Trend, DEFAULT_TARGET_MARGIN};
use pretty_assertions::assert_eq;

fn record(month: &str, income: f64, receivable: f64) -> MonthlyRecord {
    MonthlyRecord {
        month: month.to_string(),
        accounts_receivable: receivable,
        accounts_payable: 25_000.0,
        income,
        income_budget: 95_000.0,
        cost_of_goods_sold: 40_000.0,
        total_operating_expenses: 30_000.0,
        taxes: 5_000.0,
        quick_ratio: 1.25,
        current_ratio: 1.75,
        cash_at_eom: 80_000.0,
        expense_budget: 80_000.0,
    }
}

fn three_months() -> DerivedTable {
    DerivedTable::from_records(
        &[
            record("Jan", 100_000.0, 40_000.0),
            record("Feb", 110_000.0, 36_000.0),
            record("Mar", 110_000.0, 36_000.0),
        ],
        DEFAULT_TARGET_MARGIN,
    )
    .unwrap()
}

// ===========================================================================
// Indicators
// ===========================================================================

#[test]
fn test_indicator_up() {
    let table = three_months();
    let feb = table.get("Feb").unwrap();
    let tile = format_indicator(feb, Metric::Income);

    assert_eq!(tile.label, "Income");
    assert_eq!(tile.value_text, "$110,000");
    assert_eq!(tile.change_text, "+10.0%");
    assert_eq!(tile.trend, Trend::Up);
    assert_eq!(tile.icon.as_deref(), Some("caret-up"));
    assert_eq!(tile.color.as_deref(), Some("#00B050"));
    assert_eq!(tile.caption, "vs previous month");
}

#[test]
fn test_indicator_down() {
    let table = three_months();
    let feb = table.get("Feb").unwrap();
    let tile = format_indicator(feb, Metric::AccountsReceivable);

    assert_eq!(tile.value_text, "$36,000");
    assert_eq!(tile.change_text, "-10.0%");
    assert_eq!(tile.trend, Trend::Down);
    assert_eq!(tile.icon.as_deref(), Some("caret-down"));
    assert_eq!(tile.color.as_deref(), Some("#FF3399"));
}

#[test]
fn test_indicator_flat() {
    let table = three_months();
    let mar = table.get("Mar").unwrap();
    let tile = format_indicator(mar, Metric::Income);

    assert_eq!(tile.change_text, "0.0%");
    assert_eq!(tile.trend, Trend::Flat);
    assert_eq!(tile.icon, None);
    assert_eq!(tile.color, None);
}

#[test]
fn test_ratio_and_percent_formatting() {
    let table = three_months();
    let jan = table.get("Jan").unwrap();

    assert_eq!(format_indicator(jan, Metric::QuickRatio).value_text, "1.25");
    assert_eq!(format_indicator(jan, Metric::NetProfitMarginPct).value_text, "25.0%");
}

#[test]
fn test_target_indicator_uses_own_value() {
    let table = three_months();
    let jan = table.get("Jan").unwrap();
    let tile = format_indicator(jan, Metric::NetProfitMarginVsTarget);

    assert_eq!(tile.value, 15.0);
    assert_eq!(tile.change, 15.0);
    assert_eq!(tile.change_text, "+15.0%");
    assert_eq!(tile.caption, "vs target");
    assert_eq!(tile.trend, Trend::Up);
}

#[test]
fn test_non_finite_change_renders_not_available() {
    let table = DerivedTable::from_records(
        &[record("Jan", 100_000.0, 0.0), record("Feb", 100_000.0, 5_000.0)],
        DEFAULT_TARGET_MARGIN,
    )
    .unwrap();
    let tile = format_indicator(table.get("Feb").unwrap(), Metric::AccountsReceivable);

    assert_eq!(tile.change_text, "n/a");
    assert_eq!(tile.trend, Trend::Up);
}

#[test]
fn test_donut_payload() {
    let table = three_months();
    let jan = table.get("Jan").unwrap();
    let d = donut(jan, Metric::NetProfitMarginPct);

    assert_eq!(d.value, 25.0);
    assert_eq!(d.complement, 75.0);
}

// ===========================================================================
// Selection and views
// ===========================================================================

#[test]
fn test_render_none_selected_is_unchanged() {
    let table = three_months();
    assert_eq!(render(&table, &Selection::NoneSelected), View::Unchanged);
}

#[test]
fn test_render_unknown_month_is_no_data() {
    let table = three_months();
    let view = render(&table, &Selection::Selected("Zzz".into()));
    assert_eq!(
        view,
        View::NoData {
            month: "Zzz".into()
        }
    );
}

#[test]
fn test_render_panel() {
    let table = three_months();
    let view = render(&table, &Selection::from(Some("Feb")));
    let panel = match view {
        View::Panel(p) => p,
        other => panic!("Expected a panel, got {other:?}"),
    };

    assert_eq!(panel.month, "Feb");
    assert_eq!(panel.tiles.len(), 10);
    assert_eq!(panel.tiles[0].metric, Metric::AccountsReceivable);
    assert_eq!(panel.donuts.len(), 3);
    assert_eq!(panel.target_margin, 10.0);
    assert_eq!(panel.target.metric, Metric::NetProfitMarginVsTarget);
    assert_eq!(
        panel.tile(Metric::Income).map(|t| t.change_text.as_str()),
        Some("+10.0%")
    );
    assert!(panel.tile(Metric::Taxes).is_none());
}

#[test]
fn test_month_options_in_fiscal_order() {
    let table = three_months();
    let options = month_options(&table);
    let values: Vec<&str> = options.iter().map(|o| o.value.as_str()).collect();
    assert_eq!(values, vec!["Jan", "Feb", "Mar"]);
    assert_eq!(options[1].label, "Feb");
}
