use clap::Args;
use serde_json::{Map, Value};
use std::time::Instant;

use findash_core::presentation::{month_options, render, Selection, View};
use findash_core::{with_metadata, DerivedTable, Metric, MonthRow};

use crate::config::DashboardConfig;

/// Arguments for a single month's dashboard
#[derive(Args)]
pub struct ShowArgs {
    /// Month label, e.g. "Mar" (falls back to the configured default month)
    #[arg(long, short)]
    pub month: Option<String>,
}

fn assumptions(config: &DashboardConfig, table: &DerivedTable) -> Value {
    serde_json::json!({
        "data_path": config.data_path.display().to_string(),
        "target_margin": table.target_margin(),
        "months": table.len(),
    })
}

/// Flatten a row into `month`, every metric value, and `pct_<metric>` for
/// tracked metrics. Non-finite values become null.
pub fn flatten_row(row: &MonthRow) -> Value {
    let mut map = Map::new();
    map.insert("month".into(), Value::from(row.month()));
    for metric in Metric::ALL {
        map.insert(metric.key().into(), Value::from(row.value(metric)));
    }
    for metric in Metric::ALL {
        if let Some(pct) = row.pct_change(metric) {
            map.insert(format!("pct_{}", metric.key()), Value::from(pct));
        }
    }
    Value::Object(map)
}

pub fn run_months(
    config: &DashboardConfig,
    table: &DerivedTable,
) -> Result<Value, Box<dyn std::error::Error>> {
    let start = Instant::now();
    let options = month_options(table);
    let elapsed = start.elapsed().as_micros() as u64;

    Ok(serde_json::to_value(with_metadata(
        "Month selector options in fiscal order",
        &assumptions(config, table),
        Vec::new(),
        elapsed,
        options,
    ))?)
}

pub fn run_table(
    config: &DashboardConfig,
    table: &DerivedTable,
) -> Result<Value, Box<dyn std::error::Error>> {
    let start = Instant::now();
    let rows: Vec<Value> = table.rows().iter().map(flatten_row).collect();
    let elapsed = start.elapsed().as_micros() as u64;

    Ok(serde_json::to_value(with_metadata(
        "Derived monthly metrics with month-over-month percent changes",
        &assumptions(config, table),
        table.warnings(),
        elapsed,
        rows,
    ))?)
}

pub fn run_show(
    args: &ShowArgs,
    config: &DashboardConfig,
    table: &DerivedTable,
) -> Result<Value, Box<dyn std::error::Error>> {
    let start = Instant::now();
    let selection = Selection::from(args.month.clone().or_else(|| config.default_month.clone()));
    let view = render(table, &selection);

    let mut warnings = Vec::new();
    match &view {
        View::Unchanged => tracing::info!("no month selected, nothing to update"),
        View::NoData { month } => {
            tracing::warn!(month = %month, "no data for this selection");
            warnings.push(format!("No data for this selection: '{month}'"));
        }
        View::Panel(panel) => {
            warnings.extend(
                table
                    .warnings()
                    .into_iter()
                    .filter(|w| w.starts_with(&format!("{}:", panel.month))),
            );
        }
    }
    let elapsed = start.elapsed().as_micros() as u64;

    Ok(serde_json::to_value(with_metadata(
        "Dashboard panel for the selected month",
        &assumptions(config, table),
        warnings,
        elapsed,
        view,
    ))?)
}

pub fn run_metrics() -> Result<Value, Box<dyn std::error::Error>> {
    let catalogue: Vec<Value> = Metric::ALL
        .iter()
        .map(|m| {
            serde_json::json!({
                "key": m.key(),
                "label": m.label(),
                "kind": m.kind(),
                "base": m.is_base(),
                "tracks_change": m.tracks_change(),
            })
        })
        .collect();
    Ok(Value::Array(catalogue))
}

#[cfg(test)]
mod tests {
    use super::*;
    use findash_core::{MonthlyRecord, DEFAULT_TARGET_MARGIN};

    fn table() -> DerivedTable {
        let rec = |month: &str, income: f64| MonthlyRecord {
            month: month.into(),
            accounts_receivable: 1_000.0,
            accounts_payable: 800.0,
            income,
            income_budget: 100_000.0,
            cost_of_goods_sold: 40_000.0,
            total_operating_expenses: 30_000.0,
            taxes: 5_000.0,
            quick_ratio: 1.1,
            current_ratio: 1.6,
            cash_at_eom: 20_000.0,
            expense_budget: 75_000.0,
        };
        DerivedTable::from_records(&[rec("Jan", 100_000.0), rec("Feb", 120_000.0)], DEFAULT_TARGET_MARGIN)
            .unwrap()
    }

    #[test]
    fn test_flatten_row() {
        let t = table();
        let v = flatten_row(t.get("Feb").unwrap());
        assert_eq!(v["month"], "Feb");
        assert_eq!(v["income"], 120_000.0);
        assert!(v["pct_income"].as_f64().unwrap() > 19.99);
        assert!(v.get("pct_net_profit_margin_vs_target").is_none());
        assert!(v.get("net_profit_margin_vs_target").is_some());
    }

    #[test]
    fn test_show_unknown_month() {
        let t = table();
        let out = run_show(
            &ShowArgs {
                month: Some("Zzz".into()),
            },
            &DashboardConfig::default(),
            &t,
        )
        .unwrap();
        assert_eq!(out["result"]["state"], "no_data");
        assert_eq!(out["warnings"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_show_uses_default_month() {
        let t = table();
        let config = DashboardConfig {
            default_month: Some("Jan".into()),
            ..DashboardConfig::default()
        };
        let out = run_show(&ShowArgs { month: None }, &config, &t).unwrap();
        assert_eq!(out["result"]["state"], "panel");
        assert_eq!(out["result"]["month"], "Jan");
    }

    #[test]
    fn test_show_no_selection() {
        let t = table();
        let out = run_show(&ShowArgs { month: None }, &DashboardConfig::default(), &t).unwrap();
        assert_eq!(out["result"]["state"], "unchanged");
    }

    #[test]
    fn test_table_and_months() {
        let t = table();
        let config = DashboardConfig::default();
        let out = run_table(&config, &t).unwrap();
        assert_eq!(out["result"].as_array().unwrap().len(), 2);
        assert_eq!(out["assumptions"]["target_margin"], 10.0);

        let out = run_months(&config, &t).unwrap();
        assert_eq!(out["result"][0]["value"], "Jan");
    }

    #[test]
    fn test_metrics_catalogue() {
        let out = run_metrics().unwrap();
        let arr = out.as_array().unwrap();
        assert_eq!(arr.len(), Metric::ALL.len());
        assert_eq!(arr[0]["key"], "accounts_receivable");
        assert_eq!(arr[0]["kind"], "currency");
    }
}
