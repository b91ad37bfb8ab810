use chrono::Month;
use serde::{Deserialize, Serialize};
use std::io::Read;

use super::metric::{normalize_key, Metric};
use crate::error::DashboardError;
use crate::types::{Money, Percent, Ratio};
use crate::DashboardResult;

/// Column holding the month label.
pub const MONTH_COLUMN: &str = "month";

// ---------------------------------------------------------------------------
// MonthlyRecord
// ---------------------------------------------------------------------------

/// One row of the raw monthly table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyRecord {
    /// Calendar-month label as it appears in the source, e.g. "Mar"
    pub month: String,
    pub accounts_receivable: Money,
    pub accounts_payable: Money,
    pub income: Money,
    pub income_budget: Money,
    pub cost_of_goods_sold: Money,
    pub total_operating_expenses: Money,
    pub taxes: Money,
    pub quick_ratio: Ratio,
    pub current_ratio: Ratio,
    /// Cash at end of month
    pub cash_at_eom: Money,
    pub expense_budget: Money,
}

impl MonthlyRecord {
    /// income - cost of goods sold
    pub fn gross_profit(&self) -> Money {
        self.income - self.cost_of_goods_sold
    }

    /// gross profit - total operating expenses
    pub fn operating_profit_ebit(&self) -> Money {
        self.gross_profit() - self.total_operating_expenses
    }

    /// EBIT - taxes
    pub fn net_profit(&self) -> Money {
        self.operating_profit_ebit() - self.taxes
    }

    /// cost of goods sold + total operating expenses
    pub fn expenses(&self) -> Money {
        self.cost_of_goods_sold + self.total_operating_expenses
    }

    pub fn net_profit_margin_pct(&self) -> Percent {
        self.net_profit() / self.income * 100.0
    }

    pub fn income_budget_pct(&self) -> Percent {
        self.income / self.income_budget * 100.0
    }

    pub fn expense_budget_pct(&self) -> Percent {
        self.expenses() / self.expense_budget * 100.0
    }

    pub fn net_profit_margin_vs_target(&self, target_margin: Percent) -> Percent {
        margin_vs_target(self.net_profit_margin_pct(), target_margin)
    }

    /// Value of any metric for this month. Derived metrics use only this
    /// record's fields.
    pub fn value(&self, metric: Metric, target_margin: Percent) -> f64 {
        match metric {
            Metric::AccountsReceivable => self.accounts_receivable,
            Metric::AccountsPayable => self.accounts_payable,
            Metric::Income => self.income,
            Metric::IncomeBudget => self.income_budget,
            Metric::CostOfGoodsSold => self.cost_of_goods_sold,
            Metric::TotalOperatingExpenses => self.total_operating_expenses,
            Metric::Taxes => self.taxes,
            Metric::QuickRatio => self.quick_ratio,
            Metric::CurrentRatio => self.current_ratio,
            Metric::CashAtEom => self.cash_at_eom,
            Metric::ExpenseBudget => self.expense_budget,
            Metric::GrossProfit => self.gross_profit(),
            Metric::OperatingProfitEbit => self.operating_profit_ebit(),
            Metric::NetProfit => self.net_profit(),
            Metric::Expenses => self.expenses(),
            Metric::NetProfitMarginPct => self.net_profit_margin_pct(),
            Metric::IncomeBudgetPct => self.income_budget_pct(),
            Metric::ExpenseBudgetPct => self.expense_budget_pct(),
            Metric::NetProfitMarginVsTarget => self.net_profit_margin_vs_target(target_margin),
        }
    }

    fn set_base(&mut self, metric: Metric, value: f64) {
        match metric {
            Metric::AccountsReceivable => self.accounts_receivable = value,
            Metric::AccountsPayable => self.accounts_payable = value,
            Metric::Income => self.income = value,
            Metric::IncomeBudget => self.income_budget = value,
            Metric::CostOfGoodsSold => self.cost_of_goods_sold = value,
            Metric::TotalOperatingExpenses => self.total_operating_expenses = value,
            Metric::Taxes => self.taxes = value,
            Metric::QuickRatio => self.quick_ratio = value,
            Metric::CurrentRatio => self.current_ratio = value,
            Metric::CashAtEom => self.cash_at_eom = value,
            Metric::ExpenseBudget => self.expense_budget = value,
            _ => {}
        }
    }

    fn empty(month: String) -> Self {
        MonthlyRecord {
            month,
            accounts_receivable: 0.0,
            accounts_payable: 0.0,
            income: 0.0,
            income_budget: 0.0,
            cost_of_goods_sold: 0.0,
            total_operating_expenses: 0.0,
            taxes: 0.0,
            quick_ratio: 0.0,
            current_ratio: 0.0,
            cash_at_eom: 0.0,
            expense_budget: 0.0,
        }
    }
}

/// Net profit margin minus the target margin, both in percent.
pub fn margin_vs_target(margin: Percent, target_margin: Percent) -> Percent {
    margin - target_margin
}

/// Check that a label names a calendar month ("Mar", "March", "mar").
pub fn parse_month_label(label: &str) -> DashboardResult<Month> {
    label
        .trim()
        .parse::<Month>()
        .map_err(|_| DashboardError::InvalidInput {
            field: MONTH_COLUMN.into(),
            reason: format!("'{label}' is not a calendar month"),
        })
}

// ---------------------------------------------------------------------------
// SourceTable
// ---------------------------------------------------------------------------

/// Columnar view of the raw input table: normalized header names plus the
/// string cells of each row, in file order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SourceTable {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl SourceTable {
    /// Build a table from raw header names and rows. Header names are
    /// normalized; `months` is accepted as the month column.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let columns = columns
            .iter()
            .map(|c| {
                let key = normalize_key(c);
                if key == "months" {
                    MONTH_COLUMN.to_string()
                } else {
                    key
                }
            })
            .collect();
        SourceTable { columns, rows }
    }

    /// Parse CSV with a header row.
    pub fn from_csv_reader<R: Read>(reader: R) -> DashboardResult<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();
        let mut rows = Vec::new();
        for record in rdr.records() {
            let record = record?;
            rows.push(record.iter().map(str::to_string).collect());
        }

        Ok(SourceTable::new(headers, rows))
    }

    /// Normalized column names, in source order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn column_index(&self, key: &str) -> DashboardResult<usize> {
        self.columns
            .iter()
            .position(|c| c == key)
            .ok_or_else(|| DashboardError::MissingField { field: key.to_string() })
    }

    /// Convert every row into a typed record.
    ///
    /// An empty table is reported before missing columns: with no rows there
    /// is nothing to build regardless of the header.
    pub fn records(&self) -> DashboardResult<Vec<MonthlyRecord>> {
        if self.rows.is_empty() {
            return Err(DashboardError::EmptyInput);
        }

        let month_idx = self.column_index(MONTH_COLUMN)?;
        let field_idx = Metric::BASE
            .iter()
            .map(|m| self.column_index(m.key()).map(|idx| (*m, idx)))
            .collect::<DashboardResult<Vec<(Metric, usize)>>>()?;

        self.rows
            .iter()
            .enumerate()
            .map(|(row_no, row)| {
                let month = cell(row, month_idx, MONTH_COLUMN, row_no)?.to_string();
                let mut record = MonthlyRecord::empty(month);
                for (metric, idx) in &field_idx {
                    let raw = cell(row, *idx, metric.key(), row_no)?;
                    record.set_base(*metric, parse_number(raw, metric.key(), row_no)?);
                }
                Ok(record)
            })
            .collect()
    }
}

fn cell<'a>(row: &'a [String], idx: usize, field: &str, row_no: usize) -> DashboardResult<&'a str> {
    match row.get(idx).map(|s| s.trim()) {
        Some(s) if !s.is_empty() => Ok(s),
        _ => Err(DashboardError::InvalidInput {
            field: field.to_string(),
            reason: format!("blank cell in data row {}", row_no + 1),
        }),
    }
}

/// Parse a numeric cell, tolerating a leading `$` and `,` digit grouping.
fn parse_number(raw: &str, field: &str, row_no: usize) -> DashboardResult<f64> {
    let cleaned: String = raw
        .trim()
        .trim_start_matches('$')
        .chars()
        .filter(|c| *c != ',')
        .collect();
    cleaned.parse::<f64>().map_err(|_| DashboardError::InvalidInput {
        field: field.to_string(),
        reason: format!("'{raw}' in data row {} is not a number", row_no + 1),
    })
}
