use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DashboardError;

/// How a metric's value is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    /// Whole currency units with thousands separators
    Currency,
    /// Two-decimal ratio
    Ratio,
    /// One-decimal percentage on a 0-100 scale
    Percent,
}

/// Every base field of the source table and every metric derived from it.
///
/// Variants are declared base fields first, then derived metrics; `Ord`
/// follows declaration order so maps keyed by `Metric` iterate the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    AccountsReceivable,
    AccountsPayable,
    Income,
    IncomeBudget,
    CostOfGoodsSold,
    TotalOperatingExpenses,
    Taxes,
    QuickRatio,
    CurrentRatio,
    CashAtEom,
    ExpenseBudget,
    GrossProfit,
    OperatingProfitEbit,
    NetProfit,
    Expenses,
    NetProfitMarginPct,
    IncomeBudgetPct,
    ExpenseBudgetPct,
    NetProfitMarginVsTarget,
}

impl Metric {
    /// Columns every source table must provide, in canonical order.
    pub const BASE: [Metric; 11] = [
        Metric::AccountsReceivable,
        Metric::AccountsPayable,
        Metric::Income,
        Metric::IncomeBudget,
        Metric::CostOfGoodsSold,
        Metric::TotalOperatingExpenses,
        Metric::Taxes,
        Metric::QuickRatio,
        Metric::CurrentRatio,
        Metric::CashAtEom,
        Metric::ExpenseBudget,
    ];

    pub const DERIVED: [Metric; 8] = [
        Metric::GrossProfit,
        Metric::OperatingProfitEbit,
        Metric::NetProfit,
        Metric::Expenses,
        Metric::NetProfitMarginPct,
        Metric::IncomeBudgetPct,
        Metric::ExpenseBudgetPct,
        Metric::NetProfitMarginVsTarget,
    ];

    pub const ALL: [Metric; 19] = [
        Metric::AccountsReceivable,
        Metric::AccountsPayable,
        Metric::Income,
        Metric::IncomeBudget,
        Metric::CostOfGoodsSold,
        Metric::TotalOperatingExpenses,
        Metric::Taxes,
        Metric::QuickRatio,
        Metric::CurrentRatio,
        Metric::CashAtEom,
        Metric::ExpenseBudget,
        Metric::GrossProfit,
        Metric::OperatingProfitEbit,
        Metric::NetProfit,
        Metric::Expenses,
        Metric::NetProfitMarginPct,
        Metric::IncomeBudgetPct,
        Metric::ExpenseBudgetPct,
        Metric::NetProfitMarginVsTarget,
    ];

    /// Stable snake_case key, identical to the serde representation.
    pub fn key(self) -> &'static str {
        match self {
            Metric::AccountsReceivable => "accounts_receivable",
            Metric::AccountsPayable => "accounts_payable",
            Metric::Income => "income",
            Metric::IncomeBudget => "income_budget",
            Metric::CostOfGoodsSold => "cost_of_goods_sold",
            Metric::TotalOperatingExpenses => "total_operating_expenses",
            Metric::Taxes => "taxes",
            Metric::QuickRatio => "quick_ratio",
            Metric::CurrentRatio => "current_ratio",
            Metric::CashAtEom => "cash_at_eom",
            Metric::ExpenseBudget => "expense_budget",
            Metric::GrossProfit => "gross_profit",
            Metric::OperatingProfitEbit => "operating_profit_ebit",
            Metric::NetProfit => "net_profit",
            Metric::Expenses => "expenses",
            Metric::NetProfitMarginPct => "net_profit_margin_pct",
            Metric::IncomeBudgetPct => "income_budget_pct",
            Metric::ExpenseBudgetPct => "expense_budget_pct",
            Metric::NetProfitMarginVsTarget => "net_profit_margin_vs_target",
        }
    }

    /// Human-readable tile label.
    pub fn label(self) -> &'static str {
        match self {
            Metric::AccountsReceivable => "Accounts Receivable",
            Metric::AccountsPayable => "Accounts Payable",
            Metric::Income => "Income",
            Metric::IncomeBudget => "Income Budget",
            Metric::CostOfGoodsSold => "Cost of Goods Sold",
            Metric::TotalOperatingExpenses => "Total Operating Expenses",
            Metric::Taxes => "Taxes",
            Metric::QuickRatio => "Quick Ratio",
            Metric::CurrentRatio => "Current Ratio",
            Metric::CashAtEom => "Cash at EOM",
            Metric::ExpenseBudget => "Expense Budget",
            Metric::GrossProfit => "Gross Profit",
            Metric::OperatingProfitEbit => "Operating Profit (EBIT)",
            Metric::NetProfit => "Net Profit",
            Metric::Expenses => "Expenses",
            Metric::NetProfitMarginPct => "Net Profit Margin %",
            Metric::IncomeBudgetPct => "Income Budget %",
            Metric::ExpenseBudgetPct => "Expense Budget %",
            Metric::NetProfitMarginVsTarget => "Net Profit Margin vs Target",
        }
    }

    pub fn kind(self) -> MetricKind {
        match self {
            Metric::QuickRatio | Metric::CurrentRatio => MetricKind::Ratio,
            Metric::NetProfitMarginPct
            | Metric::IncomeBudgetPct
            | Metric::ExpenseBudgetPct
            | Metric::NetProfitMarginVsTarget => MetricKind::Percent,
            _ => MetricKind::Currency,
        }
    }

    /// True for columns read straight from the source table.
    pub fn is_base(self) -> bool {
        Metric::BASE.contains(&self)
    }

    /// True when the metric carries a month-over-month percent change.
    ///
    /// The target comparison is measured against a constant, so it has no
    /// previous-month companion.
    pub fn tracks_change(self) -> bool {
        self != Metric::NetProfitMarginVsTarget
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Metric {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = normalize_key(s);
        Metric::ALL
            .iter()
            .copied()
            .find(|m| m.key() == key)
            .ok_or_else(|| DashboardError::InvalidInput {
                field: "metric".into(),
                reason: format!("'{s}' is not a known metric"),
            })
    }
}

/// Normalize a column or metric name: trimmed, lowercased, and with runs of
/// whitespace, `-` or `_` collapsed into a single `_`.
pub fn normalize_key(raw: &str) -> String {
    let mut key = String::with_capacity(raw.len());
    let mut pending_sep = false;
    for ch in raw.trim().chars() {
        if ch.is_whitespace() || ch == '-' || ch == '_' {
            pending_sep = !key.is_empty();
        } else {
            if pending_sep {
                key.push('_');
                pending_sep = false;
            }
            key.extend(ch.to_lowercase());
        }
    }
    key
}
