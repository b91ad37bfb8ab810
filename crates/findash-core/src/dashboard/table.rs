use chrono::Month;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap, HashSet};

use super::metric::Metric;
use super::record::{parse_month_label, MonthlyRecord, SourceTable};
use super::trend::{classify_trend, Trend};
use crate::error::DashboardError;
use crate::types::Percent;
use crate::DashboardResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Every value of one month: base fields, derived metrics and the
/// month-over-month percent change of each tracked metric.
///
/// Equality compares floats bitwise, so a NaN change equals itself.
#[derive(Debug, Clone, Serialize)]
pub struct MonthRow {
    month: String,
    /// Zero-based position in fiscal order
    position: usize,
    values: BTreeMap<Metric, f64>,
    pct_change: BTreeMap<Metric, Percent>,
}

/// The derived table, keyed by month label and iterated in fiscal order.
/// Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivedTable {
    target_margin: Percent,
    rows: Vec<MonthRow>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Relative change against the previous value, in percent.
///
/// A zero `previous` is not guarded: the result is ±inf or NaN and callers
/// decide how to surface it.
pub fn percent_change(previous: f64, current: f64) -> Percent {
    (current - previous) / previous * 100.0
}

fn same_bits(a: &BTreeMap<Metric, f64>, b: &BTreeMap<Metric, f64>) -> bool {
    a.len() == b.len()
        && a
            .iter()
            .zip(b.iter())
            .all(|((ka, va), (kb, vb))| ka == kb && va.to_bits() == vb.to_bits())
}

// ---------------------------------------------------------------------------
// MonthRow
// ---------------------------------------------------------------------------

impl PartialEq for MonthRow {
    fn eq(&self, other: &Self) -> bool {
        self.month == other.month
            && self.position == other.position
            && same_bits(&self.values, &other.values)
            && same_bits(&self.pct_change, &other.pct_change)
    }
}

impl MonthRow {
    pub fn month(&self) -> &str {
        &self.month
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn value(&self, metric: Metric) -> f64 {
        self.values.get(&metric).copied().unwrap_or(f64::NAN)
    }

    /// Percent change against the previous month; `None` for metrics that
    /// carry no change (the target comparison).
    pub fn pct_change(&self, metric: Metric) -> Option<Percent> {
        self.pct_change.get(&metric).copied()
    }

    /// Like [`MonthRow::pct_change`] but rejects untracked metrics and
    /// non-finite results.
    pub fn checked_pct_change(&self, metric: Metric) -> DashboardResult<Percent> {
        let pct = self
            .pct_change(metric)
            .ok_or_else(|| DashboardError::InvalidInput {
                field: metric.key().to_string(),
                reason: "metric is compared against a fixed target, not the previous month"
                    .into(),
            })?;
        if pct.is_finite() {
            Ok(pct)
        } else {
            Err(DashboardError::NonFiniteResult {
                month: self.month.clone(),
                metric: metric.key().to_string(),
            })
        }
    }

    /// Trend of a metric: its percent change, or for the target comparison
    /// the sign of its own value.
    pub fn trend(&self, metric: Metric) -> Trend {
        match self.pct_change(metric) {
            Some(pct) => classify_trend(pct),
            None => classify_trend(self.value(metric)),
        }
    }

    /// Tracked metrics whose percent change is ±inf or NaN.
    pub fn non_finite(&self) -> impl Iterator<Item = Metric> + '_ {
        self.pct_change
            .iter()
            .filter(|(_, pct)| !pct.is_finite())
            .map(|(m, _)| *m)
    }
}

// ---------------------------------------------------------------------------
// DerivedTable
// ---------------------------------------------------------------------------

impl DerivedTable {
    /// Build the derived table from typed records in fiscal order.
    pub fn from_records(
        records: &[MonthlyRecord],
        target_margin: Percent,
    ) -> DashboardResult<Self> {
        if records.is_empty() {
            return Err(DashboardError::EmptyInput);
        }

        let mut index: HashMap<String, usize> = HashMap::with_capacity(records.len());
        let mut seen: HashSet<Month> = HashSet::with_capacity(records.len());
        for (position, record) in records.iter().enumerate() {
            let month = parse_month_label(&record.month)?;
            let key = record.month.trim().to_string();
            if !seen.insert(month) || index.insert(key.clone(), position).is_some() {
                return Err(DashboardError::DuplicateMonth { month: key });
            }
        }

        let mut rows: Vec<MonthRow> = Vec::with_capacity(records.len());
        for (position, record) in records.iter().enumerate() {
            let values: BTreeMap<Metric, f64> = Metric::ALL
                .iter()
                .map(|m| (*m, record.value(*m, target_margin)))
                .collect();

            let pct_change: BTreeMap<Metric, Percent> = Metric::ALL
                .iter()
                .filter(|m| m.tracks_change())
                .map(|m| {
                    let pct = match rows.last() {
                        Some(prev) => percent_change(prev.value(*m), values[m]),
                        None => 0.0,
                    };
                    (*m, pct)
                })
                .collect();

            rows.push(MonthRow {
                month: record.month.trim().to_string(),
                position,
                values,
                pct_change,
            });
        }

        let table = DerivedTable {
            target_margin,
            rows,
            index,
        };
        tracing::debug!(
            months = table.len(),
            target_margin,
            non_finite = table.non_finite().len(),
            "derived table built"
        );
        Ok(table)
    }

    pub fn target_margin(&self) -> Percent {
        self.target_margin
    }

    /// Rows in fiscal order.
    pub fn rows(&self) -> &[MonthRow] {
        &self.rows
    }

    /// Month labels in fiscal order.
    pub fn months(&self) -> impl Iterator<Item = &str> + '_ {
        self.rows.iter().map(|r| r.month.as_str())
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, month: &str) -> Option<&MonthRow> {
        self.index.get(month.trim()).map(|&i| &self.rows[i])
    }

    /// Every (month, metric) whose percent change is not finite, in fiscal
    /// order.
    pub fn non_finite(&self) -> Vec<(String, Metric)> {
        self.rows
            .iter()
            .flat_map(|row| row.non_finite().map(move |m| (row.month.clone(), m)))
            .collect()
    }

    /// Fail on the first non-finite percent change.
    pub fn ensure_finite(&self) -> DashboardResult<()> {
        match self.non_finite().into_iter().next() {
            Some((month, metric)) => Err(DashboardError::NonFiniteResult {
                month,
                metric: metric.key().to_string(),
            }),
            None => Ok(()),
        }
    }

    /// Human-readable notes about values the renderer cannot display.
    pub fn warnings(&self) -> Vec<String> {
        self.non_finite()
            .into_iter()
            .map(|(month, metric)| {
                format!(
                    "{month}: percent change of {} is not finite (previous value is zero or not finite)",
                    metric.key()
                )
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Operations
// ---------------------------------------------------------------------------

/// Build the derived table from the raw source table.
///
/// Fails with `EmptyInput` when there are no rows, `MissingField` when a
/// required column is absent, and `InvalidInput` / `DuplicateMonth` on
/// malformed month labels or cells.
pub fn build_derived_table(
    source: &SourceTable,
    target_margin: Percent,
) -> DashboardResult<DerivedTable> {
    let records = source.records()?;
    DerivedTable::from_records(&records, target_margin)
}

/// Look up one month's row by its exact label.
pub fn lookup_month<'a>(table: &'a DerivedTable, month: &str) -> DashboardResult<&'a MonthRow> {
    table.get(month).ok_or_else(|| DashboardError::UnknownMonth {
        month: month.to_string(),
    })
}
