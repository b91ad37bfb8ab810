pub mod dashboard;
pub mod error;
pub mod types;

#[cfg(feature = "presentation")]
pub mod presentation;

pub use dashboard::metric::Metric;
pub use dashboard::record::{MonthlyRecord, SourceTable};
pub use dashboard::table::{build_derived_table, lookup_month, DerivedTable, MonthRow};
pub use dashboard::trend::{classify_trend, Trend};
pub use error::DashboardError;
pub use types::*;

/// Standard result type for all dashboard operations
pub type DashboardResult<T> = Result<T, DashboardError>;
