pub mod metric;
pub mod record;
pub mod table;
pub mod trend;
