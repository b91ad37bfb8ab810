use thiserror::Error;

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("Empty input: the source table has no rows")]
    EmptyInput,

    #[error("Missing field: required column '{field}' is absent from the source table")]
    MissingField { field: String },

    #[error("Unknown month: '{month}' is not present in the derived table")]
    UnknownMonth { month: String },

    #[error("Non-finite result: percent change of {metric} in {month} (previous value is zero or not finite)")]
    NonFiniteResult { month: String, metric: String },

    #[error("Invalid input: {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Duplicate month: '{month}' appears more than once")]
    DuplicateMonth { month: String },

    #[error("CSV error: {0}")]
    Csv(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for DashboardError {
    fn from(e: serde_json::Error) -> Self {
        DashboardError::SerializationError(e.to_string())
    }
}

impl From<csv::Error> for DashboardError {
    fn from(e: csv::Error) -> Self {
        DashboardError::Csv(e.to_string())
    }
}
