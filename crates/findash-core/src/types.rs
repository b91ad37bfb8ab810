use serde::{Deserialize, Serialize};

/// Currency amounts, as read from the source table.
pub type Money = f64;

/// Plain ratios (quick ratio, current ratio).
pub type Ratio = f64;

/// Percentages expressed on a 0-100 scale (25.0 = 25%).
pub type Percent = f64;

/// Net profit margin target, in percent.
pub const DEFAULT_TARGET_MARGIN: Percent = 10.0;

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "f64".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_metadata_envelope() {
        let out = with_metadata(
            "Test methodology",
            &serde_json::json!({ "target_margin": 10.0 }),
            vec!["careful".to_string()],
            42,
            1.5_f64,
        );
        assert_eq!(out.result, 1.5);
        assert_eq!(out.methodology, "Test methodology");
        assert_eq!(out.assumptions["target_margin"], 10.0);
        assert_eq!(out.warnings, vec!["careful".to_string()]);
        assert_eq!(out.metadata.computation_time_us, 42);
        assert_eq!(out.metadata.precision, "f64");
        assert_eq!(out.metadata.version, env!("CARGO_PKG_VERSION"));
    }
}
