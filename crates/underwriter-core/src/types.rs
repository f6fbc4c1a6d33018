use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Fractional ratios (0.05 = 5%).
pub type Rate = Decimal;

/// Ratios already scaled by 100 (5.0 = 5%).
pub type Percent = Decimal;

/// Multiples (e.g., 1.5x current ratio)
pub type Multiple = Decimal;

/// Fiscal year label as reported; 0 when the source year was unparsable.
pub type FiscalYear = i32;

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
    /// Number of financial records that went through the pipeline.
    pub records_analyzed: usize,
}

/// Wrap a finished computation in the output envelope, timing it from `started`.
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    started: Instant,
    records_analyzed: usize,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: started.elapsed().as_micros() as u64,
            precision: "rust_decimal_128bit".to_string(),
            records_analyzed,
        },
    }
}
