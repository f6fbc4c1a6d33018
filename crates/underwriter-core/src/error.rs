use thiserror::Error;

#[derive(Debug, Error)]
pub enum UnderwriterError {
    #[error("Invalid input: {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    #[error("No financial data loaded")]
    NoData,

    #[error("Entity not found: {0}")]
    EntityNotFound(String),

    #[error("No record for {entity} in fiscal year {year}")]
    PeriodNotFound { entity: String, year: i32 },

    #[error("Narrative generation failed: {0}")]
    Narrative(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for UnderwriterError {
    fn from(e: serde_json::Error) -> Self {
        UnderwriterError::SerializationError(e.to_string())
    }
}
