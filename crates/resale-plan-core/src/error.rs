use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ResalePlanError {
    #[error("Invalid input for {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Insufficient financing: envelope {available} does not cover acquisition cost {required}")]
    InsufficientFinancing { available: Decimal, required: Decimal },

    #[error("Convergence failure: {function} did not converge after {iterations} iterations (delta: {last_delta})")]
    ConvergenceFailure {
        function: String,
        iterations: u32,
        last_delta: Decimal,
    },

    #[error("Date error: {0}")]
    DateError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for ResalePlanError {
    fn from(e: serde_json::Error) -> Self {
        ResalePlanError::SerializationError(e.to_string())
    }
}
