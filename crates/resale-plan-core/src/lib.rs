pub mod error;
pub mod time_value;
pub mod types;

#[cfg(feature = "business_plan")]
pub mod business_plan;

#[cfg(feature = "property")]
pub mod property;

pub use error::ResalePlanError;
pub use types::*;

/// Standard result type for all resale-plan operations
pub type ResalePlanResult<T> = Result<T, ResalePlanError>;
