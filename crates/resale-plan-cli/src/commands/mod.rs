pub mod business_plan;
pub mod property;
