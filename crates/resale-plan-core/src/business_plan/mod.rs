//! Buy-renovate-resell business plan.
//!
//! Inputs are normalized from loosely typed records, costs are split into
//! acquisition, works and soft costs, and a quarterly simulation funds them
//! from three capital sources before the margins and IRR are derived.

pub mod allocator;
pub mod config;
pub mod costs;
pub mod inputs;
pub mod normalize;
pub mod periods;
pub mod plan;
pub mod results;
pub mod simulation;

pub use allocator::{Allocation, FinancingState, FundingSource, SourceAmounts};
pub use config::PlanConfig;
pub use costs::{compute_costs, CostBreakdown};
pub use inputs::{
    check_financing_precondition, check_holding_period, parse_holding_period, sale_date_after,
    ProjectInputs, RawProjectInputs, Surfaces,
};
pub use periods::{generate_periods, Period};
pub use plan::calculate_business_plan;
pub use results::BusinessPlanResult;
pub use simulation::{run_simulation, PeriodDetail, SimulationOutcome};

#[cfg(test)]
pub(crate) mod test_support {
    use super::inputs::{ProjectInputs, RawProjectInputs};
    use serde_json::{json, Value};

    /// Minimal valid project with `extra` fields merged on top.
    pub fn inputs_with(extra: Value) -> ProjectInputs {
        let mut base = json!({
            "habitable_surface": 50,
            "purchase_price": 200000,
            "purchase_date": "2024-01-01",
        });
        if let (Some(base), Value::Object(extra)) = (base.as_object_mut(), extra) {
            base.extend(extra);
        }
        let raw: RawProjectInputs = serde_json::from_value(base).unwrap();
        ProjectInputs::from_raw(&raw).unwrap()
    }
}
