use std::time::Instant;

use tracing::info;

use super::config::PlanConfig;
use super::costs::compute_costs;
use super::inputs::ProjectInputs;
use super::periods::generate_periods;
use super::results::{aggregate, BusinessPlanResult};
use super::simulation::run_simulation;
use crate::types::{with_metadata, ComputationOutput};
use crate::ResalePlanResult;

/// Compute the complete business plan of a project.
///
/// Pure function of its inputs: the same `inputs` and `config` always give
/// the same `result`. Only the timing recorded in the metadata varies.
///
/// Financing sufficiency is not enforced here; callers that want to reject
/// under-financed acquisitions run
/// [`check_financing_precondition`](super::check_financing_precondition) first.
/// Amounts no source can cover are reported as `financing.unfunded`.
pub fn calculate_business_plan(
    inputs: &ProjectInputs,
    config: &PlanConfig,
) -> ResalePlanResult<ComputationOutput<BusinessPlanResult>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    inputs.validate()?;
    let sale_date = inputs.sale_date()?;
    let periods = generate_periods(inputs.purchase_date, sale_date)?;
    let costs = compute_costs(inputs);
    let outcome = run_simulation(inputs, &costs, &periods, config);

    let result = aggregate(inputs, costs, sale_date, outcome, config, &mut warnings);

    info!(
        periods = result.periods.len(),
        cost_basis = %result.cost_basis.round_dp(2),
        net_margin = %result.profitability.net_margin.round_dp(2),
        irr_pct = ?result.profitability.irr_pct.map(|r| r.round_dp(4)),
        "business plan computed"
    );

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Buy-renovate-resell business plan: quarterly financing waterfall (primary credit, then equity, then secondary credit), interest accrued on post-draw balances and paid the following period, bisection IRR",
        inputs,
        warnings,
        elapsed,
        result,
    ))
}
