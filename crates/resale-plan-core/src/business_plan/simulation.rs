//! Quarter-by-quarter financing simulation.
//!
//! Each period first pays the interest and commission accrued during the
//! previous period, then funds its own cost, then accrues new interest on the
//! post-draw outstanding balances. Interest and commission are therefore
//! always paid one period after the balances that generated them; whatever
//! accrues during the last period is settled immediately after the loop and
//! booked on that last period.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::allocator::{Allocation, FinancingState, SourceAmounts};
use super::config::PlanConfig;
use super::costs::CostBreakdown;
use super::inputs::ProjectInputs;
use super::periods::Period;
use crate::types::{safe_div, Money, Percent};

/// Financing activity of one period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodDetail {
    pub index: usize,
    pub label: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub days: u32,
    /// Cost incurred in this period (acquisition in the first one, plus the
    /// recurring shares)
    pub period_cost: Money,
    /// Draws that funded `period_cost`
    pub cost_draws: SourceAmounts,
    /// Draws that paid interest and commission accrued earlier
    pub dues_draws: SourceAmounts,
    /// `cost_draws + dues_draws`
    pub total_draws: SourceAmounts,
    /// Interest on Source A paid in this period
    pub interest_primary_paid: Money,
    /// Interest on Source C paid in this period
    pub interest_secondary_paid: Money,
    pub commission_paid: Money,
    /// Interest plus commission paid in this period
    pub financing_cost: Money,
    /// Amount requested in this period that no source could cover
    pub unfunded: Money,
    /// Outstanding balances once the period is settled
    pub outstanding: SourceAmounts,
}

/// Aggregated result of a simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationOutcome {
    pub periods: Vec<PeriodDetail>,
    /// Cumulative draws per source
    pub drawn: SourceAmounts,
    pub total_interest_primary: Money,
    pub total_interest_secondary: Money,
    pub total_commission: Money,
    pub total_unfunded: Money,
}

impl SimulationOutcome {
    pub fn total_interest(&self) -> Money {
        self.total_interest_primary + self.total_interest_secondary
    }
}

/// Interest and commission accrued during a period, awaiting payment.
#[derive(Debug, Clone, Copy, Default)]
struct Dues {
    interest_primary: Money,
    interest_secondary: Money,
    commission: Money,
}

impl Dues {
    fn total(&self) -> Money {
        self.interest_primary + self.interest_secondary + self.commission
    }

    /// Fund the three dues in order: interest A, interest C, commission.
    fn pay(&self, state: &mut FinancingState) -> Allocation {
        let mut paid = state.allocate(self.interest_primary);
        paid.absorb(state.allocate(self.interest_secondary));
        paid.absorb(state.allocate(self.commission));
        paid
    }
}

/// `balance x rate% x days / basis`
fn accrue(balance: Money, annual_rate: Percent, days: u32, basis: Decimal) -> Money {
    safe_div(
        balance * annual_rate / Decimal::ONE_HUNDRED * Decimal::from(days),
        basis,
    )
}

/// Run the financing waterfall over `periods`.
///
/// An empty schedule is valid and yields an outcome with every total at zero.
pub fn run_simulation(
    inputs: &ProjectInputs,
    costs: &CostBreakdown,
    periods: &[Period],
    config: &PlanConfig,
) -> SimulationOutcome {
    let mut state = FinancingState::from_inputs(inputs);
    let shares = costs.recurring_shares(periods.len());
    let commission_base = state.envelopes().primary_credit + state.envelopes().secondary_credit;

    let mut pending = Dues::default();
    let mut details: Vec<PeriodDetail> = Vec::with_capacity(periods.len());
    let mut total_interest_primary = Decimal::ZERO;
    let mut total_interest_secondary = Decimal::ZERO;
    let mut total_commission = Decimal::ZERO;
    let mut total_unfunded = Decimal::ZERO;

    for (i, period) in periods.iter().enumerate() {
        // 1. Previous period's dues
        let (dues_paid, dues_alloc) = if i > 0 {
            (pending, pending.pay(&mut state))
        } else {
            (Dues::default(), Allocation::default())
        };

        // 2. This period's own cost
        let mut period_cost = shares.total();
        if i == 0 {
            period_cost += costs.acquisition.total + inputs.file_fee;
        }
        let cost_alloc = state.allocate(period_cost);

        // 3. Accrue on post-draw balances, payable next period
        let outstanding = *state.outstanding();
        pending = Dues {
            interest_primary: accrue(
                outstanding.primary_credit,
                inputs.interest_rate_percent,
                period.days,
                config.day_count_basis,
            ),
            interest_secondary: accrue(
                outstanding.secondary_credit,
                inputs.interest_rate_percent,
                period.days,
                config.day_count_basis,
            ),
            commission: accrue(
                commission_base,
                inputs.commission_rate_percent,
                period.days,
                config.day_count_basis,
            ),
        };

        let unfunded = dues_alloc.unfunded + cost_alloc.unfunded;
        if unfunded > Decimal::ZERO {
            tracing::warn!(
                period = %period.label,
                unfunded = %unfunded,
                "financing sources exhausted; amount left unfunded"
            );
        }
        tracing::debug!(
            period = %period.label,
            days = period.days,
            cost = %period_cost,
            dues = %dues_paid.total(),
            drawn_primary = %(cost_alloc.draws.primary_credit + dues_alloc.draws.primary_credit),
            drawn_equity = %(cost_alloc.draws.equity + dues_alloc.draws.equity),
            drawn_secondary = %(cost_alloc.draws.secondary_credit + dues_alloc.draws.secondary_credit),
            accrued = %pending.total(),
            "simulated period"
        );

        total_interest_primary += dues_paid.interest_primary;
        total_interest_secondary += dues_paid.interest_secondary;
        total_commission += dues_paid.commission;
        total_unfunded += unfunded;

        details.push(PeriodDetail {
            index: period.index,
            label: period.label.clone(),
            start_date: period.start_date,
            end_date: period.end_date,
            days: period.days,
            period_cost,
            cost_draws: cost_alloc.draws,
            dues_draws: dues_alloc.draws,
            total_draws: cost_alloc.draws + dues_alloc.draws,
            interest_primary_paid: dues_paid.interest_primary,
            interest_secondary_paid: dues_paid.interest_secondary,
            commission_paid: dues_paid.commission,
            financing_cost: dues_paid.total(),
            unfunded,
            outstanding,
        });
    }

    // Final settlement of the last period's accrual
    if let Some(last) = details.last_mut() {
        let settled = pending.pay(&mut state);
        if settled.unfunded > Decimal::ZERO {
            tracing::warn!(
                period = %last.label,
                unfunded = %settled.unfunded,
                "final settlement left unfunded"
            );
        }
        last.dues_draws += settled.draws;
        last.total_draws += settled.draws;
        last.interest_primary_paid += pending.interest_primary;
        last.interest_secondary_paid += pending.interest_secondary;
        last.commission_paid += pending.commission;
        last.financing_cost += pending.total();
        last.unfunded += settled.unfunded;
        last.outstanding = *state.outstanding();

        total_interest_primary += pending.interest_primary;
        total_interest_secondary += pending.interest_secondary;
        total_commission += pending.commission;
        total_unfunded += settled.unfunded;
    }

    SimulationOutcome {
        periods: details,
        drawn: *state.drawn(),
        total_interest_primary,
        total_interest_secondary,
        total_commission,
        total_unfunded,
    }
}
