use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::allocator::SourceAmounts;
use super::config::PlanConfig;
use super::costs::CostBreakdown;
use super::inputs::{ProjectInputs, Surfaces};
use super::simulation::{PeriodDetail, SimulationOutcome};
use crate::time_value::{bisection_irr, pmt};
use crate::types::{percent_of, safe_div, Money, Percent};

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// Full business plan of a buy-renovate-resell project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusinessPlanResult {
    pub sale_date: NaiveDate,
    pub surfaces: Surfaces,
    pub costs: CostBreakdown,
    pub fees: FeeSummary,
    pub financing: FinancingSummary,
    /// Acquisition + works + misc + financing
    pub cost_basis: Money,
    pub sale: SaleSummary,
    pub profitability: Profitability,
    pub price_per_m2: PricePerM2,
    pub cost_shares: CostShares,
    /// Category rows in display order
    pub cost_synthesis: Vec<CostSynthesisRow>,
    pub negotiation: Negotiation,
    pub periods: Vec<PeriodDetail>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeeSummary {
    pub notary: Money,
    pub purchase_agency: Money,
    /// Buyer-side agency commission included in the advertised sale price
    pub sale_agency: Money,
    pub file: Money,
    pub total: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancingSummary {
    /// Envelope sizes as granted
    pub envelopes: SourceAmounts,
    pub total_envelope: Money,
    /// Amounts actually drawn over the project
    pub drawn: SourceAmounts,
    pub total_drawn: Money,
    /// Share of total drawn per source (0-100)
    pub drawn_shares_pct: SourceAmounts,
    pub interest_primary: Money,
    pub interest_secondary: Money,
    pub total_interest: Money,
    pub commission: Money,
    pub file_fee: Money,
    /// Interest + commission + file fee
    pub total_financing_cost: Money,
    pub monthly_installments: MonthlyInstallments,
    /// Amounts requested from the sources that none could cover
    pub unfunded: Money,
    /// Whether the three envelopes together cover the cost basis
    pub financing_sufficient: bool,
}

/// Indicative constant monthly payment on each credit line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyInstallments {
    pub months: u32,
    pub primary_credit: Money,
    pub secondary_credit: Money,
    pub combined: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleSummary {
    pub price_per_weighted_m2: Money,
    /// Advertised price, buyer agency fee included (FAI)
    pub price_incl_agency: Money,
    /// Price net of buyer agency fee (HFA)
    pub price_net_of_agency: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profitability {
    /// Price incl. agency - cost basis
    pub gross_margin: Money,
    /// Price net of agency - cost basis
    pub net_margin: Money,
    /// Net margin / cost basis, in percent
    pub profitability_pct: Percent,
    /// Net margin spread over the days of the holding period
    pub monthly_cash_flow: Money,
    /// Internal rate of return in percent; `None` when no root lies in the
    /// solver bracket
    pub irr_pct: Option<Percent>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePerM2 {
    pub purchase_carrez: Money,
    pub purchase_weighted: Money,
    pub cost_basis_carrez: Money,
    pub cost_basis_weighted: Money,
    pub sale_carrez: Money,
    pub sale_weighted: Money,
}

/// Share of each category in the cost basis (0-100).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostShares {
    pub acquisition_pct: Percent,
    pub works_pct: Percent,
    pub misc_pct: Percent,
    pub financing_pct: Percent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostSynthesisRow {
    pub category: String,
    pub amount: Money,
    pub share_pct: Percent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Negotiation {
    pub listed_price: Money,
    pub purchase_price: Money,
    /// Listed - purchase; zero when no listed price is known
    pub discount: Money,
    pub discount_pct: Percent,
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

/// Fold the simulation outcome and cost breakdown into the final result.
pub fn aggregate(
    inputs: &ProjectInputs,
    costs: CostBreakdown,
    sale_date: NaiveDate,
    outcome: SimulationOutcome,
    config: &PlanConfig,
    warnings: &mut Vec<String>,
) -> BusinessPlanResult {
    let surfaces = inputs.surfaces();

    // --- Financing ---
    let total_financing_cost =
        outcome.total_interest() + outcome.total_commission + inputs.file_fee;
    let cost_basis = costs.total_before_financing() + total_financing_cost;

    let envelopes = SourceAmounts {
        primary_credit: inputs.primary_credit_amount,
        equity: inputs.equity_amount,
        secondary_credit: inputs.secondary_credit_amount,
    };
    let total_drawn = outcome.drawn.total();
    let drawn_shares_pct = SourceAmounts {
        primary_credit: percent_of(outcome.drawn.primary_credit, total_drawn),
        equity: percent_of(outcome.drawn.equity, total_drawn),
        secondary_credit: percent_of(outcome.drawn.secondary_credit, total_drawn),
    };
    let financing_sufficient = envelopes.total() >= cost_basis;

    if outcome.total_unfunded > Decimal::ZERO {
        warnings.push(format!(
            "{} could not be funded by the three financing sources",
            outcome.total_unfunded.round_dp(2)
        ));
    }
    if !financing_sufficient {
        warnings.push(format!(
            "Financing envelope {} is below the cost basis {}",
            envelopes.total().round_dp(2),
            cost_basis.round_dp(2)
        ));
    }

    let financing = FinancingSummary {
        envelopes,
        total_envelope: envelopes.total(),
        drawn: outcome.drawn,
        total_drawn,
        drawn_shares_pct,
        interest_primary: outcome.total_interest_primary,
        interest_secondary: outcome.total_interest_secondary,
        total_interest: outcome.total_interest(),
        commission: outcome.total_commission,
        file_fee: inputs.file_fee,
        total_financing_cost,
        monthly_installments: monthly_installments(inputs),
        unfunded: outcome.total_unfunded,
        financing_sufficient,
    };

    // --- Sale ---
    let price_per_weighted_m2 = inputs.resolved_sale_price_per_m2();
    let price_incl_agency = surfaces.weighted_after_works * price_per_weighted_m2;
    let price_net_of_agency = safe_div(
        price_incl_agency,
        Decimal::ONE + inputs.sale_agency_fee_percent / Decimal::ONE_HUNDRED,
    );
    if price_incl_agency.is_zero() {
        warnings.push(
            "Sale price is zero: provide sale_price_per_weighted_m2 or market_price_per_m2".into(),
        );
    }

    let fees = FeeSummary {
        notary: costs.acquisition.notary_fee,
        purchase_agency: costs.acquisition.agency_fee,
        sale_agency: price_incl_agency - price_net_of_agency,
        file: inputs.file_fee,
        total: costs.acquisition.notary_fee
            + costs.acquisition.agency_fee
            + (price_incl_agency - price_net_of_agency)
            + inputs.file_fee,
    };

    // --- Margins and returns ---
    let gross_margin = price_incl_agency - cost_basis;
    let net_margin = price_net_of_agency - cost_basis;
    let holding_days = Decimal::from(inputs.holding_period_days);
    let monthly_cash_flow = safe_div(net_margin, holding_days);

    let mut cash_flows = Vec::with_capacity(inputs.holding_period_days as usize + 2);
    cash_flows.push(-cost_basis);
    cash_flows.extend(std::iter::repeat(monthly_cash_flow).take(inputs.holding_period_days as usize));
    cash_flows.push(net_margin);
    let irr_pct = match bisection_irr(&cash_flows, &config.irr) {
        Ok(rate) => Some((rate * dec!(100)).round_dp(6)),
        Err(e) => {
            warnings.push(format!("IRR not computed: {e}"));
            None
        }
    };

    let profitability = Profitability {
        gross_margin,
        net_margin,
        profitability_pct: percent_of(net_margin, cost_basis),
        monthly_cash_flow,
        irr_pct,
    };

    let price_per_m2 = PricePerM2 {
        purchase_carrez: safe_div(inputs.purchase_price, surfaces.carrez_before_works),
        purchase_weighted: safe_div(inputs.purchase_price, surfaces.weighted_before_works),
        cost_basis_carrez: safe_div(cost_basis, surfaces.carrez_after_works),
        cost_basis_weighted: safe_div(cost_basis, surfaces.weighted_after_works),
        sale_carrez: safe_div(price_incl_agency, surfaces.carrez_after_works),
        sale_weighted: safe_div(price_incl_agency, surfaces.weighted_after_works),
    };

    let cost_shares = CostShares {
        acquisition_pct: percent_of(costs.acquisition.total, cost_basis),
        works_pct: percent_of(costs.works.total, cost_basis),
        misc_pct: percent_of(costs.misc.total, cost_basis),
        financing_pct: percent_of(total_financing_cost, cost_basis),
    };

    let cost_synthesis = [
        ("Acquisition", costs.acquisition.total),
        ("Works", costs.works.total),
        ("Miscellaneous", costs.misc.total),
        ("Financing", total_financing_cost),
    ]
    .into_iter()
    .map(|(category, amount)| CostSynthesisRow {
        category: category.to_string(),
        amount,
        share_pct: percent_of(amount, cost_basis),
    })
    .collect();

    let discount = if inputs.listed_price > Decimal::ZERO {
        inputs.listed_price - inputs.purchase_price
    } else {
        Decimal::ZERO
    };
    let negotiation = Negotiation {
        listed_price: inputs.listed_price,
        purchase_price: inputs.purchase_price,
        discount,
        discount_pct: percent_of(discount, inputs.listed_price),
    };

    BusinessPlanResult {
        sale_date,
        surfaces,
        costs,
        fees,
        financing,
        cost_basis,
        sale: SaleSummary {
            price_per_weighted_m2,
            price_incl_agency,
            price_net_of_agency,
        },
        profitability,
        price_per_m2,
        cost_shares,
        cost_synthesis,
        negotiation,
        periods: outcome.periods,
    }
}

/// Annuity payment on each credit line over the holding period rounded up to
/// whole months.
fn monthly_installments(inputs: &ProjectInputs) -> MonthlyInstallments {
    let months = (inputs.holding_period_days * 12).div_ceil(365).max(1);
    let monthly_rate = inputs.interest_rate_percent / Decimal::ONE_HUNDRED / dec!(12);
    let payment = |principal: Money| -> Money {
        if principal.is_zero() || monthly_rate.is_zero() {
            return Decimal::ZERO;
        }
        pmt(monthly_rate, months, principal, Decimal::ZERO)
            .map(|p| -p)
            .unwrap_or(Decimal::ZERO)
    };
    MonthlyInstallments {
        months,
        primary_credit: payment(inputs.primary_credit_amount),
        secondary_credit: payment(inputs.secondary_credit_amount),
        combined: payment(inputs.primary_credit_amount + inputs.secondary_credit_amount),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::business_plan::test_support::inputs_with;
    use serde_json::json;

    #[test]
    fn test_monthly_installments() {
        let inputs = inputs_with(json!({
            "interest_rate_percent": 12,
            "primary_credit_amount": 100000,
        }));
        let m = monthly_installments(&inputs);
        assert_eq!(m.months, 12);
        assert!((m.primary_credit - dec!(8884.88)).abs() < dec!(0.01));
        assert_eq!(m.secondary_credit, Decimal::ZERO);
        assert_eq!(m.combined, m.primary_credit);
    }

    #[test]
    fn test_installments_without_rate_are_zero() {
        let inputs = inputs_with(json!({"primary_credit_amount": 100000}));
        let m = monthly_installments(&inputs);
        assert_eq!(m.primary_credit, Decimal::ZERO);
    }

    #[test]
    fn test_short_holding_rounds_up_to_one_month() {
        let inputs = inputs_with(json!({"holding_period_days": 10}));
        assert_eq!(monthly_installments(&inputs).months, 1);
    }
}
