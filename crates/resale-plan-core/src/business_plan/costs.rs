use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::inputs::ProjectInputs;
use crate::types::Money;

/// Purchase price and purchase-side fees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AcquisitionCosts {
    pub purchase_price: Money,
    pub notary_fee: Money,
    pub agency_fee: Money,
    pub total: Money,
}

/// Renovation budget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorksCosts {
    /// Habitable surface after works x cost per m²
    pub base_works: Money,
    /// Percentage of the base works only
    pub project_management: Money,
    /// Percentage of the base works only
    pub contingency: Money,
    pub terrace_fit_out: Money,
    pub furniture: Money,
    pub demolition: Money,
    pub total: Money,
}

/// Soft costs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MiscCosts {
    pub technical_fees: Money,
    pub land_prorata_fee: Money,
    pub diagnostics: Money,
    pub total: Money,
}

/// Category totals, before any financing cost.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub acquisition: AcquisitionCosts,
    pub works: WorksCosts,
    pub misc: MiscCosts,
}

/// Costs spread evenly over every period of the schedule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RecurringShares {
    pub works: Money,
    pub technical_fees: Money,
    pub land_prorata_fee: Money,
    pub diagnostics: Money,
}

impl RecurringShares {
    pub fn total(&self) -> Money {
        self.works + self.technical_fees + self.land_prorata_fee + self.diagnostics
    }
}

impl CostBreakdown {
    /// Acquisition + works + misc.
    pub fn total_before_financing(&self) -> Money {
        self.acquisition.total + self.works.total + self.misc.total
    }

    /// Equal split of works and soft costs across `period_count` periods.
    pub fn recurring_shares(&self, period_count: usize) -> RecurringShares {
        if period_count == 0 {
            return RecurringShares::default();
        }
        let n = Decimal::from(period_count);
        RecurringShares {
            works: self.works.total / n,
            technical_fees: self.misc.technical_fees / n,
            land_prorata_fee: self.misc.land_prorata_fee / n,
            diagnostics: self.misc.diagnostics / n,
        }
    }
}

pub fn compute_costs(inputs: &ProjectInputs) -> CostBreakdown {
    let notary_fee = inputs.notary_fee();
    let agency_fee = inputs.agency_fee();
    let acquisition = AcquisitionCosts {
        purchase_price: inputs.purchase_price,
        notary_fee,
        agency_fee,
        total: inputs.purchase_price + notary_fee + agency_fee,
    };

    let base_works = inputs.surfaces().carrez_after_works * inputs.works_cost_per_m2;
    let project_management = base_works * inputs.project_management_percent / Decimal::ONE_HUNDRED;
    let contingency = base_works * inputs.contingency_percent / Decimal::ONE_HUNDRED;
    let works = WorksCosts {
        base_works,
        project_management,
        contingency,
        terrace_fit_out: inputs.terrace_fit_out,
        furniture: inputs.furniture,
        demolition: inputs.demolition,
        total: base_works
            + project_management
            + contingency
            + inputs.terrace_fit_out
            + inputs.furniture
            + inputs.demolition,
    };

    let misc = MiscCosts {
        technical_fees: inputs.technical_fees,
        land_prorata_fee: inputs.land_prorata_fee,
        diagnostics: inputs.diagnostics,
        total: inputs.technical_fees + inputs.land_prorata_fee + inputs.diagnostics,
    };

    CostBreakdown {
        acquisition,
        works,
        misc,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::business_plan::test_support::inputs_with as inputs;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_surcharges_apply_to_base_works_only() {
        let costs = compute_costs(&inputs(json!({
            "works_cost_per_m2": 1000,
            "project_management_percent": 10,
            "contingency_percent": 5,
            "terrace_fit_out": 4000,
            "furniture": 3000,
            "demolition": 2000,
        })));
        assert_eq!(costs.works.base_works, dec!(50000));
        assert_eq!(costs.works.project_management, dec!(5000));
        assert_eq!(costs.works.contingency, dec!(2500));
        assert_eq!(costs.works.total, dec!(66500));
    }

    #[test]
    fn test_acquisition_and_misc_totals() {
        let costs = compute_costs(&inputs(json!({
            "notary_fee_percent": 8,
            "agency_fee_amount": 6000,
            "technical_fees": 1500,
            "land_prorata_fee": 4500,
            "diagnostics": 800,
        })));
        assert_eq!(costs.acquisition.notary_fee, dec!(16000));
        assert_eq!(costs.acquisition.agency_fee, dec!(6000));
        assert_eq!(costs.acquisition.total, dec!(222000));
        assert_eq!(costs.misc.total, dec!(6800));
        assert_eq!(costs.total_before_financing(), dec!(228800));
    }

    #[test]
    fn test_works_use_surface_after_works() {
        let costs = compute_costs(&inputs(json!({
            "works_cost_per_m2": 1000,
            "habitable_surface_after_works": 55,
        })));
        assert_eq!(costs.works.base_works, dec!(55000));
    }

    #[test]
    fn test_recurring_shares_equal_split() {
        let costs = compute_costs(&inputs(json!({
            "works_cost_per_m2": 1000,
            "technical_fees": 1000,
            "diagnostics": 400,
        })));
        let shares = costs.recurring_shares(4);
        assert_eq!(shares.works, dec!(12500));
        assert_eq!(shares.technical_fees, dec!(250));
        assert_eq!(shares.diagnostics, dec!(100));
        assert_eq!(shares.total(), dec!(12850));
        assert_eq!(costs.recurring_shares(0), RecurringShares::default());
    }
}
