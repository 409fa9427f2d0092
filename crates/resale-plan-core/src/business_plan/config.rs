use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::time_value::IrrConfig;

/// Weight given to terrace surface when computing the weighted surface.
pub const DEFAULT_TERRACE_WEIGHTING: Decimal = dec!(0.3);

/// Holding period used when the project record carries none.
pub const DEFAULT_HOLDING_PERIOD_DAYS: u32 = 365;

/// Neutral property pricing coefficient.
pub const DEFAULT_PRICING_COEFFICIENT: Decimal = Decimal::ONE;

/// Engine settings that are not part of a project record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanConfig {
    /// Days per year used to prorate annual interest and commission
    pub day_count_basis: Decimal,
    /// Bracket and tolerance for the IRR solver
    pub irr: IrrConfig,
}

impl Default for PlanConfig {
    fn default() -> Self {
        Self {
            day_count_basis: dec!(365),
            irr: IrrConfig::default(),
        }
    }
}
