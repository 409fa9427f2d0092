use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use serde::{Deserialize, Serialize};

use crate::error::ResalePlanError;
use crate::types::{Money, Rate};
use crate::ResalePlanResult;

/// Bracket and stopping rule for the bisection IRR solver.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IrrConfig {
    /// Lowest periodic rate searched (must stay above -100%)
    pub lower_bound: f64,
    /// Highest periodic rate searched
    pub upper_bound: f64,
    /// Stop once the bracket is narrower than this
    pub tolerance: f64,
    /// Hard cap on halvings
    pub max_iterations: u32,
}

impl Default for IrrConfig {
    fn default() -> Self {
        Self {
            lower_bound: -0.99,
            upper_bound: 1.0,
            tolerance: 1e-6,
            max_iterations: 200,
        }
    }
}

/// Net present value in f64, index `t` discounted by `(1 + rate)^t`.
///
/// Zero flows are skipped so that an underflowed discount factor never
/// produces `0 / 0`.
pub fn npv_f64(rate: f64, cash_flows: &[f64]) -> f64 {
    let one_plus_r = 1.0 + rate;
    cash_flows
        .iter()
        .enumerate()
        .filter(|(_, cf)| **cf != 0.0)
        .map(|(t, cf)| cf / one_plus_r.powi(t as i32))
        .sum()
}

/// Internal Rate of Return by bisection over `[lower_bound, upper_bound]`.
///
/// The bracket is checked before searching: when the NPV has the same sign at
/// both ends (or is not a number) no root is reported and a
/// `ConvergenceFailure` is returned instead of a boundary value.
pub fn bisection_irr(cash_flows: &[Money], config: &IrrConfig) -> ResalePlanResult<Rate> {
    if cash_flows.len() < 2 {
        return Err(ResalePlanError::InvalidInput {
            field: "cash_flows".into(),
            reason: "IRR requires at least 2 cash flows".into(),
        });
    }
    if config.lower_bound <= -1.0 || config.lower_bound >= config.upper_bound {
        return Err(ResalePlanError::InvalidInput {
            field: "irr.lower_bound".into(),
            reason: "Bracket must satisfy -1 < lower_bound < upper_bound".into(),
        });
    }

    let flows: Vec<f64> = cash_flows
        .iter()
        .map(|cf| cf.to_f64().unwrap_or(0.0))
        .collect();

    let mut lo = config.lower_bound;
    let mut hi = config.upper_bound;
    let f_lo = npv_f64(lo, &flows);
    let f_hi = npv_f64(hi, &flows);

    // NaN fails this comparison too
    if !(f_lo * f_hi <= 0.0) {
        return Err(ResalePlanError::ConvergenceFailure {
            function: "IRR".into(),
            iterations: 0,
            last_delta: Decimal::from_f64(f_lo.abs().min(f_hi.abs())).unwrap_or(Decimal::MAX),
        });
    }
    if f_lo == 0.0 {
        return Ok(to_rate(lo));
    }
    if f_hi == 0.0 {
        return Ok(to_rate(hi));
    }

    let lo_positive = f_lo > 0.0;
    let mut iterations = 0;
    while hi - lo > config.tolerance {
        if iterations == config.max_iterations {
            let mid = (lo + hi) / 2.0;
            return Err(ResalePlanError::ConvergenceFailure {
                function: "IRR".into(),
                iterations,
                last_delta: Decimal::from_f64(npv_f64(mid, &flows).abs())
                    .unwrap_or(Decimal::MAX),
            });
        }
        let mid = (lo + hi) / 2.0;
        if (npv_f64(mid, &flows) > 0.0) == lo_positive {
            lo = mid;
        } else {
            hi = mid;
        }
        iterations += 1;
    }

    Ok(to_rate((lo + hi) / 2.0))
}

fn to_rate(value: f64) -> Rate {
    Decimal::from_f64(value).unwrap_or(Decimal::ZERO).round_dp(10)
}

/// Payment (PMT)
pub fn pmt(rate: Rate, nper: u32, present_value: Money, future_value: Money) -> ResalePlanResult<Money> {
    if nper == 0 {
        return Err(ResalePlanError::InvalidInput {
            field: "nper".into(),
            reason: "Number of periods must be > 0".into(),
        });
    }

    if rate.is_zero() {
        return Ok(-(present_value + future_value) / Decimal::from(nper));
    }

    let overflow = || ResalePlanError::InvalidInput {
        field: "rate".into(),
        reason: format!("PMT compounding over {nper} periods overflows"),
    };
    let one_plus_r = Decimal::ONE + rate;
    let factor = one_plus_r
        .checked_powi(i64::from(nper))
        .ok_or_else(overflow)?;
    let annuity_factor = (factor - Decimal::ONE) / rate;

    if annuity_factor.is_zero() {
        return Err(ResalePlanError::InvalidInput {
            field: "rate".into(),
            reason: "PMT annuity factor is zero".into(),
        });
    }

    let future = present_value
        .checked_mul(factor)
        .and_then(|v| v.checked_add(future_value))
        .ok_or_else(overflow)?;
    Ok(-future / annuity_factor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_irr_two_flows_ten_percent() {
        let result = bisection_irr(&[dec!(-100), dec!(110)], &IrrConfig::default()).unwrap();
        // 100 * (1 + r) = 110
        assert!((result - dec!(0.10)).abs() < dec!(0.00001), "got {result}");
    }

    #[test]
    fn test_irr_even_cashflows() {
        let cfs = vec![dec!(-1000), dec!(400), dec!(400), dec!(400)];
        let result = bisection_irr(&cfs, &IrrConfig::default()).unwrap();
        // IRR should be ~9.7%
        assert!((result - dec!(0.097)).abs() < dec!(0.01));
    }

    #[test]
    fn test_irr_root_above_bracket_is_reported() {
        // 100 * (1 + r) = 300 => r = 200%, outside [-0.99, 1.0]
        let err = bisection_irr(&[dec!(-100), dec!(300)], &IrrConfig::default()).unwrap_err();
        assert!(matches!(err, ResalePlanError::ConvergenceFailure { iterations: 0, .. }));
    }

    #[test]
    fn test_irr_no_sign_change_is_reported() {
        let err = bisection_irr(&[dec!(-100), dec!(-10)], &IrrConfig::default()).unwrap_err();
        assert!(matches!(err, ResalePlanError::ConvergenceFailure { .. }));
    }

    #[test]
    fn test_irr_wider_bracket_finds_root() {
        let config = IrrConfig {
            upper_bound: 5.0,
            ..IrrConfig::default()
        };
        let result = bisection_irr(&[dec!(-100), dec!(300)], &config).unwrap();
        assert!((result - dec!(2.0)).abs() < dec!(0.00001));
    }

    #[test]
    fn test_irr_requires_two_flows() {
        assert!(bisection_irr(&[dec!(-100)], &IrrConfig::default()).is_err());
    }

    #[test]
    fn test_npv_skips_zero_flows_at_extreme_rates() {
        // 0.01^400 underflows to zero; the zero flows must not turn into NaN
        let mut flows = vec![-100.0];
        flows.extend(std::iter::repeat(0.0).take(400));
        let value = npv_f64(-0.99, &flows);
        assert_eq!(value, -100.0);
    }

    #[test]
    fn test_pmt_basic() {
        // 100_000 over 12 months at 1% per month => ~8_884.88
        let result = pmt(dec!(0.01), 12, dec!(100000), Decimal::ZERO).unwrap();
        assert!((result + dec!(8884.88)).abs() < dec!(0.01), "got {result}");
    }

    #[test]
    fn test_pmt_zero_rate() {
        let result = pmt(Decimal::ZERO, 10, dec!(1000), Decimal::ZERO).unwrap();
        assert_eq!(result, dec!(-100));
    }

    #[test]
    fn test_pmt_overflow_is_error() {
        // (1 + 0.8333)^1200 is far beyond the Decimal range
        let err = pmt(dec!(0.8333), 1200, dec!(1000000), Decimal::ZERO).unwrap_err();
        assert!(matches!(err, ResalePlanError::InvalidInput { .. }));
    }
}
