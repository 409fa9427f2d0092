use chrono::{DateTime, Days, NaiveDate};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::config::{
    DEFAULT_HOLDING_PERIOD_DAYS, DEFAULT_PRICING_COEFFICIENT, DEFAULT_TERRACE_WEIGHTING,
};
use super::normalize::{clean_numeric, clean_optional};
use crate::error::ResalePlanError;
use crate::types::{Money, Percent, SquareMetres};
use crate::ResalePlanResult;

/// Longest holding period accepted (100 years).
pub const MAX_HOLDING_PERIOD_DAYS: u32 = 36_500;

/// Largest surface accepted, in m².
const MAX_SURFACE_M2: Decimal = dec!(1000000);

/// Largest amount accepted for any price, fee, cost or envelope.
const MAX_AMOUNT: Decimal = dec!(1000000000000000);

/// Largest percentage accepted (0-100 scale).
const MAX_PERCENT: Decimal = dec!(1000);

/// Largest terrace weighting or pricing coefficient accepted.
const MAX_FACTOR: Decimal = dec!(100);

// ---------------------------------------------------------------------------
// Raw boundary record
// ---------------------------------------------------------------------------

/// A project record as received from a form or a stored JSON document.
///
/// Numeric fields may be numbers, strings such as `"250 000 €"`, `null`, or
/// absent. Use [`ProjectInputs::from_raw`] to obtain a validated record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawProjectInputs {
    pub habitable_surface: Option<Value>,
    pub terrace_surface: Option<Value>,
    pub terrace_weighting: Option<Value>,
    pub habitable_surface_after_works: Option<Value>,
    pub terrace_surface_after_works: Option<Value>,
    pub weighted_surface_after_works: Option<Value>,

    pub purchase_price: Option<Value>,
    pub listed_price: Option<Value>,
    pub notary_fee_percent: Option<Value>,
    pub notary_fee_amount: Option<Value>,
    pub agency_fee_percent: Option<Value>,
    pub agency_fee_amount: Option<Value>,
    pub sale_agency_fee_percent: Option<Value>,
    pub file_fee: Option<Value>,

    pub works_cost_per_m2: Option<Value>,
    pub project_management_percent: Option<Value>,
    pub contingency_percent: Option<Value>,
    pub terrace_fit_out: Option<Value>,
    pub furniture: Option<Value>,
    pub demolition: Option<Value>,

    pub technical_fees: Option<Value>,
    pub land_prorata_fee: Option<Value>,
    pub diagnostics: Option<Value>,

    pub primary_credit_amount: Option<Value>,
    pub equity_amount: Option<Value>,
    pub secondary_credit_amount: Option<Value>,
    pub interest_rate_percent: Option<Value>,
    pub commission_rate_percent: Option<Value>,

    pub purchase_date: Option<Value>,
    pub holding_period_days: Option<Value>,

    pub sale_price_per_weighted_m2: Option<Value>,
    pub market_price_per_m2: Option<Value>,
    pub pricing_coefficient: Option<Value>,
}

// ---------------------------------------------------------------------------
// Validated record
// ---------------------------------------------------------------------------

/// Fully resolved and validated project inputs. Percentages are on a 0-100
/// scale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectInputs {
    /// Carrez (habitable) surface before works
    pub habitable_surface: SquareMetres,
    /// Terrace / balcony surface before works
    pub terrace_surface: SquareMetres,
    /// Weight of terrace surface in the weighted surface
    pub terrace_weighting: Decimal,
    /// Carrez surface after works (defaults to the surface before works)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub habitable_surface_after_works: Option<SquareMetres>,
    /// Terrace surface after works (defaults to the surface before works)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub terrace_surface_after_works: Option<SquareMetres>,
    /// Weighted surface after works (defaults to carrez + terrace x weighting)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weighted_surface_after_works: Option<SquareMetres>,

    pub purchase_price: Money,
    /// Asking price before negotiation
    pub listed_price: Money,
    pub notary_fee_percent: Percent,
    /// Flat notary fee, takes precedence over the percentage
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notary_fee_amount: Option<Money>,
    pub agency_fee_percent: Percent,
    /// Flat purchase agency fee, takes precedence over the percentage
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agency_fee_amount: Option<Money>,
    /// Buyer-side agency commission on the resale, as % of the net price
    pub sale_agency_fee_percent: Percent,
    /// Lender file fee, paid with the acquisition
    pub file_fee: Money,

    pub works_cost_per_m2: Money,
    pub project_management_percent: Percent,
    pub contingency_percent: Percent,
    pub terrace_fit_out: Money,
    pub furniture: Money,
    pub demolition: Money,

    pub technical_fees: Money,
    pub land_prorata_fee: Money,
    pub diagnostics: Money,

    /// Source A envelope
    pub primary_credit_amount: Money,
    /// Source B envelope
    pub equity_amount: Money,
    /// Source C envelope
    pub secondary_credit_amount: Money,
    /// Annual interest rate applied to both credit sources
    pub interest_rate_percent: Percent,
    /// Annual commission rate on the combined credit envelopes
    pub commission_rate_percent: Percent,

    pub purchase_date: NaiveDate,
    pub holding_period_days: u32,

    /// Explicit resale price per weighted m²
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sale_price_per_weighted_m2: Option<Money>,
    /// Benchmark price per m² from comparable sales
    #[serde(skip_serializing_if = "Option::is_none")]
    pub market_price_per_m2: Option<Money>,
    /// Property adjustment applied to the benchmark price
    pub pricing_coefficient: Decimal,
}

/// Surfaces used by the per-m² metrics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Surfaces {
    pub carrez_before_works: SquareMetres,
    pub weighted_before_works: SquareMetres,
    pub carrez_after_works: SquareMetres,
    pub terrace_after_works: SquareMetres,
    pub weighted_after_works: SquareMetres,
}

impl ProjectInputs {
    /// Normalize every numeric field, apply defaults, parse the purchase date
    /// and validate the result.
    pub fn from_raw(raw: &RawProjectInputs) -> ResalePlanResult<Self> {
        let num = |v: &Option<Value>| clean_numeric(v.as_ref(), Decimal::ZERO);
        let opt = |v: &Option<Value>| clean_optional(v.as_ref());

        let habitable_surface = required_positive("habitable_surface", &raw.habitable_surface)?;
        let purchase_price = required_positive("purchase_price", &raw.purchase_price)?;
        let holding_period_days = parse_holding_period(&raw.holding_period_days)?;
        let purchase_date = parse_purchase_date(&raw.purchase_date)?;

        let inputs = ProjectInputs {
            habitable_surface,
            terrace_surface: num(&raw.terrace_surface),
            terrace_weighting: clean_numeric(
                raw.terrace_weighting.as_ref(),
                DEFAULT_TERRACE_WEIGHTING,
            ),
            habitable_surface_after_works: opt(&raw.habitable_surface_after_works),
            terrace_surface_after_works: opt(&raw.terrace_surface_after_works),
            weighted_surface_after_works: opt(&raw.weighted_surface_after_works),
            purchase_price,
            listed_price: num(&raw.listed_price),
            notary_fee_percent: num(&raw.notary_fee_percent),
            notary_fee_amount: opt(&raw.notary_fee_amount),
            agency_fee_percent: num(&raw.agency_fee_percent),
            agency_fee_amount: opt(&raw.agency_fee_amount),
            sale_agency_fee_percent: num(&raw.sale_agency_fee_percent),
            file_fee: num(&raw.file_fee),
            works_cost_per_m2: num(&raw.works_cost_per_m2),
            project_management_percent: num(&raw.project_management_percent),
            contingency_percent: num(&raw.contingency_percent),
            terrace_fit_out: num(&raw.terrace_fit_out),
            furniture: num(&raw.furniture),
            demolition: num(&raw.demolition),
            technical_fees: num(&raw.technical_fees),
            land_prorata_fee: num(&raw.land_prorata_fee),
            diagnostics: num(&raw.diagnostics),
            primary_credit_amount: num(&raw.primary_credit_amount),
            equity_amount: num(&raw.equity_amount),
            secondary_credit_amount: num(&raw.secondary_credit_amount),
            interest_rate_percent: num(&raw.interest_rate_percent),
            commission_rate_percent: num(&raw.commission_rate_percent),
            purchase_date,
            holding_period_days,
            sale_price_per_weighted_m2: opt(&raw.sale_price_per_weighted_m2),
            market_price_per_m2: opt(&raw.market_price_per_m2),
            pricing_coefficient: clean_numeric(
                raw.pricing_coefficient.as_ref(),
                DEFAULT_PRICING_COEFFICIENT,
            ),
        };
        inputs.validate()?;
        Ok(inputs)
    }

    /// Check the invariants of an already-typed record.
    ///
    /// Every figure is bounded so that no product or sum computed by the
    /// engine can leave the `Decimal` range.
    pub fn validate(&self) -> ResalePlanResult<()> {
        if self.habitable_surface <= Decimal::ZERO {
            return Err(invalid("habitable_surface", "Habitable surface must be positive"));
        }
        if self.purchase_price <= Decimal::ZERO {
            return Err(invalid("purchase_price", "Purchase price must be positive"));
        }
        check_holding_period(self.holding_period_days)?;

        let surfaces = [
            ("habitable_surface", Some(self.habitable_surface)),
            ("terrace_surface", Some(self.terrace_surface)),
            ("habitable_surface_after_works", self.habitable_surface_after_works),
            ("terrace_surface_after_works", self.terrace_surface_after_works),
            ("weighted_surface_after_works", self.weighted_surface_after_works),
        ];
        let amounts = [
            ("purchase_price", Some(self.purchase_price)),
            ("listed_price", Some(self.listed_price)),
            ("notary_fee_amount", self.notary_fee_amount),
            ("agency_fee_amount", self.agency_fee_amount),
            ("file_fee", Some(self.file_fee)),
            ("works_cost_per_m2", Some(self.works_cost_per_m2)),
            ("terrace_fit_out", Some(self.terrace_fit_out)),
            ("furniture", Some(self.furniture)),
            ("demolition", Some(self.demolition)),
            ("technical_fees", Some(self.technical_fees)),
            ("land_prorata_fee", Some(self.land_prorata_fee)),
            ("diagnostics", Some(self.diagnostics)),
            ("primary_credit_amount", Some(self.primary_credit_amount)),
            ("equity_amount", Some(self.equity_amount)),
            ("secondary_credit_amount", Some(self.secondary_credit_amount)),
            ("sale_price_per_weighted_m2", self.sale_price_per_weighted_m2),
            ("market_price_per_m2", self.market_price_per_m2),
        ];
        let percents = [
            ("notary_fee_percent", Some(self.notary_fee_percent)),
            ("agency_fee_percent", Some(self.agency_fee_percent)),
            ("sale_agency_fee_percent", Some(self.sale_agency_fee_percent)),
            ("project_management_percent", Some(self.project_management_percent)),
            ("contingency_percent", Some(self.contingency_percent)),
            ("interest_rate_percent", Some(self.interest_rate_percent)),
            ("commission_rate_percent", Some(self.commission_rate_percent)),
        ];
        let factors = [
            ("terrace_weighting", Some(self.terrace_weighting)),
            ("pricing_coefficient", Some(self.pricing_coefficient)),
        ];

        let bounded = surfaces
            .iter()
            .map(|(f, v)| (*f, *v, MAX_SURFACE_M2))
            .chain(amounts.iter().map(|(f, v)| (*f, *v, MAX_AMOUNT)))
            .chain(percents.iter().map(|(f, v)| (*f, *v, MAX_PERCENT)))
            .chain(factors.iter().map(|(f, v)| (*f, *v, MAX_FACTOR)));
        for (field, value, max) in bounded {
            let Some(value) = value else { continue };
            if value < Decimal::ZERO {
                return Err(invalid(field, "Value cannot be negative"));
            }
            if value > max {
                return Err(invalid(field, &format!("Value must not exceed {max}")));
            }
        }

        Ok(())
    }

    /// Purchase date plus the holding period, in calendar days.
    pub fn sale_date(&self) -> ResalePlanResult<NaiveDate> {
        sale_date_after(self.purchase_date, self.holding_period_days)
    }

    pub fn notary_fee(&self) -> Money {
        self.notary_fee_amount
            .unwrap_or(self.purchase_price * self.notary_fee_percent / Decimal::ONE_HUNDRED)
    }

    pub fn agency_fee(&self) -> Money {
        self.agency_fee_amount
            .unwrap_or(self.purchase_price * self.agency_fee_percent / Decimal::ONE_HUNDRED)
    }

    /// Resale price per weighted m²: the explicit figure when positive,
    /// otherwise the market benchmark adjusted by the pricing coefficient.
    pub fn resolved_sale_price_per_m2(&self) -> Money {
        match self.sale_price_per_weighted_m2 {
            Some(price) if price > Decimal::ZERO => price,
            _ => self.market_price_per_m2.unwrap_or(Decimal::ZERO) * self.pricing_coefficient,
        }
    }

    pub fn surfaces(&self) -> Surfaces {
        let weighted_before_works =
            self.habitable_surface + self.terrace_surface * self.terrace_weighting;
        let carrez_after_works = self
            .habitable_surface_after_works
            .unwrap_or(self.habitable_surface);
        let terrace_after_works = self
            .terrace_surface_after_works
            .unwrap_or(self.terrace_surface);
        let weighted_after_works = self.weighted_surface_after_works.unwrap_or(
            carrez_after_works + terrace_after_works * self.terrace_weighting,
        );
        Surfaces {
            carrez_before_works: self.habitable_surface,
            weighted_before_works,
            carrez_after_works,
            terrace_after_works,
            weighted_after_works,
        }
    }
}

/// Reject holding periods outside `1..=36500` days.
pub fn check_holding_period(days: u32) -> ResalePlanResult<u32> {
    if days == 0 {
        return Err(invalid("holding_period_days", "Holding period must be positive"));
    }
    if days > MAX_HOLDING_PERIOD_DAYS {
        return Err(invalid("holding_period_days", "Holding period must not exceed 36500 days"));
    }
    Ok(days)
}

/// Sale date of a project bought on `purchase_date` and held
/// `holding_period_days` days, after checking the holding period.
pub fn sale_date_after(
    purchase_date: NaiveDate,
    holding_period_days: u32,
) -> ResalePlanResult<NaiveDate> {
    check_holding_period(holding_period_days)?;
    purchase_date
        .checked_add_days(Days::new(u64::from(holding_period_days)))
        .ok_or_else(|| {
            ResalePlanError::DateError(format!(
                "{purchase_date} + {holding_period_days} days is out of range"
            ))
        })
}

/// Pre-condition enforced by callers before running the engine: the primary
/// credit plus equity must cover purchase price, notary fee and file fee.
pub fn check_financing_precondition(inputs: &ProjectInputs) -> ResalePlanResult<()> {
    let available = inputs.primary_credit_amount + inputs.equity_amount;
    let required = inputs.purchase_price + inputs.notary_fee() + inputs.file_fee;
    if available < required {
        return Err(ResalePlanError::InsufficientFinancing {
            available,
            required,
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Parsing helpers
// ---------------------------------------------------------------------------

fn invalid(field: &str, reason: &str) -> ResalePlanError {
    ResalePlanError::InvalidInput {
        field: field.into(),
        reason: reason.into(),
    }
}

fn required_positive(field: &str, value: &Option<Value>) -> ResalePlanResult<Decimal> {
    if matches!(value, None | Some(Value::Null)) {
        return Err(invalid(field, "Field is required"));
    }
    match clean_optional(value.as_ref()) {
        Some(v) if v > Decimal::ZERO => Ok(v),
        Some(_) => Err(invalid(field, "Value must be positive")),
        None => Err(invalid(field, "Value is not numeric")),
    }
}

/// Holding period from a raw field: absent means the default, otherwise a
/// whole number of days within `1..=36500`.
pub fn parse_holding_period(value: &Option<Value>) -> ResalePlanResult<u32> {
    if matches!(value, None | Some(Value::Null)) {
        return Ok(DEFAULT_HOLDING_PERIOD_DAYS);
    }
    let days = clean_optional(value.as_ref())
        .ok_or_else(|| invalid("holding_period_days", "Value is not numeric"))?;
    if days <= Decimal::ZERO {
        return Err(invalid("holding_period_days", "Holding period must be positive"));
    }
    if !days.fract().is_zero() {
        return Err(invalid("holding_period_days", "Holding period must be a whole number of days"));
    }
    let days = days
        .to_u32()
        .ok_or_else(|| invalid("holding_period_days", "Holding period must not exceed 36500 days"))?;
    check_holding_period(days)
}

fn parse_purchase_date(value: &Option<Value>) -> ResalePlanResult<NaiveDate> {
    let text = match value {
        Some(Value::String(s)) if !s.trim().is_empty() => s.trim(),
        None | Some(Value::Null) | Some(Value::String(_)) => {
            return Err(invalid("purchase_date", "Field is required"));
        }
        Some(_) => return Err(invalid("purchase_date", "Expected a YYYY-MM-DD string")),
    };
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .or_else(|_| DateTime::parse_from_rfc3339(text).map(|dt| dt.date_naive()))
        .map_err(|_| invalid("purchase_date", "Expected a YYYY-MM-DD date or RFC 3339 timestamp"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn raw(value: Value) -> RawProjectInputs {
        serde_json::from_value(value).unwrap()
    }

    fn minimal() -> Value {
        json!({
            "habitable_surface": 50,
            "purchase_price": 200000,
            "purchase_date": "2024-01-01",
        })
    }

    #[test]
    fn test_defaults_applied() {
        let inputs = ProjectInputs::from_raw(&raw(minimal())).unwrap();
        assert_eq!(inputs.terrace_weighting, dec!(0.3));
        assert_eq!(inputs.holding_period_days, 365);
        assert_eq!(inputs.pricing_coefficient, Decimal::ONE);
        assert_eq!(inputs.notary_fee_percent, Decimal::ZERO);
        assert_eq!(inputs.notary_fee_amount, None);
        assert_eq!(inputs.purchase_date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
    }

    #[test]
    fn test_string_amounts_are_cleaned() {
        let inputs = ProjectInputs::from_raw(&raw(json!({
            "habitable_surface": "50 m²",
            "purchase_price": "200 000 €",
            "purchase_date": "2024-01-01T09:30:00Z",
            "holding_period_days": "180",
            "notary_fee_percent": "8%",
        })))
        .unwrap();
        assert_eq!(inputs.habitable_surface, dec!(50));
        assert_eq!(inputs.purchase_price, dec!(200000));
        assert_eq!(inputs.holding_period_days, 180);
        assert_eq!(inputs.notary_fee(), dec!(16000));
    }

    #[test]
    fn test_missing_required_fields_rejected() {
        for field in ["habitable_surface", "purchase_price", "purchase_date"] {
            let mut value = minimal();
            value.as_object_mut().unwrap().remove(field);
            let err = ProjectInputs::from_raw(&raw(value)).unwrap_err();
            match err {
                ResalePlanError::InvalidInput { field: f, .. } => assert_eq!(f, field),
                other => panic!("unexpected error {other:?}"),
            }
        }
    }

    #[test]
    fn test_non_positive_required_fields_rejected() {
        let mut value = minimal();
        value["purchase_price"] = json!(0);
        assert!(ProjectInputs::from_raw(&raw(value)).is_err());

        let mut value = minimal();
        value["habitable_surface"] = json!("-3");
        assert!(ProjectInputs::from_raw(&raw(value)).is_err());

        let mut value = minimal();
        value["holding_period_days"] = json!(0);
        assert!(ProjectInputs::from_raw(&raw(value)).is_err());

        let mut value = minimal();
        value["holding_period_days"] = json!(90.5);
        assert!(ProjectInputs::from_raw(&raw(value)).is_err());
    }

    #[test]
    fn test_negative_optional_field_rejected() {
        let mut value = minimal();
        value["interest_rate_percent"] = json!(-1);
        let err = ProjectInputs::from_raw(&raw(value)).unwrap_err();
        assert!(err.to_string().contains("interest_rate_percent"));
    }

    #[test]
    fn test_flat_fee_overrides_percentage() {
        let mut value = minimal();
        value["notary_fee_percent"] = json!(8);
        value["notary_fee_amount"] = json!(12500);
        value["agency_fee_percent"] = json!(5);
        let inputs = ProjectInputs::from_raw(&raw(value)).unwrap();
        assert_eq!(inputs.notary_fee(), dec!(12500));
        assert_eq!(inputs.agency_fee(), dec!(10000));
    }

    #[test]
    fn test_sale_price_resolution() {
        let mut value = minimal();
        value["market_price_per_m2"] = json!(9000);
        value["pricing_coefficient"] = json!(1.1);
        let inputs = ProjectInputs::from_raw(&raw(value.clone())).unwrap();
        assert_eq!(inputs.resolved_sale_price_per_m2(), dec!(9900));

        value["sale_price_per_weighted_m2"] = json!(10500);
        let inputs = ProjectInputs::from_raw(&raw(value)).unwrap();
        assert_eq!(inputs.resolved_sale_price_per_m2(), dec!(10500));
    }

    #[test]
    fn test_surfaces_default_to_before_works() {
        let mut value = minimal();
        value["terrace_surface"] = json!(10);
        let inputs = ProjectInputs::from_raw(&raw(value)).unwrap();
        let s = inputs.surfaces();
        assert_eq!(s.weighted_before_works, dec!(53));
        assert_eq!(s.carrez_after_works, dec!(50));
        assert_eq!(s.weighted_after_works, dec!(53));
    }

    #[test]
    fn test_sale_date() {
        let inputs = ProjectInputs::from_raw(&raw(minimal())).unwrap();
        assert_eq!(
            inputs.sale_date().unwrap(),
            NaiveDate::from_ymd_opt(2024, 12, 31).unwrap()
        );
    }

    #[test]
    fn test_financing_precondition() {
        let mut value = minimal();
        value["notary_fee_percent"] = json!(8);
        value["file_fee"] = json!(1000);
        value["primary_credit_amount"] = json!(150000);
        value["equity_amount"] = json!(60000);
        let inputs = ProjectInputs::from_raw(&raw(value.clone())).unwrap();
        match check_financing_precondition(&inputs).unwrap_err() {
            ResalePlanError::InsufficientFinancing { available, required } => {
                assert_eq!(available, dec!(210000));
                assert_eq!(required, dec!(217000));
            }
            other => panic!("unexpected error {other:?}"),
        }

        value["equity_amount"] = json!(67000);
        let inputs = ProjectInputs::from_raw(&raw(value)).unwrap();
        assert!(check_financing_precondition(&inputs).is_ok());
    }

    #[test]
    fn test_oversized_values_rejected() {
        let mut value = minimal();
        value["purchase_price"] = json!("10000000000000000000000000000");
        value["notary_fee_percent"] = json!(8);
        let err = ProjectInputs::from_raw(&raw(value)).unwrap_err();
        assert!(matches!(err, ResalePlanError::InvalidInput { ref field, .. } if field == "purchase_price"));

        let mut value = minimal();
        value["habitable_surface"] = json!("1000000000000000");
        value["works_cost_per_m2"] = json!("1000000000000000");
        let err = ProjectInputs::from_raw(&raw(value)).unwrap_err();
        assert!(matches!(err, ResalePlanError::InvalidInput { ref field, .. } if field == "habitable_surface"));

        let mut value = minimal();
        value["interest_rate_percent"] = json!(1001);
        assert!(ProjectInputs::from_raw(&raw(value)).is_err());

        let mut value = minimal();
        value["pricing_coefficient"] = json!(101);
        assert!(ProjectInputs::from_raw(&raw(value)).is_err());
    }

    #[test]
    fn test_values_at_limits_accepted() {
        let mut value = minimal();
        value["habitable_surface"] = json!(1000000);
        value["purchase_price"] = json!("1000000000000000");
        value["interest_rate_percent"] = json!(1000);
        value["terrace_weighting"] = json!(100);
        assert!(ProjectInputs::from_raw(&raw(value)).is_ok());
    }

    #[test]
    fn test_holding_period_bounds() {
        assert!(check_holding_period(0).is_err());
        assert!(check_holding_period(36501).is_err());
        assert_eq!(check_holding_period(36500).unwrap(), 36500);

        assert_eq!(parse_holding_period(&None).unwrap(), 365);
        assert!(parse_holding_period(&Some(json!(0))).is_err());
        assert!(parse_holding_period(&Some(json!(-5))).is_err());
        assert!(parse_holding_period(&Some(json!(12.5))).is_err());
        assert!(parse_holding_period(&Some(json!(40000))).is_err());
        assert_eq!(parse_holding_period(&Some(json!("180 jours"))).unwrap(), 180);
    }

    #[test]
    fn test_sale_date_after_checks_holding_period() {
        let purchase = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(
            sale_date_after(purchase, 90).unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 31).unwrap()
        );
        assert!(matches!(
            sale_date_after(purchase, 0),
            Err(ResalePlanError::InvalidInput { .. })
        ));
        assert!(sale_date_after(NaiveDate::MAX, 10).is_err());
    }
}
