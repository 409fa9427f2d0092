use chrono::NaiveDate;
use napi::Result as NapiResult;
use napi_derive::napi;
use rust_decimal::Decimal;
use serde::Deserialize;

use resale_plan_core::business_plan::{self, PlanConfig, ProjectInputs, RawProjectInputs};
use resale_plan_core::property::{self, PropertyCharacteristics};
use resale_plan_core::time_value::{bisection_irr, IrrConfig};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

fn parse_config(config_json: Option<String>) -> NapiResult<PlanConfig> {
    match config_json {
        Some(json) => serde_json::from_str(&json).map_err(to_napi_error),
        None => Ok(PlanConfig::default()),
    }
}

// ---------------------------------------------------------------------------
// Business plan
// ---------------------------------------------------------------------------

/// Full business plan. The acquisition must be covered by primary credit
/// and equity, otherwise an "Insufficient financing" error is thrown.
#[napi]
pub fn calculate_business_plan(input_json: String, config_json: Option<String>) -> NapiResult<String> {
    let raw: RawProjectInputs = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let config = parse_config(config_json)?;
    let inputs = ProjectInputs::from_raw(&raw).map_err(to_napi_error)?;
    business_plan::check_financing_precondition(&inputs).map_err(to_napi_error)?;
    let output = business_plan::calculate_business_plan(&inputs, &config).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[derive(Deserialize)]
struct PeriodsRequest {
    purchase_date: NaiveDate,
    /// Same rules as the project field: absent means 365, otherwise a whole
    /// number of days in `1..=36500`
    #[serde(default)]
    holding_period_days: Option<serde_json::Value>,
}

#[napi]
pub fn generate_periods(input_json: String) -> NapiResult<String> {
    let request: PeriodsRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let days = business_plan::parse_holding_period(&request.holding_period_days)
        .map_err(to_napi_error)?;
    let sale_date =
        business_plan::sale_date_after(request.purchase_date, days).map_err(to_napi_error)?;
    let periods =
        business_plan::generate_periods(request.purchase_date, sale_date).map_err(to_napi_error)?;
    serde_json::to_string(&periods).map_err(to_napi_error)
}

#[derive(Deserialize)]
struct IrrRequest {
    cash_flows: Vec<Decimal>,
    #[serde(default)]
    config: IrrConfig,
}

/// IRR of a periodic cash-flow series, as a decimal rate.
#[napi]
pub fn calculate_irr(input_json: String) -> NapiResult<String> {
    let request: IrrRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let irr = bisection_irr(&request.cash_flows, &request.config).map_err(to_napi_error)?;
    serde_json::to_string(&irr).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Property
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_pricing_coefficient(input_json: String) -> NapiResult<String> {
    let input: PropertyCharacteristics = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = property::calculate_pricing_coefficient(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}
