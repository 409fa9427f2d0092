use chrono::NaiveDate;
use clap::Args;
use rust_decimal::Decimal;
use serde_json::{json, Value};

use resale_plan_core::business_plan::{
    calculate_business_plan, check_financing_precondition, generate_periods, sale_date_after,
    PlanConfig, ProjectInputs, RawProjectInputs,
};
use resale_plan_core::time_value::bisection_irr;

use crate::input;

/// Arguments for the full business plan
#[derive(Args)]
pub struct BusinessPlanArgs {
    /// Path to JSON project file (stdin is read when omitted)
    #[arg(long)]
    pub input: Option<String>,

    /// Path to a JSON or YAML engine configuration
    #[arg(long)]
    pub config: Option<String>,

    /// Run even when primary credit and equity do not cover the acquisition
    #[arg(long)]
    pub allow_shortfall: bool,
}

pub fn run_business_plan(args: BusinessPlanArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let raw: RawProjectInputs = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(piped) = input::stdin::read_stdin()? {
        piped
    } else {
        return Err("--input <project.json> or stdin required for business plan".into());
    };
    let config = load_config(args.config.as_deref())?;

    let inputs = ProjectInputs::from_raw(&raw)?;
    if args.allow_shortfall {
        tracing::debug!("financing pre-condition skipped");
    } else {
        check_financing_precondition(&inputs)?;
    }

    let result = calculate_business_plan(&inputs, &config)?;
    Ok(serde_json::to_value(result)?)
}

/// Arguments for the quarterly period schedule
#[derive(Args)]
pub struct PeriodsArgs {
    /// Purchase date (YYYY-MM-DD)
    #[arg(long)]
    pub purchase_date: NaiveDate,

    /// Holding period in days (1 to 36500)
    #[arg(long, default_value_t = 365)]
    pub holding_days: u32,
}

pub fn run_periods(args: PeriodsArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let sale_date = sale_date_after(args.purchase_date, args.holding_days)?;
    let periods = generate_periods(args.purchase_date, sale_date)?;
    let total_days: u32 = periods.iter().map(|p| p.days).sum();

    Ok(json!({
        "purchase_date": args.purchase_date,
        "sale_date": sale_date,
        "total_days": total_days,
        "results": periods,
    }))
}

/// Arguments for the IRR solver
#[derive(Args)]
pub struct IrrArgs {
    /// Cash flows, one per period (comma-separated, e.g. "-100,30,30,60")
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true, required = true)]
    pub cash_flows: Vec<Decimal>,

    /// Path to a JSON or YAML engine configuration (solver bracket)
    #[arg(long)]
    pub config: Option<String>,
}

pub fn run_irr(args: IrrArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let config = load_config(args.config.as_deref())?;
    let irr = bisection_irr(&args.cash_flows, &config.irr)?;
    Ok(json!({
        "result": {
            "irr": irr,
            "irr_pct": irr * Decimal::ONE_HUNDRED,
            "periods": args.cash_flows.len(),
        },
        "methodology": "Bisection on NPV over the configured rate bracket",
    }))
}

fn load_config(path: Option<&str>) -> Result<PlanConfig, Box<dyn std::error::Error>> {
    match path {
        Some(path) => input::file::read_config(path),
        None => Ok(PlanConfig::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn periods_args(holding_days: u32) -> PeriodsArgs {
        PeriodsArgs {
            purchase_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            holding_days,
        }
    }

    #[test]
    fn test_periods_schedule() {
        let value = run_periods(periods_args(365)).unwrap();
        assert_eq!(value["sale_date"], "2024-12-31");
        assert_eq!(value["total_days"], 366);
        assert_eq!(value["results"].as_array().unwrap().len(), 4);
    }

    #[test]
    fn test_periods_reject_out_of_range_holding() {
        assert!(run_periods(periods_args(0)).is_err());
        assert!(run_periods(periods_args(36501)).is_err());
    }
}
