use clap::Args;
use serde_json::Value;

use resale_plan_core::property::{calculate_pricing_coefficient, PropertyCharacteristics};

use crate::input;

/// Arguments for the pricing coefficient
#[derive(Args)]
pub struct CoefficientArgs {
    /// Path to JSON property description (stdin is read when omitted)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_coefficient(args: CoefficientArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let characteristics: PropertyCharacteristics = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(piped) = input::stdin::read_stdin()? {
        piped
    } else {
        return Err("--input <property.json> or stdin required for coefficient".into());
    };
    let result = calculate_pricing_coefficient(&characteristics)?;
    Ok(serde_json::to_value(result)?)
}
