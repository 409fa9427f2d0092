use std::time::Instant;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::{with_metadata, ComputationOutput, SquareMetres};
use crate::ResalePlanResult;

// ---------------------------------------------------------------------------
// Input types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViewQuality {
    Exceptional,
    Good,
    Average,
    Poor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FloorLevel {
    /// 5th floor and above
    #[serde(alias = "High (≥ 5th)")]
    High,
    /// 2nd to 4th floor
    #[serde(alias = "Mid (2nd-4th)")]
    Mid,
    /// 1st floor
    #[serde(alias = "Low (1st)")]
    Low,
    #[serde(alias = "Ground Floor")]
    Ground,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutdoorSpace {
    /// 50 m² and above
    #[serde(alias = "Large (≥ 50 m²)")]
    Large,
    /// 20 to 49 m²
    #[serde(alias = "Medium (20-49 m²)")]
    Medium,
    /// 5 to 19 m²
    #[serde(alias = "Small (5-19 m²)")]
    Small,
    /// Under 5 m²
    #[serde(alias = "None (< 5 m²)")]
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AddressDesirability {
    #[serde(alias = "Highly Sought-After")]
    HighlySoughtAfter,
    #[serde(alias = "Moderately Sought-After")]
    ModeratelySoughtAfter,
    Standard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Condition {
    #[serde(alias = "Renovated by Architect")]
    ArchitectRenovated,
    #[serde(alias = "Simply Renovated")]
    SimplyRenovated,
    #[serde(alias = "Good Condition")]
    Good,
    #[serde(alias = "Needs Refreshing")]
    NeedsRefreshing,
    #[serde(alias = "Needs Renovation")]
    NeedsRenovation,
}

/// Qualitative description of a property, used to adjust the market price
/// per m² of comparable sales.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyCharacteristics {
    pub view: ViewQuality,
    pub floor: FloorLevel,
    pub elevator: bool,
    pub outdoor: OutdoorSpace,
    pub address: AddressDesirability,
    pub condition: Condition,
    pub number_of_rooms: u32,
    /// Habitable surface, when known, for the weighted total surface
    #[serde(default)]
    pub habitable_surface: Option<SquareMetres>,
    #[serde(default)]
    pub terrace_surface: Option<SquareMetres>,
    #[serde(default)]
    pub terrace_weighting: Option<Decimal>,
}

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// Contribution of one characteristic to the coefficient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoefficientImpact {
    pub parameter: String,
    pub value: String,
    pub impact: Decimal,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoefficientResult {
    /// Multiplier applied to the market price per m², rounded to 2 dp
    pub coefficient: Decimal,
    pub impacts: Vec<CoefficientImpact>,
    /// Habitable + terrace × weighting, when all three are supplied
    pub weighted_total_surface: Option<SquareMetres>,
}

// ---------------------------------------------------------------------------
// Impact tables
// ---------------------------------------------------------------------------

fn view_impact(view: ViewQuality) -> Decimal {
    match view {
        ViewQuality::Exceptional => dec!(0.20),
        ViewQuality::Good => dec!(0.10),
        ViewQuality::Average => Decimal::ZERO,
        ViewQuality::Poor => dec!(-0.20),
    }
}

/// Upper floors gain value only when served by an elevator.
fn floor_impact(floor: FloorLevel, elevator: bool) -> Decimal {
    match (floor, elevator) {
        (FloorLevel::High, true) => dec!(0.05),
        (FloorLevel::High, false) => dec!(-0.20),
        (FloorLevel::Mid, true) => Decimal::ZERO,
        (FloorLevel::Mid, false) => dec!(-0.10),
        (FloorLevel::Low, _) => dec!(-0.05),
        (FloorLevel::Ground, _) => dec!(-0.10),
    }
}

fn outdoor_impact(outdoor: OutdoorSpace) -> Decimal {
    match outdoor {
        OutdoorSpace::Large => dec!(0.10),
        OutdoorSpace::Medium => dec!(0.03),
        OutdoorSpace::Small | OutdoorSpace::None => Decimal::ZERO,
    }
}

fn address_impact(address: AddressDesirability) -> Decimal {
    match address {
        AddressDesirability::HighlySoughtAfter => dec!(0.10),
        AddressDesirability::ModeratelySoughtAfter => dec!(0.05),
        AddressDesirability::Standard => Decimal::ZERO,
    }
}

fn condition_impact(condition: Condition) -> Decimal {
    match condition {
        Condition::ArchitectRenovated => dec!(0.10),
        Condition::SimplyRenovated => dec!(0.05),
        Condition::Good => Decimal::ZERO,
        Condition::NeedsRefreshing => dec!(-0.05),
        Condition::NeedsRenovation => dec!(-0.10),
    }
}

fn rooms_impact(number_of_rooms: u32) -> Decimal {
    if number_of_rooms < 3 {
        dec!(-0.02)
    } else {
        Decimal::ZERO
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Pricing coefficient of a property relative to its market benchmark.
///
/// Starts at 1.00 and adds one additive impact per characteristic. The
/// elevator is listed with a zero impact since it only acts through the
/// floor adjustment.
pub fn calculate_pricing_coefficient(
    input: &PropertyCharacteristics,
) -> ResalePlanResult<ComputationOutput<CoefficientResult>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let entry = |parameter: &str, value: String, impact: Decimal, description: &str| {
        CoefficientImpact {
            parameter: parameter.to_string(),
            value,
            impact,
            description: description.to_string(),
        }
    };

    let impacts = vec![
        entry(
            "view",
            format!("{:?}", input.view),
            view_impact(input.view),
            "Quality of the view",
        ),
        entry(
            "floor",
            format!("{:?}", input.floor),
            floor_impact(input.floor, input.elevator),
            "Floor level combined with elevator access",
        ),
        entry(
            "elevator",
            if input.elevator { "Yes" } else { "No" }.to_string(),
            Decimal::ZERO,
            "Elevator (applied through the floor impact)",
        ),
        entry(
            "outdoor",
            format!("{:?}", input.outdoor),
            outdoor_impact(input.outdoor),
            "Size of the outdoor space",
        ),
        entry(
            "address",
            format!("{:?}", input.address),
            address_impact(input.address),
            "Desirability of the address",
        ),
        entry(
            "condition",
            format!("{:?}", input.condition),
            condition_impact(input.condition),
            "Condition of the property",
        ),
        entry(
            "rooms",
            input.number_of_rooms.to_string(),
            rooms_impact(input.number_of_rooms),
            "Number of rooms",
        ),
    ];

    let coefficient =
        (Decimal::ONE + impacts.iter().map(|i| i.impact).sum::<Decimal>()).round_dp(2);
    if coefficient <= Decimal::ZERO {
        warnings.push(format!("Coefficient {coefficient} is not positive"));
    }

    let weighted_total_surface = match (
        input.habitable_surface,
        input.terrace_surface,
        input.terrace_weighting,
    ) {
        (Some(habitable), Some(terrace), Some(weighting)) => Some(habitable + terrace * weighting),
        _ => None,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Additive pricing coefficient from qualitative property characteristics",
        input,
        warnings,
        elapsed,
        CoefficientResult {
            coefficient,
            impacts,
            weighted_total_surface,
        },
    ))
}
