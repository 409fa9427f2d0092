use resale_plan_core::property::{
    calculate_pricing_coefficient, AddressDesirability, Condition, FloorLevel, OutdoorSpace,
    PropertyCharacteristics, ViewQuality,
};
use rust_decimal_macros::dec;

fn flat() -> PropertyCharacteristics {
    PropertyCharacteristics {
        view: ViewQuality::Good,
        floor: FloorLevel::Low,
        elevator: false,
        outdoor: OutdoorSpace::None,
        address: AddressDesirability::ModeratelySoughtAfter,
        condition: Condition::NeedsRefreshing,
        number_of_rooms: 2,
        habitable_surface: Some(dec!(45)),
        terrace_surface: Some(dec!(0)),
        terrace_weighting: Some(dec!(0.3)),
    }
}

#[test]
fn test_typical_flat_coefficient() {
    let out = calculate_pricing_coefficient(&flat()).unwrap();
    // 1 + 0.10 - 0.05 + 0 + 0.05 - 0.05 - 0.02
    assert_eq!(out.result.coefficient, dec!(1.03));
    assert_eq!(out.result.weighted_total_surface, Some(dec!(45)));
}

#[test]
fn test_impacts_sum_to_coefficient() {
    let input = PropertyCharacteristics {
        view: ViewQuality::Poor,
        floor: FloorLevel::Ground,
        condition: Condition::NeedsRenovation,
        ..flat()
    };
    let out = calculate_pricing_coefficient(&input).unwrap();
    let sum: rust_decimal::Decimal = out.result.impacts.iter().map(|i| i.impact).sum();
    assert_eq!(out.result.coefficient, dec!(1) + sum);
    assert_eq!(out.result.coefficient, dec!(0.63));
}

#[test]
fn test_missing_surface_leaves_total_empty() {
    let input = PropertyCharacteristics {
        terrace_weighting: None,
        ..flat()
    };
    let out = calculate_pricing_coefficient(&input).unwrap();
    assert!(out.result.weighted_total_surface.is_none());
}
