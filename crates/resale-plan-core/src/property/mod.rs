pub mod coefficient;

pub use coefficient::{
    calculate_pricing_coefficient, AddressDesirability, CoefficientImpact, CoefficientResult,
    Condition, FloorLevel, OutdoorSpace, PropertyCharacteristics, ViewQuality,
};
