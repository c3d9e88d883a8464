//! Emission calculation functions

/// Embodied emissions in kg CO2e: quantity x emission factor
pub fn calculate_emissions(quantity: f64, emission_factor: f64) -> f64 {
    quantity * emission_factor
}

pub fn kg_to_tonnes(kg: f64) -> f64 {
    kg / 1000.0
}

/// Emissions per square metre of floor area (kg CO2e/m²)
///
/// Returns `None` when the floor area is zero, negative or not finite.
pub fn emissions_intensity(total_kg: f64, floor_area_m2: f64) -> Option<f64> {
    if floor_area_m2.is_finite() && floor_area_m2 > 0.0 {
        Some(total_kg / floor_area_m2)
    } else {
        None
    }
}
