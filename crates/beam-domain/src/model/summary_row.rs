use serde::{Deserialize, Serialize};

use crate::service::emissions::kg_to_tonnes;

/// Total emissions of one material across every component
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRow {
    pub material: String,
    pub total_emissions_kg: f64,
}

impl SummaryRow {
    pub fn total_emissions_tonnes(&self) -> f64 {
        kg_to_tonnes(self.total_emissions_kg)
    }
}
