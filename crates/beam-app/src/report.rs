//! Report assembly: everything a summary view needs, computed from one snapshot

use beam_domain::model::{MaterialLedger, ProjectInfo, SummaryRow};
use beam_domain::service::{
    aggregate, component_totals, emissions_intensity, grand_total, kg_to_tonnes, ComponentTotal,
};
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct EmissionsReport {
    pub generated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<ProjectInfo>,
    pub components: Vec<ComponentTotal>,
    pub summary: Vec<SummaryRow>,
    pub grand_total_kg: f64,
    pub grand_total_tonnes: f64,
    /// kg CO2e/m², present when the project has a floor area
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intensity_kg_per_m2: Option<f64>,
}

impl EmissionsReport {
    pub fn build(ledger: &MaterialLedger, project: Option<&ProjectInfo>) -> Self {
        let summary = aggregate(ledger);
        let total = grand_total(&summary);
        let intensity = project.and_then(|p| emissions_intensity(total, p.floor_area_m2));

        Self {
            generated_at: Utc::now(),
            project: project.cloned(),
            components: component_totals(ledger),
            summary,
            grand_total_kg: total,
            grand_total_tonnes: kg_to_tonnes(total),
            intensity_kg_per_m2: intensity,
        }
    }
}
