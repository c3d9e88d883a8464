//! Summary rollup across all components

use std::collections::HashMap;

use beam_types::Component;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::model::{MaterialLedger, ProjectInfo, SummaryRow};
use crate::service::emissions::{emissions_intensity, kg_to_tonnes};

/// Emissions of a single component
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentTotal {
    pub component: Component,
    pub rows: usize,
    pub total_emissions_kg: f64,
}

/// Group every line item by material name and sum emissions
///
/// Materials appear in first-seen order: components in display order, then
/// rows in insertion order. Names are matched exactly (case-sensitive).
pub fn aggregate(ledger: &MaterialLedger) -> Vec<SummaryRow> {
    let mut rows: Vec<SummaryRow> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();

    for item in ledger.all_rows() {
        match positions.get(item.material()) {
            Some(&pos) => rows[pos].total_emissions_kg += item.emissions(),
            None => {
                positions.insert(item.material(), rows.len());
                rows.push(SummaryRow {
                    material: item.material().to_string(),
                    total_emissions_kg: item.emissions(),
                });
            }
        }
    }

    debug!(materials = rows.len(), "ledger aggregated");
    rows
}

/// Sum of all material totals, `0.0` for an empty summary
pub fn grand_total(rows: &[SummaryRow]) -> f64 {
    rows.iter().fold(0.0, |acc, row| acc + row.total_emissions_kg)
}

/// Per-component totals in display order, including empty components
pub fn component_totals(ledger: &MaterialLedger) -> Vec<ComponentTotal> {
    ledger
        .components()
        .map(|(component, rows)| ComponentTotal {
            component,
            rows: rows.len(),
            total_emissions_kg: ledger.component_total(component),
        })
        .collect()
}

/// Plain-text report of component and material totals
pub fn generate_summary_report(
    ledger: &MaterialLedger,
    summary: &[SummaryRow],
    project: Option<&ProjectInfo>,
) -> String {
    let total = grand_total(summary);

    let mut report = String::new();
    report.push_str("==================================================\n");
    report.push_str("              Embodied Carbon Summary              \n");
    report.push_str("==================================================\n\n");

    if let Some(project) = project {
        report.push_str("[Project]\n");
        report.push_str(&format!("  Name:          {}\n", project.name));
        report.push_str(&format!("  Project ID:    {}\n", project.project_id));
        report.push_str(&format!("  Building type: {}\n", project.building_type));
        report.push_str(&format!("  Floor area:    {:.0} m²\n\n", project.floor_area_m2));
    }

    report.push_str("[Components]\n");
    report.push_str("-".repeat(50).as_str());
    report.push('\n');
    report.push_str(&format!(
        "{:<22} {:>6} {:>20}\n",
        "Component", "Rows", "Emissions (kg CO2e)"
    ));
    report.push_str("-".repeat(50).as_str());
    report.push('\n');
    for entry in component_totals(ledger).iter().filter(|t| t.rows > 0) {
        report.push_str(&format!(
            "{:<22} {:>6} {:>20.1}\n",
            entry.component.label(),
            entry.rows,
            entry.total_emissions_kg
        ));
    }
    report.push('\n');

    if summary.is_empty() {
        report.push_str("[No Materials]\n");
        report.push_str("  Every component is empty.\n\n");
    } else {
        report.push_str("[Materials]\n");
        report.push_str("-".repeat(62).as_str());
        report.push('\n');
        report.push_str(&format!(
            "{:<24} {:>20} {:>16}\n",
            "Material", "Emissions (kg CO2e)", "(t CO2e)"
        ));
        report.push_str("-".repeat(62).as_str());
        report.push('\n');
        for row in summary {
            report.push_str(&format!(
                "{:<24} {:>20.1} {:>16.2}\n",
                truncate_str(&row.material, 23),
                row.total_emissions_kg,
                row.total_emissions_tonnes()
            ));
        }
        report.push('\n');
    }

    report.push_str(&format!(
        "  Total emissions: {:.1} t CO2e ({:.1} kg)\n",
        kg_to_tonnes(total),
        total
    ));
    if let Some(intensity) = project.and_then(|p| emissions_intensity(total, p.floor_area_m2)) {
        report.push_str(&format!("  Intensity:       {:.2} kg CO2e/m²\n", intensity));
    }
    report.push_str("==================================================\n");
    report
}

fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() > max_len {
        let truncated: String = s.chars().take(max_len.saturating_sub(2)).collect();
        format!("{}..", truncated)
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RowInput;

    fn naive_total(ledger: &MaterialLedger) -> f64 {
        let mut total = 0.0;
        for component in Component::ALL {
            for item in ledger.get_rows(component) {
                total += item.emissions();
            }
        }
        total
    }

    fn mixed_ledger() -> MaterialLedger {
        let mut ledger = MaterialLedger::new();
        ledger
            .set_rows(
                Component::Roof,
                &[
                    RowInput::new("Steel", "Deck", 2.0, "t", 192.5),
                    RowInput::new("Timber", "Rafters", 8.0, "m³", 110.0),
                ],
            )
            .unwrap();
        ledger
            .set_rows(
                Component::FootingsAndSlabs,
                &[
                    RowInput::new("Concrete", "Slab", 40.0, "m³", 100.0),
                    RowInput::new("steel", "Mesh", 1.0, "t", 192.5),
                    RowInput::new("Steel", "Rebar", 3.0, "t", 192.5),
                ],
            )
            .unwrap();
        ledger
    }

    #[test]
    fn test_aggregate_default_seed_in_one_component() {
        let mut ledger = MaterialLedger::new();
        ledger.seed_defaults(Component::FootingsAndSlabs);

        let summary = aggregate(&ledger);
        assert_eq!(summary.len(), 2);
        assert_eq!(summary[0].material, "Concrete");
        assert!((summary[0].total_emissions_kg - 10_000.0).abs() < 1e-9);
        assert_eq!(summary[1].material, "Steel");
        assert!((summary[1].total_emissions_kg - 3_850.0).abs() < 1e-9);
        assert!((grand_total(&summary) - 13_850.0).abs() < 1e-9);
    }

    #[test]
    fn test_aggregate_first_seen_order_and_case_sensitive() {
        let summary = aggregate(&mixed_ledger());
        let names: Vec<_> = summary.iter().map(|r| r.material.as_str()).collect();
        // Footings & Slabs precedes Roof in display order
        assert_eq!(names, vec!["Concrete", "steel", "Steel", "Timber"]);
        let steel = summary.iter().find(|r| r.material == "Steel").unwrap();
        assert!((steel.total_emissions_kg - 5.0 * 192.5).abs() < 1e-9);
    }

    #[test]
    fn test_grand_total_matches_naive_sum() {
        for ledger in [MaterialLedger::new(), MaterialLedger::seeded(), mixed_ledger()] {
            let summary = aggregate(&ledger);
            assert!((grand_total(&summary) - naive_total(&ledger)).abs() < 1e-9);
        }
    }

    #[test]
    fn test_aggregate_is_idempotent() {
        let ledger = mixed_ledger();
        assert_eq!(aggregate(&ledger), aggregate(&ledger));
    }

    #[test]
    fn test_grand_total_empty_is_zero() {
        let total = grand_total(&[]);
        assert_eq!(total, 0.0);
        assert!(total.is_sign_positive());
    }

    #[test]
    fn test_component_totals_cover_every_component() {
        let totals = component_totals(&mixed_ledger());
        assert_eq!(totals.len(), Component::COUNT);
        let roof = totals.iter().find(|t| t.component == Component::Roof).unwrap();
        assert_eq!(roof.rows, 2);
        assert!((roof.total_emissions_kg - (385.0 + 880.0)).abs() < 1e-9);
        let garage = totals.iter().find(|t| t.component == Component::Garage).unwrap();
        assert_eq!(garage.total_emissions_kg, 0.0);
    }

    #[test]
    fn test_generate_report() {
        let mut ledger = MaterialLedger::new();
        ledger.seed_defaults(Component::FootingsAndSlabs);
        let summary = aggregate(&ledger);
        let report = generate_summary_report(&ledger, &summary, Some(&ProjectInfo::default()));
        assert!(report.contains("Embodied Carbon Summary"));
        assert!(report.contains("Footings & Slabs"));
        assert!(report.contains("(13850.0 kg)"));
        assert!(report.contains("Intensity:       2.77 kg CO2e/m²"));
        assert!(!report.contains("Garage"));
    }

    #[test]
    fn test_generate_report_empty_ledger() {
        let ledger = MaterialLedger::new();
        let report = generate_summary_report(&ledger, &[], None);
        assert!(report.contains("Every component is empty"));
        assert!(!report.contains("[Project]"));
    }
}
