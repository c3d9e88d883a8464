//! Output formatting module

use beam_domain::model::MaterialLineItem;
use beam_domain::service::{kg_to_tonnes, ComponentTotal};
use beam_types::{Component, OutputFormat, Result};
use serde::Serialize;

#[derive(Serialize)]
struct ComponentRowsView<'a> {
    component: Component,
    label: &'static str,
    rows: &'a [MaterialLineItem],
    total_emissions_kg: f64,
}

#[derive(Serialize)]
struct ComponentTotalView {
    component: Component,
    label: &'static str,
    total_emissions_kg: f64,
    total_emissions_tonnes: f64,
}

pub fn output_rows(
    output_format: OutputFormat,
    component: Component,
    rows: &[MaterialLineItem],
    total_kg: f64,
) -> Result<()> {
    if output_format == OutputFormat::Json {
        let view = ComponentRowsView {
            component,
            label: component.label(),
            rows,
            total_emissions_kg: total_kg,
        };
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    println!("\n{}", component.label());
    println!("{}", "=".repeat(component.label().chars().count()));

    if rows.is_empty() {
        println!("(no rows)");
        return Ok(());
    }

    println!(
        "{:>3}  {:<16} {:<26} {:>10} {:<8} {:>10} {:>12}",
        "#", "Material", "Category", "Quantity", "Unit", "Factor", "kg CO2e"
    );
    println!("{}", "-".repeat(92));
    for (i, item) in rows.iter().enumerate() {
        println!(
            "{:>3}  {:<16} {:<26} {:>10.2} {:<8} {:>10.2} {:>12.1}",
            i + 1,
            truncate(item.material(), 16),
            truncate(item.category(), 26),
            item.quantity(),
            truncate(item.unit(), 8),
            item.emission_factor(),
            item.emissions()
        );
    }
    println!("{}", "-".repeat(92));
    println!(
        "Total: {:.1} kg CO2e ({:.2} t)",
        total_kg,
        kg_to_tonnes(total_kg)
    );

    Ok(())
}

pub fn output_total(output_format: OutputFormat, component: Component, total_kg: f64) -> Result<()> {
    match output_format {
        OutputFormat::Json => {
            let view = ComponentTotalView {
                component,
                label: component.label(),
                total_emissions_kg: total_kg,
                total_emissions_tonnes: kg_to_tonnes(total_kg),
            };
            println!("{}", serde_json::to_string_pretty(&view)?);
        }
        OutputFormat::Table => {
            println!(
                "{}: {:.1} kg CO2e ({:.2} t)",
                component.label(),
                total_kg,
                kg_to_tonnes(total_kg)
            );
        }
    }
    Ok(())
}

pub fn output_components(output_format: OutputFormat, totals: &[ComponentTotal]) -> Result<()> {
    if output_format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(totals)?);
        return Ok(());
    }

    println!("{:<22} {:<22} {:>5} {:>12}", "Component", "Slug", "Rows", "kg CO2e");
    println!("{}", "-".repeat(64));
    for total in totals {
        println!(
            "{:<22} {:<22} {:>5} {:>12.1}",
            total.component.label(),
            total.component.slug(),
            total.rows,
            total.total_emissions_kg
        );
    }
    Ok(())
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        let mut cut: String = text.chars().take(width.saturating_sub(1)).collect();
        cut.push('…');
        cut
    }
}
