//! Excel export of the ledger and its summary

use std::path::Path;

use beam_domain::model::{MaterialLedger, MaterialLineItem, ProjectInfo, SummaryRow};
use beam_domain::service::{emissions_intensity, grand_total, kg_to_tonnes};
use beam_types::{Component, Error, ExportError, Result};
use chrono::Utc;
use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};
use tracing::info;

use super::sheet_name::unique_sheet_names;

/// MIME type hosts should use when offering the artifact for download
pub const XLSX_MIME_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

pub const DEFAULT_REPORT_FILE_NAME: &str = "beam_report.xlsx";

pub const SUMMARY_SHEET: &str = "Summary";
const PROJECT_SHEET: &str = "Project";

const ROW_HEADERS: [&str; 6] = [
    "Material",
    "Category",
    "Quantity",
    "Unit",
    "Emission Factor",
    "Emissions",
];

fn workbook_err(e: XlsxError) -> Error {
    ExportError::Workbook(e.to_string()).into()
}

/// Build the workbook as an in-memory xlsx artifact
pub fn export(ledger: &MaterialLedger, summary: &[SummaryRow]) -> Result<Vec<u8>> {
    export_with_project(ledger, summary, None)
}

/// Same as [`export`], adding a Project sheet when project info is given
pub fn export_with_project(
    ledger: &MaterialLedger,
    summary: &[SummaryRow],
    project: Option<&ProjectInfo>,
) -> Result<Vec<u8>> {
    let mut workbook = build_workbook(ledger, summary, project)?;
    let bytes = workbook.save_to_buffer().map_err(workbook_err)?;
    info!(bytes = bytes.len(), rows = ledger.row_count(), "report exported");
    Ok(bytes)
}

/// Write the xlsx artifact to `output_path`
pub fn save_report(
    ledger: &MaterialLedger,
    summary: &[SummaryRow],
    project: Option<&ProjectInfo>,
    output_path: &Path,
) -> Result<()> {
    let mut workbook = build_workbook(ledger, summary, project)?;
    workbook.save(output_path).map_err(workbook_err)?;
    info!(path = %output_path.display(), "report saved");
    Ok(())
}

/// Worksheet names in workbook order, paired with the component they hold
///
/// Summary comes first, then Project (if any), then one sheet per component
/// in display order.
pub fn sheet_layout(with_project: bool) -> Vec<(Option<Component>, String)> {
    let mut reserved = vec![SUMMARY_SHEET];
    let mut layout = vec![(None, SUMMARY_SHEET.to_string())];
    if with_project {
        reserved.push(PROJECT_SHEET);
        layout.push((None, PROJECT_SHEET.to_string()));
    }

    let names = unique_sheet_names(Component::ALL.iter().map(|c| c.label()), &reserved);
    layout.extend(Component::ALL.iter().copied().map(Some).zip(names));
    layout
}

fn build_workbook(
    ledger: &MaterialLedger,
    summary: &[SummaryRow],
    project: Option<&ProjectInfo>,
) -> Result<Workbook> {
    if ledger.is_empty() {
        return Err(ExportError::NoData.into());
    }

    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();
    let number_format = Format::new().set_num_format("#,##0.00");

    for (component, name) in sheet_layout(project.is_some()) {
        let sheet = workbook.add_worksheet();
        sheet.set_name(name.as_str()).map_err(workbook_err)?;

        match component {
            Some(component) => write_component_sheet(
                sheet,
                ledger.get_rows(component),
                &header_format,
                &number_format,
            )?,
            None if name == SUMMARY_SHEET => {
                write_summary_sheet(sheet, summary, &header_format, &number_format)?
            }
            None => {
                if let Some(project) = project {
                    write_project_sheet(sheet, project, summary, &header_format, &number_format)?;
                }
            }
        }
    }

    Ok(workbook)
}

fn write_component_sheet(
    sheet: &mut Worksheet,
    rows: &[MaterialLineItem],
    header_format: &Format,
    number_format: &Format,
) -> Result<()> {
    for (col, header) in ROW_HEADERS.iter().enumerate() {
        sheet
            .write_string_with_format(0, col as u16, *header, header_format)
            .map_err(workbook_err)?;
    }

    for (row_idx, item) in rows.iter().enumerate() {
        let row = (row_idx + 1) as u32;
        sheet.write_string(row, 0, item.material()).map_err(workbook_err)?;
        sheet.write_string(row, 1, item.category()).map_err(workbook_err)?;
        sheet.write_number(row, 2, item.quantity()).map_err(workbook_err)?;
        sheet.write_string(row, 3, item.unit()).map_err(workbook_err)?;
        sheet
            .write_number(row, 4, item.emission_factor())
            .map_err(workbook_err)?;
        sheet
            .write_number_with_format(row, 5, item.emissions(), number_format)
            .map_err(workbook_err)?;
    }

    sheet.set_column_width(0, 20).map_err(workbook_err)?;
    sheet.set_column_width(1, 30).map_err(workbook_err)?;
    sheet.set_column_width(4, 16).map_err(workbook_err)?;
    sheet.set_column_width(5, 14).map_err(workbook_err)?;

    Ok(())
}

fn write_summary_sheet(
    sheet: &mut Worksheet,
    summary: &[SummaryRow],
    header_format: &Format,
    number_format: &Format,
) -> Result<()> {
    sheet
        .write_string_with_format(0, 0, "Material", header_format)
        .map_err(workbook_err)?;
    sheet
        .write_string_with_format(0, 1, "Total Emissions", header_format)
        .map_err(workbook_err)?;

    for (row_idx, entry) in summary.iter().enumerate() {
        let row = (row_idx + 1) as u32;
        sheet.write_string(row, 0, &entry.material).map_err(workbook_err)?;
        sheet
            .write_number_with_format(row, 1, entry.total_emissions_kg, number_format)
            .map_err(workbook_err)?;
    }

    // Grand total below a blank row
    let total_row = (summary.len() + 2) as u32;
    sheet
        .write_string_with_format(total_row, 0, "Total", header_format)
        .map_err(workbook_err)?;
    sheet
        .write_number_with_format(total_row, 1, grand_total(summary), number_format)
        .map_err(workbook_err)?;

    sheet.set_column_width(0, 24).map_err(workbook_err)?;
    sheet.set_column_width(1, 18).map_err(workbook_err)?;

    Ok(())
}

fn write_project_sheet(
    sheet: &mut Worksheet,
    project: &ProjectInfo,
    summary: &[SummaryRow],
    header_format: &Format,
    number_format: &Format,
) -> Result<()> {
    let total = grand_total(summary);

    sheet
        .write_string_with_format(0, 0, "Embodied Carbon Report", header_format)
        .map_err(workbook_err)?;

    let text_rows = [
        ("Generated:", Utc::now().to_rfc3339()),
        ("Project Name:", project.name.clone()),
        ("Project ID:", project.project_id.clone()),
        ("Building Type:", project.building_type.label().to_string()),
    ];
    for (i, (label, value)) in text_rows.iter().enumerate() {
        let row = (i + 2) as u32;
        sheet.write_string(row, 0, *label).map_err(workbook_err)?;
        sheet.write_string(row, 1, value).map_err(workbook_err)?;
    }

    let mut row = (text_rows.len() + 2) as u32;
    sheet.write_string(row, 0, "Floor Area (m²):").map_err(workbook_err)?;
    sheet
        .write_number(row, 1, project.floor_area_m2)
        .map_err(workbook_err)?;

    row += 1;
    sheet
        .write_string(row, 0, "Total Emissions (kg CO2e):")
        .map_err(workbook_err)?;
    sheet
        .write_number_with_format(row, 1, total, number_format)
        .map_err(workbook_err)?;

    row += 1;
    sheet
        .write_string(row, 0, "Total Emissions (t CO2e):")
        .map_err(workbook_err)?;
    sheet
        .write_number_with_format(row, 1, kg_to_tonnes(total), number_format)
        .map_err(workbook_err)?;

    if let Some(intensity) = emissions_intensity(total, project.floor_area_m2) {
        row += 1;
        sheet
            .write_string(row, 0, "Intensity (kg CO2e/m²):")
            .map_err(workbook_err)?;
        sheet
            .write_number_with_format(row, 1, intensity, number_format)
            .map_err(workbook_err)?;
    }

    sheet.set_column_width(0, 28).map_err(workbook_err)?;
    sheet.set_column_width(1, 32).map_err(workbook_err)?;

    Ok(())
}
