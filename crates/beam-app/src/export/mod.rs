//! Spreadsheet export

pub mod excel;
pub mod sheet_name;

pub use excel::{
    export, export_with_project, save_report, sheet_layout, DEFAULT_REPORT_FILE_NAME,
    SUMMARY_SHEET, XLSX_MIME_TYPE,
};
pub use sheet_name::{unique_sheet_names, MAX_SHEET_NAME_LEN};
