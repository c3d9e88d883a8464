//! Domain services

pub mod emissions;
pub mod row_validator;
pub mod summary;

pub use emissions::{calculate_emissions, emissions_intensity, kg_to_tonnes};
pub use row_validator::{validate_row, validate_rows};
pub use summary::{
    aggregate, component_totals, generate_summary_report, grand_total, ComponentTotal,
};
