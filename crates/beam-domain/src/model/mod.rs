//! Domain model types

pub mod ledger;
pub mod line_item;
pub mod project;
pub mod summary_row;

pub use ledger::MaterialLedger;
pub use line_item::{default_rows, MaterialLineItem, RowInput};
pub use project::{BuildingType, ProjectInfo};
pub use summary_row::SummaryRow;
