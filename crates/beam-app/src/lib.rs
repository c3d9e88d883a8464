//! Application service layer - config, report assembly, spreadsheet export

pub mod config;
pub mod export;
pub mod report;
pub mod session;
