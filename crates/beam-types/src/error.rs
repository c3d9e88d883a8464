//! Error types for beam

use serde::Serialize;
use thiserror::Error;

/// Column of a line item that failed validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RowField {
    Material,
    Quantity,
    EmissionFactor,
    Emissions,
}

impl RowField {
    /// Column header as shown in tables and exports
    pub fn label(&self) -> &'static str {
        match self {
            RowField::Material => "Material",
            RowField::Quantity => "Quantity",
            RowField::EmissionFactor => "Emission Factor",
            RowField::Emissions => "Emissions",
        }
    }
}

impl std::fmt::Display for RowField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Why a cell was rejected
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "value")]
pub enum RowProblem {
    Missing,
    NotNumeric(String),
    NotFinite,
    Negative(f64),
}

impl std::fmt::Display for RowProblem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RowProblem::Missing => write!(f, "value is missing"),
            RowProblem::NotNumeric(text) => write!(f, "'{}' is not a number", text),
            RowProblem::NotFinite => write!(f, "value is not finite"),
            RowProblem::Negative(value) => write!(f, "{} is negative", value),
        }
    }
}

/// A single rejected cell, addressed by 0-based row index and field
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowIssue {
    pub row: usize,
    pub field: RowField,
    pub problem: RowProblem,
}

impl std::fmt::Display for RowIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "row {} {}: {}", self.row + 1, self.field, self.problem)
    }
}

/// Ledger-related errors
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Unknown component: {0}")]
    UnknownComponent(String),

    #[error("Invalid row: {}", describe_issues(.issues))]
    InvalidRow { issues: Vec<RowIssue> },
}

impl LedgerError {
    /// Rejected cells, empty for errors other than `InvalidRow`
    pub fn issues(&self) -> &[RowIssue] {
        match self {
            LedgerError::InvalidRow { issues } => issues,
            _ => &[],
        }
    }
}

fn describe_issues(issues: &[RowIssue]) -> String {
    match issues {
        [] => "no details".to_string(),
        [only] => only.to_string(),
        [first, rest @ ..] => format!("{} (and {} more)", first, rest.len()),
    }
}

/// Spreadsheet export errors
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Nothing to export: every component is empty")]
    NoData,

    #[error("Workbook error: {0}")]
    Workbook(String),
}

/// Project information errors
#[derive(Debug, Error)]
pub enum ProjectError {
    #[error("Unknown building type '{0}' (expected one of: office, residential, school, hospital)")]
    UnknownBuildingType(String),

    #[error("Floor area must be a non-negative number, got {0}")]
    InvalidFloorArea(f64),
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration not found")]
    NotFound,

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Failed to save configuration: {0}")]
    SaveError(String),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    #[error("Project error: {0}")]
    Project(#[from] ProjectError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_row_message_single_issue() {
        let err = LedgerError::InvalidRow {
            issues: vec![RowIssue {
                row: 0,
                field: RowField::Quantity,
                problem: RowProblem::Negative(-5.0),
            }],
        };
        assert_eq!(err.to_string(), "Invalid row: row 1 Quantity: -5 is negative");
    }

    #[test]
    fn test_invalid_row_message_counts_extra_issues() {
        let err = LedgerError::InvalidRow {
            issues: vec![
                RowIssue {
                    row: 2,
                    field: RowField::EmissionFactor,
                    problem: RowProblem::NotNumeric("abc".to_string()),
                },
                RowIssue {
                    row: 3,
                    field: RowField::Material,
                    problem: RowProblem::Missing,
                },
            ],
        };
        let msg = err.to_string();
        assert!(msg.contains("row 3 Emission Factor: 'abc' is not a number"));
        assert!(msg.ends_with("(and 1 more)"));
        assert_eq!(err.issues().len(), 2);
    }

    #[test]
    fn test_project_error_converts() {
        let err: Error = ProjectError::InvalidFloorArea(-1.0).into();
        assert!(matches!(err, Error::Project(ProjectError::InvalidFloorArea(_))));
        assert_eq!(
            err.to_string(),
            "Project error: Floor area must be a non-negative number, got -1"
        );
    }

    #[test]
    fn test_unknown_component_has_no_issues() {
        let err = LedgerError::UnknownComponent("Basement".to_string());
        assert!(err.issues().is_empty());
        assert_eq!(err.to_string(), "Unknown component: Basement");
    }
}
