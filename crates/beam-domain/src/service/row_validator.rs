//! Validation of submitted rows
//!
//! Numeric cells are coerced from text by parsing the trimmed string as a
//! float. Missing, non-numeric, non-finite and negative values are rejected,
//! as is a product that overflows; nothing is zero-filled or dropped.

use beam_types::{Cell, LedgerError, RowField, RowIssue, RowProblem};

use crate::model::{MaterialLineItem, RowInput};
use crate::service::emissions::calculate_emissions;

/// Validate a full row sequence
///
/// Every offending cell across all rows is reported in one `InvalidRow`.
pub fn validate_rows(rows: &[RowInput]) -> Result<Vec<MaterialLineItem>, LedgerError> {
    let mut items = Vec::with_capacity(rows.len());
    let mut issues = Vec::new();

    for (index, row) in rows.iter().enumerate() {
        if let Some(item) = check_row(row, index, &mut issues) {
            items.push(item);
        }
    }

    if issues.is_empty() {
        Ok(items)
    } else {
        Err(LedgerError::InvalidRow { issues })
    }
}

/// Validate a single row that will be stored at position `index`
pub fn validate_row(row: &RowInput, index: usize) -> Result<MaterialLineItem, LedgerError> {
    let mut issues = Vec::new();
    match check_row(row, index, &mut issues) {
        Some(item) if issues.is_empty() => Ok(item),
        _ => Err(LedgerError::InvalidRow { issues }),
    }
}

fn check_row(row: &RowInput, index: usize, issues: &mut Vec<RowIssue>) -> Option<MaterialLineItem> {
    let before = issues.len();

    let material = row.material.trim();
    if material.is_empty() {
        issues.push(RowIssue {
            row: index,
            field: RowField::Material,
            problem: RowProblem::Missing,
        });
    }
    let quantity = read_amount(&row.quantity, index, RowField::Quantity, issues);
    let emission_factor = read_amount(&row.emission_factor, index, RowField::EmissionFactor, issues);

    if issues.len() != before {
        return None;
    }

    let (quantity, emission_factor) = (quantity?, emission_factor?);
    // Two finite amounts can still overflow
    if !calculate_emissions(quantity, emission_factor).is_finite() {
        issues.push(RowIssue {
            row: index,
            field: RowField::Emissions,
            problem: RowProblem::NotFinite,
        });
        return None;
    }

    Some(MaterialLineItem::new(
        material.to_string(),
        row.category.clone(),
        quantity,
        row.unit.clone(),
        emission_factor,
    ))
}

fn read_amount(cell: &Cell, row: usize, field: RowField, issues: &mut Vec<RowIssue>) -> Option<f64> {
    match parse_amount(cell) {
        Ok(value) => Some(value),
        Err(problem) => {
            issues.push(RowIssue { row, field, problem });
            None
        }
    }
}

fn parse_amount(cell: &Cell) -> Result<f64, RowProblem> {
    let value = match cell {
        Cell::Empty => return Err(RowProblem::Missing),
        Cell::Number(n) => *n,
        Cell::Text(text) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                return Err(RowProblem::Missing);
            }
            trimmed
                .parse::<f64>()
                .map_err(|_| RowProblem::NotNumeric(text.clone()))?
        }
    };

    if !value.is_finite() {
        return Err(RowProblem::NotFinite);
    }
    if value < 0.0 {
        return Err(RowProblem::Negative(value));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(quantity: impl Into<Cell>, factor: impl Into<Cell>) -> RowInput {
        RowInput::new("Concrete", "Generic concrete, 35 MPa", quantity, "m³", factor)
    }

    #[test]
    fn test_valid_rows_recompute_emissions() {
        let items = validate_rows(&[row(100.0, 100.0), row("2.5", " 4 ")]).unwrap();
        assert_eq!(items.len(), 2);
        assert!((items[0].emissions() - 10_000.0).abs() < 1e-9);
        assert!((items[1].emissions() - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_caller_emissions_are_overridden() {
        let items = validate_rows(&[row(100.0, 100.0).with_emissions(11_229.0)]).unwrap();
        assert!((items[0].emissions() - 10_000.0).abs() < 1e-9);
    }

    #[test]
    fn test_missing_quantity_rejected() {
        let err = validate_rows(&[row(Cell::Empty, 100.0)]).unwrap_err();
        assert_eq!(
            err.issues(),
            &[RowIssue {
                row: 0,
                field: RowField::Quantity,
                problem: RowProblem::Missing,
            }]
        );
    }

    #[test]
    fn test_blank_text_is_missing() {
        let err = validate_rows(&[row(100.0, Cell::Text("  ".to_string()))]).unwrap_err();
        assert_eq!(err.issues()[0].field, RowField::EmissionFactor);
        assert_eq!(err.issues()[0].problem, RowProblem::Missing);
    }

    #[test]
    fn test_non_numeric_factor_rejected() {
        let err = validate_rows(&[row(100.0, "lots")]).unwrap_err();
        assert_eq!(err.issues()[0].field, RowField::EmissionFactor);
        assert_eq!(err.issues()[0].problem, RowProblem::NotNumeric("lots".to_string()));
    }

    #[test]
    fn test_negative_quantity_rejected() {
        let err = validate_rows(&[row(-5.0, 100.0)]).unwrap_err();
        assert_eq!(err.issues()[0].field, RowField::Quantity);
        assert_eq!(err.issues()[0].problem, RowProblem::Negative(-5.0));
    }

    #[test]
    fn test_non_finite_rejected() {
        let err = validate_rows(&[row(f64::INFINITY, 1.0), row("NaN", 1.0)]).unwrap_err();
        assert_eq!(err.issues().len(), 2);
        assert!(err.issues().iter().all(|i| i.problem == RowProblem::NotFinite));
    }

    #[test]
    fn test_overflowing_emissions_rejected() {
        let rows = [row(1.0, 1.0), row(1e200, 1e200)];
        let err = validate_rows(&rows).unwrap_err();
        assert_eq!(
            err.issues(),
            &[RowIssue {
                row: 1,
                field: RowField::Emissions,
                problem: RowProblem::NotFinite,
            }]
        );
    }

    #[test]
    fn test_large_but_finite_product_accepted() {
        let item = validate_row(&row(1e150, 1e150), 0).unwrap();
        assert!(item.emissions().is_finite());
    }

    #[test]
    fn test_blank_material_rejected() {
        let mut input = row(1.0, 1.0);
        input.material = "  ".to_string();
        let err = validate_rows(&[input]).unwrap_err();
        assert_eq!(err.issues()[0].field, RowField::Material);
    }

    #[test]
    fn test_all_offending_cells_reported() {
        let rows = [row(1.0, 1.0), row(-1.0, "x"), row(2.0, 2.0), row(Cell::Empty, 3.0)];
        let err = validate_rows(&rows).unwrap_err();
        let located: Vec<_> = err.issues().iter().map(|i| (i.row, i.field)).collect();
        assert_eq!(
            located,
            vec![
                (1, RowField::Quantity),
                (1, RowField::EmissionFactor),
                (3, RowField::Quantity),
            ]
        );
    }

    #[test]
    fn test_validate_row_uses_given_index() {
        let err = validate_row(&row("abc", 1.0), 7).unwrap_err();
        assert_eq!(err.issues()[0].row, 7);
    }

    #[test]
    fn test_material_is_trimmed() {
        let mut input = row(1.0, 1.0);
        input.material = "  Timber ".to_string();
        let item = validate_row(&input, 0).unwrap();
        assert_eq!(item.material(), "Timber");
    }
}
