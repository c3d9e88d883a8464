//! Per-session store of material line items, one table per building component

use beam_types::{Component, LedgerError};
use tracing::debug;

use super::line_item::{default_rows, MaterialLineItem, RowInput};
use crate::service::row_validator::{validate_row, validate_rows};

/// Material line items grouped by component
///
/// Rows keep insertion order. Every write goes through validation, and a
/// rejected write leaves the ledger untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MaterialLedger {
    tables: [Vec<MaterialLineItem>; Component::COUNT],
}

impl MaterialLedger {
    /// Ledger with every component empty
    pub fn new() -> Self {
        Self::default()
    }

    /// Ledger with the default entry set in every component
    pub fn seeded() -> Self {
        let mut ledger = Self::new();
        for component in Component::ALL {
            ledger.seed_defaults(component);
        }
        ledger
    }

    /// Replace one component's rows with the default entry set
    pub fn seed_defaults(&mut self, component: Component) {
        let items = default_rows()
            .iter()
            .enumerate()
            .filter_map(|(index, row)| validate_row(row, index).ok())
            .collect();
        self.tables[component.index()] = items;
    }

    /// Current rows of a component, in display order
    pub fn get_rows(&self, component: Component) -> &[MaterialLineItem] {
        &self.tables[component.index()]
    }

    /// Rows of a component named by label or slug
    pub fn rows_by_name(&self, name: &str) -> Result<&[MaterialLineItem], LedgerError> {
        let component = name.parse::<Component>()?;
        Ok(self.get_rows(component))
    }

    /// Replace the full row sequence of a component
    ///
    /// Emissions are recomputed from quantity and factor for every row; any
    /// caller-supplied value is ignored.
    pub fn set_rows(&mut self, component: Component, rows: &[RowInput]) -> Result<(), LedgerError> {
        let items = validate_rows(rows)?;
        debug!(component = component.label(), rows = items.len(), "rows replaced");
        self.tables[component.index()] = items;
        Ok(())
    }

    /// Append one row and return the stored item
    pub fn add_row(
        &mut self,
        component: Component,
        row: RowInput,
    ) -> Result<&MaterialLineItem, LedgerError> {
        let table = &mut self.tables[component.index()];
        let item = validate_row(&row, table.len())?;
        table.push(item);
        debug!(component = component.label(), rows = table.len(), "row added");
        Ok(&table[table.len() - 1])
    }

    /// Remove the row at `index`, if present
    pub fn remove_row(&mut self, component: Component, index: usize) -> Option<MaterialLineItem> {
        let table = &mut self.tables[component.index()];
        if index < table.len() {
            Some(table.remove(index))
        } else {
            None
        }
    }

    /// Sum of emissions over a component's rows, `0.0` when empty
    pub fn component_total(&self, component: Component) -> f64 {
        self.get_rows(component)
            .iter()
            .fold(0.0, |acc, item| acc + item.emissions())
    }

    /// Every component with its rows, in display order
    pub fn components(&self) -> impl Iterator<Item = (Component, &[MaterialLineItem])> + '_ {
        Component::ALL
            .iter()
            .map(move |&component| (component, self.get_rows(component)))
    }

    /// All rows of all components, flattened in display order
    pub fn all_rows(&self) -> impl Iterator<Item = &MaterialLineItem> + '_ {
        self.tables.iter().flatten()
    }

    pub fn row_count(&self) -> usize {
        self.tables.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.iter().all(Vec::is_empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use beam_types::{Cell, RowField, RowProblem};

    fn assert_invariant(ledger: &MaterialLedger) {
        for item in ledger.all_rows() {
            let expected = item.quantity() * item.emission_factor();
            assert!((item.emissions() - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn test_new_is_empty() {
        let ledger = MaterialLedger::new();
        assert!(ledger.is_empty());
        assert_eq!(ledger.row_count(), 0);
    }

    #[test]
    fn test_seeded_has_defaults_everywhere() {
        let ledger = MaterialLedger::seeded();
        for (_, rows) in ledger.components() {
            assert_eq!(rows.len(), 2);
            assert_eq!(rows[0].material(), "Concrete");
            assert_eq!(rows[1].material(), "Steel");
        }
        assert_eq!(ledger.row_count(), 24);
        assert_invariant(&ledger);
    }

    #[test]
    fn test_component_total_empty_is_zero() {
        let ledger = MaterialLedger::new();
        let total = ledger.component_total(Component::Roof);
        assert_eq!(total, 0.0);
        assert!(total.is_sign_positive());
    }

    #[test]
    fn test_component_total_of_seed() {
        let mut ledger = MaterialLedger::new();
        ledger.seed_defaults(Component::FootingsAndSlabs);
        assert!((ledger.component_total(Component::FootingsAndSlabs) - 13_850.0).abs() < 1e-9);
        assert_eq!(ledger.component_total(Component::Garage), 0.0);
    }

    #[test]
    fn test_set_rows_recomputes_every_row() {
        let mut ledger = MaterialLedger::new();
        let rows = vec![
            RowInput::new("Timber", "CLT panel", 12.5, "m³", 0.0).with_emissions(999.0),
            RowInput::new("Glass", "Double glazing", "40", "m²", "25.75"),
            RowInput::new("Insulation", "Mineral wool", 0.1, "m³", 1.3),
        ];
        ledger.set_rows(Component::Windows, &rows).unwrap();
        let stored = ledger.get_rows(Component::Windows);
        assert_eq!(stored.len(), 3);
        assert_eq!(stored[0].emissions(), 0.0);
        assert!((stored[1].emissions() - 1030.0).abs() < 1e-9);
        assert_invariant(&ledger);
    }

    #[test]
    fn test_set_rows_preserves_order() {
        let mut ledger = MaterialLedger::new();
        let rows: Vec<_> = ["C", "A", "B"]
            .iter()
            .map(|m| RowInput::new(*m, "", 1.0, "kg", 1.0))
            .collect();
        ledger.set_rows(Component::Floors, &rows).unwrap();
        let names: Vec<_> = ledger.get_rows(Component::Floors).iter().map(|r| r.material()).collect();
        assert_eq!(names, vec!["C", "A", "B"]);
    }

    #[test]
    fn test_set_rows_negative_quantity_leaves_ledger_unchanged() {
        let mut ledger = MaterialLedger::seeded();
        let before = ledger.clone();
        let rows = vec![
            RowInput::new("Concrete", "Generic concrete, 35 MPa", 10.0, "m³", 100.0),
            RowInput::new("Steel", "Reinforcement steel", -5.0, "tonnes", 192.5),
        ];
        let err = ledger.set_rows(Component::Roof, &rows).unwrap_err();
        assert_eq!(err.issues().len(), 1);
        assert_eq!(err.issues()[0].row, 1);
        assert_eq!(err.issues()[0].field, RowField::Quantity);
        assert_eq!(err.issues()[0].problem, RowProblem::Negative(-5.0));
        assert_eq!(ledger, before);
    }

    #[test]
    fn test_set_rows_empty_clears_component() {
        let mut ledger = MaterialLedger::seeded();
        ledger.set_rows(Component::Garage, &[]).unwrap();
        assert!(ledger.get_rows(Component::Garage).is_empty());
        assert_eq!(ledger.component_total(Component::Garage), 0.0);
    }

    #[test]
    fn test_rows_by_name() {
        let ledger = MaterialLedger::seeded();
        assert_eq!(ledger.rows_by_name("Ext. Walls").unwrap().len(), 2);
        let err = ledger.rows_by_name("Basement").unwrap_err();
        assert!(matches!(err, LedgerError::UnknownComponent(_)));
    }

    #[test]
    fn test_add_row() {
        let mut ledger = MaterialLedger::new();
        let item = ledger
            .add_row(Component::Cladding, RowInput::new("Brick", "Clay brick", 3.0, "t", 240.0))
            .unwrap();
        assert!((item.emissions() - 720.0).abs() < 1e-9);
        assert_eq!(ledger.get_rows(Component::Cladding).len(), 1);
    }

    #[test]
    fn test_add_invalid_row_reports_its_position() {
        let mut ledger = MaterialLedger::seeded();
        let err = ledger
            .add_row(Component::Cladding, RowInput::new("Brick", "", Cell::Empty, "t", 240.0))
            .unwrap_err();
        assert_eq!(err.issues()[0].row, 2);
        assert_eq!(ledger.get_rows(Component::Cladding).len(), 2);
    }

    #[test]
    fn test_remove_row() {
        let mut ledger = MaterialLedger::seeded();
        let removed = ledger.remove_row(Component::Roof, 0).unwrap();
        assert_eq!(removed.material(), "Concrete");
        assert_eq!(ledger.get_rows(Component::Roof).len(), 1);
        assert!(ledger.remove_row(Component::Roof, 5).is_none());
    }
}
