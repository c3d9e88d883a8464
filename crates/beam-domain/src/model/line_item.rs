//! Material line items

use beam_types::Cell;
use serde::{Deserialize, Serialize};

use crate::service::emissions::calculate_emissions;

/// A validated material line item
///
/// Only produced by row validation, so `emissions` always equals
/// `quantity * emission_factor`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MaterialLineItem {
    material: String,
    category: String,
    quantity: f64,
    unit: String,
    emission_factor: f64,
    emissions: f64,
}

impl MaterialLineItem {
    pub(crate) fn new(
        material: String,
        category: String,
        quantity: f64,
        unit: String,
        emission_factor: f64,
    ) -> Self {
        let emissions = calculate_emissions(quantity, emission_factor);
        Self {
            material,
            category,
            quantity,
            unit,
            emission_factor,
            emissions,
        }
    }

    pub fn material(&self) -> &str {
        &self.material
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn quantity(&self) -> f64 {
        self.quantity
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    /// kg CO2e per unit
    pub fn emission_factor(&self) -> f64 {
        self.emission_factor
    }

    /// kg CO2e
    pub fn emissions(&self) -> f64 {
        self.emissions
    }
}

/// A row as submitted by an editor or an import, before validation
///
/// `emissions` is accepted so that edited tables can be written back
/// unchanged, but it is never trusted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RowInput {
    #[serde(default)]
    pub material: String,

    #[serde(default)]
    pub category: String,

    #[serde(default)]
    pub quantity: Cell,

    #[serde(default)]
    pub unit: String,

    #[serde(default)]
    pub emission_factor: Cell,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emissions: Option<f64>,
}

impl RowInput {
    pub fn new(
        material: impl Into<String>,
        category: impl Into<String>,
        quantity: impl Into<Cell>,
        unit: impl Into<String>,
        emission_factor: impl Into<Cell>,
    ) -> Self {
        Self {
            material: material.into(),
            category: category.into(),
            quantity: quantity.into(),
            unit: unit.into(),
            emission_factor: emission_factor.into(),
            emissions: None,
        }
    }

    pub fn with_emissions(mut self, emissions: f64) -> Self {
        self.emissions = Some(emissions);
        self
    }
}

impl From<&MaterialLineItem> for RowInput {
    fn from(item: &MaterialLineItem) -> Self {
        RowInput::new(
            item.material.clone(),
            item.category.clone(),
            item.quantity,
            item.unit.clone(),
            item.emission_factor,
        )
        .with_emissions(item.emissions)
    }
}

/// Default entry set seeded into new ledgers
pub fn default_rows() -> Vec<RowInput> {
    vec![
        RowInput::new("Concrete", "Generic concrete, 35 MPa", 100.0, "m³", 100.0),
        RowInput::new("Steel", "Reinforcement steel", 20.0, "tonnes", 192.5),
    ]
}
