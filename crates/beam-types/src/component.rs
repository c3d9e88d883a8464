//! Building components that group material line items

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::LedgerError;

/// Structural or architectural category of a building
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Component {
    FootingsAndSlabs,
    FoundationWalls,
    StructuralElements,
    ExteriorWalls,
    PartyWalls,
    Cladding,
    Windows,
    InteriorWalls,
    Floors,
    Ceilings,
    Roof,
    Garage,
}

impl Component {
    pub const COUNT: usize = 12;

    /// Every component, in display order
    pub const ALL: [Component; Component::COUNT] = [
        Component::FootingsAndSlabs,
        Component::FoundationWalls,
        Component::StructuralElements,
        Component::ExteriorWalls,
        Component::PartyWalls,
        Component::Cladding,
        Component::Windows,
        Component::InteriorWalls,
        Component::Floors,
        Component::Ceilings,
        Component::Roof,
        Component::Garage,
    ];

    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            Component::FootingsAndSlabs => "Footings & Slabs",
            Component::FoundationWalls => "Foundation Walls",
            Component::StructuralElements => "Structural Elements",
            Component::ExteriorWalls => "Ext. Walls",
            Component::PartyWalls => "Party Walls",
            Component::Cladding => "Cladding",
            Component::Windows => "Windows",
            Component::InteriorWalls => "Int. Walls",
            Component::Floors => "Floors",
            Component::Ceilings => "Ceilings",
            Component::Roof => "Roof",
            Component::Garage => "Garage",
        }
    }

    /// Identifier used on the command line and in ledger documents
    pub fn slug(&self) -> &'static str {
        match self {
            Component::FootingsAndSlabs => "footings-and-slabs",
            Component::FoundationWalls => "foundation-walls",
            Component::StructuralElements => "structural-elements",
            Component::ExteriorWalls => "exterior-walls",
            Component::PartyWalls => "party-walls",
            Component::Cladding => "cladding",
            Component::Windows => "windows",
            Component::InteriorWalls => "interior-walls",
            Component::Floors => "floors",
            Component::Ceilings => "ceilings",
            Component::Roof => "roof",
            Component::Garage => "garage",
        }
    }

    /// Position in display order
    pub fn index(&self) -> usize {
        *self as usize
    }
}

impl std::fmt::Display for Component {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Accepts either the label or the slug, ignoring case and surrounding whitespace
impl FromStr for Component {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Component::ALL
            .iter()
            .copied()
            .find(|c| c.label().eq_ignore_ascii_case(needle) || c.slug().eq_ignore_ascii_case(needle))
            .ok_or_else(|| LedgerError::UnknownComponent(s.to_string()))
    }
}
