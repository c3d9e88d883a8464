//! Project information attached to a ledger

use beam_types::ProjectError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Kind of building being assessed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildingType {
    #[default]
    Office,
    Residential,
    School,
    Hospital,
}

impl BuildingType {
    pub const ALL: [BuildingType; 4] = [
        BuildingType::Office,
        BuildingType::Residential,
        BuildingType::School,
        BuildingType::Hospital,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            BuildingType::Office => "Office",
            BuildingType::Residential => "Residential",
            BuildingType::School => "School",
            BuildingType::Hospital => "Hospital",
        }
    }
}

impl std::fmt::Display for BuildingType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for BuildingType {
    type Err = ProjectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        BuildingType::ALL
            .iter()
            .copied()
            .find(|t| t.label().eq_ignore_ascii_case(needle))
            .ok_or_else(|| ProjectError::UnknownBuildingType(s.to_string()))
    }
}

/// Project header shown on reports
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectInfo {
    pub name: String,

    #[serde(default)]
    pub building_type: BuildingType,

    /// Gross floor area (m²)
    #[serde(default)]
    pub floor_area_m2: f64,

    #[serde(default)]
    pub project_id: String,
}

impl Default for ProjectInfo {
    fn default() -> Self {
        Self {
            name: "Example Project".to_string(),
            building_type: BuildingType::Office,
            floor_area_m2: 5000.0,
            project_id: "AUTO123".to_string(),
        }
    }
}

impl ProjectInfo {
    /// Check the floor area is a usable magnitude
    pub fn validate(&self) -> Result<(), ProjectError> {
        if !self.floor_area_m2.is_finite() || self.floor_area_m2 < 0.0 {
            return Err(ProjectError::InvalidFloorArea(self.floor_area_m2));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_building_type_parse() {
        assert_eq!("school".parse::<BuildingType>().unwrap(), BuildingType::School);
        assert_eq!(" Hospital ".parse::<BuildingType>().unwrap(), BuildingType::Hospital);
        let err = "warehouse".parse::<BuildingType>().unwrap_err();
        assert!(matches!(err, ProjectError::UnknownBuildingType(ref name) if name == "warehouse"));
    }

    #[test]
    fn test_default_project() {
        let project = ProjectInfo::default();
        assert_eq!(project.name, "Example Project");
        assert_eq!(project.project_id, "AUTO123");
        assert!(project.validate().is_ok());
    }

    #[test]
    fn test_negative_floor_area_invalid() {
        let project = ProjectInfo {
            floor_area_m2: -1.0,
            ..Default::default()
        };
        assert!(matches!(
            project.validate(),
            Err(ProjectError::InvalidFloorArea(area)) if area == -1.0
        ));
        let project = ProjectInfo {
            floor_area_m2: f64::NAN,
            ..Default::default()
        };
        assert!(project.validate().is_err());
    }
}
