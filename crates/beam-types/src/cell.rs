//! Raw numeric cells as handed over by table editors and file imports

use serde::{Deserialize, Serialize};

/// Value of an editable numeric cell before validation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Number(f64),
    Text(String),
    #[default]
    Empty,
}

impl Cell {
    /// Build a cell from free text; blank text is `Empty`
    pub fn from_text(text: &str) -> Self {
        if text.trim().is_empty() {
            Cell::Empty
        } else {
            Cell::Text(text.to_string())
        }
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Number(value)
    }
}

impl From<Option<f64>> for Cell {
    fn from(value: Option<f64>) -> Self {
        value.map(Cell::Number).unwrap_or(Cell::Empty)
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::from_text(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_text_blank_is_empty() {
        assert_eq!(Cell::from_text("   "), Cell::Empty);
        assert_eq!(Cell::from_text(""), Cell::Empty);
        assert_eq!(Cell::from_text("12"), Cell::Text("12".to_string()));
    }

    #[test]
    fn test_deserialize_untagged() {
        let cells: Vec<Cell> = serde_json::from_str(r#"[1.5, "abc", null]"#).unwrap();
        assert_eq!(
            cells,
            vec![Cell::Number(1.5), Cell::Text("abc".to_string()), Cell::Empty]
        );
    }
}
