use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::BallisticsError;

/// Drag model enum
///
/// Only the two reference projectiles the solver carries tables for.
/// Any other selector is rejected when parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum DragModel {
    G1,
    G7,
}

impl FromStr for DragModel {
    type Err = BallisticsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "G1" => Ok(DragModel::G1),
            "G7" => Ok(DragModel::G7),
            _ => Err(BallisticsError::UnknownDragModel(s.to_string())),
        }
    }
}

impl TryFrom<String> for DragModel {
    type Error = BallisticsError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DragModel> for String {
    fn from(model: DragModel) -> Self {
        model.to_string()
    }
}

impl std::fmt::Display for DragModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drag_model_from_str() {
        assert_eq!("G1".parse::<DragModel>().unwrap(), DragModel::G1);
        assert_eq!("G7".parse::<DragModel>().unwrap(), DragModel::G7);
    }

    #[test]
    fn test_drag_model_from_str_case_insensitive() {
        assert_eq!("g1".parse::<DragModel>().unwrap(), DragModel::G1);
        assert_eq!("g7".parse::<DragModel>().unwrap(), DragModel::G7);
        assert_eq!(" G7 ".parse::<DragModel>().unwrap(), DragModel::G7);
    }

    #[test]
    fn test_drag_model_from_str_invalid() {
        // No silent fallback to G1
        for bad in ["G2", "G8", "GS", "", "model7", "123"] {
            match bad.parse::<DragModel>() {
                Err(BallisticsError::UnknownDragModel(s)) => assert_eq!(s, bad),
                other => panic!("expected UnknownDragModel for {bad:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_drag_model_display() {
        assert_eq!(format!("{}", DragModel::G1), "G1");
        assert_eq!(format!("{}", DragModel::G7), "G7");
    }

    #[test]
    fn test_drag_model_serde() {
        let model: DragModel = serde_json::from_str("\"g7\"").unwrap();
        assert_eq!(model, DragModel::G7);
        assert_eq!(serde_json::to_string(&DragModel::G1).unwrap(), "\"G1\"");

        let err = serde_json::from_str::<DragModel>("\"G5\"").unwrap_err();
        assert!(err.to_string().contains("unknown drag model"));
    }
}
