//! Static per-building indoor wayfinding catalog.
//!
//! Each catalog entry maps a building to its wards, and each ward to the
//! ordered steps that lead to it (turns, elevators, stairs). The catalog is
//! validated once at load time; lookups afterwards cannot fail fatally.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Visual category for a single direction step.
///
/// Kinds drive icon selection only; they carry no routing semantics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    Start,
    Path,
    Destination,
    Ward,
    Straight,
    Left,
    Right,
    Elevator,
    Stairs,
}

impl StepKind {
    /// Short label used in textual renderings.
    pub fn label(self) -> &'static str {
        match self {
            StepKind::Start => "start",
            StepKind::Path => "path",
            StepKind::Destination => "destination",
            StepKind::Ward => "ward",
            StepKind::Straight => "straight",
            StepKind::Left => "left",
            StepKind::Right => "right",
            StepKind::Elevator => "elevator",
            StepKind::Stairs => "stairs",
        }
    }
}

/// One instruction in a directions sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub kind: StepKind,
    pub text: String,
}

impl Step {
    pub fn new(kind: StepKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

/// Validated per-building, per-ward indoor step sequences.
///
/// Buildings without registered wards are the normal case; `wards_for`
/// returns an empty list for them rather than an error, and callers hide
/// ward selection entirely when the list is empty.
#[derive(Debug, Clone, Default)]
pub struct IndoorCatalog {
    buildings: BTreeMap<String, BTreeMap<String, Vec<Step>>>,
}

impl IndoorCatalog {
    /// Build a catalog from raw entries, validating every ward sequence.
    ///
    /// A ward must have at least one step and its final step must carry the
    /// `ward` arrival kind; either violation is fatal at load time.
    pub fn from_entries(entries: BTreeMap<String, BTreeMap<String, Vec<Step>>>) -> Result<Self> {
        for (building, wards) in &entries {
            for (ward, steps) in wards {
                let Some(last) = steps.last() else {
                    return Err(Error::EmptyWardSteps {
                        building: building.clone(),
                        ward: ward.clone(),
                    });
                };
                if last.kind != StepKind::Ward {
                    return Err(Error::MissingArrivalStep {
                        building: building.clone(),
                        ward: ward.clone(),
                    });
                }
            }
        }

        Ok(Self { buildings: entries })
    }

    /// Ward names registered for a building, alphabetically ordered.
    ///
    /// Empty when the building has no indoor catalog entry.
    pub fn wards_for(&self, building: &str) -> Vec<&str> {
        self.buildings
            .get(building)
            .map(|wards| wards.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    /// Indoor steps for a ward, or `None` when the ward is not registered.
    pub fn steps_for(&self, building: &str, ward: &str) -> Option<&[Step]> {
        self.buildings
            .get(building)
            .and_then(|wards| wards.get(ward))
            .map(Vec::as_slice)
    }

    /// Whether the building has at least one registered ward.
    pub fn has_wards(&self, building: &str) -> bool {
        self.buildings
            .get(building)
            .map(|wards| !wards.is_empty())
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(steps: Vec<Step>) -> BTreeMap<String, BTreeMap<String, Vec<Step>>> {
        let mut wards = BTreeMap::new();
        wards.insert("Cardiology".to_string(), steps);
        let mut buildings = BTreeMap::new();
        buildings.insert("Building 1".to_string(), wards);
        buildings
    }

    #[test]
    fn valid_ward_sequence_loads() {
        let catalog = IndoorCatalog::from_entries(entries(vec![
            Step::new(StepKind::Straight, "Enter the main lobby."),
            Step::new(StepKind::Ward, "Cardiology reception is on your right."),
        ]))
        .unwrap();

        assert_eq!(catalog.wards_for("Building 1"), vec!["Cardiology"]);
        assert!(catalog.has_wards("Building 1"));
        assert_eq!(
            catalog.steps_for("Building 1", "Cardiology").map(<[Step]>::len),
            Some(2)
        );
    }

    #[test]
    fn empty_step_sequence_is_rejected() {
        let result = IndoorCatalog::from_entries(entries(Vec::new()));
        assert!(matches!(result, Err(Error::EmptyWardSteps { .. })));
    }

    #[test]
    fn missing_arrival_step_is_rejected() {
        let result = IndoorCatalog::from_entries(entries(vec![Step::new(
            StepKind::Straight,
            "Enter the main lobby.",
        )]));
        assert!(matches!(result, Err(Error::MissingArrivalStep { .. })));
    }

    #[test]
    fn unregistered_building_has_no_wards() {
        let catalog = IndoorCatalog::default();
        assert!(catalog.wards_for("Hospital Pharmacy").is_empty());
        assert!(!catalog.has_wards("Hospital Pharmacy"));
        assert!(catalog.steps_for("Hospital Pharmacy", "Cardiology").is_none());
    }

    #[test]
    fn unknown_ward_in_known_building_is_none() {
        let catalog = IndoorCatalog::from_entries(entries(vec![Step::new(
            StepKind::Ward,
            "Cardiology reception is on your right.",
        )]))
        .unwrap();

        assert!(catalog.steps_for("Building 1", "Radiology").is_none());
    }

    #[test]
    fn step_kind_serialises_snake_case() {
        let json = serde_json::to_string(&StepKind::Elevator).unwrap();
        assert_eq!(json, "\"elevator\"");
    }
}
