//! Campus dataset loading and validation.
//!
//! The dataset is a single JSON document listing locations, walking paths,
//! and the indoor wayfinding catalog. It is loaded and validated once at
//! startup and read-only afterwards; every later query operates on the
//! in-memory [`Campus`].

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::catalog::{IndoorCatalog, Step};
use crate::error::{Error, Result};
use crate::graph::{CampusPath, Coordinate, LocationGraph};
use crate::session::RouteSession;

/// Campus dataset bundled with the library.
const BUNDLED_CAMPUS: &str = include_str!("../data/campus.json");

/// Loaded, validated campus dataset: the location graph plus the indoor
/// wayfinding catalog.
#[derive(Debug, Clone)]
pub struct Campus {
    pub graph: LocationGraph,
    pub catalog: IndoorCatalog,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawDataset {
    locations: Vec<String>,
    paths: Vec<RawPath>,
    #[serde(default)]
    catalog: BTreeMap<String, BTreeMap<String, Vec<Step>>>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawPath {
    from: String,
    to: String,
    polyline: Vec<Coordinate>,
}

impl Campus {
    /// Parse and validate a dataset from its JSON representation.
    ///
    /// Validation failures are fatal: the engine must not start on a
    /// dataset with duplicate paths, malformed polylines, or broken ward
    /// sequences.
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: RawDataset = serde_json::from_str(json)?;

        let paths = raw
            .paths
            .into_iter()
            .map(|path| CampusPath {
                from: path.from,
                to: path.to,
                polyline: path.polyline,
            })
            .collect();
        let graph = LocationGraph::from_parts(raw.locations, paths)?;

        for building in raw.catalog.keys() {
            if !graph.contains(building) {
                warn!(%building, "indoor catalog entry for unknown building");
            }
        }
        let catalog = IndoorCatalog::from_entries(raw.catalog)?;

        debug!(
            locations = graph.location_names().len(),
            paths = graph.path_count(),
            "loaded campus dataset"
        );

        Ok(Self { graph, catalog })
    }

    /// Load a dataset from a JSON file on disk.
    pub fn from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::DatasetNotFound {
                path: path.to_path_buf(),
            });
        }
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// The campus dataset bundled with the library.
    pub fn bundled() -> Result<Self> {
        Self::from_json(BUNDLED_CAMPUS)
    }

    /// Start an empty wayfinding session over this campus.
    pub fn session(&self) -> RouteSession<'_> {
        RouteSession::new(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn bundled_campus_loads() {
        let campus = Campus::bundled().unwrap();

        assert_eq!(campus.graph.location_names().len(), 8);
        assert_eq!(campus.graph.path_count(), 11);
        assert_eq!(campus.catalog.wards_for("Building 1").len(), 3);
        assert_eq!(campus.catalog.wards_for("Building 2").len(), 4);
        assert_eq!(campus.catalog.wards_for("Building 3").len(), 3);
        assert!(campus.catalog.wards_for("Hospital Pharmacy").is_empty());
    }

    #[test]
    fn duplicate_path_fails_to_load() {
        let json = r#"{
            "locations": ["A", "B"],
            "paths": [
                { "from": "A", "to": "B", "polyline": [[1.0, 2.0], [1.1, 2.1]] },
                { "from": "B", "to": "A", "polyline": [[1.1, 2.1], [1.0, 2.0]] }
            ]
        }"#;

        assert!(matches!(
            Campus::from_json(json),
            Err(Error::DuplicatePath { .. })
        ));
    }

    #[test]
    fn short_polyline_fails_to_load() {
        let json = r#"{
            "locations": ["A", "B"],
            "paths": [{ "from": "A", "to": "B", "polyline": [[1.0, 2.0]] }]
        }"#;

        assert!(matches!(
            Campus::from_json(json),
            Err(Error::ShortPolyline { .. })
        ));
    }

    #[test]
    fn broken_ward_sequence_fails_to_load() {
        let json = r#"{
            "locations": ["A", "B"],
            "paths": [{ "from": "A", "to": "B", "polyline": [[1.0, 2.0], [1.1, 2.1]] }],
            "catalog": {
                "B": {
                    "Cardiology": [{ "kind": "straight", "text": "Enter the lobby." }]
                }
            }
        }"#;

        assert!(matches!(
            Campus::from_json(json),
            Err(Error::MissingArrivalStep { .. })
        ));
    }

    #[test]
    fn missing_catalog_defaults_to_empty() {
        let json = r#"{
            "locations": ["A", "B"],
            "paths": [{ "from": "A", "to": "B", "polyline": [[1.0, 2.0], [1.1, 2.1]] }]
        }"#;

        let campus = Campus::from_json(json).unwrap();
        assert!(campus.catalog.wards_for("B").is_empty());
    }

    #[test]
    fn load_from_path_round_trips() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "locations": ["A", "B"],
                "paths": [{{ "from": "A", "to": "B", "polyline": [[1.0, 2.0], [1.1, 2.1]] }}]
            }}"#
        )
        .unwrap();

        let campus = Campus::from_path(file.path()).unwrap();
        assert_eq!(campus.graph.path_count(), 1);
    }

    #[test]
    fn missing_file_reports_dataset_not_found() {
        let result = Campus::from_path(Path::new("/nonexistent/campus.json"));
        assert!(matches!(result, Err(Error::DatasetNotFound { .. })));
    }
}
