//! Immutable campus location graph.
//!
//! Stores the named locations and the direct walking paths between them.
//! Paths are keyed by an order-independent pair of endpoint names, so a
//! lookup in either direction is O(1); each stored path keeps its canonical
//! direction so that traversal the other way can reverse the polyline.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{Error, Result};

/// Geographic coordinate, serialised as a `[lat, lon]` pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl From<[f64; 2]> for Coordinate {
    fn from(pair: [f64; 2]) -> Self {
        Self {
            lat: pair[0],
            lon: pair[1],
        }
    }
}

impl From<Coordinate> for [f64; 2] {
    fn from(coordinate: Coordinate) -> Self {
        [coordinate.lat, coordinate.lon]
    }
}

/// Direct walking connection between two locations.
///
/// The polyline traces the route from `from` to `to` and always holds at
/// least two coordinates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CampusPath {
    pub from: String,
    pub to: String,
    pub polyline: Vec<Coordinate>,
}

/// Order-independent key for the pair of locations a path connects.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub(crate) struct PairKey(String, String);

impl PairKey {
    pub(crate) fn new(a: &str, b: &str) -> Self {
        if a <= b {
            Self(a.to_string(), b.to_string())
        } else {
            Self(b.to_string(), a.to_string())
        }
    }
}

/// Immutable store of named locations and the direct paths between them.
#[derive(Debug, Clone, Default)]
pub struct LocationGraph {
    names: Vec<String>,
    index: HashSet<String>,
    paths: HashMap<PairKey, CampusPath>,
}

impl LocationGraph {
    /// Build a graph from dataset parts, validating the graph invariants.
    ///
    /// Location names must be unique, every polyline needs at least two
    /// coordinates, and at most one path may connect any unordered pair of
    /// locations. Paths referencing locations absent from the list are
    /// skipped with a warning rather than poisoning the graph.
    pub fn from_parts(locations: Vec<String>, paths: Vec<CampusPath>) -> Result<Self> {
        let mut names = Vec::with_capacity(locations.len());
        let mut index = HashSet::with_capacity(locations.len());
        for name in locations {
            if !index.insert(name.clone()) {
                return Err(Error::DuplicateLocation { name });
            }
            names.push(name);
        }

        let mut stored: HashMap<PairKey, CampusPath> = HashMap::with_capacity(paths.len());
        let mut skipped = 0usize;
        for path in paths {
            if path.polyline.len() < 2 {
                return Err(Error::ShortPolyline {
                    points: path.polyline.len(),
                    from: path.from,
                    to: path.to,
                });
            }
            if !index.contains(&path.from) || !index.contains(&path.to) {
                skipped += 1;
                continue;
            }
            let key = PairKey::new(&path.from, &path.to);
            if stored.contains_key(&key) {
                return Err(Error::DuplicatePath {
                    a: path.from,
                    b: path.to,
                });
            }
            stored.insert(key, path);
        }

        if skipped > 0 {
            warn!(skipped, "ignored paths referencing unknown locations");
        }

        Ok(Self {
            names,
            index,
            paths: stored,
        })
    }

    /// Location names in dataset order, for populating selection controls.
    pub fn location_names(&self) -> &[String] {
        &self.names
    }

    /// Whether a location with this exact (case-sensitive) name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains(name)
    }

    /// All stored paths, in arbitrary order.
    pub fn paths(&self) -> impl Iterator<Item = &CampusPath> {
        self.paths.values()
    }

    /// Number of stored paths.
    pub fn path_count(&self) -> usize {
        self.paths.len()
    }

    /// The direct path between two locations, regardless of stored direction.
    pub fn path_between(&self, a: &str, b: &str) -> Option<&CampusPath> {
        self.paths.get(&PairKey::new(a, b))
    }

    /// Closest location names to a query, best match first.
    pub fn fuzzy_location_matches(&self, query: &str, limit: usize) -> Vec<String> {
        let needle = query.to_lowercase();
        let mut scored: Vec<(f64, &String)> = self
            .names
            .iter()
            .map(|name| (strsim::jaro_winkler(&needle, &name.to_lowercase()), name))
            .filter(|(score, _)| *score > 0.7)
            .collect();
        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
        scored
            .into_iter()
            .take(limit)
            .map(|(_, name)| name.clone())
            .collect()
    }
}
