//! Route resolution between directly connected locations.

use serde::Serialize;

use crate::graph::{Coordinate, LocationGraph};

/// Traversal direction of a resolved route relative to its stored path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Forward,
    Reverse,
}

/// Route resolved between two directly connected locations.
///
/// The polyline is normalised so its first coordinate sits at the requested
/// source: reverse traversals of a stored path flip the coordinate order.
/// `resolve(a, b)` and `resolve(b, a)` therefore always yield polylines
/// that are exact reverses of one another.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedRoute {
    pub source: String,
    pub destination: String,
    pub direction: Direction,
    pub polyline: Vec<Coordinate>,
}

/// Resolve the direct path between `source` and `destination`.
///
/// Returns `None` when the two locations share no stored path. That is the
/// expected outcome for most location pairs on the campus, not an error;
/// multi-hop routing through intermediate locations is deliberately not
/// attempted.
pub fn resolve(graph: &LocationGraph, source: &str, destination: &str) -> Option<ResolvedRoute> {
    let path = graph.path_between(source, destination)?;

    if path.from == source {
        Some(ResolvedRoute {
            source: source.to_string(),
            destination: destination.to_string(),
            direction: Direction::Forward,
            polyline: path.polyline.clone(),
        })
    } else {
        let mut polyline = path.polyline.clone();
        polyline.reverse();
        Some(ResolvedRoute {
            source: source.to_string(),
            destination: destination.to_string(),
            direction: Direction::Reverse,
            polyline,
        })
    }
}
