//! Projections of campus and session state for external consumers.
//!
//! [`MapView`] is the feed for the map-rendering surface: every stored path
//! with its label, plus the active route as a separate highlighted overlay.
//! [`render_route_text`] backs the CLI's human-readable output.

use std::fmt::Write;

use serde::Serialize;

use crate::dataset::Campus;
use crate::graph::Coordinate;
use crate::session::{SessionState, SessionView};

/// One drawable polyline with its label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapPath {
    pub label: String,
    pub coordinates: Vec<Coordinate>,
}

/// Everything the map-rendering surface needs to draw the campus.
///
/// Every stored path is drawn; the active route, when present, is repeated
/// as a highlighted overlay whose polyline is direction-normalised to start
/// at the session's source.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapView {
    pub paths: Vec<MapPath>,
    pub active: Option<MapPath>,
}

impl MapView {
    /// Build the overlay for a campus and an optional session view.
    pub fn new(campus: &Campus, view: Option<&SessionView>) -> Self {
        let mut paths: Vec<MapPath> = campus
            .graph
            .paths()
            .map(|path| MapPath {
                label: format!("{} → {}", path.from, path.to),
                coordinates: path.polyline.clone(),
            })
            .collect();
        // Stored paths come out of a hash map; sort for a stable feed.
        paths.sort_by(|a, b| a.label.cmp(&b.label));

        let active = view
            .and_then(|view| view.route.as_ref())
            .map(|route| MapPath {
                label: format!("{} → {}", route.source, route.destination),
                coordinates: route.polyline.clone(),
            });

        Self { paths, active }
    }
}

/// Render a session view as human-readable text.
pub fn render_route_text(view: &SessionView) -> String {
    let mut out = String::new();

    match view.state {
        SessionState::Idle | SessionState::SourceSelected => {
            out.push_str("Select a starting point and a destination to view the route.\n");
            return out;
        }
        SessionState::RouteUnavailable => {
            let source = view.source.as_deref().unwrap_or("<unknown>");
            let destination = view.destination.as_deref().unwrap_or("<unknown>");
            let _ = writeln!(out, "No direct route between {source} and {destination}.");
            return out;
        }
        SessionState::RouteActive | SessionState::WardSelected => {}
    }

    let Some(route) = &view.route else {
        return out;
    };

    let _ = writeln!(out, "Route: {} → {}", route.source, route.destination);
    let _ = writeln!(
        out,
        "Distance: {:.2} km (~{} min walk)",
        route.distance_km, route.eta_minutes
    );
    out.push_str("Steps:\n");
    for (index, step) in route.exterior_steps.iter().enumerate() {
        let _ = writeln!(out, "  {}. {}", index + 1, step.text);
    }

    if !route.available_wards.is_empty() {
        let _ = writeln!(out, "Wards in {}:", route.destination);
        for ward in &route.available_wards {
            let _ = writeln!(out, "  - {ward}");
        }
    }

    if let Some(ward) = &route.ward {
        let _ = writeln!(out, "Directions to {}:", ward.name);
        for (index, step) in ward.steps.iter().enumerate() {
            let _ = writeln!(out, "  {}. [{}] {}", index + 1, step.kind.label(), step.text);
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::DeepLink;
    use crate::session::RouteSession;

    const CAMPUS_JSON: &str = r#"{
        "locations": ["Main Gate", "Building 1"],
        "paths": [
            {
                "from": "Main Gate",
                "to": "Building 1",
                "polyline": [[26.8120, 87.2689], [26.8122, 87.2691]]
            }
        ],
        "catalog": {
            "Building 1": {
                "Cardiology": [
                    { "kind": "straight", "text": "Enter the main lobby." },
                    { "kind": "ward", "text": "Cardiology reception is on your right." }
                ]
            }
        }
    }"#;

    fn campus() -> Campus {
        Campus::from_json(CAMPUS_JSON).unwrap()
    }

    #[test]
    fn map_view_lists_every_path() {
        let campus = campus();
        let map = MapView::new(&campus, None);

        assert_eq!(map.paths.len(), 1);
        assert_eq!(map.paths[0].label, "Main Gate → Building 1");
        assert!(map.active.is_none());
    }

    #[test]
    fn map_view_highlights_active_route_in_traversal_order() {
        let campus = campus();
        let link = DeepLink {
            start: Some("Building 1".to_string()),
            destination: Some("Main Gate".to_string()),
            ward: None,
        };
        let view = RouteSession::seeded(&campus, &link).derive();

        let map = MapView::new(&campus, Some(&view));
        let active = map.active.unwrap();
        assert_eq!(active.label, "Building 1 → Main Gate");
        // Reverse traversal starts at the session's source.
        assert_eq!(active.coordinates[0].lat, 26.8122);
    }

    #[test]
    fn idle_view_renders_a_prompt() {
        let campus = campus();
        let view = campus.session().derive();

        let text = render_route_text(&view);
        assert!(text.contains("Select a starting point"));
    }

    #[test]
    fn active_view_renders_steps_and_wards() {
        let campus = campus();
        let link = DeepLink {
            start: Some("Main Gate".to_string()),
            destination: Some("Building 1".to_string()),
            ward: Some("Cardiology".to_string()),
        };
        let view = RouteSession::seeded(&campus, &link).derive();

        let text = render_route_text(&view);
        assert!(text.contains("Route: Main Gate → Building 1"));
        assert!(text.contains("Distance: 0.03 km"));
        assert!(text.contains("1. Start at Main Gate"));
        assert!(text.contains("2. Follow the highlighted path"));
        assert!(text.contains("3. Arrive at Building 1"));
        assert!(text.contains("Wards in Building 1:"));
        assert!(text.contains("Directions to Cardiology:"));
        assert!(text.contains("[ward] Cardiology reception is on your right."));
    }

    #[test]
    fn unavailable_view_renders_no_route_message() {
        let json = r#"{
            "locations": ["Main Gate", "Building 3"],
            "paths": []
        }"#;
        let campus = Campus::from_json(json).unwrap();
        let mut session = campus.session();
        session.set_source(Some("Main Gate"));
        session.set_destination(Some("Building 3"));

        let text = render_route_text(&session.derive());
        assert!(text.contains("No direct route between Main Gate and Building 3."));
    }
}
