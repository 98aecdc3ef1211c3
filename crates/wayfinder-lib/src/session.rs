//! Route session state machine.
//!
//! A [`RouteSession`] holds the user's current source, destination, and
//! ward selections for one visit to the wayfinding feature. Every output —
//! resolved polyline, distance, time estimate, instruction lists — is a
//! pure projection of those three fields over the immutable campus data,
//! recomputed by [`RouteSession::derive`] on demand so it can never go
//! stale across transitions.
//!
//! Transitions are expressed as [`SessionEvent`]s applied through a single
//! [`RouteSession::apply`] function. Invalid events (unknown names, ward
//! selection without an active route) are ignored rather than surfaced as
//! errors: the session always settles in the nearest valid state, which is
//! also what makes deep-link seeding safe against stale parameters.

use serde::Serialize;
use tracing::debug;

use crate::catalog::{Step, StepKind};
use crate::dataset::Campus;
use crate::distance::{estimate, RouteEstimate};
use crate::graph::Coordinate;
use crate::route::{resolve, Direction, ResolvedRoute};

/// User-driven session transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    /// Choose (or clear) the starting location.
    SetSource(Option<String>),
    /// Choose (or clear) the destination location.
    SetDestination(Option<String>),
    /// Choose a ward inside the destination building.
    SelectWard(String),
    /// Return to the initial state.
    Reset,
}

/// Discrete states of a wayfinding session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    /// No source chosen.
    Idle,
    /// Source chosen, destination still open.
    SourceSelected,
    /// Source and destination chosen and directly connected.
    RouteActive,
    /// Source and destination chosen but no direct path exists.
    RouteUnavailable,
    /// Active route plus a ward chosen inside the destination building.
    WardSelected,
}

/// Deep-link parameters that pre-seed a session.
///
/// Unrecognised or mismatched values are silently ignored during seeding;
/// the session falls back to the nearest valid state instead of erroring.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeepLink {
    pub start: Option<String>,
    pub destination: Option<String>,
    pub ward: Option<String>,
}

/// Indoor directions for the selected ward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WardDirections {
    pub name: String,
    pub steps: Vec<Step>,
}

/// Fully derived outputs for an active route.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActiveRoute {
    pub source: String,
    pub destination: String,
    pub direction: Direction,
    pub polyline: Vec<Coordinate>,
    pub distance_km: f64,
    pub eta_minutes: u32,
    /// The three exterior instructions: start, follow, arrive.
    pub exterior_steps: Vec<Step>,
    /// Wards selectable at the destination; empty hides ward selection.
    pub available_wards: Vec<String>,
    /// Indoor directions, present only when a ward is selected.
    pub ward: Option<WardDirections>,
}

/// Snapshot of the session state plus every derived output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionView {
    pub state: SessionState,
    pub source: Option<String>,
    pub destination: Option<String>,
    /// Present in `RouteActive` and `WardSelected` states.
    pub route: Option<ActiveRoute>,
}

/// Per-interaction wayfinding session over an immutable campus.
///
/// Sessions are transient: one is created when the feature is entered
/// (optionally seeded from a deep link) and discarded when it is exited.
/// They own no data beyond the three selection fields.
#[derive(Debug, Clone)]
pub struct RouteSession<'a> {
    campus: &'a Campus,
    source: Option<String>,
    destination: Option<String>,
    selected_ward: Option<String>,
}

impl<'a> RouteSession<'a> {
    /// Create an empty session in the `Idle` state.
    pub fn new(campus: &'a Campus) -> Self {
        Self {
            campus,
            source: None,
            destination: None,
            selected_ward: None,
        }
    }

    /// Create a session pre-seeded from deep-link parameters.
    ///
    /// Parameters are applied in order (source, destination, ward), each
    /// through the normal event path, so invalid values degrade to the
    /// nearest valid state exactly as interactive selections would.
    pub fn seeded(campus: &'a Campus, link: &DeepLink) -> Self {
        let mut session = Self::new(campus);
        if let Some(start) = &link.start {
            session.apply(SessionEvent::SetSource(Some(start.clone())));
        }
        if let Some(destination) = &link.destination {
            session.apply(SessionEvent::SetDestination(Some(destination.clone())));
        }
        if let Some(ward) = &link.ward {
            session.apply(SessionEvent::SelectWard(ward.clone()));
        }
        session
    }

    /// Apply one transition event.
    ///
    /// Events that do not make sense in the current state are no-ops and
    /// leave every field untouched.
    pub fn apply(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::SetSource(None) | SessionEvent::Reset => {
                self.source = None;
                self.destination = None;
                self.selected_ward = None;
            }
            SessionEvent::SetSource(Some(name)) => {
                if !self.campus.graph.contains(&name) {
                    debug!(%name, "ignoring unknown source location");
                    return;
                }
                // Changing the start point invalidates any in-progress route.
                self.source = Some(name);
                self.destination = None;
                self.selected_ward = None;
            }
            SessionEvent::SetDestination(None) => {
                self.destination = None;
                self.selected_ward = None;
            }
            SessionEvent::SetDestination(Some(name)) => {
                if self.source.is_none() {
                    debug!(%name, "ignoring destination before a source is chosen");
                    return;
                }
                if !self.campus.graph.contains(&name) {
                    debug!(%name, "ignoring unknown destination location");
                    return;
                }
                self.destination = Some(name);
                self.selected_ward = None;
            }
            SessionEvent::SelectWard(name) => {
                let selectable = matches!(
                    self.state(),
                    SessionState::RouteActive | SessionState::WardSelected
                );
                let registered = self
                    .destination
                    .as_deref()
                    .map(|destination| self.campus.catalog.steps_for(destination, &name).is_some())
                    .unwrap_or(false);
                if !selectable || !registered {
                    debug!(ward = %name, "ignoring ward selection outside an active route");
                    return;
                }
                self.selected_ward = Some(name);
            }
        }
    }

    /// Convenience wrapper for [`SessionEvent::SetSource`].
    pub fn set_source(&mut self, name: Option<&str>) {
        self.apply(SessionEvent::SetSource(name.map(str::to_string)));
    }

    /// Convenience wrapper for [`SessionEvent::SetDestination`].
    pub fn set_destination(&mut self, name: Option<&str>) {
        self.apply(SessionEvent::SetDestination(name.map(str::to_string)));
    }

    /// Convenience wrapper for [`SessionEvent::SelectWard`].
    pub fn select_ward(&mut self, name: &str) {
        self.apply(SessionEvent::SelectWard(name.to_string()));
    }

    /// Convenience wrapper for [`SessionEvent::Reset`].
    pub fn reset(&mut self) {
        self.apply(SessionEvent::Reset);
    }

    /// Currently selected source location.
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// Currently selected destination location.
    pub fn destination(&self) -> Option<&str> {
        self.destination.as_deref()
    }

    /// Currently selected ward.
    pub fn selected_ward(&self) -> Option<&str> {
        self.selected_ward.as_deref()
    }

    /// Current discrete state, computed from the selection fields.
    pub fn state(&self) -> SessionState {
        match (&self.source, &self.destination) {
            (None, _) => SessionState::Idle,
            (Some(_), None) => SessionState::SourceSelected,
            (Some(source), Some(destination)) => {
                if resolve(&self.campus.graph, source, destination).is_some() {
                    if self.selected_ward.is_some() {
                        SessionState::WardSelected
                    } else {
                        SessionState::RouteActive
                    }
                } else {
                    SessionState::RouteUnavailable
                }
            }
        }
    }

    /// Project the session into its full derived view.
    pub fn derive(&self) -> SessionView {
        SessionView {
            state: self.state(),
            source: self.source.clone(),
            destination: self.destination.clone(),
            route: self.resolved().map(|resolved| self.active_route(resolved)),
        }
    }

    fn resolved(&self) -> Option<ResolvedRoute> {
        let source = self.source.as_deref()?;
        let destination = self.destination.as_deref()?;
        resolve(&self.campus.graph, source, destination)
    }

    fn active_route(&self, resolved: ResolvedRoute) -> ActiveRoute {
        let RouteEstimate {
            distance_km,
            eta_minutes,
        } = estimate(&resolved.polyline);

        let exterior_steps = exterior_steps(&resolved.source, &resolved.destination);
        let available_wards = self
            .campus
            .catalog
            .wards_for(&resolved.destination)
            .into_iter()
            .map(str::to_string)
            .collect();
        let ward = self.selected_ward.as_ref().and_then(|name| {
            self.campus
                .catalog
                .steps_for(&resolved.destination, name)
                .map(|steps| WardDirections {
                    name: name.clone(),
                    steps: steps.to_vec(),
                })
        });

        ActiveRoute {
            source: resolved.source,
            destination: resolved.destination,
            direction: resolved.direction,
            polyline: resolved.polyline,
            distance_km,
            eta_minutes,
            exterior_steps,
            available_wards,
            ward,
        }
    }
}

fn exterior_steps(source: &str, destination: &str) -> Vec<Step> {
    vec![
        Step::new(StepKind::Start, format!("Start at {source}")),
        Step::new(StepKind::Path, "Follow the highlighted path"),
        Step::new(StepKind::Destination, format!("Arrive at {destination}")),
    ]
}
