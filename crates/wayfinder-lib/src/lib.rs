//! Campus wayfinding library entry points.
//!
//! This crate loads a campus dataset (named locations, direct walking paths
//! with coordinate polylines, and an indoor directions catalog), resolves
//! routes between directly connected locations, estimates walking distance
//! and time, and tracks the user's selections in a [`session::RouteSession`]
//! state machine. Higher-level consumers (the CLI, the booking application
//! shell) should depend on the items exported here instead of reimplementing
//! behavior.

#![deny(warnings)]

pub mod catalog;
pub mod dataset;
pub mod distance;
pub mod error;
pub mod graph;
pub mod output;
pub mod route;
pub mod session;

pub use catalog::{IndoorCatalog, Step, StepKind};
pub use dataset::Campus;
pub use distance::{estimate, haversine_km, RouteEstimate};
pub use error::{Error, Result};
pub use graph::{CampusPath, Coordinate, LocationGraph};
pub use output::{render_route_text, MapPath, MapView};
pub use route::{resolve, Direction, ResolvedRoute};
pub use session::{
    ActiveRoute, DeepLink, RouteSession, SessionEvent, SessionState, SessionView, WardDirections,
};
