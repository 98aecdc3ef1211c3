//! Walking distance and time estimation over route polylines.
//!
//! Distances are great-circle (haversine) sums over consecutive coordinate
//! pairs; time estimates assume a fixed average walking pace.

use serde::Serialize;

use crate::graph::Coordinate;

/// Constants used by the estimator.
pub mod constants {
    /// Mean Earth radius in kilometres, as used by the haversine formula.
    pub const EARTH_RADIUS_KM: f64 = 6371.0;

    /// Average walking pace in minutes per kilometre (5 km/h).
    pub const PACE_MINUTES_PER_KM: f64 = 12.0;
}

/// Walking distance and time estimate for a route polyline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RouteEstimate {
    /// Total walking distance in kilometres, rounded to two decimal places.
    pub distance_km: f64,
    /// Estimated walking time, rounded to the nearest whole minute.
    pub eta_minutes: u32,
}

/// Great-circle distance between two coordinates in kilometres.
///
/// Spherical-Earth haversine; symmetric in its arguments.
pub fn haversine_km(a: Coordinate, b: Coordinate) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lon = (b.lon - a.lon).to_radians();
    let h = (d_lat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    constants::EARTH_RADIUS_KM * c
}

/// Estimate walking distance and time for a polyline.
///
/// Sums the haversine distance of every consecutive coordinate pair. The
/// total is direction independent: reversing the polyline produces the same
/// rounded distance, so both traversals of a path report identical numbers.
pub fn estimate(polyline: &[Coordinate]) -> RouteEstimate {
    let total: f64 = polyline
        .windows(2)
        .map(|pair| haversine_km(pair[0], pair[1]))
        .sum();
    let distance_km = round_2dp(total);
    let eta_minutes = (distance_km * constants::PACE_MINUTES_PER_KM).round() as u32;

    RouteEstimate {
        distance_km,
        eta_minutes,
    }
}

fn round_2dp(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
