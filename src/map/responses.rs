//! Response DTOs for map API endpoints.

use serde::Serialize;

use super::models::{Coordinates, RoutePoint};

#[derive(Debug, Serialize)]
pub struct DistanceResponse {
    pub distance_km: f64,
}

/// Route polyline; `synthetic` is always true until a routing engine is wired in
#[derive(Debug, Serialize)]
pub struct RouteResponse {
    pub points: Vec<RoutePoint>,
    pub synthetic: bool,
    /// Straight two-point fallback instead of the curved placeholder
    pub straight_line: bool,
}

#[derive(Debug, Serialize)]
pub struct GeocodeResponse {
    pub query: String,
    pub coordinates: Coordinates,
    pub cached: bool,
}

#[derive(Debug, Serialize)]
pub struct ReverseGeocodeResponse {
    pub coordinates: Coordinates,
    pub display_name: String,
    pub cached: bool,
}
