//! Request DTOs for map API endpoints.

use serde::Deserialize;

use super::models::Coordinates;

/// Pair of points for distance and route requests
#[derive(Debug, Deserialize)]
pub struct SegmentRequest {
    pub start: Coordinates,
    pub end: Coordinates,
}

/// Forward geocoding query string (`?q=`)
#[derive(Debug, Deserialize)]
pub struct GeocodeQuery {
    pub q: String,
}

/// Reverse geocoding query string (`?lat=&lon=`)
#[derive(Debug, Deserialize)]
pub struct ReverseGeocodeQuery {
    pub lat: f64,
    pub lon: f64,
}
