//! Map service.
//!
//! Geometry is computed locally; geocoding goes through a `Geocoder`.
//! Nothing here returns an error to the caller: failed lookups become `None`
//! and a route that cannot be synthesized falls back to a straight line.

use std::sync::Arc;

use tracing::{debug, warn};

use super::geocoding::Geocoder;
use super::geometry::{self, DEFAULT_ROUTE_SEGMENTS};
use super::models::{Coordinates, RoutePoint};

/// Failures inside the map module. Never surfaced by `MapService`.
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Geocoding provider returned status {0}")]
    Status(u16),

    #[error("Invalid geocoding response: {0}")]
    InvalidResponse(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Map utilities shared by the quote and tracking screens.
#[derive(Clone)]
pub struct MapService {
    geocoder: Arc<dyn Geocoder>,
    route_segments: usize,
}

impl MapService {
    pub fn new(geocoder: Arc<dyn Geocoder>) -> Self {
        Self {
            geocoder,
            route_segments: DEFAULT_ROUTE_SEGMENTS,
        }
    }

    /// Override the number of synthetic route segments
    pub fn with_route_segments(mut self, segments: usize) -> Self {
        self.route_segments = segments;
        self
    }

    /// Great-circle distance in kilometers
    pub fn calculate_distance(&self, start: &Coordinates, end: &Coordinates) -> f64 {
        geometry::calculate_distance(start, end)
    }

    /// Placeholder route from `start` to `end`.
    ///
    /// Returns `route_segments + 1` curved points, or exactly `[start, end]`
    /// when the curve cannot be generated.
    pub fn get_route(&self, start: &Coordinates, end: &Coordinates) -> Vec<RoutePoint> {
        match geometry::synthesize_route(start, end, self.route_segments) {
            Ok(points) => points,
            Err(e) => {
                warn!("Route synthesis failed, using straight line: {}", e);
                vec![*start, *end]
            }
        }
    }

    /// Look up an address; `None` when not found or the provider failed.
    pub async fn geocode_address(&self, address: &str) -> Option<Coordinates> {
        if address.trim().is_empty() {
            return None;
        }

        match self.geocoder.search(address).await {
            Ok(Some(coordinates)) => Some(coordinates),
            Ok(None) => {
                debug!("No geocoding match for '{}'", address);
                None
            }
            Err(e) => {
                warn!("Geocoding '{}' failed: {}", address, e);
                None
            }
        }
    }

    /// Display address for a point; `None` when not found or the provider failed.
    pub async fn reverse_geocode(&self, coordinates: &Coordinates) -> Option<String> {
        match self.geocoder.reverse(coordinates).await {
            Ok(Some(name)) => Some(name),
            Ok(None) => {
                debug!("No reverse geocoding match for {:?}", coordinates);
                None
            }
            Err(e) => {
                warn!("Reverse geocoding {:?} failed: {}", coordinates, e);
                None
            }
        }
    }
}
