//! Map module: haversine distance, placeholder routes and geocoding.

pub mod geocoding;
pub mod geometry;
pub mod models;
pub mod requests;
pub mod responses;
pub mod routes;
pub mod services;

// Re-export commonly used items
pub use geocoding::{Geocoder, HttpGeocoder, StaticGeocoder};
pub use geometry::calculate_distance;
pub use models::{Coordinates, RoutePoint};
pub use routes::router;
pub use services::{MapError, MapService};
