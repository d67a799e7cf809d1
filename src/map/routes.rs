//! Map API route handlers

use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};

use crate::cache::AppCache;
use crate::error::{AppError, Result};
use crate::AppState;

use super::models::Coordinates;
use super::requests::{GeocodeQuery, ReverseGeocodeQuery, SegmentRequest};
use super::responses::{DistanceResponse, GeocodeResponse, ReverseGeocodeResponse, RouteResponse};

/// Map routes, mounted under `/api/map`
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/distance", post(distance))
        .route("/route", post(route))
        .route("/geocode", get(geocode))
        .route("/reverse", get(reverse_geocode))
        .route("/cache", delete(flush_cache))
}

/// Reject coordinates outside the valid latitude/longitude ranges
pub fn validate_coordinates(field: &str, coordinates: &Coordinates) -> Result<()> {
    if coordinates.is_valid() {
        Ok(())
    } else {
        Err(AppError::BadRequest(format!(
            "{} is not a valid latitude/longitude pair",
            field
        )))
    }
}

/// Straight-line distance between two points
pub async fn distance(
    State(state): State<AppState>,
    Json(request): Json<SegmentRequest>,
) -> Result<Json<DistanceResponse>> {
    validate_coordinates("start", &request.start)?;
    validate_coordinates("end", &request.end)?;

    Ok(Json(DistanceResponse {
        distance_km: state.map.calculate_distance(&request.start, &request.end),
    }))
}

/// Placeholder route polyline between two points
pub async fn route(
    State(state): State<AppState>,
    Json(request): Json<SegmentRequest>,
) -> Result<Json<RouteResponse>> {
    validate_coordinates("start", &request.start)?;
    validate_coordinates("end", &request.end)?;

    let points = state.map.get_route(&request.start, &request.end);
    Ok(Json(RouteResponse {
        straight_line: points.len() == 2,
        synthetic: true,
        points,
    }))
}

/// Address to coordinates
pub async fn geocode(
    State(state): State<AppState>,
    Query(query): Query<GeocodeQuery>,
) -> Result<Json<GeocodeResponse>> {
    let key = AppCache::geocode_key(&query.q);
    if key.is_empty() {
        return Err(AppError::BadRequest("q must not be empty".to_string()));
    }

    if let Some(coordinates) = state.cache.geocode.get(&key).await {
        tracing::debug!("Cache HIT for geocode: {}", key);
        return Ok(Json(GeocodeResponse {
            query: query.q,
            coordinates,
            cached: true,
        }));
    }
    tracing::debug!("Cache MISS for geocode: {}", key);

    let coordinates = state
        .map
        .geocode_address(&query.q)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Location not found: {}", query.q)))?;

    state.cache.geocode.insert(key, coordinates).await;

    Ok(Json(GeocodeResponse {
        query: query.q,
        coordinates,
        cached: false,
    }))
}

/// Coordinates to display address
pub async fn reverse_geocode(
    State(state): State<AppState>,
    Query(query): Query<ReverseGeocodeQuery>,
) -> Result<Json<ReverseGeocodeResponse>> {
    let coordinates = Coordinates::new(query.lat, query.lon);
    validate_coordinates("lat/lon", &coordinates)?;

    let key = AppCache::reverse_key(&coordinates);
    if let Some(display_name) = state.cache.reverse.get(&key).await {
        tracing::debug!("Cache HIT for reverse geocode: {}", key);
        return Ok(Json(ReverseGeocodeResponse {
            coordinates,
            display_name,
            cached: true,
        }));
    }
    tracing::debug!("Cache MISS for reverse geocode: {}", key);

    let display_name = state
        .map
        .reverse_geocode(&coordinates)
        .await
        .ok_or_else(|| AppError::NotFound("No address found for location".to_string()))?;

    state.cache.reverse.insert(key, display_name.clone()).await;

    Ok(Json(ReverseGeocodeResponse {
        coordinates,
        display_name,
        cached: false,
    }))
}

/// Drop every cached geocoding result (admin)
pub async fn flush_cache(State(state): State<AppState>) -> StatusCode {
    state.cache.invalidate_all();
    StatusCode::NO_CONTENT
}
