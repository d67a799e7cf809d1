//! Pricing API route handlers

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use chrono::{Local, Utc};
use uuid::Uuid;

use crate::error::Result;
use crate::map::routes::validate_coordinates;
use crate::AppState;

use super::calculators::commission_rate;
use super::models::PriceBreakdown;
use super::requests::{CalculatePriceRequest, PreviewPriceRequest, QuoteRequest};
use super::responses::{PriceBreakdownResponse, PricingConfigResponse, QuoteResponse};
use super::services::PricingService;

/// Pricing routes, mounted under `/api/pricing`
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/config", get(get_config))
        .route("/calculate", post(calculate))
        .route("/quote", post(quote))
        .route("/preview", post(preview))
}

fn breakdown_response(service: &PricingService, breakdown: PriceBreakdown) -> PriceBreakdownResponse {
    PriceBreakdownResponse {
        summary: service.format_price_breakdown(&breakdown),
        currency: service.config().currency.clone(),
        commission_rate: commission_rate(service.config()),
        breakdown,
    }
}

/// Current pricing configuration
pub async fn get_config(State(state): State<AppState>) -> Json<PricingConfigResponse> {
    let config = state.pricing.config();
    Json(PricingConfigResponse {
        commission_rate: commission_rate(config),
        config: config.clone(),
    })
}

/// Price a trip of known distance
pub async fn calculate(
    State(state): State<AppState>,
    Json(request): Json<CalculatePriceRequest>,
) -> Result<Json<PriceBreakdownResponse>> {
    let options = request.flags.to_options_at(request.distance, &Local::now())?;
    let breakdown = state.pricing.calculate_price(&options);
    Ok(Json(breakdown_response(&state.pricing, breakdown)))
}

/// Measure, route and price a trip between pickup and dropoff
pub async fn quote(
    State(state): State<AppState>,
    Json(request): Json<QuoteRequest>,
) -> Result<Json<QuoteResponse>> {
    validate_coordinates("pickup", &request.pickup)?;
    validate_coordinates("dropoff", &request.dropoff)?;

    let distance_km = state
        .map
        .calculate_distance(&request.pickup, &request.dropoff);
    let route = state.map.get_route(&request.pickup, &request.dropoff);

    let options = request.flags.to_options_at(distance_km, &Local::now())?;
    let breakdown = state.pricing.calculate_price(&options);

    let quote_id = Uuid::new_v4();
    tracing::info!(
        %quote_id,
        distance_km,
        total = breakdown.total,
        "Quote issued"
    );

    Ok(Json(QuoteResponse {
        quote_id,
        quoted_at: Utc::now(),
        distance_km,
        route,
        price: breakdown_response(&state.pricing, breakdown),
    }))
}

/// Price a trip under candidate settings without changing the active ones
pub async fn preview(Json(request): Json<PreviewPriceRequest>) -> Result<Json<PriceBreakdownResponse>> {
    let service = PricingService::new(request.config)?;
    let options = request.flags.to_options_at(request.distance, &Local::now())?;
    let breakdown = service.calculate_price(&options);
    Ok(Json(breakdown_response(&service, breakdown)))
}
