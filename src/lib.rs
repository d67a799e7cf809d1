//! Courier core: fare computation and map utilities for the parcel
//! delivery client, driver and admin apps, served as a JSON API.

pub mod cache;
pub mod config;
pub mod error;
pub mod map;
pub mod pricing;

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::cache::{AppCache, CacheStats};
use crate::config::Config;
use crate::map::{Geocoder, HttpGeocoder, MapService, StaticGeocoder};
use crate::pricing::{PricingError, PricingService};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub pricing: PricingService,
    pub map: MapService,
    pub cache: AppCache,
}

impl AppState {
    pub fn new(pricing: PricingService, map: MapService, cache: AppCache) -> Self {
        Self {
            pricing,
            map,
            cache,
        }
    }

    /// Build state from configuration, validating the pricing settings
    pub fn from_config(config: &Config) -> Result<Self, PricingError> {
        let pricing = PricingService::new(config.pricing.clone())?;

        let geocoder: Arc<dyn Geocoder> = match &config.geocoder_api_key {
            Some(key) => Arc::new(HttpGeocoder::new(&config.geocoder_base_url, key)),
            None => {
                tracing::warn!("GEOCODER_API_KEY not set, geocoding will find nothing");
                Arc::new(StaticGeocoder::new())
            }
        };

        Ok(Self::new(
            pricing,
            MapService::new(geocoder),
            AppCache::new(config.geocode_cache_ttl),
        ))
    }
}

#[derive(serde::Serialize)]
struct HealthResponse {
    status: &'static str,
    cache: CacheStats,
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        cache: state.cache.stats(),
    })
}

/// Full application router with tracing and CORS layers
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .nest("/api/pricing", pricing::router())
        .nest("/api/map", map::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
