//! Response DTOs for pricing API endpoints.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use crate::map::RoutePoint;

use super::models::{PriceBreakdown, PricingConfig};

/// Fare breakdown with display metadata
#[derive(Debug, Serialize)]
pub struct PriceBreakdownResponse {
    #[serde(flatten)]
    pub breakdown: PriceBreakdown,
    pub currency: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub commission_rate: Decimal,
    pub summary: String,
}

/// Priced trip between two points
#[derive(Debug, Serialize)]
pub struct QuoteResponse {
    pub quote_id: Uuid,
    pub quoted_at: DateTime<Utc>,
    pub distance_km: f64,
    pub route: Vec<RoutePoint>,
    pub price: PriceBreakdownResponse,
}

/// Active pricing configuration
#[derive(Debug, Serialize)]
pub struct PricingConfigResponse {
    #[serde(flatten)]
    pub config: PricingConfig,
    #[serde(with = "rust_decimal::serde::str")]
    pub commission_rate: Decimal,
}
