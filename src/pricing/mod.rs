//! Pricing engine module.
//!
//! Fare breakdowns for parcel trips: base fare, per-kilometer fee,
//! minimum-charge clamp, surcharges and the driver/platform split.

pub mod calculators;
pub mod models;
pub mod requests;
pub mod responses;
pub mod routes;
pub mod services;

// Re-export commonly used items
pub use calculators::{
    calculate_price, commission_rate, format_price_breakdown, round_fare, MAX_TRIP_DISTANCE_KM,
};
pub use models::{PriceBreakdown, PriceCalculationOptions, PricingConfig};
pub use routes::router;
pub use services::{is_after_hours, is_weekend, PricingError, PricingService};
