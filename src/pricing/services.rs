//! Pricing service.
//!
//! Wraps the pure calculators with a validated, shared configuration and
//! derives the time-based surcharge flags from the wall clock.

use std::sync::Arc;

use chrono::{Datelike, Local, Timelike, Weekday};

use super::calculators;
use super::models::{PriceBreakdown, PriceCalculationOptions, PricingConfig};

/// Evening hour (local) from which after-hours pricing applies
pub const AFTER_HOURS_START: u32 = 19;
/// Morning hour (local) at which after-hours pricing ends
pub const AFTER_HOURS_END: u32 = 6;

/// Pricing calculation error types
#[derive(Debug, Clone)]
pub enum PricingError {
    ConfigurationError {
        message: String,
        errors: Vec<String>,
    },
}

impl std::fmt::Display for PricingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PricingError::ConfigurationError { message, errors } => {
                write!(f, "Configuration error: {}", message)?;
                if !errors.is_empty() {
                    write!(f, " ({})", errors.join("; "))?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for PricingError {}

/// Fare calculator bound to one immutable configuration.
///
/// Cheap to clone; the configuration is shared.
#[derive(Debug, Clone)]
pub struct PricingService {
    config: Arc<PricingConfig>,
}

impl PricingService {
    /// Build a service, rejecting configurations the calculator cannot use.
    pub fn new(config: PricingConfig) -> Result<Self, PricingError> {
        config
            .validate()
            .map_err(|errors| PricingError::ConfigurationError {
                message: "Invalid pricing configuration".to_string(),
                errors,
            })?;

        Ok(Self {
            config: Arc::new(config),
        })
    }

    pub fn config(&self) -> &PricingConfig {
        &self.config
    }

    /// Calculate the fare breakdown for a trip.
    pub fn calculate_price(&self, options: &PriceCalculationOptions) -> PriceBreakdown {
        let breakdown = calculators::calculate_price(options, &self.config);
        tracing::debug!(
            distance_km = options.distance,
            total = breakdown.total,
            "Calculated fare"
        );
        breakdown
    }

    /// Human-readable summary in the configured currency
    pub fn format_price_breakdown(&self, breakdown: &PriceBreakdown) -> String {
        calculators::format_price_breakdown(breakdown, &self.config.currency)
    }
}

/// Whether `time` falls in the after-hours window (19:00 to 05:59).
pub fn is_after_hours_at<T: Timelike>(time: &T) -> bool {
    let hour = time.hour();
    hour >= AFTER_HOURS_START || hour < AFTER_HOURS_END
}

/// Whether `date` is a Saturday or Sunday.
pub fn is_weekend_at<T: Datelike>(date: &T) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// After-hours check against the local clock, evaluated on every call
pub fn is_after_hours() -> bool {
    is_after_hours_at(&Local::now())
}

/// Weekend check against the local clock, evaluated on every call
pub fn is_weekend() -> bool {
    is_weekend_at(&Local::now())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(year, month, day)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    #[test]
    fn test_pricing_error_display() {
        let err = PricingError::ConfigurationError {
            message: "test error".to_string(),
            errors: vec!["base_fare must not be negative".to_string()],
        };
        let text = err.to_string();
        assert!(text.contains("test error"));
        assert!(text.contains("base_fare"));
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = PricingConfig {
            commission_min_percent: dec!(25),
            ..Default::default()
        };
        let err = PricingService::new(config).unwrap_err();
        let PricingError::ConfigurationError { errors, .. } = err;
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_service_delegates_to_calculator() {
        let service = PricingService::new(PricingConfig::default()).unwrap();
        let breakdown = service.calculate_price(&PriceCalculationOptions::new(5.0));
        assert_eq!(breakdown.total, 150);
        assert!(service
            .format_price_breakdown(&breakdown)
            .contains("Total: 150 ETB"));
    }

    #[test]
    fn test_after_hours_window() {
        assert!(!is_after_hours_at(&at(2026, 10, 14, 6, 0)));
        assert!(!is_after_hours_at(&at(2026, 10, 14, 12, 30)));
        assert!(!is_after_hours_at(&at(2026, 10, 14, 18, 59)));
        assert!(is_after_hours_at(&at(2026, 10, 14, 19, 0)));
        assert!(is_after_hours_at(&at(2026, 10, 14, 23, 59)));
        assert!(is_after_hours_at(&at(2026, 10, 14, 0, 0)));
        assert!(is_after_hours_at(&at(2026, 10, 14, 5, 59)));
    }

    #[test]
    fn test_weekend_days() {
        // 2026-10-17 is a Saturday
        assert!(is_weekend_at(&at(2026, 10, 17, 10, 0)));
        assert!(is_weekend_at(&at(2026, 10, 18, 10, 0)));
        assert!(!is_weekend_at(&at(2026, 10, 19, 10, 0)));
        assert!(!is_weekend_at(&at(2026, 10, 16, 23, 0)));
    }

    #[test]
    fn test_clock_checks_match_local_time() {
        // Skip the comparison if the call straddled an hour or day boundary
        let before = Local::now();
        let flag = is_after_hours();
        let after = Local::now();
        if before.hour() == after.hour() {
            assert_eq!(flag, is_after_hours_at(&before));
        }
        if before.weekday() == after.weekday() {
            assert_eq!(is_weekend(), is_weekend_at(&before));
        }
    }
}
