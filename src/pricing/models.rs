//! Pricing data model.
//!
//! `PricingConfig` is the immutable fare configuration, `PriceCalculationOptions`
//! describes one trip and `PriceBreakdown` is the itemized result.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Fare configuration, loaded once and shared read-only.
///
/// Percentages are expressed in whole percent (`20` means 20 %).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingConfig {
    pub base_fare: Decimal,
    pub per_kilometer_rate: Decimal,
    pub minimum_charge: Decimal,
    pub fragile_percent: Decimal,
    pub insurance_percent: Decimal,
    pub after_hours_percent: Decimal,
    pub weekend_percent: Decimal,
    /// Flat charge per minute once the free wait window is used up
    pub wait_time_rate_per_minute: Decimal,
    #[serde(default = "default_free_wait_minutes")]
    pub free_wait_minutes: u32,
    pub commission_min_percent: Decimal,
    pub commission_max_percent: Decimal,
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_free_wait_minutes() -> u32 {
    5
}

fn default_currency() -> String {
    "ETB".to_string()
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            base_fare: dec!(80),
            per_kilometer_rate: dec!(11),
            minimum_charge: dec!(150),
            fragile_percent: dec!(20),
            insurance_percent: dec!(10),
            after_hours_percent: dec!(25),
            weekend_percent: dec!(15),
            wait_time_rate_per_minute: dec!(5),
            free_wait_minutes: default_free_wait_minutes(),
            commission_min_percent: dec!(15),
            commission_max_percent: dec!(20),
            currency: default_currency(),
        }
    }
}

impl PricingConfig {
    /// Check the configuration for values the calculator cannot price with.
    ///
    /// Returns every problem found rather than stopping at the first one.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        let amounts = [
            ("base_fare", self.base_fare),
            ("per_kilometer_rate", self.per_kilometer_rate),
            ("minimum_charge", self.minimum_charge),
            ("wait_time_rate_per_minute", self.wait_time_rate_per_minute),
        ];
        for (name, value) in amounts {
            if value < Decimal::ZERO {
                errors.push(format!("{} must not be negative", name));
            }
        }

        let percentages = [
            ("fragile_percent", self.fragile_percent),
            ("insurance_percent", self.insurance_percent),
            ("after_hours_percent", self.after_hours_percent),
            ("weekend_percent", self.weekend_percent),
            ("commission_min_percent", self.commission_min_percent),
            ("commission_max_percent", self.commission_max_percent),
        ];
        for (name, value) in percentages {
            if value < Decimal::ZERO || value > dec!(100) {
                errors.push(format!("{} must be between 0 and 100", name));
            }
        }

        if self.commission_min_percent > self.commission_max_percent {
            errors.push("commission_min_percent exceeds commission_max_percent".to_string());
        }

        if self.currency.trim().is_empty() {
            errors.push("currency must not be empty".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Trip attributes for a single fare calculation.
///
/// Distance must be non-negative; that is checked by callers, not here.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceCalculationOptions {
    /// Trip distance in kilometers
    pub distance: f64,
    pub is_fragile: bool,
    pub has_insurance: bool,
    pub is_after_hours: bool,
    pub is_weekend: bool,
    pub wait_time_minutes: u32,
}

impl PriceCalculationOptions {
    /// Options for a plain trip with every surcharge flag off
    pub fn new(distance: f64) -> Self {
        Self {
            distance,
            ..Default::default()
        }
    }
}

/// Itemized fare, in whole currency units.
///
/// `total` always equals `subtotal` plus every surcharge, and
/// `driver_earnings + company_commission` always equals `total`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PriceBreakdown {
    pub base_fare: i64,
    pub distance_fee: i64,
    pub subtotal: i64,
    pub fragile_charge: i64,
    pub insurance_charge: i64,
    pub after_hours_charge: i64,
    pub weekend_charge: i64,
    pub wait_time_charge: i64,
    pub total: i64,
    pub driver_earnings: i64,
    pub company_commission: i64,
}

impl PriceBreakdown {
    /// Sum of every surcharge line
    pub fn surcharges(&self) -> i64 {
        self.fragile_charge
            + self.insurance_charge
            + self.after_hours_charge
            + self.weekend_charge
            + self.wait_time_charge
    }
}
