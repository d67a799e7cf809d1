//! Runtime configuration from environment variables (`.env` is loaded by main).

use std::str::FromStr;
use std::time::Duration;

use crate::pricing::PricingConfig;

const DEFAULT_GEOCODER_BASE_URL: &str = "https://us1.locationiq.com/v1";

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value '{value}' for {key}: {reason}")]
    Invalid {
        key: String,
        value: String,
        reason: String,
    },
}

/// Service configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub geocoder_base_url: String,
    /// Geocoding is served from an empty local table when unset
    pub geocoder_api_key: Option<String>,
    pub geocode_cache_ttl: Duration,
    pub pricing: PricingConfig,
}

impl Config {
    /// Read configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = PricingConfig::default();

        let pricing = PricingConfig {
            base_fare: parse_var(&lookup, "PRICING_BASE_FARE", defaults.base_fare)?,
            per_kilometer_rate: parse_var(&lookup, "PRICING_PER_KM_RATE", defaults.per_kilometer_rate)?,
            minimum_charge: parse_var(&lookup, "PRICING_MINIMUM_CHARGE", defaults.minimum_charge)?,
            fragile_percent: parse_var(&lookup, "PRICING_FRAGILE_PERCENT", defaults.fragile_percent)?,
            insurance_percent: parse_var(
                &lookup,
                "PRICING_INSURANCE_PERCENT",
                defaults.insurance_percent,
            )?,
            after_hours_percent: parse_var(
                &lookup,
                "PRICING_AFTER_HOURS_PERCENT",
                defaults.after_hours_percent,
            )?,
            weekend_percent: parse_var(&lookup, "PRICING_WEEKEND_PERCENT", defaults.weekend_percent)?,
            wait_time_rate_per_minute: parse_var(
                &lookup,
                "PRICING_WAIT_RATE_PER_MINUTE",
                defaults.wait_time_rate_per_minute,
            )?,
            free_wait_minutes: parse_var(
                &lookup,
                "PRICING_FREE_WAIT_MINUTES",
                defaults.free_wait_minutes,
            )?,
            commission_min_percent: parse_var(
                &lookup,
                "PRICING_COMMISSION_MIN_PERCENT",
                defaults.commission_min_percent,
            )?,
            commission_max_percent: parse_var(
                &lookup,
                "PRICING_COMMISSION_MAX_PERCENT",
                defaults.commission_max_percent,
            )?,
            currency: lookup("PRICING_CURRENCY").unwrap_or(defaults.currency),
        };

        let ttl_secs: u64 = parse_var(&lookup, "GEOCODE_CACHE_TTL_SECS", 60 * 60)?;

        Ok(Self {
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_var(&lookup, "PORT", 8080)?,
            geocoder_base_url: lookup("GEOCODER_BASE_URL")
                .unwrap_or_else(|| DEFAULT_GEOCODER_BASE_URL.to_string()),
            geocoder_api_key: lookup("GEOCODER_API_KEY").filter(|key| !key.trim().is_empty()),
            geocode_cache_ttl: Duration::from_secs(ttl_secs),
            pricing,
        })
    }

    /// Socket address string to bind
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_var<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            key: key.to_string(),
            value: raw.clone(),
            reason: e.to_string(),
        }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.bind_addr(), "0.0.0.0:8080");
        assert_eq!(config.geocoder_base_url, DEFAULT_GEOCODER_BASE_URL);
        assert!(config.geocoder_api_key.is_none());
        assert_eq!(config.geocode_cache_ttl, Duration::from_secs(3600));
        assert_eq!(config.pricing, PricingConfig::default());
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("PORT", "3000"),
            ("GEOCODER_API_KEY", "pk.test"),
            ("PRICING_BASE_FARE", "100"),
            ("PRICING_PER_KM_RATE", "12.5"),
            ("PRICING_FREE_WAIT_MINUTES", "3"),
            ("PRICING_CURRENCY", "KES"),
        ]))
        .unwrap();

        assert_eq!(config.port, 3000);
        assert_eq!(config.geocoder_api_key.as_deref(), Some("pk.test"));
        assert_eq!(config.pricing.base_fare, dec!(100));
        assert_eq!(config.pricing.per_kilometer_rate, dec!(12.5));
        assert_eq!(config.pricing.free_wait_minutes, 3);
        assert_eq!(config.pricing.currency, "KES");
    }

    #[test]
    fn test_blank_api_key_is_none() {
        let config = Config::from_lookup(lookup_from(&[("GEOCODER_API_KEY", "  ")])).unwrap();
        assert!(config.geocoder_api_key.is_none());
    }

    #[test]
    fn test_invalid_value_names_key() {
        let err = Config::from_lookup(lookup_from(&[("PRICING_MINIMUM_CHARGE", "cheap")]))
            .unwrap_err();
        let text = err.to_string();
        assert!(text.contains("PRICING_MINIMUM_CHARGE"));
        assert!(text.contains("cheap"));
    }
}
