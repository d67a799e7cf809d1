//! Request DTOs for pricing API endpoints.

use chrono::{Datelike, Timelike};
use serde::Deserialize;

use crate::error::AppError;
use crate::map::Coordinates;

use super::calculators::MAX_TRIP_DISTANCE_KM;
use super::models::{PriceCalculationOptions, PricingConfig};
use super::services::{is_after_hours_at, is_weekend_at};

/// Surcharge flags shared by every pricing request.
///
/// Time-based flags left out are derived from the server clock.
#[derive(Debug, Default, Deserialize)]
pub struct TripFlagsRequest {
    #[serde(default)]
    pub is_fragile: bool,
    #[serde(default)]
    pub has_insurance: bool,
    #[serde(default)]
    pub is_after_hours: Option<bool>,
    #[serde(default)]
    pub is_weekend: Option<bool>,
    #[serde(default)]
    pub wait_time_minutes: i64,
}

impl TripFlagsRequest {
    /// Validate and build calculator options, filling clock flags from `now`
    pub fn to_options_at<T>(&self, distance: f64, now: &T) -> Result<PriceCalculationOptions, AppError>
    where
        T: Datelike + Timelike,
    {
        let distance = validate_distance(distance)?;
        let wait_time_minutes = u32::try_from(self.wait_time_minutes).map_err(|_| {
            AppError::BadRequest(format!(
                "wait_time_minutes must be a non-negative integer, got {}",
                self.wait_time_minutes
            ))
        })?;

        Ok(PriceCalculationOptions {
            distance,
            is_fragile: self.is_fragile,
            has_insurance: self.has_insurance,
            is_after_hours: self.is_after_hours.unwrap_or_else(|| is_after_hours_at(now)),
            is_weekend: self.is_weekend.unwrap_or_else(|| is_weekend_at(now)),
            wait_time_minutes,
        })
    }
}

/// Distances must be finite kilometers within `0..=MAX_TRIP_DISTANCE_KM`
pub fn validate_distance(distance: f64) -> Result<f64, AppError> {
    if !(distance.is_finite() && distance >= 0.0) {
        return Err(AppError::BadRequest(format!(
            "distance must be a non-negative number of kilometers, got {}",
            distance
        )));
    }
    if distance > MAX_TRIP_DISTANCE_KM {
        return Err(AppError::BadRequest(format!(
            "distance must not exceed {} km, got {}",
            MAX_TRIP_DISTANCE_KM, distance
        )));
    }
    Ok(distance)
}

/// Request to price a trip of known distance
#[derive(Debug, Deserialize)]
pub struct CalculatePriceRequest {
    /// Kilometers
    pub distance: f64,
    #[serde(flatten)]
    pub flags: TripFlagsRequest,
}

/// Request to quote a trip between two points
#[derive(Debug, Deserialize)]
pub struct QuoteRequest {
    pub pickup: Coordinates,
    pub dropoff: Coordinates,
    #[serde(flatten)]
    pub flags: TripFlagsRequest,
}

/// Request to price a trip under candidate settings (admin screen)
#[derive(Debug, Deserialize)]
pub struct PreviewPriceRequest {
    pub config: PricingConfig,
    pub distance: f64,
    #[serde(flatten)]
    pub flags: TripFlagsRequest,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn weekday_noon() -> chrono::NaiveDateTime {
        // Wednesday
        NaiveDate::from_ymd_opt(2026, 10, 14)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn saturday_night() -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 17)
            .unwrap()
            .and_hms_opt(22, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_clock_flags_filled_when_missing() {
        let flags = TripFlagsRequest::default();

        let options = flags.to_options_at(3.0, &saturday_night()).unwrap();
        assert!(options.is_after_hours);
        assert!(options.is_weekend);

        let options = flags.to_options_at(3.0, &weekday_noon()).unwrap();
        assert!(!options.is_after_hours);
        assert!(!options.is_weekend);
    }

    #[test]
    fn test_explicit_flags_win_over_clock() {
        let flags = TripFlagsRequest {
            is_after_hours: Some(false),
            is_weekend: Some(false),
            ..Default::default()
        };

        let options = flags.to_options_at(3.0, &saturday_night()).unwrap();
        assert!(!options.is_after_hours);
        assert!(!options.is_weekend);
    }

    #[test]
    fn test_rejects_negative_inputs() {
        let flags = TripFlagsRequest::default();
        assert!(matches!(
            flags.to_options_at(-1.0, &weekday_noon()),
            Err(AppError::BadRequest(_))
        ));
        assert!(flags.to_options_at(f64::NAN, &weekday_noon()).is_err());

        let flags = TripFlagsRequest {
            wait_time_minutes: -3,
            ..Default::default()
        };
        assert!(matches!(
            flags.to_options_at(1.0, &weekday_noon()),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn test_distance_ceiling() {
        assert_eq!(validate_distance(0.0).unwrap(), 0.0);
        assert_eq!(
            validate_distance(MAX_TRIP_DISTANCE_KM).unwrap(),
            MAX_TRIP_DISTANCE_KM
        );

        for distance in [MAX_TRIP_DISTANCE_KM + 0.001, 1e28, 1e30, f64::MAX, f64::INFINITY] {
            assert!(
                matches!(validate_distance(distance), Err(AppError::BadRequest(_))),
                "distance {} accepted",
                distance
            );
        }
    }

    #[test]
    fn test_deserialize_flattened_flags() {
        let request: CalculatePriceRequest = serde_json::from_value(serde_json::json!({
            "distance": 5.0,
            "is_fragile": true,
            "wait_time_minutes": 12
        }))
        .unwrap();

        assert_eq!(request.distance, 5.0);
        assert!(request.flags.is_fragile);
        assert!(!request.flags.has_insurance);
        assert_eq!(request.flags.is_after_hours, None);
        assert_eq!(request.flags.wait_time_minutes, 12);
    }
}
