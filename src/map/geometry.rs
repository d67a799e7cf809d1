//! Distance and synthetic route geometry.
//!
//! Pure functions - no network access. The route here is a placeholder
//! polyline, not the output of a routing engine.

use std::f64::consts::PI;

use super::models::{Coordinates, RoutePoint};
use super::services::MapError;

/// Mean Earth radius used by the haversine formula
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Number of segments in a synthetic route (yields one more point)
pub const DEFAULT_ROUTE_SEGMENTS: usize = 10;

/// Peak offset, in degrees, of the fake road curve
pub const CURVE_AMPLITUDE_DEG: f64 = 0.001;

/// Great-circle distance between two points in kilometers (haversine).
///
/// Symmetric in its arguments and zero for identical points.
pub fn calculate_distance(start: &Coordinates, end: &Coordinates) -> f64 {
    let lat1 = start.latitude.to_radians();
    let lat2 = end.latitude.to_radians();
    let delta_lat = (end.latitude - start.latitude).to_radians();
    let delta_lng = (end.longitude - start.longitude).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lng / 2.0).sin().powi(2);
    // Rounding can push `a` just past 1 near antipodes
    let a = a.min(1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Build a curved placeholder route of `segments + 1` points.
///
/// Points are linearly interpolated in latitude/longitude space and pushed
/// off the straight line by `sin(t * PI) * CURVE_AMPLITUDE_DEG`, the same
/// offset on both axes. The first and last points are exactly `start` and
/// `end`. Deterministic for identical inputs.
pub fn synthesize_route(
    start: &Coordinates,
    end: &Coordinates,
    segments: usize,
) -> Result<Vec<RoutePoint>, MapError> {
    if segments == 0 {
        return Err(MapError::InvalidInput(
            "route needs at least one segment".to_string(),
        ));
    }
    if !start.is_finite() || !end.is_finite() {
        return Err(MapError::InvalidInput(format!(
            "non-finite route endpoint: {:?} -> {:?}",
            start, end
        )));
    }

    let steps = segments as f64;
    let points = (0..=segments)
        .map(|i| {
            if i == 0 {
                return *start;
            }
            if i == segments {
                return *end;
            }

            let t = i as f64 / steps;
            let curve = (t * PI).sin() * CURVE_AMPLITUDE_DEG;

            Coordinates {
                latitude: start.latitude + (end.latitude - start.latitude) * t + curve,
                longitude: start.longitude + (end.longitude - start.longitude) * t + curve,
            }
        })
        .collect();

    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const ADDIS: Coordinates = Coordinates::new(9.0301, 38.7400);
    const BOLE: Coordinates = Coordinates::new(8.9806, 38.7578);

    // ==================== calculate_distance tests ====================

    #[test]
    fn test_distance_same_point_is_zero() {
        let origin = Coordinates::new(0.0, 0.0);
        assert_eq!(calculate_distance(&origin, &origin), 0.0);
        assert_eq!(calculate_distance(&ADDIS, &ADDIS), 0.0);
    }

    #[test]
    fn test_distance_one_degree_on_equator() {
        let d = calculate_distance(&Coordinates::new(0.0, 0.0), &Coordinates::new(0.0, 1.0));
        // 2 * PI * 6371 / 360
        assert!((d - 111.19492664455873).abs() < 1e-9);
    }

    #[test]
    fn test_distance_city_scale() {
        let d = calculate_distance(&ADDIS, &BOLE);
        assert!(d > 5.0 && d < 6.5, "got {}", d);
    }

    #[test]
    fn test_distance_antipodes() {
        let d = calculate_distance(&Coordinates::new(0.0, 0.0), &Coordinates::new(0.0, 180.0));
        assert!((d - PI * EARTH_RADIUS_KM).abs() < 1e-6);
    }

    // ==================== synthesize_route tests ====================

    #[test]
    fn test_route_has_eleven_points_with_exact_endpoints() {
        let route = synthesize_route(&ADDIS, &BOLE, DEFAULT_ROUTE_SEGMENTS).unwrap();
        assert_eq!(route.len(), 11);
        assert_eq!(route[0], ADDIS);
        assert_eq!(route[10], BOLE);
    }

    #[test]
    fn test_route_midpoint_carries_full_curve_offset() {
        let start = Coordinates::new(0.0, 0.0);
        let end = Coordinates::new(1.0, 2.0);

        let route = synthesize_route(&start, &end, DEFAULT_ROUTE_SEGMENTS).unwrap();

        let mid = route[5];
        assert!((mid.latitude - (0.5 + CURVE_AMPLITUDE_DEG)).abs() < 1e-12);
        assert!((mid.longitude - (1.0 + CURVE_AMPLITUDE_DEG)).abs() < 1e-12);
    }

    #[test]
    fn test_route_interior_points_follow_formula() {
        let start = Coordinates::new(10.0, 20.0);
        let end = Coordinates::new(12.0, 18.0);

        let route = synthesize_route(&start, &end, 4).unwrap();

        assert_eq!(route.len(), 5);
        let t: f64 = 0.25;
        let curve = (t * PI).sin() * CURVE_AMPLITUDE_DEG;
        assert_eq!(route[1].latitude, 10.0 + 2.0 * t + curve);
        assert_eq!(route[1].longitude, 20.0 + -2.0 * t + curve);
    }

    #[test]
    fn test_route_is_deterministic() {
        let first = synthesize_route(&ADDIS, &BOLE, DEFAULT_ROUTE_SEGMENTS).unwrap();
        let second = synthesize_route(&ADDIS, &BOLE, DEFAULT_ROUTE_SEGMENTS).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_route_rejects_zero_segments() {
        assert!(matches!(
            synthesize_route(&ADDIS, &BOLE, 0),
            Err(MapError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_route_rejects_non_finite_endpoint() {
        let bad = Coordinates::new(f64::NAN, 38.0);
        assert!(synthesize_route(&bad, &BOLE, DEFAULT_ROUTE_SEGMENTS).is_err());
        assert!(synthesize_route(&ADDIS, &bad, DEFAULT_ROUTE_SEGMENTS).is_err());
    }

    proptest! {
        #[test]
        fn prop_distance_is_symmetric(
            lat1 in -90.0f64..=90.0, lng1 in -180.0f64..=180.0,
            lat2 in -90.0f64..=90.0, lng2 in -180.0f64..=180.0,
        ) {
            let a = Coordinates::new(lat1, lng1);
            let b = Coordinates::new(lat2, lng2);
            prop_assert_eq!(calculate_distance(&a, &b), calculate_distance(&b, &a));
        }

        #[test]
        fn prop_distance_is_non_negative(
            lat1 in -90.0f64..=90.0, lng1 in -180.0f64..=180.0,
            lat2 in -90.0f64..=90.0, lng2 in -180.0f64..=180.0,
        ) {
            let d = calculate_distance(&Coordinates::new(lat1, lng1), &Coordinates::new(lat2, lng2));
            prop_assert!(d >= 0.0);
            prop_assert!(d <= PI * EARTH_RADIUS_KM + 1e-6);
        }
    }
}
