//! Core fare calculation functions.
//!
//! Pure functions for pricing math - no I/O, no clock access.

use std::fmt::Write as _;

use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::pricing::models::{PriceBreakdown, PriceCalculationOptions, PricingConfig};

/// Round a fare amount to whole currency units, halves away from zero.
///
/// # Examples
/// ```
/// use rust_decimal_macros::dec;
/// use courier_core::pricing::round_fare;
///
/// assert_eq!(round_fare(dec!(31.5)), dec!(32));
/// assert_eq!(round_fare(dec!(31.49)), dec!(31));
/// assert_eq!(round_fare(dec!(2.5)), dec!(3));
/// ```
pub fn round_fare(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Longest trip the calculator prices: half the Earth's circumference.
///
/// No two points on the globe are further apart, so longer distances are
/// priced as this one.
pub const MAX_TRIP_DISTANCE_KM: f64 = 20_015.1;

/// Ceiling for any single breakdown line.
///
/// Six capped lines still sum far below `i64::MAX`, so the conversions and
/// the breakdown invariants stay exact.
pub const MAX_LINE_AMOUNT: Decimal = dec!(1000000000000000);

/// Multiply non-negative amounts, capping at `MAX_LINE_AMOUNT` instead of overflowing.
fn capped_mul(a: Decimal, b: Decimal) -> Decimal {
    a.checked_mul(b).map_or(MAX_LINE_AMOUNT, |v| v.min(MAX_LINE_AMOUNT))
}

/// Add non-negative amounts, capping at `MAX_LINE_AMOUNT` instead of overflowing.
fn capped_add(a: Decimal, b: Decimal) -> Decimal {
    a.checked_add(b).map_or(MAX_LINE_AMOUNT, |v| v.min(MAX_LINE_AMOUNT))
}

/// Convert a rounded, capped amount to whole units.
fn to_units(amount: Decimal) -> i64 {
    // Every caller passes a value within 0..=6 * MAX_LINE_AMOUNT
    amount.to_i64().unwrap_or_default()
}

/// `percent` % of `amount`, rounded to whole units and capped at `MAX_LINE_AMOUNT`.
fn percent_of(amount: Decimal, percent: Decimal) -> Decimal {
    let share = amount
        .checked_mul(percent)
        .map(|v| v / dec!(100))
        .or_else(|| (amount / dec!(100)).checked_mul(percent))
        .unwrap_or(MAX_LINE_AMOUNT);
    round_fare(share.min(MAX_LINE_AMOUNT))
}

/// Trip distance as a Decimal, clamped to `0..=MAX_TRIP_DISTANCE_KM`.
fn billable_distance(distance: f64) -> Decimal {
    let km = if distance.is_nan() {
        0.0
    } else {
        distance.clamp(0.0, MAX_TRIP_DISTANCE_KM)
    };
    Decimal::from_f64(km).unwrap_or_default()
}

/// Platform commission rate: midpoint of the configured range, in percent.
pub fn commission_rate(config: &PricingConfig) -> Decimal {
    (config.commission_min_percent + config.commission_max_percent) / dec!(2)
}

/// Calculate the full fare breakdown for one trip.
///
/// The minimum charge clamps base fare plus distance fee only; every
/// percentage surcharge is then taken from the clamped subtotal. Each term
/// is rounded on its own, so the breakdown lines always add up to `total`.
///
/// Never panics. Distances beyond `MAX_TRIP_DISTANCE_KM` are priced as that
/// distance, and every line is capped at `MAX_LINE_AMOUNT`. Callers should
/// reject negative or out-of-range distances before getting here.
pub fn calculate_price(options: &PriceCalculationOptions, config: &PricingConfig) -> PriceBreakdown {
    let distance = billable_distance(options.distance);

    let base_fare = config.base_fare.clamp(Decimal::ZERO, MAX_LINE_AMOUNT);
    let distance_fee = capped_mul(distance, config.per_kilometer_rate);
    let subtotal = round_fare(
        capped_add(base_fare, distance_fee)
            .max(config.minimum_charge)
            .min(MAX_LINE_AMOUNT),
    );

    let surcharge = |enabled: bool, percent: Decimal| {
        if enabled {
            percent_of(subtotal, percent)
        } else {
            Decimal::ZERO
        }
    };

    let fragile_charge = surcharge(options.is_fragile, config.fragile_percent);
    let insurance_charge = surcharge(options.has_insurance, config.insurance_percent);
    let after_hours_charge = surcharge(options.is_after_hours, config.after_hours_percent);
    let weekend_charge = surcharge(options.is_weekend, config.weekend_percent);

    // First minutes are free, then a flat rate per minute
    let billable_minutes = options.wait_time_minutes.saturating_sub(config.free_wait_minutes);
    let wait_time_charge = round_fare(capped_mul(
        Decimal::from(billable_minutes),
        config.wait_time_rate_per_minute,
    ));

    let total = subtotal
        + fragile_charge
        + insurance_charge
        + after_hours_charge
        + weekend_charge
        + wait_time_charge;

    // The platform never takes more than the whole fare
    let company_commission = percent_of(total, commission_rate(config))
        .min(total)
        .max(Decimal::ZERO);
    let driver_earnings = total - company_commission;

    PriceBreakdown {
        base_fare: to_units(round_fare(base_fare)),
        distance_fee: to_units(round_fare(distance_fee)),
        subtotal: to_units(subtotal),
        fragile_charge: to_units(fragile_charge),
        insurance_charge: to_units(insurance_charge),
        after_hours_charge: to_units(after_hours_charge),
        weekend_charge: to_units(weekend_charge),
        wait_time_charge: to_units(wait_time_charge),
        total: to_units(total),
        driver_earnings: to_units(driver_earnings),
        company_commission: to_units(company_commission),
    }
}

/// Render a breakdown as a multi-line summary for receipts and logs.
///
/// Surcharge lines are only listed when non-zero.
pub fn format_price_breakdown(breakdown: &PriceBreakdown, currency: &str) -> String {
    let mut out = String::new();
    let mut line = |label: &str, amount: i64| {
        let _ = writeln!(out, "{}: {} {}", label, amount, currency);
    };

    line("Base fare", breakdown.base_fare);
    line("Distance fee", breakdown.distance_fee);
    line("Subtotal", breakdown.subtotal);

    let surcharges = [
        ("Fragile handling", breakdown.fragile_charge),
        ("Insurance", breakdown.insurance_charge),
        ("After-hours surcharge", breakdown.after_hours_charge),
        ("Weekend surcharge", breakdown.weekend_charge),
        ("Wait time", breakdown.wait_time_charge),
    ];
    for (label, amount) in surcharges {
        if amount != 0 {
            line(label, amount);
        }
    }

    line("Total", breakdown.total);
    line("Driver earnings", breakdown.driver_earnings);
    line("Company commission", breakdown.company_commission);

    out.trim_end().to_string()
}
