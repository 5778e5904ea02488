//! Wall clock in store time units
//!
//! The store itself never reads the clock. Hosts and the CLI use these
//! helpers to produce `current_time` values and to display expirations.

use crate::store::TimeScale;
use chrono::{DateTime, Utc};

/// Current wall-clock time since the UNIX epoch, in `scale` units
pub fn now_in_units(scale: TimeScale) -> u64 {
    datetime_to_units(Utc::now(), scale)
}

/// Convert a point in time to store units, clamping times before the epoch to zero
pub fn datetime_to_units(time: DateTime<Utc>, scale: TimeScale) -> u64 {
    let secs = u64::try_from(time.timestamp()).unwrap_or(0);
    let nanos = u64::from(time.timestamp_subsec_nanos());
    let per_second = scale.units_per_second();

    let whole = secs.saturating_mul(per_second);
    let frac = (u128::from(nanos) * u128::from(per_second) / 1_000_000_000) as u64;
    whole.saturating_add(frac)
}

/// Convert store units back to a point in time, if representable
pub fn units_to_datetime(units: u64, scale: TimeScale) -> Option<DateTime<Utc>> {
    let per_second = scale.units_per_second();
    let secs = i64::try_from(units / per_second).ok()?;
    let nanos = (u128::from(units % per_second) * 1_000_000_000 / u128::from(per_second)) as u32;
    DateTime::from_timestamp(secs, nanos)
}
