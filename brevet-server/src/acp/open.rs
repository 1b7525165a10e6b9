//! Opening times.

use chrono::{DateTime, FixedOffset};

use super::elapsed::ElapsedTime;
use super::error::AcpError;
use super::speed_table::OPENING_SPEEDS;
use super::{check_brevet_distance, shift};

/// Earliest time a rider may be credited at a control.
///
/// The control is evaluated at its literal distance, even past the nominal
/// brevet distance; only the 1300 km table ceiling limits it. The result
/// keeps the offset of `start`.
///
/// # Examples
///
/// ```
/// use brevet_server::acp::open_time;
/// use chrono::DateTime;
///
/// let start = DateTime::parse_from_rfc3339("2021-01-01T00:00:00+00:00").unwrap();
/// let open = open_time(200.0, 200.0, start).unwrap();
/// assert_eq!(open.to_rfc3339(), "2021-01-01T05:53:00+00:00");
/// ```
pub fn open_time(
    control_dist_km: f64,
    brevet_dist_km: f64,
    start: DateTime<FixedOffset>,
) -> Result<DateTime<FixedOffset>, AcpError> {
    check_brevet_distance(brevet_dist_km)?;
    let hours = OPENING_SPEEDS.elapsed_hours(control_dist_km)?;
    shift(start, ElapsedTime::from_hours(hours).to_duration())
}
