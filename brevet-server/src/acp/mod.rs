//! ACP brevet control times.
//!
//! Implements the published ACP rules for the opening and closing times of
//! brevet controls (see <https://rusa.org/octime_acp.html>). Everything in
//! this module is pure: the same inputs always give the same timestamps,
//! and results keep the UTC offset of the brevet start.

mod close;
mod elapsed;
mod error;
mod open;
mod speed_table;

use chrono::{DateTime, FixedOffset, TimeDelta};

pub use close::{CLOSE_RULES, ClampedControl, CloseRule, close_time};
pub use elapsed::ElapsedTime;
pub use error::AcpError;
pub use open::open_time;
pub use speed_table::{CLOSING_SPEEDS, MAX_CONTROL_KM, OPENING_SPEEDS, SpeedBand, SpeedTable};

/// The opening window of one control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlTimes {
    pub open: DateTime<FixedOffset>,
    pub close: DateTime<FixedOffset>,
}

/// Opening and closing time of a control in one call.
pub fn control_times(
    control_dist_km: f64,
    brevet_dist_km: f64,
    start: DateTime<FixedOffset>,
) -> Result<ControlTimes, AcpError> {
    Ok(ControlTimes {
        open: open_time(control_dist_km, brevet_dist_km, start)?,
        close: close_time(control_dist_km, brevet_dist_km, start)?,
    })
}

fn check_control_distance(km: f64) -> Result<(), AcpError> {
    if km.is_finite() && km >= 0.0 {
        Ok(())
    } else {
        Err(AcpError::InvalidDistance(km))
    }
}

fn check_brevet_distance(km: f64) -> Result<(), AcpError> {
    if km.is_finite() && km > 0.0 {
        Ok(())
    } else {
        Err(AcpError::InvalidBrevetDistance(km))
    }
}

fn shift(
    start: DateTime<FixedOffset>,
    elapsed: TimeDelta,
) -> Result<DateTime<FixedOffset>, AcpError> {
    start
        .checked_add_signed(elapsed)
        .ok_or(AcpError::TimestampOverflow)
}

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone};

    /// `YYYY-MM-DDTHH:MM` at UTC.
    pub fn at(s: &str) -> DateTime<FixedOffset> {
        let naive = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M").unwrap();
        FixedOffset::east_opt(0).unwrap().from_utc_datetime(&naive)
    }

    pub fn start() -> DateTime<FixedOffset> {
        at("2021-01-01T00:00")
    }
}
