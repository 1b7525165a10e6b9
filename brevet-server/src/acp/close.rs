//! Closing times.
//!
//! The closing time starts from the minimum-speed table but a few ACP rules
//! override it near the start line and at the finish of 200 km and 400 km
//! brevets. The overrides live in an ordered rule table; the first rule
//! that matches the (clamped) control decides the allowance.

use chrono::{DateTime, FixedOffset, TimeDelta};

use super::elapsed::ElapsedTime;
use super::error::AcpError;
use super::speed_table::CLOSING_SPEEDS;
use super::{check_brevet_distance, check_control_distance, shift};

/// Controls closer than this to the start use the relaxed start rule.
const RELAXED_START_KM: f64 = 60.0;

/// Speed of the relaxed start rule, plus a one hour grace.
const RELAXED_START_KMH: f64 = 20.0;

/// A control as the closing rules see it.
///
/// `distance_km` is already clamped to the nominal brevet distance: a final
/// control placed past the finish closes with the finish.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClampedControl {
    pub distance_km: f64,
    pub brevet_km: f64,
}

impl ClampedControl {
    pub fn new(control_dist_km: f64, brevet_dist_km: f64) -> Self {
        Self {
            distance_km: control_dist_km.min(brevet_dist_km),
            brevet_km: brevet_dist_km,
        }
    }

    fn is_finish_of(&self, nominal_km: f64) -> bool {
        self.distance_km == self.brevet_km && self.brevet_km == nominal_km
    }
}

/// Rules that decide how long a control stays open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseRule {
    /// A control on the start line closes one hour after the start.
    StartLine,
    /// Within the first 60 km: 20 km/h plus one hour.
    RelaxedStart,
    /// Finish of a 200 km brevet: 13h30.
    Finish200,
    /// Finish of a 400 km brevet: 15h00.
    Finish400,
    /// Minimum-speed table.
    Standard,
}

/// Evaluation order. `StartLine` and `RelaxedStart` agree at 0 km, so their
/// relative order does not change any result. `Standard` always matches.
pub const CLOSE_RULES: [CloseRule; 5] = [
    CloseRule::StartLine,
    CloseRule::RelaxedStart,
    CloseRule::Finish200,
    CloseRule::Finish400,
    CloseRule::Standard,
];

impl CloseRule {
    /// First rule in [`CLOSE_RULES`] matching `control`.
    pub fn select(control: &ClampedControl) -> Self {
        CLOSE_RULES
            .into_iter()
            .find(|rule| rule.matches(control))
            .unwrap_or(CloseRule::Standard)
    }

    pub fn matches(self, control: &ClampedControl) -> bool {
        match self {
            CloseRule::StartLine => control.distance_km == 0.0,
            CloseRule::RelaxedStart => control.distance_km < RELAXED_START_KM,
            CloseRule::Finish200 => control.is_finish_of(200.0),
            CloseRule::Finish400 => control.is_finish_of(400.0),
            CloseRule::Standard => true,
        }
    }

    /// Time after the start at which `control` closes under this rule.
    pub fn allowance(self, control: &ClampedControl) -> Result<TimeDelta, AcpError> {
        let allowance = match self {
            CloseRule::StartLine => ElapsedTime::fixed(1, 0).to_duration(),
            CloseRule::RelaxedStart => {
                // Not rounded to the minute: kept to the microsecond.
                let hours = control.distance_km / RELAXED_START_KMH + 1.0;
                TimeDelta::microseconds((hours * 3_600_000_000.0).round() as i64)
            }
            CloseRule::Finish200 => ElapsedTime::fixed(13, 30).to_duration(),
            CloseRule::Finish400 => ElapsedTime::fixed(15, 0).to_duration(),
            CloseRule::Standard => {
                let hours = CLOSING_SPEEDS.elapsed_hours(control.distance_km)?;
                ElapsedTime::from_hours(hours).to_duration()
            }
        };
        Ok(allowance)
    }
}

/// Latest time a rider may be credited at a control.
///
/// Controls at or past the nominal distance are treated as the finish. The
/// result keeps the offset of `start`.
///
/// # Examples
///
/// ```
/// use brevet_server::acp::close_time;
/// use chrono::DateTime;
///
/// let start = DateTime::parse_from_rfc3339("2021-01-01T00:00:00+00:00").unwrap();
/// let close = close_time(200.0, 200.0, start).unwrap();
/// assert_eq!(close.to_rfc3339(), "2021-01-01T13:30:00+00:00");
/// ```
pub fn close_time(
    control_dist_km: f64,
    brevet_dist_km: f64,
    start: DateTime<FixedOffset>,
) -> Result<DateTime<FixedOffset>, AcpError> {
    check_control_distance(control_dist_km)?;
    check_brevet_distance(brevet_dist_km)?;

    let control = ClampedControl::new(control_dist_km, brevet_dist_km);
    let allowance = CloseRule::select(&control).allowance(&control)?;
    shift(start, allowance)
}
