//! Whole hours and minutes elapsed since the start of a brevet.

use chrono::TimeDelta;

/// Elapsed time split into whole hours and rounded minutes.
///
/// `minutes` may reach 60 when the fractional hour rounds up; it is added
/// as-is rather than carried into `hours`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ElapsedTime {
    pub hours: i64,
    pub minutes: i64,
}

impl ElapsedTime {
    /// A fixed allowance, used by the special-case closing rules.
    pub const fn fixed(hours: i64, minutes: i64) -> Self {
        Self { hours, minutes }
    }

    /// Split fractional hours: hours truncate toward zero, the remainder is
    /// rounded to the nearest minute (ties to even).
    ///
    /// # Examples
    ///
    /// ```
    /// use brevet_server::acp::ElapsedTime;
    ///
    /// assert_eq!(ElapsedTime::from_hours(5.5), ElapsedTime::fixed(5, 30));
    /// assert_eq!(ElapsedTime::from_hours(200.0 / 34.0), ElapsedTime::fixed(5, 53));
    /// ```
    pub fn from_hours(hours: f64) -> Self {
        let whole = hours.trunc();
        let minutes = ((hours - whole) * 60.0).round_ties_even();
        Self {
            hours: whole as i64,
            minutes: minutes as i64,
        }
    }

    /// Total minutes after the start.
    pub fn total_minutes(&self) -> i64 {
        self.hours * 60 + self.minutes
    }

    pub fn to_duration(self) -> TimeDelta {
        TimeDelta::hours(self.hours) + TimeDelta::minutes(self.minutes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_hours_have_no_minutes() {
        assert_eq!(ElapsedTime::from_hours(0.0), ElapsedTime::fixed(0, 0));
        assert_eq!(ElapsedTime::from_hours(40.0), ElapsedTime::fixed(40, 0));
    }

    #[test]
    fn fraction_rounds_to_nearest_minute() {
        // 100 / 34 = 2.941... -> 2h 56.47m
        assert_eq!(
            ElapsedTime::from_hours(100.0 / 34.0),
            ElapsedTime::fixed(2, 56)
        );
        // 175 / 15 = 11.666... -> 11h 40m
        assert_eq!(
            ElapsedTime::from_hours(175.0 / 15.0),
            ElapsedTime::fixed(11, 40)
        );
    }

    #[test]
    fn minutes_can_reach_sixty() {
        let elapsed = ElapsedTime::from_hours(2.0 - 0.2 / 60.0);
        assert_eq!(elapsed, ElapsedTime::fixed(1, 60));
        assert_eq!(elapsed.total_minutes(), 120);
        assert_eq!(elapsed.to_duration(), TimeDelta::hours(2));
    }

    #[test]
    fn to_duration_adds_parts() {
        assert_eq!(
            ElapsedTime::fixed(13, 30).to_duration(),
            TimeDelta::minutes(13 * 60 + 30)
        );
    }
}
