//! Errors raised by the control time calculation.

/// Reasons a control time cannot be computed.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AcpError {
    /// Distance is negative, NaN or infinite.
    #[error("distance must be a non-negative number of kilometres, got {0}")]
    InvalidDistance(f64),

    /// Nominal brevet distance is not a positive number.
    #[error("brevet distance must be a positive number of kilometres, got {0}")]
    InvalidBrevetDistance(f64),

    /// No speed band covers the distance.
    #[error("control at {0} km is beyond the 1300 km covered by the speed table")]
    OutOfRange(f64),

    /// Adding the elapsed time to the start overflowed the calendar.
    #[error("control time is outside the representable range")]
    TimestampOverflow,
}
