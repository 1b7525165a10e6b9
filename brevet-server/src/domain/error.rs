//! Domain error types.
//!
//! These cover the checks the boundary applies on top of the ACP
//! calculation, which itself accepts any positive brevet distance.

use crate::acp::AcpError;

use super::timestamp::TimestampError;

/// Validation failures for brevet records.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    /// Brevet length is not an official ACP distance
    #[error("brevet distance must be one of 200, 300, 400, 600 or 1000 km, got {0}")]
    NonCanonicalDistance(f64),

    /// Brevet has no checkpoints
    #[error("no control distances were entered")]
    NoCheckpoints,

    /// Checkpoint lies too far past the finish
    #[error("control at {km} km is more than 20% beyond the {length} km brevet")]
    ControlTooFar { km: f64, length: f64 },

    /// Identifier is not a brevet id
    #[error("invalid brevet id: {0:?}")]
    InvalidId(String),

    #[error(transparent)]
    Timestamp(#[from] TimestampError),

    #[error(transparent)]
    Acp(#[from] AcpError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = DomainError::NonCanonicalDistance(250.0);
        assert_eq!(
            err.to_string(),
            "brevet distance must be one of 200, 300, 400, 600 or 1000 km, got 250"
        );

        let err = DomainError::NoCheckpoints;
        assert_eq!(err.to_string(), "no control distances were entered");

        let err = DomainError::ControlTooFar {
            km: 250.0,
            length: 200.0,
        };
        assert_eq!(
            err.to_string(),
            "control at 250 km is more than 20% beyond the 200 km brevet"
        );

        let err = DomainError::from(AcpError::OutOfRange(1400.0));
        assert_eq!(err.to_string(), AcpError::OutOfRange(1400.0).to_string());
    }
}
