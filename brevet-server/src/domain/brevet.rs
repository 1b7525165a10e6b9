//! Brevet records: a nominal distance, a start time and its controls.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::acp::{self, AcpError};

use super::error::DomainError;
use super::timestamp::{format_minute, parse_timestamp};

/// Official ACP brevet distances.
pub const CANONICAL_DISTANCES_KM: [f64; 5] = [200.0, 300.0, 400.0, 600.0, 1000.0];

/// A control may lie at most this far past the nominal distance, as a
/// fraction of it.
const MAX_OVERSHOOT: f64 = 0.2;

/// Start times are stored with their offset so nothing is lost on reload.
const START_FORMAT: &str = "%Y-%m-%dT%H:%M%:z";

/// Identifier of a stored brevet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BrevetId(u64);

impl BrevetId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn get(self) -> u64 {
        self.0
    }

    /// The identifier after this one.
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for BrevetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for BrevetId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse()
            .map(BrevetId)
            .map_err(|_| DomainError::InvalidId(s.to_string()))
    }
}

/// One control with its window, rendered at minute precision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Checkpoint {
    pub km: f64,
    pub open: String,
    pub close: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

/// A brevet as stored and exchanged over the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brevet {
    /// Nominal distance in km
    pub length: f64,
    /// Start time as submitted
    pub start_time: String,
    pub checkpoints: Vec<Checkpoint>,
}

impl Brevet {
    /// Build a brevet with computed windows for each control distance.
    ///
    /// # Examples
    ///
    /// ```
    /// use brevet_server::domain::{Brevet, parse_timestamp};
    ///
    /// let start = parse_timestamp("2021-01-01T00:00").unwrap();
    /// let brevet = Brevet::plan(200.0, start, &[0.0, 120.0, 200.0]).unwrap();
    ///
    /// assert_eq!(brevet.checkpoints[1].open, "2021-01-01T03:32");
    /// assert_eq!(brevet.checkpoints[2].close, "2021-01-01T13:30");
    /// ```
    pub fn plan(
        length: f64,
        start: DateTime<FixedOffset>,
        control_kms: &[f64],
    ) -> Result<Self, DomainError> {
        let checkpoints = control_kms
            .iter()
            .map(|&km| {
                let times = acp::control_times(km, length, start)?;
                Ok(Checkpoint {
                    km,
                    open: format_minute(&times.open),
                    close: format_minute(&times.close),
                    location: None,
                })
            })
            .collect::<Result<Vec<_>, AcpError>>()?;

        Ok(Self {
            length,
            start_time: start.format(START_FORMAT).to_string(),
            checkpoints,
        })
    }

    /// The parsed start time.
    pub fn start(&self) -> Result<DateTime<FixedOffset>, DomainError> {
        Ok(parse_timestamp(&self.start_time)?)
    }

    /// Checks applied before a brevet is stored.
    ///
    /// The length must be an official distance, there must be at least one
    /// control, and no control may be more than 20% past the finish.
    pub fn validate(&self) -> Result<(), DomainError> {
        if !CANONICAL_DISTANCES_KM.contains(&self.length) {
            return Err(DomainError::NonCanonicalDistance(self.length));
        }
        self.start()?;
        if self.checkpoints.is_empty() {
            return Err(DomainError::NoCheckpoints);
        }

        let furthest = self.length * (1.0 + MAX_OVERSHOOT);
        for checkpoint in &self.checkpoints {
            let km = checkpoint.km;
            if !km.is_finite() || km < 0.0 {
                return Err(AcpError::InvalidDistance(km).into());
            }
            if km > furthest {
                return Err(DomainError::ControlTooFar {
                    km,
                    length: self.length,
                });
            }
        }

        Ok(())
    }
}
