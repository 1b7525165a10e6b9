//! Data transfer objects for web requests and responses.
//!
//! Field names follow the JSON the calculator page and earlier API clients
//! already speak (`brev_dist`, `begin_date`, `items`).

use serde::{Deserialize, Serialize};

use crate::domain::{Brevet, BrevetId, Checkpoint};
use crate::store::StoredBrevet;

/// Control distance used when the page omits `km`.
const DEFAULT_KM: f64 = 999.0;

fn default_km() -> f64 {
    DEFAULT_KM
}

/// Query for `/_calc_times`.
#[derive(Debug, Deserialize)]
pub struct CalcTimesRequest {
    /// Control distance in km
    #[serde(default = "default_km")]
    pub km: f64,

    /// Brevet start, `YYYY-MM-DDTHH:MM` with an optional offset
    pub start_time: String,

    /// Nominal brevet distance in km
    pub brev_dist: f64,
}

/// Opening window of one control.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControlWindow {
    pub open: String,
    pub close: String,
}

/// Response for `/_calc_times`.
#[derive(Debug, Serialize, Deserialize)]
pub struct CalcTimesResponse {
    pub result: ControlWindow,
}

/// Body of a brevet submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitBrevetRequest {
    /// Nominal distance in km
    pub brev_dist: f64,

    /// Start time as entered
    pub start_time: String,

    /// Controls with their computed windows
    pub items: Vec<Checkpoint>,
}

impl SubmitBrevetRequest {
    pub fn from_brevet(brevet: &Brevet) -> Self {
        Self {
            brev_dist: brevet.length,
            start_time: brevet.start_time.clone(),
            items: brevet.checkpoints.clone(),
        }
    }

    pub fn into_brevet(self) -> Brevet {
        Brevet {
            length: self.brev_dist,
            start_time: self.start_time,
            checkpoints: self.items,
        }
    }
}

/// A brevet as returned by the API, and the body of a replacement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrevetResult {
    /// Absent in replacement bodies
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    pub brevet_dist_km: f64,

    pub begin_date: String,

    pub items: Vec<Checkpoint>,
}

impl BrevetResult {
    pub fn from_brevet(id: Option<BrevetId>, brevet: &Brevet) -> Self {
        Self {
            id: id.map(|id| id.to_string()),
            brevet_dist_km: brevet.length,
            begin_date: brevet.start_time.clone(),
            items: brevet.checkpoints.clone(),
        }
    }

    pub fn from_stored(stored: &StoredBrevet) -> Self {
        Self::from_brevet(Some(stored.id), &stored.brevet)
    }

    pub fn into_brevet(self) -> Brevet {
        Brevet {
            length: self.brevet_dist_km,
            start_time: self.begin_date,
            checkpoints: self.items,
        }
    }
}

/// Response to a successful insert.
#[derive(Debug, Serialize, Deserialize)]
pub struct InsertResponse {
    pub id: String,
}

/// Acknowledgement for updates and deletes.
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}
