//! Domain types for brevet records.
//!
//! This module holds what the web and storage layers exchange: brevets,
//! their checkpoints, identifiers and timestamp strings. The ACP
//! calculation itself lives in [`crate::acp`].

mod brevet;
mod error;
mod timestamp;

pub use brevet::{Brevet, BrevetId, CANONICAL_DISTANCES_KM, Checkpoint};
pub use error::DomainError;
pub use timestamp::{MINUTE_FORMAT, TimestampError, format_minute, parse_timestamp};
