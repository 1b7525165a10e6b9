//! Brevet storage.
//!
//! Keeps submitted brevets in memory and, when configured with a path,
//! mirrors them to a JSON snapshot so they survive restarts.

mod error;
mod memory;
mod snapshot;

pub use error::StoreError;
pub use memory::BrevetStore;
pub use snapshot::StoredBrevet;
