//! Client for a remote brevet API.
//!
//! Lets a front-end process keep its brevets in a separate API process
//! instead of its own store.

mod client;
mod error;

pub use client::{ApiClient, ApiClientConfig};
pub use error::ClientError;
