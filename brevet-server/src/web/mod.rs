//! Web layer for the brevet calculator.
//!
//! Serves the calculator page, the `/_calc_times` endpoint it calls, and a
//! small JSON API for stored brevets.

mod dto;
mod error;
mod routes;
mod state;
pub mod templates;

pub use dto::*;
pub use error::AppError;
pub use routes::create_router;
pub use state::{AppState, Backend};
pub use templates::*;
