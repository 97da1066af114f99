//! Web layer for the CO2 emission estimator.
//!
//! Provides the form page, the calculation endpoints and the city list.
//! This layer reads raw input, hands it to the resolver, and turns the
//! outcome into HTML or JSON; it holds no calculation rules of its own.

mod dto;
mod messages;
mod routes;
mod state;
pub mod templates;

pub use dto::*;
pub use messages::{EMISSION_UNIT, ResultView, failure_message, format_emission};
pub use routes::{AppError, create_router};
pub use state::AppState;
pub use templates::*;
