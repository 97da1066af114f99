//! Domain types for the CO2 emission estimator.
//!
//! Types that make up the static catalog enforce their invariants at
//! construction time, so the lookup and calculation code can trust them.

mod city;
mod error;
mod mode;
mod route;

pub use city::{collation_key, compare_cities, normalize_city};
pub use error::DomainError;
pub use mode::{TransportMode, UnknownMode, mode_label};
pub use route::Route;
