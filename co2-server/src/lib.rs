//! CO2 emission estimator server.
//!
//! A web application that answers: "How much CO2 does this trip emit?"
//! given an origin, a destination, and a transport mode. Distances are
//! typed by the user or looked up in a fixed list of known routes.

pub mod config;
pub mod domain;
pub mod emission;
pub mod resolver;
pub mod store;
pub mod web;
