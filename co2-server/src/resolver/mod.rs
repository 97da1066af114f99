//! Request resolution.
//!
//! Turns a raw, untrusted calculation request into an outcome. The checks
//! run in a fixed order and the first failing one decides the failure:
//!
//! 1. origin present
//! 2. destination present
//! 3. transport mode present
//! 4. distance resolved (explicit value, or route lookup when none was given)
//! 5. emission calculated
//!
//! An explicit distance, including zero, always bypasses the route lookup.

use tracing::debug;

use crate::emission::{EmissionFactorTable, calculate_emission};
use crate::store::RouteStore;

/// Raw input for one calculation, as read from the form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CalculationRequest {
    pub origin: String,
    pub destination: String,
    /// Distance typed by the user. `None` (or NaN) means "look it up".
    pub explicit_distance_km: Option<f64>,
    pub transport_mode: Option<String>,
}

impl CalculationRequest {
    /// Create a request with no explicit distance.
    pub fn new(
        origin: impl Into<String>,
        destination: impl Into<String>,
        transport_mode: impl Into<String>,
    ) -> Self {
        Self {
            origin: origin.into(),
            destination: destination.into(),
            explicit_distance_km: None,
            transport_mode: Some(transport_mode.into()),
        }
    }

    /// Set the explicit distance.
    pub fn with_distance(mut self, distance_km: f64) -> Self {
        self.explicit_distance_km = Some(distance_km);
        self
    }
}

/// Where the resolved distance came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistanceSource {
    /// Typed by the user
    Explicit,
    /// Found in the route store
    Lookup,
}

/// Why a request could not be turned into an emission figure.
///
/// All of these are user-correctable. The web layer maps each to a message.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Failure {
    /// Origin is empty or blank
    #[error("origin is missing")]
    MissingOrigin,

    /// Destination is empty or blank
    #[error("destination is missing")]
    MissingDestination,

    /// No transport mode was selected
    #[error("transport mode is missing")]
    MissingTransportMode,

    /// No distance was given and there is no route store to look one up
    #[error("distance is required")]
    DistanceRequired,

    /// No distance was given and the pair is not a known route
    #[error("route {origin:?} -> {destination:?} not found")]
    RouteNotFound { origin: String, destination: String },

    /// The explicit distance is negative or not finite
    #[error("distance must be a non-negative number")]
    InvalidDistance,

    /// The calculator rejected the inputs (e.g. unknown transport mode)
    #[error("emission calculation failed")]
    CalculationFailed,
}

impl Failure {
    /// Stable identifier for the failure kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Failure::MissingOrigin => "missing_origin",
            Failure::MissingDestination => "missing_destination",
            Failure::MissingTransportMode => "missing_transport_mode",
            Failure::DistanceRequired => "distance_required",
            Failure::RouteNotFound { .. } => "route_not_found",
            Failure::InvalidDistance => "invalid_distance",
            Failure::CalculationFailed => "calculation_failed",
        }
    }
}

/// A successful calculation.
#[derive(Debug, Clone, PartialEq)]
pub struct Estimate {
    /// kg of CO2, rounded to two decimals
    pub emission_kg: f64,
    pub resolved_distance_km: f64,
    pub distance_source: DistanceSource,
    pub transport_mode: String,
}

/// Result of resolving a request.
pub type CalculationOutcome = Result<Estimate, Failure>;

/// Resolves calculation requests against a route store and factor table.
pub struct RequestResolver<'a> {
    routes: Option<&'a RouteStore>,
    factors: &'a EmissionFactorTable,
}

impl<'a> RequestResolver<'a> {
    /// Create a resolver that looks up missing distances in `routes`.
    pub fn new(routes: &'a RouteStore, factors: &'a EmissionFactorTable) -> Self {
        Self {
            routes: Some(routes),
            factors,
        }
    }

    /// Create a resolver with no route source.
    ///
    /// Requests without an explicit distance fail with
    /// [`Failure::DistanceRequired`].
    pub fn without_routes(factors: &'a EmissionFactorTable) -> Self {
        Self {
            routes: None,
            factors,
        }
    }

    /// Resolve a request to an estimate or a failure.
    pub fn resolve(&self, request: &CalculationRequest) -> CalculationOutcome {
        let outcome = self.resolve_inner(request);
        match &outcome {
            Ok(estimate) => debug!(
                emission_kg = estimate.emission_kg,
                distance_km = estimate.resolved_distance_km,
                source = ?estimate.distance_source,
                mode = %estimate.transport_mode,
                "resolved calculation"
            ),
            Err(failure) => debug!(kind = failure.kind(), "calculation rejected"),
        }
        outcome
    }

    fn resolve_inner(&self, request: &CalculationRequest) -> CalculationOutcome {
        let origin = request.origin.trim();
        let destination = request.destination.trim();

        if origin.is_empty() {
            return Err(Failure::MissingOrigin);
        }
        if destination.is_empty() {
            return Err(Failure::MissingDestination);
        }

        let mode = request
            .transport_mode
            .as_deref()
            .filter(|m| !m.is_empty())
            .ok_or(Failure::MissingTransportMode)?;

        let (distance_km, distance_source) = self.resolve_distance(
            origin,
            destination,
            request.explicit_distance_km,
        )?;

        let emission_kg = calculate_emission(distance_km, mode, self.factors)
            .ok_or(Failure::CalculationFailed)?;

        Ok(Estimate {
            emission_kg,
            resolved_distance_km: distance_km,
            distance_source,
            transport_mode: mode.to_string(),
        })
    }

    fn resolve_distance(
        &self,
        origin: &str,
        destination: &str,
        explicit: Option<f64>,
    ) -> Result<(f64, DistanceSource), Failure> {
        match explicit.filter(|d| !d.is_nan()) {
            Some(d) if !d.is_finite() || d < 0.0 => Err(Failure::InvalidDistance),
            Some(d) => Ok((d, DistanceSource::Explicit)),
            None => {
                let routes = self.routes.ok_or(Failure::DistanceRequired)?;
                routes
                    .find_distance(origin, destination)
                    .map(|d| (d, DistanceSource::Lookup))
                    .ok_or_else(|| Failure::RouteNotFound {
                        origin: origin.to_string(),
                        destination: destination.to_string(),
                    })
            }
        }
    }
}
