//! Known origin/destination pairs.

use super::city::normalize_city;
use super::error::DomainError;

/// A stored origin–destination pair with its road distance.
///
/// Endpoints are stored trimmed with their original casing. A route is
/// usable in either direction for lookup, though it keeps the direction it
/// was declared with.
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    origin: String,
    destination: String,
    distance_km: f64,
}

impl Route {
    /// Create a validated route.
    ///
    /// Both endpoints must be non-blank and the distance must be a finite,
    /// non-negative number of kilometres.
    pub fn new(
        origin: impl AsRef<str>,
        destination: impl AsRef<str>,
        distance_km: f64,
    ) -> Result<Self, DomainError> {
        let origin = origin.as_ref().trim();
        let destination = destination.as_ref().trim();

        if origin.is_empty() || destination.is_empty() {
            return Err(DomainError::EmptyEndpoint);
        }
        if !distance_km.is_finite() || distance_km < 0.0 {
            return Err(DomainError::InvalidDistance(distance_km));
        }

        Ok(Self {
            origin: origin.to_string(),
            destination: destination.to_string(),
            distance_km,
        })
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn destination(&self) -> &str {
        &self.destination
    }

    pub fn distance_km(&self) -> f64 {
        self.distance_km
    }

    /// Whether this route connects the two normalized names, in either direction.
    pub(crate) fn connects(&self, origin_norm: &str, destination_norm: &str) -> bool {
        let ro = normalize_city(&self.origin);
        let rd = normalize_city(&self.destination);

        (ro == origin_norm && rd == destination_norm)
            || (ro == destination_norm && rd == origin_norm)
    }
}
