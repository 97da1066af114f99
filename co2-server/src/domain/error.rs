//! Domain error types.
//!
//! These errors are raised while building the static catalog (routes and
//! emission factors). Per-request validation never produces them; it yields
//! a [`Failure`](crate::resolver::Failure) instead.

/// Domain-level errors for catalog construction.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    /// A route endpoint is empty after trimming
    #[error("route endpoint must not be empty")]
    EmptyEndpoint,

    /// A route distance is negative or not finite
    #[error("invalid route distance: {0}")]
    InvalidDistance(f64),

    /// An emission factor is negative or not finite
    #[error("invalid emission factor for {mode:?}: {factor}")]
    InvalidFactor { mode: String, factor: f64 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = DomainError::EmptyEndpoint;
        assert_eq!(err.to_string(), "route endpoint must not be empty");

        let err = DomainError::InvalidDistance(-3.0);
        assert_eq!(err.to_string(), "invalid route distance: -3");

        let err = DomainError::InvalidFactor {
            mode: "car".into(),
            factor: f64::INFINITY,
        };
        assert_eq!(err.to_string(), "invalid emission factor for \"car\": inf");
    }
}
