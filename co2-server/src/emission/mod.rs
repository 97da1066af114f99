//! CO2 emission calculation.
//!
//! A pure function from distance and transport mode to kilograms of CO2,
//! using a factor table supplied by the caller.

use std::collections::HashMap;

use crate::domain::{DomainError, TransportMode};

/// Kilograms of CO2 emitted per kilometre, keyed by transport mode identifier.
///
/// Every stored factor is finite and non-negative. A mode with no entry has
/// no factor; it is never treated as zero.
#[derive(Debug, Clone, PartialEq)]
pub struct EmissionFactorTable {
    factors: HashMap<String, f64>,
}

impl EmissionFactorTable {
    /// Create a table from `(mode, factor)` pairs.
    ///
    /// Fails if any factor is negative or not finite. Later duplicates
    /// replace earlier ones.
    pub fn new<I, K>(factors: I) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = (K, f64)>,
        K: Into<String>,
    {
        let mut map = HashMap::new();
        for (mode, factor) in factors {
            let mode = mode.into();
            if !factor.is_finite() || factor < 0.0 {
                return Err(DomainError::InvalidFactor { mode, factor });
            }
            map.insert(mode, factor);
        }
        Ok(Self { factors: map })
    }

    /// Look up the factor for a mode identifier.
    pub fn factor(&self, mode: &str) -> Option<f64> {
        self.factors.get(mode).copied()
    }

    /// Returns the number of modes with a factor.
    pub fn len(&self) -> usize {
        self.factors.len()
    }

    /// Returns true if the table holds no factors.
    pub fn is_empty(&self) -> bool {
        self.factors.is_empty()
    }
}

impl Default for EmissionFactorTable {
    fn default() -> Self {
        let factors = [
            (TransportMode::Bicycle, 0.0),
            (TransportMode::Car, 0.12),
            (TransportMode::Bus, 0.089),
        ]
        .into_iter()
        .map(|(mode, factor)| (mode.as_str().to_string(), factor))
        .collect();

        Self { factors }
    }
}

/// Round to two decimal places, half away from zero.
///
/// An epsilon is added before scaling so that products like `1.005` that
/// land just below the midpoint in binary still round up.
pub fn round2(value: f64) -> f64 {
    ((value + f64::EPSILON) * 100.0).round() / 100.0
}

/// Compute the emission, in kg of CO2, for travelling `distance_km` by `mode`.
///
/// Returns `None` if the distance is negative or not finite, or if the mode
/// is empty or has no factor in the table.
///
/// # Examples
///
/// ```
/// use co2_server::emission::{EmissionFactorTable, calculate_emission};
///
/// let factors = EmissionFactorTable::default();
/// assert_eq!(calculate_emission(429.0, "car", &factors), Some(51.48));
/// assert_eq!(calculate_emission(-1.0, "car", &factors), None);
/// assert_eq!(calculate_emission(10.0, "plane", &factors), None);
/// ```
pub fn calculate_emission(
    distance_km: f64,
    mode: &str,
    factors: &EmissionFactorTable,
) -> Option<f64> {
    if !distance_km.is_finite() || distance_km < 0.0 {
        return None;
    }
    if mode.is_empty() {
        return None;
    }

    let factor = factors.factor(mode)?;
    if !factor.is_finite() {
        return None;
    }

    Some(round2(distance_km * factor))
}
