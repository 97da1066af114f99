//! Data transfer objects for web requests and responses.

use serde::{Deserialize, Serialize};

use crate::domain::mode_label;
use crate::resolver::{CalculationOutcome, CalculationRequest, DistanceSource};

/// A distance field as submitted: a JSON number, or form text.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum DistanceField {
    Number(f64),
    Text(String),
}

/// Calculation form, as submitted by the browser or an API client.
///
/// Every field is optional; missing values are classified by the resolver.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CalculateForm {
    /// Origin city name
    pub origin: Option<String>,

    /// Destination city name
    pub destination: Option<String>,

    /// Distance in km (blank means "look it up")
    pub distance: Option<DistanceField>,

    /// Selected transport mode identifier
    pub transport: Option<String>,
}

impl CalculateForm {
    /// Convert the raw form into a calculation request.
    pub fn into_request(self) -> CalculationRequest {
        let explicit_distance_km = match self.distance {
            Some(DistanceField::Number(n)) => Some(n),
            Some(DistanceField::Text(text)) => parse_distance(&text),
            None => None,
        };

        CalculationRequest {
            origin: self.origin.unwrap_or_default(),
            destination: self.destination.unwrap_or_default(),
            explicit_distance_km,
            transport_mode: self
                .transport
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty()),
        }
    }
}

/// Parse a typed distance.
///
/// Blank, unparseable, or NaN text means no distance was given. A comma is
/// accepted as the decimal separator. Negative and infinite values are
/// returned so the resolver can reject them.
pub fn parse_distance(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    text.replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|d| !d.is_nan())
}

/// Response for the calculation endpoint.
#[derive(Debug, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CalculateResponse {
    Success {
        /// kg of CO2, two decimals
        emission_kg: f64,
        distance_km: f64,
        /// `true` if the distance came from the route list
        distance_looked_up: bool,
        transport_mode: String,
        transport_label: String,
    },
    Failure {
        /// Stable failure identifier
        kind: String,
        /// User-facing message
        error: String,
    },
}

impl CalculateResponse {
    /// Create from a resolver outcome.
    pub fn from_outcome(outcome: &CalculationOutcome) -> Self {
        match outcome {
            Ok(estimate) => CalculateResponse::Success {
                emission_kg: estimate.emission_kg,
                distance_km: estimate.resolved_distance_km,
                distance_looked_up: estimate.distance_source == DistanceSource::Lookup,
                transport_mode: estimate.transport_mode.clone(),
                transport_label: mode_label(&estimate.transport_mode),
            },
            Err(failure) => CalculateResponse::Failure {
                kind: failure.kind().to_string(),
                error: super::messages::failure_message(failure),
            },
        }
    }
}

/// Response listing known cities.
#[derive(Debug, Serialize)]
pub struct CitiesResponse {
    /// City names, sorted for display
    pub cities: Vec<String>,
}

/// Error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}
