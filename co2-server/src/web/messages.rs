//! User-facing text (pt-BR).
//!
//! The resolver only classifies outcomes; all wording lives here.

use crate::domain::mode_label;
use crate::resolver::{CalculationOutcome, DistanceSource, Failure};

/// Unit label shown after the emission figure.
pub const EMISSION_UNIT: &str = "kg de CO₂";

/// Map a failure to the message shown to the user.
pub fn failure_message(failure: &Failure) -> String {
    match failure {
        Failure::MissingOrigin => "Por favor, informe a cidade de origem.".to_string(),
        Failure::MissingDestination => "Por favor, informe a cidade de destino.".to_string(),
        Failure::MissingTransportMode => {
            "Por favor, selecione um meio de transporte.".to_string()
        }
        Failure::DistanceRequired => "Por favor, informe a distância em km.".to_string(),
        Failure::RouteNotFound {
            origin,
            destination,
        } => format!(
            "Rota \"{origin}\" → \"{destination}\" não encontrada. \
             Por favor, informe a distância manualmente."
        ),
        Failure::InvalidDistance => "A distância deve ser um número positivo.".to_string(),
        Failure::CalculationFailed => {
            "Erro ao calcular a emissão. Verifique os dados informados.".to_string()
        }
    }
}

/// Format an emission figure with exactly two decimals.
pub fn format_emission(emission_kg: f64) -> String {
    format!("{emission_kg:.2}")
}

/// Result panel contents.
#[derive(Debug, Clone, PartialEq)]
pub enum ResultView {
    Estimate {
        /// e.g. "51.48"
        emission: String,
        unit: &'static str,
        /// e.g. "São Paulo → Rio de Janeiro (429 km) via Carro (automática)"
        detail: String,
    },
    Error {
        message: String,
    },
}

impl ResultView {
    /// Build the result panel for a resolved request.
    ///
    /// `origin` and `destination` are the names as the user typed them.
    pub fn from_outcome(origin: &str, destination: &str, outcome: &CalculationOutcome) -> Self {
        match outcome {
            Ok(estimate) => {
                let mut detail = format!(
                    "{} → {} ({} km) via {}",
                    origin.trim(),
                    destination.trim(),
                    estimate.resolved_distance_km,
                    mode_label(&estimate.transport_mode)
                );
                if estimate.distance_source == DistanceSource::Lookup {
                    detail.push_str(" (automática)");
                }
                ResultView::Estimate {
                    emission: format_emission(estimate.emission_kg),
                    unit: EMISSION_UNIT,
                    detail,
                }
            }
            Err(failure) => ResultView::Error {
                message: failure_message(failure),
            },
        }
    }
}
