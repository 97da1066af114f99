//! Askama templates for the web frontend.

use askama::Template;

use crate::domain::TransportMode;
use crate::emission::EmissionFactorTable;

use super::messages::ResultView;

// ============================================================================
// Page Templates (extend base.html)
// ============================================================================

/// Home page with the calculation form.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    /// Autocomplete suggestions for the city inputs
    pub cities: Vec<String>,
    pub modes: Vec<ModeOption>,
}

/// About page.
#[derive(Template)]
#[template(path = "about.html")]
pub struct AboutTemplate {
    pub factors: Vec<FactorView>,
}

// ============================================================================
// Fragment Templates (AJAX responses, no base.html)
// ============================================================================

/// Result panel fragment.
#[derive(Template)]
#[template(path = "result.html")]
pub struct ResultTemplate {
    pub is_error: bool,
    pub message: String,
    pub emission: String,
    pub unit: &'static str,
    pub detail: String,
}

impl From<ResultView> for ResultTemplate {
    fn from(view: ResultView) -> Self {
        match view {
            ResultView::Estimate {
                emission,
                unit,
                detail,
            } => Self {
                is_error: false,
                message: String::new(),
                emission,
                unit,
                detail,
            },
            ResultView::Error { message } => Self {
                is_error: true,
                message,
                emission: String::new(),
                unit: "",
                detail: String::new(),
            },
        }
    }
}

// ============================================================================
// View Models (for templates)
// ============================================================================

/// A transport mode radio button.
#[derive(Debug, Clone)]
pub struct ModeOption {
    pub value: &'static str,
    pub label: &'static str,
    pub checked: bool,
}

impl ModeOption {
    /// All modes, with the first one preselected.
    pub fn all() -> Vec<Self> {
        TransportMode::ALL
            .iter()
            .enumerate()
            .map(|(i, mode)| Self {
                value: mode.as_str(),
                label: mode.label(),
                checked: i == 0,
            })
            .collect()
    }
}

/// Emission factor row on the about page.
#[derive(Debug, Clone)]
pub struct FactorView {
    pub label: &'static str,
    /// kg CO2 per km, or "—" if the mode has no factor
    pub factor: String,
}

impl FactorView {
    /// One row per offered mode.
    pub fn from_table(factors: &EmissionFactorTable) -> Vec<Self> {
        TransportMode::ALL
            .iter()
            .map(|mode| Self {
                label: mode.label(),
                factor: factors
                    .factor(mode.as_str())
                    .map(|f| format!("{f}"))
                    .unwrap_or_else(|| "—".to_string()),
            })
            .collect()
    }
}
