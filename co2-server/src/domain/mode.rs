//! Transport modes.

use std::fmt;

/// Error returned when parsing an unknown transport mode.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown transport mode: {0:?}")]
pub struct UnknownMode(pub String);

/// A travel method with its own emission factor.
///
/// This is the closed set offered to the user. The emission factor table is
/// keyed by [`TransportMode::as_str`].
///
/// # Examples
///
/// ```
/// use co2_server::domain::TransportMode;
///
/// let mode = TransportMode::parse(" Car ").unwrap();
/// assert_eq!(mode, TransportMode::Car);
/// assert_eq!(mode.as_str(), "car");
/// assert_eq!(mode.label(), "Carro");
///
/// assert!(TransportMode::parse("plane").is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransportMode {
    Bicycle,
    Car,
    Bus,
}

impl TransportMode {
    /// All modes, in the order they are offered on the form.
    pub const ALL: [TransportMode; 3] = [
        TransportMode::Bicycle,
        TransportMode::Car,
        TransportMode::Bus,
    ];

    /// Parse a mode identifier. Surrounding whitespace and case are ignored.
    pub fn parse(s: &str) -> Result<Self, UnknownMode> {
        match s.trim().to_ascii_lowercase().as_str() {
            "bicycle" => Ok(TransportMode::Bicycle),
            "car" => Ok(TransportMode::Car),
            "bus" => Ok(TransportMode::Bus),
            _ => Err(UnknownMode(s.to_string())),
        }
    }

    /// The identifier used as the emission factor key.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransportMode::Bicycle => "bicycle",
            TransportMode::Car => "car",
            TransportMode::Bus => "bus",
        }
    }

    /// Human-readable label (pt-BR).
    pub fn label(&self) -> &'static str {
        match self {
            TransportMode::Bicycle => "Bicicleta",
            TransportMode::Car => "Carro",
            TransportMode::Bus => "Ônibus",
        }
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Display label for a raw mode identifier.
///
/// Unknown identifiers are shown as-is.
pub fn mode_label(raw: &str) -> String {
    TransportMode::parse(raw)
        .map(|m| m.label().to_string())
        .unwrap_or_else(|_| raw.to_string())
}
