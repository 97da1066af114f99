//! City name normalization and ordering.
//!
//! City names are typed by hand, so two spellings that differ only in case or
//! surrounding whitespace refer to the same city. Names are also brought to
//! composed (NFC) form, so a catalog saved with decomposed accents still
//! matches what the user types.
//!
//! Ordering for display uses a base-letter comparison: accents are ignored,
//! so "São Paulo" and "Sao Paulo" compare equal and sort next to each other.

use std::cmp::Ordering;

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Normalize a city name for matching: trim whitespace, compose, and lowercase.
///
/// # Examples
///
/// ```
/// use co2_server::domain::normalize_city;
///
/// assert_eq!(normalize_city("  São Paulo "), "são paulo");
/// assert_eq!(normalize_city("RIO DE JANEIRO"), "rio de janeiro");
/// assert_eq!(normalize_city("Sa\u{303}o Paulo"), "são paulo");
/// ```
pub fn normalize_city(name: &str) -> String {
    name.trim().nfc().collect::<String>().to_lowercase()
}

/// Build the collation key used to sort city names.
///
/// The name is lowercased and decomposed, then combining marks are dropped,
/// leaving base letters only. Comparing keys gives a base-sensitivity ordering
/// whether the input was composed or decomposed.
pub fn collation_key(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .map(fold_stroke)
        .collect()
}

/// Compare two city names by base letters only.
pub fn compare_cities(a: &str, b: &str) -> Ordering {
    collation_key(a).cmp(&collation_key(b))
}

/// Letters whose accent is part of the glyph and has no decomposition.
fn fold_stroke(c: char) -> char {
    match c {
        'đ' => 'd',
        'ħ' => 'h',
        'ı' => 'i',
        'ŀ' | 'ł' => 'l',
        'ø' => 'o',
        'ŧ' => 't',
        other => other,
    }
}
