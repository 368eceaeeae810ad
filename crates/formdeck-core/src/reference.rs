//! Reference data offered as input suggestions
//!
//! The list only feeds suggestions; `country` accepts any non-empty string.

/// Countries suggested for the `country` field
pub const COUNTRIES: [&str; 12] = [
    "United States",
    "Canada",
    "Mexico",
    "Brazil",
    "United Kingdom",
    "Germany",
    "France",
    "Italy",
    "Spain",
    "Australia",
    "Japan",
    "China",
];

/// Default country suggestions
#[inline]
#[must_use]
pub fn countries() -> &'static [&'static str] {
    &COUNTRIES
}
