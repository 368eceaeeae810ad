//! Password strength scoring
//!
//! One point per independent property: length, digit, uppercase,
//! lowercase, special character.

use serde::Serialize;

/// Highest achievable score
pub const MAX_STRENGTH: u8 = 5;

/// Minimum length (in characters) that earns the length point
pub const STRENGTH_MIN_LEN: usize = 8;

/// Meter labels, indexed by `score - 1`
pub const STRENGTH_LABELS: [&str; 5] = ["Very Weak", "Weak", "Fair", "Good", "Strong"];

pub(crate) fn has_digit(s: &str) -> bool {
    s.chars().any(|c| c.is_ascii_digit())
}

pub(crate) fn has_uppercase(s: &str) -> bool {
    s.chars().any(|c| c.is_ascii_uppercase())
}

pub(crate) fn has_lowercase(s: &str) -> bool {
    s.chars().any(|c| c.is_ascii_lowercase())
}

/// Anything outside `[A-Za-z0-9]`, including non-ASCII characters
pub(crate) fn has_special(s: &str) -> bool {
    s.chars().any(|c| !c.is_ascii_alphanumeric())
}

/// Score a password from 0 to [`MAX_STRENGTH`]
#[must_use]
pub fn password_strength(password: &str) -> u8 {
    [
        password.chars().count() >= STRENGTH_MIN_LEN,
        has_digit(password),
        has_uppercase(password),
        has_lowercase(password),
        has_special(password),
    ]
    .into_iter()
    .map(u8::from)
    .sum()
}

/// Presentation of a score as a labelled meter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StrengthMeter {
    pub score: u8,
    pub label: &'static str,
    /// Filled share of the bar, 0–100
    pub width_percent: u8,
}

impl StrengthMeter {
    /// Meter for a raw score; scores above the maximum are clamped
    #[must_use]
    pub fn from_score(score: u8) -> Self {
        let score = score.min(MAX_STRENGTH);
        let label = usize::from(score)
            .checked_sub(1)
            .and_then(|i| STRENGTH_LABELS.get(i))
            .copied()
            .unwrap_or(STRENGTH_LABELS[0]);

        Self {
            score,
            label,
            width_percent: score * 20,
        }
    }

    /// Meter for a password
    #[must_use]
    pub fn for_password(password: &str) -> Self {
        Self::from_score(password_strength(password))
    }

    /// Whether any segment of the bar is lit
    #[inline]
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.score >= 1
    }
}
