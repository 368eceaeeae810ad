//! Incremental (per-field) validation
//!
//! Keeps a live error map and refreshes one field at a time as the user
//! types, reading sibling values from the candidate. It delegates every
//! decision to [`Ruleset::check_field`], so once each field has been
//! touched the live map equals a batch check in the same mode.

use crate::report::{ReportMode, ValidationErrors};
use crate::rules::Ruleset;
use formdeck_core::{Candidate, Field};

/// Live error map driven by field changes
#[derive(Debug, Clone)]
pub struct IncrementalValidator {
    ruleset: Ruleset,
    mode: ReportMode,
    errors: ValidationErrors,
}

impl IncrementalValidator {
    /// Create validator reporting the first failure per field
    #[inline]
    #[must_use]
    pub fn new(ruleset: Ruleset) -> Self {
        Self::with_mode(ruleset, ReportMode::FirstPerField)
    }

    /// Create validator with an explicit report mode
    #[inline]
    #[must_use]
    pub fn with_mode(ruleset: Ruleset, mode: ReportMode) -> Self {
        Self {
            ruleset,
            mode,
            errors: ValidationErrors::new(),
        }
    }

    /// Underlying ruleset
    #[inline]
    #[must_use]
    pub fn ruleset(&self) -> &Ruleset {
        &self.ruleset
    }

    /// Re-validate a field after its value changed
    ///
    /// A password change also refreshes an already entered confirmation,
    /// since its outcome depends on the password. Returns the message now
    /// shown for `field`, if any.
    pub fn field_changed(&mut self, field: Field, candidate: &Candidate) -> Option<&str> {
        self.refresh(field, candidate);
        if field == Field::Password && !candidate.confirm_password.is_empty() {
            self.refresh(Field::ConfirmPassword, candidate);
        }
        self.errors.first(field)
    }

    fn refresh(&mut self, field: Field, candidate: &Candidate) {
        let messages = self.ruleset.check_field(field, candidate, self.mode);
        tracing::trace!(%field, failing = !messages.is_empty(), "field revalidated");
        self.errors.set_field(field, messages);
    }

    /// Current live errors
    #[inline]
    #[must_use]
    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    /// Replace the live map, e.g. with the report of a rejected submit
    pub fn replace(&mut self, errors: ValidationErrors) {
        self.errors = errors;
    }

    /// Forget all errors
    pub fn reset(&mut self) {
        self.errors = ValidationErrors::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn validator() -> IncrementalValidator {
        IncrementalValidator::new(Ruleset::default())
    }

    #[test]
    fn only_changed_fields_are_reported() {
        let mut v = validator();
        let mut candidate = Candidate::default();

        candidate.name = "john".to_string();
        assert_eq!(
            v.field_changed(Field::Name, &candidate),
            Some("Name must start with capital letter")
        );
        assert_eq!(v.errors().len(), 1);

        candidate.name = "John".to_string();
        assert_eq!(v.field_changed(Field::Name, &candidate), None);
        assert!(v.errors().is_empty());
    }

    #[test]
    fn confirmation_reads_sibling_password() {
        let mut v = validator();
        let mut candidate = Candidate {
            password: "P@ssw0rd".to_string(),
            confirm_password: "P@ssw0r".to_string(),
            ..Candidate::default()
        };

        assert_eq!(
            v.field_changed(Field::ConfirmPassword, &candidate),
            Some("Passwords must match")
        );

        candidate.confirm_password = "P@ssw0rd".to_string();
        assert_eq!(v.field_changed(Field::ConfirmPassword, &candidate), None);
    }

    #[test]
    fn password_change_refreshes_confirmation() {
        let mut v = validator();
        let mut candidate = Candidate {
            password: "P@ssw0rd".to_string(),
            confirm_password: "P@ssw0rd".to_string(),
            ..Candidate::default()
        };
        assert_eq!(v.field_changed(Field::ConfirmPassword, &candidate), None);

        candidate.password = "N3w@Passw".to_string();
        v.field_changed(Field::Password, &candidate);
        assert_eq!(
            v.errors().first(Field::ConfirmPassword),
            Some("Passwords must match")
        );
    }

    #[test]
    fn touching_every_field_matches_batch_check() {
        let ruleset = Ruleset::default();
        let mut v = IncrementalValidator::new(ruleset.clone());
        let candidate = Candidate {
            name: "ann".to_string(),
            age: "3.5".to_string(),
            email: "ann@example.com".to_string(),
            password: "weak".to_string(),
            confirm_password: "weak".to_string(),
            ..Candidate::default()
        };

        for field in Field::ALL {
            v.field_changed(field, &candidate);
        }
        assert_eq!(
            v.errors(),
            &ruleset.check(&candidate, ReportMode::FirstPerField)
        );
    }

    #[test]
    fn replace_and_reset() {
        let mut v = validator();
        let mut report = ValidationErrors::new();
        report.push(Field::Email, "Invalid email format");

        v.replace(report.clone());
        assert_eq!(v.errors(), &report);

        v.reset();
        assert!(v.errors().is_empty());
    }
}
