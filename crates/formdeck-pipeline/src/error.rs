//! Submission errors
//!
//! Validation failures are expected and field-keyed. Encoding and store
//! failures are unexpected; they carry no field and are shown to the user
//! as a generic message.

use formdeck_encoding::EncodingError;
use formdeck_store::StoreError;
use formdeck_validation::ValidationErrors;

/// Message shown when a submission fails for a reason unrelated to input
pub const GENERIC_FAILURE_MESSAGE: &str = "Submission failed, please try again";

/// Submission pipeline errors
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    /// One or more fields failed validation
    #[error("validation failed: {0}")]
    Validation(ValidationErrors),

    /// Submit attempted while the form is invalid (disabled submit button)
    #[error("form not ready: {0}")]
    NotReady(ValidationErrors),

    /// Image could not be converted to text
    #[error("image encoding failed: {0}")]
    Encoding(#[from] EncodingError),

    /// Store refused the record
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}

impl SubmitError {
    /// Field errors, if this is an input problem
    #[must_use]
    pub fn validation_errors(&self) -> Option<&ValidationErrors> {
        match self {
            Self::Validation(errors) | Self::NotReady(errors) => Some(errors),
            Self::Encoding(_) | Self::Store(_) => None,
        }
    }

    /// Whether the user can fix this by editing fields
    #[inline]
    #[must_use]
    pub fn is_input_error(&self) -> bool {
        self.validation_errors().is_some()
    }

    /// Every submission failure can be retried by the user
    #[inline]
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        true
    }

    /// Text for the presentation layer
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(errors) | Self::NotReady(errors) => errors.to_string(),
            Self::Encoding(_) | Self::Store(_) => GENERIC_FAILURE_MESSAGE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formdeck_core::Field;

    #[test]
    fn encoding_failures_get_generic_message() {
        let err = SubmitError::from(EncodingError::Read {
            source: std::io::Error::new(std::io::ErrorKind::Other, "disk gone"),
        });
        assert!(!err.is_input_error());
        assert!(err.is_retryable());
        assert_eq!(err.user_message(), GENERIC_FAILURE_MESSAGE);
        assert!(err.to_string().contains("disk gone"));
    }

    #[test]
    fn validation_failures_expose_fields() {
        let mut errors = ValidationErrors::new();
        errors.push(Field::Age, "Age must be integer");
        let err = SubmitError::Validation(errors);

        assert!(err.is_input_error());
        assert_eq!(
            err.validation_errors().and_then(|e| e.first(Field::Age)),
            Some("Age must be integer")
        );
        assert_eq!(err.user_message(), "age: Age must be integer");
    }
}
