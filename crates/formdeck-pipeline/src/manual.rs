//! Manually-managed form variant
//!
//! Values live in the form (the equivalent of reading DOM inputs through a
//! ref) and each change is validated on its own. On submit the whole
//! candidate is batch-checked, first message per field, and the resulting
//! report replaces the live errors.

use crate::error::SubmitError;
use crate::pipeline::SubmissionPipeline;
use formdeck_core::{Candidate, CoreError, Field, ImageUpload, ModalId, SubmissionRecord};
use formdeck_validation::{IncrementalValidator, ReportMode, Ruleset, ValidationErrors};

/// Form with immediate field-level validation
#[derive(Debug, Clone)]
pub struct ManualForm {
    candidate: Candidate,
    validator: IncrementalValidator,
}

impl ManualForm {
    /// Modal hosting this variant
    pub const MODAL: ModalId = ModalId::Manual;

    /// Create an empty form
    #[must_use]
    pub fn new(ruleset: Ruleset) -> Self {
        Self {
            candidate: Candidate::default(),
            validator: IncrementalValidator::new(ruleset),
        }
    }

    /// Current values
    #[inline]
    #[must_use]
    pub fn candidate(&self) -> &Candidate {
        &self.candidate
    }

    /// Errors currently shown under the inputs
    #[inline]
    #[must_use]
    pub fn errors(&self) -> &ValidationErrors {
        self.validator.errors()
    }

    /// Type into a text field
    ///
    /// Returns the message now shown for the field.
    ///
    /// # Errors
    /// - `CoreError::NotTextField` for `image` and `acceptTerms`
    pub fn set_text(
        &mut self,
        field: Field,
        value: impl Into<String>,
    ) -> Result<Option<&str>, CoreError> {
        self.candidate.set_text(field, value)?;
        Ok(self.validator.field_changed(field, &self.candidate))
    }

    /// Tick or untick the terms checkbox
    pub fn set_accept_terms(&mut self, accepted: bool) -> Option<&str> {
        self.candidate.accept_terms = accepted;
        self.validator
            .field_changed(Field::AcceptTerms, &self.candidate)
    }

    /// Select or clear the image file
    pub fn set_image(&mut self, image: Option<ImageUpload>) -> Option<&str> {
        self.candidate.image = image.filter(|img| !img.is_empty());
        self.validator.field_changed(Field::Image, &self.candidate)
    }

    /// Fill every input at once, validating each non-empty text field
    pub fn load(&mut self, candidate: Candidate) {
        self.candidate = candidate;
        self.validator.reset();
        for field in Field::ALL {
            let touched = self
                .candidate
                .text(field)
                .map_or(field == Field::Image, |text| !text.is_empty());
            if touched {
                self.validator.field_changed(field, &self.candidate);
            }
        }
    }

    /// Submit through the pipeline
    ///
    /// On success the form is cleared, as the modal closes with it.
    ///
    /// # Errors
    /// As [`SubmissionPipeline::submit`]; validation errors also become the
    /// live error map.
    pub async fn submit(
        &mut self,
        pipeline: &SubmissionPipeline,
    ) -> Result<SubmissionRecord, SubmitError> {
        match pipeline
            .submit(Self::MODAL, &self.candidate, ReportMode::FirstPerField)
            .await
        {
            Ok(record) => {
                self.candidate = Candidate::default();
                self.validator.reset();
                Ok(record)
            }
            Err(err) => {
                if let Some(errors) = err.validation_errors() {
                    self.validator.replace(errors.clone());
                }
                Err(err)
            }
        }
    }
}
