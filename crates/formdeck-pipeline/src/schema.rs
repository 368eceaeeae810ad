//! Schema-driven form variant
//!
//! Every change re-runs the whole ruleset in collect-all mode. Errors are
//! only displayed for fields the user has touched, while submission is
//! gated on the full candidate being valid.

use crate::error::SubmitError;
use crate::pipeline::SubmissionPipeline;
use formdeck_core::{Candidate, CoreError, Field, ImageUpload, ModalId, SubmissionRecord};
use formdeck_validation::{ReportMode, Ruleset, StrengthMeter, ValidationErrors};
use std::collections::BTreeSet;

/// Form validated as a whole on every change
#[derive(Debug, Clone)]
pub struct SchemaForm {
    candidate: Candidate,
    ruleset: Ruleset,
    errors: ValidationErrors,
    touched: BTreeSet<Field>,
}

impl SchemaForm {
    /// Modal hosting this variant
    pub const MODAL: ModalId = ModalId::Schema;

    /// Create an empty form; terms start unaccepted
    #[must_use]
    pub fn new(ruleset: Ruleset) -> Self {
        let candidate = Candidate::default();
        let errors = ruleset.check(&candidate, ReportMode::CollectAll);
        Self {
            candidate,
            ruleset,
            errors,
            touched: BTreeSet::new(),
        }
    }

    /// Current values
    #[inline]
    #[must_use]
    pub fn candidate(&self) -> &Candidate {
        &self.candidate
    }

    /// Every failing rule, touched or not
    #[inline]
    #[must_use]
    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    /// Errors for fields the user has interacted with
    #[must_use]
    pub fn visible_errors(&self) -> ValidationErrors {
        self.errors
            .clone()
            .retain_fields(|field| self.touched.contains(&field))
    }

    /// Whether the submit button is enabled
    #[inline]
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Strength meter for the current password, hidden while it is empty
    #[must_use]
    pub fn strength_meter(&self) -> Option<StrengthMeter> {
        (!self.candidate.password.is_empty())
            .then(|| StrengthMeter::for_password(&self.candidate.password))
    }

    /// Type into a text field
    ///
    /// # Errors
    /// - `CoreError::NotTextField` for `image` and `acceptTerms`
    pub fn set_text(&mut self, field: Field, value: impl Into<String>) -> Result<(), CoreError> {
        self.candidate.set_text(field, value)?;
        self.changed(field);
        Ok(())
    }

    /// Tick or untick the terms checkbox
    pub fn set_accept_terms(&mut self, accepted: bool) {
        self.candidate.accept_terms = accepted;
        self.changed(Field::AcceptTerms);
    }

    /// Select or clear the image file
    pub fn set_image(&mut self, image: Option<ImageUpload>) {
        self.candidate.image = image.filter(|img| !img.is_empty());
        self.changed(Field::Image);
    }

    /// Fill every input at once, marking all fields touched
    pub fn load(&mut self, candidate: Candidate) {
        self.candidate = candidate;
        self.touched.extend(Field::ALL);
        self.revalidate();
    }

    fn changed(&mut self, field: Field) {
        self.touched.insert(field);
        self.revalidate();
    }

    fn revalidate(&mut self) {
        self.errors = self.ruleset.check(&self.candidate, ReportMode::CollectAll);
    }

    /// Submit through the pipeline
    ///
    /// # Errors
    /// - `SubmitError::NotReady` while the form is invalid; the pipeline is
    ///   not invoked and every field becomes touched
    /// - Otherwise as [`SubmissionPipeline::submit`]
    pub async fn submit(
        &mut self,
        pipeline: &SubmissionPipeline,
    ) -> Result<SubmissionRecord, SubmitError> {
        if !self.is_valid() {
            self.touched.extend(Field::ALL);
            return Err(SubmitError::NotReady(self.errors.clone()));
        }

        let record = pipeline
            .submit(Self::MODAL, &self.candidate, ReportMode::CollectAll)
            .await?;

        self.candidate = Candidate::default();
        self.touched.clear();
        self.revalidate();
        Ok(record)
    }
}
