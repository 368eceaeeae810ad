//! Submission pipeline
//!
//! # Workflow
//! 1. Batch-validate the candidate in the caller's report mode
//! 2. On failure return the field errors; the store is untouched
//! 3. Encode the image, if any
//! 4. Append the record and close the submitting modal

use crate::error::SubmitError;
use formdeck_core::{Candidate, FormConfig, ModalId, RecordDraft, SubmissionRecord};
use formdeck_encoding::{BlobEncoder, DataUriEncoder};
use formdeck_store::RecordStore;
use formdeck_validation::{ReportMode, Ruleset};
use std::sync::Arc;

/// Orchestrates validation, encoding and storage
#[derive(Debug, Clone)]
pub struct SubmissionPipeline {
    store: Arc<RecordStore>,
    ruleset: Ruleset,
    encoder: Arc<dyn BlobEncoder>,
}

impl SubmissionPipeline {
    /// Create pipeline writing into `store`
    #[must_use]
    pub fn new(store: Arc<RecordStore>, config: FormConfig) -> Self {
        Self {
            store,
            ruleset: Ruleset::new(config),
            encoder: Arc::new(DataUriEncoder::new()),
        }
    }

    /// With a custom image encoder
    #[must_use]
    pub fn with_encoder(mut self, encoder: Arc<dyn BlobEncoder>) -> Self {
        self.encoder = encoder;
        self
    }

    /// Ruleset used for batch validation
    #[inline]
    #[must_use]
    pub fn ruleset(&self) -> &Ruleset {
        &self.ruleset
    }

    /// Target store
    #[inline]
    #[must_use]
    pub fn store(&self) -> &Arc<RecordStore> {
        &self.store
    }

    /// Run a submission from the form shown in `modal`
    ///
    /// # Errors
    /// - `SubmitError::Validation` with field messages; nothing is stored
    /// - `SubmitError::Encoding` if the image cannot be read; nothing is stored
    /// - `SubmitError::Store` if the store rejects the record
    pub async fn submit(
        &self,
        modal: ModalId,
        candidate: &Candidate,
        mode: ReportMode,
    ) -> Result<SubmissionRecord, SubmitError> {
        let accepted = match self.ruleset.accept(candidate, mode) {
            Ok(accepted) => accepted,
            Err(errors) => {
                tracing::warn!(
                    %modal,
                    failing_fields = errors.len(),
                    "submission rejected: {errors}"
                );
                return Err(SubmitError::Validation(errors));
            }
        };

        let image = match &accepted.image {
            Some(upload) => match self.encoder.encode(upload).await {
                Ok(uri) => Some(uri),
                Err(e) => {
                    tracing::error!(%modal, file = %upload.file_name, "error submitting form: {e}");
                    return Err(SubmitError::from(e));
                }
            },
            None => None,
        };

        let record = self.store.append(RecordDraft {
            name: accepted.name,
            age: accepted.age,
            email: accepted.email,
            gender: accepted.gender,
            country: accepted.country,
            image,
        })?;
        self.store.close_modal(modal);

        tracing::info!(%modal, id = %record.id, "submission accepted");
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use formdeck_core::{Field, ImageUpload};
    use formdeck_encoding::EncodingError;
    use pretty_assertions::assert_eq;

    fn john() -> Candidate {
        Candidate {
            name: "John".to_string(),
            age: "25".to_string(),
            email: "john@example.com".to_string(),
            password: "P@ssw0rd".to_string(),
            confirm_password: "P@ssw0rd".to_string(),
            gender: "male".to_string(),
            country: "United States".to_string(),
            accept_terms: true,
            image: None,
        }
    }

    fn pipeline() -> SubmissionPipeline {
        SubmissionPipeline::new(Arc::new(RecordStore::new()), FormConfig::default())
    }

    #[derive(Debug)]
    struct BrokenDisk;

    #[async_trait]
    impl BlobEncoder for BrokenDisk {
        async fn encode(&self, _upload: &ImageUpload) -> Result<String, EncodingError> {
            Err(EncodingError::Read {
                source: std::io::Error::new(std::io::ErrorKind::Other, "Test error"),
            })
        }
    }

    #[tokio::test]
    async fn accepted_candidate_lands_in_store_and_closes_modal() {
        let pipeline = pipeline();
        pipeline.store().open_modal(ModalId::Schema);

        let record = pipeline
            .submit(ModalId::Schema, &john(), ReportMode::CollectAll)
            .await
            .unwrap();

        assert_eq!(record.name, "John");
        assert_eq!(record.age, 25);
        assert_eq!(record.image, None);
        assert_eq!(pipeline.store().records(), vec![record]);
        assert!(!pipeline.store().is_modal_open(ModalId::Schema));
    }

    #[tokio::test]
    async fn rejected_candidate_leaves_store_and_modal_alone() {
        let pipeline = pipeline();
        pipeline.store().open_modal(ModalId::Manual);
        let mut candidate = john();
        candidate.confirm_password = "different".to_string();

        let err = pipeline
            .submit(ModalId::Manual, &candidate, ReportMode::FirstPerField)
            .await
            .unwrap_err();

        let errors = err.validation_errors().unwrap();
        assert_eq!(errors.first(Field::ConfirmPassword), Some("Passwords must match"));
        assert!(pipeline.store().is_empty());
        assert!(pipeline.store().is_modal_open(ModalId::Manual));
    }

    #[tokio::test]
    async fn image_is_stored_as_data_uri() {
        let pipeline = pipeline();
        let candidate = john().with_image(ImageUpload::from_bytes(
            "avatar.png",
            "image/png",
            b"test".to_vec(),
        ));

        let record = pipeline
            .submit(ModalId::Manual, &candidate, ReportMode::FirstPerField)
            .await
            .unwrap();
        assert_eq!(record.image.as_deref(), Some("data:image/png;base64,dGVzdA=="));
    }

    #[tokio::test]
    async fn encoding_failure_is_surfaced_without_storing() {
        let pipeline = pipeline().with_encoder(Arc::new(BrokenDisk));
        pipeline.store().open_modal(ModalId::Schema);
        let candidate =
            john().with_image(ImageUpload::from_bytes("a.jpg", "image/jpeg", vec![1, 2]));

        let err = pipeline
            .submit(ModalId::Schema, &candidate, ReportMode::CollectAll)
            .await
            .unwrap_err();

        assert!(matches!(err, SubmitError::Encoding(_)));
        assert!(pipeline.store().is_empty());
        assert!(pipeline.store().is_modal_open(ModalId::Schema));
    }

    #[tokio::test]
    async fn validation_runs_before_encoding() {
        let pipeline = pipeline().with_encoder(Arc::new(BrokenDisk));
        let candidate = john().with_image(ImageUpload::from_bytes(
            "big.png",
            "image/png",
            vec![0; 3_000_000],
        ));

        let err = pipeline
            .submit(ModalId::Schema, &candidate, ReportMode::CollectAll)
            .await
            .unwrap_err();
        assert_eq!(
            err.validation_errors().and_then(|e| e.first(Field::Image)),
            Some("File too large")
        );
    }
}
