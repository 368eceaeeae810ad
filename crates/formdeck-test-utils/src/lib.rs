//! Testing utilities for formdeck workspace
//!
//! Shared candidate fixtures, uploads and pipeline setup.

#![allow(missing_docs)]

use async_trait::async_trait;
use formdeck_core::{Candidate, Field, FormConfig, ImageUpload};
use formdeck_encoding::{BlobEncoder, EncodingError};
use formdeck_pipeline::SubmissionPipeline;
use formdeck_store::RecordStore;
use std::sync::Arc;

/// The canonical accepted candidate
pub fn valid_candidate() -> Candidate {
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

/// `valid_candidate` with one text field overwritten
pub fn candidate_with(field: Field, value: &str) -> Candidate {
    let mut candidate = valid_candidate();
    candidate.set_text(field, value).unwrap();
    candidate
}

/// In-memory PNG upload of `size` bytes
pub fn png_upload(size: usize) -> ImageUpload {
    ImageUpload::from_bytes("avatar.png", "image/png", vec![0x89; size])
}

pub fn test_store() -> Arc<RecordStore> {
    Arc::new(RecordStore::new())
}

pub fn test_pipeline() -> (Arc<RecordStore>, SubmissionPipeline) {
    let store = test_store();
    let pipeline = SubmissionPipeline::new(Arc::clone(&store), FormConfig::default());
    (store, pipeline)
}

/// Encoder that always fails as if the file vanished
#[derive(Debug, Default)]
pub struct FailingEncoder;

#[async_trait]
impl BlobEncoder for FailingEncoder {
    async fn encode(&self, _upload: &ImageUpload) -> Result<String, EncodingError> {
        Err(EncodingError::Read {
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "file vanished"),
        })
    }
}
