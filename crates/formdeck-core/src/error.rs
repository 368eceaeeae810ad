//! Error types for formdeck core types

use crate::types::Field;
use std::path::PathBuf;

/// Errors raised while building or parsing core values
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Field name not part of the form
    #[error("unknown field: {0}")]
    UnknownField(String),

    /// Gender code outside the fixed set
    #[error("unknown gender code: {0}")]
    UnknownGender(String),

    /// Modal identifier outside the fixed set
    #[error("unknown modal: {0}")]
    UnknownModal(String),

    /// Attempt to write text into a non-text field
    #[error("field '{0}' does not hold text")]
    NotTextField(Field),

    /// Image file could not be inspected
    #[error("failed to inspect image {path}: {source}")]
    ImageMetadata {
        /// File that was inspected
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },
}
