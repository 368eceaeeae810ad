//! formdeck Core
//!
//! Shared vocabulary for the form pipeline:
//! - [`Candidate`]: raw field values as entered by the user
//! - [`SubmissionRecord`]: an accepted, immutable submission
//! - [`Field`], [`Gender`], [`ModalId`]: the fixed enumerations of the form
//! - [`ImageUpload`]: an optional binary attachment and where its bytes live
//! - [`FormConfig`]: tunable limits (image size, accepted types, password length)
//!
//! # Example
//!
//! ```rust
//! use formdeck_core::{Candidate, Field};
//!
//! let mut candidate = Candidate::default();
//! candidate.set_text(Field::Name, "John").unwrap();
//! assert_eq!(candidate.text(Field::Name), Some("John"));
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod config;
pub mod error;
pub mod reference;
pub mod types;

// Re-exports for convenience
pub use config::{ConfigError, FormConfig};
pub use error::CoreError;
pub use reference::{countries, COUNTRIES};
pub use types::{
    media_type_for_path, BlobSource, Candidate, Field, Gender, ImageUpload, ModalId, RecordDraft,
    RecordId, SubmissionRecord,
};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with formdeck types
    pub use crate::{
        Candidate, Field, FormConfig, Gender, ImageUpload, ModalId, RecordDraft, RecordId,
        SubmissionRecord,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
