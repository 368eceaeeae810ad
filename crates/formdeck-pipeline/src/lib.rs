//! formdeck Pipeline
//!
//! Validation → encoding → record construction → store, plus the two form
//! variants that drive it:
//! - [`ManualForm`]: immediate per-field validation, first message per field
//! - [`SchemaForm`]: whole-candidate validation on every change, submit gated
//!   on validity, with a password strength meter
//!
//! # Example
//!
//! ```rust,ignore
//! use formdeck_pipeline::{SchemaForm, SubmissionPipeline};
//! use formdeck_store::RecordStore;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let store = Arc::new(RecordStore::new());
//! let pipeline = SubmissionPipeline::new(Arc::clone(&store), Default::default());
//!
//! let mut form = SchemaForm::new(pipeline.ruleset().clone());
//! form.load(candidate);
//! let record = form.submit(&pipeline).await?;
//! println!("accepted {}", record.id);
//! # Ok(())
//! # }
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod error;
pub mod manual;
pub mod pipeline;
pub mod schema;

// Re-exports for convenience
pub use error::SubmitError;
pub use manual::ManualForm;
pub use pipeline::SubmissionPipeline;
pub use schema::SchemaForm;

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for driving submissions
    pub use crate::{ManualForm, SchemaForm, SubmissionPipeline, SubmitError};
    pub use formdeck_core::prelude::*;
    pub use formdeck_validation::{ReportMode, ValidationErrors};
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
