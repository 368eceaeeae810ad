//! formdeck Validation
//!
//! One ruleset, two ways of running it.
//!
//! # Overview
//!
//! - [`Ruleset`]: pure function from a complete [`Candidate`] to
//!   [`ValidationErrors`] (the batch strategy)
//! - [`IncrementalValidator`]: per-field wrapper over the same ruleset used
//!   for live feedback while typing
//! - [`password_strength`]: 0–5 score behind the strength meter
//!
//! # Example
//!
//! ```rust
//! use formdeck_core::{Candidate, Field, FormConfig};
//! use formdeck_validation::{ReportMode, Ruleset};
//!
//! let ruleset = Ruleset::new(FormConfig::default());
//! let errors = ruleset.check(&Candidate::default(), ReportMode::FirstPerField);
//! assert_eq!(errors.first(Field::Name), Some("Name is required"));
//! ```
//!
//! [`Candidate`]: formdeck_core::Candidate

#![warn(unreachable_pub)]

pub mod incremental;
pub mod report;
pub mod rules;
pub mod strength;

// Re-exports
pub use incremental::IncrementalValidator;
pub use report::{ReportMode, ValidationErrors};
pub use rules::{parse_age, AcceptedCandidate, Ruleset};
pub use strength::{password_strength, StrengthMeter, MAX_STRENGTH, STRENGTH_LABELS};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for validation
    pub use crate::{
        password_strength, AcceptedCandidate, IncrementalValidator, ReportMode, Ruleset,
        StrengthMeter, ValidationErrors,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
