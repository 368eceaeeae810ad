//! Functional tests for the two validation strategies.
//!
//! The incremental validator and the batch check share one ruleset, so once
//! every field has been edited they must report the same errors.

use formdeck_core::{Candidate, Field};
use formdeck_test_utils::{candidate_with, png_upload, valid_candidate};
use formdeck_validation::{IncrementalValidator, ReportMode, Ruleset};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn replay(candidate: &Candidate, mode: ReportMode) -> IncrementalValidator {
    let mut validator = IncrementalValidator::with_mode(Ruleset::default(), mode);
    for field in Field::ALL {
        validator.field_changed(field, candidate);
    }
    validator
}

/// The canonical candidate passes both strategies.
#[test]
fn valid_candidate_passes_everywhere() {
    let candidate = valid_candidate();
    let ruleset = Ruleset::default();

    assert!(ruleset.is_valid(&candidate));
    assert!(replay(&candidate, ReportMode::FirstPerField).errors().is_empty());
}

/// Editing the password after the confirmation refreshes the mismatch.
#[test]
fn password_edit_refreshes_confirmation() {
    let mut candidate = valid_candidate();
    let mut validator = replay(&candidate, ReportMode::FirstPerField);

    candidate.password = "N3w!Passw".to_string();
    validator.field_changed(Field::Password, &candidate);
    assert_eq!(
        validator.errors().first(Field::ConfirmPassword),
        Some("Passwords must match")
    );

    candidate.confirm_password = candidate.password.clone();
    validator.field_changed(Field::ConfirmPassword, &candidate);
    assert!(validator.errors().is_empty());
}

/// Oversized uploads fail the same way under both strategies.
#[test]
fn oversized_image_agrees() {
    let candidate = valid_candidate().with_image(png_upload(3_000_000));
    let batch = Ruleset::default().check(&candidate, ReportMode::CollectAll);

    assert_eq!(batch.messages(Field::Image), ["File too large".to_string()]);
    assert_eq!(replay(&candidate, ReportMode::CollectAll).errors(), &batch);
}

fn field_value() -> impl Strategy<Value = (Field, String)> {
    let field = prop::sample::select(
        Field::ALL
            .into_iter()
            .filter(|f| f.is_text())
            .collect::<Vec<_>>(),
    );
    (field, "[ -~]{0,12}")
}

proptest! {
    /// Any single edit of the valid candidate yields identical reports.
    #[test]
    fn strategies_agree_after_one_edit((field, value) in field_value()) {
        let candidate = candidate_with(field, &value);
        for mode in [ReportMode::FirstPerField, ReportMode::CollectAll] {
            let batch = Ruleset::default().check(&candidate, mode);
            let live = replay(&candidate, mode);
            prop_assert_eq!(live.errors(), &batch);
        }
    }
}
