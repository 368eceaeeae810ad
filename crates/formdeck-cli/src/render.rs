//! Text rendering of records and field errors

use formdeck_core::SubmissionRecord;
use formdeck_validation::{StrengthMeter, ValidationErrors};
use std::fmt::Write as _;

pub(crate) const EMPTY_LIST: &str = "No submissions yet";

/// Card list, newest last
pub(crate) fn cards(records: &[SubmissionRecord]) -> String {
    if records.is_empty() {
        return format!("{EMPTY_LIST}\n");
    }

    let mut out = String::new();
    for (i, record) in records.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        card(&mut out, record);
    }
    out
}

fn card(out: &mut String, record: &SubmissionRecord) {
    // Writing to a String cannot fail
    let _ = writeln!(out, "## {}", record.name);
    let _ = writeln!(out, "Age: {}", record.age);
    let _ = writeln!(out, "Email: {}", record.email);
    let _ = writeln!(out, "Gender: {}", record.gender);
    let _ = writeln!(out, "Country: {}", record.country);
    if let Some(image) = &record.image {
        let _ = writeln!(out, "Image: {} chars", image.len());
    }
}

/// One line per message, grouped by field
pub(crate) fn field_errors(errors: &ValidationErrors) -> String {
    let mut out = String::new();
    for (field, messages) in errors.iter() {
        for message in messages {
            let _ = writeln!(out, "{field}: {message}");
        }
    }
    out
}

pub(crate) fn strength(meter: &StrengthMeter) -> String {
    format!("{}/5 {} ({}%)\n", meter.score, meter.label, meter.width_percent)
}
