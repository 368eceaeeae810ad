//! The form ruleset
//!
//! Every field owns an ordered list of rules. In
//! [`ReportMode::FirstPerField`] a field stops at its first failure; in
//! [`ReportMode::CollectAll`] every failing rule is reported. Both modes
//! run the same rules, so they always agree on whether a candidate is
//! accepted.
//!
//! The only cross-field rule is password confirmation: equality is checked
//! once the password passes all of its own rules and the confirmation is
//! non-empty.

use crate::report::{ReportMode, ValidationErrors};
use crate::strength::{has_digit, has_lowercase, has_special, has_uppercase};
use formdeck_core::{Candidate, Field, FormConfig, Gender, ImageUpload};
use once_cell::sync::Lazy;
use regex::Regex;
use std::str::FromStr;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\S+@\S+\.\S+$").expect("email pattern is valid"));

/// Accumulates the messages of one field
struct FieldCheck {
    mode: ReportMode,
    messages: Vec<String>,
}

impl FieldCheck {
    fn new(mode: ReportMode) -> Self {
        Self {
            mode,
            messages: Vec::new(),
        }
    }

    fn stopped(&self) -> bool {
        self.mode == ReportMode::FirstPerField && !self.messages.is_empty()
    }

    fn rule(&mut self, passed: bool, message: impl Into<String>) {
        if !self.stopped() && !passed {
            self.messages.push(message.into());
        }
    }

    fn is_clean(&self) -> bool {
        self.messages.is_empty()
    }
}

/// Parse an age the way the ruleset accepts it
///
/// Returns `Some` only for finite, positive, integral values that fit a
/// `u32` (so `"25"` and `"25.0"` both parse, `"3.5"` and `"0"` do not).
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn parse_age(raw: &str) -> Option<u32> {
    let value = parse_number(raw)?;
    if value > 0.0 && value.fract() == 0.0 && value <= f64::from(u32::MAX) {
        Some(value as u32)
    } else {
        None
    }
}

fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// A candidate that passed the ruleset, with typed values
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcceptedCandidate {
    pub name: String,
    pub age: u32,
    pub email: String,
    pub gender: Gender,
    pub country: String,
    pub image: Option<ImageUpload>,
}

/// The form ruleset, parameterized by [`FormConfig`] limits
#[derive(Debug, Clone, Default)]
pub struct Ruleset {
    config: FormConfig,
}

impl Ruleset {
    /// Create ruleset from configuration
    #[inline]
    #[must_use]
    pub fn new(config: FormConfig) -> Self {
        Self { config }
    }

    /// Active configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &FormConfig {
        &self.config
    }

    /// Validate the complete candidate in one pass (batch strategy)
    #[must_use]
    pub fn check(&self, candidate: &Candidate, mode: ReportMode) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        for field in Field::ALL {
            errors.set_field(field, self.check_field(field, candidate, mode));
        }
        tracing::debug!(
            failing_fields = errors.len(),
            messages = errors.message_count(),
            ?mode,
            "candidate checked"
        );
        errors
    }

    /// Messages for a single field, reading siblings from the candidate
    #[must_use]
    pub fn check_field(&self, field: Field, candidate: &Candidate, mode: ReportMode) -> Vec<String> {
        let mut check = FieldCheck::new(mode);
        match field {
            Field::Name => Self::name_rules(&mut check, &candidate.name),
            Field::Age => Self::age_rules(&mut check, &candidate.age),
            Field::Email => Self::email_rules(&mut check, &candidate.email),
            Field::Password => self.password_rules(&mut check, &candidate.password),
            Field::ConfirmPassword => self.confirm_rules(&mut check, candidate),
            Field::Gender => Self::gender_rules(&mut check, &candidate.gender),
            Field::Country => {
                check.rule(!candidate.country.is_empty(), "Country is required");
            }
            Field::Image => self.image_rules(&mut check, candidate.selected_image()),
            Field::AcceptTerms => {
                check.rule(
                    candidate.accept_terms,
                    "You must accept the terms and conditions",
                );
            }
        }
        check.messages
    }

    /// Whether the candidate would be accepted
    #[must_use]
    pub fn is_valid(&self, candidate: &Candidate) -> bool {
        self.check(candidate, ReportMode::FirstPerField).is_empty()
    }

    /// Validate and convert into typed values
    ///
    /// # Errors
    /// The field-keyed report when any rule fails
    pub fn accept(
        &self,
        candidate: &Candidate,
        mode: ReportMode,
    ) -> Result<AcceptedCandidate, ValidationErrors> {
        let mut errors = self.check(candidate, mode);
        if !errors.is_empty() {
            return Err(errors);
        }

        let age = parse_age(&candidate.age);
        let gender = Gender::from_str(&candidate.gender).ok();
        match (age, gender) {
            (Some(age), Some(gender)) => Ok(AcceptedCandidate {
                name: candidate.name.clone(),
                age,
                email: candidate.email.clone(),
                gender,
                country: candidate.country.clone(),
                image: candidate.selected_image().cloned(),
            }),
            (age, gender) => {
                if age.is_none() {
                    errors.push(Field::Age, "Age must be positive number");
                }
                if gender.is_none() {
                    errors.push(Field::Gender, "Unsupported gender");
                }
                Err(errors)
            }
        }
    }

    fn name_rules(check: &mut FieldCheck, name: &str) {
        check.rule(!name.is_empty(), "Name is required");
        check.rule(
            name.chars().next().is_some_and(|c| c.is_ascii_uppercase()),
            "Name must start with capital letter",
        );
    }

    fn age_rules(check: &mut FieldCheck, raw: &str) {
        check.rule(!raw.trim().is_empty(), "Age is required");
        let parsed = parse_number(raw);
        check.rule(
            parsed.is_some_and(|v| v > 0.0),
            "Age must be positive number",
        );
        if let Some(value) = parsed {
            check.rule(value.fract() == 0.0, "Age must be integer");
            check.rule(value <= f64::from(u32::MAX), "Age is out of range");
        }
    }

    fn email_rules(check: &mut FieldCheck, email: &str) {
        check.rule(!email.is_empty(), "Email is required");
        check.rule(EMAIL_RE.is_match(email), "Invalid email format");
    }

    fn password_rules(&self, check: &mut FieldCheck, password: &str) {
        let min_len = self.config.min_password_len;
        check.rule(!password.is_empty(), "Password is required");
        check.rule(
            password.chars().count() >= min_len,
            format!("Password must be at least {min_len} characters"),
        );
        check.rule(
            has_digit(password),
            "Password must contain at least one number",
        );
        check.rule(
            has_uppercase(password),
            "Password must contain at least one uppercase letter",
        );
        check.rule(
            has_lowercase(password),
            "Password must contain at least one lowercase letter",
        );
        check.rule(
            has_special(password),
            "Password must contain at least one special character",
        );
    }

    fn confirm_rules(&self, check: &mut FieldCheck, candidate: &Candidate) {
        check.rule(
            !candidate.confirm_password.is_empty(),
            "Please confirm your password",
        );

        let mut password_check = FieldCheck::new(ReportMode::FirstPerField);
        self.password_rules(&mut password_check, &candidate.password);

        if check.is_clean() && password_check.is_clean() {
            check.rule(
                candidate.confirm_password == candidate.password,
                "Passwords must match",
            );
        }
    }

    fn gender_rules(check: &mut FieldCheck, gender: &str) {
        check.rule(!gender.is_empty(), "Gender is required");
        if !gender.is_empty() {
            check.rule(Gender::from_str(gender).is_ok(), "Unsupported gender");
        }
    }

    fn image_rules(&self, check: &mut FieldCheck, image: Option<&ImageUpload>) {
        let Some(image) = image else {
            return;
        };
        check.rule(image.size <= self.config.max_image_bytes, "File too large");
        check.rule(
            self.config.accepts_media_type(&image.media_type),
            "Unsupported file format",
        );
    }
}
