//! Core types for formdeck
//!
//! Defines the fundamental types shared by validation, encoding, storage
//! and the two form variants:
//! - Field and modal identifiers
//! - The raw candidate entered by the user
//! - Image uploads and where their bytes come from
//! - Accepted submission records

use crate::error::CoreError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use ulid::Ulid;

/// Unique record identifier (ULID, sortable by acceptance time)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub Ulid);

impl RecordId {
    /// Wrap an already generated ULID
    #[inline]
    #[must_use]
    pub fn from_ulid(ulid: Ulid) -> Self {
        Self(ulid)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Form fields, in the order the form presents them
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Name,
    Age,
    Email,
    Password,
    ConfirmPassword,
    Gender,
    Country,
    Image,
    AcceptTerms,
}

impl Field {
    /// Every field, in presentation order
    pub const ALL: [Field; 9] = [
        Field::Name,
        Field::Age,
        Field::Email,
        Field::Password,
        Field::ConfirmPassword,
        Field::Gender,
        Field::Country,
        Field::Image,
        Field::AcceptTerms,
    ];

    /// Wire name of the field (matches the serialized candidate keys)
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Age => "age",
            Field::Email => "email",
            Field::Password => "password",
            Field::ConfirmPassword => "confirmPassword",
            Field::Gender => "gender",
            Field::Country => "country",
            Field::Image => "image",
            Field::AcceptTerms => "acceptTerms",
        }
    }

    /// Whether the field is entered as free text
    #[must_use]
    pub const fn is_text(self) -> bool {
        !matches!(self, Field::Image | Field::AcceptTerms)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| CoreError::UnknownField(s.to_string()))
    }
}

/// Gender codes offered by the form's select box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    /// All selectable codes
    pub const ALL: [Gender; 3] = [Gender::Male, Gender::Female, Gender::Other];

    /// Stored code for this gender
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Gender {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Gender::ALL
            .into_iter()
            .find(|gender| gender.code() == s)
            .ok_or_else(|| CoreError::UnknownGender(s.to_string()))
    }
}

/// The two modal dialogs, one per form variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModalId {
    /// Manually-managed form with immediate field validation
    Manual,
    /// Schema-validated form with a gated submit button
    Schema,
}

impl ModalId {
    /// Both modals
    pub const ALL: [ModalId; 2] = [ModalId::Manual, ModalId::Schema];

    /// Identifier used on the command line and in logs
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            ModalId::Manual => "manual",
            ModalId::Schema => "schema",
        }
    }

    /// Dialog title shown by the presentation layer
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            ModalId::Manual => "Manual Form",
            ModalId::Schema => "Schema Form",
        }
    }
}

impl fmt::Display for ModalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModalId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ModalId::ALL
            .into_iter()
            .find(|modal| modal.as_str() == s)
            .ok_or_else(|| CoreError::UnknownModal(s.to_string()))
    }
}

/// Where the bytes of an upload live
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlobSource {
    /// Bytes already held in memory
    Bytes(Vec<u8>),
    /// File on disk, read lazily when encoded
    File(PathBuf),
}

/// A binary file selected by the user
///
/// `size` is the size declared at selection time; validation relies on it
/// without reading the bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    /// Original file name
    pub file_name: String,
    /// Declared media type (may be empty when unknown)
    pub media_type: String,
    /// Declared size in bytes
    pub size: u64,
    /// Byte source
    pub source: BlobSource,
}

impl ImageUpload {
    /// Upload backed by in-memory bytes
    #[must_use]
    pub fn from_bytes(
        file_name: impl Into<String>,
        media_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            media_type: media_type.into(),
            size: bytes.len() as u64,
            source: BlobSource::Bytes(bytes),
        }
    }

    /// Upload backed by a file on disk
    ///
    /// The size is taken from file metadata; the media type is guessed from
    /// the extension.
    ///
    /// # Errors
    /// - `CoreError::ImageMetadata` if the file cannot be inspected
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self, CoreError> {
        let path = path.as_ref();
        let metadata = tokio::fs::metadata(path)
            .await
            .map_err(|source| CoreError::ImageMetadata {
                path: path.to_path_buf(),
                source,
            })?;

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(Self {
            file_name,
            media_type: media_type_for_path(path).to_string(),
            size: metadata.len(),
            source: BlobSource::File(path.to_path_buf()),
        })
    }

    /// Override the guessed media type
    #[must_use]
    pub fn with_media_type(mut self, media_type: impl Into<String>) -> Self {
        self.media_type = media_type.into();
        self
    }

    /// An empty selection (zero bytes) counts as no file at all
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }
}

/// Guess a media type from a file extension
#[must_use]
pub fn media_type_for_path(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match ext.as_deref() {
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("txt") => "text/plain",
        _ => "",
    }
}

/// Raw field values as entered, prior to validation
///
/// Every text field is kept verbatim; `age` stays textual so that inputs
/// such as `"3.5"` or `"abc"` reach the ruleset unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Candidate {
    pub name: String,
    #[serde(deserialize_with = "age_from_number_or_text")]
    pub age: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub gender: String,
    pub country: String,
    pub accept_terms: bool,
    #[serde(skip)]
    pub image: Option<ImageUpload>,
}

impl Candidate {
    /// Current value of a text field
    ///
    /// Returns `None` for non-text fields.
    #[must_use]
    pub fn text(&self, field: Field) -> Option<&str> {
        let value = match field {
            Field::Name => &self.name,
            Field::Age => &self.age,
            Field::Email => &self.email,
            Field::Password => &self.password,
            Field::ConfirmPassword => &self.confirm_password,
            Field::Gender => &self.gender,
            Field::Country => &self.country,
            Field::Image | Field::AcceptTerms => return None,
        };
        Some(value.as_str())
    }

    /// Overwrite a text field
    ///
    /// # Errors
    /// - `CoreError::NotTextField` for `image` and `acceptTerms`
    pub fn set_text(&mut self, field: Field, value: impl Into<String>) -> Result<(), CoreError> {
        let slot = match field {
            Field::Name => &mut self.name,
            Field::Age => &mut self.age,
            Field::Email => &mut self.email,
            Field::Password => &mut self.password,
            Field::ConfirmPassword => &mut self.confirm_password,
            Field::Gender => &mut self.gender,
            Field::Country => &mut self.country,
            Field::Image | Field::AcceptTerms => return Err(CoreError::NotTextField(field)),
        };
        *slot = value.into();
        Ok(())
    }

    /// Attach an image, dropping empty selections
    #[must_use]
    pub fn with_image(mut self, image: ImageUpload) -> Self {
        self.image = Some(image).filter(|img| !img.is_empty());
        self
    }

    /// The attached image, if it holds any bytes
    #[inline]
    #[must_use]
    pub fn selected_image(&self) -> Option<&ImageUpload> {
        self.image.as_ref().filter(|img| !img.is_empty())
    }
}

fn age_from_number_or_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawAge {
        Text(String),
        Integer(i64),
        Float(f64),
    }

    Ok(match RawAge::deserialize(deserializer)? {
        RawAge::Text(text) => text,
        RawAge::Integer(n) => n.to_string(),
        RawAge::Float(x) => x.to_string(),
    })
}

/// Validated field values awaiting an id and timestamp
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordDraft {
    pub name: String,
    pub age: u32,
    pub email: String,
    pub gender: Gender,
    pub country: String,
    pub image: Option<String>,
}

impl RecordDraft {
    /// Seal the draft into an immutable record
    #[must_use]
    pub fn into_record(self, id: RecordId, created_at: DateTime<Utc>) -> SubmissionRecord {
        SubmissionRecord {
            id,
            name: self.name,
            age: self.age,
            email: self.email,
            gender: self.gender,
            country: self.country,
            image: self.image,
            created_at,
        }
    }
}

/// An accepted submission, as rendered in the card list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionRecord {
    pub id: RecordId,
    pub name: String,
    pub age: u32,
    pub email: String,
    pub gender: Gender,
    pub country: String,
    /// Data URI of the uploaded image
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn field_names_round_trip_through_from_str() {
        for field in Field::ALL {
            assert_eq!(Field::from_str(field.as_str()).unwrap(), field);
        }
        assert!(matches!(
            Field::from_str("nickname"),
            Err(CoreError::UnknownField(_))
        ));
    }

    #[test]
    fn gender_rejects_unknown_codes() {
        assert_eq!(Gender::from_str("female").unwrap(), Gender::Female);
        assert!(Gender::from_str("").is_err());
        assert!(Gender::from_str("Male").is_err());
    }

    #[test]
    fn candidate_text_access_skips_non_text_fields() {
        let mut candidate = Candidate::default();
        candidate.set_text(Field::ConfirmPassword, "secret").unwrap();

        assert_eq!(candidate.text(Field::ConfirmPassword), Some("secret"));
        assert_eq!(candidate.text(Field::AcceptTerms), None);
        assert!(matches!(
            candidate.set_text(Field::Image, "x"),
            Err(CoreError::NotTextField(Field::Image))
        ));
    }

    #[test]
    fn candidate_deserializes_numeric_and_textual_age() {
        let numeric: Candidate = serde_json::from_str(r#"{"name":"John","age":25}"#).unwrap();
        let fractional: Candidate = serde_json::from_str(r#"{"age":3.5}"#).unwrap();
        let textual: Candidate = serde_json::from_str(r#"{"age":"-5","acceptTerms":true}"#).unwrap();

        assert_eq!(numeric.age, "25");
        assert_eq!(numeric.name, "John");
        assert_eq!(fractional.age, "3.5");
        assert_eq!(textual.age, "-5");
        assert!(textual.accept_terms);
        assert_eq!(textual.email, "");
    }

    #[test]
    fn empty_upload_counts_as_no_image() {
        let candidate =
            Candidate::default().with_image(ImageUpload::from_bytes("a.png", "image/png", vec![]));
        assert!(candidate.image.is_none());

        let candidate = Candidate::default()
            .with_image(ImageUpload::from_bytes("a.png", "image/png", vec![1, 2, 3]));
        assert_eq!(candidate.selected_image().map(|i| i.size), Some(3));
    }

    #[test]
    fn media_type_is_guessed_from_extension() {
        assert_eq!(media_type_for_path(Path::new("photo.JPG")), "image/jpeg");
        assert_eq!(media_type_for_path(Path::new("photo.png")), "image/png");
        assert_eq!(media_type_for_path(Path::new("archive.tar")), "");
    }

    #[tokio::test]
    async fn upload_from_path_reads_size_from_metadata() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("avatar.png");
        std::fs::write(&path, [0u8; 42]).unwrap();

        let upload = ImageUpload::from_path(&path).await.unwrap();
        assert_eq!(upload.size, 42);
        assert_eq!(upload.media_type, "image/png");
        assert_eq!(upload.file_name, "avatar.png");
        assert_eq!(upload.source, BlobSource::File(path));
    }

    #[tokio::test]
    async fn upload_from_missing_path_fails() {
        let result = ImageUpload::from_path("/definitely/not/here.png").await;
        assert!(matches!(result, Err(CoreError::ImageMetadata { .. })));
    }
}
