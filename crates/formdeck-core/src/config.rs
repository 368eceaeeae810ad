//! Form configuration
//!
//! Limits applied by the validation ruleset and the suggestion list handed
//! to the presentation layer. Loadable from TOML; every key is optional.

use crate::reference::COUNTRIES;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default upper bound for an uploaded image, in bytes
pub const DEFAULT_MAX_IMAGE_BYTES: u64 = 2_000_000;

/// Default minimum password length, in characters
pub const DEFAULT_MIN_PASSWORD_LEN: usize = 8;

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("failed to read config {path}: {source}")]
    Read {
        /// File that was read
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for [`FormConfig`]
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// Values parsed but make no sense together
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Form configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    /// Largest accepted image, in bytes
    pub max_image_bytes: u64,
    /// Media types accepted for the image field
    pub accepted_image_types: Vec<String>,
    /// Minimum password length, in characters
    pub min_password_len: usize,
    /// Country suggestions
    pub countries: Vec<String>,
}

impl FormConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With maximum image size
    #[inline]
    #[must_use]
    pub fn with_max_image_bytes(mut self, max: u64) -> Self {
        self.max_image_bytes = max;
        self
    }

    /// With accepted image media types
    #[must_use]
    pub fn with_accepted_image_types<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.accepted_image_types = types.into_iter().map(Into::into).collect();
        self
    }

    /// With minimum password length
    #[inline]
    #[must_use]
    pub fn with_min_password_len(mut self, len: usize) -> Self {
        self.min_password_len = len;
        self
    }

    /// Whether an image of this media type may be uploaded
    #[must_use]
    pub fn accepts_media_type(&self, media_type: &str) -> bool {
        self.accepted_image_types.iter().any(|t| t == media_type)
    }

    /// Parse configuration from TOML text and validate it
    ///
    /// # Errors
    /// - `ConfigError::Parse` on malformed TOML
    /// - `ConfigError::Invalid` if [`FormConfig::validate`] fails
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    ///
    /// # Errors
    /// - `ConfigError::Read` if the file cannot be read
    /// - otherwise as [`FormConfig::from_toml_str`]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Reject limits that would make every submission fail
    ///
    /// # Errors
    /// - `ConfigError::Invalid` naming the offending key
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_image_bytes == 0 {
            return Err(ConfigError::Invalid(
                "max_image_bytes must be greater than zero".to_string(),
            ));
        }
        if self.accepted_image_types.is_empty() {
            return Err(ConfigError::Invalid(
                "accepted_image_types must not be empty".to_string(),
            ));
        }
        if self.min_password_len == 0 {
            return Err(ConfigError::Invalid(
                "min_password_len must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            max_image_bytes: DEFAULT_MAX_IMAGE_BYTES,
            accepted_image_types: vec!["image/jpeg".to_string(), "image/png".to_string()],
            min_password_len: DEFAULT_MIN_PASSWORD_LEN,
            countries: COUNTRIES.iter().map(ToString::to_string).collect(),
        }
    }
}
