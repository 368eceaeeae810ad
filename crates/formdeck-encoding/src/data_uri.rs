//! Data URI encoding

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use formdeck_core::{BlobSource, ImageUpload};
use std::fmt;

/// Media type declared when the upload carries none
pub const FALLBACK_MEDIA_TYPE: &str = "application/octet-stream";

const BASE64_MARKER: &str = ";base64,";

/// Encoding errors
#[derive(Debug, thiserror::Error)]
pub enum EncodingError {
    /// Underlying read of the blob failed
    #[error("failed to read upload: {source}")]
    Read {
        /// The I/O failure as reported by the source
        #[from]
        source: std::io::Error,
    },

    /// Text is not a `data:<type>;base64,<payload>` URI
    #[error("malformed data URI: {0}")]
    Malformed(String),

    /// Payload is not valid base64
    #[error("invalid base64 payload: {0}")]
    Decode(#[from] base64::DecodeError),
}

/// Seam between the submission pipeline and the byte source
#[async_trait]
pub trait BlobEncoder: Send + Sync + fmt::Debug {
    /// Read the upload and render it as a data URI
    ///
    /// # Errors
    /// - `EncodingError::Read` if the bytes cannot be read
    async fn encode(&self, upload: &ImageUpload) -> Result<String, EncodingError>;
}

/// Default encoder: reads memory or disk, emits base64 data URIs
#[derive(Debug, Clone, Copy, Default)]
pub struct DataUriEncoder;

impl DataUriEncoder {
    /// Create new encoder
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl BlobEncoder for DataUriEncoder {
    async fn encode(&self, upload: &ImageUpload) -> Result<String, EncodingError> {
        encode_data_uri(upload).await
    }
}

/// Read an upload and render it as a data URI
///
/// # Errors
/// - `EncodingError::Read` carrying the underlying I/O failure
pub async fn encode_data_uri(upload: &ImageUpload) -> Result<String, EncodingError> {
    let uri = match &upload.source {
        BlobSource::Bytes(bytes) => DataUri::encode(&upload.media_type, bytes),
        BlobSource::File(path) => {
            let bytes = tokio::fs::read(path).await.map_err(|source| {
                tracing::warn!(path = %path.display(), error = %source, "upload read failed");
                EncodingError::Read { source }
            })?;
            DataUri::encode(&upload.media_type, &bytes)
        }
    };

    tracing::debug!(
        file = %upload.file_name,
        media_type = %uri.media_type,
        bytes = uri.data.len(),
        "upload encoded"
    );
    Ok(uri.to_string())
}

/// A decoded `data:` URI
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUri {
    pub media_type: String,
    pub data: Vec<u8>,
}

impl DataUri {
    /// Wrap bytes, substituting the fallback for an empty media type
    #[must_use]
    pub fn encode(media_type: &str, data: &[u8]) -> Self {
        let media_type = if media_type.is_empty() {
            FALLBACK_MEDIA_TYPE
        } else {
            media_type
        };
        Self {
            media_type: media_type.to_string(),
            data: data.to_vec(),
        }
    }

    /// Parse a base64 data URI back into its parts
    ///
    /// # Errors
    /// - `EncodingError::Malformed` without the `data:` scheme or base64 marker
    /// - `EncodingError::Decode` if the payload is not valid base64
    pub fn parse(text: &str) -> Result<Self, EncodingError> {
        let rest = text
            .strip_prefix("data:")
            .ok_or_else(|| EncodingError::Malformed("missing data: scheme".to_string()))?;
        let (media_type, payload) = rest
            .split_once(BASE64_MARKER)
            .ok_or_else(|| EncodingError::Malformed("missing ;base64, marker".to_string()))?;

        Ok(Self {
            media_type: media_type.to_string(),
            data: BASE64.decode(payload)?,
        })
    }
}

impl fmt::Display for DataUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "data:{}{}{}",
            self.media_type,
            BASE64_MARKER,
            BASE64.encode(&self.data)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn encodes_in_memory_bytes() {
        let upload = ImageUpload::from_bytes("test.txt", "text/plain", b"test".to_vec());
        let uri = encode_data_uri(&upload).await.unwrap();
        assert_eq!(uri, "data:text/plain;base64,dGVzdA==");
    }

    #[tokio::test]
    async fn payload_decodes_to_original_bytes() {
        let bytes: Vec<u8> = (0..=255u8).collect();
        let upload = ImageUpload::from_bytes("all.png", "image/png", bytes.clone());

        let uri = DataUriEncoder::new().encode(&upload).await.unwrap();
        let payload = uri.strip_prefix("data:image/png;base64,").unwrap();

        assert_eq!(BASE64.decode(payload).unwrap(), bytes);
        assert_eq!(DataUri::parse(&uri).unwrap().data, bytes);
    }

    #[tokio::test]
    async fn reads_file_backed_uploads() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pixel.png");
        std::fs::write(&path, [0x89, b'P', b'N', b'G']).unwrap();

        let upload = ImageUpload::from_path(&path).await.unwrap();
        let uri = encode_data_uri(&upload).await.unwrap();
        assert_eq!(uri, "data:image/png;base64,iVBORw==");
    }

    #[tokio::test]
    async fn missing_file_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gone.png");
        std::fs::write(&path, [1, 2, 3]).unwrap();
        let upload = ImageUpload::from_path(&path).await.unwrap();
        std::fs::remove_file(&path).unwrap();

        let err = encode_data_uri(&upload).await.unwrap_err();
        match err {
            EncodingError::Read { source } => {
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn empty_media_type_falls_back() {
        let upload = ImageUpload::from_bytes("blob", "", vec![7]);
        let uri = encode_data_uri(&upload).await.unwrap();
        assert!(uri.starts_with("data:application/octet-stream;base64,"));
    }

    #[test]
    fn parse_rejects_malformed_uris() {
        assert!(matches!(
            DataUri::parse("text/plain;base64,AA=="),
            Err(EncodingError::Malformed(_))
        ));
        assert!(matches!(
            DataUri::parse("data:text/plain,hello"),
            Err(EncodingError::Malformed(_))
        ));
        assert!(matches!(
            DataUri::parse("data:text/plain;base64,@@@"),
            Err(EncodingError::Decode(_))
        ));
    }

    #[tokio::test]
    async fn concurrent_reads_run_independently() {
        let a = ImageUpload::from_bytes("a.png", "image/png", vec![1]);
        let b = ImageUpload::from_bytes("b.png", "image/png", vec![2]);

        let (ra, rb) = tokio::join!(encode_data_uri(&a), encode_data_uri(&b));
        assert_eq!(ra.unwrap(), "data:image/png;base64,AQ==");
        assert_eq!(rb.unwrap(), "data:image/png;base64,Ag==");
    }
}
