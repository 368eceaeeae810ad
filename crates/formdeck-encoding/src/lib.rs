//! formdeck Encoding
//!
//! Turns an [`ImageUpload`] into a `data:<media-type>;base64,<payload>`
//! string that can be embedded directly in a display attribute.
//!
//! Reading suspends the caller without blocking other work. There is no
//! cancellation: a caller that loses interest simply drops the future.
//!
//! [`ImageUpload`]: formdeck_core::ImageUpload

#![warn(unreachable_pub)]

pub mod data_uri;

pub use data_uri::{
    encode_data_uri, BlobEncoder, DataUri, DataUriEncoder, EncodingError, FALLBACK_MEDIA_TYPE,
};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
