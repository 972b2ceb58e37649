//! Base64url codec for token segments (RFC 7515, no padding)
//!
//! Decoding is strict: `=` padding, characters outside `A-Z a-z 0-9 - _` and
//! non-canonical trailing bits are all rejected, so `decode` is the exact
//! inverse of `encode`.

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Codec decode failures
#[derive(Debug, Error)]
pub enum DecodeError {
    /// Input is not unpadded base64url
    #[error("invalid base64url: {0}")]
    Base64(#[from] base64::DecodeError),
    /// Decoded bytes are not the expected JSON
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// JSON value is not an object
    #[error("expected a JSON object")]
    NotAnObject,
    /// A reserved claim has the wrong type
    #[error("invalid `{0}` claim")]
    InvalidClaim(String),
    /// Token does not have three non-empty segments
    #[error("token must have three non-empty segments")]
    MalformedToken,
}

/// Base64url-encode bytes without padding
#[inline]
#[must_use]
pub fn encode(input: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(input)
}

/// Decode unpadded base64url text
///
/// # Errors
/// `DecodeError::Base64` on any character, length or padding violation.
#[inline]
pub fn decode(input: &str) -> Result<Vec<u8>, DecodeError> {
    Ok(URL_SAFE_NO_PAD.decode(input)?)
}

/// Serialize `value` to compact JSON and base64url-encode it
///
/// # Errors
/// Fails only if `value`'s `Serialize` impl fails.
pub fn encode_json<T: Serialize + ?Sized>(value: &T) -> Result<String, serde_json::Error> {
    let json = serde_json::to_vec(value)?;
    Ok(encode(&json))
}

/// Base64url-decode `input` and parse it as JSON
///
/// # Errors
/// `DecodeError::Base64` or `DecodeError::Json`.
pub fn decode_json<T: DeserializeOwned>(input: &str) -> Result<T, DecodeError> {
    let bytes = decode(input)?;
    Ok(serde_json::from_slice(&bytes)?)
}
