//! JWT error types

use crate::codec::DecodeError;
use sigil_key::KeyError;
use thiserror::Error;

/// JWT operation result type
pub type JwtResult<T> = Result<T, JwtError>;

/// Operational failures of the signer, verifier and issuer.
///
/// An untrustworthy token is not an error: the validator reports it as a
/// `Verification` value.
#[derive(Debug, Error)]
pub enum JwtError {
    /// Malformed base64url or JSON input
    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),
    /// Key could not be parsed or decrypted
    #[error(transparent)]
    Key(#[from] KeyError),
    /// Malformed signature bytes or a failure inside the RSA primitive
    #[error("Signature error: {0}")]
    Signature(String),
    /// Header or claims could not be serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
