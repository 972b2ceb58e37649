//! Token validation
//!
//! Parse -> signature check -> payload decode -> expiry check. Every
//! untrustworthy token ends in a `Verification` value; nothing here panics
//! or raises for bad input.

use crate::claims::Claims;
use crate::clock::{Clock, SystemClock};
use crate::error::JwtError;
use crate::types::TokenParts;
use crate::{codec, rs256};
use sigil_key::{KeyError, PublicKeyPem};

/// Outcome of validating a token
#[derive(Debug, Clone, PartialEq)]
pub enum Verification {
    /// Signature and expiry both check out
    Valid(Claims),
    /// Signature missing, malformed or not made by the matching private key
    InvalidSignature,
    /// Token is not three segments, or its signed payload is not a claim object
    InvalidStructure,
    /// Signature is valid but `exp` is in the past
    Expired(Claims),
}

impl Verification {
    /// Whether the token is usable
    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }

    /// Claims of a token whose signature checked out
    #[must_use]
    pub fn claims(&self) -> Option<&Claims> {
        match self {
            Self::Valid(claims) | Self::Expired(claims) => Some(claims),
            Self::InvalidSignature | Self::InvalidStructure => None,
        }
    }

    /// Owned variant of `claims`
    #[must_use]
    pub fn into_claims(self) -> Option<Claims> {
        match self {
            Self::Valid(claims) | Self::Expired(claims) => Some(claims),
            Self::InvalidSignature | Self::InvalidStructure => None,
        }
    }

    /// Stable snake_case name of the outcome
    #[must_use]
    pub fn outcome_name(&self) -> &'static str {
        match self {
            Self::Valid(_) => "valid",
            Self::InvalidSignature => "invalid_signature",
            Self::InvalidStructure => "invalid_structure",
            Self::Expired(_) => "expired",
        }
    }
}

/// Validates RS256 tokens against a public key
#[derive(Debug, Clone, Default)]
pub struct TokenValidator<C = SystemClock> {
    clock: C,
}

impl TokenValidator<SystemClock> {
    /// Validator reading the system clock
    #[must_use]
    pub fn new() -> Self {
        Self { clock: SystemClock }
    }
}

impl<C: Clock> TokenValidator<C> {
    /// Validator reading time from `clock`
    pub fn with_clock(clock: C) -> Self {
        Self { clock }
    }

    /// Validate `token` against `public_key`.
    ///
    /// An unparseable public key is reported as `InvalidSignature`; use
    /// `try_validate` to surface it as an error instead.
    pub fn validate(&self, token: &str, public_key: &PublicKeyPem) -> Verification {
        match self.try_validate(token, public_key) {
            Ok(verification) => verification,
            Err(e) => {
                tracing::warn!(error = %e, "Public key unusable, rejecting token");
                Verification::InvalidSignature
            }
        }
    }

    /// Validate `token`, separating key problems from bad tokens.
    ///
    /// # Errors
    /// `KeyError` when `public_key` cannot be parsed.
    pub fn try_validate(
        &self,
        token: &str,
        public_key: &PublicKeyPem,
    ) -> Result<Verification, KeyError> {
        let Some(parts) = TokenParts::split(token) else {
            tracing::debug!("Token rejected: expected three non-empty segments");
            return Ok(Verification::InvalidStructure);
        };

        let Ok(signature) = codec::decode(parts.signature) else {
            tracing::debug!("Token rejected: signature segment is not base64url");
            return Ok(Verification::InvalidSignature);
        };

        match rs256::verify(parts.signing_input().as_bytes(), &signature, public_key) {
            Ok(true) => {}
            Ok(false) => {
                tracing::debug!("Token rejected: signature mismatch");
                return Ok(Verification::InvalidSignature);
            }
            Err(JwtError::Key(e)) => return Err(e),
            Err(e) => {
                tracing::debug!(error = %e, "Token rejected: unusable signature");
                return Ok(Verification::InvalidSignature);
            }
        }

        // Reachable only for a payload that was signed while malformed
        let claims: Claims = match codec::decode_json(parts.payload) {
            Ok(claims) => claims,
            Err(e) => {
                tracing::debug!(error = %e, "Token rejected: signed payload is not a claim object");
                return Ok(Verification::InvalidStructure);
            }
        };

        match claims.expiration_ms() {
            Err(e) => {
                tracing::debug!(error = %e, "Token rejected: malformed exp");
                Ok(Verification::InvalidStructure)
            }
            Ok(Some(exp)) if exp < self.clock.now_ms() => Ok(Verification::Expired(claims)),
            Ok(_) => Ok(Verification::Valid(claims)),
        }
    }
}
