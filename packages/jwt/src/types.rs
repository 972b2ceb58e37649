//! Header and token types

use crate::codec::DecodeError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The only signature algorithm issued and accepted
pub const RS256: &str = "RS256";

/// JWT header. Always `{"alg":"RS256","typ":"JWT"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwtHeader {
    /// Signature algorithm
    pub alg: String,
    /// Token type
    pub typ: String,
}

impl JwtHeader {
    /// RS256 JWT header
    #[must_use]
    pub fn rs256() -> Self {
        Self {
            alg: RS256.to_string(),
            typ: "JWT".to_string(),
        }
    }
}

impl Default for JwtHeader {
    fn default() -> Self {
        Self::rs256()
    }
}

/// Borrowed view of the three token segments
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenParts<'a> {
    /// base64url header JSON
    pub header: &'a str,
    /// base64url claims JSON
    pub payload: &'a str,
    /// base64url signature bytes
    pub signature: &'a str,
}

impl<'a> TokenParts<'a> {
    /// Split `token` into exactly three non-empty segments
    #[must_use]
    pub fn split(token: &'a str) -> Option<Self> {
        let mut parts = token.split('.');
        let header = parts.next()?;
        let payload = parts.next()?;
        let signature = parts.next()?;
        if parts.next().is_some() || header.is_empty() || payload.is_empty() || signature.is_empty()
        {
            return None;
        }
        Some(Self {
            header,
            payload,
            signature,
        })
    }

    /// The signed text: `header.payload`, verbatim from the token
    #[must_use]
    pub fn signing_input(&self) -> String {
        format!("{}.{}", self.header, self.payload)
    }
}

/// Encoded token `<header64>.<payload64>.<signature64>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JwtToken(String);

impl JwtToken {
    pub(crate) fn from_signed_parts(signing_input: &str, signature_b64: &str) -> Self {
        Self(format!("{signing_input}.{signature_b64}"))
    }

    /// Token text
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Segments of the token
    #[must_use]
    pub fn parts(&self) -> Option<TokenParts<'_>> {
        TokenParts::split(&self.0)
    }

    /// Unwrap into the token text
    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl FromStr for JwtToken {
    type Err = DecodeError;

    /// Accepts any text with three non-empty segments; no cryptographic check
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TokenParts::split(s)
            .map(|_| Self(s.to_string()))
            .ok_or(DecodeError::MalformedToken)
    }
}

impl AsRef<str> for JwtToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for JwtToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<JwtToken> for String {
    fn from(token: JwtToken) -> Self {
        token.0
    }
}
