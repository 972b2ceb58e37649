//! Token issuance

use crate::claims::{Claims, EXPIRATION_CLAIM};
use crate::clock::{Clock, SystemClock};
use crate::error::JwtResult;
use crate::types::{JwtHeader, JwtToken};
use crate::{codec, rs256};
use chrono::TimeDelta;
use sigil_common::Passphrase;
use sigil_key::PrivateKeyPem;

const MS_PER_MINUTE: i64 = 60_000;

/// Issues RS256 tokens stamped with an `exp` claim.
///
/// The issuer applies no policy to the lifetime: zero or negative TTLs
/// produce tokens that are already expired.
#[derive(Debug, Clone, Default)]
pub struct TokenIssuer<C = SystemClock> {
    clock: C,
}

impl TokenIssuer<SystemClock> {
    /// Issuer reading the system clock
    #[must_use]
    pub fn new() -> Self {
        Self { clock: SystemClock }
    }
}

impl<C: Clock> TokenIssuer<C> {
    /// Issuer reading time from `clock`
    pub fn with_clock(clock: C) -> Self {
        Self { clock }
    }

    /// Issue a token valid for `ttl_minutes`.
    ///
    /// `exp` is set to `now_ms + ttl_minutes * 60_000` and silently replaces
    /// any `exp` present in `claims`.
    ///
    /// # Errors
    /// Signer failures, propagated unchanged.
    pub fn issue(
        &self,
        claims: &Claims,
        private_key: &PrivateKeyPem,
        passphrase: &Passphrase,
        ttl_minutes: i64,
    ) -> JwtResult<JwtToken> {
        self.issue_for_ms(
            claims,
            private_key,
            passphrase,
            ttl_minutes.saturating_mul(MS_PER_MINUTE),
        )
    }

    /// `issue` with a `chrono` duration; sub-millisecond precision is dropped
    ///
    /// # Errors
    /// Signer failures, propagated unchanged.
    pub fn issue_with_ttl(
        &self,
        claims: &Claims,
        private_key: &PrivateKeyPem,
        passphrase: &Passphrase,
        ttl: TimeDelta,
    ) -> JwtResult<JwtToken> {
        self.issue_for_ms(claims, private_key, passphrase, ttl.num_milliseconds())
    }

    fn issue_for_ms(
        &self,
        claims: &Claims,
        private_key: &PrivateKeyPem,
        passphrase: &Passphrase,
        ttl_ms: i64,
    ) -> JwtResult<JwtToken> {
        let exp = self.clock.now_ms().saturating_add(ttl_ms);

        let mut payload = claims.clone();
        if let Some(previous) = payload.insert(EXPIRATION_CLAIM, exp) {
            tracing::debug!(%previous, exp, "Caller-supplied exp overridden");
        }

        let header_b64 = codec::encode_json(&JwtHeader::rs256())?;
        let payload_b64 = codec::encode_json(&payload)?;
        let signing_input = format!("{header_b64}.{payload_b64}");

        let signature = rs256::sign(signing_input.as_bytes(), private_key, passphrase)?;
        let token = JwtToken::from_signed_parts(&signing_input, &codec::encode(&signature));

        tracing::debug!(exp, claims = payload.len(), "Issued RS256 token");
        Ok(token)
    }
}
