//! RS256 bearer tokens
//!
//! This crate provides:
//! - `codec`: unpadded base64url for bytes and JSON
//! - `rs256`: SHA-256 + RSA PKCS#1 v1.5 signing and verification
//! - `TokenIssuer`: header + claims + `exp` -> signed token
//! - `TokenValidator`: token -> `Verification`
//!
//! Both the issuer and the validator read time through an injected `Clock`.
//!
//! ```rust,ignore
//! use sigil_jwt::{Claims, TokenIssuer, TokenValidator, Verification};
//!
//! let claims = Claims::new().with("sub", "user-1");
//! let token = TokenIssuer::new().issue(&claims, &private_key, &passphrase, 60)?;
//! match TokenValidator::new().validate(token.as_str(), &public_key) {
//!     Verification::Valid(claims) => println!("hello {:?}", claims.get_str("sub")),
//!     other => println!("rejected: {}", other.outcome_name()),
//! }
//! ```

mod claims;
mod clock;
pub mod codec;
mod error;
mod issuer;
pub mod rs256;
mod types;
mod validator;

pub use claims::{Claims, EXPIRATION_CLAIM};
pub use clock::{Clock, FixedClock, SystemClock};
pub use codec::DecodeError;
pub use error::{JwtError, JwtResult};
pub use issuer::TokenIssuer;
pub use types::{JwtHeader, JwtToken, RS256, TokenParts};
pub use validator::{TokenValidator, Verification};
