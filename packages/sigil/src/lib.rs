//! # Sigil
//!
//! Signed bearer tokens and payload encryption on top of one RSA key pair.
//!
//! - `sigil_key`: PEM key material, key generation, idempotent provisioning
//! - `sigil_jwt`: RS256 token issuing and validation
//! - `sigil_cipher`: RSA-OAEP encryption of opaque payloads
//!
//! ```rust,ignore
//! use sigil::{Claims, FileKeyStore, KeyGenConfig, KeyProvisioner, Passphrase};
//! use sigil::{TokenIssuer, TokenValidator};
//!
//! let passphrase = Passphrase::from("s3cret");
//! let provisioner = KeyProvisioner::new(FileKeyStore::new("./keys"), KeyGenConfig::default());
//! let (keys, _) = provisioner.provision_keys(&passphrase).await?;
//!
//! let token = TokenIssuer::new().issue(&Claims::new().with("sub", "user-1"), &keys.private_key, &passphrase, 60)?;
//! assert!(TokenValidator::new().validate(token.as_str(), &keys.public_key).is_valid());
//! ```

pub mod cli;
mod config;

pub use config::{ConfigError, SigilConfig};

pub use sigil_cipher::{CipherError, decrypt, encrypt};
pub use sigil_common::{LoggingTransformer, Passphrase};
pub use sigil_jwt::{
    Claims, Clock, DecodeError, FixedClock, JwtError, JwtHeader, JwtToken, SystemClock,
    TokenIssuer, TokenValidator, Verification, codec, rs256,
};
pub use sigil_key::{
    FileKeyStore, KeyError, KeyGenConfig, KeyPair, KeyProvisioner, KeyStore, PrivateKeyPem,
    ProvisionOutcome, PublicKeyPem, generate_key_pair,
};
