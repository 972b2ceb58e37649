//! RSA key material for sigil
//!
//! Parsing of PEM key material, key pair generation with passphrase-protected
//! PKCS#8 private keys, and idempotent provisioning into a `KeyStore`.

mod config;
mod error;
mod generator;
mod material;
mod provisioner;
pub mod store;

pub use config::{KeyGenConfig, SUPPORTED_MODULUS_BITS};
pub use error::{KeyError, Result};
pub use generator::generate_key_pair;
pub use material::{
    ENCRYPTED_PRIVATE_KEY_LABEL, KeyPair, PRIVATE_KEY_LABEL, PUBLIC_KEY_LABEL, PrivateKeyPem,
    PublicKeyPem, RSA_PRIVATE_KEY_LABEL, RSA_PUBLIC_KEY_LABEL,
};
pub use provisioner::{KeyProvisioner, ProvisionOutcome};
pub use store::{FileKeyStore, KeyPresence, KeyStore};

/// Re-exported so callers can name decoded key types without a direct `rsa` dependency
pub use rsa::{RsaPrivateKey, RsaPublicKey};
