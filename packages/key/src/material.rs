//! PEM-encoded RSA key material
//!
//! Keys travel through the crate as PEM text and are decoded into `rsa` key
//! types only for the duration of a single operation.

use crate::{KeyError, Result};
use rsa::pkcs1::{DecodeRsaPrivateKey, DecodeRsaPublicKey};
use rsa::pkcs8::{DecodePrivateKey, DecodePublicKey};
use rsa::{RsaPrivateKey, RsaPublicKey};
use sigil_common::Passphrase;
use std::fmt;
use zeroize::Zeroizing;

/// PEM label of a PBES2-encrypted PKCS#8 private key
pub const ENCRYPTED_PRIVATE_KEY_LABEL: &str = "ENCRYPTED PRIVATE KEY";
/// PEM label of a plaintext PKCS#8 private key
pub const PRIVATE_KEY_LABEL: &str = "PRIVATE KEY";
/// PEM label of a PKCS#1 private key
pub const RSA_PRIVATE_KEY_LABEL: &str = "RSA PRIVATE KEY";
/// PEM label of a SubjectPublicKeyInfo public key
pub const PUBLIC_KEY_LABEL: &str = "PUBLIC KEY";
/// PEM label of a PKCS#1 public key
pub const RSA_PUBLIC_KEY_LABEL: &str = "RSA PUBLIC KEY";

/// Label of the first PEM block in `pem`
pub(crate) fn pem_label(pem: &str) -> Option<&str> {
    const BEGIN: &str = "-----BEGIN ";
    let start = pem.find(BEGIN)? + BEGIN.len();
    let rest = &pem[start..];
    let end = rest.find("-----")?;
    Some(&rest[..end])
}

/// Private key as PEM text, optionally passphrase-protected
#[derive(Clone)]
pub struct PrivateKeyPem(Zeroizing<String>);

impl PrivateKeyPem {
    /// Wrap PEM text
    pub fn new(pem: impl Into<String>) -> Self {
        Self(Zeroizing::new(pem.into()))
    }

    /// PEM text
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the key needs a passphrase to be decoded
    #[must_use]
    pub fn is_encrypted(&self) -> bool {
        pem_label(&self.0) == Some(ENCRYPTED_PRIVATE_KEY_LABEL)
    }

    /// Decode into an RSA private key, decrypting with `passphrase` when the
    /// PEM is an encrypted PKCS#8 document. Plaintext keys ignore the passphrase.
    ///
    /// # Errors
    /// `Decryption` for a wrong passphrase, `InvalidPrivateKey` or
    /// `UnsupportedPem` when the text is not a readable RSA private key.
    pub fn decode(&self, passphrase: &Passphrase) -> Result<RsaPrivateKey> {
        let pem = self.0.trim();
        match pem_label(pem) {
            Some(ENCRYPTED_PRIVATE_KEY_LABEL) => {
                RsaPrivateKey::from_pkcs8_encrypted_pem(pem, passphrase.as_bytes())
                    .map_err(|_| KeyError::Decryption)
            }
            Some(PRIVATE_KEY_LABEL) => RsaPrivateKey::from_pkcs8_pem(pem)
                .map_err(|e| KeyError::InvalidPrivateKey(format!("PKCS#8: {e}"))),
            Some(RSA_PRIVATE_KEY_LABEL) => RsaPrivateKey::from_pkcs1_pem(pem)
                .map_err(|e| KeyError::InvalidPrivateKey(format!("PKCS#1: {e}"))),
            Some(other) => Err(KeyError::UnsupportedPem(other.to_string())),
            None => Err(KeyError::InvalidPrivateKey(
                "missing PEM boundary".to_string(),
            )),
        }
    }
}

impl fmt::Debug for PrivateKeyPem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKeyPem")
            .field("encrypted", &self.is_encrypted())
            .finish_non_exhaustive()
    }
}

/// Public key as PEM text
#[derive(Clone, PartialEq, Eq)]
pub struct PublicKeyPem(String);

impl PublicKeyPem {
    /// Wrap PEM text
    pub fn new(pem: impl Into<String>) -> Self {
        Self(pem.into())
    }

    /// PEM text
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Decode into an RSA public key
    ///
    /// # Errors
    /// `InvalidPublicKey` or `UnsupportedPem` when the text is not a readable RSA public key.
    pub fn decode(&self) -> Result<RsaPublicKey> {
        let pem = self.0.trim();
        match pem_label(pem) {
            Some(PUBLIC_KEY_LABEL) => RsaPublicKey::from_public_key_pem(pem)
                .map_err(|e| KeyError::InvalidPublicKey(format!("SPKI: {e}"))),
            Some(RSA_PUBLIC_KEY_LABEL) => RsaPublicKey::from_pkcs1_pem(pem)
                .map_err(|e| KeyError::InvalidPublicKey(format!("PKCS#1: {e}"))),
            Some(other) => Err(KeyError::UnsupportedPem(other.to_string())),
            None => Err(KeyError::InvalidPublicKey(
                "missing PEM boundary".to_string(),
            )),
        }
    }
}

impl fmt::Debug for PublicKeyPem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PublicKeyPem").field(&self.0).finish()
    }
}

/// Matching public/private key pair
#[derive(Clone, Debug)]
pub struct KeyPair {
    /// SubjectPublicKeyInfo PEM
    pub public_key: PublicKeyPem,
    /// PKCS#8 PEM, encrypted unless generated with an empty passphrase
    pub private_key: PrivateKeyPem,
}
