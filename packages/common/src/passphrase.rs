//! Passphrase wrapper for encrypted private keys

use secrecy::{ExposeSecret, SecretString};
use std::fmt;

/// Passphrase protecting a PKCS#8 private key.
///
/// The inner string is zeroized on drop and never printed by `Debug`.
#[derive(Clone)]
pub struct Passphrase(SecretString);

impl Passphrase {
    /// Wrap a passphrase
    pub fn new(passphrase: impl Into<String>) -> Self {
        Self(SecretString::from(passphrase.into()))
    }

    /// Passphrase for plaintext (unencrypted) private keys
    #[must_use]
    pub fn empty() -> Self {
        Self::new(String::new())
    }

    /// Borrow the secret value
    #[must_use]
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }

    /// Raw bytes fed to the key derivation function
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        self.expose().as_bytes()
    }

    /// Whether the passphrase is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.expose().is_empty()
    }
}

impl From<&str> for Passphrase {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Passphrase {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl fmt::Debug for Passphrase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Passphrase([REDACTED])")
    }
}
