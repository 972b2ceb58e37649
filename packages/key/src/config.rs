//! Key generation settings

use crate::{KeyError, Result};
use serde::{Deserialize, Serialize};

/// RSA modulus sizes accepted by the generator
pub const SUPPORTED_MODULUS_BITS: [usize; 3] = [2048, 3072, 4096];

/// Settings for `generate_key_pair`
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyGenConfig {
    /// RSA modulus size in bits
    #[serde(default = "default_modulus_bits")]
    pub modulus_bits: usize,
    /// PBKDF2-HMAC-SHA256 rounds used to protect the private key
    #[serde(default = "default_kdf_iterations")]
    pub kdf_iterations: u32,
}

fn default_modulus_bits() -> usize {
    4096
}

fn default_kdf_iterations() -> u32 {
    100_000
}

impl Default for KeyGenConfig {
    fn default() -> Self {
        Self {
            modulus_bits: default_modulus_bits(),
            kdf_iterations: default_kdf_iterations(),
        }
    }
}

impl KeyGenConfig {
    /// Set the modulus size
    #[must_use]
    pub fn with_modulus_bits(mut self, modulus_bits: usize) -> Self {
        self.modulus_bits = modulus_bits;
        self
    }

    /// Set the PBKDF2 round count
    #[must_use]
    pub fn with_kdf_iterations(mut self, kdf_iterations: u32) -> Self {
        self.kdf_iterations = kdf_iterations;
        self
    }

    /// Reject settings the generator cannot honour
    ///
    /// # Errors
    /// `InvalidKeySize` for an unsupported modulus, `InvalidConfig` for zero KDF rounds.
    pub fn validate(&self) -> Result<()> {
        if !SUPPORTED_MODULUS_BITS.contains(&self.modulus_bits) {
            return Err(KeyError::InvalidKeySize {
                actual: self.modulus_bits,
            });
        }
        if self.kdf_iterations == 0 {
            return Err(KeyError::InvalidConfig(
                "kdf_iterations must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
