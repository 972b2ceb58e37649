//! Key handling errors

use thiserror::Error;

/// Key result type
pub type Result<T> = std::result::Result<T, KeyError>;

/// Errors raised while parsing, generating or persisting RSA keys
#[derive(Debug, Error)]
pub enum KeyError {
    /// Private key PEM could not be parsed
    #[error("Invalid private key: {0}")]
    InvalidPrivateKey(String),

    /// Public key PEM could not be parsed
    #[error("Invalid public key: {0}")]
    InvalidPublicKey(String),

    /// Encrypted private key could not be decrypted
    #[error("Private key decryption failed: wrong passphrase or corrupt key")]
    Decryption,

    /// PEM block carries a label this crate does not read
    #[error("Unsupported PEM label: {0}")]
    UnsupportedPem(String),

    /// RSA key generation failed
    #[error("Key generation error: {0}")]
    Generation(String),

    /// Key could not be serialized to PEM
    #[error("Key encoding error: {0}")]
    Encoding(String),

    /// Requested RSA modulus size is not supported
    #[error("Invalid key size: expected 2048, 3072 or 4096 bits, got {actual}")]
    InvalidKeySize {
        /// Requested modulus size in bits
        actual: usize,
    },

    /// Key generation settings are unusable
    #[error("Invalid key generation config: {0}")]
    InvalidConfig(String),

    /// Only one half of a key pair exists in the store
    #[error("Incomplete key pair at {0}: refusing to overwrite")]
    PartialKeyPair(String),

    /// I/O operation failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
