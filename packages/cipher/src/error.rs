//! Cipher errors

use sigil_key::KeyError;
use thiserror::Error;

/// Cipher result type
pub type Result<T> = std::result::Result<T, CipherError>;

/// RSA encryption failures
#[derive(Debug, Error)]
pub enum CipherError {
    /// Key could not be parsed or decrypted
    #[error(transparent)]
    Key(#[from] KeyError),

    /// Encryption operation failed
    #[error("Encryption error: {0}")]
    Encryption(String),

    /// Decryption operation failed
    #[error("Decryption error: {0}")]
    Decryption(String),

    /// Ciphertext is not a whole number of RSA blocks
    #[error("Invalid ciphertext length: expected a non-zero multiple of {block_size}, got {actual}")]
    InvalidCiphertextLength {
        /// RSA modulus size in bytes
        block_size: usize,
        /// Ciphertext length in bytes
        actual: usize,
    },
}
