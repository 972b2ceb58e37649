//! RSA-OAEP (SHA-256) over arbitrary-length payloads
//!
//! The payload is cut into blocks of at most `k - 2*32 - 2` bytes, each
//! encrypted to one `k`-byte ciphertext block (`k` = modulus size in bytes).
//! An empty payload still produces one block.

use crate::{CipherError, Result};
use rsa::rand_core::OsRng;
use rsa::sha2::Sha256;
use rsa::traits::PublicKeyParts;
use rsa::Oaep;
use sigil_common::Passphrase;
use sigil_key::{PrivateKeyPem, PublicKeyPem};

/// SHA-256 output size
const HASH_LEN: usize = 32;

/// Largest plaintext block for a `block_size`-byte modulus
fn max_chunk_len(block_size: usize) -> usize {
    block_size.saturating_sub(2 * HASH_LEN + 2)
}

/// Encrypt `data` to the holder of `public_key`
///
/// # Errors
/// `CipherError::Key` if the public key cannot be parsed,
/// `CipherError::Encryption` if the RSA primitive fails.
pub fn encrypt(data: &[u8], public_key: &PublicKeyPem) -> Result<Vec<u8>> {
    let public_key = public_key.decode()?;
    let block_size = public_key.size();
    let chunk_len = max_chunk_len(block_size);
    if chunk_len == 0 {
        return Err(CipherError::Encryption(format!(
            "{block_size}-byte modulus is too small for OAEP-SHA256"
        )));
    }

    let mut ciphertext = Vec::with_capacity(data.len().div_ceil(chunk_len).max(1) * block_size);
    let mut rng = OsRng;
    let mut encrypt_block = |block: &[u8]| -> Result<()> {
        let encrypted = public_key
            .encrypt(&mut rng, Oaep::new::<Sha256>(), block)
            .map_err(|e| CipherError::Encryption(format!("RSA-OAEP encryption failed: {e}")))?;
        ciphertext.extend_from_slice(&encrypted);
        Ok(())
    };

    if data.is_empty() {
        encrypt_block(&[])?;
    } else {
        for block in data.chunks(chunk_len) {
            encrypt_block(block)?;
        }
    }

    tracing::debug!(
        plaintext_len = data.len(),
        ciphertext_len = ciphertext.len(),
        "RSA-OAEP encrypt"
    );
    Ok(ciphertext)
}

/// Decrypt output of `encrypt` with the matching private key
///
/// # Errors
/// `CipherError::Key` for an unreadable key or wrong passphrase,
/// `CipherError::InvalidCiphertextLength` for truncated input,
/// `CipherError::Decryption` if any block fails OAEP decoding.
pub fn decrypt(data: &[u8], private_key: &PrivateKeyPem, passphrase: &Passphrase) -> Result<Vec<u8>> {
    let private_key = private_key.decode(passphrase)?;
    let block_size = private_key.size();
    if data.is_empty() || data.len() % block_size != 0 {
        return Err(CipherError::InvalidCiphertextLength {
            block_size,
            actual: data.len(),
        });
    }

    let mut plaintext = Vec::with_capacity(data.len() / block_size * max_chunk_len(block_size));
    for block in data.chunks(block_size) {
        let decrypted = private_key
            .decrypt(Oaep::new::<Sha256>(), block)
            .map_err(|_| CipherError::Decryption("RSA-OAEP decryption failed".to_string()))?;
        plaintext.extend_from_slice(&decrypted);
    }

    tracing::debug!(
        ciphertext_len = data.len(),
        plaintext_len = plaintext.len(),
        "RSA-OAEP decrypt"
    );
    Ok(plaintext)
}
