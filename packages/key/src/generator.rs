//! RSA key pair generation
//!
//! Public keys are written as SPKI PEM. Private keys are written as PKCS#8
//! PEM wrapped in PBES2 (PBKDF2-HMAC-SHA256 + AES-256-CBC).

use crate::material::{ENCRYPTED_PRIVATE_KEY_LABEL, KeyPair, PrivateKeyPem, PublicKeyPem};
use crate::{KeyError, KeyGenConfig, Result};
use pkcs8::pkcs5::pbes2;
use pkcs8::{EncodePrivateKey, EncodePublicKey, LineEnding, PrivateKeyInfo};
use rand::RngCore;
use rsa::rand_core::OsRng;
use rsa::{RsaPrivateKey, RsaPublicKey};
use sigil_common::Passphrase;
use zeroize::Zeroizing;

const SALT_LEN: usize = 16;
const AES_BLOCK_SIZE: usize = 16;

/// Generate a fresh RSA key pair.
///
/// CPU-bound; async callers should run it on a blocking thread.
///
/// # Errors
/// Returns `KeyError` for invalid settings or when generation/encoding fails.
pub fn generate_key_pair(passphrase: &Passphrase, config: &KeyGenConfig) -> Result<KeyPair> {
    config.validate()?;

    let private_key = RsaPrivateKey::new(&mut OsRng, config.modulus_bits)
        .map_err(|e| KeyError::Generation(format!("RSA key generation failed: {e}")))?;
    let public_key = RsaPublicKey::from(&private_key);

    let public_pem = public_key
        .to_public_key_pem(LineEnding::LF)
        .map_err(|e| KeyError::Encoding(format!("SPKI encoding failed: {e}")))?;

    let private_pem = if passphrase.is_empty() {
        tracing::warn!("Empty passphrase: private key will be stored unencrypted");
        private_key
            .to_pkcs8_pem(LineEnding::LF)
            .map_err(|e| KeyError::Encoding(format!("PKCS#8 encoding failed: {e}")))?
    } else {
        encrypt_private_key(&private_key, passphrase, config.kdf_iterations)?
    };

    tracing::debug!(
        modulus_bits = config.modulus_bits,
        encrypted = !passphrase.is_empty(),
        "Generated RSA key pair"
    );

    Ok(KeyPair {
        public_key: PublicKeyPem::new(public_pem),
        private_key: PrivateKeyPem::new(private_pem.as_str()),
    })
}

fn encrypt_private_key(
    private_key: &RsaPrivateKey,
    passphrase: &Passphrase,
    kdf_iterations: u32,
) -> Result<Zeroizing<String>> {
    let der = private_key
        .to_pkcs8_der()
        .map_err(|e| KeyError::Encoding(format!("PKCS#8 encoding failed: {e}")))?;
    let info = PrivateKeyInfo::try_from(der.as_bytes())
        .map_err(|e| KeyError::Encoding(format!("PKCS#8 re-parse failed: {e}")))?;

    let mut salt = [0u8; SALT_LEN];
    let mut iv = [0u8; AES_BLOCK_SIZE];
    let mut rng = rand::rng();
    rng.fill_bytes(&mut salt);
    rng.fill_bytes(&mut iv);

    let params = pbes2::Parameters::pbkdf2_sha256_aes256cbc(kdf_iterations, &salt, &iv)
        .map_err(|e| KeyError::Encoding(format!("PBES2 parameters rejected: {e}")))?;
    let encrypted = info
        .encrypt_with_params(params, passphrase.as_bytes())
        .map_err(|e| KeyError::Encoding(format!("PKCS#8 encryption failed: {e}")))?;

    encrypted
        .to_pem(ENCRYPTED_PRIVATE_KEY_LABEL, LineEnding::LF)
        .map_err(|e| KeyError::Encoding(format!("PEM encoding failed: {e}")))
}
