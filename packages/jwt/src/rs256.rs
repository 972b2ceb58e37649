//! RSASSA-PKCS1-v1_5 with SHA-256 (RS256)
//!
//! Keys are decoded from PEM on every call and dropped when the call returns.

use crate::error::{JwtError, JwtResult};
use rsa::pkcs1v15::{Signature, SigningKey, VerifyingKey};
use rsa::sha2::Sha256;
use rsa::signature::{SignatureEncoding, Signer, Verifier};
use rsa::traits::PublicKeyParts;
use sigil_common::Passphrase;
use sigil_key::{PrivateKeyPem, PublicKeyPem};

/// Sign `message` with RS256
///
/// # Errors
/// `JwtError::Key` if the key cannot be parsed or the passphrase is wrong,
/// `JwtError::Signature` if the RSA primitive fails.
pub fn sign(
    message: &[u8],
    private_key: &PrivateKeyPem,
    passphrase: &Passphrase,
) -> JwtResult<Vec<u8>> {
    let private_key = private_key.decode(passphrase)?;

    let signing_key = SigningKey::<Sha256>::new(private_key);
    let signature = signing_key
        .try_sign(message)
        .map_err(|e| JwtError::Signature(format!("RS256 signing failed: {e}")))?;
    Ok(signature.to_bytes().as_ref().to_vec())
}

/// Verify an RS256 signature over `message`
///
/// Returns `Ok(false)` for a well-formed signature that does not match.
///
/// # Errors
/// `JwtError::Key` if the public key cannot be parsed,
/// `JwtError::Signature` if `signature` is not one modulus-length block.
pub fn verify(message: &[u8], signature: &[u8], public_key: &PublicKeyPem) -> JwtResult<bool> {
    let public_key = public_key.decode()?;

    let expected_len = public_key.size();
    if signature.len() != expected_len {
        return Err(JwtError::Signature(format!(
            "RS256 signature must be {expected_len} bytes, got {}",
            signature.len()
        )));
    }

    let verifying_key = VerifyingKey::<Sha256>::new(public_key);
    let signature = Signature::try_from(signature)
        .map_err(|_| JwtError::Signature("malformed RS256 signature".to_string()))?;

    Ok(verifying_key.verify(message, &signature).is_ok())
}
