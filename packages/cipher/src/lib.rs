//! Asymmetric encryption of opaque payloads
//!
//! `decrypt(&encrypt(data, &public_key)?, &private_key, &passphrase)? == data`
//! for any payload and matching key pair.

mod error;
mod rsa_oaep;

pub use error::{CipherError, Result};
pub use rsa_oaep::{decrypt, encrypt};
