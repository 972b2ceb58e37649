//! Explicit, idempotent key provisioning
//!
//! Keys are generated only when the store holds none. Existing keys are
//! never replaced, since replacing them invalidates every token already issued.

use crate::generator::generate_key_pair;
use crate::material::KeyPair;
use crate::store::{KeyPresence, KeyStore};
use crate::{KeyError, KeyGenConfig, Result};
use sigil_common::{LoggingTransformer, Passphrase};

/// How `provision_keys` obtained its key pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProvisionOutcome {
    /// A new pair was generated and saved
    Generated,
    /// An existing pair was loaded
    Loaded,
}

/// Generates a key pair on first use and loads it afterwards
#[derive(Debug, Clone)]
pub struct KeyProvisioner<S> {
    store: S,
    config: KeyGenConfig,
}

impl<S: KeyStore> KeyProvisioner<S> {
    /// Provisioner over `store` using `config` for new keys
    pub fn new(store: S, config: KeyGenConfig) -> Self {
        Self { store, config }
    }

    /// Underlying store
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Load the stored key pair, or generate and persist one when none exists.
    ///
    /// # Errors
    /// `PartialKeyPair` when only one key file exists; otherwise any
    /// generation or storage failure.
    pub async fn provision_keys(
        &self,
        passphrase: &Passphrase,
    ) -> Result<(KeyPair, ProvisionOutcome)> {
        match self.store.presence().await? {
            KeyPresence::Complete => {
                let key_pair = self.store.load().await?;
                tracing::info!(
                    location = %self.store.location(),
                    public_key = %LoggingTransformer::fingerprint(key_pair.public_key.as_str().as_bytes()),
                    "Loaded existing key pair"
                );
                Ok((key_pair, ProvisionOutcome::Loaded))
            }
            KeyPresence::Partial => Err(KeyError::PartialKeyPair(self.store.location())),
            KeyPresence::Missing => {
                tracing::info!(
                    location = %self.store.location(),
                    modulus_bits = self.config.modulus_bits,
                    "No key pair found, generating"
                );
                let passphrase = passphrase.clone();
                let config = self.config.clone();
                let key_pair =
                    tokio::task::spawn_blocking(move || generate_key_pair(&passphrase, &config))
                        .await
                        .map_err(|e| {
                            KeyError::Generation(format!("key generation task failed: {e}"))
                        })??;

                self.store.save(&key_pair).await?;
                tracing::info!(
                    public_key = %LoggingTransformer::fingerprint(key_pair.public_key.as_str().as_bytes()),
                    "Generated new key pair"
                );
                Ok((key_pair, ProvisionOutcome::Generated))
            }
        }
    }
}
