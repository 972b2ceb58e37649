//! Key pair persistence
//!
//! `FileKeyStore` keeps the public and private PEM files side by side in a
//! directory. Each file is staged under a temp name and renamed into place;
//! the private key is created owner-only on Unix.

use crate::material::{KeyPair, PrivateKeyPem, PublicKeyPem};
use crate::Result;
use std::future::Future;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Default public key file name
pub const DEFAULT_PUBLIC_KEY_FILE: &str = "pub.pem";
/// Default private key file name
pub const DEFAULT_PRIVATE_KEY_FILE: &str = "priv.pem";

/// What a store currently holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPresence {
    /// Neither key is stored
    Missing,
    /// Both keys are stored
    Complete,
    /// Exactly one key is stored
    Partial,
}

/// Backend holding one key pair
pub trait KeyStore: Send + Sync {
    /// Human-readable location for logs and errors
    fn location(&self) -> String;

    /// Which halves of the key pair exist
    fn presence(&self) -> impl Future<Output = Result<KeyPresence>> + Send;

    /// Read the stored key pair
    fn load(&self) -> impl Future<Output = Result<KeyPair>> + Send;

    /// Persist a key pair, replacing any stored one.
    ///
    /// On failure neither half of the new pair is left in the store.
    fn save(&self, key_pair: &KeyPair) -> impl Future<Output = Result<()>> + Send;
}

/// Directory-backed key store
#[derive(Debug, Clone)]
pub struct FileKeyStore {
    dir: PathBuf,
    public_file: String,
    private_file: String,
}

impl FileKeyStore {
    /// Store keys as `pub.pem` / `priv.pem` inside `dir`
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            public_file: DEFAULT_PUBLIC_KEY_FILE.to_string(),
            private_file: DEFAULT_PRIVATE_KEY_FILE.to_string(),
        }
    }

    /// Override the file names
    #[must_use]
    pub fn with_file_names(mut self, public_file: &str, private_file: &str) -> Self {
        self.public_file = public_file.to_string();
        self.private_file = private_file.to_string();
        self
    }

    /// Directory holding the key files
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the public key file
    pub fn public_key_path(&self) -> PathBuf {
        self.dir.join(&self.public_file)
    }

    /// Path of the private key file
    pub fn private_key_path(&self) -> PathBuf {
        self.dir.join(&self.private_file)
    }

    /// Write `contents` to a fresh `<file name>.tmp` and return the temp path.
    ///
    /// With `owner_only` the file is created as 0600 on Unix, so its contents
    /// are never readable by others.
    async fn write_temp(path: &Path, contents: &str, owner_only: bool) -> Result<PathBuf> {
        let temp_path = temp_path_for(path);
        match fs::remove_file(&temp_path).await {
            Ok(()) => tracing::debug!(path = %temp_path.display(), "Removed stale temp file"),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }

        let mut options = fs::OpenOptions::new();
        options.write(true).create_new(true);
        #[cfg(unix)]
        {
            if owner_only {
                options.mode(0o600);
            }
        }
        #[cfg(not(unix))]
        let _ = owner_only;

        let mut file = options.open(&temp_path).await?;
        if let Err(e) = write_all_synced(&mut file, contents).await {
            drop(file);
            Self::discard(&temp_path).await;
            return Err(e.into());
        }
        Ok(temp_path)
    }

    /// Best-effort removal during rollback
    async fn discard(path: &Path) {
        match fs::remove_file(path).await {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to remove file during rollback");
            }
        }
    }
}

/// `priv.pem` -> `priv.pem.tmp`, distinct for any two distinct file names
fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

async fn write_all_synced(file: &mut fs::File, contents: &str) -> std::io::Result<()> {
    file.write_all(contents.as_bytes()).await?;
    file.sync_all().await
}

impl KeyStore for FileKeyStore {
    fn location(&self) -> String {
        self.dir.display().to_string()
    }

    async fn presence(&self) -> Result<KeyPresence> {
        let public = fs::try_exists(self.public_key_path()).await?;
        let private = fs::try_exists(self.private_key_path()).await?;
        Ok(match (public, private) {
            (true, true) => KeyPresence::Complete,
            (false, false) => KeyPresence::Missing,
            _ => KeyPresence::Partial,
        })
    }

    async fn load(&self) -> Result<KeyPair> {
        tracing::debug!(dir = %self.dir.display(), "Loading key pair");
        let public_pem = fs::read_to_string(self.public_key_path()).await?;
        let private_pem = fs::read_to_string(self.private_key_path()).await?;
        Ok(KeyPair {
            public_key: PublicKeyPem::new(public_pem),
            private_key: PrivateKeyPem::new(private_pem),
        })
    }

    async fn save(&self, key_pair: &KeyPair) -> Result<()> {
        fs::create_dir_all(&self.dir).await?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if let Err(e) =
                fs::set_permissions(&self.dir, std::fs::Permissions::from_mode(0o700)).await
            {
                tracing::warn!(dir = %self.dir.display(), error = %e, "Failed to restrict key directory permissions");
            }
        }

        // Both halves are staged before either is renamed into place, and a
        // failed rename undoes the other, so a failed save never leaves half a pair.
        let private_path = self.private_key_path();
        let public_path = self.public_key_path();
        let private_temp =
            Self::write_temp(&private_path, key_pair.private_key.as_str(), true).await?;
        let public_temp =
            match Self::write_temp(&public_path, key_pair.public_key.as_str(), false).await {
                Ok(temp) => temp,
                Err(e) => {
                    Self::discard(&private_temp).await;
                    return Err(e);
                }
            };

        if let Err(e) = fs::rename(&private_temp, &private_path).await {
            Self::discard(&private_temp).await;
            Self::discard(&public_temp).await;
            return Err(e.into());
        }
        if let Err(e) = fs::rename(&public_temp, &public_path).await {
            Self::discard(&private_path).await;
            Self::discard(&public_temp).await;
            return Err(e.into());
        }

        tracing::info!(dir = %self.dir.display(), "Key pair saved");
        Ok(())
    }
}
