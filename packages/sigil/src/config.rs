//! Application configuration
//!
//! Read from a JSON file; every field is optional and falls back to its default.

use serde::{Deserialize, Serialize};
use sigil_key::{FileKeyStore, KeyGenConfig};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

/// Configuration loading failures
#[derive(Debug, Error)]
pub enum ConfigError {
    /// File could not be read
    #[error("Failed to read config {path}: {source}")]
    Read {
        /// Config file path
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },
    /// File is not valid configuration JSON
    #[error("Invalid config {path}: {source}")]
    Parse {
        /// Config file path
        path: PathBuf,
        /// Underlying parse error
        source: serde_json::Error,
    },
}

/// Settings shared by the CLI commands
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SigilConfig {
    /// Directory holding the key pair
    #[serde(default = "default_key_dir")]
    pub key_dir: PathBuf,
    /// Public key file name inside `key_dir`
    #[serde(default = "default_public_key_file")]
    pub public_key_file: String,
    /// Private key file name inside `key_dir`
    #[serde(default = "default_private_key_file")]
    pub private_key_file: String,
    /// Token lifetime used when `issue` gets no `--ttl-minutes`
    #[serde(default = "default_ttl_minutes")]
    pub default_ttl_minutes: i64,
    /// Settings for newly generated keys
    #[serde(default)]
    pub keygen: KeyGenConfig,
}

fn config_root() -> PathBuf {
    match dirs::config_dir() {
        Some(dir) => dir.join("sigil"),
        None => {
            warn!("Could not determine OS config directory, using ./sigil");
            PathBuf::from("./sigil")
        }
    }
}

fn default_key_dir() -> PathBuf {
    config_root().join("keys")
}

fn default_public_key_file() -> String {
    sigil_key::store::DEFAULT_PUBLIC_KEY_FILE.to_string()
}

fn default_private_key_file() -> String {
    sigil_key::store::DEFAULT_PRIVATE_KEY_FILE.to_string()
}

fn default_ttl_minutes() -> i64 {
    60
}

impl Default for SigilConfig {
    fn default() -> Self {
        Self {
            key_dir: default_key_dir(),
            public_key_file: default_public_key_file(),
            private_key_file: default_private_key_file(),
            default_ttl_minutes: default_ttl_minutes(),
            keygen: KeyGenConfig::default(),
        }
    }
}

impl SigilConfig {
    /// Default config file location: `<os config dir>/sigil/config.json`
    #[must_use]
    pub fn default_path() -> PathBuf {
        config_root().join("config.json")
    }

    /// Parse a config file
    ///
    /// # Errors
    /// `ConfigError` if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load `path` if given, else the default file if it exists, else defaults
    ///
    /// # Errors
    /// `ConfigError` if a file that should be used cannot be read or parsed.
    pub fn resolve(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => {
                let default_path = Self::default_path();
                if default_path.exists() {
                    Self::load(&default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Key store described by this configuration
    #[must_use]
    pub fn key_store(&self) -> FileKeyStore {
        FileKeyStore::new(&self.key_dir)
            .with_file_names(&self.public_key_file, &self.private_key_file)
    }
}
