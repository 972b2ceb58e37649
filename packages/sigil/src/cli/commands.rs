//! CLI command definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Top-level arguments
#[derive(Debug, Parser)]
#[command(name = "sigil")]
#[command(about = "Issue and verify RS256 tokens, encrypt payloads with RSA")]
pub struct Cli {
    /// Path to a JSON config file (default: $XDG_CONFIG_HOME/sigil/config.json)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding pub.pem / priv.pem (overrides the config file)
    #[arg(long, global = true)]
    pub key_dir: Option<PathBuf>,

    /// Private key passphrase (prompted for when neither this nor --passphrase-file is given)
    #[arg(long, env = "SIGIL_PASSPHRASE", hide_env_values = true, global = true)]
    pub passphrase: Option<String>,

    /// Read the private key passphrase from the first line of a file; takes
    /// precedence over --passphrase and SIGIL_PASSPHRASE
    #[arg(long, global = true)]
    pub passphrase_file: Option<PathBuf>,

    /// Command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Create the key pair if the key directory has none
    ///
    /// Existing keys are loaded and reported, never replaced.
    Keygen {
        /// RSA modulus size (2048, 3072 or 4096)
        #[arg(long)]
        bits: Option<usize>,
    },

    /// Sign a claim set and print the token
    Issue {
        /// Claims as a JSON object, e.g. '{"sub":"user-1"}'
        #[arg(long, default_value = "{}")]
        claims: String,

        /// Token lifetime in minutes; zero or negative yields an expired token
        #[arg(long, allow_hyphen_values = true)]
        ttl_minutes: Option<i64>,
    },

    /// Validate a token and print the outcome as JSON
    ///
    /// Exits 0 only for a valid token.
    Verify {
        /// Token to validate
        token: String,
    },

    /// Encrypt a file with the public key
    Encrypt {
        /// Plaintext input file
        #[arg(long)]
        input: PathBuf,

        /// Ciphertext output file
        #[arg(long)]
        output: PathBuf,
    },

    /// Decrypt a file with the private key
    Decrypt {
        /// Ciphertext input file
        #[arg(long)]
        input: PathBuf,

        /// Plaintext output file
        #[arg(long)]
        output: PathBuf,
    },
}

impl Commands {
    /// Subcommand name as typed on the command line
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Keygen { .. } => "keygen",
            Self::Issue { .. } => "issue",
            Self::Verify { .. } => "verify",
            Self::Encrypt { .. } => "encrypt",
            Self::Decrypt { .. } => "decrypt",
        }
    }
}
