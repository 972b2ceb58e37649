//! CLI command execution

use super::{Cli, Commands};
use crate::config::{ConfigError, SigilConfig};
use serde_json::json;
use sigil_cipher::CipherError;
use sigil_common::{LoggingTransformer, Passphrase};
use sigil_jwt::{Claims, JwtError, TokenIssuer, TokenValidator, Verification};
use sigil_key::{KeyError, KeyPair, KeyPresence, KeyProvisioner, KeyStore, ProvisionOutcome};
use std::io::Write;
use std::path::Path;
use std::process::ExitCode;
use thiserror::Error;

/// Errors surfaced to the CLI user
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be loaded
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Key handling failed
    #[error(transparent)]
    Key(#[from] KeyError),
    /// Token issuing failed
    #[error(transparent)]
    Jwt(#[from] JwtError),
    /// Encryption or decryption failed
    #[error(transparent)]
    Cipher(#[from] CipherError),
    /// `--claims` is not a JSON object
    #[error("Invalid claims: {0}")]
    InvalidClaims(serde_json::Error),
    /// No key pair has been provisioned yet
    #[error("No key pair in {0}; run `sigil keygen` first")]
    KeysMissing(String),
    /// I/O failed
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Log a key, token or cipher failure of `command` by error type only.
    ///
    /// Returns the logged line, or `None` for non-cryptographic errors.
    pub fn log_crypto_failure(&self, command: &str) -> Option<String> {
        match self {
            Self::Key(e) => Some(LoggingTransformer::log_crypto_error(command, e)),
            Self::Jwt(e) => Some(LoggingTransformer::log_crypto_error(command, e)),
            Self::Cipher(e) => Some(LoggingTransformer::log_crypto_error(command, e)),
            Self::Config(_) | Self::InvalidClaims(_) | Self::KeysMissing(_) | Self::Io(_) => None,
        }
    }
}

/// Run a parsed command, writing results to stdout
///
/// # Errors
/// Any `CliError` raised by the command.
pub fn run(cli: Cli) -> Result<ExitCode, CliError> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    run_with_output(cli, &mut out)
}

/// Run a parsed command, writing results to `out`
///
/// # Errors
/// Any `CliError` raised by the command.
pub fn run_with_output<W: Write>(cli: Cli, out: &mut W) -> Result<ExitCode, CliError> {
    let mut config = SigilConfig::resolve(cli.config.as_deref())?;
    if let Some(key_dir) = &cli.key_dir {
        config.key_dir.clone_from(key_dir);
    }

    match cli.command.clone() {
        Commands::Keygen { bits } => {
            if let Some(bits) = bits {
                config.keygen.modulus_bits = bits;
            }
            let passphrase = read_passphrase(&cli)?;
            let provisioner = KeyProvisioner::new(config.key_store(), config.keygen.clone());
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()?;
            let (_, outcome) = runtime.block_on(provisioner.provision_keys(&passphrase))?;
            let verb = match outcome {
                ProvisionOutcome::Generated => "generated",
                ProvisionOutcome::Loaded => "loaded",
            };
            writeln!(
                out,
                "{verb} key pair in {}",
                provisioner.store().dir().display()
            )?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Issue {
            claims,
            ttl_minutes,
        } => {
            let claims: Claims = serde_json::from_str(&claims).map_err(CliError::InvalidClaims)?;
            let keys = load_keys(&config)?;
            let passphrase = read_passphrase(&cli)?;
            let ttl_minutes = ttl_minutes.unwrap_or(config.default_ttl_minutes);
            let token =
                TokenIssuer::new().issue(&claims, &keys.private_key, &passphrase, ttl_minutes)?;
            writeln!(out, "{token}")?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Verify { token } => {
            let keys = load_keys(&config)?;
            let verification = TokenValidator::new().try_validate(&token, &keys.public_key)?;
            let report = json!({
                "outcome": verification.outcome_name(),
                "claims": verification.claims(),
            });
            writeln!(out, "{report}")?;
            Ok(match verification {
                Verification::Valid(_) => ExitCode::SUCCESS,
                _ => ExitCode::FAILURE,
            })
        }
        Commands::Encrypt { input, output } => {
            let keys = load_keys(&config)?;
            let plaintext = std::fs::read(&input)?;
            let ciphertext = sigil_cipher::encrypt(&plaintext, &keys.public_key)?;
            std::fs::write(&output, &ciphertext)?;
            writeln!(out, "wrote {} bytes to {}", ciphertext.len(), output.display())?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Decrypt { input, output } => {
            let keys = load_keys(&config)?;
            let passphrase = read_passphrase(&cli)?;
            let ciphertext = std::fs::read(&input)?;
            let plaintext = sigil_cipher::decrypt(&ciphertext, &keys.private_key, &passphrase)?;
            std::fs::write(&output, &plaintext)?;
            writeln!(out, "wrote {} bytes to {}", plaintext.len(), output.display())?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Load the stored key pair without ever generating one
fn load_keys(config: &SigilConfig) -> Result<KeyPair, CliError> {
    let store = config.key_store();
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(load_stored_keys(&store))
}

async fn load_stored_keys<S: KeyStore>(store: &S) -> Result<KeyPair, CliError> {
    match store.presence().await? {
        KeyPresence::Complete => Ok(store.load().await?),
        KeyPresence::Partial => Err(KeyError::PartialKeyPair(store.location()).into()),
        KeyPresence::Missing => Err(CliError::KeysMissing(store.location())),
    }
}

/// `--passphrase-file`, then `--passphrase` / `SIGIL_PASSPHRASE`, then a prompt
fn read_passphrase(cli: &Cli) -> Result<Passphrase, CliError> {
    if let Some(path) = &cli.passphrase_file {
        return read_passphrase_file(path);
    }
    if let Some(passphrase) = &cli.passphrase {
        return Ok(Passphrase::from(passphrase.as_str()));
    }
    let passphrase = rpassword::prompt_password("Key passphrase: ")?;
    Ok(Passphrase::from(passphrase))
}

fn read_passphrase_file(path: &Path) -> Result<Passphrase, CliError> {
    let contents = std::fs::read_to_string(path)?;
    let first_line = contents.lines().next().unwrap_or_default();
    Ok(Passphrase::from(first_line))
}
