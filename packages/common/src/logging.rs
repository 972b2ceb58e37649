//! Structured logging setup
//!
//! Library crates emit `tracing` events; with `tracing`'s `log` feature those
//! reach the `log` facade, which `env_logger` renders here.

use log::{error, info};
use sha2::{Digest, Sha256};
use std::sync::Once;

static INIT_LOGGER: Once = Once::new();

/// `env_logger` based logging infrastructure
pub struct LoggingTransformer;

impl LoggingTransformer {
    /// Initialize logging once at process startup.
    ///
    /// Levels come from `RUST_LOG`, e.g. `RUST_LOG=sigil_jwt=debug,sigil_key=info`.
    pub fn init() {
        INIT_LOGGER.call_once(|| {
            env_logger::Builder::from_default_env()
                .format_timestamp_micros()
                .init();

            info!("Structured logging initialized");
        });
    }

    /// Initialize logging for tests; safe to call from every test
    pub fn init_test() {
        let _ = env_logger::Builder::from_default_env()
            .is_test(true)
            .try_init();
    }

    /// Log that `operation` failed, naming only the concrete error type.
    ///
    /// The error's message can carry key or token details, so it is left out.
    /// Returns the logged line.
    pub fn log_crypto_error<E: std::error::Error + ?Sized>(operation: &str, error: &E) -> String {
        let line = format!(
            "{operation} failed (error_type: {})",
            std::any::type_name::<E>()
        );
        error!("{line}");
        line
    }

    /// Short SHA-256 fingerprint of `data`, safe to print.
    ///
    /// Used to correlate keys and subjects in logs without exposing them.
    #[must_use]
    pub fn fingerprint(data: &[u8]) -> String {
        let hash = Sha256::digest(data);
        let hex_hash = format!("{hash:x}");
        format!("#{}", &hex_hash[..12])
    }
}
