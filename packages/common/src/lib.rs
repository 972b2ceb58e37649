//! Common infrastructure shared by the sigil crates
//!
//! - `Passphrase`: secret wrapper for private-key passphrases
//! - `LoggingTransformer`: one-shot `env_logger` setup and redacting log helpers

mod logging;
mod passphrase;

pub use logging::LoggingTransformer;
pub use passphrase::Passphrase;
