//! Config file loading

use sigil::{ConfigError, SigilConfig};
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
fn test_empty_config_uses_defaults() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("config.json");
    std::fs::write(&path, "{}").expect("Failed to write config");

    let config = SigilConfig::load(&path).expect("Empty object should parse");
    assert_eq!(config, SigilConfig::default());
    assert_eq!(config.default_ttl_minutes, 60);
    assert_eq!(config.public_key_file, "pub.pem");
    assert_eq!(config.private_key_file, "priv.pem");
    assert_eq!(config.keygen.modulus_bits, 4096);
}

#[test]
fn test_config_overrides() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("config.json");
    std::fs::write(
        &path,
        r#"{"key_dir":"/srv/keys","private_key_file":"signing.pem","default_ttl_minutes":15,"keygen":{"modulus_bits":2048}}"#,
    )
    .expect("Failed to write config");

    let config = SigilConfig::load(&path).expect("Config should parse");
    assert_eq!(config.key_dir, PathBuf::from("/srv/keys"));
    assert_eq!(config.default_ttl_minutes, 15);
    assert_eq!(config.keygen.modulus_bits, 2048);
    assert_eq!(config.keygen.kdf_iterations, 100_000);

    let store = config.key_store();
    assert_eq!(store.private_key_path(), PathBuf::from("/srv/keys/signing.pem"));
    assert_eq!(store.public_key_path(), PathBuf::from("/srv/keys/pub.pem"));
}

#[test]
fn test_missing_config_file_is_read_error() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("absent.json");

    let result = SigilConfig::resolve(Some(&path));
    assert!(matches!(result, Err(ConfigError::Read { .. })));
}

#[test]
fn test_malformed_config_is_parse_error() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("config.json");
    std::fs::write(&path, r#"{"default_ttl_minutes":"soon"}"#).expect("Failed to write config");

    match SigilConfig::load(&path) {
        Err(ConfigError::Parse { path: reported, .. }) => assert_eq!(reported, path),
        other => panic!("Expected parse error, got {other:?}"),
    }
}
