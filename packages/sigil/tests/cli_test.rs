//! End-to-end CLI commands over a temporary key directory

use clap::Parser;
use sigil::cli::{Cli, CliError, run_with_output};
use sigil::{KeyError, PublicKeyPem};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tempfile::TempDir;

const PASSPHRASE: &str = "cli-test-pass";

struct Workspace {
    dir: TempDir,
    config: PathBuf,
}

impl Workspace {
    fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let config = dir.path().join("config.json");
        let key_dir = dir.path().join("keys");
        let contents = serde_json::json!({
            "key_dir": key_dir,
            "keygen": { "modulus_bits": 2048, "kdf_iterations": 1000 },
        });
        std::fs::write(&config, contents.to_string()).expect("Failed to write config");
        Self { dir, config }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn key_dir(&self) -> PathBuf {
        self.path("keys")
    }

    fn run(&self, args: &[&str]) -> (Result<ExitCode, CliError>, String) {
        let config = self.config.display().to_string();
        let mut argv = vec!["sigil", "--config", config.as_str(), "--passphrase", PASSPHRASE];
        argv.extend_from_slice(args);
        let cli = Cli::try_parse_from(argv).expect("Arguments should parse");
        let mut out = Vec::new();
        let result = run_with_output(cli, &mut out);
        (result, String::from_utf8(out).expect("Output should be UTF-8"))
    }

    fn run_ok(&self, args: &[&str]) -> String {
        let (result, out) = self.run(args);
        assert_eq!(result.expect("Command should succeed"), ExitCode::SUCCESS);
        out
    }
}

fn verify_report(out: &str) -> serde_json::Value {
    serde_json::from_str(out.trim()).expect("verify should print JSON")
}

#[test]
fn test_keygen_is_idempotent() {
    let ws = Workspace::new();

    let out = ws.run_ok(&["keygen"]);
    assert!(out.starts_with("generated"), "unexpected output: {out}");
    let public_pem =
        std::fs::read_to_string(ws.key_dir().join("pub.pem")).expect("pub.pem should exist");

    let out = ws.run_ok(&["keygen"]);
    assert!(out.starts_with("loaded"), "unexpected output: {out}");
    let reloaded =
        std::fs::read_to_string(ws.key_dir().join("pub.pem")).expect("pub.pem should exist");
    assert_eq!(public_pem, reloaded);
    PublicKeyPem::new(reloaded)
        .decode()
        .expect("Public key should parse");
}

#[test]
fn test_issue_then_verify() {
    let ws = Workspace::new();
    ws.run_ok(&["keygen"]);

    let token = ws.run_ok(&["issue", "--claims", r#"{"sub":"user-1","admin":true}"#]);
    let token = token.trim();
    assert_eq!(token.split('.').count(), 3);

    let report = verify_report(&ws.run_ok(&["verify", token]));
    assert_eq!(report["outcome"], "valid");
    assert_eq!(report["claims"]["sub"], "user-1");
    assert_eq!(report["claims"]["admin"], true);
    assert!(report["claims"]["exp"].is_i64());
}

#[test]
fn test_verify_expired_token_fails() {
    let ws = Workspace::new();
    ws.run_ok(&["keygen"]);

    let token = ws.run_ok(&["issue", "--claims", r#"{"sub":"user-1"}"#, "--ttl-minutes", "-5"]);
    let (result, out) = ws.run(&["verify", token.trim()]);

    assert_eq!(result.expect("verify should run"), ExitCode::FAILURE);
    let report = verify_report(&out);
    assert_eq!(report["outcome"], "expired");
    assert_eq!(report["claims"]["sub"], "user-1");
}

#[test]
fn test_verify_tampered_token_fails() {
    let ws = Workspace::new();
    ws.run_ok(&["keygen"]);

    let token = ws.run_ok(&["issue", "--claims", r#"{"role":"user"}"#]);
    let mut parts: Vec<String> = token.trim().split('.').map(str::to_string).collect();
    let forged = serde_json::json!({ "role": "admin", "exp": i64::MAX });
    parts[1] = sigil::codec::encode(forged.to_string().as_bytes());
    let forged_token = parts.join(".");

    let (result, out) = ws.run(&["verify", &forged_token]);
    assert_eq!(result.expect("verify should run"), ExitCode::FAILURE);
    let report = verify_report(&out);
    assert_eq!(report["outcome"], "invalid_signature");
    assert!(report["claims"].is_null());

    let (result, out) = ws.run(&["verify", "not-a-token"]);
    assert_eq!(result.expect("verify should run"), ExitCode::FAILURE);
    assert_eq!(verify_report(&out)["outcome"], "invalid_structure");
}

#[test]
fn test_issue_rejects_non_object_claims() {
    let ws = Workspace::new();
    ws.run_ok(&["keygen"]);

    let (result, _) = ws.run(&["issue", "--claims", "[1,2,3]"]);
    assert!(matches!(result, Err(CliError::InvalidClaims(_))));
}

#[test]
fn test_commands_require_keys() {
    let ws = Workspace::new();

    let (result, _) = ws.run(&["issue"]);
    assert!(matches!(result, Err(CliError::KeysMissing(_))));

    std::fs::create_dir_all(ws.key_dir()).expect("Failed to create key dir");
    std::fs::write(ws.key_dir().join("priv.pem"), "orphan").expect("Failed to write key");
    let (result, _) = ws.run(&["verify", "a.b.c"]);
    assert!(matches!(
        result,
        Err(CliError::Key(KeyError::PartialKeyPair(_)))
    ));
}

#[test]
fn test_encrypt_decrypt_files() {
    let ws = Workspace::new();
    ws.run_ok(&["keygen"]);

    let payload: Vec<u8> = (0..1000u32).map(|i| (i % 251) as u8).collect();
    let plain = ws.path("plain.bin");
    let sealed = ws.path("sealed.bin");
    let opened = ws.path("opened.bin");
    std::fs::write(&plain, &payload).expect("Failed to write payload");

    ws.run_ok(&["encrypt", "--input", path_str(&plain), "--output", path_str(&sealed)]);
    let ciphertext = std::fs::read(&sealed).expect("Ciphertext should exist");
    assert_eq!(ciphertext.len() % 256, 0);
    assert_ne!(ciphertext, payload);

    ws.run_ok(&["decrypt", "--input", path_str(&sealed), "--output", path_str(&opened)]);
    assert_eq!(std::fs::read(&opened).expect("Plaintext should exist"), payload);
}

#[test]
fn test_passphrase_file_and_wrong_passphrase() {
    let ws = Workspace::new();
    ws.run_ok(&["keygen"]);

    let good = ws.path("good.pass");
    let bad = ws.path("bad.pass");
    std::fs::write(&good, format!("{PASSPHRASE}\n")).expect("Failed to write passphrase");
    std::fs::write(&bad, "wrong\n").expect("Failed to write passphrase");
    let config = ws.config.display().to_string();

    let issue = |pass_file: &Path| {
        let cli = Cli::try_parse_from([
            "sigil",
            "--config",
            config.as_str(),
            "--passphrase-file",
            path_str(pass_file),
            "issue",
        ])
        .expect("Arguments should parse");
        run_with_output(cli, &mut Vec::new())
    };

    assert_eq!(
        issue(&good).expect("Passphrase from file should work"),
        ExitCode::SUCCESS
    );
    assert!(matches!(
        issue(&bad),
        Err(CliError::Jwt(sigil::JwtError::Key(KeyError::Decryption)))
    ));
}

/// Run the built `sigil` binary with `SIGIL_PASSPHRASE` set in its environment
fn run_binary_with_env_passphrase(env_passphrase: &str, args: &[&str]) -> std::process::Output {
    std::process::Command::new(env!("CARGO_BIN_EXE_sigil"))
        .args(args)
        .env("SIGIL_PASSPHRASE", env_passphrase)
        .env("RUST_LOG", "off")
        .output()
        .expect("Failed to run sigil binary")
}

#[test]
fn test_passphrase_from_environment() {
    let ws = Workspace::new();
    ws.run_ok(&["keygen"]);
    let config = path_str(&ws.config).to_string();

    let output = run_binary_with_env_passphrase(PASSPHRASE, &["--config", &config, "issue"]);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let token = String::from_utf8(output.stdout).expect("Output should be UTF-8");
    assert_eq!(token.trim().split('.').count(), 3);

    let output = run_binary_with_env_passphrase("wrong", &["--config", &config, "issue"]);
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("error:"));
}

#[test]
fn test_passphrase_file_wins_over_environment() {
    let ws = Workspace::new();
    ws.run_ok(&["keygen"]);
    let pass_file = ws.path("good.pass");
    std::fs::write(&pass_file, PASSPHRASE).expect("Failed to write passphrase");

    let output = run_binary_with_env_passphrase(
        "from-env",
        &[
            "--config",
            path_str(&ws.config),
            "--passphrase-file",
            path_str(&pass_file),
            "issue",
        ],
    );

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
}

#[test]
fn test_passphrase_file_wins_over_flag() {
    let ws = Workspace::new();
    ws.run_ok(&["keygen"]);
    let pass_file = ws.path("good.pass");
    std::fs::write(&pass_file, PASSPHRASE).expect("Failed to write passphrase");

    let cli = Cli::try_parse_from([
        "sigil",
        "--config",
        path_str(&ws.config),
        "--passphrase",
        "wrong",
        "--passphrase-file",
        path_str(&pass_file),
        "issue",
    ])
    .expect("Both passphrase sources should be accepted together");

    assert_eq!(
        run_with_output(cli, &mut Vec::new()).expect("Passphrase file should be used"),
        ExitCode::SUCCESS
    );
}

#[test]
fn test_crypto_failure_is_logged_by_type() {
    let ws = Workspace::new();
    ws.run_ok(&["keygen"]);
    let cli = Cli::try_parse_from([
        "sigil",
        "--config",
        path_str(&ws.config),
        "--passphrase",
        "wrong",
        "issue",
    ])
    .expect("Arguments should parse");
    let command = cli.command.name();

    let err = run_with_output(cli, &mut Vec::new()).expect_err("Wrong passphrase should fail");
    let line = err
        .log_crypto_failure(command)
        .expect("Key failures should be logged");
    assert!(line.starts_with("issue failed"), "unexpected line: {line}");
    assert!(line.contains("JwtError"), "unexpected line: {line}");

    let missing = CliError::KeysMissing("/nowhere".to_string());
    assert!(missing.log_crypto_failure("issue").is_none());
}

#[test]
fn test_key_dir_flag_overrides_config() {
    let ws = Workspace::new();
    let other = ws.path("elsewhere");
    let cli = Cli::try_parse_from([
        "sigil",
        "--config",
        path_str(&ws.config),
        "--key-dir",
        path_str(&other),
        "--passphrase",
        PASSPHRASE,
        "keygen",
    ])
    .expect("Arguments should parse");
    run_with_output(cli, &mut Vec::new()).expect("keygen should succeed");

    assert!(other.join("pub.pem").exists());
    assert!(!ws.key_dir().exists());
}

fn path_str(path: &Path) -> &str {
    path.to_str().expect("Temp paths should be UTF-8")
}
