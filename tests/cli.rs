use assert_cmd::Command;
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use predicates::str::contains;
use std::fs;
use std::path::PathBuf;

/// Helper to get a temporary home directory
fn temp_home() -> tempfile::TempDir {
    tempfile::tempdir().expect("create temp dir")
}

/// Helper to get the credential file path in the temp home
fn credential_path(dir: &tempfile::TempDir) -> PathBuf {
    dir.path().join(".fintrack").join("credentials.json")
}

/// An unsigned ID token carrying the given claims.
fn id_token(claims: &str) -> String {
    format!(
        "{}.{}.c2ln",
        URL_SAFE_NO_PAD.encode(r#"{"alg":"RS256"}"#),
        URL_SAFE_NO_PAD.encode(claims)
    )
}

const BINARY_NAME: &str = "fintrack";

fn fintrack(home: &tempfile::TempDir) -> Command {
    let mut cmd = Command::cargo_bin(BINARY_NAME).unwrap();
    cmd.env("HOME", home.path())
        .env_remove("FINTRACK_API_URL")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
/// Help command should display usage information.
fn cli_help_displays_usage() {
    let mut cmd = Command::cargo_bin(BINARY_NAME).unwrap();
    cmd.arg("--help");
    cmd.assert().success().stdout(contains("Usage"));
}

#[test]
/// Logout command should delete an existing credential file.
fn logout_deletes_credential_file() {
    let tmp = temp_home();
    let path = credential_path(&tmp);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, r#"{"auth_token":"a.b.c"}"#).unwrap();
    assert!(path.exists());

    fintrack(&tmp)
        .arg("logout")
        .assert()
        .success()
        .stdout(contains("Logging out"));

    assert!(!path.exists());
}

#[test]
fn login_persists_a_valid_credential() {
    let tmp = temp_home();
    let token = id_token(r#"{"email":"ada@example.com","name":"Ada","picture":""}"#);

    fintrack(&tmp)
        .args(["login", "--credential", &token])
        .assert()
        .success()
        .stdout(contains("ada@example.com"));

    let stored = fs::read_to_string(credential_path(&tmp)).unwrap();
    assert!(stored.contains(&token));

    fintrack(&tmp)
        .arg("whoami")
        .assert()
        .success()
        .stdout(contains("Ada <ada@example.com>"));
}

#[test]
fn login_reads_credential_from_stdin() {
    let tmp = temp_home();
    let token = id_token(r#"{"email":"bo@example.com","name":"Bo"}"#);

    fintrack(&tmp)
        .arg("login")
        .write_stdin(format!("{}\n", token))
        .assert()
        .success();

    assert!(credential_path(&tmp).exists());
}

#[test]
fn login_rejects_malformed_credential() {
    let tmp = temp_home();

    fintrack(&tmp)
        .args(["login", "--credential", "not-a-token"])
        .assert()
        .failure()
        .stderr(contains("Login failed"));

    assert!(!credential_path(&tmp).exists());
}

#[test]
fn login_rejects_token_without_email() {
    let tmp = temp_home();
    let token = id_token(r#"{"name":"Ada"}"#);

    fintrack(&tmp)
        .args(["login", "--credential", &token])
        .assert()
        .failure();

    assert!(!credential_path(&tmp).exists());
}

#[test]
fn whoami_when_signed_out() {
    let tmp = temp_home();
    fintrack(&tmp)
        .arg("whoami")
        .assert()
        .success()
        .stdout(contains("Not signed in"));
}

#[test]
fn stale_credential_is_discarded_on_startup() {
    let tmp = temp_home();
    let path = credential_path(&tmp);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, r#"{"auth_token":"garbage"}"#).unwrap();

    fintrack(&tmp)
        .arg("whoami")
        .assert()
        .success()
        .stdout(contains("Not signed in"));

    assert!(!path.exists());
}

#[test]
fn data_commands_require_sign_in() {
    let tmp = temp_home();
    fintrack(&tmp)
        .args(["--api-url", "http://127.0.0.1:9", "transactions", "list"])
        .assert()
        .failure()
        .stderr(contains("Not signed in"));
}
