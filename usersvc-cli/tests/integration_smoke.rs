//! Smoke tests to verify command wiring

use assert_cmd::Command;
use predicates::prelude::*;

fn usersvc(home: &tempfile::TempDir) -> Command {
    let mut cmd = Command::cargo_bin("usersvc").unwrap();
    cmd.env("USERSVC_CONFIG", home.path().join("config.toml"))
        .env_remove("DATABASE_URL")
        .env_remove("USERSVC_BIND")
        .env_remove("RUST_LOG")
        .current_dir(home.path());
    cmd
}

// === Help ===

#[test]
fn test_serve_help() {
    let home = tempfile::tempdir().unwrap();
    usersvc(&home)
        .arg("serve")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Address to bind to"));
}

#[test]
fn test_dump_help() {
    let home = tempfile::tempdir().unwrap();
    usersvc(&home)
        .arg("dump")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("JSON array"));
}

// === Dump ===

#[test]
fn test_dump_fresh_database_is_empty() {
    let home = tempfile::tempdir().unwrap();
    let url = format!("sqlite://{}", home.path().join("users.db").display());

    usersvc(&home)
        .args(["dump", "--database-url", &url])
        .assert()
        .success()
        .stdout(predicate::str::contains("0 user(s)"));

    assert!(home.path().join("users.db").exists());
}

#[test]
fn test_dump_json_is_empty_array() {
    let home = tempfile::tempdir().unwrap();

    usersvc(&home)
        .args(["dump", "--json", "--database-url", "sqlite::memory:"])
        .assert()
        .success()
        .stdout(predicate::str::diff("[]\n"));
}

// === Config ===

#[test]
fn test_config_path_honours_override() {
    let home = tempfile::tempdir().unwrap();

    usersvc(&home)
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn test_config_init_then_show() {
    let home = tempfile::tempdir().unwrap();

    usersvc(&home).args(["config", "init"]).assert().success();
    assert!(home.path().join("config.toml").exists());

    usersvc(&home)
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));

    usersvc(&home)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("sqlite://user_service.db"));
}
