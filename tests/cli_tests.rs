//! End-to-end CLI tests running the compiled binary.
//!
//! Only commands that never touch host state are exercised here:
//! `config` and `provision --dry-run`.

use assert_cmd::Command;
use predicates::prelude::*;

fn rigup() -> Command {
    Command::cargo_bin("rigup").expect("rigup binary")
}

#[test]
fn help_lists_subcommands() {
    rigup()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("provision"))
        .stdout(predicate::str::contains("check"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn version_flag_works() {
    rigup()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("rigup"));
}

#[test]
fn config_init_writes_template() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");

    rigup()
        .args(["config", "init"])
        .arg(&path)
        .assert()
        .success();

    let contents = std::fs::read_to_string(&path).unwrap();
    assert!(contents.contains("[network]"));
    assert!(contents.contains("expected_address"));
}

#[test]
fn config_init_refuses_to_overwrite_without_force() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "# mine").unwrap();

    rigup()
        .args(["config", "init"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));

    assert_eq!(std::fs::read_to_string(&path).unwrap(), "# mine");
}

#[test]
fn config_validate_accepts_generated_template() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");

    rigup()
        .args(["config", "init"])
        .arg(&path)
        .assert()
        .success();
    rigup()
        .args(["config", "validate", "-c"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("valid"));
}

#[test]
fn config_validate_returns_nonzero_on_bad_address() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        "[network]\ndomain = \"chat.example.com\"\nexpected_address = \"not-an-ip\"\nmetadata_url = \"http://169.254.169.254/latest/meta-data/public-ipv4\"\n",
    )
    .unwrap();

    rigup()
        .args(["config", "validate", "-c"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected_address"));
}

#[test]
fn config_show_prints_effective_settings() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.toml");

    // Missing file falls back to defaults.
    rigup()
        .args(["config", "show", "-c"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("8081"))
        .stdout(predicate::str::contains("11434"));
}

#[test]
fn provision_dry_run_prints_ordered_plan() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.toml");

    rigup()
        .args(["provision", "--dry-run", "-c"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("1. bootstrap"))
        .stdout(predicate::str::contains("8. health"));
}

#[test]
fn provision_dry_run_json_emits_plan() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.toml");

    rigup()
        .args(["--json", "provision", "--dry-run", "-c"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"plan\""))
        .stdout(predicate::str::contains("\"dry_run\":true"));
}
