//! Integration tests for the project-creator binary.
//!
//! None of these reach the generator or git: every create invocation
//! either fails validation or is a dry run.

use std::fs;
use std::path::Path;

use assert_cmd::cargo;
use predicates::prelude::*;
use tempfile::TempDir;

const WSGI: &str = include_str!("../../creator-adapters/tests/fixtures/startproject/wsgi.py");
const URLS: &str = include_str!("../../creator-adapters/tests/fixtures/startproject/urls.py");
const SETTINGS: &str =
    include_str!("../../creator-adapters/tests/fixtures/startproject/settings.py");

/// Command running in an empty directory, isolated from the caller's env.
fn cmd(cwd: &Path) -> assert_cmd::Command {
    let mut cmd = cargo::cargo_bin_cmd!("project-creator");
    cmd.current_dir(cwd)
        .env_remove("RUST_LOG")
        .env_remove("PROJECT_CREATOR_DEBUG")
        .env("NO_COLOR", "1");
    cmd
}

fn generated_project(root: &Path) {
    fs::create_dir_all(root.join("conf")).unwrap();
    fs::write(root.join("conf/wsgi.py"), WSGI).unwrap();
    fs::write(root.join("conf/urls.py"), URLS).unwrap();
    fs::write(root.join("conf/settings.py"), SETTINGS).unwrap();
}

#[test]
fn test_help_flag() {
    let temp = TempDir::new().unwrap();
    cmd(temp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("LOCATION"))
        .stdout(predicate::str::contains("--allow-existing-empty"))
        .stdout(predicate::str::contains("patch"));
}

#[test]
fn test_version_flag() {
    let temp = TempDir::new().unwrap();
    cmd(temp.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_no_arguments_is_usage_error() {
    let temp = TempDir::new().unwrap();
    cmd(temp.path()).assert().code(2);
}

#[test]
fn test_missing_location_is_usage_error() {
    let temp = TempDir::new().unwrap();
    cmd(temp.path())
        .arg("-v")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("LOCATION"));
}

#[test]
fn test_existing_location_rejected() {
    let temp = TempDir::new().unwrap();
    let target = temp.path().join("proj1");
    fs::create_dir(&target).unwrap();

    cmd(temp.path())
        .arg(&target)
        .args(["--yes", "--generator", "definitely-not-a-real-generator"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("already exists"))
        .stderr(predicate::str::contains("--allow-existing-empty"));

    assert_eq!(fs::read_dir(&target).unwrap().count(), 0);
}

#[test]
fn test_allow_existing_empty_rejects_non_empty_directory() {
    let temp = TempDir::new().unwrap();
    let target = temp.path().join("proj1");
    fs::create_dir(&target).unwrap();
    fs::write(target.join("notes.txt"), "keep").unwrap();

    cmd(temp.path())
        .arg(&target)
        .args(["--yes", "--allow-existing-empty"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("not empty"));

    assert_eq!(fs::read_to_string(target.join("notes.txt")).unwrap(), "keep");
}

#[test]
fn test_location_that_is_a_file_rejected() {
    let temp = TempDir::new().unwrap();
    let target = temp.path().join("proj1");
    fs::write(&target, "").unwrap();

    cmd(temp.path())
        .arg(&target)
        .args(["--yes", "--allow-existing-empty"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("not a directory"));
}

#[test]
fn test_dry_run_prints_plan_and_touches_nothing() {
    let temp = TempDir::new().unwrap();
    let target = temp.path().join("proj1");

    cmd(temp.path())
        .arg(&target)
        .args(["--dry-run", "--branch", "develop"])
        .assert()
        .success()
        .stdout(predicate::str::contains("django-admin startproject conf"))
        .stdout(predicate::str::contains("git clone --depth 1 --branch develop"))
        .stdout(predicate::str::contains("env.example -> .env"))
        .stdout(predicate::str::contains("conf/settings.py"));

    assert!(!target.exists());
}

#[test]
fn test_dry_run_json() {
    let temp = TempDir::new().unwrap();
    let target = temp.path().join("proj1");

    let assert = cmd(temp.path())
        .arg(&target)
        .args(["--dry-run", "--output-format", "json"])
        .assert()
        .success();

    let plan: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    assert_eq!(plan["commands"].as_array().unwrap().len(), 2);
    assert_eq!(plan["patches"].as_array().unwrap().len(), 3);
    assert_eq!(plan["reuse_existing_directory"], false);
}

#[test]
fn test_patch_check_then_apply() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("site");
    generated_project(&root);

    cmd(temp.path())
        .args(["patch", "--check"])
        .arg(&root)
        .assert()
        .code(5)
        .stderr(predicate::str::contains("would change"));
    assert_eq!(fs::read_to_string(root.join("conf/wsgi.py")).unwrap(), WSGI);

    cmd(temp.path())
        .arg("patch")
        .arg(&root)
        .assert()
        .success()
        .stdout(predicate::str::contains("applied"));

    let wsgi = fs::read_to_string(root.join("conf/wsgi.py")).unwrap();
    assert_eq!(wsgi.matches("from dotenv import load_dotenv").count(), 1);

    // Second run changes nothing
    cmd(temp.path())
        .args(["patch", "--check"])
        .arg(&root)
        .assert()
        .success()
        .stdout(predicate::str::contains("up to date"));
}

#[test]
fn test_global_flags_before_subcommand() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("site");
    generated_project(&root);

    cmd(temp.path())
        .args(["-v", "patch"])
        .arg(&root)
        .assert()
        .success();
    assert_ne!(fs::read_to_string(root.join("conf/wsgi.py")).unwrap(), WSGI);

    let assert = cmd(temp.path())
        .args(["--output-format", "json", "config", "path"])
        .assert()
        .success();
    let value: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();
    assert!(value["path"].is_string());
}

#[test]
fn test_create_options_with_subcommand_rejected() {
    let temp = TempDir::new().unwrap();
    cmd(temp.path())
        .args(["--dry-run", "config", "list"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("cannot be used with the 'config' subcommand"));
}

#[test]
fn test_help_names_supported_django() {
    let temp = TempDir::new().unwrap();
    cmd(temp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Django 2.2"));
}

#[test]
fn test_patch_only_restricts_files() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("site");
    generated_project(&root);

    cmd(temp.path())
        .arg("patch")
        .arg(&root)
        .args(["--only", "wsgi"])
        .assert()
        .success();

    assert_ne!(fs::read_to_string(root.join("conf/wsgi.py")).unwrap(), WSGI);
    assert_eq!(fs::read_to_string(root.join("conf/urls.py")).unwrap(), URLS);
}

#[test]
fn test_patch_missing_file_is_not_found() {
    let temp = TempDir::new().unwrap();

    cmd(temp.path())
        .args(["patch", "."])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("File to patch not found"));
}

#[test]
fn test_patch_hand_edited_file_reports_anchor() {
    let temp = TempDir::new().unwrap();
    let root = temp.path().join("site");
    generated_project(&root);
    fs::write(
        root.join("conf/settings.py"),
        SETTINGS.replace("DEBUG = True\n", "DEBUG = False\n"),
    )
    .unwrap();

    cmd(temp.path())
        .arg("patch")
        .arg(&root)
        .assert()
        .code(3)
        .stderr(predicate::str::contains("Anchor not found"))
        .stderr(predicate::str::contains("Django 2.2"));

    // Nothing written when any file fails
    assert_eq!(fs::read_to_string(root.join("conf/wsgi.py")).unwrap(), WSGI);
}

#[test]
fn test_completions_bash() {
    let temp = TempDir::new().unwrap();
    cmd(temp.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("project-creator"));
}

#[test]
fn test_config_get_default() {
    let temp = TempDir::new().unwrap();
    cmd(temp.path())
        .args(["config", "get", "generator.program"])
        .assert()
        .success()
        .stdout(predicate::str::diff("django-admin\n"));
}

#[test]
fn test_config_env_override() {
    let temp = TempDir::new().unwrap();
    cmd(temp.path())
        .env("PROJECT_CREATOR__TEMPLATE__BRANCH", "develop")
        .args(["config", "get", "template.branch"])
        .assert()
        .success()
        .stdout(predicate::str::contains("develop"));
}

#[test]
fn test_config_file_override() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("custom.toml");
    fs::write(&file, "[locale]\ntime_zone = \"UTC\"\n").unwrap();

    cmd(temp.path())
        .arg("--config")
        .arg(&file)
        .args(["config", "get", "locale.time_zone"])
        .assert()
        .success()
        .stdout(predicate::str::diff("UTC\n"));
}

#[test]
fn test_config_unknown_key() {
    let temp = TempDir::new().unwrap();
    let assert = cmd(temp.path())
        .args(["config", "get", "nope.nothing"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Unknown config key"));

    // Reported once, without a log line repeating it
    let stderr = String::from_utf8_lossy(&assert.get_output().stderr).into_owned();
    assert_eq!(stderr.matches("Unknown config key").count(), 1, "{stderr}");
    assert_eq!(stderr.matches("Configuration error").count(), 1, "{stderr}");
    assert!(!stderr.contains("ERROR"), "{stderr}");
}

#[test]
fn test_missing_config_file_is_configuration_error() {
    let temp = TempDir::new().unwrap();
    cmd(temp.path())
        .args(["--config", "missing.toml", "config", "list"])
        .assert()
        .code(4);
}

#[test]
fn test_init_local_writes_config_once() {
    let temp = TempDir::new().unwrap();

    cmd(temp.path())
        .args(["init", "--local"])
        .assert()
        .success();

    let path = temp.path().join(".project-creator.toml");
    let written = fs::read_to_string(&path).unwrap();
    assert!(written.contains("[generator]"));

    fs::write(&path, "[generator]\nprogram = \"custom\"\n").unwrap();
    cmd(temp.path())
        .args(["init", "--local"])
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists"));
    assert!(fs::read_to_string(&path).unwrap().contains("custom"));

    // The local file is picked up without --config
    cmd(temp.path())
        .args(["config", "get", "generator.program"])
        .assert()
        .success()
        .stdout(predicate::str::diff("custom\n"));
}
