//! End-to-end tests for the `wpgen` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write(path: &Path, contents: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

fn site() -> TempDir {
    let dir = TempDir::new().unwrap();
    let pages = dir.path().join("src/pages");
    write(&pages.join("home/index.js"), "");
    write(&pages.join("about.js"), "");
    write(&pages.join("_private/index.js"), "");
    dir
}

fn wpgen(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("wpgen").unwrap();
    cmd.current_dir(dir)
        .env_remove("NODE_ENV")
        .env_remove("RUST_LOG")
        .env("NO_COLOR", "1");
    cmd
}

#[test]
fn config_prints_json() {
    let dir = site();
    let output = wpgen(dir.path())
        .args(["config", "--env", "production"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let config: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(config["mode"], "production");
    assert_eq!(config["devtool"], false);
    let entries = config["entry"].as_object().unwrap();
    let names: Vec<&str> = entries.keys().map(String::as_str).collect();
    assert_eq!(names, vec!["about", "home"]);
    assert!(config["optimization"]["minimize"].as_bool().unwrap());
}

#[test]
fn config_compact_is_single_line() {
    let dir = site();
    let output = wpgen(dir.path())
        .args(["config", "--compact"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout.trim_end().lines().count(), 1);
}

#[test]
fn config_write_to_file() {
    let dir = site();
    wpgen(dir.path())
        .args(["config", "--write", "build/webpack.json", "--stage", "home"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Wrote configuration"));

    let written = fs::read_to_string(dir.path().join("build/webpack.json")).unwrap();
    let config: Value = serde_json::from_str(&written).unwrap();
    assert_eq!(config["entry"].as_object().unwrap().len(), 1);
}

#[test]
fn entries_lists_pages() {
    let dir = site();
    wpgen(dir.path())
        .arg("entries")
        .assert()
        .success()
        .stdout(predicate::str::contains("home\t"))
        .stdout(predicate::str::contains("about\t"))
        .stdout(predicate::str::contains("_private").not());
}

#[test]
fn explicit_src_argument() {
    let dir = TempDir::new().unwrap();
    write(&dir.path().join("web/pages/shop/index.ts"), "");

    wpgen(dir.path())
        .args(["entries", "web"])
        .assert()
        .success()
        .stdout(predicate::str::contains("shop\t"));
}

#[test]
fn empty_stage_fails() {
    let dir = site();
    wpgen(dir.path())
        .args(["config", "--stage", ""])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("stage filter is empty"));
}

#[test]
fn private_stage_name_rejected() {
    let dir = site();
    wpgen(dir.path())
        .args(["entries", "--stage", "_private"])
        .assert()
        .failure();
}

#[test]
fn missing_source_directory_fails() {
    let dir = TempDir::new().unwrap();
    wpgen(dir.path())
        .arg("config")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no source directory found"));
}

#[test]
fn invalid_command_fails() {
    let dir = site();
    wpgen(dir.path()).arg("bundle").assert().failure();
}

#[test]
fn options_file_and_env_layering() {
    let dir = site();
    write(
        &dir.path().join("wpgen.toml"),
        "dist_path = \"file-dist\"\npublic_path = \"/file/\"\n",
    );

    let output = wpgen(dir.path())
        .env("WPGEN_PUBLIC_PATH", "/env/")
        .args(["config", "--out", "cli-dist"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let config: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(config["output"]["publicPath"], "/env/");
    assert!(config["output"]["path"]
        .as_str()
        .unwrap()
        .ends_with("cli-dist"));
}

#[test]
fn node_env_selects_production() {
    let dir = site();
    let output = wpgen(dir.path())
        .env("NODE_ENV", "production")
        .args(["config", "--cwd", "."])
        .output()
        .unwrap();
    assert!(output.status.success());

    let config: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(config["mode"], "production");
}

#[test]
fn colored_run_succeeds() {
    let dir = site();
    let mut cmd = Command::cargo_bin("wpgen").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("NODE_ENV")
        .env_remove("NO_COLOR")
        .env("FORCE_COLOR", "1")
        .env("RUST_LOG", "wpgen_cli=debug")
        .args(["config", "--write", "out.json"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Wrote configuration"));
}

#[test]
fn quiet_suppresses_status_messages() {
    let dir = site();
    wpgen(dir.path())
        .args(["--quiet", "config", "--write", "out.json"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Wrote configuration").not());
    assert!(dir.path().join("out.json").exists());
}

#[cfg(unix)]
#[test]
fn non_utf8_environment_is_tolerated() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let dir = site();
    wpgen(dir.path())
        .env("WPGEN_TEST_BYTES", OsStr::from_bytes(b"\xff\xfe"))
        .arg("entries")
        .assert()
        .success()
        .stdout(predicate::str::contains("home\t"));
}
