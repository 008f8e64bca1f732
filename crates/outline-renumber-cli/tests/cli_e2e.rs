#![allow(deprecated)]

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Runs the binary with a config path that does not exist, so the
/// developer's own config never leaks into the tests.
fn renumber_cmd(temp: &TempDir) -> Command {
    let mut cmd = Command::new(cargo_bin("outline-renumber"));
    cmd.env_remove("RUST_LOG")
        .arg("--config")
        .arg(temp.path().join("no-config.toml"));
    cmd
}

fn write(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_filters_stdin_to_stdout() {
    let temp = TempDir::new().unwrap();

    renumber_cmd(&temp)
        .write_stdin("\n1. foo\n3.bar\n .  sub-item 1\n 5. fuzz buzz\n\t6. foobar")
        .assert()
        .success()
        .stdout("\n1. foo\n2. bar\n .  sub-item 1\n3. fuzz buzz\n4. foobar");
}

#[test]
fn test_dash_means_stdin() {
    let temp = TempDir::new().unwrap();

    renumber_cmd(&temp)
        .arg("-")
        .write_stdin("foo\nbar\n")
        .assert()
        .success()
        .stdout("1. foo\n2. bar\n");
}

#[test]
fn test_prints_files_in_order_without_touching_them() {
    let temp = TempDir::new().unwrap();
    let a = write(temp.path(), "a.txt", "alpha\n  note\n");
    let b = write(temp.path(), "b.txt", "9. beta\n");

    renumber_cmd(&temp)
        .arg(&a)
        .arg(&b)
        .assert()
        .success()
        .stdout("1. alpha\n  note\n1. beta\n");

    assert_eq!(fs::read_to_string(&a).unwrap(), "alpha\n  note\n");
}

#[test]
fn test_unterminated_file_does_not_join_the_next_one() {
    let temp = TempDir::new().unwrap();
    let a = write(temp.path(), "a.txt", "alpha\n3. beta");
    let b = write(temp.path(), "b.txt", "gamma");

    renumber_cmd(&temp)
        .arg(&a)
        .arg(&b)
        .assert()
        .success()
        .stdout("1. alpha\n2. beta\n1. gamma");
}

#[test]
fn test_non_utf8_stdin_passes_through() {
    let temp = TempDir::new().unwrap();

    renumber_cmd(&temp)
        .write_stdin(&b"foo\n  caf\xe9 au lait\n3. bar\n"[..])
        .assert()
        .success()
        .stdout(&b"1. foo\n  caf\xe9 au lait\n2. bar\n"[..]);
}

#[test]
fn test_check_handles_non_utf8_files() {
    let temp = TempDir::new().unwrap();
    let clean = temp.path().join("latin1.txt");
    fs::write(&clean, b"1. caf\xe9\n   cr\xe8me\n").unwrap();

    renumber_cmd(&temp).arg("--check").arg(&clean).assert().success();

    renumber_cmd(&temp)
        .arg("--check")
        .write_stdin(&b"7. caf\xe9\n"[..])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("<stdin> would be renumbered"));
}

#[test]
fn test_in_place_rewrites_globbed_files() {
    let temp = TempDir::new().unwrap();
    let a = write(temp.path(), "a.txt", "3. one\n3. two\n");
    let b = write(temp.path(), "b.txt", "1. done\n");
    let other = write(temp.path(), "c.md", "untouched\n");
    let pattern = format!("{}/*.txt", temp.path().display());

    renumber_cmd(&temp)
        .args(["--in-place", &pattern])
        .assert()
        .success()
        .stdout("");

    assert_eq!(fs::read_to_string(&a).unwrap(), "1. one\n2. two\n");
    assert_eq!(fs::read_to_string(&b).unwrap(), "1. done\n");
    assert_eq!(fs::read_to_string(&other).unwrap(), "untouched\n");
}

#[test]
fn test_check_reports_files_that_would_change() {
    let temp = TempDir::new().unwrap();
    let clean = write(temp.path(), "clean.txt", "1. a\n2. b\n");
    let dirty = write(temp.path(), "dirty.txt", "1. a\n1. b\n");

    renumber_cmd(&temp)
        .arg("--check")
        .arg(&clean)
        .arg(&dirty)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("dirty.txt would be renumbered"))
        .stderr(predicate::str::contains("clean.txt").not());

    assert_eq!(fs::read_to_string(&dirty).unwrap(), "1. a\n1. b\n");
}

#[test]
fn test_check_passes_on_clean_stdin() {
    let temp = TempDir::new().unwrap();

    renumber_cmd(&temp)
        .arg("--check")
        .write_stdin("1. a\n   more\n2. b\n")
        .assert()
        .success();
}

#[test]
fn test_missing_file_is_an_error() {
    let temp = TempDir::new().unwrap();

    renumber_cmd(&temp)
        .arg(temp.path().join("missing.txt"))
        .assert()
        .code(2)
        .stderr(predicate::str::contains("error:"));
}

#[test]
fn test_glob_without_matches_is_an_error() {
    let temp = TempDir::new().unwrap();
    let pattern = format!("{}/*.nothing", temp.path().display());

    renumber_cmd(&temp)
        .arg(&pattern)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("No files match"));
}

#[test]
fn test_in_place_needs_files() {
    let temp = TempDir::new().unwrap();

    renumber_cmd(&temp)
        .arg("--in-place")
        .write_stdin("foo\n")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("needs at least one file"));
}

#[test]
fn test_config_enables_in_place_and_stdout_overrides_it() {
    let temp = TempDir::new().unwrap();
    let config = write(temp.path(), "config.toml", "in_place = true\n");
    let list = write(temp.path(), "list.txt", "foo\n");

    Command::new(cargo_bin("outline-renumber"))
        .arg("--config")
        .arg(&config)
        .arg("--stdout")
        .arg(&list)
        .assert()
        .success()
        .stdout("1. foo\n");
    assert_eq!(fs::read_to_string(&list).unwrap(), "foo\n");

    Command::new(cargo_bin("outline-renumber"))
        .arg("--config")
        .arg(&config)
        .arg(&list)
        .assert()
        .success()
        .stdout("");
    assert_eq!(fs::read_to_string(&list).unwrap(), "1. foo\n");
}

#[test]
fn test_bad_config_names_the_file() {
    let temp = TempDir::new().unwrap();
    let config = write(temp.path(), "broken.toml", "in_place = \"sometimes\"\n");

    Command::new(cargo_bin("outline-renumber"))
        .arg("--config")
        .arg(&config)
        .write_stdin("foo\n")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("broken.toml"));
}

#[test]
fn test_init_config_writes_defaults_once() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("fresh").join("config.toml");

    Command::new(cargo_bin("outline-renumber"))
        .arg("--config")
        .arg(&config)
        .arg("--init-config")
        .assert()
        .success()
        .stdout(predicate::str::contains("Created config file"));
    assert!(config.exists());

    Command::new(cargo_bin("outline-renumber"))
        .arg("--config")
        .arg(&config)
        .arg("--init-config")
        .assert()
        .code(2)
        .stderr(predicate::str::contains("already exists"));
}
