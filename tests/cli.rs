//! End-to-end tests driving the extdeps binary

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn extdeps() -> Command {
    Command::cargo_bin("extdeps").unwrap()
}

fn write_manifest(dir: &Path, body: &str) {
    fs::write(dir.join("extdeps.toml"), body).unwrap();
}

fn document_path(dir: &Path) -> PathBuf {
    dir.join(".idea/externalDependencies.xml")
}

#[test]
fn test_sync_creates_document_with_highest_version() {
    let dir = TempDir::new().unwrap();
    write_manifest(
        dir.path(),
        r#"
[plugins]
foo = { at-least = ["1.2", "1.10"] }
"org.jetbrains.kotlin" = "1.9.0"
"#,
    );

    extdeps()
        .current_dir(dir.path())
        .arg("sync")
        .assert()
        .success()
        .stdout(predicate::str::contains("updated"));

    let document = fs::read_to_string(document_path(dir.path())).unwrap();
    assert!(document.contains(r#"<plugin id="foo" min-version="1.10"/>"#));
    assert!(document.contains(r#"<plugin id="org.jetbrains.kotlin" min-version="1.9.0"/>"#));

    // Sorted by id: "foo" comes before "org.jetbrains.kotlin"
    let foo_pos = document.find(r#"id="foo""#).unwrap();
    let kotlin_pos = document.find(r#"id="org.jetbrains.kotlin""#).unwrap();
    assert!(foo_pos < kotlin_pos);
}

#[test]
fn test_sync_is_byte_identical_on_rerun() {
    let dir = TempDir::new().unwrap();
    write_manifest(
        dir.path(),
        r#"
[plugins]
foo = "1.10"
bar = { }
"#,
    );

    extdeps().current_dir(dir.path()).arg("sync").assert().success();
    let first = fs::read(document_path(dir.path())).unwrap();

    extdeps().current_dir(dir.path()).arg("sync").assert().success();
    let second = fs::read(document_path(dir.path())).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_sync_preserves_unrelated_content_and_higher_recorded_minimum() {
    let dir = TempDir::new().unwrap();
    let idea = dir.path().join(".idea");
    fs::create_dir_all(&idea).unwrap();
    fs::write(
        document_path(dir.path()),
        r#"<?xml version="1.0" encoding="UTF-8"?>
<project version="4">
  <!-- hand-edited marker -->
  <component name="VcsDirectoryMappings">
    <mapping directory="" vcs="Git"/>
  </component>
  <component name="ExternalDependencies">
    <plugin id="bar" min-version="2.0"/>
    <plugin id="baz"/>
  </component>
</project>
"#,
    )
    .unwrap();
    write_manifest(
        dir.path(),
        r#"
[plugins]
bar = "1.0"
"#,
    );

    extdeps().current_dir(dir.path()).arg("sync").assert().success();

    let document = fs::read_to_string(document_path(dir.path())).unwrap();
    // Recorded minimum 2.0 is higher than the declared 1.0 and must survive.
    assert!(document.contains(r#"<plugin id="bar" min-version="2.0"/>"#));
    // Entries no longer declared are preserved, not dropped.
    assert!(document.contains(r#"<plugin id="baz"/>"#));
    // Content owned by other tools round-trips unchanged.
    assert!(document.contains("<!-- hand-edited marker -->"));
    assert!(document.contains(r#"<mapping directory="" vcs="Git"/>"#));
}

#[test]
fn test_sync_with_no_requirements_removes_document() {
    let dir = TempDir::new().unwrap();
    let idea = dir.path().join(".idea");
    fs::create_dir_all(&idea).unwrap();
    fs::write(
        document_path(dir.path()),
        r#"<project version="4">
  <component name="ExternalDependencies">
    <plugin id="foo" min-version="1.0"/>
  </component>
</project>
"#,
    )
    .unwrap();
    write_manifest(dir.path(), "[plugins]\n");

    extdeps()
        .current_dir(dir.path())
        .arg("sync")
        .assert()
        .success()
        .stdout(predicate::str::contains("removed"));

    assert!(!document_path(dir.path()).exists());
}

#[test]
fn test_sync_with_no_requirements_and_no_document_is_silent() {
    let dir = TempDir::new().unwrap();
    write_manifest(dir.path(), "[plugins]\n");

    extdeps()
        .current_dir(dir.path())
        .arg("sync")
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::is_empty());

    assert!(!document_path(dir.path()).exists());
}

#[test]
fn test_sync_rebuilds_malformed_document_with_warning() {
    let dir = TempDir::new().unwrap();
    let idea = dir.path().join(".idea");
    fs::create_dir_all(&idea).unwrap();
    fs::write(document_path(dir.path()), "not xml at all <<<").unwrap();
    write_manifest(dir.path(), "[plugins]\nfoo = \"1.0\"\n");

    extdeps()
        .current_dir(dir.path())
        .arg("sync")
        .assert()
        .success()
        .stderr(predicate::str::contains("warning"));

    let document = fs::read_to_string(document_path(dir.path())).unwrap();
    assert!(document.contains(r#"<plugin id="foo" min-version="1.0"/>"#));
}

#[test]
fn test_sync_dry_run_touches_nothing() {
    let dir = TempDir::new().unwrap();
    write_manifest(dir.path(), "[plugins]\nfoo = \"1.0\"\n");

    extdeps()
        .current_dir(dir.path())
        .args(["sync", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("would update"));

    assert!(!document_path(dir.path()).exists());
}

#[test]
fn test_sync_honors_manifest_and_document_flags() {
    let dir = TempDir::new().unwrap();
    let manifest = dir.path().join("deps/requirements.toml");
    fs::create_dir_all(manifest.parent().unwrap()).unwrap();
    fs::write(&manifest, "[plugins]\nfoo = \"1.0\"\n").unwrap();
    let document = dir.path().join("out/deps.xml");

    extdeps()
        .arg("sync")
        .arg("--manifest")
        .arg(&manifest)
        .arg("--document")
        .arg(&document)
        .assert()
        .success();

    let text = fs::read_to_string(&document).unwrap();
    assert!(text.contains(r#"<plugin id="foo" min-version="1.0"/>"#));
}

#[test]
fn test_check_reports_stale_then_clean() {
    let dir = TempDir::new().unwrap();
    write_manifest(dir.path(), "[plugins]\nfoo = \"1.0\"\n");

    extdeps()
        .current_dir(dir.path())
        .arg("check")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("out of date"));

    extdeps().current_dir(dir.path()).arg("sync").assert().success();

    extdeps()
        .current_dir(dir.path())
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("up to date"));
}

#[test]
fn test_list_prints_resolved_minimums() {
    let dir = TempDir::new().unwrap();
    write_manifest(
        dir.path(),
        r#"
[plugins]
foo = { at-least = ["1.2", "1.10"] }
bar = { }
"#,
    );

    extdeps()
        .current_dir(dir.path())
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("foo >= 1.10"))
        .stdout(predicate::str::contains("bar"));
}

#[test]
fn test_malformed_manifest_version_is_rejected() {
    let dir = TempDir::new().unwrap();
    write_manifest(dir.path(), "[plugins]\nfoo = \"1.x\"\n");

    extdeps()
        .current_dir(dir.path())
        .arg("sync")
        .assert()
        .failure()
        .stderr(predicate::str::contains("malformed version"));

    assert!(!document_path(dir.path()).exists());
}

#[test]
fn test_missing_manifest_is_an_error() {
    let dir = TempDir::new().unwrap();

    extdeps()
        .current_dir(dir.path())
        .arg("sync")
        .assert()
        .failure()
        .stderr(predicate::str::contains("extdeps.toml"));
}
