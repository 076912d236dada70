//! End-to-end CLI tests for the compiled binary.
//!
//! These stay on the network-free paths: argument handling, input
//! validation, and the fatal-error exit. Download flows are covered by the
//! downloader integration tests against mock endpoints.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn binary() -> Command {
    let mut cmd = Command::cargo_bin("iwara-dl").unwrap();
    // A leaked RUST_LOG from the environment would change what reaches
    // stdout; tests pin the default filter.
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_no_input_fails_with_guidance() {
    binary()
        .assert()
        .failure()
        .stderr(predicate::str::contains("no qualified resource URL"))
        .stderr(predicate::str::contains("-f <file>"));
}

#[test]
fn test_unrecognized_reference_fails() {
    binary()
        .arg("https://example.com/videos/abc123")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no qualified resource URL"));
}

#[test]
fn test_missing_list_file_fails_with_path() {
    binary()
        .args(["-f", "/definitely/not/here.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read list file"))
        .stderr(predicate::str::contains("/definitely/not/here.txt"));
}

#[test]
fn test_list_file_overrides_positional_urls() {
    let dir = TempDir::new().unwrap();
    let list = dir.path().join("list.txt");
    std::fs::write(&list, "not a reference\n").unwrap();

    binary()
        .arg("https://ecchi.iwara.tv/videos/abc123")
        .arg("-f")
        .arg(&list)
        .assert()
        .failure()
        .stdout(predicate::str::contains(
            "Ignoring URL arguments and processing -f/--file.",
        ));
}

#[test]
fn test_unrecognized_lines_are_reported_as_skipped() {
    let dir = TempDir::new().unwrap();
    let list = dir.path().join("list.txt");
    std::fs::write(&list, "first junk line\nsecond junk line\n").unwrap();

    binary()
        .arg("-f")
        .arg(&list)
        .assert()
        .failure()
        .stdout(predicate::str::contains("Skipped unrecognized input"));
}

#[test]
fn test_batch_continues_past_failed_references() {
    let dir = TempDir::new().unwrap();
    let list = dir.path().join("list.txt");
    // Image and user pages are recognized references whose download flow
    // fails without any network traffic; the junk line is merely skipped.
    std::fs::write(
        &list,
        "https://ecchi.iwara.tv/images/first\n\
         not a reference\n\
         https://ecchi.iwara.tv/users/second\n",
    )
    .unwrap();

    let assert = binary().arg("-f").arg(&list).assert().failure();
    assert_eq!(
        assert.get_output().status.code(),
        Some(1),
        "a batch with no completed references must yield exit code 1"
    );

    let stdout = String::from_utf8_lossy(&assert.get_output().stdout);
    assert!(
        stdout.contains("image downloads are not implemented"),
        "first failure should be reported; got: {stdout}"
    );
    assert!(
        stdout.contains("user downloads are not implemented"),
        "processing should continue past the first failure; got: {stdout}"
    );
}

#[test]
fn test_help_describes_the_tool() {
    binary()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Download videos and metadata"))
        .stdout(predicate::str::contains("--quality"))
        .stdout(predicate::str::contains("--output-template"));
}

#[test]
fn test_version_prints_name_and_version() {
    binary()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("iwara-dl"));
}

#[test]
fn test_unknown_flag_is_rejected() {
    binary()
        .arg("--bogus")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--bogus"));
}
