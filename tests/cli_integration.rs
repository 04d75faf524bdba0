//! CLI Integration Tests
//!
//! These tests verify that the CLI commands work correctly end-to-end.
//! They test the actual binary behavior, not just the library.
//!
//! Run with:
//! ```bash
//! cargo test --test cli_integration
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::tempdir;

const HELLO_ID: &str = "b6fc4c620b67d95f953a5c1c1230aaab5db5a1b0";

/// Get the path to the built binary
fn lvc_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_lvc"))
}

/// Run lvc against a repository root and return (stdout, stderr, success)
fn run_lvc(args: &[&str], root: &Path) -> (Vec<u8>, String, bool) {
    let output = Command::new(lvc_binary())
        .arg("--root")
        .arg(root)
        .args(args)
        .output()
        .expect("Failed to execute lvc");

    (
        output.stdout,
        String::from_utf8_lossy(&output.stderr).to_string(),
        output.status.success(),
    )
}

fn stdout_str(stdout: &[u8]) -> String {
    String::from_utf8_lossy(stdout).trim().to_string()
}

// ============================================================================
// Banner and Init
// ============================================================================

#[test]
fn test_cli_banner_without_command() {
    let dir = tempdir().unwrap();
    let (stdout, _stderr, success) = run_lvc(&[], dir.path());

    assert!(success);
    assert_eq!(stdout_str(&stdout), "Little Version Control v0.1");
}

#[test]
fn test_cli_init_creates_objects_dir() {
    let dir = tempdir().unwrap();
    let root = dir.path().join(".lvc");

    let (stdout, stderr, success) = run_lvc(&["init"], &root);

    assert!(success, "init should succeed");
    assert!(stdout_str(&stdout).starts_with("Initialized empty lvc repository"));
    assert!(!stderr.contains("not empty"), "stderr: {}", stderr);
    assert!(root.join("objects").is_dir());
}

#[test]
fn test_cli_init_notes_non_empty_directory() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("README"), b"existing work").unwrap();
    let root = dir.path().join(".lvc");

    let (_stdout, stderr, success) = run_lvc(&["init"], &root);

    assert!(success, "init still succeeds in a non-empty directory");
    assert!(stderr.contains("is not empty"), "stderr: {}", stderr);
    assert!(root.join("objects").is_dir());
}

#[test]
fn test_cli_init_twice_reports_existing() {
    let dir = tempdir().unwrap();
    let root = dir.path().join(".lvc");

    run_lvc(&["init"], &root);
    let (stdout, _stderr, success) = run_lvc(&["-f", "json", "i"], &root);

    assert!(success);
    let out = stdout_str(&stdout);
    assert!(out.contains("\"status\":\"ok\""), "{}", out);
    assert!(out.contains("\"created\":false"), "{}", out);
}

// ============================================================================
// writeblob / readblob
// ============================================================================

#[test]
fn test_cli_writeblob_prints_id() {
    let dir = tempdir().unwrap();
    let root = dir.path().join(".lvc");
    let input = dir.path().join("hello.txt");
    fs::write(&input, b"hello").unwrap();

    let (stdout, _stderr, success) = run_lvc(&["writeblob", input.to_str().unwrap()], &root);

    assert!(success, "writeblob should succeed");
    assert_eq!(stdout_str(&stdout), HELLO_ID);
    assert!(root
        .join("objects/b6/fc4c620b67d95f953a5c1c1230aaab5db5a1b0")
        .is_file());
}

#[test]
fn test_cli_writeblob_json() {
    let dir = tempdir().unwrap();
    let root = dir.path().join(".lvc");
    let input = dir.path().join("hello.txt");
    fs::write(&input, b"hello").unwrap();

    let (stdout, _stderr, success) =
        run_lvc(&["-f", "json", "writeblob", input.to_str().unwrap()], &root);

    assert!(success);
    assert_eq!(
        stdout_str(&stdout),
        format!("{{\"status\":\"ok\",\"id\":\"{}\"}}", HELLO_ID)
    );
}

#[test]
fn test_cli_writeblob_missing_file() {
    let dir = tempdir().unwrap();
    let root = dir.path().join(".lvc");
    let missing = dir.path().join("nope.txt");

    let (stdout, stderr, success) = run_lvc(&["writeblob", missing.to_str().unwrap()], &root);

    assert!(!success, "writeblob of a missing file should fail");
    assert!(stdout.is_empty());
    assert!(stderr.contains("does not exist"), "stderr: {}", stderr);
    assert!(!root.exists(), "no object should be written");
}

#[test]
fn test_cli_readblob_to_stdout() {
    let dir = tempdir().unwrap();
    let root = dir.path().join(".lvc");
    let input = dir.path().join("data.bin");
    let content: Vec<u8> = (0..=255u8).chain(b"\0tail".iter().copied()).collect();
    fs::write(&input, &content).unwrap();

    let (stdout, _stderr, _) = run_lvc(&["writeblob", input.to_str().unwrap()], &root);
    let id = stdout_str(&stdout);

    let (stdout, _stderr, success) = run_lvc(&["readblob", &id], &root);

    assert!(success, "readblob should succeed");
    assert_eq!(stdout, content, "payload must be emitted byte for byte");
}

#[test]
fn test_cli_readblob_to_outfile() {
    let dir = tempdir().unwrap();
    let root = dir.path().join(".lvc");
    let input = dir.path().join("hello.txt");
    fs::write(&input, b"hello").unwrap();
    run_lvc(&["writeblob", input.to_str().unwrap()], &root);

    let out = dir.path().join("restored.txt");
    let (_stdout, _stderr, success) = run_lvc(&["readblob", HELLO_ID, out.to_str().unwrap()], &root);

    assert!(success);
    assert_eq!(fs::read(&out).unwrap(), b"hello");
}

#[test]
fn test_cli_readblob_missing_object() {
    let dir = tempdir().unwrap();
    let root = dir.path().join(".lvc");
    run_lvc(&["init"], &root);

    let out = dir.path().join("restored.txt");
    let (stdout, stderr, success) = run_lvc(&["readblob", HELLO_ID, out.to_str().unwrap()], &root);

    assert!(!success);
    assert!(stdout.is_empty());
    assert!(stderr.contains("Object not found"), "stderr: {}", stderr);
    assert!(!out.exists(), "no output file for a missing object");
}

#[test]
fn test_cli_readblob_corrupt_object() {
    let dir = tempdir().unwrap();
    let root = dir.path().join(".lvc");
    let shard = root.join("objects/b6");
    fs::create_dir_all(&shard).unwrap();
    fs::write(shard.join(&HELLO_ID[2..]), b"not a zlib stream").unwrap();

    let out = dir.path().join("restored.txt");
    let (_stdout, stderr, success) = run_lvc(&["readblob", HELLO_ID, out.to_str().unwrap()], &root);

    assert!(!success);
    assert!(stderr.contains("Corrupt"), "stderr: {}", stderr);
    assert!(!out.exists());
}

#[test]
fn test_cli_readblob_invalid_id() {
    let dir = tempdir().unwrap();
    let (_stdout, stderr, success) = run_lvc(&["readblob", "ab"], dir.path());

    assert!(!success);
    assert!(stderr.contains("Invalid object id"), "stderr: {}", stderr);
}

// ============================================================================
// Reserved commands
// ============================================================================

#[test]
fn test_cli_reserved_commands_are_not_implemented() {
    let dir = tempdir().unwrap();
    let root = dir.path().join(".lvc");

    for (cmd, name) in [
        ("branch", "branch"),
        ("b", "branch"),
        ("commit", "commit"),
        ("checkin", "commit"),
        ("con", "config"),
        ("log", "history"),
        ("s", "status"),
    ] {
        let (stdout, stderr, success) = run_lvc(&[cmd], &root);
        assert!(success, "{} should exit cleanly", cmd);
        assert!(stdout.is_empty());
        assert!(
            stderr.contains(&format!("{}: not yet implemented", name)),
            "{} -> {}",
            cmd,
            stderr
        );
    }
    assert!(!root.exists(), "reserved commands must not touch the repository");
}
