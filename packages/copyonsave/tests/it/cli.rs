//! CLI Subcommand Smoke Tests

use std::fs;

use crate::{run_copyonsave, workspace_with_config};
use pretty_assertions::assert_eq as pretty_assert_eq;
use xshell::Shell;

const EXAMPLE_SOURCE: &str = r#""source": "test/test.txt""#;

#[test]
fn test_init_creates_example() {
    let sh = Shell::new().unwrap();
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().to_str().unwrap();

    let (exit_code, _stdout, stderr) =
        run_copyonsave(&sh, &["init", "--workspace", root, "--no-open"], "");

    pretty_assert_eq!(exit_code, 0, "init should exit 0, stderr: {stderr}");
    let config = fs::read_to_string(dir.path().join("copyonsaveandedit.json")).unwrap();
    assert!(config.contains(EXAMPLE_SOURCE), "got: {config}");
    assert!(config.contains(r#""position": "start""#), "got: {config}");
    assert!(stderr.contains("Created"), "got: {stderr}");
}

#[test]
fn test_init_keeps_existing_without_confirmation() {
    let sh = Shell::new().unwrap();
    let dir = workspace_with_config("[]");
    let root = dir.path().to_str().unwrap();

    let (exit_code, stdout, stderr) =
        run_copyonsave(&sh, &["init", "--workspace", root, "--no-open"], "n\n");

    pretty_assert_eq!(exit_code, 0);
    assert!(stdout.contains("Overwrite it?"), "got: {stdout}");
    assert!(stderr.contains("already exists"), "got: {stderr}");
    pretty_assert_eq!(
        fs::read_to_string(dir.path().join("copyonsaveandedit.json")).unwrap(),
        "[]"
    );
}

#[test]
fn test_init_overwrites_when_confirmed() {
    let sh = Shell::new().unwrap();
    let dir = workspace_with_config("[]");
    let root = dir.path().to_str().unwrap();

    let (exit_code, _, _) =
        run_copyonsave(&sh, &["init", "--workspace", root, "--no-open"], "yes\n");

    pretty_assert_eq!(exit_code, 0);
    let config = fs::read_to_string(dir.path().join("copyonsaveandedit.json")).unwrap();
    assert!(config.contains(EXAMPLE_SOURCE), "got: {config}");
}

#[test]
fn test_init_force_skips_prompt() {
    let sh = Shell::new().unwrap();
    let dir = workspace_with_config("[]");
    let root = dir.path().to_str().unwrap();

    let (exit_code, stdout, _) =
        run_copyonsave(&sh, &["init", "--workspace", root, "--force", "--no-open"], "");

    pretty_assert_eq!(exit_code, 0);
    assert!(!stdout.contains("Overwrite it?"), "got: {stdout}");
    let config = fs::read_to_string(dir.path().join("copyonsaveandedit.json")).unwrap();
    assert!(config.contains(EXAMPLE_SOURCE), "got: {config}");
}

#[test]
fn test_init_without_editor_prints_hint() {
    let sh = Shell::new().unwrap();
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().to_str().unwrap();

    let (exit_code, stdout, _) = run_copyonsave(&sh, &["init", "--workspace", root], "");

    pretty_assert_eq!(exit_code, 0);
    assert!(stdout.contains("Set $EDITOR"), "got: {stdout}");
}

#[test]
fn test_validate_prints_rules() {
    let sh = Shell::new().unwrap();
    let dir = workspace_with_config(
        r#"[{"source":"a.txt","destination":"out/a.txt","injection":"X","position":"end"}]"#,
    );
    let root = dir.path().to_str().unwrap();

    let (exit_code, stdout, _) = run_copyonsave(&sh, &["validate", "--workspace", root], "");

    pretty_assert_eq!(exit_code, 0, "validate should exit 0");
    assert!(stdout.contains("copyonsaveandedit.json"), "got: {stdout}");
    assert!(stdout.contains(r#""destination": "out/a.txt""#), "got: {stdout}");
}

#[test]
fn test_validate_nonexistent_file() {
    let sh = Shell::new().unwrap();
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.json");

    let (exit_code, stdout, _) =
        run_copyonsave(&sh, &["validate", missing.to_str().unwrap()], "");

    pretty_assert_eq!(exit_code, 0, "validate should exit 0 for nonexistent file");
    pretty_assert_eq!(stdout.trim(), "[]");
}

#[test]
fn test_validate_invalid_file_fails() {
    let sh = Shell::new().unwrap();
    let dir = workspace_with_config(r#"[{"source":"a.txt"}]"#);
    let root = dir.path().to_str().unwrap();

    let (exit_code, _stdout, stderr) =
        run_copyonsave(&sh, &["validate", "--workspace", root], "");

    assert!(exit_code != 0, "validate should fail for an invalid file");
    assert!(stderr.contains("parse config file"), "got: {stderr}");
}

#[test]
fn test_preview_does_not_write() {
    let sh = Shell::new().unwrap();
    let dir = workspace_with_config(
        r#"[{"source":"a.txt","destination":"out/a.txt","injection":"X","position":"start"}]"#,
    );
    let root = dir.path().to_str().unwrap();

    let (exit_code, stdout, stderr) = run_copyonsave(
        &sh,
        &["preview", "--workspace", root, "a.txt", "--content", "hello"],
        "",
    );

    pretty_assert_eq!(exit_code, 0, "stderr: {stderr}");
    assert!(stdout.contains("a.txt → out/a.txt (start)"), "got: {stdout}");
    assert!(stdout.contains("X\nhello"), "got: {stdout}");
    assert!(!dir.path().join("out").exists());
}

#[test]
fn test_preview_no_match() {
    let sh = Shell::new().unwrap();
    let dir = workspace_with_config("[]");
    let root = dir.path().to_str().unwrap();

    let (exit_code, stdout, _) = run_copyonsave(
        &sh,
        &["preview", "--workspace", root, "b.txt", "--content", "hello"],
        "",
    );

    pretty_assert_eq!(exit_code, 0);
    assert!(stdout.contains("No rule matches b.txt"), "got: {stdout}");
}
