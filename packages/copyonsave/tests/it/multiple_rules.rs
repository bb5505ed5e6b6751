//! Multiple Rules Tests

use std::fs;

use crate::{notifications, run_hook, saved_hook, workspace_with_config};
use pretty_assertions::assert_eq as pretty_assert_eq;
use xshell::Shell;

#[test]
fn test_multiple_rules_fire() {
    let sh = Shell::new().unwrap();
    let dir = workspace_with_config(
        r#"[
            {"source":"a.txt","destination":"first/a.txt","injection":"top","position":"start"},
            {"source":"b.txt","destination":"unrelated/b.txt","injection":"no","position":"end"},
            {"source":"a.txt","destination":"second/a.txt","injection":"bottom","position":"end"}
        ]"#,
    );

    let (exit_code, stdout) = run_hook(&sh, &saved_hook(dir.path(), "a.txt", "body"));

    pretty_assert_eq!(exit_code, 0, "expected exit 0");
    pretty_assert_eq!(
        fs::read_to_string(dir.path().join("first/a.txt")).unwrap(),
        "top\nbody"
    );
    pretty_assert_eq!(
        fs::read_to_string(dir.path().join("second/a.txt")).unwrap(),
        "body\nbottom"
    );
    assert!(!dir.path().join("unrelated").exists());

    let mut messages = notifications(&stdout)
        .into_iter()
        .map(|(_, message)| message)
        .collect::<Vec<_>>();
    messages.sort();
    pretty_assert_eq!(
        messages,
        vec!["Copied a.txt → first/a.txt", "Copied a.txt → second/a.txt"]
    );
}

#[test]
fn test_directory_failure_is_isolated() {
    let sh = Shell::new().unwrap();
    let dir = workspace_with_config(
        r#"[
            {"source":"a.txt","destination":"blocked/a.txt","injection":"1","position":"end"},
            {"source":"a.txt","destination":"fine/a.txt","injection":"2","position":"end"}
        ]"#,
    );
    fs::write(dir.path().join("blocked"), "a file, not a directory").unwrap();

    let (exit_code, stdout) = run_hook(&sh, &saved_hook(dir.path(), "a.txt", "body"));

    pretty_assert_eq!(exit_code, 0);
    pretty_assert_eq!(
        fs::read_to_string(dir.path().join("fine/a.txt")).unwrap(),
        "body\n2"
    );

    let notifications = notifications(&stdout);
    let errors = notifications
        .iter()
        .filter(|(level, _)| level == "error")
        .collect::<Vec<_>>();
    pretty_assert_eq!(errors.len(), 1, "got: {notifications:?}");
    assert!(
        errors[0].1.starts_with("Error creating directory"),
        "got: {}",
        errors[0].1
    );
    assert!(
        notifications
            .iter()
            .any(|(level, message)| level == "info" && message == "Copied a.txt → fine/a.txt"),
        "got: {notifications:?}"
    );
}
