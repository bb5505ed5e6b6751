//! Integration tests for the copyonsave binary.
//!
//! These tests run the compiled binary against temporary workspaces:
//! - `hook` reads a save event on stdin and writes copies
//! - responses list notifications as JSON, or print nothing
//! - `init`, `validate` and `preview` behave as documented

mod cli;
mod multiple_rules;

use std::fs;
use std::path::Path;

use tempfile::TempDir;
use xshell::{Shell, cmd};

/// Path to the binary under test.
pub const BIN: &str = env!("CARGO_BIN_EXE_copyonsave");

/// A workspace containing the given `copyonsaveandedit.json`.
pub fn workspace_with_config(config: &str) -> TempDir {
    let dir = tempfile::tempdir().expect("create temp dir");
    fs::write(dir.path().join("copyonsaveandedit.json"), config).expect("write config");
    dir
}

/// Build a `DocumentSaved` hook JSON payload.
pub fn saved_hook(root: &Path, file: &str, content: &str) -> String {
    serde_json::json!({
        "hook_event_name": "DocumentSaved",
        "workspace_folders": [root],
        "file_path": root.join(file),
        "content": content
    })
    .to_string()
}

/// Run `copyonsave hook` with the given input JSON and return (exit_code, stdout).
pub fn run_hook(sh: &Shell, input: &str) -> (i32, String) {
    let bin = BIN;
    let output = cmd!(sh, "{bin} hook")
        .stdin(input)
        .ignore_status()
        .output()
        .expect("failed to run copyonsave");

    let exit_code = output.status.code().unwrap_or(-1);
    let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
    (exit_code, stdout)
}

/// Run a copyonsave subcommand and return (exit_code, stdout, stderr).
pub fn run_copyonsave(sh: &Shell, args: &[&str], stdin: &str) -> (i32, String, String) {
    let bin = BIN;
    let output = cmd!(sh, "{bin} {args...}")
        .env_remove("VISUAL")
        .env_remove("EDITOR")
        .env_remove("COPYONSAVE_WORKSPACE")
        .stdin(stdin)
        .ignore_status()
        .output()
        .expect("failed to run copyonsave");

    let exit_code = output.status.code().unwrap_or(-1);
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (exit_code, stdout, stderr)
}

/// Parse a hook response into (level, message) pairs.
pub fn notifications(stdout: &str) -> Vec<(String, String)> {
    let response = serde_json::from_str::<serde_json::Value>(stdout)
        .unwrap_or_else(|e| panic!("invalid hook response {stdout:?}: {e}"));
    response["notifications"]
        .as_array()
        .expect("notifications array")
        .iter()
        .map(|n| {
            (
                n["level"].as_str().expect("level").to_string(),
                n["message"].as_str().expect("message").to_string(),
            )
        })
        .collect()
}
