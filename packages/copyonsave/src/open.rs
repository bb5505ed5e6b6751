//! Open files in the user's editor.

use std::path::Path;
use std::process::Command;

use color_eyre::eyre::{Context, Result, bail};

/// The editor command from `$VISUAL` or `$EDITOR`, whichever is set first.
///
/// Blank values are treated as unset.
pub fn editor_from_env() -> Option<String> {
    let visual = std::env::var("VISUAL").ok();
    let editor = std::env::var("EDITOR").ok();
    select_editor(visual.as_deref(), editor.as_deref())
}

/// Pick the editor command from `$VISUAL` and `$EDITOR` values.
pub fn select_editor(visual: Option<&str>, editor: Option<&str>) -> Option<String> {
    visual
        .filter(|value| !value.trim().is_empty())
        .or_else(|| editor.filter(|value| !value.trim().is_empty()))
        .map(String::from)
}

/// Split an editor command like `code --wait` into program and arguments.
pub fn parse_editor_command(raw: &str) -> Result<(String, Vec<String>)> {
    let parts = shell_words::split(raw).with_context(|| format!("parse editor command: {raw:?}"))?;
    match parts.split_first() {
        Some((program, args)) if !program.trim().is_empty() => {
            Ok((program.clone(), args.to_vec()))
        }
        _ => bail!("editor command is empty: {raw:?}"),
    }
}

/// Open `path` with the editor command and wait for it to exit.
#[tracing::instrument]
pub fn open_in_editor(editor: &str, path: &Path) -> Result<()> {
    let (program, args) = parse_editor_command(editor)?;
    let status = Command::new(&program)
        .args(&args)
        .arg(path)
        .status()
        .with_context(|| format!("launch editor: {program}"))?;
    if !status.success() {
        bail!("editor {program} exited with {status}");
    }
    Ok(())
}
