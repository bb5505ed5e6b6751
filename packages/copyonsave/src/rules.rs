//! Rule data types and loading operations.

use std::fs::read_to_string;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use color_eyre::{
    Section, SectionExt,
    eyre::{Context, Result},
};
use tap::Tap;

pub use schema::*;

mod schema;

/// Name of the rule file, looked up at the workspace root.
pub const CONFIG_FILE_NAME: &str = "copyonsaveandedit.json";

/// Path of the rule file for the given workspace root.
pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE_NAME)
}

/// Load the rules for a workspace root.
///
/// Returns `Ok(None)` when the workspace has no rule file; this is the normal
/// "feature disabled" state, not an error.
#[tracing::instrument]
pub fn load(root: &Path) -> Result<Option<Vec<CopyRule>>> {
    load_from(&config_path(root))
}

/// Load rules from a single file.
///
/// Rules are read fresh on every call; nothing is cached.
#[tracing::instrument]
pub fn load_from(path: &Path) -> Result<Option<Vec<CopyRule>>> {
    let content = match read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e).context(format!("read config file: {path:?}")),
    };

    serde_json::from_str::<Vec<CopyRule>>(&content)
        .with_context(|| format!("parse config file: {path:?}"))
        .with_section(move || content.header("File content:"))
        .tap(|rules| tracing::debug!(?rules, "parsed config file"))
        .map(Some)
}

/// Serialize rules the way `copyonsave init` writes them: pretty JSON with
/// two-space indentation.
pub fn to_config_json(rules: &[CopyRule]) -> Result<String> {
    serde_json::to_string_pretty(rules).context("serialize rules")
}
