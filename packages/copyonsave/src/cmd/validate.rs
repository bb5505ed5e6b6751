//! Validate rule configuration files.

use std::path::{Path, PathBuf};

use clap::Args;
use color_eyre::eyre::{Context, OptionExt, Result};
use copyonsave::rules;

use super::WorkspaceArgs;

#[derive(Args, Clone, Debug)]
pub struct Config {
    #[command(flatten)]
    workspace: WorkspaceArgs,

    /// Path to a specific config file to validate.
    /// If not specified, validates the workspace's `copyonsaveandedit.json`.
    pub path: Option<PathBuf>,
}

pub fn main(config: Config) -> Result<()> {
    match config.path {
        Some(path) => validate_file(&path),
        None => validate_workspace(&config.workspace),
    }
}

/// Validate the rule file at the workspace root.
fn validate_workspace(workspace: &WorkspaceArgs) -> Result<()> {
    let workspace = workspace.resolve()?;
    let root = workspace.root().ok_or_eyre("no workspace folder")?;
    let path = rules::config_path(root);
    println!("Config file: {path:?}");
    validate_file(&path)
}

/// Validate a single config file and print the parsed rules.
fn validate_file(path: &Path) -> Result<()> {
    let rules = rules::load_from(path)
        .context("parse rules file")?
        .unwrap_or_default();
    let json = rules::to_config_json(&rules)?;
    println!("{json}");
    Ok(())
}
