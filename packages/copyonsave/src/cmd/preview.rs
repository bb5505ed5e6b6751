//! Show what saving a file would copy, without writing anything.

use std::path::PathBuf;

use clap::Args;
use color_eyre::eyre::{Context, OptionExt, Result};
use copyonsave::{
    interceptor::{self, SavedDocument},
    rules,
    workspace::{match_key, resolve_saved},
};

use super::WorkspaceArgs;

#[derive(Args, Clone, Debug)]
pub struct Config {
    #[command(flatten)]
    workspace: WorkspaceArgs,

    /// The file to preview a save of. Relative paths are relative to the
    /// workspace root.
    pub file: PathBuf,

    /// Use this content instead of the file's content on disk.
    #[arg(long)]
    pub content: Option<String>,
}

pub fn main(config: Config) -> Result<()> {
    let workspace = config.workspace.resolve()?;
    let root = workspace.root().ok_or_eyre("no workspace folder")?;
    let path = resolve_saved(root, &config.file);

    let Some(rules) = rules::load(root).context("load rules")? else {
        println!("No {} in {}.", rules::CONFIG_FILE_NAME, root.display());
        return Ok(());
    };

    let document = SavedDocument::builder()
        .path(path)
        .maybe_content(config.content)
        .build();

    let planned = interceptor::plan(root, &document, &rules).context("plan copies")?;
    if planned.is_empty() {
        let key = match_key(root, &document.path);
        println!("No rule matches {key}.");
        return Ok(());
    }

    for copy in planned {
        println!(
            "{} → {} ({})",
            copy.rule.source, copy.rule.destination, copy.rule.position
        );
        println!("------");
        println!("{}", copy.content);
        println!("------");
        println!();
    }

    Ok(())
}
