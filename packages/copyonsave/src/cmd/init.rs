//! Create an example `copyonsaveandedit.json` in the workspace root.

use std::fs;
use std::io::{self, BufRead, Write};

use clap::Args;
use color_eyre::eyre::{Context, Result};
use copyonsave::{
    notification::{Console, Notifier},
    open,
    rules::{self, CONFIG_FILE_NAME},
};
use tracing::instrument;

use super::WorkspaceArgs;

#[derive(Args, Clone, Debug)]
pub struct Config {
    #[command(flatten)]
    workspace: WorkspaceArgs,

    /// Overwrite an existing rule file without asking.
    #[arg(long)]
    force: bool,

    /// Don't open the new file in `$VISUAL` / `$EDITOR`.
    #[arg(long)]
    no_open: bool,
}

#[instrument]
pub fn main(config: Config) -> Result<()> {
    let notifier = Console;
    let workspace = config.workspace.resolve()?;
    let Some(root) = workspace.root() else {
        notifier.error("No folder is open.");
        return Ok(());
    };

    let config_path = rules::config_path(root);
    if config_path.exists() && !config.force {
        notifier.warning(format!("{CONFIG_FILE_NAME} already exists."));
        if !confirm("Overwrite it? [y/N] ")? {
            tracing::debug!(?config_path, "kept existing config");
            return Ok(());
        }
    }

    let content = rules::to_config_json(&rules::example_rules())?;
    if let Err(error) = fs::write(&config_path, content) {
        notifier.error(format!("Error writing {CONFIG_FILE_NAME}: {error}"));
        return Ok(());
    }
    notifier.info(format!("Created {}.", config_path.display()));

    if config.no_open {
        return Ok(());
    }
    match open::editor_from_env() {
        Some(editor) => open::open_in_editor(&editor, &config_path)
            .with_context(|| format!("open {CONFIG_FILE_NAME} for editing"))?,
        None => println!("Set $EDITOR to open {CONFIG_FILE_NAME} automatically."),
    }

    Ok(())
}

/// Ask a yes/no question on stdin; anything but an explicit yes is a no.
fn confirm(prompt: &str) -> Result<bool> {
    print!("{prompt}");
    io::stdout().flush().context("flush stdout")?;

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("read user input")?;
    let response = line.trim().to_lowercase();
    Ok(response == "y" || response == "yes")
}
