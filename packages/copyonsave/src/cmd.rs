//! CLI subcommands.

use std::env;
use std::path::PathBuf;

use clap::Args;
use color_eyre::eyre::{Context, Result};
use copyonsave::workspace::Workspace;

pub mod hook;
pub mod init;
pub mod preview;
pub mod validate;
pub mod watch;

/// Workspace selection shared by subcommands that operate on a workspace.
#[derive(Args, Clone, Debug)]
pub struct WorkspaceArgs {
    /// Workspace folder. May be repeated; the first one is the workspace root.
    ///
    /// Defaults to the current directory.
    #[arg(
        short = 'w',
        long = "workspace",
        env = "COPYONSAVE_WORKSPACE",
        value_delimiter = ','
    )]
    pub folders: Vec<PathBuf>,
}

impl WorkspaceArgs {
    /// Resolve the folders to absolute paths, defaulting to the current directory.
    pub fn resolve(&self) -> Result<Workspace> {
        let cwd = env::current_dir().context("get current directory")?;
        if self.folders.is_empty() {
            return Ok(Workspace::new([cwd]));
        }
        Ok(Workspace::new(&self.folders).absolute(&cwd))
    }
}
