//! Watch the workspace and copy files as they are saved.

use std::path::{Component, Path};
use std::time::{Duration, Instant};

use clap::Args;
use color_eyre::eyre::{Context, OptionExt, Result};
use copyonsave::{
    interceptor::{self, SavedDocument},
    notification::Console,
    rules,
    watch::{RecentWrites, Subscription},
    workspace::Workspace,
};
use tracing::instrument;

use super::WorkspaceArgs;

/// How long a destination we wrote is ignored by the watcher.
const ECHO_WINDOW: Duration = Duration::from_secs(1);

#[derive(Args, Clone, Debug)]
pub struct Config {
    #[command(flatten)]
    workspace: WorkspaceArgs,

    /// Quiet period, in milliseconds, that ends a burst of change events.
    #[arg(long, env = "COPYONSAVE_DEBOUNCE_MS", default_value = "200")]
    debounce_ms: u64,
}

#[instrument]
pub fn main(config: Config) -> Result<()> {
    let workspace = config.workspace.resolve()?;
    let root = workspace
        .root()
        .ok_or_eyre("no workspace folder")?
        .canonicalize()
        .context("canonicalize workspace root")?;
    // Events arrive under the canonical root, so the interceptor must see the same path.
    let workspace = Workspace::new([root.as_path()]);

    let subscription = Subscription::activate(&root)?;
    let debounce = Duration::from_millis(config.debounce_ms);
    let mut recent = RecentWrites::new(ECHO_WINDOW);
    println!("Watching {} (Ctrl-C to stop)", root.display());

    while let Some(paths) = subscription.next_saves(debounce) {
        for path in paths {
            if !is_candidate(&root, &path) || recent.is_echo(&path, Instant::now()) {
                continue;
            }

            let document = SavedDocument::builder().path(path).build();
            let report = interceptor::on_save(&workspace, &document, &Console);
            recent.record(report.written(), Instant::now());
        }
    }

    subscription.deactivate()
}

/// Whether a saved path should be handed to the interceptor.
///
/// The rule file itself and anything inside `.git` are never treated as saves.
fn is_candidate(root: &Path, path: &Path) -> bool {
    if path == rules::config_path(root) || !path.is_file() {
        return false;
    }
    !path
        .strip_prefix(root)
        .unwrap_or(path)
        .components()
        .any(|component| component == Component::Normal(".git".as_ref()))
}
