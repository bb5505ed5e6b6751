//! The save interceptor: turns one "document saved" event into copies.
//!
//! For each save:
//! 1. The workspace root is the first open folder; without one, nothing happens.
//! 2. `copyonsaveandedit.json` is read fresh from the root. A missing file
//!    means the feature is off for this workspace and is only logged.
//! 3. A config that can't be read or parsed raises a single error
//!    notification and aborts the event.
//! 4. Rules whose `source` equals the saved file's match key are applied; each
//!    rule creates its destination directory and writes its copy
//!    independently of the others.
//!
//! A document saved without its text is only read from disk once a rule
//! matches, so unrelated saves never touch the file.

use std::fs;
use std::path::{Path, PathBuf};

use bon::Builder;
use color_eyre::eyre::{Context, Result};
use derive_more::Display;
use itertools::Itertools;
use rayon::prelude::*;
use tap::Pipe;

use crate::{
    notification::Notifier,
    rules::{self, CopyRule},
    workspace::{self, Workspace},
};

/// A document the host reports as saved.
#[derive(Debug, Clone, Builder)]
pub struct SavedDocument {
    /// Path of the saved file; relative paths are relative to the workspace root.
    #[builder(into)]
    pub path: PathBuf,

    /// Full text of the document at save time, if the host sent it.
    #[builder(into)]
    pub content: Option<String>,
}

impl SavedDocument {
    /// The document's text: the content the host sent, or the file on disk.
    pub fn text(&self) -> Result<String> {
        match &self.content {
            Some(content) => Ok(content.clone()),
            None => fs::read_to_string(&self.path)
                .with_context(|| format!("read saved document: {:?}", self.path)),
        }
    }
}

/// A copy that a save would produce.
#[derive(Debug, Clone)]
pub struct PlannedCopy {
    /// The rule that produced this copy.
    pub rule: CopyRule,

    /// Absolute destination path.
    pub destination: PathBuf,

    /// The exact content to write.
    pub content: String,
}

/// Why a single rule's copy failed.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum CopyFailure {
    /// The destination's parent directories could not be created.
    #[display("Error creating directory {}: {message}", directory.display())]
    CreateDirectory { directory: PathBuf, message: String },

    /// The destination file could not be written.
    #[display("Error writing {destination}: {message}")]
    Write { destination: String, message: String },
}

/// What happened to one matching rule.
#[derive(Debug, Clone)]
pub struct RuleOutcome {
    pub rule: CopyRule,
    pub result: Result<PathBuf, CopyFailure>,
}

/// What a save event did, for hosts that want more than notifications.
#[derive(Debug, Clone)]
pub enum SaveReport {
    /// No workspace folder is open.
    NoWorkspace,

    /// The workspace has no rule file.
    ConfigMissing { config: PathBuf },

    /// The rule file could not be read or parsed; no rule was processed.
    ConfigInvalid { config: PathBuf, message: String },

    /// No rule's `source` equals the match key.
    NoMatch { key: String },

    /// Rules matched but the document's text could not be read; nothing was written.
    DocumentUnreadable { message: String },

    /// At least one rule matched; one outcome per matching rule, in config order.
    Copied(Vec<RuleOutcome>),
}

impl SaveReport {
    /// Destinations that were written successfully.
    pub fn written(&self) -> impl Iterator<Item = &Path> {
        let outcomes = match self {
            SaveReport::Copied(outcomes) => outcomes.as_slice(),
            _ => &[],
        };
        outcomes
            .iter()
            .filter_map(|outcome| outcome.result.as_ref().ok())
            .map(PathBuf::as_path)
    }
}

/// Compute the copies a save of `document` would produce under `rules`,
/// without writing anything.
///
/// The document's text is only read when at least one rule matches.
pub fn plan(
    root: &Path,
    document: &SavedDocument,
    rules: &[CopyRule],
) -> Result<Vec<PlannedCopy>> {
    let key = workspace::match_key(root, &document.path);
    let matching = rules.iter().filter(|rule| rule.matches(&key)).collect_vec();
    if matching.is_empty() {
        return Ok(Vec::new());
    }

    let text = document.text()?;
    matching
        .into_iter()
        .map(|rule| PlannedCopy {
            rule: rule.clone(),
            destination: workspace::destination_path(root, &rule.destination),
            content: rule.inject(&text),
        })
        .collect_vec()
        .pipe(Ok)
}

/// Handle one "document saved" event.
///
/// Failures are reported through `notifier` and never returned: config errors
/// abort the event with one error notification, per-rule failures are reported
/// for that rule only while the other matching rules proceed.
#[tracing::instrument(skip(document, notifier), fields(path = ?document.path))]
pub fn on_save<N: Notifier>(
    workspace: &Workspace,
    document: &SavedDocument,
    notifier: &N,
) -> SaveReport {
    let Some(root) = workspace.root() else {
        tracing::debug!("no workspace folder open");
        return SaveReport::NoWorkspace;
    };

    let config = rules::config_path(root);
    let rules = match rules::load(root) {
        Ok(Some(rules)) => rules,
        Ok(None) => {
            tracing::info!(?config, "config file not found");
            return SaveReport::ConfigMissing { config };
        }
        Err(error) => {
            tracing::warn!(?error, "load rules");
            let message = format!("Error reading config file: {error:#}");
            notifier.error(&message);
            return SaveReport::ConfigInvalid { config, message };
        }
    };

    let planned = match plan(root, document, &rules) {
        Ok(planned) => planned,
        Err(error) => {
            tracing::warn!(?error, "read saved document");
            let message = format!("Error reading saved document: {error:#}");
            notifier.error(&message);
            return SaveReport::DocumentUnreadable { message };
        }
    };
    if planned.is_empty() {
        let key = workspace::match_key(root, &document.path);
        tracing::debug!(?key, "no rule matches");
        return SaveReport::NoMatch { key };
    }

    planned
        .into_par_iter()
        .map(|copy| execute(copy, notifier))
        .collect::<Vec<_>>()
        .pipe(SaveReport::Copied)
}

/// Create the destination directory and write one copy.
fn execute<N: Notifier>(copy: PlannedCopy, notifier: &N) -> RuleOutcome {
    let PlannedCopy {
        rule,
        destination,
        content,
    } = copy;

    let result = write_copy(&rule, &destination, &content);
    match &result {
        Ok(_) => {
            tracing::debug!(?destination, source = %rule.source, "wrote copy");
            notifier.info(format!("Copied {} → {}", rule.source, rule.destination));
        }
        Err(failure) => {
            tracing::warn!(?destination, %failure, "copy failed");
            notifier.error(failure.to_string());
        }
    }

    RuleOutcome { rule, result }
}

fn write_copy(rule: &CopyRule, destination: &Path, content: &str) -> Result<PathBuf, CopyFailure> {
    if let Some(directory) = destination.parent() {
        fs::create_dir_all(directory).map_err(|e| CopyFailure::CreateDirectory {
            directory: directory.to_path_buf(),
            message: e.to_string(),
        })?;
    }

    fs::write(destination, content).map_err(|e| CopyFailure::Write {
        destination: rule.destination.clone(),
        message: e.to_string(),
    })?;

    Ok(destination.to_path_buf())
}
