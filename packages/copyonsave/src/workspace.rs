//! Workspace folders and the paths derived from them.

use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};

/// The folders open in the host editor, in the order the host reports them.
///
/// Only the first folder is consulted; there is no multi-root reconciliation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Workspace {
    folders: Vec<PathBuf>,
}

impl Workspace {
    /// A workspace with the given folders.
    pub fn new(folders: impl IntoIterator<Item = impl Into<PathBuf>>) -> Self {
        Self {
            folders: folders.into_iter().map(Into::into).collect(),
        }
    }

    /// The workspace root: the first open folder, if any.
    pub fn root(&self) -> Option<&Path> {
        self.folders.first().map(PathBuf::as_path)
    }

    /// The same folders made absolute against `base`, with `.` and `..`
    /// segments resolved.
    pub fn absolute(&self, base: &Path) -> Self {
        Self::new(self.folders.iter().map(|folder| normalize(&base.join(folder))))
    }
}

/// Resolve `.` and `..` segments without touching the filesystem.
///
/// `..` at the root stays at the root.
pub fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other),
        }
    }
    normalized
}

/// Derive the match key for a saved file: its path relative to the workspace
/// root, with `/` separators.
///
/// Relative `saved` paths are taken to be relative to the root already. Files
/// outside the root produce `..`-prefixed keys.
pub fn match_key(root: &Path, saved: &Path) -> String {
    let relative = if saved.is_absolute() {
        pathdiff::diff_paths(saved, root).unwrap_or_else(|| saved.to_path_buf())
    } else {
        saved.to_path_buf()
    };

    relative
        .components()
        .filter(|component| !matches!(component, Component::CurDir))
        .map(|component| component.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Resolve a saved file path reported by the host to an absolute path.
pub fn resolve_saved(root: &Path, saved: &Path) -> PathBuf {
    normalize(&root.join(saved))
}

/// Resolve a rule destination against the workspace root.
///
/// Destinations are always root-relative: leading separators are ignored so
/// `"/out/a.txt"` lands in `<root>/out/a.txt`.
pub fn destination_path(root: &Path, destination: &str) -> PathBuf {
    root.join(destination.trim_start_matches(['/', '\\']))
}
