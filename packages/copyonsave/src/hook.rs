//! Types for the editor hook protocol.
//!
//! An editor extension forwards its "document saved" notification to
//! `copyonsave hook` as a single JSON object on stdin, and shows whatever
//! notifications come back on stdout.

use std::path::{Path, PathBuf};

use bon::Builder;
use serde::{Deserialize, Serialize};
use tap::Pipe;

use crate::{
    interceptor::SavedDocument,
    notification::Notification,
    workspace::{self, Workspace},
};

/// Editor events handled by copyonsave.
#[derive(Debug, Deserialize)]
#[serde(tag = "hook_event_name")]
pub enum Hook {
    /// Sent after a document is saved.
    DocumentSaved(DocumentSavedPayload),

    /// Any other event; ignored.
    #[serde(other)]
    Other,
}

/// Payload for the `DocumentSaved` event.
#[derive(Debug, Clone, Deserialize, Serialize, Builder)]
pub struct DocumentSavedPayload {
    /// The folders open in the editor; the first one is the workspace root.
    /// Relative folders are taken relative to the hook's working directory.
    #[serde(default)]
    #[builder(default)]
    pub workspace_folders: Workspace,

    /// The path of the saved document.
    #[builder(into)]
    pub file_path: PathBuf,

    /// The document's full text. When absent, the file is read from disk if a
    /// rule matches it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(into)]
    pub content: Option<String>,
}

impl DocumentSavedPayload {
    /// The editor's workspace with every folder made absolute against `cwd`.
    pub fn workspace(&self, cwd: &Path) -> Workspace {
        self.workspace_folders.absolute(cwd)
    }

    /// The saved document, resolved against the root of `workspace`.
    ///
    /// Returns `None` when no workspace folder is open: there is no rule file
    /// to consult.
    pub fn document(&self, workspace: &Workspace) -> Option<SavedDocument> {
        let root = workspace.root()?;
        SavedDocument::builder()
            .path(workspace::resolve_saved(root, &self.file_path))
            .maybe_content(self.content.clone())
            .build()
            .pipe(Some)
    }
}

/// The response to a `DocumentSaved` event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct DocumentSavedResponse {
    /// Notifications for the editor to display, in the order they were raised.
    pub notifications: Vec<Notification>,
}

impl From<Vec<Notification>> for DocumentSavedResponse {
    fn from(notifications: Vec<Notification>) -> Self {
        Self { notifications }
    }
}
