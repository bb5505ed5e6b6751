//! Filesystem-watch subscription for hosts without a save hook.
//!
//! A [`Subscription`] owns a recursive watcher on the workspace root. It is
//! the explicit "activate" of the save trigger; dropping it (or calling
//! [`Subscription::deactivate`]) tears the watcher down.

use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{Receiver, RecvTimeoutError, channel};
use std::time::{Duration, Instant};

use color_eyre::eyre::{Context, Result};
use notify::{
    Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher,
    event::{CreateKind, ModifyKind, RenameMode},
};

/// A live subscription to file changes under a workspace root.
pub struct Subscription {
    root: PathBuf,
    watcher: RecommendedWatcher,
    events: Receiver<notify::Result<Event>>,
}

impl Subscription {
    /// Start watching `root` recursively.
    #[tracing::instrument]
    pub fn activate(root: &Path) -> Result<Self> {
        let (tx, events) = channel();
        let mut watcher = notify::recommended_watcher(tx).context("create file watcher")?;
        watcher
            .watch(root, RecursiveMode::Recursive)
            .with_context(|| format!("watch workspace root: {root:?}"))?;
        tracing::debug!(?root, "subscription active");

        Ok(Self {
            root: root.to_path_buf(),
            watcher,
            events,
        })
    }

    /// Block until files are saved, then return them.
    ///
    /// After the first save arrives, events keep being collected until
    /// `debounce` passes without a new one, so an editor's burst of events for
    /// a single save is reported once. Paths are deduplicated and sorted.
    /// Returns `None` once the watcher has shut down.
    pub fn next_saves(&self, debounce: Duration) -> Option<Vec<PathBuf>> {
        loop {
            let mut saves = BTreeSet::new();
            collect(self.events.recv().ok()?, &mut saves);

            loop {
                match self.events.recv_timeout(debounce) {
                    Ok(event) => collect(event, &mut saves),
                    Err(RecvTimeoutError::Timeout) => break,
                    Err(RecvTimeoutError::Disconnected) => {
                        if saves.is_empty() {
                            return None;
                        }
                        break;
                    }
                }
            }

            if !saves.is_empty() {
                return Some(saves.into_iter().collect());
            }
        }
    }

    /// Stop watching.
    pub fn deactivate(mut self) -> Result<()> {
        self.watcher
            .unwatch(&self.root)
            .with_context(|| format!("unwatch workspace root: {:?}", self.root))
    }
}

fn collect(event: notify::Result<Event>, saves: &mut BTreeSet<PathBuf>) {
    match event {
        Ok(event) => saves.extend(saved_paths(&event).cloned()),
        Err(error) => tracing::warn!(?error, "watch error"),
    }
}

/// The paths an event reports as saved.
///
/// File creation and content or rename-into-place modifications count as
/// saves; metadata changes, removals and accesses do not.
pub fn saved_paths(event: &Event) -> impl Iterator<Item = &PathBuf> {
    let paths = match event.kind {
        EventKind::Create(CreateKind::File | CreateKind::Any)
        | EventKind::Modify(ModifyKind::Data(_) | ModifyKind::Any)
        | EventKind::Modify(ModifyKind::Name(RenameMode::To | RenameMode::Any)) => {
            event.paths.as_slice()
        }
        // Both source and target are reported; only the target was saved.
        EventKind::Modify(ModifyKind::Name(RenameMode::Both)) => match event.paths.split_last() {
            Some((target, _)) => std::slice::from_ref(target),
            None => &[],
        },
        _ => &[],
    };
    paths.iter()
}

/// Destinations written recently, so their own change events aren't treated
/// as fresh saves.
#[derive(Debug)]
pub struct RecentWrites {
    window: Duration,
    written: HashMap<PathBuf, Instant>,
}

impl RecentWrites {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            written: HashMap::new(),
        }
    }

    /// Remember that `paths` were written at `now`.
    pub fn record<'a>(&mut self, paths: impl IntoIterator<Item = &'a Path>, now: Instant) {
        self.written.retain(|_, at| now.duration_since(*at) <= self.window);
        self.written
            .extend(paths.into_iter().map(|path| (path.to_path_buf(), now)));
    }

    /// Whether a change to `path` at `now` is the echo of one of our writes.
    pub fn is_echo(&self, path: &Path, now: Instant) -> bool {
        self.written
            .get(path)
            .is_some_and(|at| now.duration_since(*at) <= self.window)
    }
}
