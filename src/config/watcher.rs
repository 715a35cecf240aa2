//! Navigation file watcher for hot reload.
//!
//! The parent directory is watched rather than the file: editors that save
//! by writing a temp file and renaming it over the original replace the
//! inode, and a watch on the file itself goes silent after the first save.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::nav::loader::{load_nav, NavDocument};
use crate::routing::live::LiveRoutes;

/// Watches one navigation file and emits a freshly loaded document per change.
pub struct NavWatcher {
    path: PathBuf,
    dir: PathBuf,
    file_name: OsString,
    update_tx: mpsc::UnboundedSender<NavDocument>,
}

impl NavWatcher {
    /// Returns the watcher and a receiver for reloaded documents.
    pub fn new(path: &Path) -> (Self, mpsc::UnboundedReceiver<NavDocument>) {
        let (update_tx, update_rx) = mpsc::unbounded_channel();
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let file_name = path.file_name().map(OsString::from).unwrap_or_default();

        (Self {
            path: path.to_path_buf(),
            dir,
            file_name,
            update_tx,
        }, update_rx)
    }

    /// Start watching. The returned handle must be kept alive for as long as
    /// updates are wanted.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let NavWatcher { path, dir, file_name, update_tx } = self;

        let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
            let event = match res {
                Ok(event) => event,
                Err(e) => {
                    tracing::error!(error = %e, "Navigation watch error");
                    return;
                }
            };
            if !is_relevant(&event, &file_name) || !path.is_file() {
                return;
            }

            tracing::info!(path = %path.display(), kind = ?event.kind, "Navigation file changed, reloading");
            match load_nav(&path) {
                Ok(doc) => {
                    let _ = update_tx.send(doc);
                }
                Err(e) => {
                    tracing::error!(error = %e, "Failed to reload navigation. Keeping current routes.");
                }
            }
        })?;

        watcher.watch(&dir, RecursiveMode::NonRecursive)?;

        tracing::info!(dir = %dir.display(), "Navigation watcher started");
        Ok(watcher)
    }
}

/// A create/modify event that touches the watched file name.
fn is_relevant(event: &Event, file_name: &OsString) -> bool {
    matches!(event.kind, EventKind::Create(_) | EventKind::Modify(_))
        && event
            .paths
            .iter()
            .any(|p| p.file_name() == Some(file_name.as_os_str()))
}

/// Apply every reloaded document to `live` until the watcher goes away.
pub fn spawn_reloader(
    live: Arc<LiveRoutes>,
    mut updates: mpsc::UnboundedReceiver<NavDocument>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(doc) = updates.recv().await {
            // Errors are logged by `reload`; the previous table stays active.
            let _ = live.reload(&doc);
        }
    })
}
