//! File watching for rebuild-on-change.

use std::path::{Path, PathBuf};
use std::sync::mpsc;

use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc as async_mpsc;

/// Extensions whose changes trigger a rebuild.
const WATCHED_EXTENSIONS: [&str; 3] = ["hbs", "html", "js"];

/// Recursive watcher over the template tree.
///
/// Emits the changed path for every relevant filesystem event. Debouncing
/// is the consumer's job: the watch loop arms a timer per event so a burst
/// of changes collapses into one rebuild.
pub struct FileWatcher {
    _watcher: RecommendedWatcher,
}

impl FileWatcher {
    /// Watch `path` recursively. Returns the watcher (keep it alive) and
    /// a channel yielding changed paths.
    pub fn new(path: &Path) -> Result<(Self, async_mpsc::Receiver<PathBuf>), std::io::Error> {
        let (sync_tx, sync_rx) = mpsc::channel();
        let (async_tx, async_rx) = async_mpsc::channel(100);

        let mut watcher = notify::recommended_watcher(move |res: Result<notify::Event, _>| {
            if let Ok(event) = res {
                let _ = sync_tx.send(event);
            }
        })
        .map_err(std::io::Error::other)?;

        watcher
            .watch(path, RecursiveMode::Recursive)
            .map_err(std::io::Error::other)?;

        // Forward events from notify's callback thread into the async loop.
        std::thread::spawn(move || {
            while let Ok(event) = sync_rx.recv() {
                for path in event.paths {
                    if is_watched(&path) {
                        let _ = async_tx.blocking_send(path);
                    }
                }
            }
        });

        Ok((Self { _watcher: watcher }, async_rx))
    }
}

fn is_watched(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| WATCHED_EXTENSIONS.contains(&ext))
}
