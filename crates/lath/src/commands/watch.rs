//! Watch command: rebuild whenever the template tree changes.

use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use lath_build::{FileWatcher, SiteConfig};
use tokio::time::{sleep_until, Instant};

/// Delay between the last observed change and the rebuild it triggers.
const DEBOUNCE: Duration = Duration::from_millis(100);

/// Run the watch command.
///
/// Every change arms a fresh debounce timer, replacing any pending one.
/// The rebuild runs synchronously inside this loop, so rebuilds never
/// overlap; changes arriving mid-build queue up and trigger the next one.
/// Each rebuild starts from scratch: config, data, and partials are all
/// reloaded rather than incrementally invalidated.
pub async fn run(config_path: &Path) -> Result<()> {
    let site = SiteConfig::load(config_path)?;

    // Build once on start.
    rebuild(config_path);

    let templates_dir = Path::new(".").join(&site.templates.dir);
    let (_watcher, mut events) = FileWatcher::new(&templates_dir)?;
    tracing::info!("watching {} for changes", templates_dir.display());

    let mut deadline: Option<Instant> = None;
    loop {
        let event = match deadline {
            Some(at) => {
                tokio::select! {
                    event = events.recv() => event,
                    _ = sleep_until(at) => {
                        deadline = None;
                        rebuild(config_path);
                        continue;
                    }
                }
            }
            None => events.recv().await,
        };

        match event {
            Some(path) => {
                tracing::info!("changed: {}", path.display());
                deadline = Some(Instant::now() + DEBOUNCE);
            }
            None => break,
        }
    }

    Ok(())
}

fn rebuild(config_path: &Path) {
    let result = SiteConfig::load(config_path)
        .map_err(anyhow::Error::from)
        .and_then(|site| super::build::run_build(&site));

    if let Err(err) = result {
        tracing::error!("rebuild failed: {}", err);
    }
}
