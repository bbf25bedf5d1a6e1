//! Hot reload of the settings file
//!
//! notify delivers events on its own thread. They are forwarded over a
//! channel; the receiving loop reloads the file and applies it to the
//! store on the UI context.

use anyhow::{Context, Result};
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use tokio::sync::mpsc::UnboundedSender;

/// Keeps the file watch alive while held
pub struct SettingsWatcher {
    _watcher: RecommendedWatcher,
    path: PathBuf,
}

impl SettingsWatcher {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Watch `path` and send `()` on `changes` whenever it is written
///
/// The parent directory is watched so editors that replace the file are
/// still seen.
pub fn watch_settings_file(path: &Path, changes: UnboundedSender<()>) -> Result<SettingsWatcher> {
    let path = path.to_path_buf();
    let file_name = path
        .file_name()
        .map(|name| name.to_os_string())
        .context("Settings path has no file name")?;
    let directory = path
        .parent()
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."))
        .to_path_buf();

    let mut watcher = notify::recommended_watcher(move |result: notify::Result<Event>| {
        match result {
            Ok(event) => {
                let relevant = matches!(event.kind, EventKind::Create(_) | EventKind::Modify(_))
                    && event
                        .paths
                        .iter()
                        .any(|p| p.file_name() == Some(file_name.as_os_str()));
                if relevant && changes.send(()).is_err() {
                    log::debug!("Settings change receiver dropped");
                }
            }
            Err(e) => log::warn!("Settings watch error: {}", e),
        }
    })
    .context("Failed to create settings file watcher")?;

    watcher
        .watch(&directory, RecursiveMode::NonRecursive)
        .with_context(|| format!("Failed to watch {}", directory.display()))?;
    log::info!("Watching {} for changes", path.display());

    Ok(SettingsWatcher {
        _watcher: watcher,
        path,
    })
}
