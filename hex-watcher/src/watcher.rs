//! Directory watcher implementation.

use std::path::Path;

use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tracing::{debug, error, info};

use crate::config::WatchConfig;
use crate::error::{Result, WatcherError};
use crate::event::{FileEvent, FileEventKind};

/// Capacity of the channel between the notify thread and the consumer.
const EVENT_CHANNEL_CAPACITY: usize = 1000;

/// Watches one directory tree and forwards stat'ed file events.
pub struct DirectoryWatcher {
    /// Watch configuration.
    config: WatchConfig,

    /// Internal notify watcher, present while watching.
    watcher: Option<RecommendedWatcher>,

    /// Event sender, cloned into the notify callback.
    event_tx: mpsc::Sender<FileEvent>,

    /// Event receiver.
    event_rx: mpsc::Receiver<FileEvent>,
}

impl DirectoryWatcher {
    /// Create an idle watcher. No OS resources are held until [`start`].
    ///
    /// [`start`]: DirectoryWatcher::start
    pub fn new(config: WatchConfig) -> Self {
        let (event_tx, event_rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);

        Self {
            config,
            watcher: None,
            event_tx,
            event_rx,
        }
    }

    /// Register a recursive subscription on the configured directory.
    pub fn start(&mut self) -> Result<()> {
        if self.watcher.is_some() {
            return Ok(());
        }

        let path = self.config.directory.clone();
        if !path.exists() {
            return Err(WatcherError::DirectoryNotFound(path.display().to_string()));
        }

        if !path.is_dir() {
            return Err(WatcherError::Config(format!(
                "Path is not a directory: {}",
                path.display()
            )));
        }

        let event_tx = self.event_tx.clone();
        let mut watcher = notify::recommended_watcher(
            move |res: std::result::Result<notify::Event, notify::Error>| match res {
                Ok(event) => {
                    let Some(kind) = FileEventKind::from_notify(event.kind) else {
                        return;
                    };

                    for path in event.paths {
                        let file_event = match FileEvent::from_path(kind, &path) {
                            Ok(file_event) => file_event,
                            Err(e) => {
                                debug!("Dropping event for {}: {e}", path.display());
                                continue;
                            }
                        };

                        if let Err(e) = event_tx.blocking_send(file_event) {
                            error!("Failed to send file event: {e}");
                        }
                    }
                }
                Err(e) => {
                    error!("Watch error: {e}");
                }
            },
        )?;

        watcher.watch(&path, RecursiveMode::Recursive)?;
        self.watcher = Some(watcher);

        info!("Directory watcher started: {}", path.display());
        Ok(())
    }

    /// Tear down the subscription.
    pub fn stop(&mut self) {
        if let Some(mut watcher) = self.watcher.take() {
            let _ = watcher.unwatch(&self.config.directory);
            info!("Directory watcher stopped");
        }
    }

    /// Check if the watcher is running.
    pub fn is_running(&self) -> bool {
        self.watcher.is_some()
    }

    /// Wait for the next file event.
    pub async fn next_event(&mut self) -> Option<FileEvent> {
        self.event_rx.recv().await
    }

    /// The watched directory.
    pub fn directory(&self) -> &Path {
        &self.config.directory
    }
}

impl Drop for DirectoryWatcher {
    fn drop(&mut self) {
        self.stop();
    }
}
