//! The watch loop: file events in, uploads out.

use std::future::Future;

use fv1_devremote::DevRemoteClient;
use fv1_hex_watcher::{DebounceState, DirectoryWatcher, FileEvent, FirmwareFilter, WatchConfig};
use tracing::{error, info};

/// What happened to a single file event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventOutcome {
    /// Not a new firmware build.
    Rejected,

    /// Uploaded and enabled under the given name.
    Deployed(String),

    /// Accepted, but the file was gone by upload time.
    Skipped,

    /// Accepted, but talking to the board failed.
    Failed,
}

/// Counters kept over one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    /// File events received from the watcher.
    pub events_seen: u64,

    /// Events that passed the firmware filter.
    pub accepted: u64,

    /// Builds uploaded and enabled.
    pub deployed: u64,

    /// Accepted builds whose file had disappeared.
    pub skipped: u64,

    /// Accepted builds that hit a transport error.
    pub failed: u64,
}

impl RunStats {
    fn record(&mut self, outcome: &EventOutcome) {
        self.events_seen += 1;
        match outcome {
            EventOutcome::Rejected => {}
            EventOutcome::Deployed(_) => {
                self.accepted += 1;
                self.deployed += 1;
            }
            EventOutcome::Skipped => {
                self.accepted += 1;
                self.skipped += 1;
            }
            EventOutcome::Failed => {
                self.accepted += 1;
                self.failed += 1;
            }
        }
    }
}

/// Owns the watcher, the board client and the debounce state for one run.
pub struct Runner {
    watcher: DirectoryWatcher,
    client: DevRemoteClient,
    filter: FirmwareFilter,
    state: DebounceState,
    stats: RunStats,
}

impl Runner {
    /// Build a runner for `config`. Nothing is watched until [`run`].
    ///
    /// [`run`]: Runner::run
    pub fn new(config: WatchConfig) -> anyhow::Result<Self> {
        let client = DevRemoteClient::new(config.base_url.clone(), config.verbose)?;

        Ok(Self {
            watcher: DirectoryWatcher::new(config),
            client,
            filter: FirmwareFilter::default(),
            state: DebounceState::default(),
            stats: RunStats::default(),
        })
    }

    /// Replace the firmware filter.
    pub fn with_filter(mut self, filter: FirmwareFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Counters so far.
    pub fn stats(&self) -> RunStats {
        self.stats
    }

    /// Filter one event and, if it is a new build, push it to the board.
    /// Transport errors are logged and reported as [`EventOutcome::Failed`].
    /// The debounce timestamp only moves on a successful deploy.
    pub async fn handle_event(&mut self, event: &FileEvent) -> EventOutcome {
        let outcome = if !self.filter.accept(&self.state, event) {
            EventOutcome::Rejected
        } else {
            info!("{}", "-".repeat(32));
            info!("File modified - {}", event.path.display());

            let outcome = match self.client.deploy(&event.path).await {
                Ok(Some(name)) => {
                    self.state.record(event);
                    EventOutcome::Deployed(name)
                }
                Ok(None) => EventOutcome::Skipped,
                Err(e) => {
                    error!("Failed to deploy {}: {e}", event.path.display());
                    EventOutcome::Failed
                }
            };

            info!("{}", "-".repeat(32));
            outcome
        };

        self.stats.record(&outcome);
        outcome
    }

    /// Watch until `shutdown` resolves, handling events one at a time.
    pub async fn run<F>(mut self, shutdown: F) -> anyhow::Result<RunStats>
    where
        F: Future<Output = ()>,
    {
        self.watcher.start()?;
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                () = &mut shutdown => {
                    info!("Shutting down");
                    break;
                }
                event = self.watcher.next_event() => {
                    let Some(event) = event else {
                        break;
                    };
                    self.handle_event(&event).await;
                }
            }
        }

        self.watcher.stop();

        let stats = self.stats;
        info!(
            "Processed {} events: {} deployed, {} skipped, {} failed",
            stats.events_seen, stats.deployed, stats.skipped, stats.failed
        );
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fv1_hex_watcher::FileEventKind;
    use pretty_assertions::assert_eq;
    use std::path::Path;
    use tempfile::TempDir;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn event_for(path: &Path, timestamp: i64) -> FileEvent {
        let size_bytes = match std::fs::metadata(path) {
            Ok(metadata) => metadata.len(),
            Err(_) => 20492,
        };
        FileEvent {
            path: path.to_path_buf(),
            is_directory: false,
            kind: FileEventKind::Modified,
            timestamp,
            size_bytes,
        }
    }

    fn runner(dir: &TempDir, url: &str) -> Runner {
        Runner::new(WatchConfig::new(dir.path()).with_base_url(url)).unwrap()
    }

    #[tokio::test]
    async fn test_rejected_event_touches_nothing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, b"hello").unwrap();

        let mut runner = runner(&dir, "http://127.0.0.1:1");
        let outcome = runner.handle_event(&event_for(&path, 10)).await;

        assert_eq!(outcome, EventOutcome::Rejected);
        assert_eq!(
            runner.stats(),
            RunStats {
                events_seen: 1,
                ..RunStats::default()
            }
        );
    }

    #[tokio::test]
    async fn test_vanished_file_is_skipped() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("gone.hex");

        let mut runner = runner(&dir, "http://127.0.0.1:1");
        let outcome = runner.handle_event(&event_for(&path, 10)).await;

        assert_eq!(outcome, EventOutcome::Skipped);
        assert_eq!(runner.stats().skipped, 1);

        std::fs::write(&path, vec![b'0'; 20492]).unwrap();
        let outcome = runner.handle_event(&event_for(&path, 10)).await;
        assert_eq!(outcome, EventOutcome::Failed);
    }

    #[tokio::test]
    async fn test_deployed_build_not_repeated() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/uploadhex"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(2)
            .mount(&server)
            .await;

        let dir = TempDir::new().unwrap();
        let build = dir.path().join("chorus.hex");
        std::fs::write(&build, vec![b'0'; 20492]).unwrap();

        let mut runner = runner(&dir, &server.uri());
        assert_eq!(
            runner.handle_event(&event_for(&build, 10)).await,
            EventOutcome::Deployed("chorus.hex".to_string())
        );
        assert_eq!(
            runner.handle_event(&event_for(&build, 10)).await,
            EventOutcome::Rejected
        );
        assert_eq!(
            runner.handle_event(&event_for(&build, 9)).await,
            EventOutcome::Rejected
        );
    }

    #[tokio::test]
    async fn test_transport_error_keeps_running() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("chorus.hex");
        std::fs::write(&path, vec![b'0'; 20492]).unwrap();

        let mut runner = runner(&dir, "http://127.0.0.1:1");
        assert_eq!(
            runner.handle_event(&event_for(&path, 10)).await,
            EventOutcome::Failed
        );

        // Nothing was deployed, so the same write is tried again.
        assert_eq!(
            runner.handle_event(&event_for(&path, 10)).await,
            EventOutcome::Failed
        );
        assert_eq!(
            runner.stats(),
            RunStats {
                events_seen: 2,
                accepted: 2,
                failed: 2,
                ..RunStats::default()
            }
        );
    }

    #[tokio::test]
    async fn test_custom_filter() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tiny.hex");
        std::fs::write(&path, b":00000001FF").unwrap();

        let mut runner = runner(&dir, "http://127.0.0.1:1").with_filter(FirmwareFilter {
            extension: "hex".to_string(),
            sizes: vec![11],
        });

        assert_eq!(
            runner.handle_event(&event_for(&path, 1)).await,
            EventOutcome::Failed
        );
    }
}
