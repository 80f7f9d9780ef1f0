//! Configuration for the firmware watcher.

use std::path::PathBuf;

/// Base URL of a DevRemote reachable over mDNS.
pub const DEFAULT_BASE_URL: &str = "http://fv1.local";

/// Configuration for one watcher run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchConfig {
    /// Root directory, watched recursively.
    pub directory: PathBuf,

    /// Base URL of the DevRemote control endpoint, without trailing slash.
    pub base_url: String,

    /// Verbose transport logging.
    pub verbose: bool,
}

impl WatchConfig {
    /// Create a config for `directory` pointing at the default board URL.
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            verbose: false,
        }
    }

    /// Set the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = normalize_base_url(&url.into());
        self
    }

    /// Enable or disable verbose transport logging.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}

/// Strip trailing slashes so endpoint paths can be appended directly.
pub fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::path::Path;

    #[test]
    fn test_watch_config_defaults() {
        let config = WatchConfig::new("/home/user/fv1");

        assert_eq!(config.directory, Path::new("/home/user/fv1"));
        assert_eq!(config.base_url, "http://fv1.local");
        assert!(!config.verbose);
    }

    #[test]
    fn test_base_url_trailing_slash_removed() {
        let config = WatchConfig::new("/tmp")
            .with_base_url("http://192.168.4.1/")
            .with_verbose(true);

        assert_eq!(config.base_url, "http://192.168.4.1");
        assert!(config.verbose);
    }
}
