//! Command-line arguments.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use fv1_hex_watcher::{DEFAULT_BASE_URL, WatchConfig};

/// FV1 DevRemote auto file uploader.
///
/// Watches a directory for freshly compiled SpinASM hex files and uploads
/// each new build to the board, then enables it.
#[derive(Debug, Parser)]
#[command(name = "fv1-watch", version)]
pub struct Cli {
    /// FV1 DevRemote base url
    #[arg(short = 'u', long = "url", default_value = DEFAULT_BASE_URL)]
    pub url: String,

    /// Directory to watch [default: current directory]
    #[arg(short = 'd', long = "dir", value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Verbose mode
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

impl Cli {
    /// Resolve the arguments into a watch configuration.
    pub fn into_config(self) -> anyhow::Result<WatchConfig> {
        let directory = match self.dir {
            Some(dir) => dir,
            None => std::env::current_dir().context("failed to read current directory")?,
        };

        Ok(WatchConfig::new(directory)
            .with_base_url(self.url)
            .with_verbose(self.verbose))
    }
}
