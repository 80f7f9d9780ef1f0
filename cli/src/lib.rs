//! Wires the hex watcher to the DevRemote client.

pub mod cli;
pub mod logging;
pub mod runner;

pub use cli::Cli;
pub use runner::{EventOutcome, RunStats, Runner};
