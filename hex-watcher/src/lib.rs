//! # FV1 Hex Watcher
//!
//! This crate detects freshly compiled FV-1 firmware images in a directory
//! tree. It watches the tree, stats every change notification, and decides
//! which changes are new builds worth pushing to a DevRemote.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                       Hex Watcher                               │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  WatchConfig ──► DirectoryWatcher ──► FileEvent                 │
//! │                        │                  │                     │
//! │                        ▼                  ▼                     │
//! │                  notify thread     FirmwareFilter + Debounce    │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod event;
pub mod filter;
pub mod watcher;

pub use config::{DEFAULT_BASE_URL, WatchConfig};
pub use error::{Result, WatcherError};
pub use event::{FileEvent, FileEventKind};
pub use filter::{DebounceState, FirmwareFilter};
pub use watcher::DirectoryWatcher;
