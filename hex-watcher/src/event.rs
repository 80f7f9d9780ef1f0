//! File events from directory watching.

use std::fs::Metadata;
use std::path::PathBuf;

/// A file system event, stat'ed at the time it was received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEvent {
    /// Path to the affected file or directory.
    pub path: PathBuf,

    /// Whether the path is a directory.
    pub is_directory: bool,

    /// The kind of event.
    pub kind: FileEventKind,

    /// Change time of the path in whole seconds since the epoch.
    pub timestamp: i64,

    /// File size in bytes.
    pub size_bytes: u64,
}

impl FileEvent {
    /// Build an event for `path` from its current metadata.
    pub fn from_path(kind: FileEventKind, path: impl Into<PathBuf>) -> std::io::Result<Self> {
        let path = path.into();
        let metadata = std::fs::metadata(&path)?;

        Ok(Self {
            is_directory: metadata.is_dir(),
            timestamp: change_time_secs(&metadata),
            size_bytes: metadata.len(),
            kind,
            path,
        })
    }

    /// File extension, if any.
    pub fn extension(&self) -> Option<&str> {
        self.path.extension()?.to_str()
    }

    /// Final path component, lossily converted.
    pub fn file_name(&self) -> Option<String> {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
    }
}

/// Kind of file event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileEventKind {
    /// File was created.
    Created,

    /// File contents or metadata changed.
    Modified,

    /// File was deleted.
    Deleted,

    /// File was renamed.
    Moved,
}

impl FileEventKind {
    /// Map a notify event kind. Access and unclassified notifications have no
    /// counterpart and yield `None`.
    pub fn from_notify(kind: notify::EventKind) -> Option<Self> {
        match kind {
            notify::EventKind::Create(_) => Some(Self::Created),
            notify::EventKind::Modify(notify::event::ModifyKind::Name(_)) => Some(Self::Moved),
            notify::EventKind::Modify(_) => Some(Self::Modified),
            notify::EventKind::Remove(_) => Some(Self::Deleted),
            notify::EventKind::Access(_) | notify::EventKind::Any | notify::EventKind::Other => {
                None
            }
        }
    }
}

/// Inode change time on Unix, matching `st_ctime`.
#[cfg(unix)]
fn change_time_secs(metadata: &Metadata) -> i64 {
    use std::os::unix::fs::MetadataExt;

    metadata.ctime()
}

/// Creation time where available, otherwise modification time.
#[cfg(not(unix))]
fn change_time_secs(metadata: &Metadata) -> i64 {
    use std::time::UNIX_EPOCH;

    metadata
        .created()
        .or_else(|_| metadata.modified())
        .ok()
        .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
        .map(|d| d.as_secs() as i64)
        .unwrap_or_default()
}
