//! Firmware validity filter and timestamp debounce.

use crate::event::{FileEvent, FileEventKind};

/// SpinASM hex output size with CRLF line endings.
pub const HEX_SIZE_CRLF: u64 = 21517;

/// SpinASM hex output size with LF line endings.
pub const HEX_SIZE_LF: u64 = 20492;

/// Decides whether a file event is a fresh firmware build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FirmwareFilter {
    /// Required extension, compared case-insensitively, without the dot.
    pub extension: String,

    /// Accepted exact file sizes in bytes.
    pub sizes: Vec<u64>,
}

impl FirmwareFilter {
    /// Check whether `event` looks like a firmware image, ignoring debounce.
    pub fn matches(&self, event: &FileEvent) -> bool {
        event.kind == FileEventKind::Modified
            && !event.is_directory
            && event
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case(&self.extension))
            && self.sizes.contains(&event.size_bytes)
    }

    /// Accept `event` if it matches and is newer than the last deployed build.
    /// The state is left untouched; see [`DebounceState::record`].
    pub fn accept(&self, state: &DebounceState, event: &FileEvent) -> bool {
        event.timestamp > state.last_accepted_timestamp && self.matches(event)
    }
}

impl Default for FirmwareFilter {
    fn default() -> Self {
        Self {
            extension: "hex".to_string(),
            sizes: vec![HEX_SIZE_LF, HEX_SIZE_CRLF],
        }
    }
}

/// Timestamp of the last deployed build. Zero means nothing deployed yet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DebounceState {
    /// Change time of the last deployed event, in seconds.
    pub last_accepted_timestamp: i64,
}

impl DebounceState {
    /// Remember `event` as deployed. Only called once the upload and enable
    /// both went through, so a failed attempt can be retried by the next
    /// notification for the same write.
    pub fn record(&mut self, event: &FileEvent) {
        self.last_accepted_timestamp = event.timestamp;
    }
}
