//! Filename sanitizing for device-side storage.

use std::sync::LazyLock;

use regex::Regex;

#[allow(clippy::unwrap_used)]
static UNSAFE_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\p{L}\p{N}_.]").unwrap());

/// Turn an arbitrary string into a filename safe for the device filesystem
/// and for use in a query string.
///
/// Leading and trailing whitespace is trimmed, remaining spaces become
/// underscores, and anything that is not a letter, a number, an underscore or a
/// dot is removed. Combining marks are dropped, so decomposed names lose their
/// accents.
pub fn sanitize(raw: &str) -> String {
    let underscored = raw.trim().replace(' ', "_");
    UNSAFE_CHARS.replace_all(&underscored, "").into_owned()
}
