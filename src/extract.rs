// src/extract.rs
//
// Slice extraction: the fragment is everything strictly between the first
// body marker and the first script marker, trimmed at both ends.

use memchr::memmem;
use tracing::debug;

use crate::error::BuildError;

pub const BODY_MARKER: &str = "<body>";
pub const SCRIPT_MARKER: &str = "<script>";

fn find(haystack: &str, marker: &str) -> Result<usize, BuildError> {
    memmem::find(haystack.as_bytes(), marker.as_bytes()).ok_or_else(|| {
        BuildError::MarkerNotFound {
            marker: marker.to_string(),
        }
    })
}

/// Return the trimmed fragment between `body_marker` and `script_marker`.
///
/// Both markers are located by their first occurrence in the whole document.
/// The body marker is looked up first, so a document missing both reports the
/// body marker.
pub fn extract_fragment<'a>(
    source: &'a str,
    body_marker: &str,
    script_marker: &str,
) -> Result<&'a str, BuildError> {
    let body_at = find(source, body_marker)?;
    let script_at = find(source, script_marker)?;

    let start = body_at + body_marker.len();
    if script_at <= body_at || script_at < start {
        return Err(BuildError::MalformedOrdering { body_at, script_at });
    }

    // Markers are found on byte boundaries of valid UTF-8 needles, so both
    // offsets are char boundaries.
    let fragment = source[start..script_at].trim();
    debug!(body_at, script_at, len = fragment.len(), "extracted fragment");
    Ok(fragment)
}
