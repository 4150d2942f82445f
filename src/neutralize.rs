// src/neutralize.rs
//
// Orphaned handler calls. Each UI section `sec-<id>` was switched to by an
// inline `showSec('<id>',this)`; once the attribute is gone any remaining copy
// of that call is stray text and is removed by exact match.

use memchr::{memchr, memmem};
use tracing::debug;

/// Sections of the reference document's scope navigation.
pub const DEFAULT_SECTIONS: &[&str] = &["info", "trust", "entry", "exit", "assets", "deps"];

const SECTION_ID_PREFIX: &str = "id=\"sec-";

/// A literal call expression to delete from the fragment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CallMarker(String);

impl CallMarker {
    pub fn new(literal: impl Into<String>) -> Self {
        CallMarker(literal.into())
    }

    /// `showSec('<id>',this)`
    pub fn for_section(id: &str) -> Self {
        CallMarker(format!("showSec('{id}',this)"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Section ids declared in `fragment` as `id="sec-<id>"`, in document order,
/// without duplicates.
pub fn discover_sections(fragment: &str) -> Vec<String> {
    let bytes = fragment.as_bytes();
    let finder = memmem::Finder::new(SECTION_ID_PREFIX.as_bytes());

    let mut ids: Vec<String> = Vec::new();
    for at in finder.find_iter(bytes) {
        let start = at + SECTION_ID_PREFIX.len();
        let Some(len) = memchr(b'"', &bytes[start..]) else {
            break;
        };
        let id = &fragment[start..start + len];
        if !id.is_empty() && !ids.iter().any(|seen| seen == id) {
            ids.push(id.to_string());
        }
    }
    ids
}

/// Markers for `configured` section ids followed by any `discovered` ones not
/// already listed.
pub fn section_markers<S: AsRef<str>>(configured: &[S], discovered: &[String]) -> Vec<CallMarker> {
    let mut ids: Vec<&str> = Vec::with_capacity(configured.len() + discovered.len());
    for id in configured
        .iter()
        .map(AsRef::as_ref)
        .chain(discovered.iter().map(String::as_str))
    {
        if !id.is_empty() && !ids.contains(&id) {
            ids.push(id);
        }
    }
    ids.into_iter().map(CallMarker::for_section).collect()
}

/// Remove every exact occurrence of each marker.
pub fn neutralize(fragment: &str, markers: &[CallMarker]) -> String {
    let mut current = fragment.to_string();
    for marker in markers {
        let literal = marker.as_str();
        if literal.is_empty() {
            continue;
        }
        let hits = memmem::find_iter(current.as_bytes(), literal.as_bytes()).count();
        if hits == 0 {
            continue;
        }
        debug!(marker = literal, hits, "removed call marker");
        current = current.replace(literal, "");
    }
    current
}
