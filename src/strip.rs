// src/strip.rs
//
// Inline handler removal. A match is: one or more whitespace bytes, the
// attribute name, `="`, any non-quote bytes, then the closing `"`. The value
// match stops at the first closing quote; an unterminated value is left alone.

use memchr::{memchr, memmem};
use tracing::debug;

/// Handlers bound inline in the source document.
pub const DEFAULT_ATTRIBUTES: &[&str] = &["onclick", "onchange", "ondragstart"];

#[inline]
fn is_ws(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r' | b'\x0b' | b'\x0c')
}

/// One left-to-right pass. Returns the rewritten text and the number of
/// occurrences removed, or `None` if nothing matched.
fn strip_pass(s: &str, finder: &memmem::Finder<'_>) -> Option<(String, usize)> {
    let bytes = s.as_bytes();
    let needle_len = finder.needle().len();

    let mut out = String::new();
    let mut copied = 0usize;
    let mut pos = 0usize;
    let mut removed = 0usize;

    while let Some(off) = finder.find(&bytes[pos..]) {
        let at = pos + off;

        // Leading whitespace run; never reaches back into a previous match.
        let mut ws = at;
        while ws > copied && is_ws(bytes[ws - 1]) {
            ws -= 1;
        }
        if ws == at {
            pos = at + 1;
            continue;
        }

        let value = at + needle_len;
        let Some(q) = memchr(b'"', &bytes[value..]) else {
            // Any later occurrence would end in a quote past `value`.
            break;
        };
        let end = value + q + 1;

        if removed == 0 {
            out.reserve(s.len());
        }
        out.push_str(&s[copied..ws]);
        copied = end;
        pos = end;
        removed += 1;
    }

    if removed == 0 {
        return None;
    }
    out.push_str(&s[copied..]);
    Some((out, removed))
}

/// Remove every occurrence of the inline attribute `name`, repeating until
/// nothing matches. Running it again on its own output is a no-op.
pub fn strip_attribute(fragment: &str, name: &str) -> String {
    strip_counted(fragment, name).0
}

fn strip_counted(fragment: &str, name: &str) -> (String, usize) {
    if name.is_empty() {
        return (fragment.to_string(), 0);
    }
    let needle = format!("{name}=\"");
    let finder = memmem::Finder::new(needle.as_bytes());

    let mut current = fragment.to_string();
    let mut total = 0usize;
    while let Some((next, n)) = strip_pass(&current, &finder) {
        current = next;
        total += n;
    }
    (current, total)
}

/// Apply [`strip_attribute`] for each name in turn, repeating whole rounds
/// until one removes nothing. Removing one attribute can join text into a
/// match for another, so a single round is not enough.
pub fn strip_attributes<S: AsRef<str>>(fragment: &str, names: &[S]) -> String {
    let mut current = fragment.to_string();
    loop {
        let mut round = 0usize;
        for name in names {
            let name = name.as_ref();
            let (next, removed) = strip_counted(&current, name);
            if removed > 0 {
                debug!(attribute = name, removed, "stripped inline attribute");
            }
            round += removed;
            current = next;
        }
        if round == 0 {
            return current;
        }
    }
}
