// src/lib.rs
//
// html-modularize: split a monolithic HTML document into a static-site shell.
//
// Pipeline, strictly in order:
//   1. extract    — slice between `<body>` and the first `<script>`, trimmed.
//   2. strip      — drop inline handler attributes (onclick, onchange, ondragstart).
//   3. neutralize — drop leftover `showSec('<id>',this)` calls.
//   4. assemble   — wrap the fragment in a shell linking main.css and src/main.js.
//
// `build` is pure. `run` adds the file boundary: the document is written to a
// temporary file beside the destination and renamed over it only once every
// byte is on disk, so a failed run never replaces the previous output.

pub mod assemble;
pub mod error;
pub mod extract;
pub mod neutralize;
pub mod strip;

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::{debug, info};

pub use assemble::Shell;
pub use error::BuildError;
pub use neutralize::CallMarker;

/// Everything `build` needs besides the source text.
#[derive(Clone, Debug)]
pub struct BuildConfig {
    pub body_marker: String,
    pub script_marker: String,
    /// Inline attributes to strip.
    pub attributes: Vec<String>,
    /// Section ids whose `showSec` calls are removed.
    pub sections: Vec<String>,
    /// Also remove calls for every `id="sec-<id>"` found in the fragment.
    pub discover_sections: bool,
    /// Literal call expressions removed in addition to the section markers.
    pub markers: Vec<CallMarker>,
    pub shell: Shell,
}

impl Default for BuildConfig {
    fn default() -> Self {
        BuildConfig {
            body_marker: extract::BODY_MARKER.to_string(),
            script_marker: extract::SCRIPT_MARKER.to_string(),
            attributes: strip::DEFAULT_ATTRIBUTES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            sections: neutralize::DEFAULT_SECTIONS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            discover_sections: true,
            markers: Vec::new(),
            shell: Shell::default(),
        }
    }
}

/// Transform `source` into the output document.
pub fn build(source: &str, config: &BuildConfig) -> Result<String, BuildError> {
    config.shell.validate()?;

    let fragment = extract::extract_fragment(source, &config.body_marker, &config.script_marker)?;
    let stripped = strip::strip_attributes(fragment, &config.attributes);

    let discovered = if config.discover_sections {
        neutralize::discover_sections(&stripped)
    } else {
        Vec::new()
    };
    let mut markers = neutralize::section_markers(&config.sections, &discovered);
    for marker in &config.markers {
        if !markers.contains(marker) {
            markers.push(marker.clone());
        }
    }
    debug!(
        configured = config.sections.len(),
        discovered = discovered.len(),
        markers = markers.len(),
        "resolved call markers"
    );
    let cleaned = neutralize::neutralize(&stripped, &markers);

    Ok(config.shell.render(&cleaned))
}

/// Read `input`, build, write `output`. Returns the output length in chars.
pub fn run(input: &Path, output: &Path, config: &BuildConfig) -> Result<usize, BuildError> {
    let source = fs::read_to_string(input).map_err(|e| BuildError::resource(input, e))?;
    debug!(path = %input.display(), bytes = source.len(), "read source document");

    let document = build(&source, config)?;

    replace_file(output, |file| file.write_all(document.as_bytes()))?;
    let chars = document.chars().count();
    info!(path = %output.display(), chars, "wrote output document");
    Ok(chars)
}

/// Fill a temporary file in `path`'s directory with `fill`, then rename it
/// over `path`. On any error the temporary file is removed and `path` is left
/// as it was.
fn replace_file<F>(path: &Path, fill: F) -> Result<(), BuildError>
where
    F: FnOnce(&mut fs::File) -> io::Result<()>,
{
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut temp = NamedTempFile::new_in(dir).map_err(|e| BuildError::resource(path, e))?;
    fill(temp.as_file_mut())
        .and_then(|()| temp.as_file().sync_all())
        .map_err(|e| BuildError::resource(path, e))?;
    debug!(temp = %temp.path().display(), "staged output document");
    temp.persist(path).map_err(|e| BuildError::resource(path, e.error))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body_of(doc: &str) -> &str {
        let start = doc.find("<body>\n").unwrap() + "<body>\n".len();
        let end = doc.find("\n<script type=\"module\"").unwrap();
        &doc[start..end]
    }

    #[test]
    fn end_to_end_example() {
        let src = r#"<html><body><div onclick="showSec('info',this)" class="x">Hi</div><script>var x=1;</script></body></html>"#;
        let out = build(src, &BuildConfig::default()).unwrap();
        assert_eq!(body_of(&out), r#"<div class="x">Hi</div>"#);
        assert_eq!(out, Shell::default().render(r#"<div class="x">Hi</div>"#));
    }

    #[test]
    fn stray_call_markers_are_removed() {
        let src = "<body>\n<nav><a>showSec('trust',this)Trust</a></nav>\n<script>";
        let out = build(src, &BuildConfig::default()).unwrap();
        assert_eq!(body_of(&out), "<nav><a>Trust</a></nav>");
    }

    #[test]
    fn discovery_can_be_disabled() {
        let src = r#"<body><b>showSec('flows',this)</b><div id="sec-flows"></div><script>"#;

        let out = build(src, &BuildConfig::default()).unwrap();
        assert!(!out.contains("showSec('flows',this)"));

        let config = BuildConfig {
            discover_sections: false,
            ..BuildConfig::default()
        };
        let out = build(src, &config).unwrap();
        assert!(out.contains("showSec('flows',this)"));
    }

    #[test]
    fn extra_attributes_are_stripped() {
        let src = r#"<body><div onmouseover="hi()" onclick="x()">a</div><script>"#;
        let mut config = BuildConfig::default();
        config.attributes.push("onmouseover".to_string());
        let out = build(src, &config).unwrap();
        assert_eq!(body_of(&out), "<div>a</div>");
    }

    #[test]
    fn extraction_errors_propagate() {
        let err = build("<script></script><body></body>", &BuildConfig::default()).unwrap_err();
        assert!(matches!(err, BuildError::MalformedOrdering { .. }));

        let err = build("<html></html>", &BuildConfig::default()).unwrap_err();
        assert!(matches!(err, BuildError::MarkerNotFound { .. }));
    }

    #[test]
    fn literal_markers_are_removed() {
        let src = "<body><a>toggleAll(true)All</a><a>showSec('info',this)Info</a><script>";
        let mut config = BuildConfig::default();
        config.markers.push(CallMarker::new("toggleAll(true)"));
        let out = build(src, &config).unwrap();
        assert_eq!(body_of(&out), "<a>All</a><a>Info</a>");
    }

    #[test]
    fn invalid_shell_is_rejected_before_extraction() {
        let mut config = BuildConfig::default();
        config.shell.title = "a</title><script>".to_string();
        let err = build("no markers at all", &config).unwrap_err();
        assert!(matches!(err, BuildError::InvalidShell { field: "title", .. }));
    }

    #[test]
    fn failed_fill_keeps_previous_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("index.html");
        fs::write(&path, "previous build").unwrap();

        let err = replace_file(&path, |file| {
            file.write_all(b"<!DOCTYPE html>\n<html lang=")?;
            Err(io::Error::new(io::ErrorKind::Other, "disk full"))
        })
        .unwrap_err();

        assert!(matches!(err, BuildError::ResourceUnavailable { .. }));
        assert_eq!(fs::read_to_string(&path).unwrap(), "previous build");
        let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1, "temporary file left behind");
    }

    #[test]
    fn failed_fill_creates_nothing() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("index.html");

        let result = replace_file(&path, |_| Err(io::Error::new(io::ErrorKind::Other, "boom")));
        assert!(result.is_err());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn replace_file_overwrites_on_success() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("index.html");
        fs::write(&path, "previous build").unwrap();

        replace_file(&path, |file| file.write_all(b"fresh")).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "fresh");
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn internal_whitespace_is_kept() {
        let src = "<body>\n\n  <header>\n    <h1>T</h1>\n  </header>\n\n  <main></main>\n  <script>";
        let out = build(src, &BuildConfig::default()).unwrap();
        assert_eq!(
            body_of(&out),
            "<header>\n    <h1>T</h1>\n  </header>\n\n  <main></main>"
        );
    }
}
