// src/error.rs

use std::io;
use std::path::PathBuf;

/// Everything that can stop a build. None of these are recoverable: the
/// caller reports and exits without touching the destination.
#[derive(thiserror::Error, Debug)]
pub enum BuildError {
    #[error("cannot access {}: {source}", path.display())]
    ResourceUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("marker {marker:?} not found in source document")]
    MarkerNotFound { marker: String },

    #[error("script marker at byte {script_at} does not follow body marker at byte {body_at}")]
    MalformedOrdering { body_at: usize, script_at: usize },

    #[error("shell {field} {value:?} cannot be spliced into the document unescaped")]
    InvalidShell { field: &'static str, value: String },
}

impl BuildError {
    pub(crate) fn resource(path: impl Into<PathBuf>, source: io::Error) -> Self {
        BuildError::ResourceUnavailable {
            path: path.into(),
            source,
        }
    }
}
