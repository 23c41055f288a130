// ── Core error types ──
//
// Workflow-level failures. API errors pass through untouched so the binary
// can still tell an auth failure from a conflict when picking an exit code.

use std::path::PathBuf;

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error(transparent)]
    Api(#[from] ccsync_api::Error),

    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON error in {name}: {source}")]
    Json {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    /// A create task finished but the new object is still not listed.
    #[error("{kind} \"{name}\" is not visible on the controller after creation")]
    NotVisible { kind: &'static str, name: String },
}

impl CoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn json(name: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Json {
            name: name.into(),
            source,
        }
    }

    /// The underlying API error, if this is one.
    pub fn as_api(&self) -> Option<&ccsync_api::Error> {
        match self {
            Self::Api(e) => Some(e),
            _ => None,
        }
    }
}
