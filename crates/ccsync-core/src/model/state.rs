use std::path::PathBuf;

/// A JSON artifact written to the state directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateFile {
    pub name: String,
    pub path: PathBuf,
    pub content: String,
}
