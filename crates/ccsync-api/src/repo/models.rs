// Wire types for the GitHub REST API, plus the two shapes the client hands
// back to callers (`CommitInfo`, `RemoteFile`).

use serde::{Deserialize, Serialize};

// ── Wire types ──────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub(crate) struct RepoSummary {
    pub name: String,
}

/// One entry of a directory listing (`GET /repos/{o}/{r}/contents`).
#[derive(Debug, Deserialize)]
pub(crate) struct ContentEntry {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// A single file fetched through the contents endpoint.
#[derive(Debug, Deserialize)]
pub(crate) struct ContentFile {
    pub name: String,
    pub path: String,
    pub sha: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub encoding: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CommitRef {
    pub sha: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CommitResponse {
    pub sha: String,
    pub html_url: String,
    pub commit: CommitData,
    #[serde(default)]
    pub files: Vec<ChangedFile>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CommitData {
    pub author: Option<GitActor>,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GitActor {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub date: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChangedFile {
    pub filename: String,
    /// Absent for binary files and very large diffs.
    #[serde(default)]
    pub patch: Option<String>,
}

/// Body of `PUT /repos/{o}/{r}/contents/{path}`.
#[derive(Debug, Serialize)]
pub(crate) struct PutContentRequest<'a> {
    pub message: &'a str,
    pub content: String,
    pub branch: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sha: Option<&'a str>,
}

// ── Public shapes ───────────────────────────────────────────────────

/// Metadata for one commit.
///
/// Only the first changed file of the commit is recorded. Multi-file
/// commits lose the filename and patch of every file after the first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitInfo {
    pub sha: String,
    /// First changed file, `None` for commits that touch no files.
    pub filename: Option<String>,
    pub author: String,
    pub date: String,
    pub message: String,
    pub url: String,
    pub diff: Option<String>,
}

impl From<CommitResponse> for CommitInfo {
    fn from(resp: CommitResponse) -> Self {
        let (author, date) = resp
            .commit
            .author
            .map(|a| (a.email, a.date))
            .unwrap_or_default();
        let first = resp.files.into_iter().next();
        let (filename, diff) = match first {
            Some(file) => (Some(file.filename), file.patch),
            None => (None, None),
        };
        Self {
            sha: resp.sha,
            filename,
            author,
            date,
            message: resp.commit.message,
            url: resp.html_url,
            diff,
        }
    }
}

/// A file that exists in the remote repository, with its decoded body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteFile {
    pub name: String,
    pub path: String,
    /// Blob SHA, required as the concurrency token for updates.
    pub sha: String,
    pub content: String,
}
