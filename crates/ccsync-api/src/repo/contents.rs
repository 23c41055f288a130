// GitHub contents endpoints
//
// Directory listing, single-file fetch with base64 decoding, and the
// create/update call. Updates must carry the current blob SHA; GitHub
// answers 409 when that token is stale.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use tracing::debug;

use crate::error::Error;
use crate::lookup::Lookup;
use crate::repo::client::RepoClient;
use crate::repo::models::{ContentEntry, ContentFile, PutContentRequest, RemoteFile};

impl RepoClient {
    /// Names of the regular files at the top level of `repo`.
    ///
    /// `GET /repos/{owner}/{repo}/contents` -- not recursive; directories,
    /// symlinks and submodules are skipped.
    pub async fn list_files(&self, owner: &str, repo: &str) -> Result<Vec<String>, Error> {
        let url = self.url(&["repos", owner, repo, "contents"])?;
        let entries: Vec<ContentEntry> = self.get(url, &[]).await?;
        Ok(entries
            .into_iter()
            .filter_map(|entry| {
                if entry.kind == "file" {
                    Some(entry.name)
                } else {
                    debug!(name = %entry.name, kind = %entry.kind, "skipping non-file entry");
                    None
                }
            })
            .collect())
    }

    /// Decoded content of `filename`.
    ///
    /// `GET /repos/{owner}/{repo}/contents/{filename}`
    pub async fn get_file_content(
        &self,
        owner: &str,
        repo: &str,
        filename: &str,
    ) -> Result<String, Error> {
        let file = self.fetch_file(owner, repo, filename, None).await?;
        decode_content(&file)
    }

    /// Fetch `filename` from the configured branch if it exists there.
    ///
    /// 404 is `Lookup::Absent`; any other failure is returned as an error
    /// so auth and transport problems are never mistaken for a missing file.
    pub async fn probe_file(
        &self,
        owner: &str,
        repo: &str,
        filename: &str,
    ) -> Result<Lookup<RemoteFile>, Error> {
        match self.fetch_file(owner, repo, filename, Some(self.branch())).await {
            Ok(file) => {
                let content = decode_content(&file)?;
                Ok(Lookup::Found(RemoteFile {
                    name: file.name,
                    path: file.path,
                    sha: file.sha,
                    content,
                }))
            }
            Err(e) if e.is_not_found() => Ok(Lookup::Absent),
            Err(e) => Err(e),
        }
    }

    /// Create or update `filename` on the configured branch.
    ///
    /// `PUT /repos/{owner}/{repo}/contents/{filename}`. With `is_update`
    /// the current blob SHA is resolved first and sent as the concurrency
    /// token; a concurrent change makes the call fail with
    /// [`Error::Conflict`].
    pub async fn push_file(
        &self,
        owner: &str,
        repo: &str,
        filename: &str,
        message: &str,
        content: &str,
        is_update: bool,
    ) -> Result<(), Error> {
        let current_sha = if is_update {
            let existing = self
                .fetch_file(owner, repo, filename, Some(self.branch()))
                .await?;
            Some(existing.sha)
        } else {
            None
        };

        let body = PutContentRequest {
            message,
            content: STANDARD.encode(content),
            branch: self.branch(),
            sha: current_sha.as_deref(),
        };

        debug!(filename, is_update, "pushing file");
        let url = self.url(&["repos", owner, repo, "contents", filename])?;
        let _: serde_json::Value = self.put(url, &body).await?;
        Ok(())
    }

    async fn fetch_file(
        &self,
        owner: &str,
        repo: &str,
        filename: &str,
        git_ref: Option<&str>,
    ) -> Result<ContentFile, Error> {
        let url = self.url(&["repos", owner, repo, "contents", filename])?;
        match git_ref {
            Some(r) => self.get(url, &[("ref", r)]).await,
            None => self.get(url, &[]).await,
        }
    }
}

/// Decode a contents-API payload, honouring the reported encoding.
///
/// GitHub wraps base64 at 60 columns, so whitespace is stripped first.
fn decode_content(file: &ContentFile) -> Result<String, Error> {
    let raw = file.content.clone().unwrap_or_default();
    if file.encoding.as_deref() != Some("base64") {
        return Ok(raw);
    }

    let compact: String = raw.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    let bytes = STANDARD
        .decode(compact)
        .map_err(|e| Error::Encoding(format!("{}: invalid base64: {e}", file.path)))?;
    String::from_utf8(bytes)
        .map_err(|e| Error::Encoding(format!("{}: not UTF-8: {e}", file.path)))
}
