// GitHub commit endpoints

use tracing::debug;

use crate::error::Error;
use crate::repo::client::RepoClient;
use crate::repo::models::{CommitInfo, CommitRef, CommitResponse};

impl RepoClient {
    /// Commit SHAs on the default branch, most recent first.
    ///
    /// `GET /repos/{owner}/{repo}/commits` -- a single page.
    pub async fn list_commit_ids(&self, owner: &str, repo: &str) -> Result<Vec<String>, Error> {
        let url = self.url(&["repos", owner, repo, "commits"])?;
        let commits: Vec<CommitRef> = self.get(url, &[]).await?;
        Ok(commits.into_iter().map(|c| c.sha).collect())
    }

    /// Author, date, message, URL and first-file patch of one commit.
    ///
    /// `GET /repos/{owner}/{repo}/commits/{sha}`
    pub async fn get_commit_info(
        &self,
        owner: &str,
        repo: &str,
        commit_id: &str,
    ) -> Result<CommitInfo, Error> {
        let url = self.url(&["repos", owner, repo, "commits", commit_id])?;
        debug!(commit_id, "fetching commit");
        let resp: CommitResponse = self.get(url, &[]).await?;
        Ok(resp.into())
    }
}
