// Provenance header prepended to every template pushed to the controller.
//
// The header is a Jinja comment block, so the controller's renderer ignores
// it, followed by a `!` line that IOS treats as a comment.

use ccsync_api::repo::CommitInfo;

const HEADER_OPEN: &str = "{#\nThis template has been pulled from GitHub.\nUploaded to Catalyst Center by GitHub_Sync App\n";
const HEADER_CLOSE: &str = "#}\n!\n";

/// Most recent commit whose first changed file is `file_name`.
///
/// `commits` must be ordered most recent first.
pub fn latest_commit_for<'a>(commits: &'a [CommitInfo], file_name: &str) -> Option<&'a CommitInfo> {
    commits
        .iter()
        .find(|c| c.filename.as_deref() == Some(file_name))
}

/// Header plus optional commit block plus the raw file content.
pub fn compose(commit: Option<&CommitInfo>, content: &str) -> String {
    let commit_block = commit.map_or_else(String::new, |c| {
        format!(
            "Author: {}\nDate: {}\nCommit message: {}\nCommit URL: {}\nCommit Diff: {}\n",
            c.author,
            c.date,
            c.message,
            c.url,
            c.diff.as_deref().unwrap_or_default()
        )
    });
    format!("{HEADER_OPEN}{commit_block}{HEADER_CLOSE}{content}")
}

/// The fixed opening of every composed template.
pub fn header_prefix() -> &'static str {
    HEADER_OPEN
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn commit(sha: &str, file: Option<&str>) -> CommitInfo {
        CommitInfo {
            sha: sha.into(),
            filename: file.map(Into::into),
            author: "dev@example.com".into(),
            date: "2024-05-01T10:00:00Z".into(),
            message: format!("commit {sha}"),
            url: format!("https://github.com/netops/templates-repo/commit/{sha}"),
            diff: Some("+vlan 20".into()),
        }
    }

    #[test]
    fn latest_commit_is_first_match_in_recency_order() {
        let commits = vec![
            commit("c3", Some("ntp.j2")),
            commit("c2", Some("vlan.txt")),
            commit("c1", Some("vlan.txt")),
            commit("c0", None),
        ];
        assert_eq!(latest_commit_for(&commits, "vlan.txt").map(|c| c.sha.as_str()), Some("c2"));
        assert!(latest_commit_for(&commits, "banner.txt").is_none());
    }

    #[test]
    fn compose_without_commit_is_bare_header() {
        let composed = compose(None, "vlan 10\n");
        assert_eq!(
            composed,
            "{#\nThis template has been pulled from GitHub.\nUploaded to Catalyst Center by GitHub_Sync App\n#}\n!\nvlan 10\n"
        );
    }

    #[test]
    fn compose_with_commit_lists_metadata_in_order() {
        let c = commit("c2", Some("vlan.txt"));
        let composed = compose(Some(&c), "vlan 20\n");

        assert!(composed.starts_with(header_prefix()));
        let block: Vec<&str> = composed
            .lines()
            .skip(3)
            .take(5)
            .collect();
        assert_eq!(
            block,
            vec![
                "Author: dev@example.com",
                "Date: 2024-05-01T10:00:00Z",
                "Commit message: commit c2",
                "Commit URL: https://github.com/netops/templates-repo/commit/c2",
                "Commit Diff: +vlan 20",
            ]
        );
        assert!(composed.ends_with("#}\n!\nvlan 20\n"));
    }

    #[test]
    fn compose_is_deterministic() {
        let c = commit("c2", Some("vlan.txt"));
        assert_eq!(compose(Some(&c), "x"), compose(Some(&c), "x"));
    }
}
