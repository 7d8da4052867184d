//! GitHub REST API response shapes
//!
//! Every payload crossing the trust boundary is deserialized into these
//! structs before anything reaches the pipeline. Unknown fields are ignored;
//! missing required fields fail deserialization and surface as a transport
//! error.

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::Deserialize;
use std::sync::LazyLock;

/// Regex for pull-request back-references in commit messages
static PR_REF_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#(\d+)").expect("Invalid regex"));

/// Response of `GET /repos/{owner}/{repo}/compare/{base}...{head}`
#[derive(Debug, Deserialize)]
pub struct CompareResponse {
    pub total_commits: usize,
    pub commits: Vec<CommitItem>,
}

/// One commit in a compare response
#[derive(Debug, Deserialize)]
pub struct CommitItem {
    pub sha: String,
    pub commit: CommitDetail,
    pub author: Option<UserRef>,
    #[serde(default)]
    pub parents: Vec<ParentRef>,
}

impl CommitItem {
    /// First line of the commit message
    pub fn summary(&self) -> &str {
        self.commit.message.lines().next().unwrap_or("")
    }

    /// Merge commits have more than one parent or a "Merge " summary
    pub fn is_merge(&self) -> bool {
        self.parents.len() > 1 || self.summary().starts_with("Merge ")
    }

    /// Pull request numbers referenced in the commit summary
    pub fn referenced_prs(&self) -> Vec<u64> {
        extract_pr_numbers(self.summary())
    }
}

#[derive(Debug, Deserialize)]
pub struct CommitDetail {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct UserRef {
    pub login: String,
}

#[derive(Debug, Deserialize)]
pub struct ParentRef {
    pub sha: String,
}

/// Response of `GET /repos/{owner}/{repo}/pulls/{number}`
#[derive(Debug, Deserialize)]
pub struct PullRequest {
    pub number: u64,
    pub title: String,
    pub user: Option<UserRef>,
    #[serde(default)]
    pub labels: Vec<Label>,
    pub merged_at: Option<DateTime<Utc>>,
}

impl PullRequest {
    pub fn is_merged(&self) -> bool {
        self.merged_at.is_some()
    }

    pub fn label_names(&self) -> Vec<String> {
        self.labels.iter().map(|l| l.name.clone()).collect()
    }
}

#[derive(Debug, Deserialize)]
pub struct Label {
    pub name: String,
}

/// One release from `GET /repos/{owner}/{repo}/releases`
#[derive(Debug, Deserialize)]
pub struct Release {
    pub tag_name: String,
    pub name: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub prerelease: bool,
}

/// One tag from `GET /repos/{owner}/{repo}/tags`
#[derive(Debug, Deserialize)]
pub struct Tag {
    pub name: String,
    pub commit: Option<TagCommit>,
}

#[derive(Debug, Deserialize)]
pub struct TagCommit {
    pub sha: String,
}

/// Extract all `#<digits>` references from a message line
pub fn extract_pr_numbers(message: &str) -> Vec<u64> {
    PR_REF_REGEX
        .captures_iter(message)
        .filter_map(|caps| caps.get(1).and_then(|m| m.as_str().parse().ok()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_commit(sha: &str, message: &str, parents: usize) -> CommitItem {
        CommitItem {
            sha: sha.to_string(),
            commit: CommitDetail {
                message: message.to_string(),
            },
            author: None,
            parents: (0..parents)
                .map(|i| ParentRef {
                    sha: format!("parent{}", i),
                })
                .collect(),
        }
    }

    #[test]
    fn test_extract_pr_numbers() {
        assert_eq!(extract_pr_numbers("feat: add thing (#42)"), vec![42]);
        assert_eq!(extract_pr_numbers("Merge pull request #7 from x"), vec![7]);
        assert_eq!(extract_pr_numbers("fix #1 and #2"), vec![1, 2]);
        assert!(extract_pr_numbers("no references here").is_empty());
    }

    #[test]
    fn test_summary_is_first_line() {
        let commit = make_commit("abc", "feat: thing\n\nlong body (#99)", 1);
        assert_eq!(commit.summary(), "feat: thing");
        assert!(commit.referenced_prs().is_empty());
    }

    #[test]
    fn test_merge_detection() {
        assert!(make_commit("a", "Merge pull request #5", 1).is_merge());
        assert!(make_commit("b", "feat: octopus", 2).is_merge());
        assert!(!make_commit("c", "feat: normal", 1).is_merge());
    }

    #[test]
    fn test_compare_response_deserialization() {
        let json = r#"{
            "total_commits": 2,
            "commits": [
                {
                    "sha": "abc123",
                    "commit": { "message": "fix: bug (#10)" },
                    "author": { "login": "dev1" },
                    "parents": [{ "sha": "p1" }]
                },
                {
                    "sha": "def456",
                    "commit": { "message": "plain commit" },
                    "author": null,
                    "parents": [{ "sha": "p2" }]
                }
            ]
        }"#;

        let resp: CompareResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.total_commits, 2);
        assert_eq!(resp.commits[0].referenced_prs(), vec![10]);
        assert_eq!(resp.commits[0].author.as_ref().unwrap().login, "dev1");
        assert!(resp.commits[1].author.is_none());
    }

    #[test]
    fn test_pull_request_merged_state() {
        let json = r#"{
            "number": 10,
            "title": "fix: bug",
            "user": { "login": "dev1" },
            "labels": [{ "name": "bug" }],
            "merged_at": "2025-01-15T10:00:00Z"
        }"#;
        let pr: PullRequest = serde_json::from_str(json).unwrap();
        assert!(pr.is_merged());
        assert_eq!(pr.label_names(), vec!["bug"]);

        let json = r#"{ "number": 11, "title": "open", "user": null, "merged_at": null }"#;
        let pr: PullRequest = serde_json::from_str(json).unwrap();
        assert!(!pr.is_merged());
        assert!(pr.label_names().is_empty());
    }
}
