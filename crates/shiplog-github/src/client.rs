//! GitHub REST API client

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::DateTime;
use futures::stream::{self, StreamExt};
use reqwest::{Client, Response, StatusCode};
use tracing::{debug, instrument, warn};

use shiplog_core::{
    ChangeSource, CompareResult, GithubConfig, RawChange, ReleaseEntry, Result, SourceError,
    TagEntry,
};

use crate::wire::{CompareResponse, PullRequest, Release, Tag};

const USER_AGENT: &str = concat!("shiplog/", env!("CARGO_PKG_VERSION"));
const COMPARE_PER_PAGE: usize = 250;
const LISTING_PER_PAGE: usize = 20;

/// REST-backed implementation of [`ChangeSource`]
pub struct GithubSource {
    config: GithubConfig,
    client: Client,
    /// Maximum concurrent pull-request lookups
    pr_batch_size: usize,
}

impl GithubSource {
    /// Create a new client
    pub fn new(config: GithubConfig) -> Self {
        Self {
            config,
            client: Client::new(),
            pr_batch_size: 10,
        }
    }

    /// Override the PR lookup batch size
    pub fn with_pr_batch_size(mut self, size: usize) -> Self {
        self.pr_batch_size = size.max(1);
        self
    }

    /// Issue a GET against the API and map failure statuses into the
    /// source error taxonomy.
    async fn get(&self, path: &str, resource: &str) -> Result<Response> {
        let url = format!("{}/{}", self.config.api_base.trim_end_matches('/'), path);

        let mut request = self
            .client
            .get(&url)
            .header("User-Agent", USER_AGENT)
            .header("Accept", "application/vnd.github+json");

        if let Some(token) = &self.config.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| SourceError::Transport(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        if status == StatusCode::NOT_FOUND {
            return Err(SourceError::not_found(resource));
        }

        if matches!(status, StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS)
            && rate_limit_exhausted(&response)
        {
            let reset = rate_limit_reset(&response);
            return Err(SourceError::RateLimited { reset });
        }

        let message = response.text().await.unwrap_or_default();
        Err(SourceError::Upstream {
            status: status.as_u16(),
            message,
        })
    }

    /// Fetch a single pull request, returning it only when merged.
    ///
    /// Individual lookup failures are dropped, never fatal.
    async fn fetch_merged_pr(&self, owner: &str, repo: &str, number: u64) -> Option<PullRequest> {
        let path = format!("repos/{}/{}/pulls/{}", owner, repo, number);
        let resource = format!("{}/{}#{}", owner, repo, number);

        let response = match self.get(&path, &resource).await {
            Ok(r) => r,
            Err(err) => {
                debug!(number, %err, "pull request lookup failed, dropping");
                return None;
            }
        };

        let pr: PullRequest = match response.json().await {
            Ok(pr) => pr,
            Err(err) => {
                warn!(number, %err, "malformed pull request payload, dropping");
                return None;
            }
        };

        pr.is_merged().then_some(pr)
    }

    /// Resolve the distinct PR numbers referenced by the compare range, in
    /// bounded concurrent batches. Result order follows input order.
    async fn resolve_prs(
        &self,
        owner: &str,
        repo: &str,
        numbers: &[u64],
    ) -> HashMap<u64, PullRequest> {
        let lookups = stream::iter(numbers.iter().copied())
            .map(|n| self.fetch_merged_pr(owner, repo, n))
            .buffered(self.pr_batch_size)
            .collect::<Vec<_>>()
            .await;

        lookups
            .into_iter()
            .flatten()
            .map(|pr| (pr.number, pr))
            .collect()
    }
}

#[async_trait]
impl ChangeSource for GithubSource {
    #[instrument(skip(self))]
    async fn compare(
        &self,
        owner: &str,
        repo: &str,
        from_ref: &str,
        to_ref: &str,
    ) -> Result<CompareResult> {
        let path = format!(
            "repos/{}/{}/compare/{}...{}?per_page={}",
            owner, repo, from_ref, to_ref, COMPARE_PER_PAGE
        );
        let resource = format!("{}/{} {}...{}", owner, repo, from_ref, to_ref);

        let response = self.get(&path, &resource).await?;
        let compare: CompareResponse = response
            .json()
            .await
            .map_err(|e| SourceError::Transport(e.to_string()))?;

        debug!(
            total_commits = compare.total_commits,
            page_commits = compare.commits.len(),
            "compare range fetched"
        );

        // Distinct PR numbers in first-seen order.
        let mut pr_numbers = Vec::new();
        for commit in &compare.commits {
            for number in commit.referenced_prs() {
                if !pr_numbers.contains(&number) {
                    pr_numbers.push(number);
                }
            }
        }

        let resolved = self.resolve_prs(owner, repo, &pr_numbers).await;
        debug!(
            referenced = pr_numbers.len(),
            resolved = resolved.len(),
            "pull requests resolved"
        );

        // Walk commits in original order. A resolved PR is emitted at the
        // position of the first commit that references it and supersedes
        // every commit covering it; leftover commits fall back to commit
        // records, excluding merges.
        let mut changes = Vec::new();
        let mut emitted_prs = std::collections::HashSet::new();

        for commit in &compare.commits {
            let refs = commit.referenced_prs();
            let covered = refs.iter().any(|n| resolved.contains_key(n));

            if covered {
                for number in refs {
                    if let Some(pr) = resolved.get(&number) {
                        if emitted_prs.insert(number) {
                            let mut change =
                                RawChange::from_pull_request(pr.number, pr.title.clone())
                                    .with_labels(pr.label_names());
                            if let Some(user) = &pr.user {
                                change = change.with_author(user.login.clone());
                            }
                            changes.push(change);
                        }
                    }
                }
                continue;
            }

            if commit.is_merge() {
                continue;
            }

            let mut change = RawChange::from_commit(commit.sha.clone(), commit.summary());
            if let Some(author) = &commit.author {
                change = change.with_author(author.login.clone());
            }
            changes.push(change);
        }

        Ok(CompareResult {
            changes,
            total_commits: compare.total_commits,
        })
    }

    #[instrument(skip(self))]
    async fn list_releases(&self, owner: &str, repo: &str) -> Result<Vec<ReleaseEntry>> {
        let path = format!(
            "repos/{}/{}/releases?per_page={}",
            owner, repo, LISTING_PER_PAGE
        );
        let resource = format!("{}/{} releases", owner, repo);

        let response = self.get(&path, &resource).await?;
        let releases: Vec<Release> = response
            .json()
            .await
            .map_err(|e| SourceError::Transport(e.to_string()))?;

        Ok(releases
            .into_iter()
            .map(|r| {
                let display_name = r.name.filter(|n| !n.is_empty() && *n != r.tag_name);
                ReleaseEntry {
                    tag_name: r.tag_name,
                    display_name,
                    date: r.published_at,
                    prerelease: r.prerelease,
                }
            })
            .collect())
    }

    #[instrument(skip(self))]
    async fn list_tags(&self, owner: &str, repo: &str) -> Result<Vec<TagEntry>> {
        let path = format!("repos/{}/{}/tags?per_page={}", owner, repo, LISTING_PER_PAGE);
        let resource = format!("{}/{} tags", owner, repo);

        let response = self.get(&path, &resource).await?;
        let tags: Vec<Tag> = response
            .json()
            .await
            .map_err(|e| SourceError::Transport(e.to_string()))?;

        Ok(tags
            .into_iter()
            .map(|t| TagEntry {
                name: t.name,
                short_sha: t.commit.map(|c| c.sha.chars().take(7).collect()),
            })
            .collect())
    }
}

/// True when the rate-limit quota headers indicate exhaustion
fn rate_limit_exhausted(response: &Response) -> bool {
    response
        .headers()
        .get("x-ratelimit-remaining")
        .and_then(|v| v.to_str().ok())
        .map(|v| v == "0")
        .unwrap_or(false)
}

/// Reset instant from the epoch-seconds rate-limit header
fn rate_limit_reset(response: &Response) -> Option<chrono::DateTime<chrono::Utc>> {
    response
        .headers()
        .get("x-ratelimit-reset")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<i64>().ok())
        .and_then(|secs| DateTime::from_timestamp(secs, 0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_size_floor() {
        let source = GithubSource::new(GithubConfig::default()).with_pr_batch_size(0);
        assert_eq!(source.pr_batch_size, 1);
    }

    #[test]
    fn test_user_agent_includes_version() {
        assert!(USER_AGENT.starts_with("shiplog/"));
    }
}
