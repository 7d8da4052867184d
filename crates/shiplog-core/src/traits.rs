//! Collaborator ports implemented by infrastructure crates

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{Category, CompareResult, ReleaseEntry, TagEntry};

/// Source of change history for a repository.
///
/// The pipeline depends on this trait only; `shiplog-github` provides the
/// REST-backed implementation.
#[async_trait]
pub trait ChangeSource: Send + Sync {
    /// Compare two refs, returning normalized change records and the total
    /// commit count in the range.
    async fn compare(
        &self,
        owner: &str,
        repo: &str,
        from_ref: &str,
        to_ref: &str,
    ) -> Result<CompareResult>;

    /// List published releases, most recent first.
    async fn list_releases(&self, owner: &str, repo: &str) -> Result<Vec<ReleaseEntry>>;

    /// List raw tags, most recent first.
    async fn list_tags(&self, owner: &str, repo: &str) -> Result<Vec<TagEntry>>;
}

/// Natural-language title classifier used by the refinement pass.
///
/// Best-effort: callers must treat a failure as "keep the existing
/// categorization", never as a pipeline error.
#[async_trait]
pub trait TitleClassifier: Send + Sync {
    /// Classify a batch of titles into the closed category set. Titles the
    /// classifier cannot place are absent from the result.
    async fn classify(&self, titles: &[String]) -> Result<Vec<(String, Category)>>;
}
