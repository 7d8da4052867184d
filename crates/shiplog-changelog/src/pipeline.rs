//! Changelog pipeline orchestration

use std::sync::Arc;

use tracing::{info, instrument, warn};

use shiplog_core::{ChangeSource, PipelineConfig, SourceError, TitleClassifier};

use crate::categorize::{categorize, refine_other};
use crate::render::render_changelog;
use crate::tags::{render_releases, render_tags};
use crate::types::CategorizedChange;

/// End-to-end changelog pipeline.
///
/// Both entry points always return markdown text: upstream failures are
/// rendered as user-facing messages rather than propagated.
pub struct ChangelogPipeline {
    source: Arc<dyn ChangeSource>,
    classifier: Option<Arc<dyn TitleClassifier>>,
    config: PipelineConfig,
}

impl ChangelogPipeline {
    /// Create a pipeline over a change source
    pub fn new(source: Arc<dyn ChangeSource>) -> Self {
        Self {
            source,
            classifier: None,
            config: PipelineConfig::default(),
        }
    }

    /// Enable the classification refinement pass
    pub fn with_classifier(mut self, classifier: Arc<dyn TitleClassifier>) -> Self {
        self.classifier = Some(classifier);
        self
    }

    /// Override pipeline tunables
    pub fn with_config(mut self, config: PipelineConfig) -> Self {
        self.config = config;
        self
    }

    /// Generate a categorized changelog for a compare range
    #[instrument(skip(self))]
    pub async fn generate(
        &self,
        owner: &str,
        repo: &str,
        from_ref: &str,
        to_ref: &str,
    ) -> String {
        let compare = match self.source.compare(owner, repo, from_ref, to_ref).await {
            Ok(compare) => compare,
            Err(err) => return failure_message(owner, repo, from_ref, to_ref, &err),
        };

        info!(
            changes = compare.changes.len(),
            total_commits = compare.total_commits,
            "compare range resolved"
        );

        let mut entries: Vec<CategorizedChange> = compare
            .changes
            .into_iter()
            .map(|change| {
                let category = categorize(&change.title, &change.labels);
                CategorizedChange::new(change, category)
            })
            .collect();

        if let Some(classifier) = &self.classifier {
            refine_other(&mut entries, classifier.as_ref(), &self.config).await;
        }

        render_changelog(
            owner,
            repo,
            from_ref,
            to_ref,
            &entries,
            compare.total_commits,
        )
    }

    /// List releases (falling back to raw tags) with a suggested ref pair
    #[instrument(skip(self))]
    pub async fn list_tags(&self, owner: &str, repo: &str) -> String {
        match self.source.list_releases(owner, repo).await {
            Ok(releases) if !releases.is_empty() => {
                return render_releases(owner, repo, &releases);
            }
            Ok(_) => {}
            Err(err) => {
                warn!(%err, "release listing unavailable, falling back to tags");
            }
        }

        match self.source.list_tags(owner, repo).await {
            Ok(tags) => render_tags(owner, repo, &tags),
            Err(err) => format!(
                "Could not list releases or tags for {}/{}: {}",
                owner, repo, err
            ),
        }
    }
}

/// Render a top-level comparison failure as a user-facing message
fn failure_message(
    owner: &str,
    repo: &str,
    from_ref: &str,
    to_ref: &str,
    err: &SourceError,
) -> String {
    match err {
        SourceError::NotFound { resource } => format!(
            "Could not generate a changelog: {} was not found.\n\
             Check that the repository {}/{} exists and that both refs \
             ({} and {}) are valid tags, branches, or commit SHAs.",
            resource, owner, repo, from_ref, to_ref
        ),
        SourceError::RateLimited { reset } => {
            let when = reset
                .map(|r| format!(" Quota resets at {}.", r.format("%Y-%m-%d %H:%M:%S UTC")))
                .unwrap_or_default();
            format!(
                "Could not generate a changelog: the GitHub API rate limit is exhausted.{}",
                when
            )
        }
        SourceError::Upstream { status, message } => format!(
            "Could not generate a changelog: GitHub returned status {}.\n{}",
            status, message
        ),
        SourceError::Transport(detail) => format!(
            "Could not generate a changelog: request failed ({}).",
            detail
        ),
    }
}
