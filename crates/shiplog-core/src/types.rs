//! Pipeline data model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One unit of history: a commit or a merged pull request.
///
/// PR-sourced records carry labels and supersede the raw commits they cover;
/// commit-sourced records have neither a PR number nor labels.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawChange {
    /// Commit hash (present for commit-sourced records)
    pub sha: Option<String>,
    /// Pull request number (present for PR-sourced records)
    pub pr_number: Option<u64>,
    /// Original title or commit summary line
    pub title: String,
    /// Author display handle
    pub author: Option<String>,
    /// Labels attached to the pull request
    pub labels: Vec<String>,
}

impl RawChange {
    /// Create a commit-sourced record
    pub fn from_commit(sha: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            sha: Some(sha.into()),
            pr_number: None,
            title: title.into(),
            author: None,
            labels: Vec::new(),
        }
    }

    /// Create a PR-sourced record
    pub fn from_pull_request(number: u64, title: impl Into<String>) -> Self {
        Self {
            sha: None,
            pr_number: Some(number),
            title: title.into(),
            author: None,
            labels: Vec::new(),
        }
    }

    /// Set the author handle
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Set the labels
    pub fn with_labels(mut self, labels: Vec<String>) -> Self {
        self.labels = labels;
        self
    }
}

/// Result of comparing two refs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompareResult {
    /// Normalized change records, in original commit order
    pub changes: Vec<RawChange>,
    /// Total commits in the compare range (before PR collapsing)
    pub total_commits: usize,
}

/// Fixed changelog category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Incompatible API or behavior change
    Breaking,
    /// New feature
    Features,
    /// Bug fix
    Fixes,
    /// Performance improvement
    Performance,
    /// Documentation
    Docs,
    /// Everything else
    Other,
}

impl Category {
    /// All categories in rendering order
    pub const ORDERED: [Category; 6] = [
        Self::Breaking,
        Self::Features,
        Self::Fixes,
        Self::Performance,
        Self::Docs,
        Self::Other,
    ];

    /// Section heading shown in rendered markdown
    pub fn section_title(&self) -> &'static str {
        match self {
            Self::Breaking => "⚠️ Breaking Changes",
            Self::Features => "✨ New Features",
            Self::Fixes => "🐛 Bug Fixes",
            Self::Performance => "⚡ Performance",
            Self::Docs => "📚 Documentation",
            Self::Other => "🔧 Other Changes",
        }
    }

    /// Wire name used in the classifier contract
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Breaking => "breaking",
            Self::Features => "features",
            Self::Fixes => "fixes",
            Self::Performance => "performance",
            Self::Docs => "docs",
            Self::Other => "other",
        }
    }
}

impl std::str::FromStr for Category {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "breaking" => Ok(Self::Breaking),
            "features" | "feature" => Ok(Self::Features),
            "fixes" | "fix" => Ok(Self::Fixes),
            "performance" | "perf" => Ok(Self::Performance),
            "docs" | "documentation" => Ok(Self::Docs),
            "other" => Ok(Self::Other),
            _ => Err(()),
        }
    }
}

/// One release from the release listing source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReleaseEntry {
    /// Git tag the release points at (non-empty, unique within a listing)
    pub tag_name: String,
    /// Human release name, when it differs from the tag
    pub display_name: Option<String>,
    /// Publication date
    pub date: Option<DateTime<Utc>>,
    /// Pre-release flag
    pub prerelease: bool,
}

/// One tag from the raw tag listing source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagEntry {
    /// Tag name
    pub name: String,
    /// Abbreviated commit hash the tag points at
    pub short_sha: Option<String>,
}
