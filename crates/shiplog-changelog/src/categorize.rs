//! Rule-based change categorization
//!
//! Deterministic first-match-wins rules over PR labels and title prefixes,
//! with an optional best-effort refinement pass over the `Other` bucket via
//! a natural-language classifier.

use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

use tracing::{debug, info, warn};

use shiplog_core::{Category, PipelineConfig, TitleClassifier};

use crate::types::CategorizedChange;

static BREAKING_TITLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^breaking[\s(:!]").expect("Invalid regex"));
static FEAT_TITLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^feat[\s(:]").expect("Invalid regex"));
static FIX_TITLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^fix[\s(:]").expect("Invalid regex"));
static PERF_TITLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^perf[\s(:]").expect("Invalid regex"));
static DOCS_TITLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^docs?[\s(:]").expect("Invalid regex"));

/// Assign a category to a change. Rule order is fixed: breaking wins over
/// features, features over fixes, and so on down to `Other`.
pub fn categorize(title: &str, labels: &[String]) -> Category {
    let label_has = |needles: &[&str]| {
        labels.iter().any(|label| {
            let lower = label.to_lowercase();
            needles.iter().any(|n| lower.contains(n))
        })
    };

    if label_has(&["breaking"]) || BREAKING_TITLE.is_match(title) {
        Category::Breaking
    } else if label_has(&["feature", "enhancement", "feat"]) || FEAT_TITLE.is_match(title) {
        Category::Features
    } else if label_has(&["bug", "fix", "hotfix"]) || FIX_TITLE.is_match(title) {
        Category::Fixes
    } else if label_has(&["perf", "performance"]) || PERF_TITLE.is_match(title) {
        Category::Performance
    } else if label_has(&["doc", "documentation"]) || DOCS_TITLE.is_match(title) {
        Category::Docs
    } else {
        Category::Other
    }
}

/// True when enough of the batch landed in `Other` to justify a
/// classification round trip.
pub fn should_refine(entries: &[CategorizedChange], config: &PipelineConfig) -> bool {
    let total = entries.len();
    if total <= config.refine_min_entries {
        return false;
    }
    let other = entries
        .iter()
        .filter(|e| e.category == Category::Other)
        .count();
    other * 100 > total * config.refine_threshold_percent
}

/// Re-classify `Other` entries through the natural-language classifier.
///
/// Best-effort: any failure leaves the rule-based categorization standing.
/// Only entries currently in `Other` whose exact title appears in the
/// response are overwritten.
pub async fn refine_other(
    entries: &mut [CategorizedChange],
    classifier: &dyn TitleClassifier,
    config: &PipelineConfig,
) {
    if !should_refine(entries, config) {
        debug!("refinement threshold not met, skipping");
        return;
    }

    let titles: Vec<String> = entries
        .iter()
        .filter(|e| e.category == Category::Other)
        .map(|e| e.change.title.clone())
        .collect();

    info!(count = titles.len(), "refining uncategorized entries");

    let classified = match classifier.classify(&titles).await {
        Ok(classified) => classified,
        Err(err) => {
            warn!(%err, "classification refinement failed, keeping rule-based categories");
            return;
        }
    };

    let by_title: HashMap<String, Category> = classified.into_iter().collect();

    let mut reassigned = 0;
    for entry in entries.iter_mut() {
        if entry.category != Category::Other {
            continue;
        }
        if let Some(category) = by_title.get(&entry.change.title) {
            if *category != Category::Other {
                entry.category = *category;
                reassigned += 1;
            }
        }
    }

    debug!(reassigned, "refinement pass applied");
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use shiplog_core::{RawChange, Result, SourceError};

    fn labels(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_title_prefix_rules() {
        assert_eq!(categorize("feat: add thing", &[]), Category::Features);
        assert_eq!(categorize("feat(scope): add thing", &[]), Category::Features);
        assert_eq!(categorize("fix: broken thing", &[]), Category::Fixes);
        assert_eq!(categorize("perf: faster thing", &[]), Category::Performance);
        assert_eq!(categorize("docs: explain thing", &[]), Category::Docs);
        assert_eq!(categorize("doc: explain thing", &[]), Category::Docs);
        assert_eq!(categorize("breaking: remove thing", &[]), Category::Breaking);
        assert_eq!(categorize("breaking! gone", &[]), Category::Breaking);
        assert_eq!(categorize("random commit", &[]), Category::Other);
    }

    #[test]
    fn test_label_rules_are_case_insensitive() {
        assert_eq!(categorize("anything", &labels(&["Bug"])), Category::Fixes);
        assert_eq!(
            categorize("anything", &labels(&["Enhancement"])),
            Category::Features
        );
        assert_eq!(
            categorize("anything", &labels(&["Performance"])),
            Category::Performance
        );
        assert_eq!(
            categorize("anything", &labels(&["documentation"])),
            Category::Docs
        );
    }

    #[test]
    fn test_breaking_precedes_features() {
        // Breaking check runs before the features check
        assert_eq!(
            categorize("breaking: remove legacy API", &labels(&["enhancement"])),
            Category::Breaking
        );
    }

    #[test]
    fn test_prefix_requires_delimiter() {
        assert_eq!(categorize("feature flags everywhere", &[]), Category::Other);
        assert_eq!(categorize("fixture cleanup", &[]), Category::Other);
    }

    fn make_entries(other: usize, features: usize) -> Vec<CategorizedChange> {
        let mut entries = Vec::new();
        for i in 0..other {
            entries.push(CategorizedChange::new(
                RawChange::from_commit(format!("sha{i}"), format!("misc change {i}")),
                Category::Other,
            ));
        }
        for i in 0..features {
            entries.push(CategorizedChange::new(
                RawChange::from_commit(format!("feat{i}"), format!("feat: thing {i}")),
                Category::Features,
            ));
        }
        entries
    }

    #[test]
    fn test_refine_threshold() {
        let config = PipelineConfig::default();

        // 7 of 10 in Other: 70% > 60%, refine
        assert!(should_refine(&make_entries(7, 3), &config));

        // 5 of 10 in Other: 50% <= 60%, skip
        assert!(!should_refine(&make_entries(5, 5), &config));

        // Exactly at the threshold is not enough
        assert!(!should_refine(&make_entries(6, 4), &config));

        // Too few entries overall
        assert!(!should_refine(&make_entries(5, 0), &config));
    }

    struct FixedClassifier(Vec<(String, Category)>);

    #[async_trait]
    impl TitleClassifier for FixedClassifier {
        async fn classify(&self, _titles: &[String]) -> Result<Vec<(String, Category)>> {
            Ok(self.0.clone())
        }
    }

    struct FailingClassifier;

    #[async_trait]
    impl TitleClassifier for FailingClassifier {
        async fn classify(&self, _titles: &[String]) -> Result<Vec<(String, Category)>> {
            Err(SourceError::Transport("timeout".to_string()))
        }
    }

    #[tokio::test]
    async fn test_refine_overwrites_only_matched_other_entries() {
        let config = PipelineConfig::default();
        let mut entries = make_entries(7, 3);

        let classifier = FixedClassifier(vec![
            ("misc change 0".to_string(), Category::Fixes),
            ("misc change 1".to_string(), Category::Other),
            ("unknown title".to_string(), Category::Features),
        ]);

        refine_other(&mut entries, &classifier, &config).await;

        assert_eq!(entries[0].category, Category::Fixes);
        // Classifier answered Other: entry stays put
        assert_eq!(entries[1].category, Category::Other);
        // No classification returned for this title
        assert_eq!(entries[2].category, Category::Other);
        // Non-Other entries are never touched
        assert_eq!(entries[7].category, Category::Features);
    }

    #[tokio::test]
    async fn test_refine_failure_is_swallowed() {
        let config = PipelineConfig::default();
        let mut entries = make_entries(7, 3);

        refine_other(&mut entries, &FailingClassifier, &config).await;

        // Original categorization stands
        assert!(entries[..7].iter().all(|e| e.category == Category::Other));
    }

    #[tokio::test]
    async fn test_refine_skipped_below_threshold() {
        let config = PipelineConfig::default();
        let mut entries = make_entries(5, 5);

        // Classifier would reassign everything, but must never be consulted
        let classifier = FixedClassifier(
            (0..5)
                .map(|i| (format!("misc change {i}"), Category::Fixes))
                .collect(),
        );

        refine_other(&mut entries, &classifier, &config).await;
        assert!(entries[..5].iter().all(|e| e.category == Category::Other));
    }
}
