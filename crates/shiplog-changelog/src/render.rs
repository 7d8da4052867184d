//! Markdown changelog rendering
//!
//! Pure functions from categorized entries to markdown text. No I/O happens
//! here; everything is deterministic given its inputs.

use tracing::debug;

use shiplog_core::Category;

use crate::types::CategorizedChange;

/// Render the full changelog document.
///
/// Sections appear in the fixed category order; empty sections are omitted.
/// Within a section, the relative order entries were supplied in is
/// preserved.
pub fn render_changelog(
    owner: &str,
    repo: &str,
    from_ref: &str,
    to_ref: &str,
    entries: &[CategorizedChange],
    total_commits: usize,
) -> String {
    let mut output = String::new();

    let heading = if to_ref == "HEAD" { "Unreleased" } else { to_ref };
    output.push_str(&format!("# 📋 Changelog: {}\n\n", heading));

    if entries.is_empty() {
        output.push_str("_No changes found between the given refs._\n");
    } else {
        for category in Category::ORDERED {
            let in_section: Vec<&CategorizedChange> = entries
                .iter()
                .filter(|e| e.category == category)
                .collect();

            if in_section.is_empty() {
                continue;
            }

            output.push_str(&format!("## {}\n\n", category.section_title()));
            for entry in in_section {
                output.push_str(&render_line(owner, repo, entry));
            }
            output.push('\n');
        }
    }

    output.push_str(&render_footer(
        owner,
        repo,
        from_ref,
        to_ref,
        entries,
        total_commits,
    ));

    debug!(
        entry_count = entries.len(),
        output_len = output.len(),
        "changelog rendered"
    );
    output
}

/// One bullet line: title, optional PR link, optional author credit
fn render_line(owner: &str, repo: &str, entry: &CategorizedChange) -> String {
    let mut line = format!("- {}", entry.clean_title);

    if let Some(number) = entry.change.pr_number {
        line.push_str(&format!(
            " ([#{}](https://github.com/{}/{}/pull/{}))",
            number, owner, repo, number
        ));
    }

    if let Some(author) = &entry.change.author {
        line.push_str(&format!(" by @{}", author));
    }

    line.push('\n');
    line
}

/// Footer: compare link, contributors, stats
fn render_footer(
    owner: &str,
    repo: &str,
    from_ref: &str,
    to_ref: &str,
    entries: &[CategorizedChange],
    total_commits: usize,
) -> String {
    let mut output = String::new();

    output.push_str("---\n\n");
    output.push_str(&format!(
        "**Full changelog**: https://github.com/{}/{}/compare/{}...{}\n",
        owner, repo, from_ref, to_ref
    ));

    let contributors = sorted_contributors(entries);
    if !contributors.is_empty() {
        let handles: Vec<String> = contributors.iter().map(|c| format!("@{}", c)).collect();
        output.push_str(&format!("**Contributors:** {}\n", handles.join(", ")));
    }

    let pr_count = entries.iter().filter(|e| e.change.pr_number.is_some()).count();
    let mut stats = format!(
        "**Stats:** {} commit{}",
        total_commits,
        if total_commits == 1 { "" } else { "s" }
    );
    if pr_count > 0 {
        stats.push_str(&format!(
            ", {} pull request{}",
            pr_count,
            if pr_count == 1 { "" } else { "s" }
        ));
    }
    output.push_str(&stats);
    output.push('\n');

    output
}

/// Unique author handles, sorted case-insensitively ascending.
///
/// Dedup uses the same case-insensitive key as the sort; the first-seen
/// casing wins.
fn sorted_contributors(entries: &[CategorizedChange]) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    let mut contributors: Vec<String> = Vec::new();
    for entry in entries {
        if let Some(author) = &entry.change.author {
            if seen.insert(author.to_lowercase()) {
                contributors.push(author.clone());
            }
        }
    }
    contributors.sort_by_key(|a| a.to_lowercase());
    contributors
}

#[cfg(test)]
mod tests {
    use super::*;
    use shiplog_core::RawChange;
    use crate::types::CategorizedChange;

    fn entry(category: Category, title: &str) -> CategorizedChange {
        CategorizedChange::new(RawChange::from_commit("abc1234", title), category)
    }

    #[test]
    fn test_empty_input_renders_placeholder() {
        let output = render_changelog("o", "r", "v1.0.0", "v2.0.0", &[], 0);

        assert!(output.contains("_No changes found between the given refs._"));
        for category in Category::ORDERED {
            assert!(!output.contains(category.section_title()));
        }
    }

    #[test]
    fn test_head_renders_as_unreleased() {
        let output = render_changelog("o", "r", "v1.0.0", "HEAD", &[], 0);
        assert!(output.contains("# 📋 Changelog: Unreleased"));

        let output = render_changelog("o", "r", "v1.0.0", "v2.0.0", &[], 0);
        assert!(output.contains("# 📋 Changelog: v2.0.0"));
    }

    #[test]
    fn test_section_order_is_fixed_and_empty_sections_omitted() {
        // Supplied out of order: docs, fixes, breaking
        let entries = vec![
            entry(Category::Docs, "docs: guide"),
            entry(Category::Fixes, "fix: crash"),
            entry(Category::Breaking, "breaking: drop api"),
        ];

        let output = render_changelog("o", "r", "a", "b", &entries, 3);

        let breaking = output.find("⚠️ Breaking Changes").unwrap();
        let fixes = output.find("🐛 Bug Fixes").unwrap();
        let docs = output.find("📚 Documentation").unwrap();
        assert!(breaking < fixes && fixes < docs);

        assert!(!output.contains("✨ New Features"));
        assert!(!output.contains("⚡ Performance"));
        assert!(!output.contains("🔧 Other Changes"));
    }

    #[test]
    fn test_line_with_pr_link_and_author() {
        let change = RawChange::from_pull_request(42, "feat(auth): add OAuth login (#42)")
            .with_author("dev1");
        let entries = vec![CategorizedChange::new(change, Category::Features)];

        let output = render_changelog("acme", "widgets", "v1", "v2", &entries, 1);

        assert!(output.contains(
            "- Add OAuth login ([#42](https://github.com/acme/widgets/pull/42)) by @dev1"
        ));
    }

    #[test]
    fn test_contributor_sort_is_case_insensitive() {
        let entries = vec![
            CategorizedChange::new(
                RawChange::from_commit("a", "one").with_author("zack"),
                Category::Other,
            ),
            CategorizedChange::new(
                RawChange::from_commit("b", "two").with_author("Alice"),
                Category::Other,
            ),
            CategorizedChange::new(
                RawChange::from_commit("c", "three").with_author("bob"),
                Category::Other,
            ),
        ];

        let output = render_changelog("o", "r", "a", "b", &entries, 3);
        assert!(output.contains("**Contributors:** @Alice, @bob, @zack"));
    }

    #[test]
    fn test_contributor_dedup_ignores_case() {
        let entries = vec![
            CategorizedChange::new(
                RawChange::from_commit("a", "one").with_author("Dev1"),
                Category::Other,
            ),
            CategorizedChange::new(
                RawChange::from_commit("b", "two").with_author("dev1"),
                Category::Other,
            ),
        ];

        let output = render_changelog("o", "r", "a", "b", &entries, 2);
        assert!(output.contains("**Contributors:** @Dev1\n"));
    }

    #[test]
    fn test_stats_line_with_and_without_prs() {
        let entries = vec![
            CategorizedChange::new(
                RawChange::from_pull_request(10, "fix: x"),
                Category::Fixes,
            ),
            CategorizedChange::new(
                RawChange::from_pull_request(11, "feat: y"),
                Category::Features,
            ),
        ];
        let output = render_changelog("o", "r", "a", "b", &entries, 5);
        assert!(output.contains("**Stats:** 5 commits, 2 pull requests"));

        let entries = vec![entry(Category::Fixes, "fix: z")];
        let output = render_changelog("o", "r", "a", "b", &entries, 1);
        assert!(output.contains("**Stats:** 1 commit\n"));
        assert!(!output.contains("pull request"));
    }

    #[test]
    fn test_footer_compare_link() {
        let output = render_changelog("acme", "widgets", "v1.0.0", "v2.0.0", &[], 0);
        assert!(output.contains("https://github.com/acme/widgets/compare/v1.0.0...v2.0.0"));
    }

    #[test]
    fn test_within_section_order_preserved() {
        let entries = vec![
            entry(Category::Fixes, "fix: first"),
            entry(Category::Fixes, "fix: second"),
        ];

        let output = render_changelog("o", "r", "a", "b", &entries, 2);
        let first = output.find("- Fix first").unwrap();
        let second = output.find("- Fix second").unwrap();
        assert!(first < second);
    }
}
