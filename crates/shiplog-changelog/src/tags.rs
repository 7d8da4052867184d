//! Release and tag listing rendering

use shiplog_core::{ReleaseEntry, TagEntry};

/// Render a release listing with a suggested ref pair.
///
/// Entries are assumed most-recent-first, as returned by the source.
pub fn render_releases(owner: &str, repo: &str, releases: &[ReleaseEntry]) -> String {
    if releases.is_empty() {
        return no_refs_message(owner, repo);
    }

    let mut output = format!("# 🏷️ Releases for {}/{}\n\n", owner, repo);

    for release in releases {
        let mut line = format!("- **{}**", release.tag_name);
        if let Some(name) = &release.display_name {
            line.push_str(&format!(" \"{}\"", name));
        }
        if let Some(date) = &release.date {
            line.push_str(&format!(" - {}", date.format("%Y-%m-%d")));
        }
        if release.prerelease {
            line.push_str(" _(pre-release)_");
        }
        output.push_str(&line);
        output.push('\n');
    }

    if releases.len() >= 2 {
        output.push_str(&suggestion_line(
            &releases[1].tag_name,
            &releases[0].tag_name,
        ));
    }

    output
}

/// Render a raw tag listing, used when no releases exist
pub fn render_tags(owner: &str, repo: &str, tags: &[TagEntry]) -> String {
    if tags.is_empty() {
        return no_refs_message(owner, repo);
    }

    let mut output = format!("# 🏷️ Tags for {}/{}\n\n", owner, repo);

    for tag in tags {
        match &tag.short_sha {
            Some(sha) => output.push_str(&format!("- **{}** ({})\n", tag.name, sha)),
            None => output.push_str(&format!("- **{}**\n", tag.name)),
        }
    }

    if tags.len() >= 2 {
        output.push_str(&suggestion_line(&tags[1].name, &tags[0].name));
    }

    output
}

fn suggestion_line(from: &str, to: &str) -> String {
    format!(
        "\n💡 Suggested range: generate a changelog from {} to {}.\n",
        from, to
    )
}

fn no_refs_message(owner: &str, repo: &str) -> String {
    format!(
        "No releases or tags found for {}/{}. Branch names or commit SHAs work as refs too.",
        owner, repo
    )
}
