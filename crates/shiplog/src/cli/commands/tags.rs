//! Tags command

use clap::Args;
use tracing::info;

use crate::cli::{parse_repo, Cli};

use super::build_pipeline;

/// List releases and tags with a suggested ref pair
#[derive(Debug, Args)]
pub struct TagsCommand {
    /// Repository in OWNER/REPO form
    pub repo: String,
}

impl TagsCommand {
    /// Execute the tags command
    pub async fn execute(&self, _cli: &Cli) -> anyhow::Result<()> {
        let (owner, repo) = parse_repo(&self.repo)?;
        info!(%owner, %repo, "listing releases and tags");

        let pipeline = build_pipeline();
        println!("{}", pipeline.list_tags(&owner, &repo).await);

        Ok(())
    }
}
