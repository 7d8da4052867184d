//! Generate command

use clap::Args;
use console::style;
use tracing::info;

use crate::cli::{parse_repo, Cli};

use super::build_pipeline;

/// Generate a changelog for a compare range
#[derive(Debug, Args)]
pub struct GenerateCommand {
    /// Repository in OWNER/REPO form
    pub repo: String,

    /// Starting ref (tag, branch, or commit SHA)
    #[arg(long)]
    pub from: String,

    /// Ending ref
    #[arg(long, default_value = "HEAD")]
    pub to: String,

    /// Write to file instead of stdout
    #[arg(short, long)]
    pub output: Option<std::path::PathBuf>,
}

impl GenerateCommand {
    /// Execute the generate command
    pub async fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        let (owner, repo) = parse_repo(&self.repo)?;
        info!(%owner, %repo, from = %self.from, to = %self.to, "generating changelog");

        let pipeline = build_pipeline();
        let changelog = pipeline.generate(&owner, &repo, &self.from, &self.to).await;

        match &self.output {
            Some(path) => {
                std::fs::write(path, &changelog)?;
                if !cli.quiet {
                    println!(
                        "{} Changelog written to {}",
                        style("✓").green().bold(),
                        style(path.display()).cyan()
                    );
                }
            }
            None => println!("{}", changelog),
        }

        Ok(())
    }
}
